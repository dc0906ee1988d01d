//! HTTP API module for the Allowance Engine.
//!
//! This module provides the REST API endpoints for calculating meal
//! allowances and resolving reporting periods.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
