//! Meal Allowance Engine for Magni Group security officers
//!
//! This crate prorates each officer's meal allowance over a 21st-to-20th
//! reporting period from their schedule, department and tenure, and serves
//! the calculation over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
