//! Calculation logic for the Allowance Engine.
//!
//! This module contains the allowance proration pipeline: reporting period
//! resolution, attendance classification, tenure and rate resolution, net
//! amount calculation, aggregation of results, and the batch driver that
//! runs them for a whole roster.

mod aggregator;
mod attendance_classifier;
mod batch;
mod net_amount;
mod period_resolver;
mod rate_resolver;

pub use aggregator::{AggregateResult, aggregate, sort_by_name};
pub use attendance_classifier::{ClassificationResult, classify, duplicate_days};
pub use batch::{BatchInput, calculate_allowances, calculate_period, calculate_person};
pub use net_amount::{NetAmountResult, compute_net, round_amount};
pub use period_resolver::{PERIOD_END_DAY, PERIOD_START_DAY, resolve_period};
pub use rate_resolver::{RateLookupResult, ResolvedRate, resolve_rate, tenure_months};
