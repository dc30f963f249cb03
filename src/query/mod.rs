//! Query module
//!
//! Builds the form-encoded search payload for the trade statistics endpoint.
//!
//! # Overview
//!
//! A [`TradeQuery`] holds the filters of a run (period, HS code, countries).
//! Calling [`TradeQuery::prepare`] validates them once, before any network
//! activity, and yields a [`PreparedQuery`] that renders the payload for
//! any page number.

mod types;

pub use types::{HsLevel, PreparedQuery, TradeQuery};
