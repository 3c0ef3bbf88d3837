//! Codewatch domain core.
//!
//! Violation aggregation across heterogeneous providers and partial-failure
//! tolerant property enrichment. This crate has no HTTP or provider wire
//! code: adapters and enrichment capabilities plug in through the traits in
//! [`provider`] and [`enrichment::capabilities`].

pub mod aggregator;
pub mod enrichment;
pub mod error;
pub mod filters;
pub mod fixtures;
pub mod provider;
pub mod registry;
pub mod types;
pub mod violation;
