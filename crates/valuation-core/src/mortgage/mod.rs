//! Mortgage analytics.

pub mod amortization;
