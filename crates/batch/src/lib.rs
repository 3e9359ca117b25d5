//! Sequential batch driver for illustration generation.
//!
//! Walks the prompt table in order, runs one job at a time through
//! build -> submit -> poll -> fetch -> persist, and aggregates per-entry
//! outcomes into a [`report::BatchReport`]. A failed entry never aborts
//! the batch.

pub mod driver;
pub mod report;
