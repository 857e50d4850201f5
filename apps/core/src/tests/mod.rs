//! Test Module
//!
//! Comprehensive test suite for the MoodChat backend.
//!
//! ## Test Categories
//! - `pipeline_tests`: Normalization properties, taxonomy tiers, engine behavior
//! - `ml_tests`: Vectorizer/classifier training, persistence, determinism
//! - `server_tests`: HTTP routes, envelopes, and error statuses
//! - `integration_tests`: Startup bootstrap, preflight, and end-to-end scenarios

pub mod integration_tests;
