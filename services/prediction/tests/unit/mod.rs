//! Unit tests

mod cache_tests;
mod model_tests;
mod predictor_tests;
mod stats_tests;
