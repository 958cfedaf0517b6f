//! Shared market data types

pub mod market;

pub use market::*;
