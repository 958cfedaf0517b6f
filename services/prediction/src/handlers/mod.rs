//! HTTP request handlers

pub mod health;
pub mod predict;
pub mod quote;
pub mod stats;
