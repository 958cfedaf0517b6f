//! Clients for external collaborators

pub mod quote;

pub use quote::*;
