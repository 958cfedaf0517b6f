//! Shared vocabulary for the dashboard services
//!
//! Provides:
//! - Market data records (`PriceBar`, `Company`)
//! - The persistence collaborator trait (`MarketStore`) and an in-memory
//!   implementation for tests and self-contained deployments
//! - The quote-feed collaborator trait (`QuoteFeed`) and its HTTP client
//! - Clock and throttle utilities for components that age state

pub mod clients;
pub mod clock;
pub mod errors;
pub mod store;
pub mod throttle;
pub mod types;

pub use clients::*;
pub use clock::*;
pub use errors::*;
pub use store::*;
pub use throttle::*;
pub use types::*;
