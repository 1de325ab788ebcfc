//! Modular common utilities shared across the Zotero client crates.
//!
//! Nothing here knows about the remote API.
//!
//! # Feature Tiers
//!
//! - `foundation`: secret redaction for logs
//! - `runtime`: clock abstraction and the async request limiter

#![forbid(unsafe_code)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod privacy;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

#[cfg(feature = "runtime")]
pub use resilience::{Clock, LimiterError, MockClock, RequestLimiter, SystemClock};
