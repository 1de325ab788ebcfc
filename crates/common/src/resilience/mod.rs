//! Resilience patterns for outbound request pacing
//!
//! - **Clock**: monotonic time source with a mock for tests
//! - **Request limiter**: one request per interval with an async, cancellable wait

pub mod clock;
pub mod rate_limiter;

pub use clock::{Clock, MockClock, SystemClock};
pub use rate_limiter::{LimiterError, RequestLimiter};
