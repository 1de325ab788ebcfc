//! Error conversions at the infrastructure boundary

mod conversions;

pub use conversions::{http_error, io_error, InfraError};
