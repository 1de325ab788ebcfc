//! HTTP plumbing: the reqwest client and the exchange shapes built on it

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::{Exchange, Transport};
