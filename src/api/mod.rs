//! StreamHub REST API access
//!
//! - client: request construction, auth headers, error mapping
//! - endpoints: declarative table of every remote operation
//! - catalog: one typed method per endpoint

mod catalog;
pub mod client;
pub mod endpoints;

pub use client::{ApiClient, RequestOptions};
pub use endpoints::{Auth, Endpoint, HttpMethod};
