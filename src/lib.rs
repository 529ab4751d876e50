//! StreamHub - typed client for the StreamHub streaming API
//!
//! The single point of contact for every call to the platform's REST API:
//! request construction, bearer-token sessions, JSON marshaling and uniform
//! errors, plus a scriptable CLI on top.
//!
//! # Modules
//!
//! - `api` - API client, endpoint table, typed endpoint methods
//! - `session` - Token ownership and durable storage
//! - `models` - Response shapes, request bodies, query parameters
//! - `config` - Config file and base URL resolution
//! - `error` - Error type shared by every call
//! - `cli` / `commands` - Command-line front end

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, RequestOptions};
pub use config::Config;
pub use error::{ApiError, Result};
pub use models::{
    AuthResponse, Comment, Content, ContentPage, ContentQuery, ContentType, Episode, Genre,
    PageQuery, User,
};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
