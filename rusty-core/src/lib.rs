use std::sync::Arc;

use twilight_http::Client;

use rusty_paginator::pagination::PaginationSessions;

pub mod config;

pub use config::Config;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub sessions: PaginationSessions,
    pub config: Arc<Config>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, config: Config) -> Self {
        Self {
            http,
            sessions: PaginationSessions::new(config.pagination_timeout()),
            config: Arc::new(config),
        }
    }
}
