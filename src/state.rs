use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::item::ItemStore;
use crate::services::mail::{Mailer, MailerError};

/// Shared application state, cloned into every handler.
///
/// The pool and HTTP client are internally reference-counted; the item
/// store lives behind a single `RwLock` for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub mailer: Mailer,
    pub items: Arc<RwLock<ItemStore>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Result<Self, MailerError> {
        let mailer = Mailer::from_config(&config)?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            http: reqwest::Client::new(),
            mailer,
            items: Arc::new(RwLock::new(ItemStore::default())),
        })
    }
}
