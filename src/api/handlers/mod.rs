use anyhow::Result;
use tokio::sync::Mutex;

use crate::cache::PageCache;
use crate::config::AppConfig;
use crate::database::{self, DbConn, DbPool};
use crate::services::ingestion::IngestionService;
use crate::services::overview::OverviewService;

pub mod filters;
pub mod listing;
pub mod overview;
pub mod pages;
pub mod submit;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub pages: PageCache,
    pub overview: OverviewService,
    // One scraper for the whole server so the rate limit holds across requests
    pub ingestion: Mutex<IngestionService>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Result<Self> {
        Ok(Self {
            pages: PageCache::new(&config.storage.saved_pages_dir)?,
            overview: OverviewService::new(pool.clone()),
            ingestion: Mutex::new(IngestionService::new(pool.clone(), &config)?),
            pool,
            config,
        })
    }

    pub fn connection(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }
}
