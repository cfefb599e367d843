pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod rate_limiter;
pub mod render;
pub mod services;

use anyhow::Result;
use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cache::PageCache;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::ingestion::IngestionService;
use crate::services::overview::{OverviewQuery, OverviewService};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_submit(url: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        let config = AppConfig::from_env();
        let pool = database::open_database(&config.storage.database_path)?;
        let mut service = IngestionService::new(pool, &config)?;
        service.submit(url).await
    })?;

    print!("{}", render::submit(&outcome));
    Ok(())
}

pub fn handle_overview(game: Option<String>, tier: Option<i64>) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::open_database(&config.storage.database_path)?;
    let service = OverviewService::new(pool);

    let overview = service.overview(&OverviewQuery::new(game, tier), Utc::now().date_naive())?;
    print!("{}", render::overview(&overview));
    Ok(())
}

pub fn handle_pages() -> Result<()> {
    let config = AppConfig::from_env();
    let cache = PageCache::new(&config.storage.saved_pages_dir)?;

    let pages = cache.list(&config.scraper.base_url)?;
    print!("{}", render::saved_pages(&pages));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
