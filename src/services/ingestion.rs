use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use log::info;
use serde::Serialize;

use crate::cache::PageCache;
use crate::config::AppConfig;
use crate::database::{self, games, tiers, tournaments, DbPool};
use crate::domain::TournamentDraft;
use crate::fetchers::{WikiPage, WikiScraper};

/// Result of one submitted page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub game: String,
    pub tier: String,
    pub tier_id: i64,
    pub from_cache: bool,
    pub tournaments: Vec<TournamentDraft>,
    pub inserted: usize,
}

/// Turns a submitted wiki URL into stored tournaments
pub struct IngestionService {
    pool: DbPool,
    cache: PageCache,
    scraper: WikiScraper,
    base_url: String,
}

impl IngestionService {
    pub fn new(pool: DbPool, config: &AppConfig) -> Result<Self> {
        Ok(Self {
            pool,
            cache: PageCache::new(&config.storage.saved_pages_dir)?,
            scraper: WikiScraper::new(&config.scraper)?,
            base_url: config.scraper.base_url.clone(),
        })
    }

    pub async fn submit(&mut self, url: &str) -> Result<SubmitOutcome> {
        info!("=== Submitting {} ===", url);

        // Step 1: Validate the page
        let page = WikiPage::parse(url, &self.base_url)?;
        info!("  → Game: {}, tier: {}", page.game, page.tier);

        // Step 2: Saved copy or fresh fetch
        let (html, from_cache) = self.load_page(&page).await?;

        // Step 3: Extract this year's and later tournaments
        let min_year = Utc::now().year();
        let tournaments = self.scraper.extract(&html, min_year);
        info!("  → Extracted {} tournaments", tournaments.len());

        // Step 4: Store
        let (tier_id, inserted) = self.store(&page, &tournaments)?;
        info!("  → Inserted {} new tournaments", inserted);

        info!("=== Submit Complete ===");
        Ok(SubmitOutcome {
            game: page.game,
            tier: page.tier,
            tier_id,
            from_cache,
            tournaments,
            inserted,
        })
    }

    async fn load_page(&mut self, page: &WikiPage) -> Result<(String, bool)> {
        if let Some(html) = self.cache.load(page)? {
            return Ok((html, true));
        }

        let html = self.scraper.fetch_page(&page.url).await?;
        self.cache.save(page, &html)?;
        Ok((html, false))
    }

    /// Upsert game and tier, then insert drafts in one transaction.
    ///
    /// Returns the tier id and how many rows were new.
    fn store(&self, page: &WikiPage, drafts: &[TournamentDraft]) -> Result<(i64, usize)> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to begin transaction")?;

        let game = games::insert_or_get(&tx, &page.game)?;
        let tier = tiers::insert_or_get(&tx, game.id, &page.url)?;

        let mut inserted = 0;
        for draft in drafts {
            if tournaments::insert_draft(&tx, tier.id, draft)? {
                inserted += 1;
            }
        }

        tx.commit().context("Failed to commit transaction")?;
        Ok((tier.id, inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup::apply_schema};
    use crate::errors::TrackerError;
    use std::path::Path;

    const URL: &str = "https://liquipedia.net/dota2/Tier_1_Tournaments";

    fn service(pages_dir: &Path) -> IngestionService {
        let pool = create_memory_pool().unwrap();
        apply_schema(&get_connection(&pool).unwrap()).unwrap();

        let mut config = AppConfig::new();
        config.storage.saved_pages_dir = pages_dir.to_path_buf();
        IngestionService::new(pool, &config).unwrap()
    }

    fn listing(year: i32) -> String {
        format!(
            r#"<div class="gridTable">
                <div class="gridRow">
                    <div class="gridCell Tournament Header"><a
                        href="/dota2/DreamLeague/26">DreamLeague Season 26</a></div>
                    <div class="gridCell EventDetails Date Header">Sep 10 - 21, {year}</div>
                    <div class="gridCell EventDetails Prize Header">$1,000,000</div>
                    <div class="gridCell EventDetails Location Header">Online</div>
                </div>
                <div class="gridRow">
                    <div class="gridCell Tournament Header"><a
                        href="/dota2/TBA">Unscheduled Invitational</a></div>
                    <div class="gridCell EventDetails Date Header">TBA {year}</div>
                    <div class="gridCell EventDetails Prize Header"></div>
                    <div class="gridCell EventDetails Location Header"></div>
                </div>
                <div class="gridRow">
                    <div class="gridCell Tournament Header"><a href="/dota2/Old">Old Cup</a></div>
                    <div class="gridCell EventDetails Date Header">Mar 01 - 05, 2019</div>
                    <div class="gridCell EventDetails Prize Header"></div>
                    <div class="gridCell EventDetails Location Header"></div>
                </div>
            </div>"#
        )
    }

    #[tokio::test]
    async fn test_submit_uses_saved_page_and_never_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(dir.path());
        let page = WikiPage::parse(URL, "https://liquipedia.net").unwrap();
        PageCache::new(dir.path())
            .unwrap()
            .save(&page, &listing(Utc::now().year()))
            .unwrap();

        let first = service.submit(URL).await.unwrap();
        assert!(first.from_cache);
        assert_eq!(first.game, "dota2");
        assert_eq!(first.tournaments.len(), 2);
        assert_eq!(first.inserted, 2);

        let second = service.submit(URL).await.unwrap();
        assert_eq!(second.tournaments.len(), 2);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.tier_id, first.tier_id);

        let conn = get_connection(&service.pool).unwrap();
        assert_eq!(tournaments::list_by_tier(&conn, first.tier_id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_rejects_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(dir.path());

        let error = service.submit("https://example.com/dota2/Tier_1").await.unwrap_err();

        assert!(matches!(TrackerError::find(&error), Some(TrackerError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_url_variants_resolve_to_one_tier() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(dir.path());
        let page = WikiPage::parse(URL, "https://liquipedia.net").unwrap();
        PageCache::new(dir.path())
            .unwrap()
            .save(&page, &listing(Utc::now().year()))
            .unwrap();

        let first = service
            .submit("https://liquipedia.net/Dota2/Tier_1_Tournaments")
            .await
            .unwrap();
        let slashed = service
            .submit("https://liquipedia.net/dota2/Tier_1_Tournaments/")
            .await
            .unwrap();
        let edit = service.submit(&format!("{URL}?action=edit")).await.unwrap();

        assert_eq!(slashed.tier_id, first.tier_id);
        assert_eq!(edit.tier_id, first.tier_id);
        let conn = get_connection(&service.pool).unwrap();
        let stored = tiers::list_all(&conn).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].url, URL);
    }

    #[test]
    fn test_store_reuses_game_and_tier() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let page = WikiPage::parse(URL, "https://liquipedia.net").unwrap();

        let (first, _) = service.store(&page, &[]).unwrap();
        let (second, _) = service.store(&page, &[]).unwrap();

        assert_eq!(first, second);
        let conn = get_connection(&service.pool).unwrap();
        assert_eq!(games::list_all(&conn).unwrap().len(), 1);
    }
}
