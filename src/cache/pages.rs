use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetchers::WikiPage;

const PAGE_EXTENSION: &str = "html";

/// A page stored on disk, with the URL it can be re-submitted from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedPage {
    pub file: String,
    pub url: String,
}

/// Raw wiki pages saved per `(game, tier)`, consulted before any fetch
pub struct PageCache {
    pages_dir: PathBuf,
}

impl PageCache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(pages_dir: P) -> Result<Self> {
        let pages_dir = pages_dir.as_ref().to_path_buf();

        fs::create_dir_all(&pages_dir).context("Failed to create saved pages directory")?;

        Ok(Self { pages_dir })
    }

    /// Load a saved page
    pub fn load(&self, page: &WikiPage) -> Result<Option<String>> {
        let file_path = self.build_path(page);

        if !file_path.exists() {
            return Ok(None);
        }

        let html = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read saved page {}", file_path.display()))?;

        info!("Using cached page: {}", file_path.display());
        Ok(Some(html))
    }

    /// Save a page, replacing any previous copy
    pub fn save(&self, page: &WikiPage, html: &str) -> Result<()> {
        let file_path = self.build_path(page);

        fs::write(&file_path, html)
            .with_context(|| format!("Failed to write saved page {}", file_path.display()))?;

        info!("Saved page to cache: {}", file_path.display());
        Ok(())
    }

    /// All saved pages, sorted by file name
    pub fn list(&self, base_url: &str) -> Result<Vec<SavedPage>> {
        let entries = fs::read_dir(&self.pages_dir).context("Failed to list saved pages")?;

        let mut pages = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read saved pages entry")?.path();
            if let Some(page) = Self::saved_page(&path, base_url) {
                pages.push(page);
            }
        }

        pages.sort_by(|a, b| a.file.cmp(&b.file));
        Ok(pages)
    }

    // --- Helper Methods ---

    fn build_path(&self, page: &WikiPage) -> PathBuf {
        self.pages_dir
            .join(format!("{}.{}", page.cache_key(), PAGE_EXTENSION))
    }

    fn saved_page(path: &Path, base_url: &str) -> Option<SavedPage> {
        if path.extension()? != PAGE_EXTENSION {
            return None;
        }
        let page = WikiPage::from_cache_key(path.file_stem()?.to_str()?, base_url)?;
        Some(SavedPage {
            file: path.file_name()?.to_str()?.to_string(),
            url: page.url,
        })
    }
}
