use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

use crate::errors::TrackerError;

/// A submitted wiki listing page: `<base>/<game>/<tier...>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub game: String,
    pub tier: String,
    pub url: String,
}

fn page_regex() -> &'static Regex {
    static PAGE: OnceLock<Regex> = OnceLock::new();
    PAGE.get_or_init(|| {
        Regex::new(r"(?i)^(https?)://([^/?#]+)/([A-Za-z0-9-]+)/([^?#]+)")
            .expect("wiki page pattern is a valid regex")
    })
}

impl WikiPage {
    /// Validate a submitted URL against the configured wiki origin.
    ///
    /// The game is the first path segment (lower-cased); the tier is the rest
    /// of the path, percent-decoded. `url` is rebuilt from the configured base
    /// and never carries the query string.
    pub fn parse(url: &str, base_url: &str) -> Result<Self> {
        let url = url.trim();
        let invalid = || TrackerError::InvalidUrl(url.to_string());

        let caps = page_regex().captures(url).ok_or_else(invalid)?;
        if host_key(&caps[2]) != host_key(base_host(base_url)) {
            return Err(invalid().into());
        }

        let tier_path = caps[4].trim_end_matches('/');
        let tier = urlencoding::decode(tier_path)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| tier_path.to_string());
        if tier.trim().is_empty() {
            return Err(invalid().into());
        }

        Ok(Self::canonical(base_url, &caps[3].to_lowercase(), tier))
    }

    /// File-system safe key, unique per `(game, tier)`
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.game, urlencoding::encode(&self.tier))
    }

    /// Inverse of [`WikiPage::cache_key`]
    pub fn from_cache_key(key: &str, base_url: &str) -> Option<Self> {
        let (game, encoded_tier) = key.split_once('_')?;
        let tier = urlencoding::decode(encoded_tier).ok()?.into_owned();
        if game.is_empty() || tier.is_empty() {
            return None;
        }
        Some(Self::canonical(base_url, game, tier))
    }

    fn canonical(base_url: &str, game: &str, tier: String) -> Self {
        Self {
            url: format!("{}/{}/{}", base_url.trim_end_matches('/'), game, tier),
            game: game.to_string(),
            tier,
        }
    }
}

fn base_host(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}

fn host_key(host: &str) -> String {
    let host = host.to_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}
