use std::env;

use tracing::warn;

pub const DEFAULT_KEYWORD_FILE: &str = "keywords.txt";

/// Query and ranking settings, resolved from compiled defaults, then a
/// `paperrank.env` file / the process environment, then CLI flags.
#[derive(Debug, Clone)]
pub struct ArxivConfig {
    pub num_entries: i32,
    pub num_pages: i32,
    pub categories: Vec<String>,
    /// Articles must score strictly above this to be shown.
    pub threshold: f64,
    pub keyword_file: String,
}

impl Default for ArxivConfig {
    fn default() -> Self {
        ArxivConfig {
            num_entries: 500,
            num_pages: 1,
            categories: vec![String::from("astro-ph.CO"), String::from("astro-ph.GA")],
            threshold: 0.7,
            keyword_file: String::from(DEFAULT_KEYWORD_FILE),
        }
    }
}

impl ArxivConfig {
    pub fn from_env() -> Self {
        // the env file is optional; plain environment variables still apply
        let _ = dotenvy::from_filename("paperrank.env");

        let mut config = Self::default();
        if let Some(num_entries) = positive_i32_from_env("PAPERRANK_NUM_ENTRIES") {
            config.num_entries = num_entries;
        }
        if let Some(num_pages) = positive_i32_from_env("PAPERRANK_NUM_PAGES") {
            config.num_pages = num_pages;
        }
        if let Ok(raw) = env::var("PAPERRANK_CATEGORIES") {
            let categories: Vec<String> = raw.split_whitespace().map(String::from).collect();
            if categories.is_empty() {
                warn!("PAPERRANK_CATEGORIES is empty, keeping defaults");
            } else {
                config.categories = categories;
            }
        }
        if let Ok(raw) = env::var("PAPERRANK_THRESHOLD") {
            match raw.parse::<f64>() {
                Ok(threshold) => config.threshold = threshold,
                Err(_) => warn!(
                    "failed to parse PAPERRANK_THRESHOLD {:?}, keeping {}",
                    raw, config.threshold
                ),
            }
        }
        if let Ok(path) = env::var("PAPERRANK_KEYWORD_FILE") {
            config.keyword_file = path;
        }
        config
    }
}

fn positive_i32_from_env(key: &str) -> Option<i32> {
    let raw = env::var(key).ok()?;
    match raw.parse::<i32>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("{} must be a positive integer, ignoring {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArxivConfig::default();
        assert_eq!(config.num_entries, 500);
        assert_eq!(config.num_pages, 1);
        assert_eq!(config.categories, vec!["astro-ph.CO", "astro-ph.GA"]);
        assert_eq!(config.threshold, 0.7);
        assert_eq!(config.keyword_file, DEFAULT_KEYWORD_FILE);
    }
}
