use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::models::SourceCollection;
use crate::preferences::ViewPreferences;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::sources::{DocumentStoreConnector, MemoryConnector, Predicate, SourceConnector};

pub const ENV_CONFIG_PATH: &str = "LISTINGS_CONFIG_PATH";
pub const ENV_STORE_API_KEY: &str = "LISTINGS_STORE_API_KEY";
pub const DEFAULT_CONFIG_PATH: &str = "config/listings.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectionsConfig {
    pub primary: String,
    pub submitted: String,
    /// Review states under which agent submissions are shown
    pub published_review_statuses: Vec<String>,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            primary: "properties".to_string(),
            submitted: "agent_submissions".to_string(),
            published_review_statuses: vec!["published".to_string(), "approved".to_string()],
        }
    }
}

/// JSON files standing in for store collections
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FixturesConfig {
    pub primary_path: Option<PathBuf>,
    pub submitted_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    pub page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub collections: CollectionsConfig,
    pub fixtures: FixturesConfig,
    pub query: QueryConfig,
    pub preferences: ViewPreferences,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(s).context("parsing listings config")?;
        if config.query.page_size == 0 {
            config.query.page_size = DEFAULT_PAGE_SIZE;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading listings config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks:
    /// 1) $LISTINGS_CONFIG_PATH
    /// 2) config/listings.toml
    /// 3) built-in defaults
    ///
    /// `$LISTINGS_STORE_API_KEY` overrides the configured store key.
    pub fn load_default() -> Result<Self> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => Self::load_from(Path::new(&p))?,
            Err(_) => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    Self::load_from(&fallback)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(key) = std::env::var(ENV_STORE_API_KEY) {
            if !key.trim().is_empty() {
                config.store.api_key = Some(key);
            }
        }
        Ok(config)
    }

    /// Constraints every submitted-collection read carries
    pub fn submitted_scope(&self) -> Predicate {
        Predicate::new().one_of(
            "reviewStatus",
            self.collections.published_review_statuses.iter().cloned(),
        )
    }

    /// One connector per collection, fixture-backed where a fixture path is set.
    pub async fn build_connectors(&self) -> Result<Vec<Arc<dyn SourceConnector>>> {
        let timeout = Duration::from_secs(self.store.timeout_secs);
        let mut connectors: Vec<Arc<dyn SourceConnector>> = Vec::with_capacity(2);

        let collections = [
            (
                SourceCollection::Primary,
                &self.collections.primary,
                &self.fixtures.primary_path,
                Predicate::new(),
            ),
            (
                SourceCollection::Submitted,
                &self.collections.submitted,
                &self.fixtures.submitted_path,
                self.submitted_scope(),
            ),
        ];

        for (collection, name, fixture, scope) in collections {
            let connector: Arc<dyn SourceConnector> = match fixture {
                Some(path) => {
                    info!(collection = collection.as_str(), path = %path.display(), "Using fixture file");
                    Arc::new(MemoryConnector::from_json_file(path, collection).await?.with_scope(scope))
                }
                None => Arc::new(
                    DocumentStoreConnector::new(&self.store.base_url, name.as_str(), collection, timeout)?
                        .with_api_key(self.store.api_key.clone())
                        .with_scope(scope),
                ),
            };
            connectors.push(connector);
        }

        Ok(connectors)
    }
}
