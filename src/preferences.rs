use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::normalizer::DEFAULT_CURRENCY;
use crate::query::ListingQuery;

/// Shared viewing preferences applied to every listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPreferences {
    /// Area used when a query does not name one
    pub area: Option<String>,
    /// Currency assumed for listings that do not state one
    pub currency: String,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            area: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ViewPreferences {
    /// Fill in query gaps from the preferences. Explicit query values win.
    pub fn apply_to(&self, query: &mut ListingQuery) {
        if query.criteria.area.is_none() {
            query.criteria.area = self.area.clone();
        }
    }
}

/// Process-wide holder of the current [`ViewPreferences`]
///
/// Subscribers are woken only when an update actually changes the value.
#[derive(Debug)]
pub struct PreferencesStore {
    tx: watch::Sender<ViewPreferences>,
}

impl PreferencesStore {
    pub fn new(initial: ViewPreferences) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> ViewPreferences {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewPreferences> {
        self.tx.subscribe()
    }

    /// Apply `f` to a copy and publish it if anything changed. Returns whether it did.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut ViewPreferences),
    {
        self.tx.send_if_modified(|current| {
            let mut next = current.clone();
            f(&mut next);
            if next == *current {
                return false;
            }
            *current = next;
            true
        })
    }
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new(ViewPreferences::default())
    }
}
