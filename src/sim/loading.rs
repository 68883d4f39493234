//! Asset load tracking
//!
//! The host loads models asynchronously and reports each one by id. The
//! session stays in Loading until every id in the manifest has reported.

use std::collections::BTreeSet;

use thiserror::Error;

/// Milk cartons stocked on the shelves
pub const MILK_CARTONS: usize = 20;

const FIXED_ASSETS: [&str; 19] = [
    "hallway",
    "toilet",
    "arm",
    "sink",
    "chest",
    "chicken",
    "mushrooms",
    "wok",
    "key",
    "mirror",
    "altar",
    "tv",
    "nightstand",
    "commode",
    "shelves",
    "table",
    "crate_1",
    "crate_2",
    "old_crate",
];

/// Object name of milk carton `i`
pub fn milk_id(i: usize) -> String {
    format!("milk_{}", i)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("asset '{0}' is not in the load manifest")]
    UnknownAsset(String),
    #[error("asset '{0}' is listed twice in the load manifest")]
    DuplicateAsset(String),
}

/// Pending and loaded asset ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadManifest {
    expected: BTreeSet<String>,
    loaded: BTreeSet<String>,
}

impl Default for LoadManifest {
    /// The hallway's full asset list
    fn default() -> Self {
        let expected = FIXED_ASSETS
            .iter()
            .map(|id| id.to_string())
            .chain((0..MILK_CARTONS).map(milk_id))
            .collect();
        Self {
            expected,
            loaded: BTreeSet::new(),
        }
    }
}

impl LoadManifest {
    pub fn new<I, S>(ids: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut expected = BTreeSet::new();
        for id in ids {
            let id = id.into();
            if expected.contains(&id) {
                return Err(ManifestError::DuplicateAsset(id));
            }
            expected.insert(id);
        }
        Ok(Self {
            expected,
            loaded: BTreeSet::new(),
        })
    }

    /// Record that `id` finished loading. Returns false if it already had.
    pub fn mark_loaded(&mut self, id: &str) -> Result<bool, ManifestError> {
        if !self.expected.contains(id) {
            return Err(ManifestError::UnknownAsset(id.to_string()));
        }
        let fresh = self.loaded.insert(id.to_string());
        if fresh {
            log::debug!("Loaded {} ({}/{})", id, self.loaded(), self.total());
        }
        Ok(fresh)
    }

    /// Ids still waiting on the host, in sorted order
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.expected
            .iter()
            .filter(|id| !self.loaded.contains(*id))
            .map(String::as_str)
    }

    pub fn loaded(&self) -> usize {
        self.loaded.len()
    }

    pub fn total(&self) -> usize {
        self.expected.len()
    }

    /// Rounded percentage; an empty manifest counts as done
    pub fn progress_percent(&self) -> u32 {
        if self.total() == 0 {
            return 100;
        }
        ((self.loaded() as f64 / self.total() as f64) * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.loaded() == self.total()
    }

    /// Status line shown while loading
    pub fn status_line(&self) -> String {
        format!("Loading {}% complete", self.progress_percent())
    }
}
