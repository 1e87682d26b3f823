//! Settings catalog lookup
//!
//! Resolves incoming object keywords and comment keys against the configured
//! catalog, and produces the initial table with every key set to `"Not Found"`.

use std::collections::{HashMap, HashSet};

use crate::app::models::SettingsTable;
use crate::config::SettingsCatalogConfig;
use crate::constants::NOT_FOUND;

/// Normalise a keyword for catalog matching: spaces removed, lowercased
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Location of a key in the settings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub category: String,
    pub key: String,
}

/// Lookup tables derived from a [`SettingsCatalogConfig`]
#[derive(Debug, Clone)]
pub struct SettingsCatalog {
    objects: HashMap<String, CatalogEntry>,
    comment_keys: HashSet<String>,
    comment_category: String,
    template: SettingsTable,
}

impl SettingsCatalog {
    /// Build lookup tables from configuration
    pub fn from_config(config: &SettingsCatalogConfig) -> Self {
        let template = config
            .categories
            .iter()
            .map(|(category, keys)| {
                let values = keys
                    .iter()
                    .map(|key| (key.clone(), NOT_FOUND.to_string()))
                    .collect();
                (category.clone(), values)
            })
            .collect();

        let objects = config
            .object_keys()
            .map(|(category, key)| {
                (
                    normalize_keyword(key),
                    CatalogEntry {
                        category: category.to_string(),
                        key: key.to_string(),
                    },
                )
            })
            .collect();

        Self {
            objects,
            comment_keys: config.comment_keys(),
            comment_category: config.comment_category.clone(),
            template,
        }
    }

    /// Catalog entry for an object keyword, matched case- and space-insensitively
    pub fn lookup_object(&self, keyword: &str) -> Option<&CatalogEntry> {
        self.objects.get(&normalize_keyword(keyword))
    }

    /// Whether `key` is carried by top-level comments
    pub fn is_comment_key(&self, key: &str) -> bool {
        self.comment_keys.contains(key)
    }

    /// Category that comment-carried keys are stored under
    pub fn comment_category(&self) -> &str {
        &self.comment_category
    }

    /// Table with every catalog key set to the placeholder
    pub fn empty_table(&self) -> SettingsTable {
        self.template.clone()
    }
}
