//! Settings extractor
//!
//! A [`RecordSink`] that fills a [`SettingsTable`] from settings comments and
//! catalog objects. The last occurrence of a key wins.

use tracing::debug;

use super::catalog::SettingsCatalog;
use super::formatters::SettingKind;
use crate::app::models::{CommentRecord, ObjectRecord, Record, SettingsTable};
use crate::app::services::pipeline::RecordSink;
use crate::config::ExtractorConfig;

/// Builds the categorised settings table for one pass
#[derive(Debug, Clone)]
pub struct SettingsExtractor {
    catalog: SettingsCatalog,
    engine_name: String,
    table: SettingsTable,
    matched: usize,
}

impl SettingsExtractor {
    /// Create an extractor for the catalog and engine name in `config`
    pub fn new(config: &ExtractorConfig) -> Self {
        let catalog = SettingsCatalog::from_config(&config.settings);
        let table = catalog.empty_table();
        Self {
            catalog,
            engine_name: config.engine_name.clone(),
            table,
            matched: 0,
        }
    }

    /// The table as built so far
    pub fn table(&self) -> &SettingsTable {
        &self.table
    }

    /// Number of records that set a catalog key
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Finish the pass and take the table
    pub fn into_table(self) -> SettingsTable {
        self.table
    }

    fn process_comment(&mut self, comment: &CommentRecord) {
        let Some((key, value)) = comment.setting() else {
            return;
        };
        if !self.catalog.is_comment_key(key) {
            return;
        }

        let category = self.catalog.comment_category().to_string();
        self.store(&category, key, value.to_string());
    }

    fn process_object(&mut self, object: &ObjectRecord) {
        let Some(entry) = self.catalog.lookup_object(&object.keyword) else {
            return;
        };
        let (category, key) = (entry.category.clone(), entry.key.clone());

        let values: Vec<String> = std::iter::once(object.keyword.clone())
            .chain(object.fields.iter().cloned())
            .collect();
        let value = SettingKind::for_key(&key).format(&values, &self.engine_name);

        self.store(&category, &key, value);
    }

    fn store(&mut self, category: &str, key: &str, value: String) {
        debug!("Setting {} / {} matched", category, key);
        if let Some(slot) = self
            .table
            .get_mut(category)
            .and_then(|settings| settings.get_mut(key))
        {
            *slot = value;
            self.matched += 1;
        }
    }
}

impl RecordSink for SettingsExtractor {
    fn process(&mut self, record: &Record) {
        match record {
            Record::Comment(comment) => self.process_comment(comment),
            Record::Object(object) => self.process_object(object),
        }
    }

    fn name(&self) -> &'static str {
        "settings"
    }
}
