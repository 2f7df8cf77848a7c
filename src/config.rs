//! Run configuration.

use serde::Serialize;

/// How a table's identifying key is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyStrategy {
    /// Always probe the old snapshot for a unique column prefix.
    Infer,
    /// Use the declared `PRIMARY KEY` when there is one, otherwise infer.
    #[default]
    PreferDeclared,
}

/// Order in which rows are classified, and therefore statements emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    /// Keep the order the snapshot returned rows in. Not reproducible across
    /// backends or runs.
    AsRetrieved,
    /// Sort both snapshots by key tuple (then data tuple) first.
    #[default]
    SortedByKey,
}

/// Options for one diff run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffConfig {
    /// How keys are chosen.
    pub key_strategy: KeyStrategy,
    /// How rows are ordered before classification.
    pub row_order: RowOrder,
    /// Restrict the run to these tables; empty means every common table.
    pub tables: Vec<String>,
}

impl DiffConfig {
    /// Set the key strategy.
    #[must_use]
    pub fn with_key_strategy(mut self, key_strategy: KeyStrategy) -> Self {
        self.key_strategy = key_strategy;
        self
    }

    /// Set the row order.
    #[must_use]
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// Restrict the run to the given tables.
    #[must_use]
    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `table` is selected by this configuration.
    #[must_use]
    pub fn includes(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|t| t == table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiffConfig::default();
        assert_eq!(config.key_strategy, KeyStrategy::PreferDeclared);
        assert_eq!(config.row_order, RowOrder::SortedByKey);
        assert!(config.includes("anything"));
    }

    #[test]
    fn test_table_filter() {
        let config = DiffConfig::default().with_tables(["users"]);
        assert!(config.includes("users"));
        assert!(!config.includes("posts"));
    }
}
