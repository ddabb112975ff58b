use super::entry::Entry;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column the tree is sorted by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    Name,
    Size,
    Type,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Raw, undecorated value of one column
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(i64),
    Text(String),
}

/// Comparable tuple used to order sibling nodes
///
/// Compared field by field: the directory grouping flag, the raw value of
/// the sort column, then the raw name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub group: bool,
    pub primary: SortValue,
    pub secondary: String,
}

/// Build the sort key of `entry` for the given column and order
///
/// The group flag is inverted for descending order, so once the sort routine
/// reverses the comparison directories still end up above files.
pub fn compute_sort_key(entry: &Entry, column: SortColumn, order: SortOrder) -> SortKey {
    let is_dir = entry.is_dir();
    let group = match order {
        SortOrder::Ascending => !is_dir,
        SortOrder::Descending => is_dir,
    };
    let primary = match column {
        SortColumn::Name => SortValue::Text(entry.raw_name().to_string()),
        SortColumn::Size => SortValue::Number(entry.size_bytes()),
        SortColumn::Type => SortValue::Text(entry.extension().to_string()),
        SortColumn::Modified => SortValue::Number(entry.modified),
    };
    SortKey {
        group,
        primary,
        secondary: entry.raw_name().to_string(),
    }
}

/// Compare two keys, applying the direction to every component
pub fn compare_keys(a: &SortKey, b: &SortKey, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => a.cmp(b),
        SortOrder::Descending => b.cmp(a),
    }
}
