//! Description classification shared by all parsers
//!
//! A [`ClassificationTable`] is an ordered list of categories, each with the
//! source descriptions that map onto it, plus a separate noise list. Matching
//! is an exact comparison after trimming, ignoring ASCII case. The first
//! category in table order that lists the description wins.

use crate::types::Category;

/// Static per-format description table
#[derive(Debug)]
pub struct ClassificationTable {
    /// Categories in priority order
    pub categories: &'static [(Category, &'static [&'static str])],
    /// Descriptions of lines that carry no reportable event
    pub noise: &'static [&'static str],
}

impl ClassificationTable {
    /// Map a source description onto a category, [`Category::Error`] if unknown
    pub fn classify(&self, description: &str) -> Category {
        let description = description.trim();
        self.categories
            .iter()
            .find(|(_, entries)| matches_any(entries, description))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Error)
    }

    /// True for noise descriptions and for blank descriptions
    pub fn is_noise(&self, description: &str) -> bool {
        let description = description.trim();
        description.is_empty() || matches_any(self.noise, description)
    }
}

fn matches_any(entries: &[&str], description: &str) -> bool {
    entries
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(description))
}
