//! The search index: an ordered sequence of document records.

use crate::record::{Category, DocumentRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Top-level value consumed by the site's search widget.
///
/// Order is documentation page order. The whole index is produced once per
/// build and replaced wholesale on the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    docs: Vec<DocumentRecord>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DocumentRecord) {
        self.docs.push(record);
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRecord> {
        self.docs.iter()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.docs
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = &'a DocumentRecord> + 'a {
        self.docs.iter().filter(move |r| &r.category == category)
    }

    /// Distinct page titles in first-seen order.
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.docs
            .iter()
            .map(|r| r.page.as_str())
            .filter(|page| seen.insert(*page))
            .collect()
    }

    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.docs {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Checks the soft invariants of the index.
    ///
    /// Nothing here is fatal: duplicated keys and empty titles occur in real
    /// generator output, so they are surfaced as warnings only.
    pub fn validate(&self) -> Validation {
        let mut warnings = Vec::new();

        if self.docs.is_empty() {
            warnings.push(Warning::Empty);
        }

        let mut first_seen: HashMap<(&str, &str), usize> = HashMap::new();
        for (position, record) in self.docs.iter().enumerate() {
            if record.title.is_empty() {
                warnings.push(Warning::EmptyTitle { position });
            }
            if record.location.chars().any(char::is_whitespace) {
                warnings.push(Warning::WhitespaceInLocation {
                    position,
                    location: record.location.clone(),
                });
            }
            match first_seen.get(&record.key()) {
                Some(&first) => warnings.push(Warning::DuplicateKey {
                    position,
                    first,
                    location: record.location.clone(),
                    title: record.title.clone(),
                }),
                None => {
                    first_seen.insert(record.key(), position);
                }
            }
        }

        Validation { warnings }
    }
}

impl From<Vec<DocumentRecord>> for SearchIndex {
    fn from(docs: Vec<DocumentRecord>) -> Self {
        Self { docs }
    }
}

impl FromIterator<DocumentRecord> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl Extend<DocumentRecord> for SearchIndex {
    fn extend<I: IntoIterator<Item = DocumentRecord>>(&mut self, iter: I) {
        self.docs.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a DocumentRecord;
    type IntoIter = std::slice::Iter<'a, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

/// Findings from [`SearchIndex::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub warnings: Vec<Warning>,
}

impl Validation {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    Empty,
    EmptyTitle {
        position: usize,
    },
    WhitespaceInLocation {
        position: usize,
        location: String,
    },
    DuplicateKey {
        position: usize,
        first: usize,
        location: String,
        title: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "index contains no records"),
            Self::EmptyTitle { position } => write!(f, "record {} has an empty title", position),
            Self::WhitespaceInLocation { position, location } => {
                write!(f, "record {} location {:?} contains whitespace", position, location)
            }
            Self::DuplicateKey {
                position,
                first,
                location,
                title,
            } => write!(
                f,
                "record {} repeats location {:?} / title {:?} first seen at record {}",
                position, location, title, first
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SearchIndex {
        SearchIndex::from(vec![
            DocumentRecord::page_text("", "Home", "CurrentModule = WienerDiffusionModel"),
            DocumentRecord::section("#WienerDiffusionModel", "Home", "WienerDiffusionModel"),
            DocumentRecord::page_text("", "Home", "Documentation for WienerDiffusionModel."),
            DocumentRecord::page_text("api/", "API", "Reference."),
        ])
    }

    #[test]
    fn pages_are_distinct_and_ordered() {
        assert_eq!(sample().pages(), vec!["Home", "API"]);
    }

    #[test]
    fn counts_by_category() {
        let counts = sample().category_counts();
        assert_eq!(counts.get(&Category::Page), Some(&3));
        assert_eq!(counts.get(&Category::Section), Some(&1));
        assert_eq!(counts.get(&Category::Type), None);
    }

    #[test]
    fn filter_by_category() {
        let index = sample();
        let sections: Vec<_> = index.by_category(&Category::Section).collect();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "WienerDiffusionModel");
    }

    #[test]
    fn duplicate_keys_are_warnings() {
        let validation = sample().validate();
        assert_eq!(validation.warnings.len(), 1);
        assert!(matches!(
            validation.warnings[0],
            Warning::DuplicateKey {
                position: 2,
                first: 0,
                ..
            }
        ));
    }

    #[test]
    fn empty_text_section_is_clean() {
        let index = SearchIndex::from(vec![DocumentRecord::section("#Intro", "Home", "Intro")]);
        assert!(index.validate().is_clean());
    }

    #[test]
    fn empty_index_warns() {
        assert_eq!(SearchIndex::new().validate().warnings, vec![Warning::Empty]);
    }

    #[test]
    fn whitespace_location_warns() {
        let index = SearchIndex::from(vec![DocumentRecord::page_text("a b/", "Home", "x")]);
        assert!(matches!(
            index.validate().warnings[0],
            Warning::WhitespaceInLocation { position: 0, .. }
        ));
    }
}
