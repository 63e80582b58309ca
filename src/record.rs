//! Document records and their category tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural role of a record within the documentation.
///
/// The generator only emits the named variants. Tags read from an index
/// written by another generator version are kept as [`Category::Other`] so
/// they survive a parse/serialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Page,
    Section,
    Module,
    Constant,
    Type,
    AbstractType,
    Function,
    Macro,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Module => "module",
            Self::Constant => "constant",
            Self::Type => "type",
            Self::AbstractType => "abstract type",
            Self::Function => "function",
            Self::Macro => "macro",
            Self::Other(tag) => tag,
        }
    }

    /// Whether records of this category describe a documented binding
    /// rather than page structure.
    pub fn is_docstring(&self) -> bool {
        !matches!(self, Self::Page | Self::Section)
    }

    /// Parses a category as written in an `@autodocs` `Order` list,
    /// e.g. `:type` or `:abstracttype`.
    pub fn from_order_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().trim_start_matches(':') {
            "module" => Some(Self::Module),
            "constant" => Some(Self::Constant),
            "type" => Some(Self::Type),
            "abstracttype" | "abstract_type" => Some(Self::AbstractType),
            "function" => Some(Self::Function),
            "macro" => Some(Self::Macro),
            _ => None,
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            "module" => Self::Module,
            "constant" => Self::Constant,
            "type" => Self::Type,
            "abstract type" => Self::AbstractType,
            "function" => Self::Function,
            "macro" => Self::Macro,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the search index.
///
/// Serialized as a mapping with exactly the keys `location`, `page`, `title`,
/// `text` and `category`, all strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentRecord {
    /// URL fragment of the page or anchor, relative to the site root.
    pub location: String,
    /// Human-readable page title.
    pub page: String,
    /// Section or symbol title. Repeats `page` for plain page text.
    pub title: String,
    /// Flattened documentation text. Empty for section headings.
    pub text: String,
    pub category: Category,
}

impl DocumentRecord {
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category,
        }
    }

    /// Plain page text: title repeats the page title.
    pub fn page_text(location: &str, page: &str, text: impl Into<String>) -> Self {
        Self::new(location, page, page, text, Category::Page)
    }

    /// A heading record. Headings never carry text.
    pub fn section(location: impl Into<String>, page: &str, title: impl Into<String>) -> Self {
        Self::new(location, page, title, String::new(), Category::Section)
    }

    /// Key expected to be unique across an index.
    pub fn key(&self) -> (&str, &str) {
        (&self.location, &self.title)
    }
}
