//! Filter engine: the live (search text, zip selector) predicate applied to
//! a record collection. Pure and single-pass; cheap enough to rerun on
//! every keystroke for a few thousand records.

use std::fmt;

use bizpulse_common::BusinessRecord;
use serde::{Deserialize, Serialize};

/// Wire value meaning "every area".
pub const ALL_ZIPS: &str = "All";

/// Postal-code selector: every area, or records whose zip starts with a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZipSelector {
    #[default]
    All,
    Prefix(String),
}

impl ZipSelector {
    /// `"All"` (any case) or blank selects everything; anything else is a prefix.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_ZIPS) {
            ZipSelector::All
        } else {
            ZipSelector::Prefix(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ZipSelector::All => ALL_ZIPS,
            ZipSelector::Prefix(p) => p,
        }
    }

    pub fn matches(&self, zip_code: &str) -> bool {
        match self {
            ZipSelector::All => true,
            ZipSelector::Prefix(p) => zip_code.starts_with(p.as_str()),
        }
    }
}

impl fmt::Display for ZipSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ZipSelector {
    fn from(value: String) -> Self {
        ZipSelector::parse(&value)
    }
}

impl From<ZipSelector> for String {
    fn from(value: ZipSelector) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub search: String,
    pub zip: ZipSelector,
}

impl FilterPredicate {
    pub fn new(search: impl Into<String>, zip: ZipSelector) -> Self {
        Self {
            search: search.into(),
            zip,
        }
    }

    /// Empty search, every area.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Prepare the predicate for repeated evaluation (lower-cases the needle once).
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.search.to_lowercase(),
            zip: &self.zip,
        }
    }
}

/// Lower-cased searchable text of one record: name, DBA, and industry
/// description. Built once per record when the collection is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKeys {
    name: String,
    dba: String,
    industry: String,
}

impl SearchKeys {
    pub fn of(record: &BusinessRecord) -> Self {
        Self {
            name: record.business_name.to_lowercase(),
            dba: record.dba_name.to_lowercase(),
            industry: record.primary_naics_description.to_lowercase(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.name.contains(needle) || self.dba.contains(needle) || self.industry.contains(needle)
    }
}

pub struct Matcher<'p> {
    needle: String,
    zip: &'p ZipSelector,
}

impl Matcher<'_> {
    /// Text matches name, DBA, or industry description (case-insensitive
    /// substring) AND the zip selector holds. Empty text matches everything.
    pub fn matches(&self, record: &BusinessRecord) -> bool {
        if !self.zip.matches(&record.zip_code) {
            return false;
        }
        self.needle.is_empty() || SearchKeys::of(record).contains(&self.needle)
    }

    /// Same as [`Matcher::matches`], against keys lower-cased ahead of time.
    pub fn matches_keyed(&self, record: &BusinessRecord, keys: &SearchKeys) -> bool {
        self.zip.matches(&record.zip_code) && (self.needle.is_empty() || keys.contains(&self.needle))
    }
}

/// Records satisfying `predicate`, in input order.
pub fn filter<'a, I>(records: I, predicate: &FilterPredicate) -> Vec<&'a BusinessRecord>
where
    I: IntoIterator<Item = &'a BusinessRecord>,
{
    let matcher = predicate.matcher();
    records.into_iter().filter(|r| matcher.matches(r)).collect()
}
