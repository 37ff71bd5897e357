//! Grouped counts over a record subset, for the stats surface.

use std::collections::{HashMap, HashSet};

use bizpulse_common::BusinessRecord;
use serde::Serialize;

/// Bucket label for records with no industry description.
pub const OTHER_LABEL: &str = "Other";

/// Bucket label for records with no postal code.
pub const UNKNOWN_ZIP_LABEL: &str = "Unknown";

/// Industry labels longer than this many characters are cut and suffixed
/// with [`ELLIPSIS`]. Distinct industries can end up with the same label.
pub const LABEL_MAX_CHARS: usize = 25;
pub const ELLIPSIS: &str = "...";

pub const TOP_INDUSTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateBucket {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Industry,
    PostalCode,
}

impl GroupField {
    fn key<'r>(&self, record: &'r BusinessRecord) -> &'r str {
        let (value, sentinel) = match self {
            GroupField::Industry => (record.primary_naics_description.as_str(), OTHER_LABEL),
            GroupField::PostalCode => (record.zip_code.as_str(), UNKNOWN_ZIP_LABEL),
        };
        if value.is_empty() {
            sentinel
        } else {
            value
        }
    }

    fn display(&self, key: &str) -> String {
        match self {
            GroupField::Industry => truncate_label(key, LABEL_MAX_CHARS),
            GroupField::PostalCode => key.to_string(),
        }
    }
}

/// Count records per group label.
///
/// Groups keep the order their label was first seen. With `top_n`, groups
/// are stably sorted by count descending (ties stay in first-seen order)
/// and cut to `n`. Counting uses the full label; truncation for display
/// happens afterwards, so counts are never merged.
pub fn aggregate_by_field<'a, I>(
    records: I,
    field: GroupField,
    top_n: Option<usize>,
) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'a BusinessRecord>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, usize)> = Vec::new();

    for record in records {
        let key = field.key(record);
        match slots.get(key) {
            Some(&slot) => groups[slot].1 += 1,
            None => {
                slots.insert(key, groups.len());
                groups.push((key, 1));
            }
        }
    }

    if let Some(n) = top_n {
        groups.sort_by(|a, b| b.1.cmp(&a.1));
        groups.truncate(n);
    }

    groups
        .into_iter()
        .map(|(key, count)| AggregateBucket {
            label: field.display(key),
            count,
        })
        .collect()
}

/// Cut `label` to `max` characters plus an ellipsis when it is longer.
pub fn truncate_label(label: &str, max: usize) -> String {
    match label.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &label[..cut]),
        None => label.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: usize,
    /// Distinct classification codes, compared exactly. An empty code counts as one value.
    pub distinct_classifications: usize,
}

pub fn totals<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a BusinessRecord>,
{
    let mut total = 0;
    let mut codes: HashSet<&'a str> = HashSet::new();
    for record in records {
        total += 1;
        codes.insert(record.naics.as_str());
    }
    Totals {
        total,
        distinct_classifications: codes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(industry: &str, zip: &str, naics: &str) -> BusinessRecord {
        BusinessRecord {
            primary_naics_description: industry.to_string(),
            zip_code: zip.to_string(),
            naics: naics.to_string(),
            ..Default::default()
        }
    }

    fn bucket(label: &str, count: usize) -> AggregateBucket {
        AggregateBucket {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn empty_industry_counts_as_other() {
        let records = vec![
            record("Retail", "90046-1", "4451"),
            record("Retail", "90046-2", "4451"),
            record("", "90069-5", "5411"),
        ];
        let buckets = aggregate_by_field(&records, GroupField::Industry, Some(TOP_INDUSTRIES));
        assert_eq!(buckets, vec![bucket("Retail", 2), bucket("Other", 1)]);
    }

    #[test]
    fn top_n_sorts_descending_with_first_seen_ties() {
        let records = vec![
            record("B", "", ""),
            record("A", "", ""),
            record("C", "", ""),
            record("C", "", ""),
            record("A", "", ""),
            record("D", "", ""),
        ];
        let buckets = aggregate_by_field(&records, GroupField::Industry, Some(3));
        assert_eq!(
            buckets,
            vec![bucket("A", 2), bucket("C", 2), bucket("B", 1)]
        );
    }

    #[test]
    fn no_cutoff_keeps_first_seen_order() {
        let records = vec![
            record("", "90069", ""),
            record("", "90046-1111", ""),
            record("", "90069", ""),
            record("", "", ""),
        ];
        let buckets = aggregate_by_field(&records, GroupField::PostalCode, None);
        assert_eq!(
            buckets,
            vec![bucket("90069", 2), bucket("90046-1111", 1), bucket("Unknown", 1)]
        );
    }

    #[test]
    fn long_industry_labels_are_truncated() {
        let long = "Full-Service Restaurants and Cafeterias";
        let records = vec![record(long, "", "")];
        let buckets = aggregate_by_field(&records, GroupField::Industry, None);
        assert_eq!(buckets[0].label, "Full-Service Restaurants ...");
        assert_eq!(buckets[0].label.chars().count(), LABEL_MAX_CHARS + ELLIPSIS.len());
    }

    #[test]
    fn labels_colliding_after_truncation_keep_separate_counts() {
        let records = vec![
            record("Offices of Physicians and Surgeons", "", ""),
            record("Offices of Physicians and Dentists", "", ""),
            record("Offices of Physicians and Dentists", "", ""),
        ];
        let buckets = aggregate_by_field(&records, GroupField::Industry, Some(5));
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, buckets[1].label);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn truncation_is_char_based() {
        assert_eq!(truncate_label("ééééé", 3), "ééé...");
        assert_eq!(truncate_label("abc", 3), "abc");
        assert_eq!(truncate_label("", 3), "");
    }

    #[test]
    fn totals_count_distinct_codes() {
        let records = vec![
            record("Retail", "90046-1", "4451"),
            record("Retail", "90046-2", "4451"),
            record("", "90069-5", "5411"),
        ];
        assert_eq!(
            totals(&records),
            Totals {
                total: 3,
                distinct_classifications: 2
            }
        );
    }

    #[test]
    fn empty_input_has_no_buckets() {
        let records: Vec<BusinessRecord> = vec![];
        assert!(aggregate_by_field(&records, GroupField::Industry, Some(5)).is_empty());
        assert_eq!(totals(&records), Totals::default());
    }
}
