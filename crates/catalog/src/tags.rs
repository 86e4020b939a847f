//! Post-processing for labels coming out of the tagging models.

use std::collections::HashSet;

/// Turn a raw classifier label into a short display tag.
///
/// Underscores become spaces, anything after the first comma is dropped
/// (classifier labels often list synonyms), and the result keeps at most two
/// words.
pub fn clean_label(label: &str) -> String {
    let label = label.replace('_', " ");
    let label = label.split(',').next().unwrap_or_default();
    label
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merge several label groups into one tag list.
///
/// Labels are cleaned with [`clean_label`] and de-duplicated
/// case-insensitively; the first spelling seen wins and order is kept.
pub fn merge_tags(groups: &[Vec<String>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for label in groups.iter().flatten() {
        let tag = clean_label(label);
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.to_lowercase()) {
            merged.push(tag);
        }
    }
    merged
}
