//! Character n-gram feature extraction
//!
//! Names are lowercased and prefixed with a single space so that the
//! vocabulary can carry name-initial n-grams such as `" pe"`. Every
//! substring of 1 to 3 characters is then looked up in the model's
//! vocabulary. Slicing happens on `char` boundaries so that Cyrillic or
//! CJK names produce whole-codepoint n-grams.

use crate::model::Model;
use std::collections::BTreeMap;

/// Shortest n-gram considered, in characters
pub const MIN_NGRAM_CHARS: usize = 1;

/// Longest n-gram considered, in characters
pub const MAX_NGRAM_CHARS: usize = 3;

/// Prefix marking the start of a name
pub const NAME_PREFIX: char = ' ';

/// Counts of recognized n-grams within a single name.
///
/// Only vocabulary members are ever present; each entry remembers its
/// column in the coefficient matrix. Entries are kept in n-gram order so
/// that scoring sums them in the same order on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCounts<'m> {
    counts: BTreeMap<&'m str, FeatureCount>,
}

/// Occurrences of one recognized n-gram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCount {
    /// Column in the model's coefficient matrix
    pub index: usize,
    /// Occurrences within the normalized name
    pub count: u32,
}

impl<'m> FeatureCounts<'m> {
    /// Number of occurrences of `ngram`, if it was recognized
    pub fn get(&self, ngram: &str) -> Option<u32> {
        self.counts.get(ngram).map(|c| c.count)
    }

    /// Number of distinct recognized n-grams
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all occurrence counts
    pub fn total(&self) -> u32 {
        self.counts.values().map(|c| c.count).sum()
    }

    /// Iterate over `(ngram, count)` pairs in n-gram order
    pub fn iter(&self) -> impl Iterator<Item = (&'m str, FeatureCount)> + '_ {
        self.counts.iter().map(|(ngram, count)| (*ngram, *count))
    }

    fn record(&mut self, ngram: &'m str, index: usize) {
        self.counts
            .entry(ngram)
            .and_modify(|c| c.count += 1)
            .or_insert(FeatureCount { index, count: 1 });
    }
}

/// Normalize a raw name into the form the vocabulary was built from
pub fn normalize(name: &str) -> String {
    let mut text = String::with_capacity(name.len() + NAME_PREFIX.len_utf8());
    text.push(NAME_PREFIX);
    text.push_str(&name.to_lowercase());
    text
}

/// Extract the recognized n-gram counts of `name` against `model`'s vocabulary
pub fn extract_features<'m>(model: &'m Model, name: &str) -> FeatureCounts<'m> {
    let text = normalize(name);

    // Byte offset of every char boundary, including the end of the string
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let chars = bounds.len() - 1;

    let mut counts = FeatureCounts::default();
    for start in 0..chars {
        for len in MIN_NGRAM_CHARS..=MAX_NGRAM_CHARS {
            let end = start + len;
            if end > chars {
                break;
            }

            let ngram = &text[bounds[start]..bounds[end]];
            if let Some(index) = model.feature_index(ngram) {
                counts.record(&model.features()[index], index);
            }
        }
    }

    counts
}
