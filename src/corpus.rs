use std::collections::BTreeMap;

use crate::types::ObservationSet;

/// Training data for one vocabulary word: the raw per-sequence frame
/// matrices and the concatenated form the fitting primitive consumes.
///
/// The concatenated form is derived once at insertion and never mutated on
/// its own, so the two representations always describe the same frames.
#[derive(Debug, Clone)]
pub struct WordData {
    sequences: Vec<Vec<Vec<f64>>>,
    combined: ObservationSet,
}

impl WordData {
    fn new(sequences: Vec<Vec<Vec<f64>>>) -> Self {
        let combined = ObservationSet::from_sequences(&sequences);
        Self {
            sequences,
            combined,
        }
    }

    pub fn sequences(&self) -> &[Vec<Vec<f64>>] {
        &self.sequences
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn combined(&self) -> &ObservationSet {
        &self.combined
    }

    /// Concatenate the subset of sequences selected by `indices`, in the
    /// order given. Out-of-range indices are ignored.
    pub fn combine(&self, indices: &[usize]) -> ObservationSet {
        let subset: Vec<Vec<Vec<f64>>> = indices
            .iter()
            .filter_map(|&i| self.sequences.get(i).cloned())
            .collect();
        ObservationSet::from_sequences(&subset)
    }
}

/// Per-word training corpus, assumed validated and feature-extracted
/// upstream. Word iteration order is deterministic (sorted), which the
/// recognizer relies on for tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct TrainingCorpus {
    words: BTreeMap<String, WordData>,
}

impl TrainingCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a word's training sequences, replacing any previous entry.
    pub fn insert(&mut self, word: impl Into<String>, sequences: Vec<Vec<Vec<f64>>>) {
        self.words.insert(word.into(), WordData::new(sequences));
    }

    pub fn get(&self, word: &str) -> Option<&WordData> {
        self.words.get(word)
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, &WordData)> {
        self.words.iter().map(|(word, data)| (word.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
