use std::collections::BTreeMap;

use crate::model::SequenceModel;

/// One or more observation sequences in the concatenated layout the fitting
/// primitive consumes: a single frame matrix (rows = frames, columns =
/// features) plus the per-sequence frame counts.
///
/// The lengths always partition the frame matrix exactly; both are built
/// together and never mutated independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    frames: Vec<Vec<f64>>,
    lengths: Vec<usize>,
}

impl ObservationSet {
    /// Concatenate per-sequence frame matrices.
    pub fn from_sequences(sequences: &[Vec<Vec<f64>>]) -> Self {
        let mut frames = Vec::with_capacity(sequences.iter().map(Vec::len).sum());
        let mut lengths = Vec::with_capacity(sequences.len());
        for sequence in sequences {
            lengths.push(sequence.len());
            frames.extend(sequence.iter().cloned());
        }
        Self { frames, lengths }
    }

    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn num_sequences(&self) -> usize {
        self.lengths.len()
    }

    pub fn feature_dim(&self) -> usize {
        self.frames.first().map_or(0, Vec::len)
    }
}

/// A fitted candidate paired with its criterion score.
///
/// Scores are oriented so that higher is always better, whichever criterion
/// produced them.
pub struct ScoredModel {
    pub model: Box<dyn SequenceModel>,
    pub score: f64,
}

/// Trained vocabulary handed to the recognizer. `BTreeMap` keeps iteration
/// order deterministic, which fixes the tie-break order of guesses.
pub type ModelSet = BTreeMap<String, Box<dyn SequenceModel>>;

/// Scores and best guess for a single test item.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    /// Log-likelihood per known word; `f64::NEG_INFINITY` where that word's
    /// model failed to score this item.
    pub scores: BTreeMap<String, f64>,
    /// Word with the highest score; first in map order on ties. Empty only
    /// for an empty model set.
    pub guess: String,
}

/// Per-item recognition results, index-aligned with the test set.
pub type RecognitionOutput = Vec<Recognition>;
