//! State-count selection and word recognition for HMM-based sign language
//! recognition.
//!
//! The crate covers two phases. During training, a [`ModelSelector`] per
//! vocabulary word picks the hidden-state count whose fitted model best
//! explains that word's sequences, under one of four interchangeable
//! criteria ([`SelectionStrategy`]). During recognition, [`recognize`]
//! scores unlabeled test sequences against the trained word→model mapping
//! and emits the full score vector and arg-max guess per item.
//!
//! The Gaussian-emission HMM fitting primitive itself is not part of this
//! crate; it is consumed through the [`ModelFitter`] and [`SequenceModel`]
//! traits.

pub mod config;
pub mod corpus;
pub mod error;
pub mod model;
pub mod recognizer;
pub mod selection;
pub mod types;

pub use config::{CandidateRange, CovarianceKind, FitConfig, TrainingConfig};
pub use corpus::{TrainingCorpus, WordData};
pub use error::{ConfigError, ModelError, PartitionError, SelectionError};
pub use model::{ModelFitter, SequenceModel};
pub use recognizer::recognize;
pub use selection::{ModelSelector, SelectionStrategy};
pub use types::{ModelSet, ObservationSet, Recognition, RecognitionOutput, ScoredModel};
