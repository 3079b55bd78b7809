mod bic;
mod cross_validation;
mod dic;

use crate::config::{CandidateRange, FitConfig, TrainingConfig};
use crate::corpus::{TrainingCorpus, WordData};
use crate::error::SelectionError;
use crate::model::{ModelFitter, SequenceModel};
use crate::types::ObservationSet;

/// Criterion used to rank candidate state counts.
///
/// The strategies differ only in how they score a fitted candidate; all of
/// them fall back toward the constant state count when nothing in the range
/// can be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Always the configured fallback state count.
    Constant,
    /// Bayesian Information Criterion: likelihood minus a complexity penalty.
    Bic,
    /// Discriminative Information Criterion: own-word likelihood minus the
    /// average likelihood over the rest of the vocabulary.
    Dic,
    /// Average held-out likelihood over 3 folds of this word's sequences.
    CrossValidated,
}

/// Per-word state-count selection.
///
/// Holds read-only references to the shared corpus and the fitting
/// primitive; instances are independent per word, so callers may run one
/// selector per word in parallel.
pub struct ModelSelector<'a> {
    corpus: &'a TrainingCorpus,
    word: &'a str,
    data: &'a WordData,
    strategy: SelectionStrategy,
    range: CandidateRange,
    fallback_states: usize,
    fit: FitConfig,
    fitter: &'a dyn ModelFitter,
}

impl<'a> ModelSelector<'a> {
    pub fn new(
        corpus: &'a TrainingCorpus,
        word: &'a str,
        strategy: SelectionStrategy,
        fitter: &'a dyn ModelFitter,
        config: &TrainingConfig,
    ) -> Result<Self, SelectionError> {
        let data = corpus
            .get(word)
            .ok_or_else(|| SelectionError::unknown_word(word))?;
        Ok(Self {
            corpus,
            word,
            data,
            strategy,
            range: config.range,
            fallback_states: config.fallback_states,
            fit: config.fit.clone(),
            fitter,
        })
    }

    /// Pick the best model for this word under the configured strategy.
    ///
    /// Candidate fit and score failures are tolerated and skipped; the only
    /// errors surfaced are a failing fallback fit and the cross-validation
    /// no-candidate configuration error.
    pub fn select(&self) -> Result<Box<dyn SequenceModel>, SelectionError> {
        match self.strategy {
            SelectionStrategy::Constant => self.constant(),
            SelectionStrategy::Bic => bic::select(self),
            SelectionStrategy::Dic => dic::select(self),
            SelectionStrategy::CrossValidated => cross_validation::select(self),
        }
    }

    pub fn word(&self) -> &str {
        self.word
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Fit one candidate. Failures are frequent and expected (EM does not
    /// converge for every state count), so they are logged and swallowed
    /// here; the strategies decide whether to skip or fall back.
    pub(crate) fn fit_model(
        &self,
        observations: &ObservationSet,
        num_states: usize,
    ) -> Option<Box<dyn SequenceModel>> {
        match self.fitter.fit(observations, num_states, &self.fit) {
            Ok(model) => Some(model),
            Err(err) => {
                tracing::debug!(word = self.word, num_states, %err, "candidate fit failed");
                None
            }
        }
    }

    /// The guaranteed floor: a single fit at the fallback state count on
    /// this word's full training data.
    pub(crate) fn constant(&self) -> Result<Box<dyn SequenceModel>, SelectionError> {
        self.fitter
            .fit(self.data.combined(), self.fallback_states, &self.fit)
            .map_err(|err| SelectionError::fallback_fit(self.word, self.fallback_states, err))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{marker_corpus, FnFitter, FnModel};
    use super::*;

    fn always_fit() -> FnFitter {
        FnFitter(Box::new(|_obs, num_states| {
            Ok(Box::new(FnModel {
                num_states,
                score_fn: Box::new(move |_| Ok(-10.0 * num_states as f64)),
            }))
        }))
    }

    fn config(min: usize, max: usize, fallback: usize) -> TrainingConfig {
        TrainingConfig {
            range: CandidateRange::new(min, max),
            fallback_states: fallback,
            fit: FitConfig::default(),
        }
    }

    #[test]
    fn unknown_word_is_rejected_at_construction() {
        let corpus = marker_corpus(&[("UP", 1.0)], 6);
        let fitter = always_fit();
        let err = ModelSelector::new(
            &corpus,
            "SIDEWAYS",
            SelectionStrategy::Constant,
            &fitter,
            &config(2, 4, 3),
        )
        .err()
        .expect("missing word must be rejected");
        assert!(matches!(err, SelectionError::UnknownWord { .. }));
    }

    #[test]
    fn constant_strategy_uses_fallback_states() {
        let corpus = marker_corpus(&[("UP", 1.0)], 6);
        let fitter = always_fit();
        let selector = ModelSelector::new(
            &corpus,
            "UP",
            SelectionStrategy::Constant,
            &fitter,
            &config(2, 4, 7),
        )
        .expect("selector");
        let model = selector.select().expect("constant select");
        assert_eq!(model.num_states(), 7);
    }

    #[test]
    fn constant_strategy_is_deterministic() {
        let corpus = marker_corpus(&[("UP", 1.0)], 6);
        let fitter = always_fit();
        let selector = ModelSelector::new(
            &corpus,
            "UP",
            SelectionStrategy::Constant,
            &fitter,
            &config(2, 4, 3),
        )
        .expect("selector");
        let first = selector.select().expect("first select");
        let second = selector.select().expect("second select");
        assert_eq!(first.num_states(), second.num_states());
        let obs = corpus.get("UP").expect("UP").combined().clone();
        assert_eq!(
            first.score(&obs).expect("score"),
            second.score(&obs).expect("score")
        );
    }

    #[test]
    fn every_strategy_stays_in_range_or_fallback() {
        let corpus = marker_corpus(&[("UP", 1.0), ("DOWN", 5.0)], 6);
        let fitter = always_fit();
        let cfg = config(2, 4, 3);
        for strategy in [
            SelectionStrategy::Constant,
            SelectionStrategy::Bic,
            SelectionStrategy::Dic,
            SelectionStrategy::CrossValidated,
        ] {
            let selector =
                ModelSelector::new(&corpus, "UP", strategy, &fitter, &cfg).expect("selector");
            let model = selector.select().expect("select");
            let states = model.num_states();
            assert!(
                cfg.range.contains(states) || states == cfg.fallback_states,
                "strategy {strategy:?} selected {states} states"
            );
        }
    }

    #[test]
    fn constant_fallback_fit_failure_is_surfaced() {
        let corpus = marker_corpus(&[("UP", 1.0)], 6);
        let fitter = FnFitter(Box::new(|_obs, num_states| {
            Err(crate::error::ModelError::fit(num_states, "did not converge"))
        }));
        let selector = ModelSelector::new(
            &corpus,
            "UP",
            SelectionStrategy::Constant,
            &fitter,
            &config(2, 4, 3),
        )
        .expect("selector");
        let err = selector.select().err().expect("fallback fit must fail");
        assert!(matches!(err, SelectionError::FallbackFit { num_states: 3, .. }));
    }
}
