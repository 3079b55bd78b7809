//! Bayesian Information Criterion selection.
//!
//! `BIC = -2 * logL + p * ln(N)` where `N` is the number of training frames
//! and `p` the free-parameter count of an n-state diagonal-covariance
//! Gaussian HMM. Candidates are ranked on the negated criterion so that, as
//! everywhere else in this crate, the highest stored score wins.

use crate::error::SelectionError;
use crate::model::SequenceModel;
use crate::types::ScoredModel;

use super::ModelSelector;

/// Free parameters of an n-state diagonal-covariance Gaussian HMM over
/// d-dimensional features: n*n transition weights, n*d means, n*d
/// variances, and n-1 free initial-state probabilities.
///
/// Only internal comparability matters for selection; this is the
/// convention the reported state counts have historically used.
fn free_parameters(num_states: usize, feature_dim: usize) -> usize {
    num_states * num_states + 2 * num_states * feature_dim + num_states - 1
}

pub(super) fn select(
    selector: &ModelSelector<'_>,
) -> Result<Box<dyn SequenceModel>, SelectionError> {
    let own = selector.data.combined();
    let num_frames = own.num_frames();
    let feature_dim = own.feature_dim();

    let mut best: Option<ScoredModel> = None;
    for num_states in selector.range.states() {
        let Some(model) = selector.fit_model(own, num_states) else {
            continue;
        };
        let log_likelihood = match model.score(own) {
            Ok(score) => score,
            Err(err) => {
                tracing::debug!(word = selector.word, num_states, %err, "BIC scoring failed");
                continue;
            }
        };
        let penalty = free_parameters(num_states, feature_dim) as f64 * (num_frames as f64).ln();
        let score = -(-2.0 * log_likelihood + penalty);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredModel { model, score });
        }
    }

    match best {
        Some(scored) => Ok(scored.model),
        None => {
            tracing::warn!(
                word = selector.word,
                "no candidate produced a BIC score, falling back to constant"
            );
            selector.constant()
        }
    }
}
