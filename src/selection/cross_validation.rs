//! K-fold cross-validated selection.
//!
//! Candidates are ranked by their average held-out log-likelihood over
//! three contiguous folds of the word's own sequence list. The model
//! returned for the winning state count is the one fit on the final fold's
//! training partition, not a refit on the full data; a deliberate
//! simplification kept for comparability with historical results.

use crate::error::{PartitionError, SelectionError};
use crate::model::SequenceModel;
use crate::types::ScoredModel;

use super::ModelSelector;

const NUM_FOLDS: usize = 3;

/// Contiguous k-fold split over `0..num_items`, scikit-learn style: the
/// first `num_items % num_folds` held-out partitions get one extra item.
/// Held-out partitions are disjoint and cover every index.
pub(crate) fn kfold(
    num_items: usize,
    num_folds: usize,
) -> Result<Vec<(Vec<usize>, Vec<usize>)>, PartitionError> {
    if num_folds < 2 || num_items < num_folds {
        return Err(PartitionError {
            num_items,
            num_folds,
        });
    }
    let base = num_items / num_folds;
    let extra = num_items % num_folds;
    let mut folds = Vec::with_capacity(num_folds);
    let mut start = 0usize;
    for fold in 0..num_folds {
        let size = base + usize::from(fold < extra);
        let held_out: Vec<usize> = (start..start + size).collect();
        let train: Vec<usize> = (0..start).chain(start + size..num_items).collect();
        folds.push((train, held_out));
        start += size;
    }
    Ok(folds)
}

pub(super) fn select(
    selector: &ModelSelector<'_>,
) -> Result<Box<dyn SequenceModel>, SelectionError> {
    let folds = match kfold(selector.data.num_sequences(), NUM_FOLDS) {
        Ok(folds) => folds,
        Err(err) => {
            // Too few sequences to cross-validate this word at all.
            tracing::warn!(word = selector.word, %err, "falling back to constant");
            return selector.constant();
        }
    };

    let mut best: Option<ScoredModel> = None;
    'candidates: for num_states in selector.range.states() {
        let mut total = 0.0;
        let mut fold_model: Option<Box<dyn SequenceModel>> = None;
        for (train_indices, held_out_indices) in &folds {
            let train = selector.data.combine(train_indices);
            let held_out = selector.data.combine(held_out_indices);
            let Some(model) = selector.fit_model(&train, num_states) else {
                continue 'candidates;
            };
            match model.score(&held_out) {
                Ok(score) => {
                    total += score;
                    fold_model = Some(model);
                }
                Err(err) => {
                    tracing::debug!(
                        word = selector.word,
                        num_states,
                        %err,
                        "held-out scoring failed"
                    );
                    continue 'candidates;
                }
            }
        }
        let Some(model) = fold_model else {
            continue;
        };
        let score = total / NUM_FOLDS as f64;
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredModel { model, score });
        }
    }

    // Partitioning worked but nothing could be scored: a configuration
    // problem (bad range for this corpus), not a per-word degradation.
    match best {
        Some(scored) => Ok(scored.model),
        None => Err(SelectionError::NoScoredCandidate {
            word: selector.word.to_string(),
            min_states: selector.range.min_states,
            max_states: selector.range.max_states,
        }),
    }
}
