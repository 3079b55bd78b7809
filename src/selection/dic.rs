//! Discriminative Information Criterion selection.
//!
//! `DIC = logL(own word) - mean(logL(every other word))`: a good word model
//! explains its own training data well and the rest of the vocabulary
//! poorly. Every candidate rescans the whole corpus, so this is the most
//! expensive criterion, O(range × vocabulary) scoring calls.

use crate::error::SelectionError;
use crate::model::SequenceModel;
use crate::types::ScoredModel;

use super::ModelSelector;

/// Mean log-likelihood of `model` over every word except the selector's
/// own. Words that fail to score are dropped from the denominator; if all
/// of them fail the average is defined as 0.
fn average_other_words(selector: &ModelSelector<'_>, model: &dyn SequenceModel) -> f64 {
    let mut total = 0.0;
    let mut scored = 0usize;
    for (word, data) in selector.corpus.words() {
        if word == selector.word {
            continue;
        }
        match model.score(data.combined()) {
            Ok(score) => {
                total += score;
                scored += 1;
            }
            Err(err) => {
                tracing::debug!(
                    word = selector.word,
                    other_word = word,
                    %err,
                    "DIC cross-word scoring failed"
                );
            }
        }
    }
    if scored > 0 {
        total / scored as f64
    } else {
        0.0
    }
}

pub(super) fn select(
    selector: &ModelSelector<'_>,
) -> Result<Box<dyn SequenceModel>, SelectionError> {
    let own = selector.data.combined();

    let mut best: Option<ScoredModel> = None;
    for num_states in selector.range.states() {
        let Some(model) = selector.fit_model(own, num_states) else {
            continue;
        };
        let own_score = match model.score(own) {
            Ok(score) => score,
            Err(err) => {
                tracing::debug!(word = selector.word, num_states, %err, "DIC own-word scoring failed");
                continue;
            }
        };
        let score = own_score - average_other_words(selector, model.as_ref());
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredModel { model, score });
        }
    }

    match best {
        Some(scored) => Ok(scored.model),
        None => {
            tracing::warn!(
                word = selector.word,
                "no candidate produced a DIC score, falling back to constant"
            );
            selector.constant()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{CandidateRange, FitConfig, TrainingConfig};
    use crate::error::ModelError;
    use crate::model::SequenceModel;
    use crate::selection::testing::{marker, marker_corpus, FnFitter, FnModel};
    use crate::selection::{ModelSelector, SelectionStrategy};

    const UP: f64 = 1.0;
    const DOWN: f64 = 5.0;
    const LEFT: f64 = 9.0;

    fn config() -> TrainingConfig {
        TrainingConfig {
            range: CandidateRange::new(2, 4),
            fallback_states: 3,
            fit: FitConfig::default(),
        }
    }

    #[test]
    fn picks_most_discriminative_candidate() {
        // n = 3 explains UP well and everything else badly; n = 2 and 4
        // score every word identically, so their DIC is 0.
        let fitter = FnFitter(Box::new(|_obs, num_states| {
            Ok(Box::new(FnModel {
                num_states,
                score_fn: Box::new(move |obs| {
                    if num_states != 3 {
                        return Ok(-100.0);
                    }
                    Ok(if marker(obs) == UP { -10.0 } else { -400.0 })
                }),
            }))
        }));
        let corpus = marker_corpus(&[("UP", UP), ("DOWN", DOWN), ("LEFT", LEFT)], 6);
        let model = ModelSelector::new(&corpus, "UP", SelectionStrategy::Dic, &fitter, &config())
            .expect("selector")
            .select()
            .expect("select");
        assert_eq!(model.num_states(), 3);
    }

    #[test]
    fn failing_other_words_leave_the_denominator() {
        // DOWN fails to score only under n = 2. Excluded from the average,
        // n = 2 scores DIC = -10 - (-400) = 390 against 195 for the others
        // and wins; a denominator that still counted the failed word would
        // have halved that to 190 and flipped the ranking.
        let fitter = FnFitter(Box::new(|_obs, num_states| {
            Ok(Box::new(FnModel {
                num_states,
                score_fn: Box::new(move |obs| {
                    if marker(obs) == DOWN {
                        if num_states == 2 {
                            return Err(ModelError::score("degenerate covariance"));
                        }
                        return Ok(-10.0);
                    }
                    Ok(if marker(obs) == UP { -10.0 } else { -400.0 })
                }),
            }))
        }));
        let corpus = marker_corpus(&[("UP", UP), ("DOWN", DOWN), ("LEFT", LEFT)], 6);
        let model = ModelSelector::new(&corpus, "UP", SelectionStrategy::Dic, &fitter, &config())
            .expect("selector")
            .select()
            .expect("select");
        assert_eq!(model.num_states(), 2);
    }

    #[test]
    fn all_other_words_failing_means_average_zero() {
        // Only the own-word score survives, so DIC reduces to it and the
        // candidate with the best own likelihood wins.
        let fitter = FnFitter(Box::new(|_obs, num_states| {
            Ok(Box::new(FnModel {
                num_states,
                score_fn: Box::new(move |obs| {
                    if marker(obs) != UP {
                        return Err(ModelError::score("degenerate covariance"));
                    }
                    Ok(match num_states {
                        4 => -5.0,
                        _ => -50.0,
                    })
                }),
            }))
        }));
        let corpus = marker_corpus(&[("UP", UP), ("DOWN", DOWN)], 6);
        let model = ModelSelector::new(&corpus, "UP", SelectionStrategy::Dic, &fitter, &config())
            .expect("selector")
            .select()
            .expect("select");
        assert_eq!(model.num_states(), 4);
    }

    #[test]
    fn own_word_failures_skip_the_candidate() {
        let fitter = FnFitter(Box::new(|_obs, num_states| {
            if num_states == 2 {
                return Err(ModelError::fit(num_states, "did not converge"));
            }
            Ok(Box::new(FnModel {
                num_states,
                score_fn: Box::new(move |obs| {
                    if num_states == 4 && marker(obs) == UP {
                        return Err(ModelError::score("degenerate covariance"));
                    }
                    Ok(-50.0)
                }),
            }))
        }));
        let corpus = marker_corpus(&[("UP", UP), ("DOWN", DOWN)], 6);
        let model = ModelSelector::new(&corpus, "UP", SelectionStrategy::Dic, &fitter, &config())
            .expect("selector")
            .select()
            .expect("select");
        // 2 fails to fit, 4 fails its own-word score; only 3 is usable.
        assert_eq!(model.num_states(), 3);
    }
}
