use crate::types::{ModelSet, ObservationSet, Recognition, RecognitionOutput};

/// Score every test item against every trained word model.
///
/// Stateless map over the test collection, one [`Recognition`] per item in
/// input order. A model that fails to score an item contributes
/// `f64::NEG_INFINITY` for its word; the item itself is never abandoned.
/// Ties on the maximum go to the first word in map order, so results are
/// deterministic for a given model set.
pub fn recognize(models: &ModelSet, test_items: &[ObservationSet]) -> RecognitionOutput {
    test_items
        .iter()
        .enumerate()
        .map(|(index, item)| recognize_item(models, index, item))
        .collect()
}

fn recognize_item(models: &ModelSet, index: usize, item: &ObservationSet) -> Recognition {
    let mut scores = std::collections::BTreeMap::new();
    let mut best: Option<(&str, f64)> = None;
    for (word, model) in models {
        let score = match model.score(item) {
            Ok(score) => score,
            Err(err) => {
                tracing::debug!(word = word.as_str(), index, %err, "scoring failed");
                f64::NEG_INFINITY
            }
        };
        scores.insert(word.clone(), score);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((word.as_str(), score));
        }
    }
    Recognition {
        scores,
        guess: best.map(|(word, _)| word.to_string()).unwrap_or_default(),
    }
}
