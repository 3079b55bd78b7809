use crate::config::FitConfig;
use crate::error::ModelError;
use crate::types::ObservationSet;

/// A fitted sequence model with a fixed hidden-state count.
///
/// Scoring may fail on observations the fit cannot evaluate (degenerate
/// covariances, dimension mismatch); callers treat any failure as "skip this
/// model here", never as fatal.
pub trait SequenceModel: Send + Sync {
    fn num_states(&self) -> usize;

    /// Total log-likelihood of the observations under this model.
    fn score(&self, observations: &ObservationSet) -> Result<f64, ModelError>;
}

/// The external fitting primitive (expectation-maximization over a
/// Gaussian-emission Markov chain, or any stand-in with the same contract).
///
/// Fit failures are expected and frequent for some state counts; the
/// selection layer tolerates them per candidate.
pub trait ModelFitter: Send + Sync {
    fn fit(
        &self,
        observations: &ObservationSet,
        num_states: usize,
        config: &FitConfig,
    ) -> Result<Box<dyn SequenceModel>, ModelError>;
}
