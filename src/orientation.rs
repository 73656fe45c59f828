//! Orientation Resolution
//!
//! Solver output does not say whether a pair is `(row, col)` or `(x, y)`. The
//! resolver samples the leading pairs of each agent and picks whichever reading
//! puts fewer points outside the map. This is a best-effort heuristic: square
//! maps with centred paths can fit both readings, so the decision is returned
//! together with the counts that produced it and can be overridden.

use crate::map::MapHeader;
use crate::types::{AgentId, RawPair};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Leading pairs taken from each agent.
pub const SAMPLES_PER_AGENT: usize = 64;

/// Upper bound on the total sample.
pub const MAX_SAMPLES: usize = 1024;

/// Caller's orientation choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SwapMode {
    /// Infer from the out-of-bounds heuristic.
    #[default]
    Auto,
    /// Always read pairs as `(row, col)`.
    On,
    /// Always read pairs as `(x, y)`.
    Off,
}

/// Where a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    Inferred,
    Forced,
}

/// Orientation decision plus the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationDecision {
    /// `true` when pairs are `(row, col)` and must be swapped into `(x, y)`.
    pub swap: bool,
    /// Out-of-bounds sample count if swapped.
    pub oob_swap: usize,
    /// Out-of-bounds sample count if read as-is.
    pub oob_no_swap: usize,
    /// Number of sampled pairs.
    pub samples: usize,
    pub source: DecisionSource,
}

impl OrientationDecision {
    /// A decision that bypasses the heuristic.
    pub fn forced(swap: bool) -> Self {
        Self {
            swap,
            oob_swap: 0,
            oob_no_swap: 0,
            samples: 0,
            source: DecisionSource::Forced,
        }
    }
}

/// Collect the heuristic's sample from agents in the given order.
///
/// Takes up to [`SAMPLES_PER_AGENT`] leading pairs per agent and stops once
/// [`MAX_SAMPLES`] pairs are held.
pub fn sample_pairs<'a, I>(paths: I) -> Vec<RawPair>
where
    I: IntoIterator<Item = (&'a AgentId, &'a Vec<RawPair>)>,
{
    let mut sample = Vec::new();
    for (_, pairs) in paths {
        sample.extend(pairs.iter().take(SAMPLES_PER_AGENT).copied());
        if sample.len() >= MAX_SAMPLES {
            break;
        }
    }
    sample.truncate(MAX_SAMPLES);
    sample
}

/// Count pairs falling outside the map under one reading.
pub fn count_out_of_bounds(pairs: &[RawPair], header: &MapHeader, swap: bool) -> usize {
    pairs
        .iter()
        .filter(|pair| {
            let cell = pair.orient(swap);
            !header.contains(cell.x, cell.y)
        })
        .count()
}

/// Decide the reading from a prepared sample. Ties and empty samples choose swap.
pub fn decide(sample: &[RawPair], header: &MapHeader) -> OrientationDecision {
    if sample.is_empty() {
        return OrientationDecision {
            swap: true,
            oob_swap: 0,
            oob_no_swap: 0,
            samples: 0,
            source: DecisionSource::Inferred,
        };
    }
    let oob_swap = count_out_of_bounds(sample, header, true);
    let oob_no_swap = count_out_of_bounds(sample, header, false);
    OrientationDecision {
        swap: oob_swap <= oob_no_swap,
        oob_swap,
        oob_no_swap,
        samples: sample.len(),
        source: DecisionSource::Inferred,
    }
}

/// Resolve the orientation for a set of agents, honouring an explicit mode.
pub fn resolve<'a, I>(paths: I, header: &MapHeader, mode: SwapMode) -> OrientationDecision
where
    I: IntoIterator<Item = (&'a AgentId, &'a Vec<RawPair>)>,
{
    let decision = match mode {
        SwapMode::On => OrientationDecision::forced(true),
        SwapMode::Off => OrientationDecision::forced(false),
        SwapMode::Auto => decide(&sample_pairs(paths), header),
    };
    tracing::info!(
        swap = decision.swap,
        oob_swap = decision.oob_swap,
        oob_no_swap = decision.oob_no_swap,
        samples = decision.samples,
        source = ?decision.source,
        "Resolved coordinate orientation"
    );
    decision
}
