//! Simulated measurement: repeated sampling of a state vector in the
//! computational basis.

use std::collections::HashMap;

use anyhow::Result;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::qstate::QState;

/// Draws `shots` measurement outcomes from the Born-rule distribution of
/// `state`. Keys are bit-strings of length `state.num_of_qbits()` and the
/// counts always sum to `shots`.
pub fn sample_counts<R: Rng + ?Sized>(
    state: &QState,
    shots: u32,
    rng: &mut R,
) -> Result<HashMap<String, u32>> {
    let bin_width = state.num_of_qbits();
    let distribution = WeightedIndex::new(state.probabilities())?;

    let mut counts = HashMap::new();
    for _ in 0..shots {
        let index = distribution.sample(rng);
        let outcome = format!("{:0width$b}", index, width = bin_width);
        *counts.entry(outcome).or_insert(0) += 1;
    }

    Ok(counts)
}
