//! Random drill pair selection.

use crate::models::{DrillPair, DrillRow, Mode};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Picks random pairs from a drill table
pub struct PairPicker<R: Rng = SmallRng> {
    rng: R,
}

impl Default for PairPicker<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl PairPicker<SmallRng> {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Picker with a fixed seed, for reproducible sequences
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> PairPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a random pair, or `None` if the chosen row has nothing usable.
    ///
    /// A row with several candidates never yields a self-pair; a row whose
    /// only candidate is its own first key does.
    pub fn pick(&mut self, rows: &[DrillRow], mode: Mode) -> Option<DrillPair> {
        let row = rows.choose(&mut self.rng)?;
        self.pick_from_row(row, mode)
    }

    /// Pick a second key from one specific row
    pub fn pick_from_row(&mut self, row: &DrillRow, mode: Mode) -> Option<DrillPair> {
        let candidates = row.candidates();
        if candidates.is_empty() {
            log::debug!("Row {} has no usable pairs", row.first);
            return None;
        }

        let (second, value) = if candidates.len() > 1 {
            let others: Vec<_> = candidates
                .iter()
                .copied()
                .filter(|(key, _)| *key != row.first)
                .collect();
            if others.is_empty() {
                candidates.choose(&mut self.rng).copied()
            } else {
                others.choose(&mut self.rng).copied()
            }
        } else {
            candidates.first().copied()
        }?;

        Some(DrillPair {
            pair: mode.pair_string(&row.first, second),
            first: row.first.clone(),
            second: second.clone(),
            value: value.clone(),
        })
    }
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
