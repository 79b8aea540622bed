//! Shared synthetic-data generation for the skein benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use skein_core::Pid;
use skein_index::CountIndex;

/// A deterministic synthetic ragged layout.
///
/// Models a release-and-terminate run: `cohort` new particles appear each
/// step and each lives `lifetime` steps, so mid-run steps hold
/// `cohort * lifetime` instances. Positions are filled with a cheap
/// pseudo-random sequence; the values do not matter for the index and
/// densify paths being measured, only the layout does.
pub struct SyntheticRun {
    pub counts: Vec<i64>,
    pub pids: Vec<Pid>,
    pub x: Vec<f64>,
}

impl SyntheticRun {
    pub fn generate(num_steps: usize, cohort: usize, lifetime: usize) -> Self {
        assert!(lifetime >= 1, "particles must live at least one step");
        let mut counts = Vec::with_capacity(num_steps);
        let mut pids = Vec::new();
        let mut x = Vec::new();
        for step in 0..num_steps {
            // Cohorts released in the last `lifetime` steps are alive.
            let oldest = step.saturating_sub(lifetime - 1);
            let mut count = 0i64;
            for release in oldest..=step {
                for slot in 0..cohort {
                    let pid = (release * cohort + slot) as u64;
                    pids.push(Pid(pid));
                    // Deterministic pseudo-random position.
                    let h = pid
                        .wrapping_add(step as u64)
                        .wrapping_mul(6364136223846793005);
                    x.push((h % 10_000) as f64 / 100.0);
                    count += 1;
                }
            }
            counts.push(count);
        }
        Self { counts, pids, x }
    }

    pub fn count_index(&self) -> CountIndex {
        CountIndex::from_counts(&self.counts).expect("synthetic counts are non-negative")
    }
}
