//! Reverse index from particle identifier to instance positions.

use indexmap::IndexMap;
use smallvec::SmallVec;

use skein_core::Pid;

use crate::count::CountIndex;

/// One occurrence of a particle: the step it was observed at and the flat
/// position of that observation in the instance sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceRef {
    /// Time-step index.
    pub step: usize,
    /// Flat position in the `particle_instance` dimension.
    pub pos: usize,
}

/// Per-occurrence lists are inlined up to this length; particles with
/// longer lifetimes spill to the heap.
type RefList = SmallVec<[InstanceRef; 4]>;

/// Reverse map from particle identifier to its ordered occurrences.
///
/// Storage order is time-major, so reconstructing one particle's history
/// needs this inversion. Building is a single O(total) pass; lookups are
/// then O(1) hash probes. Keys are held in first-appearance order, which
/// for well-formed output (identifiers assigned at release time) is also
/// increasing pid order.
///
/// The index is immutable once built. Collections build it lazily on the
/// first identifier-based query and cache it for their lifetime.
#[derive(Clone, Debug, Default)]
pub struct PidIndex {
    entries: IndexMap<Pid, RefList>,
}

impl PidIndex {
    /// Build the reverse index from the flat pid sequence.
    ///
    /// Walks the count index step by step so every flat position gets its
    /// owning step from a running cursor instead of a per-element binary
    /// search. `pids` must be the full flat sequence belonging to `index`,
    /// a pairing that open-time validation has already checked.
    pub fn build(pids: &[Pid], index: &CountIndex) -> Self {
        debug_assert_eq!(pids.len(), index.total());
        let mut entries: IndexMap<Pid, RefList> = IndexMap::new();
        for (step, range) in index.iter_ranges().enumerate() {
            for pos in range {
                entries
                    .entry(pids[pos])
                    .or_default()
                    .push(InstanceRef { step, pos });
            }
        }
        Self { entries }
    }

    /// Occurrences of `pid`, ordered by increasing step.
    ///
    /// An identifier that never appears yields an empty slice, not an
    /// error; callers decide whether absence is exceptional (a trajectory
    /// query treats it as one, densification treats it as "never present").
    pub fn lookup(&self, pid: Pid) -> &[InstanceRef] {
        self.entries.get(&pid).map_or(&[], |refs| refs.as_slice())
    }

    /// Whether `pid` appears at least once.
    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains_key(&pid)
    }

    /// Number of distinct particles.
    pub fn num_particles(&self) -> usize {
        self.entries.len()
    }

    /// Distinct identifiers in first-appearance order.
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.entries.keys().copied()
    }

    /// Distinct identifiers in increasing order.
    ///
    /// Well-formed output appends particles in release order, making this
    /// a no-op re-sort; the sort is kept so a scrambled source still gets
    /// a deterministic column order downstream.
    pub fn sorted_pids(&self) -> Vec<Pid> {
        let mut pids: Vec<Pid> = self.entries.keys().copied().collect();
        pids.sort_unstable();
        pids
    }

    /// Smallest identifier present, or `None` for an empty set.
    pub fn min_pid(&self) -> Option<Pid> {
        self.entries.keys().copied().min()
    }

    /// Largest identifier present, or `None` for an empty set.
    pub fn max_pid(&self) -> Option<Pid> {
        self.entries.keys().copied().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // counts = [2, 1, 2], pid = [10, 11, 11, 10, 12]:
    //   step 0: pids 10, 11
    //   step 1: pid  11
    //   step 2: pids 10, 12
    fn scenario() -> (Vec<Pid>, CountIndex) {
        let index = CountIndex::from_counts(&[2, 1, 2]).unwrap();
        let pids = [10, 11, 11, 10, 12].map(Pid).to_vec();
        (pids, index)
    }

    #[test]
    fn lookup_returns_ordered_occurrences() {
        let (pids, index) = scenario();
        let idx = PidIndex::build(&pids, &index);

        assert_eq!(
            idx.lookup(Pid(10)),
            &[
                InstanceRef { step: 0, pos: 0 },
                InstanceRef { step: 2, pos: 3 }
            ]
        );
        assert_eq!(
            idx.lookup(Pid(11)),
            &[
                InstanceRef { step: 0, pos: 1 },
                InstanceRef { step: 1, pos: 2 }
            ]
        );
        assert_eq!(idx.lookup(Pid(12)), &[InstanceRef { step: 2, pos: 4 }]);
    }

    #[test]
    fn absent_pid_yields_empty_slice() {
        let (pids, index) = scenario();
        let idx = PidIndex::build(&pids, &index);
        assert!(idx.lookup(Pid(99)).is_empty());
        assert!(!idx.contains(Pid(99)));
    }

    #[test]
    fn distinct_particles_counted() {
        let (pids, index) = scenario();
        let idx = PidIndex::build(&pids, &index);
        assert_eq!(idx.num_particles(), 3);
        assert_eq!(idx.min_pid(), Some(Pid(10)));
        assert_eq!(idx.max_pid(), Some(Pid(12)));
        assert_eq!(idx.sorted_pids(), vec![Pid(10), Pid(11), Pid(12)]);
    }

    #[test]
    fn empty_steps_are_skipped() {
        let index = CountIndex::from_counts(&[0, 2, 0, 1]).unwrap();
        let pids = [5, 6, 5].map(Pid).to_vec();
        let idx = PidIndex::build(&pids, &index);
        assert_eq!(
            idx.lookup(Pid(5)),
            &[
                InstanceRef { step: 1, pos: 0 },
                InstanceRef { step: 3, pos: 2 }
            ]
        );
        assert_eq!(idx.lookup(Pid(6)), &[InstanceRef { step: 1, pos: 1 }]);
    }

    #[test]
    fn empty_set() {
        let index = CountIndex::from_counts(&[]).unwrap();
        let idx = PidIndex::build(&[], &index);
        assert_eq!(idx.num_particles(), 0);
        assert_eq!(idx.min_pid(), None);
        assert!(idx.lookup(Pid(0)).is_empty());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        // Random ragged layouts: counts plus matching pid values.
        fn ragged() -> impl Strategy<Value = (Vec<i64>, Vec<Pid>)> {
            proptest::collection::vec(0i64..8, 1..15).prop_flat_map(|counts| {
                let total: usize = counts.iter().sum::<i64>() as usize;
                let pids = proptest::collection::vec(0u64..12, total..=total)
                    .prop_map(|v| v.into_iter().map(Pid).collect::<Vec<_>>());
                (Just(counts), pids)
            })
        }

        proptest! {
            #[test]
            fn occurrences_match_membership((counts, pids) in ragged()) {
                let index = CountIndex::from_counts(&counts).unwrap();
                let idx = PidIndex::build(&pids, &index);

                // Every occurrence points at a position actually holding
                // the pid, inside the claimed step's range.
                for pid in idx.pids() {
                    let mut prev_step = None;
                    for r in idx.lookup(pid) {
                        prop_assert_eq!(pids[r.pos], pid);
                        prop_assert!(index.range(r.step).unwrap().contains(&r.pos));
                        // Steps strictly increase (a pid occurs at most
                        // once per step in well-formed data; duplicates
                        // here still keep non-decreasing order).
                        if let Some(p) = prev_step {
                            prop_assert!(r.step >= p);
                        }
                        prev_step = Some(r.step);
                    }
                }

                // Occurrence total matches the instance total.
                let listed: usize = idx.pids().map(|p| idx.lookup(p).len()).sum();
                prop_assert_eq!(listed, index.total());
            }
        }
    }
}
