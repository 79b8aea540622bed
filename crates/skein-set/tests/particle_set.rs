//! End-to-end queries against the reference ragged layout.
//!
//! Layout under test (see `skein-test-utils`):
//! counts = [2, 1, 2], pid = [10, 11, 11, 10, 12],
//! X = [1..5], Y = [10..50].

use skein_core::{OpenError, Pid, QueryError};
use skein_set::ParticleSet;
use skein_test_utils::{reference_dataset, MemoryDataset};

#[test]
fn open_builds_count_index_only() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    assert_eq!(set.num_steps(), 3);
    assert_eq!(set.num_instances(), 5);
    assert_eq!(set.count_at(0).unwrap(), 2);
    assert_eq!(set.count_at(1).unwrap(), 1);
    assert_eq!(set.count_at(2).unwrap(), 2);
    assert!(matches!(
        set.count_at(3),
        Err(QueryError::StepOutOfRange { step: 3, .. })
    ));
}

#[test]
fn per_step_slices() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    let x = set.instance_float("X").unwrap();
    assert_eq!(x.at_step(0).unwrap(), &[1.0, 2.0]);
    assert_eq!(x.at_step(1).unwrap(), &[3.0]);
    assert_eq!(x.at_step(2).unwrap(), &[4.0, 5.0]);
    assert_eq!(
        set.pid_at_step(2).unwrap(),
        &[Pid(10), Pid(12)]
    );
}

#[test]
fn position_pairs_x_and_y() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    let pos = set.position(2).unwrap();
    assert_eq!(pos.x, &[4.0, 5.0]);
    assert_eq!(pos.y, &[40.0, 50.0]);
}

#[test]
fn trajectory_follows_one_particle() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();

    let track = set.trajectory(Pid(10)).unwrap();
    assert_eq!(track.steps, vec![0, 2]);
    assert_eq!(track.x, vec![1.0, 4.0]);
    assert_eq!(track.y, vec![10.0, 40.0]);
    assert_eq!(track.times, vec![set.time(0).unwrap(), set.time(2).unwrap()]);
    assert_eq!(track.len(), 2);

    let track = set.trajectory(Pid(12)).unwrap();
    assert_eq!(track.steps, vec![2]);
    assert_eq!(track.x, vec![5.0]);

    assert_eq!(
        set.trajectory(Pid(99)),
        Err(QueryError::UnknownPid { pid: Pid(99) })
    );
}

#[test]
fn trajectory_matches_per_step_membership() {
    // Round trip: trajectory(p) lists exactly the steps where the per-step
    // pid slice contains p.
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    for pid in [Pid(10), Pid(11), Pid(12)] {
        let track = set.trajectory(pid).unwrap();
        for step in 0..set.num_steps() {
            let present = set.pid_at_step(step).unwrap().contains(&pid);
            assert_eq!(track.steps.contains(&step), present, "pid {pid} step {step}");
        }
    }
}

#[test]
fn dense_grid_agrees_with_ragged_queries() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    let grid = set.dense_float("X", f64::NAN).unwrap();

    assert_eq!(grid.num_steps(), 3);
    assert_eq!(grid.columns(), &[Pid(10), Pid(11), Pid(12)]);

    // Present cells match the per-step slice values.
    for step in 0..set.num_steps() {
        let pids = set.pid_at_step(step).unwrap();
        let xs = set.instance_float("X").unwrap().at_step(step).unwrap();
        for (&pid, &x) in pids.iter().zip(xs) {
            assert_eq!(grid.value(step, pid), Some(x));
        }
    }

    // Absent cells are NaN.
    assert!(grid.value(1, Pid(10)).unwrap().is_nan());
    assert!(grid.value(1, Pid(12)).unwrap().is_nan());
    assert!(grid.value(2, Pid(11)).unwrap().is_nan());
}

#[test]
fn dense_int_uses_sentinel() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    let grid = set.dense_int("pid", -1).unwrap();
    assert_eq!(grid.row(1).unwrap(), &[-1, 11, -1]);
}

#[test]
fn variable_lookup_and_kinds() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();

    assert!(set.get("X").is_ok());
    assert_eq!(
        set.get("salinity").unwrap_err(),
        QueryError::UnknownVariable {
            name: "salinity".into()
        }
    );
    // pid is integer instance data, not float.
    assert!(matches!(
        set.instance_float("pid"),
        Err(QueryError::KindMismatch { .. })
    ));
    // release_x is particle-scoped.
    assert!(matches!(
        set.instance_float("release_x"),
        Err(QueryError::KindMismatch { .. })
    ));
    let release = set.get("release_x").unwrap().as_particle_float().unwrap();
    assert_eq!(release.get(Pid(12)), Some(12.0));
}

#[test]
fn num_particles_counts_distinct_pids() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    assert_eq!(set.num_particles(), 3);
}

#[test]
fn display_summarizes_the_set() {
    let set = ParticleSet::open(&reference_dataset()).unwrap();
    let text = set.to_string();
    assert!(text.contains("num_steps: 3"));
    assert!(text.contains("count: 2 1 2"));
    assert!(text.contains("X"));
    assert!(text.contains("release_x"));
}

#[test]
fn empty_first_step_is_fine() {
    let ds = MemoryDataset::new(vec![0, 2])
        .with_instance_int("pid", vec![0, 1])
        .with_instance_float("X", vec![1.0, 2.0])
        .with_instance_float("Y", vec![3.0, 4.0]);
    let set = ParticleSet::open(&ds).unwrap();
    assert_eq!(set.count_at(0).unwrap(), 0);
    assert_eq!(set.position(0).unwrap().x, &[] as &[f64]);
    assert_eq!(set.position(1).unwrap().x, &[1.0, 2.0]);
}

#[test]
fn open_rejects_malformed_sources() {
    // Negative count.
    let ds = MemoryDataset::new(vec![2, -1]).with_instance_int("pid", vec![0, 1]);
    assert_eq!(
        ParticleSet::open(&ds).unwrap_err(),
        OpenError::NegativeCount { step: 1, value: -1 }
    );

    // Negative pid.
    let ds = MemoryDataset::new(vec![2]).with_instance_int("pid", vec![0, -3]);
    assert_eq!(
        ParticleSet::open(&ds).unwrap_err(),
        OpenError::NegativePid {
            position: 1,
            value: -3
        }
    );

    // Missing pid variable.
    let ds = MemoryDataset::new(vec![1]).with_instance_float("X", vec![1.0]);
    assert_eq!(
        ParticleSet::open(&ds).unwrap_err(),
        OpenError::MissingVariable { name: "pid".into() }
    );

    // Instance variable length disagrees with the counts.
    let ds = MemoryDataset::new(vec![2, 1])
        .with_instance_int("pid", vec![0, 1, 0])
        .with_instance_float("X", vec![1.0, 2.0]);
    assert_eq!(
        ParticleSet::open(&ds).unwrap_err(),
        OpenError::LengthMismatch {
            name: "X".into(),
            expected: 3,
            actual: 2
        }
    );
}
