//! Shared reference fixtures.

use jiff::Timestamp;

use crate::MemoryDataset;

/// The reference ragged layout used across the workspace's tests:
///
/// ```text
/// counts = [2, 1, 2]          offsets = [0, 2, 3, 5]
/// pid    = [10, 11, 11, 10, 12]
/// X      = [1.0, 2.0, 3.0, 4.0, 5.0]
/// Y      = [10.0, 20.0, 30.0, 40.0, 50.0]
/// ```
///
/// Particle 10 exists at steps 0 and 2, particle 11 at steps 0 and 1,
/// particle 12 only at step 2. The `release_x` particle variable holds
/// one value per pid in `0..=12` (only 10, 11, 12 are ever released;
/// the writer still pads positionally).
pub fn reference_dataset() -> MemoryDataset {
    MemoryDataset::new(vec![2, 1, 2])
        .with_times(reference_times())
        .with_instance_int("pid", vec![10, 11, 11, 10, 12])
        .with_instance_float("X", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .with_instance_float("Y", vec![10.0, 20.0, 30.0, 40.0, 50.0])
        .with_particle_float("release_x", (0..=12).map(f64::from).collect())
}

/// Hourly time coordinates for [`reference_dataset`], starting
/// 2024-06-01T00:00:00Z.
pub fn reference_times() -> Vec<Timestamp> {
    (0..3)
        .map(|n| {
            let t: Timestamp = "2024-06-01T00:00:00Z".parse().unwrap();
            t + jiff::SignedDuration::from_hours(n)
        })
        .collect()
}
