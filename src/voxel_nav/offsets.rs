use std::sync::OnceLock;

use glam::{IVec3, Vec3};

/// Number of neighbors a voxel can connect to.
pub const NEIGHBOR_COUNT: usize = 26;

/// Per-axis scale applied to an offset before measuring its length.
/// Vertical travel is priced higher than lateral travel.
pub const LATERAL_SCALE: f32 = 0.95;
pub const VERTICAL_SCALE: f32 = 1.1;

/// Canonical neighbor offsets, z layer outermost, then y, then x, with
/// the center cell skipped. Bit `b` of every connectivity mask refers to
/// `NEIGHBOR_OFFSETS[b]`; the builder and the search both index this
/// table so bit positions always agree.
pub const NEIGHBOR_OFFSETS: [IVec3; NEIGHBOR_COUNT] = [
	// z = -1 layer
	IVec3::new(-1, -1, -1),
	IVec3::new(0, -1, -1),
	IVec3::new(1, -1, -1),
	IVec3::new(-1, 0, -1),
	IVec3::new(0, 0, -1),
	IVec3::new(1, 0, -1),
	IVec3::new(-1, 1, -1),
	IVec3::new(0, 1, -1),
	IVec3::new(1, 1, -1),
	// z = 0 layer
	IVec3::new(-1, -1, 0),
	IVec3::new(0, -1, 0),
	IVec3::new(1, -1, 0),
	IVec3::new(-1, 0, 0),
	IVec3::new(1, 0, 0),
	IVec3::new(-1, 1, 0),
	IVec3::new(0, 1, 0),
	IVec3::new(1, 1, 0),
	// z = 1 layer
	IVec3::new(-1, -1, 1),
	IVec3::new(0, -1, 1),
	IVec3::new(1, -1, 1),
	IVec3::new(-1, 0, 1),
	IVec3::new(0, 0, 1),
	IVec3::new(1, 0, 1),
	IVec3::new(-1, 1, 1),
	IVec3::new(0, 1, 1),
	IVec3::new(1, 1, 1),
];

/// Manhattan distance class of an offset: 1 cardinal, 2 edge-diagonal,
/// 3 corner-diagonal.
#[inline]
pub fn manhattan_class(offset: IVec3) -> i32 {
	offset.x.abs() + offset.y.abs() + offset.z.abs()
}

/// Apply the anisotropic movement scale to an integer delta.
#[inline]
fn scaled(delta: IVec3) -> Vec3 {
	Vec3::new(
		delta.x as f32 * LATERAL_SCALE,
		delta.y as f32 * VERTICAL_SCALE,
		delta.z as f32 * LATERAL_SCALE,
	)
}

/// Unit step costs for all 26 offsets, in table order. Multiply by the
/// grid's voxel size to get the world-space edge cost.
pub fn step_costs() -> &'static [f32; NEIGHBOR_COUNT] {
	static COSTS: OnceLock<[f32; NEIGHBOR_COUNT]> = OnceLock::new();
	COSTS.get_or_init(|| {
		let mut costs = [0.0f32; NEIGHBOR_COUNT];
		for (bit, &offset) in NEIGHBOR_OFFSETS.iter().enumerate() {
			costs[bit] = scaled(offset).length();
		}
		costs
	})
}

/// Straight-line lower bound on the cost of travelling between two
/// voxels. Uses the same anisotropic scale as the step costs, so it
/// never exceeds the cost of any voxel path between the two.
#[inline]
pub fn heuristic(a: IVec3, b: IVec3, voxel_size: f32) -> f32 {
	scaled(b - a).length() * voxel_size
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn table_matches_canonical_enumeration() {
		let mut bit = 0;
		for z in -1..=1 {
			for y in -1..=1 {
				for x in -1..=1 {
					if x == 0 && y == 0 && z == 0 {
						continue;
					}
					assert_eq!(NEIGHBOR_OFFSETS[bit], IVec3::new(x, y, z), "bit {bit}");
					bit += 1;
				}
			}
		}
		assert_eq!(bit, NEIGHBOR_COUNT);
	}

	#[test]
	fn distance_classes_partition_the_table() {
		let mut counts = [0usize; 4];
		for &offset in NEIGHBOR_OFFSETS.iter() {
			counts[manhattan_class(offset) as usize] += 1;
		}
		assert_eq!(counts, [0, 6, 12, 8]);
	}

	#[test]
	fn diagonal_steps_cost_more_than_cardinal_but_less_than_two() {
		let costs = step_costs();
		let lateral = costs[13]; // (1, 0, 0)
		let xz_diagonal = costs[22]; // (1, 0, 1)
		assert!(xz_diagonal > lateral);
		assert!(xz_diagonal < 2.0 * lateral);
	}

	#[test]
	fn vertical_steps_cost_more_than_lateral() {
		let costs = step_costs();
		assert!((costs[13] - LATERAL_SCALE).abs() < 1e-6); // (1, 0, 0)
		assert!((costs[15] - VERTICAL_SCALE).abs() < 1e-6); // (0, 1, 0)
	}

	#[test]
	fn heuristic_matches_step_cost_for_single_moves() {
		let origin = IVec3::new(4, 4, 4);
		let costs = step_costs();
		for (bit, &offset) in NEIGHBOR_OFFSETS.iter().enumerate() {
			let h = heuristic(origin, origin + offset, 2.0);
			assert!((h - costs[bit] * 2.0).abs() < 1e-5, "bit {bit}");
		}
	}
}
