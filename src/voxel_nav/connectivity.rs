use bitvec::vec::BitVec;
use glam::IVec3;
use indicatif::{ProgressBar, ProgressStyle};

use crate::voxel_nav::grid::VoxelGrid;
use crate::voxel_nav::offsets::{NEIGHBOR_OFFSETS, manhattan_class};

impl VoxelGrid {
	/// Build the 26-bit connectivity mask for every voxel from a solid
	/// map of matching length.
	///
	/// Solid voxels get mask zero. Each clear voxel gets one bit per
	/// reachable neighbor; diagonal moves are denied when they would cut
	/// a corner past solid geometry. Full pass over the grid, no early
	/// termination.
	pub fn build_connectivity(&mut self, solid: &BitVec) {
		assert_eq!(solid.len(), self.total_voxels, "solid map length must match grid");

		// Setup progress bar
		let pb = ProgressBar::new(self.total_voxels as u64);
		pb.set_style(
			ProgressStyle::default_bar()
			.template("Building connectivity: [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
			.unwrap()
			.progress_chars("#>-"),
		);

		for index in 0..self.total_voxels {
			pb.inc(1);

			if solid[index] {
				self.connectivity[index] = 0;
				continue;
			}

			let coord = self.to_coord(index);
			let mut mask = 0u32;
			for (bit, &offset) in NEIGHBOR_OFFSETS.iter().enumerate() {
				if self.can_connect(solid, coord, offset) {
					mask |= 1 << bit;
				}
			}
			self.connectivity[index] = mask;
		}

		pb.finish_and_clear();
	}

	/// Decide whether movement from `coord` along `offset` is permitted.
	fn can_connect(&self, solid: &BitVec, coord: IVec3, offset: IVec3) -> bool {
		let neighbor = coord + offset;
		if !self.coord_in_bounds(neighbor) {
			return false;
		}
		if solid[self.to_index(neighbor) as usize] {
			return false;
		}

		if manhattan_class(offset) < 2 {
			return true;
		}

		// A diagonal move also needs every cardinal shoulder of its
		// offset open: keeping one nonzero axis delta and zeroing the
		// rest must land on a clear, in-bounds cell. Two shoulders for an
		// edge-diagonal, three for a corner-diagonal.
		for axis in 0..3 {
			if offset[axis] == 0 {
				continue;
			}
			let mut shoulder_offset = IVec3::ZERO;
			shoulder_offset[axis] = offset[axis];
			let shoulder = coord + shoulder_offset;
			if !self.coord_in_bounds(shoulder) {
				return false;
			}
			if solid[self.to_index(shoulder) as usize] {
				return false;
			}
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::voxel_nav::offsets::NEIGHBOR_COUNT;

	fn all_clear(grid: &VoxelGrid) -> BitVec {
		BitVec::repeat(false, grid.total_voxels)
	}

	fn bit_for(offset: IVec3) -> u32 {
		let position = NEIGHBOR_OFFSETS
			.iter()
			.position(|&entry| entry == offset)
			.unwrap();
		1 << position
	}

	#[test]
	fn all_clear_interior_voxel_has_all_26_bits() {
		let mut grid = VoxelGrid::new(5, 5, 5, 1.0);
		let solid = all_clear(&grid);
		grid.build_connectivity(&solid);

		let center = grid.to_index(IVec3::new(2, 2, 2)) as usize;
		assert_eq!(grid.get(center).count_ones() as usize, NEIGHBOR_COUNT);
	}

	#[test]
	fn boundary_voxel_lacks_out_of_bounds_bits() {
		let mut grid = VoxelGrid::new(5, 5, 5, 1.0);
		let solid = all_clear(&grid);
		grid.build_connectivity(&solid);

		// A corner voxel has 7 in-bounds neighbors, all clear.
		let corner = grid.to_index(IVec3::ZERO) as usize;
		assert_eq!(grid.get(corner).count_ones(), 7);
		assert_eq!(grid.get(corner) & bit_for(IVec3::new(-1, 0, 0)), 0);
		assert_ne!(grid.get(corner) & bit_for(IVec3::new(1, 1, 1)), 0);
	}

	#[test]
	fn solid_voxels_carry_no_connectivity() {
		let mut grid = VoxelGrid::new(3, 3, 3, 1.0);
		let mut solid = all_clear(&grid);
		let center = grid.to_index(IVec3::new(1, 1, 1)) as usize;
		solid.set(center, true);
		grid.build_connectivity(&solid);

		assert_eq!(grid.get(center), 0);
		// No neighbor keeps a bit pointing at the solid cell.
		let origin = grid.to_index(IVec3::ZERO) as usize;
		assert_eq!(grid.get(origin) & bit_for(IVec3::new(1, 1, 1)), 0);
	}

	#[test]
	fn clear_interior_pairs_have_reciprocal_bits() {
		let mut grid = VoxelGrid::new(4, 4, 4, 1.0);
		let solid = all_clear(&grid);
		grid.build_connectivity(&solid);

		let a = grid.to_index(IVec3::new(1, 1, 1)) as usize;
		let b = grid.to_index(IVec3::new(2, 2, 2)) as usize;
		assert_ne!(grid.get(a) & bit_for(IVec3::new(1, 1, 1)), 0);
		assert_ne!(grid.get(b) & bit_for(IVec3::new(-1, -1, -1)), 0);
	}

	#[test]
	fn edge_diagonal_denied_through_blocked_corner() {
		// 3x3x1 slice: the two cardinal cells flanking the diagonal are
		// solid, the diagonal target itself is clear.
		let mut grid = VoxelGrid::new(3, 3, 1, 1.0);
		let mut solid = all_clear(&grid);
		solid.set(grid.to_index(IVec3::new(1, 0, 0)) as usize, true);
		solid.set(grid.to_index(IVec3::new(0, 1, 0)) as usize, true);
		grid.build_connectivity(&solid);

		let source = grid.to_index(IVec3::ZERO) as usize;
		assert_eq!(grid.get(source) & bit_for(IVec3::new(1, 1, 0)), 0);
		// The diagonal cell is clear, only the route to it is blocked.
		let diagonal = grid.to_index(IVec3::new(1, 1, 0)) as usize;
		assert_ne!(grid.get(diagonal), 0);
	}

	#[test]
	fn edge_diagonal_denied_through_single_blocked_shoulder() {
		let mut grid = VoxelGrid::new(3, 3, 1, 1.0);
		let mut solid = all_clear(&grid);
		solid.set(grid.to_index(IVec3::new(1, 0, 0)) as usize, true);
		grid.build_connectivity(&solid);

		let source = grid.to_index(IVec3::ZERO) as usize;
		assert_eq!(grid.get(source) & bit_for(IVec3::new(1, 1, 0)), 0);
		// The other in-plane diagonal is untouched by the blocker.
		assert_ne!(grid.get(source) & bit_for(IVec3::new(0, 1, 0)), 0);
	}

	#[test]
	fn edge_diagonal_allowed_when_both_shoulders_clear() {
		let mut grid = VoxelGrid::new(3, 3, 1, 1.0);
		let solid = all_clear(&grid);
		grid.build_connectivity(&solid);

		let source = grid.to_index(IVec3::ZERO) as usize;
		assert_ne!(grid.get(source) & bit_for(IVec3::new(1, 1, 0)), 0);
	}

	#[test]
	fn corner_diagonal_needs_all_three_shoulders() {
		let mut grid = VoxelGrid::new(3, 3, 3, 1.0);
		let mut solid = all_clear(&grid);
		solid.set(grid.to_index(IVec3::new(0, 0, 1)) as usize, true);
		grid.build_connectivity(&solid);

		let source = grid.to_index(IVec3::ZERO) as usize;
		// (1, 1, 1) keeps its z shoulder blocked.
		assert_eq!(grid.get(source) & bit_for(IVec3::new(1, 1, 1)), 0);
		// The in-plane diagonal does not touch the blocked cell.
		assert_ne!(grid.get(source) & bit_for(IVec3::new(1, 1, 0)), 0);
	}

	#[test]
	fn rebuild_clears_previous_masks() {
		let mut grid = VoxelGrid::new(3, 3, 3, 1.0);
		let solid = all_clear(&grid);
		grid.build_connectivity(&solid);
		assert_eq!(grid.count_open(), grid.len());

		let everything_solid = BitVec::repeat(true, grid.total_voxels);
		grid.build_connectivity(&everything_solid);
		assert_eq!(grid.count_open(), 0);
	}

	#[test]
	#[should_panic(expected = "solid map length must match grid")]
	fn mismatched_solid_map_is_rejected() {
		let mut grid = VoxelGrid::new(3, 3, 3, 1.0);
		let solid = BitVec::repeat(false, 7);
		grid.build_connectivity(&solid);
	}
}
