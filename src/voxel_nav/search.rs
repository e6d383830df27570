use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec3;
use log::warn;

use crate::voxel_nav::offsets::{NEIGHBOR_OFFSETS, heuristic, step_costs};
use crate::voxel_nav::volume::NavVolume;

/// Open-set entry: a voxel index with its f-score at enqueue time.
/// Stale duplicates of the same voxel are tolerated; a pop whose g-score
/// has since improved simply relaxes to no updates.
#[derive(Debug, Clone, Copy)]
struct State {
	index: u32,
	f_score: f32,
}

impl PartialEq for State {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index && self.f_score == other.f_score
	}
}

impl Eq for State {}

impl PartialOrd for State {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for State {
	fn cmp(&self, other: &Self) -> Ordering {
		// Reversed for a min-heap; ties broken by index so repeated
		// searches pop in the same order.
		other
			.f_score
			.partial_cmp(&self.f_score)
			.unwrap_or(Ordering::Equal)
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl NavVolume {
	/// Find a shortest cost-weighted voxel path between two world
	/// points.
	///
	/// Returns waypoints at voxel centers, ending exactly at `end`. An
	/// empty vector covers every failure: no connectivity, an endpoint
	/// outside the grid, an endpoint on an impassable voxel, or no route
	/// between the two. Diagnostics go to the log, never the result.
	pub fn find_path(&self, start: Vec3, end: Vec3) -> Vec<Vec3> {
		let grid = &self.grid;
		if grid.is_empty() {
			warn!("find_path: grid has no voxels");
			return Vec::new();
		}

		let start_coord = self.global_to_voxel_coord(start);
		let end_coord = self.global_to_voxel_coord(end);

		if !grid.coord_in_bounds(start_coord) {
			warn!("find_path: start {start_coord} outside grid");
			return Vec::new();
		}
		if !grid.coord_in_bounds(end_coord) {
			warn!("find_path: end {end_coord} outside grid");
			return Vec::new();
		}

		let start_index = grid.to_index(start_coord) as usize;
		let end_index = grid.to_index(end_coord) as usize;

		if grid.get(start_index) == 0 {
			warn!("find_path: start voxel {start_coord} is impassable");
			return Vec::new();
		}
		if grid.get(end_index) == 0 {
			warn!("find_path: end voxel {end_coord} is impassable");
			return Vec::new();
		}

		let node_count = grid.len();
		let mut g_score = vec![f32::INFINITY; node_count];
		let mut came_from: Vec<Option<u32>> = vec![None; node_count];
		let mut open = BinaryHeap::new();

		g_score[start_index] = 0.0;
		open.push(State {
			index: start_index as u32,
			f_score: heuristic(start_coord, end_coord, grid.voxel_size),
		});

		let costs = step_costs();

		while let Some(State { index, .. }) = open.pop() {
			let current = index as usize;
			if current == end_index {
				return self.reconstruct_path(&came_from, current, end);
			}

			let mask = grid.get(current);
			let current_coord = grid.to_coord(current);

			for (bit, &offset) in NEIGHBOR_OFFSETS.iter().enumerate() {
				if mask & (1 << bit) == 0 {
					continue;
				}

				// Mask bits only ever point at in-bounds voxels.
				let neighbor_coord = current_coord + offset;
				let neighbor = grid.to_index(neighbor_coord) as usize;

				let tentative = g_score[current] + costs[bit] * grid.voxel_size;
				if tentative < g_score[neighbor] {
					came_from[neighbor] = Some(current as u32);
					g_score[neighbor] = tentative;
					open.push(State {
						index: neighbor as u32,
						f_score: tentative + heuristic(neighbor_coord, end_coord, grid.voxel_size),
					});
				}
			}
		}

		Vec::new() // No path found
	}

	/// Walk the predecessor chain backward from the end voxel, then
	/// flip it and pin the caller's exact end point as the final
	/// waypoint.
	fn reconstruct_path(&self, came_from: &[Option<u32>], end_index: usize, end: Vec3) -> Vec<Vec3> {
		let mut path = Vec::new();
		let mut cursor = Some(end_index as u32);
		while let Some(index) = cursor {
			path.push(self.voxel_coord_to_global(self.grid.to_coord(index as usize)));
			cursor = came_from[index as usize];
		}
		path.reverse();
		path.push(end);
		path
	}
}
