use std::mem::size_of;

use glam::IVec3;

use crate::voxel_nav::grid::VoxelGrid;

/// Format byte counts with KB, MB, GB suffixes
fn format_bytes(bytes: usize) -> String {
	const KB: usize = 1024;
	const MB: usize = KB * 1024;
	const GB: usize = MB * 1024;

	if bytes >= GB {
		format!("{:.2} GB", bytes as f64 / GB as f64)
	} else if bytes >= MB {
		format!("{:.2} MB", bytes as f64 / MB as f64)
	} else if bytes >= KB {
		format!("{:.2} KB", bytes as f64 / KB as f64)
	} else {
		format!("{} bytes", bytes)
	}
}

impl VoxelGrid {
	/// Convert a voxel coordinate to a flat index. Pure arithmetic with
	/// no bounds check; out-of-range coordinates yield a meaningless
	/// index that callers must range-test before any storage access.
	#[inline]
	pub fn to_index(&self, coord: IVec3) -> isize {
		coord.x as isize
			+ coord.y as isize * self.len_x as isize
			+ coord.z as isize * self.len_x as isize * self.len_y as isize
	}

	/// Convert a flat index back to a voxel coordinate. Unchecked
	/// inverse of `to_index`; only meaningful for valid indices.
	#[inline]
	pub fn to_coord(&self, index: usize) -> IVec3 {
		let z = index / (self.len_x * self.len_y);
		let y = (index % (self.len_x * self.len_y)) / self.len_x;
		let x = index % self.len_x;
		IVec3::new(x as i32, y as i32, z as i32)
	}

	/// True when every component of `coord` lies inside the grid.
	#[inline]
	pub fn coord_in_bounds(&self, coord: IVec3) -> bool {
		coord.x >= 0 && (coord.x as usize) < self.len_x
			&& coord.y >= 0 && (coord.y as usize) < self.len_y
			&& coord.z >= 0 && (coord.z as usize) < self.len_z
	}

	/// True when a raw index addresses a voxel.
	#[inline]
	pub fn index_in_bounds(&self, index: isize) -> bool {
		index >= 0 && (index as usize) < self.total_voxels
	}

	/// Connectivity mask by flat index (panics if out of bounds)
	#[inline]
	pub fn get(&self, index: usize) -> u32 {
		self.connectivity[index]
	}

	/// Store a connectivity mask by flat index (panics if out of bounds)
	#[inline]
	pub fn set(&mut self, index: usize, mask: u32) {
		self.connectivity[index] = mask;
	}

	/// Total voxel count
	#[inline]
	pub fn len(&self) -> usize {
		self.total_voxels
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.total_voxels == 0
	}

	/// Count voxels that carry at least one open connection
	pub fn count_open(&self) -> usize {
		self.connectivity.iter().filter(|&&mask| mask != 0).count()
	}

	/// Report memory usage and print a detailed breakdown
	pub fn report_memory(&self) {
		let struct_overhead = size_of::<Self>() - size_of::<Vec<u32>>(); // Exclude dynamic storage
		let mask_bytes = self.connectivity.capacity() * size_of::<u32>();
		let total_memory = struct_overhead + mask_bytes;

		eprintln!("VoxelGrid Memory Report:");
		eprintln!("-------------------------");
		eprintln!("  Dimensions: {} x {} x {}", self.len_x, self.len_y, self.len_z);
		eprintln!("  Total Voxels: {}", self.total_voxels);
		eprintln!("  Voxel Size: {:.3}", self.voxel_size);
		eprintln!("  Struct Overhead: {}", format_bytes(struct_overhead));
		eprintln!("  Mask Storage: {}", format_bytes(mask_bytes));
		eprintln!("  Total Memory Used: {}", format_bytes(total_memory));
		eprintln!("-------------------------");
	}
}
