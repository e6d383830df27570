use bitvec::vec::BitVec;
use glam::{IVec3, Vec3};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::voxel_nav::grid::VoxelGrid;

/// Voxels sampled per scan tick when a caller does not spread the work
/// itself.
pub const SCAN_VOXELS_PER_TICK: usize = 2000;

/// Answers whether collidable geometry overlaps a cube-shaped probe.
/// Any filtering (collision layers and the like) happens on the oracle
/// side; the scan only asks about one probe at a time.
pub trait OccupancyOracle {
	/// True when anything collidable overlaps the axis-aligned cube of
	/// half extent `half_extent` centered at `center`.
	fn probe(&self, center: Vec3, half_extent: f32) -> bool;
}

/// A bounded world-space volume discretized into a voxel grid.
///
/// Owns the affine voxel-to-world mapping; the grid itself works purely
/// in index space.
#[derive(Debug, Clone, PartialEq)]
pub struct NavVolume {
	pub grid: VoxelGrid,
	pub bounds_min: Vec3,  // World-space lower corner of the volume
}

impl NavVolume {
	/// Create a volume covering `size` world units upward from
	/// `bounds_min`, with every voxel initially impassable.
	pub fn new(bounds_min: Vec3, size: Vec3, voxel_size: f32) -> Self {
		assert!(
			size.x > 0.0 && size.y > 0.0 && size.z > 0.0,
			"volume size must be positive"
		);
		let len_x = (size.x / voxel_size).ceil() as usize;
		let len_y = (size.y / voxel_size).ceil() as usize;
		let len_z = (size.z / voxel_size).ceil() as usize;

		Self {
			grid: VoxelGrid::new(len_x, len_y, len_z, voxel_size),
			bounds_min,
		}
	}

	/// Create a volume of extent `size` centered on `center`.
	pub fn centered(center: Vec3, size: Vec3, voxel_size: f32) -> Self {
		Self::new(center - size * 0.5, size, voxel_size)
	}

	/// Quantize a world-space position to a voxel coordinate (floor).
	/// The result may lie outside the grid; callers bounds-test it.
	pub fn global_to_voxel_coord(&self, point: Vec3) -> IVec3 {
		((point - self.bounds_min) / self.grid.voxel_size)
			.floor()
			.as_ivec3()
	}

	/// World-space center of a voxel, +0.5 voxel from its lower corner.
	pub fn voxel_coord_to_global(&self, coord: IVec3) -> Vec3 {
		self.bounds_min + (coord.as_vec3() + 0.5) * self.grid.voxel_size
	}

	/// Sample the oracle for every voxel, then rebuild connectivity.
	/// Runs the incremental scan to completion with a progress bar.
	pub fn voxelize(&mut self, oracle: &dyn OccupancyOracle) {
		let mut scan = OccupancyScan::new(self.grid.total_voxels);

		let pb = ProgressBar::new(self.grid.total_voxels as u64);
		pb.set_style(
			ProgressStyle::default_bar()
			.template("Scanning occupancy: [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
			.unwrap()
			.progress_chars("#>-"),
		);
		while !scan.tick(self, oracle, SCAN_VOXELS_PER_TICK) {
			pb.set_position(scan.cursor() as u64);
		}
		pb.finish_and_clear();

		let solid = scan.into_solid_map();
		info!(
			"occupancy scan complete: {} of {} voxels solid",
			solid.count_ones(),
			self.grid.total_voxels
		);

		self.grid.build_connectivity(&solid);
		info!("connectivity built: {} open voxels", self.grid.count_open());
	}
}

/// Incremental oracle scan. Samples a bounded number of voxels per tick
/// so a host can spread the work across frames. The scan must run to
/// completion before its solid map feeds `build_connectivity`, and the
/// map is not mutated by anything else while the scan is live.
pub struct OccupancyScan {
	solid: BitVec,
	cursor: usize,
}

impl OccupancyScan {
	pub fn new(total_voxels: usize) -> Self {
		Self {
			solid: BitVec::repeat(false, total_voxels),
			cursor: 0,
		}
	}

	/// True once every voxel has been sampled.
	pub fn is_complete(&self) -> bool {
		self.cursor >= self.solid.len()
	}

	/// Next flat index the scan will sample.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Sample up to `voxels_per_tick` voxels against the oracle.
	/// Returns true when the scan has covered the whole grid.
	pub fn tick(
		&mut self,
		volume: &NavVolume,
		oracle: &dyn OccupancyOracle,
		voxels_per_tick: usize,
	) -> bool {
		assert_eq!(self.solid.len(), volume.grid.total_voxels, "scan length must match grid");

		let half_extent = volume.grid.voxel_size * 0.5;
		for _ in 0..voxels_per_tick {
			if self.is_complete() {
				return true;
			}
			let coord = volume.grid.to_coord(self.cursor);
			let center = volume.voxel_coord_to_global(coord);
			if oracle.probe(center, half_extent) {
				self.solid.set(self.cursor, true);
			}
			self.cursor += 1;
		}
		self.is_complete()
	}

	/// Consume the finished scan, yielding the solid map.
	pub fn into_solid_map(self) -> BitVec {
		assert!(self.is_complete(), "occupancy scan is not finished");
		self.solid
	}
}
