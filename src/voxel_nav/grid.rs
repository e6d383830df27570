/// 3D voxel grid with one 26-bit connectivity mask per voxel.
///
/// A mask of zero marks the voxel impassable; bit `b` set grants
/// movement toward `offsets::NEIGHBOR_OFFSETS[b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
	pub len_x: usize,  // Number of voxels along X
	pub len_y: usize,  // Number of voxels along Y
	pub len_z: usize,  // Number of voxels along Z
	pub total_voxels: usize, // Total number of voxels XxYxZ
	pub voxel_size: f32,  // Edge length of one voxel in world units
	pub connectivity: Vec<u32>,  // Flat per-voxel mask storage
}

impl VoxelGrid {
	/// Create a grid with every voxel impassable (all masks zero).
	pub fn new(len_x: usize, len_y: usize, len_z: usize, voxel_size: f32) -> Self {
		assert!(len_x > 0 && len_y > 0 && len_z > 0, "grid dimensions must be positive");
		assert!(voxel_size > 0.0, "voxel size must be positive");
		let total_voxels = len_x * len_y * len_z;
		// Search bookkeeping stores indices as u32.
		assert!(total_voxels <= u32::MAX as usize, "grid exceeds addressable voxel count");

		Self {
			len_x,
			len_y,
			len_z,
			total_voxels,
			voxel_size,
			connectivity: vec![0; total_voxels],
		}
	}
}
