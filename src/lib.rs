pub mod voxel_nav {
	pub mod offsets;
	pub mod grid;
	pub mod utils;
	pub mod connectivity;
	pub mod search;
	pub mod volume;
	pub mod persist;
}
