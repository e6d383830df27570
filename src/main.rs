use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::Vec3;

use air_nav::voxel_nav::volume::{NavVolume, OccupancyOracle};

/// Bake a navigation volume around a demo scene and query a path
/// through it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Volume extent in world units along each axis
	#[arg(long, default_value_t = 16.0)]
	extent: f32,

	/// Edge length of one voxel in world units
	#[arg(long, default_value_t = 0.5)]
	voxel_size: f32,

	/// Save the baked volume to this file
	#[arg(long)]
	save: Option<PathBuf>,

	/// Load a previously baked volume instead of baking the demo scene
	#[arg(long)]
	load: Option<PathBuf>,
}

/// Demo scene: a wall across the middle of the volume with one circular
/// doorway, plus a free-floating pillar.
struct WallScene {
	wall_thickness: f32,
	door_center: Vec3,
	door_radius: f32,
	pillar_center: Vec3,
	pillar_radius: f32,
}

impl OccupancyOracle for WallScene {
	fn probe(&self, center: Vec3, half_extent: f32) -> bool {
		// Wall slab around x = 0, minus the doorway.
		let in_wall = center.x.abs() - half_extent < self.wall_thickness * 0.5;
		let in_door = center.distance(self.door_center) < self.door_radius;
		if in_wall && !in_door {
			return true;
		}

		center.distance(self.pillar_center) < self.pillar_radius + half_extent
	}
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();

	let volume = if let Some(path) = &args.load {
		let volume = NavVolume::read_from_nav_file(path)?;
		println!("Loaded nav volume from {}", path.display());
		volume
	} else {
		let mut volume = NavVolume::centered(Vec3::ZERO, Vec3::splat(args.extent), args.voxel_size);
		let scene = WallScene {
			wall_thickness: 1.0,
			door_center: Vec3::new(0.0, -args.extent * 0.25, 0.0),
			door_radius: args.extent * 0.1,
			pillar_center: Vec3::new(args.extent * 0.25, 0.0, args.extent * 0.25),
			pillar_radius: args.extent * 0.08,
		};
		volume.voxelize(&scene);
		volume
	};

	volume.grid.report_memory();
	println!(
		"Open voxels: {} / {}",
		volume.grid.count_open(),
		volume.grid.len()
	);

	if let Some(path) = &args.save {
		volume.write_to_nav_file(path)?;
		println!("Saved nav volume to {}", path.display());
	}

	let reach = args.extent * 0.35;
	let start = Vec3::new(-reach, 0.0, 0.0);
	let end = Vec3::new(reach, 0.0, 0.0);
	let path = volume.find_path(start, end);

	if path.is_empty() {
		println!("No path from {start} to {end}");
	} else {
		println!("Path from {start} to {end} ({} waypoints):", path.len());
		for point in &path {
			println!("  {point}");
		}
	}

	Ok(())
}
