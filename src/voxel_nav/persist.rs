use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::Vec3;
use log::info;

use crate::voxel_nav::grid::VoxelGrid;
use crate::voxel_nav::volume::NavVolume;

const MAGIC: [u8; 4] = *b"ANAV";
const VERSION: u32 = 1;

impl NavVolume {
	/// Save the volume (dimensions, transform, connectivity) as a flat
	/// little-endian binary file.
	pub fn write_to_nav_file(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let file = File::create(path)
			.with_context(|| format!("failed to create {}", path.display()))?;
		let mut writer = BufWriter::new(file);

		writer.write_all(&MAGIC)?;
		writer.write_all(&VERSION.to_le_bytes())?;
		for dim in [self.grid.len_x, self.grid.len_y, self.grid.len_z] {
			writer.write_all(&(dim as u32).to_le_bytes())?;
		}
		writer.write_all(&self.grid.voxel_size.to_le_bytes())?;
		for component in self.bounds_min.to_array() {
			writer.write_all(&component.to_le_bytes())?;
		}
		for mask in &self.grid.connectivity {
			writer.write_all(&mask.to_le_bytes())?;
		}
		writer.flush()?;

		info!("nav volume saved: {}", path.display());
		Ok(())
	}

	/// Load a volume previously written by `write_to_nav_file`.
	pub fn read_from_nav_file(path: impl AsRef<Path>) -> Result<NavVolume> {
		let path = path.as_ref();
		let file = File::open(path)
			.with_context(|| format!("failed to open {}", path.display()))?;
		let mut reader = BufReader::new(file);

		let mut magic = [0u8; 4];
		reader.read_exact(&mut magic)?;
		if magic != MAGIC {
			bail!("{} is not a nav volume file", path.display());
		}
		let version = read_u32(&mut reader)?;
		if version != VERSION {
			bail!("unsupported nav file version {version}");
		}

		let len_x = read_u32(&mut reader)? as usize;
		let len_y = read_u32(&mut reader)? as usize;
		let len_z = read_u32(&mut reader)? as usize;
		let voxel_size = read_f32(&mut reader)?;
		let bounds_min = Vec3::new(
			read_f32(&mut reader)?,
			read_f32(&mut reader)?,
			read_f32(&mut reader)?,
		);

		if len_x == 0 || len_y == 0 || len_z == 0 {
			bail!("nav file {} has an empty grid", path.display());
		}
		if voxel_size.is_nan() || voxel_size <= 0.0 {
			bail!("nav file {} has voxel size {voxel_size}", path.display());
		}

		let mut grid = VoxelGrid::new(len_x, len_y, len_z, voxel_size);
		for mask in grid.connectivity.iter_mut() {
			*mask = read_u32(&mut reader)
				.with_context(|| format!("{} is truncated", path.display()))?;
		}
		let mut trailing = [0u8; 1];
		if reader.read(&mut trailing)? != 0 {
			bail!("trailing bytes in {}", path.display());
		}

		Ok(NavVolume { grid, bounds_min })
	}
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(u32::from_le_bytes(buf))
}

fn read_f32(reader: &mut impl Read) -> Result<f32> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(f32::from_le_bytes(buf))
}
