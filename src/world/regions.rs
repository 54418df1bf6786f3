//! Region coordinates and region file discovery.
//!
//! Only file names are looked at; region file contents belong to the renderer.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::folder::MODERN_REGION_EXTENSION;
use crate::settings::BoundingBox;

/// Width and depth of one region in blocks (32 chunks of 16 blocks).
pub const REGION_BLOCKS: i64 = 512;

/// Position of a region in region coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl RegionPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Parse a `r.<x>.<z>.mca` file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("r.")?;
        let rest = rest.strip_suffix(MODERN_REGION_EXTENSION)?.strip_suffix('.')?;
        let (x, z) = rest.split_once('.')?;
        Some(Self::new(x.parse().ok()?, z.parse().ok()?))
    }

    pub fn file_name(&self) -> String {
        format!("r.{}.{}.{}", self.x, self.z, MODERN_REGION_EXTENSION)
    }

    /// Blocks covered by this region. Spans every height.
    pub fn block_bounds(&self) -> BoundingBox {
        let to_block = |region: i32, offset: i64| {
            (region as i64 * REGION_BLOCKS + offset).clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        BoundingBox {
            min_x: to_block(self.x, 0),
            max_x: to_block(self.x, REGION_BLOCKS - 1),
            min_y: i32::MIN,
            max_y: i32::MAX,
            min_z: to_block(self.z, 0),
            max_z: to_block(self.z, REGION_BLOCKS - 1),
        }
    }
}

/// All modern region files in `folder`, sorted by position.
pub fn list_regions(folder: &Path) -> io::Result<Vec<RegionPos>> {
    let mut regions = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if let Some(pos) = entry.file_name().to_str().and_then(RegionPos::from_file_name) {
            regions.push(pos);
        }
    }
    regions.sort();
    Ok(regions)
}
