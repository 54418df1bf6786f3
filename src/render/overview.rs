//! Region coverage overview image.
//!
//! Draws one square per region file so a user can see the extent of a world
//! and which regions the current bounding box keeps before starting a full
//! render.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::settings::RenderConfig;
use crate::world::RegionPos;

const BACKGROUND: Rgb<u8> = Rgb([16, 16, 16]);
const IN_BOUNDS: Rgb<u8> = Rgb([96, 192, 64]);
const CLIPPED: Rgb<u8> = Rgb([64, 64, 72]);

#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    #[error("no regions to draw")]
    NoRegions,
    #[error("overview of {width}x{height} regions at scale {scale} is too large")]
    TooLarge { width: u64, height: u64, scale: u32 },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Largest overview edge in pixels
const MAX_EDGE: u64 = 16_384;

/// Build the overview image. Each region becomes a `scale`×`scale` square,
/// x to the right and z downwards.
pub fn region_overview(regions: &[RegionPos], config: &RenderConfig, scale: u32) -> Result<RgbImage, OverviewError> {
    let scale = scale.max(1);
    let (Some(min_x), Some(max_x)) = (regions.iter().map(|r| r.x).min(), regions.iter().map(|r| r.x).max()) else {
        return Err(OverviewError::NoRegions);
    };
    let min_z = regions.iter().map(|r| r.z).min().unwrap_or(0);
    let max_z = regions.iter().map(|r| r.z).max().unwrap_or(0);

    let width = (max_x as i64 - min_x as i64 + 1) as u64;
    let height = (max_z as i64 - min_z as i64 + 1) as u64;
    if width * scale as u64 > MAX_EDGE || height * scale as u64 > MAX_EDGE {
        return Err(OverviewError::TooLarge { width, height, scale });
    }

    let mut img: RgbImage = ImageBuffer::from_pixel(width as u32 * scale, height as u32 * scale, BACKGROUND);
    for region in regions {
        let color = if config.clip_region(*region).is_some() { IN_BOUNDS } else { CLIPPED };
        let left = (region.x as i64 - min_x as i64) as u32 * scale;
        let top = (region.z as i64 - min_z as i64) as u32 * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(left + dx, top + dy, color);
            }
        }
    }

    Ok(img)
}

/// Write the overview to `path`. Returns the image size.
pub fn export_region_overview(
    regions: &[RegionPos],
    config: &RenderConfig,
    scale: u32,
    path: &Path,
) -> Result<(u32, u32), OverviewError> {
    let img = region_overview(regions, config, scale)?;
    img.save(path)?;
    log::info!("Wrote region overview {}x{} to {}", img.width(), img.height(), path.display());
    Ok(img.dimensions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_overview_colors() {
        let regions = [RegionPos::new(-1, 0), RegionPos::new(1, 1)];
        let config = RenderConfig::builder().x_range(0, i32::MAX).build();

        let img = region_overview(&regions, &config, 2).unwrap();
        assert_eq!(img.dimensions(), (6, 4));
        assert_eq!(*img.get_pixel(0, 0), CLIPPED);
        assert_eq!(*img.get_pixel(5, 3), IN_BOUNDS);
        assert_eq!(*img.get_pixel(2, 0), BACKGROUND);
    }

    #[test]
    fn test_inverted_box_clips_everything() {
        let regions = [RegionPos::new(0, 0)];
        let config = RenderConfig::builder().z_range(5, 4).build();

        let img = region_overview(&regions, &config, 1).unwrap();
        assert_eq!(*img.get_pixel(0, 0), CLIPPED);
    }

    #[test]
    fn test_empty_and_oversized() {
        let config = RenderConfig::default();
        assert!(matches!(region_overview(&[], &config, 1), Err(OverviewError::NoRegions)));

        let far_apart = [RegionPos::new(-100_000, 0), RegionPos::new(100_000, 0)];
        assert!(matches!(region_overview(&far_apart, &config, 1), Err(OverviewError::TooLarge { .. })));
    }

    #[test]
    fn test_export_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overview.png");

        let size = export_region_overview(&[RegionPos::new(0, 0)], &RenderConfig::default(), 4, &path).unwrap();
        assert_eq!(size, (4, 4));
        assert!(path.exists());
    }
}
