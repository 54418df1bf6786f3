//! Boundary to the rendering engine.
//!
//! The engine itself (block colors, shading math, chunk decoding) lives
//! elsewhere and plugs in through [`RegionRenderer`]. This module clips each
//! request against the render configuration, routes it through the
//! [`RenderCache`] and fans batches out over rayon.

pub mod cache;
pub mod overview;

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::settings::{BoundingBox, RenderConfig};
use crate::world::RegionPos;

pub use cache::{CacheStats, RenderCache, TileKey, DEFAULT_CACHE_SIZE};
pub use overview::{export_region_overview, region_overview, OverviewError};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("region {pos:?} could not be read: {reason}")]
    Region { pos: RegionPos, reason: String },
    #[error("renderer failed: {0}")]
    Renderer(String),
}

/// A rendering engine that turns one region into one tile.
pub trait RegionRenderer: Sync {
    type Tile: Send + Sync;

    /// Render the part of region `pos` inside `clip`. `clip` is never empty.
    fn render_region(
        &self,
        region_folder: &Path,
        pos: RegionPos,
        clip: BoundingBox,
        config: &RenderConfig,
    ) -> Result<Self::Tile, RenderError>;
}

/// Render one region through the cache.
///
/// Returns `Ok(None)` when the region lies outside the bounding box (always
/// the case for an inverted box); the renderer is not called then.
pub fn render_cached<R: RegionRenderer>(
    renderer: &R,
    cache: &RenderCache<R::Tile>,
    region_folder: &Path,
    pos: RegionPos,
    config: &RenderConfig,
) -> Result<Option<Arc<R::Tile>>, RenderError> {
    let Some(clip) = config.clip_region(pos) else {
        log::debug!("Region {:?} is outside the render bounds", pos);
        return Ok(None);
    };

    cache
        .get_or_render(TileKey::new(config.clone(), pos), || {
            renderer.render_region(region_folder, pos, clip, config)
        })
        .map(Some)
}

/// Render many regions in parallel, in the order given.
pub fn render_regions<R: RegionRenderer>(
    renderer: &R,
    cache: &RenderCache<R::Tile>,
    region_folder: &Path,
    positions: &[RegionPos],
    config: &RenderConfig,
) -> Vec<(RegionPos, Result<Option<Arc<R::Tile>>, RenderError>)> {
    positions
        .par_iter()
        .map(|&pos| (pos, render_cached(renderer, cache, region_folder, pos, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reports the clipped area instead of pixels and counts calls.
    #[derive(Default)]
    struct AreaRenderer {
        calls: AtomicUsize,
    }

    impl RegionRenderer for AreaRenderer {
        type Tile = i64;

        fn render_region(
            &self,
            _region_folder: &Path,
            pos: RegionPos,
            clip: BoundingBox,
            _config: &RenderConfig,
        ) -> Result<i64, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if pos.x == 99 {
                return Err(RenderError::Region {
                    pos,
                    reason: "truncated".to_string(),
                });
            }
            Ok((clip.max_x as i64 - clip.min_x as i64 + 1) * (clip.max_z as i64 - clip.min_z as i64 + 1))
        }
    }

    #[test]
    fn test_inverted_box_renders_nothing() {
        let renderer = AreaRenderer::default();
        let cache = RenderCache::new();
        let config = RenderConfig::builder().x_range(10, -10).build();

        let result = render_cached(&renderer, &cache, Path::new("region"), RegionPos::new(0, 0), &config);
        assert!(matches!(result, Ok(None)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clip_is_passed_to_renderer() {
        let renderer = AreaRenderer::default();
        let cache = RenderCache::new();
        let config = RenderConfig::builder().x_range(0, 9).z_range(0, 9).build();

        let tile = render_cached(&renderer, &cache, Path::new("region"), RegionPos::new(0, 0), &config)
            .unwrap()
            .unwrap();
        assert_eq!(*tile, 100);
    }

    #[test]
    fn test_batch_reuses_cache() {
        let renderer = AreaRenderer::default();
        let cache = RenderCache::new();
        let config = RenderConfig::default();
        let positions: Vec<RegionPos> = (0..4).map(|x| RegionPos::new(x, 0)).collect();

        let first = render_regions(&renderer, &cache, Path::new("region"), &positions, &config);
        let again = render_regions(&renderer, &cache, Path::new("region"), &positions, &config.clone());

        assert_eq!(first.len(), 4);
        assert_eq!(again.iter().map(|(pos, _)| *pos).collect::<Vec<_>>(), positions);
        assert!(again.iter().all(|(_, r)| matches!(r, Ok(Some(t)) if **t == 512 * 512)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 4);
        assert_eq!(cache.stats().hits, 4);
    }

    #[test]
    fn test_renderer_errors_surface() {
        let renderer = AreaRenderer::default();
        let cache = RenderCache::new();
        let positions = [RegionPos::new(99, 0), RegionPos::new(0, 0)];

        let results = render_regions(&renderer, &cache, Path::new("region"), &positions, &RenderConfig::default());
        assert!(matches!(results[0].1, Err(RenderError::Region { .. })));
        assert!(results[1].1.is_ok());
        assert!(cache.get(&TileKey::new(RenderConfig::default(), RegionPos::new(99, 0))).is_none());
    }
}
