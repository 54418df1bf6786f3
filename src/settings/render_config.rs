//! The render configuration value used as a render cache key.
//!
//! A `RenderConfig` has no setters. Build one with [`RenderConfig::builder`],
//! or derive a variation from an existing value with [`RenderConfig::to_builder`]
//! which leaves this value untouched.
//!
//! Equality and hashing only look at semantic content. All enumerations hash
//! through explicit stable indices, so [`RenderConfig::fingerprint`] is the
//! same in every process for the same content.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;
use super::palette::{BlockPalettes, FormatVersion, PaletteId};
use super::shading::Shading;
use crate::world::RegionPos;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    bounds: BoundingBox,
    block_palettes: BlockPalettes,
    biome_palette: PaletteId,
    shading: Shading,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::new()
    }

    /// Start a new builder pre-filled with this configuration's values.
    pub fn to_builder(&self) -> RenderConfigBuilder {
        RenderConfigBuilder { config: self.clone() }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn block_palettes(&self) -> &BlockPalettes {
        &self.block_palettes
    }

    pub fn block_palette(&self, version: FormatVersion) -> Option<&PaletteId> {
        self.block_palettes.get(version)
    }

    pub fn biome_palette(&self) -> &PaletteId {
        &self.biome_palette
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    /// True if the bounding box is inverted on any axis.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// The part of a region that lies inside the bounding box.
    ///
    /// `None` means there is nothing to render for this region, which is also
    /// the answer for every region when the box is inverted.
    pub fn clip_region(&self, pos: RegionPos) -> Option<BoundingBox> {
        self.bounds.intersect(&pos.block_bounds())
    }

    /// Process-independent 64-bit digest of the configuration.
    ///
    /// Uses an unseeded hasher, so equal configurations produce equal
    /// fingerprints across runs and after a reload from disk.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::UNBOUNDED,
            block_palettes: BlockPalettes::uniform(PaletteId::default_blocks()),
            biome_palette: PaletteId::default_biomes(),
            shading: Shading::default(),
        }
    }
}

/// Builder for [`RenderConfig`]. Unset fields keep their defaults.
#[derive(Clone, Debug, Default)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, bounds: BoundingBox) -> Self {
        self.config.bounds = bounds;
        self
    }

    pub fn x_range(mut self, min_x: i32, max_x: i32) -> Self {
        self.config.bounds.min_x = min_x;
        self.config.bounds.max_x = max_x;
        self
    }

    pub fn y_range(mut self, min_y: i32, max_y: i32) -> Self {
        self.config.bounds.min_y = min_y;
        self.config.bounds.max_y = max_y;
        self
    }

    pub fn z_range(mut self, min_z: i32, max_z: i32) -> Self {
        self.config.bounds.min_z = min_z;
        self.config.bounds.max_z = max_z;
        self
    }

    pub fn min_x(mut self, v: i32) -> Self {
        self.config.bounds.min_x = v;
        self
    }

    pub fn max_x(mut self, v: i32) -> Self {
        self.config.bounds.max_x = v;
        self
    }

    pub fn min_y(mut self, v: i32) -> Self {
        self.config.bounds.min_y = v;
        self
    }

    pub fn max_y(mut self, v: i32) -> Self {
        self.config.bounds.max_y = v;
        self
    }

    pub fn min_z(mut self, v: i32) -> Self {
        self.config.bounds.min_z = v;
        self
    }

    pub fn max_z(mut self, v: i32) -> Self {
        self.config.bounds.max_z = v;
        self
    }

    /// Override the block palette for a single format version
    pub fn block_palette(mut self, version: FormatVersion, palette: PaletteId) -> Self {
        self.config.block_palettes.insert(version, palette);
        self
    }

    /// Replace the whole block palette mapping
    pub fn block_palettes(mut self, palettes: BlockPalettes) -> Self {
        self.config.block_palettes = palettes;
        self
    }

    pub fn biome_palette(mut self, palette: PaletteId) -> Self {
        self.config.biome_palette = palette;
        self
    }

    pub fn shading(mut self, shading: Shading) -> Self {
        self.config.shading = shading;
        self
    }

    pub fn build(self) -> RenderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn std_hash(config: &RenderConfig) -> u64 {
        let mut hasher = DefaultHasher::new();
        config.hash(&mut hasher);
        hasher.finish()
    }

    fn caves_on_1_14() -> RenderConfig {
        RenderConfig::builder()
            .x_range(-512, 511)
            .block_palette(FormatVersion::V1_14, PaletteId::new("caves"))
            .shading(Shading::Flat)
            .build()
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.bounds(), BoundingBox::UNBOUNDED);
        assert_eq!(config.shading(), Shading::Relief);
        assert_eq!(config.biome_palette(), &PaletteId::default_biomes());
        for version in FormatVersion::ALL {
            assert_eq!(config.block_palette(version), Some(&PaletteId::default_blocks()));
        }
    }

    #[test]
    fn test_equal_configs_hash_equal() {
        let a = caves_on_1_14();
        let b = caves_on_1_14();
        assert_eq!(a, b);
        assert_eq!(std_hash(&a), std_hash(&b));
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_palette_insertion_order_is_irrelevant() {
        let orders = [
            [FormatVersion::V1_13, FormatVersion::V1_14, FormatVersion::V1_15],
            [FormatVersion::V1_15, FormatVersion::V1_13, FormatVersion::V1_14],
            [FormatVersion::V1_14, FormatVersion::V1_15, FormatVersion::V1_13],
        ];
        let palette_for = |v: FormatVersion| PaletteId::new(format!("palette_{}", v.index()));

        let configs: Vec<RenderConfig> = orders
            .iter()
            .map(|order| {
                order
                    .iter()
                    .fold(RenderConfig::builder().block_palettes(BlockPalettes::new()), |b, v| {
                        b.block_palette(*v, palette_for(*v))
                    })
                    .build()
            })
            .collect();

        for config in &configs[1..] {
            assert_eq!(config, &configs[0]);
            assert_eq!(config.fingerprint(), configs[0].fingerprint());
        }
    }

    #[test]
    fn test_any_field_change_breaks_equality() {
        let base = caves_on_1_14();
        let variants = [
            base.to_builder().min_y(0).build(),
            base.to_builder().max_z(1000).build(),
            base.to_builder().block_palette(FormatVersion::V1_13, PaletteId::new("caves")).build(),
            base.to_builder().biome_palette(PaletteId::new("vivid")).build(),
            base.to_builder().shading(Shading::Relief).build(),
        ];

        let mut fingerprints: HashSet<u64> = variants.iter().map(RenderConfig::fingerprint).collect();
        fingerprints.insert(base.fingerprint());
        assert_eq!(fingerprints.len(), variants.len() + 1);

        for variant in &variants {
            assert_ne!(variant, &base);
        }
    }

    #[test]
    fn test_to_builder_leaves_source_untouched() {
        let base = caves_on_1_14();
        let before = base.fingerprint();
        let _other = base.to_builder().shading(Shading::Heightmap).build();
        assert_eq!(base.fingerprint(), before);
        assert_eq!(base.shading(), Shading::Flat);
    }

    #[test]
    fn test_fingerprint_survives_json_reload() {
        let config = caves_on_1_14();
        let json = serde_json::to_string(&config).unwrap();
        let reloaded: RenderConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(reloaded, config);
        assert_eq!(reloaded.fingerprint(), config.fingerprint());
    }

    #[test]
    fn test_fingerprint_is_unseeded() {
        // Two independently created hashers must agree, unlike RandomState.
        let config = caves_on_1_14();
        let mut first = FxHasher::default();
        config.hash(&mut first);
        let mut second = FxHasher::default();
        config.hash(&mut second);
        assert_eq!(first.finish(), second.finish());
        assert_eq!(first.finish(), config.fingerprint());
    }

    // Fixed values: a change here breaks every fingerprint persisted by
    // earlier builds. FxHasher folds words in native width and byte order.
    #[test]
    #[cfg(all(target_pointer_width = "64", target_endian = "little"))]
    fn test_fingerprint_golden_values() {
        assert_eq!(RenderConfig::default().fingerprint(), 0x84795c59ca4615cb);
        assert_eq!(caves_on_1_14().fingerprint(), 0xa1a3b35b6e01405d);
    }

    #[test]
    fn test_inverted_box_accepted() {
        let config = RenderConfig::builder().x_range(100, -100).build();
        assert!(config.is_empty());
        assert_eq!(config.bounds().min_x, 100);
        assert_eq!(config.clip_region(RegionPos::new(0, 0)), None);
        assert_eq!(config.clip_region(RegionPos::new(-1, 0)), None);
    }

    #[test]
    fn test_clip_region() {
        let config = RenderConfig::builder().x_range(0, 700).z_range(-10, 10).y_range(0, 255).build();

        let clip = config.clip_region(RegionPos::new(1, 0)).unwrap();
        assert_eq!((clip.min_x, clip.max_x), (512, 700));
        assert_eq!((clip.min_z, clip.max_z), (0, 10));
        assert_eq!((clip.min_y, clip.max_y), (0, 255));

        assert_eq!(config.clip_region(RegionPos::new(2, 0)), None);
        assert!(config.clip_region(RegionPos::new(0, -1)).is_some());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"shading":"flat"}"#).unwrap();
        assert_eq!(config, RenderConfig::builder().shading(Shading::Flat).build());
    }
}
