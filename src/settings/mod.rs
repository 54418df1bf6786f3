//! Render settings: bounding box, palette selections and shading mode.
//!
//! [`RenderConfig`] is the value handed to the renderer together with a region
//! folder, and the key the render cache uses to decide whether a tile can be
//! reused.

pub mod bounds;
pub mod palette;
pub mod profile;
pub mod render_config;
pub mod shading;

pub use bounds::BoundingBox;
pub use palette::{BlockPalettes, FormatVersion, PaletteId, BUILTIN_BIOME_PALETTES, BUILTIN_BLOCK_PALETTES};
pub use profile::{load_profile, save_profile, ProfileError};
pub use render_config::{RenderConfig, RenderConfigBuilder};
pub use shading::Shading;
