//! World map rendering core
//!
//! Resolves a world save (or a bare region folder) to the region folder of one
//! dimension, checks it before rendering, and defines the render
//! configuration that the renderer and its tile cache are keyed on.

pub mod render;
pub mod settings;
pub mod world;

pub use render::{RegionRenderer, RenderCache, RenderError, TileKey};
pub use settings::{BoundingBox, RenderConfig, RenderConfigBuilder, Shading};
pub use world::{resolve, Dimension, DimensionChooser, FolderStatus, ResolveError, ResolvedWorld};
