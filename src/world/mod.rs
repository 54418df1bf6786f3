//! World save handling: resolving a path to a dimension's region folder and
//! checking that folder before any rendering starts.
//!
//! # Layout of a world save
//!
//! | Dimension | Region folder  |
//! |-----------|----------------|
//! | Overworld | `region`       |
//! | Nether    | `DIM-1/region` |
//! | End       | `DIM1/region`  |
//!
//! A directory is a world root if it contains `level.dat`. Any other
//! directory is treated as a region folder as-is.

pub mod chooser;
pub mod dimension;
pub mod folder;
pub mod regions;
pub mod resolver;
pub mod saves;

pub use chooser::{ChannelChooser, ChoiceRequest, DimensionChooser, FirstAvailable, Preferred};
pub use dimension::{Dimension, LEVEL_MARKER};
pub use folder::{
    classify, inspect, FolderReport, FolderStatus, FolderWarning, LEGACY_REGION_EXTENSION, MODERN_REGION_EXTENSION,
};
pub use regions::{list_regions, RegionPos, REGION_BLOCKS};
pub use resolver::{available_dimensions, is_world_root, resolve, resolve_blocking_task, ResolveError, ResolvedWorld};
pub use saves::{default_saves_dir, list_worlds};
