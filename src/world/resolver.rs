//! Turns a user-supplied path into the region folder to render.
//!
//! A path is either a world root (it contains [`LEVEL_MARKER`]) whose
//! dimensions are probed in [`Dimension::PROBE_ORDER`], or it is taken to be a
//! region folder already. All filesystem access is blocking; use
//! [`resolve_blocking_task`] to keep it off an async executor.

use std::path::{Path, PathBuf};

use super::chooser::DimensionChooser;
use super::dimension::{Dimension, LEVEL_MARKER};

/// Result of a successful resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWorld {
    root_path: PathBuf,
    dimension: Option<Dimension>,
    region_folder: PathBuf,
}

impl ResolvedWorld {
    /// The path exactly as the caller supplied it
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// `None` when the supplied path was already a region folder
    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    pub fn region_folder(&self) -> &Path {
        &self.region_folder
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("world at {} has no dimension region folders", .0.display())]
    NoDimensionsFound(PathBuf),
    #[error("dimension selection was cancelled")]
    SelectionCancelled,
    #[error("resolution task failed: {0}")]
    Worker(String),
}

impl ResolveError {
    /// Stable category name for presentation layers
    pub fn category(&self) -> &'static str {
        match self {
            ResolveError::PathNotFound(_) => "path_not_found",
            ResolveError::NotADirectory(_) => "not_a_directory",
            ResolveError::NoDimensionsFound(_) => "no_dimensions_found",
            ResolveError::SelectionCancelled => "selection_cancelled",
            ResolveError::Worker(_) => "worker_failed",
        }
    }
}

pub fn is_world_root(path: &Path) -> bool {
    path.join(LEVEL_MARKER).exists()
}

/// Dimensions whose region folder exists under `world_root`, in probe order.
pub fn available_dimensions(world_root: &Path) -> Vec<Dimension> {
    Dimension::PROBE_ORDER
        .into_iter()
        .filter(|d| d.region_folder_in(world_root).is_dir())
        .collect()
}

/// Resolve `path` to a region folder.
///
/// The chooser is consulted only when a world root has more than one
/// dimension. A declined choice, or an answer that is not one of the
/// candidates, yields [`ResolveError::SelectionCancelled`].
pub fn resolve<C>(path: &Path, chooser: &mut C) -> Result<ResolvedWorld, ResolveError>
where
    C: DimensionChooser + ?Sized,
{
    if !path.exists() {
        return Err(ResolveError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ResolveError::NotADirectory(path.to_path_buf()));
    }

    if !is_world_root(path) {
        log::debug!("No {} in {}, treating it as a region folder", LEVEL_MARKER, path.display());
        return Ok(ResolvedWorld {
            root_path: path.to_path_buf(),
            dimension: None,
            region_folder: path.to_path_buf(),
        });
    }

    let candidates = available_dimensions(path);
    log::debug!("World {} has dimensions {:?}", path.display(), candidates);

    let dimension = match candidates.as_slice() {
        [] => return Err(ResolveError::NoDimensionsFound(path.to_path_buf())),
        [only] => *only,
        _ => match chooser.choose(&candidates) {
            Some(chosen) if candidates.contains(&chosen) => chosen,
            Some(chosen) => {
                log::warn!("Chooser picked unavailable dimension {}", chosen);
                return Err(ResolveError::SelectionCancelled);
            }
            None => return Err(ResolveError::SelectionCancelled),
        },
    };

    let region_folder = dimension.region_folder_in(path);
    log::info!("Resolved {} to {} ({})", path.display(), region_folder.display(), dimension);

    Ok(ResolvedWorld {
        root_path: path.to_path_buf(),
        dimension: Some(dimension),
        region_folder,
    })
}

/// Run [`resolve`] on tokio's blocking pool.
///
/// Dropping the returned future does not stop the worker. A worker waiting on
/// a [`ChannelChooser`](super::ChannelChooser) stays parked until its
/// [`ChoiceRequest`](super::ChoiceRequest) is answered or dropped, so a caller
/// that gives up should also drop the request receiver.
pub async fn resolve_blocking_task<C>(path: PathBuf, mut chooser: C) -> Result<ResolvedWorld, ResolveError>
where
    C: DimensionChooser + Send + 'static,
{
    tokio::task::spawn_blocking(move || resolve(&path, &mut chooser))
        .await
        .map_err(|e| ResolveError::Worker(e.to_string()))?
}
