//! Advisory classification of a region folder before rendering starts.
//!
//! Nothing here blocks the pipeline: a folder that cannot be listed is
//! reported as usable together with a [`FolderWarning::ListingFailed`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix of region files in the current (anvil) format.
pub const MODERN_REGION_EXTENSION: &str = "mca";
/// Suffix of region files in the superseded format.
pub const LEGACY_REGION_EXTENSION: &str = "mcr";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FolderStatus {
    /// At least one modern region file
    Usable,
    /// Neither modern nor legacy region files
    EmptyOrNoRegionFiles,
    /// Only legacy region files; the world needs converting first
    LegacyFormatOnly,
    DoesNotExist,
    NotADirectory,
}

impl FolderStatus {
    pub fn category(&self) -> &'static str {
        match self {
            FolderStatus::Usable => "usable",
            FolderStatus::EmptyOrNoRegionFiles => "empty",
            FolderStatus::LegacyFormatOnly => "legacy_format_only",
            FolderStatus::DoesNotExist => "does_not_exist",
            FolderStatus::NotADirectory => "not_a_directory",
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, FolderStatus::Usable)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FolderWarning {
    #[error("could not list {}: {error}", .path.display())]
    ListingFailed { path: PathBuf, error: io::Error },
}

impl FolderWarning {
    pub fn category(&self) -> &'static str {
        match self {
            FolderWarning::ListingFailed { .. } => "listing_failed",
        }
    }
}

/// Outcome of inspecting a region folder.
#[derive(Debug)]
pub struct FolderReport {
    pub status: FolderStatus,
    pub modern_files: usize,
    pub legacy_files: usize,
    pub warnings: Vec<FolderWarning>,
}

impl FolderReport {
    fn bare(status: FolderStatus) -> Self {
        Self {
            status,
            modern_files: 0,
            legacy_files: 0,
            warnings: Vec::new(),
        }
    }

    fn listing_failed(path: &Path, error: io::Error, modern_files: usize, legacy_files: usize) -> Self {
        log::warn!("Could not read content of the folder {}: {}", path.display(), error);
        Self {
            status: FolderStatus::Usable,
            modern_files,
            legacy_files,
            warnings: vec![FolderWarning::ListingFailed {
                path: path.to_path_buf(),
                error,
            }],
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// List the folder once and classify it by region file suffix.
pub fn inspect(path: &Path) -> FolderReport {
    if !path.exists() {
        return FolderReport::bare(FolderStatus::DoesNotExist);
    }
    if !path.is_dir() {
        return FolderReport::bare(FolderStatus::NotADirectory);
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => return FolderReport::listing_failed(path, e, 0, 0),
    };

    let mut modern_files = 0;
    let mut legacy_files = 0;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return FolderReport::listing_failed(path, e, modern_files, legacy_files),
        };
        let entry_path = entry.path();
        if has_extension(&entry_path, MODERN_REGION_EXTENSION) {
            modern_files += 1;
        } else if has_extension(&entry_path, LEGACY_REGION_EXTENSION) {
            legacy_files += 1;
        }
    }

    let status = if modern_files > 0 {
        FolderStatus::Usable
    } else if legacy_files > 0 {
        FolderStatus::LegacyFormatOnly
    } else {
        FolderStatus::EmptyOrNoRegionFiles
    };
    log::debug!(
        "{}: {} modern, {} legacy region files -> {}",
        path.display(),
        modern_files,
        legacy_files,
        status.category()
    );

    FolderReport {
        status,
        modern_files,
        legacy_files,
        warnings: Vec::new(),
    }
}

pub fn classify(path: &Path) -> FolderStatus {
    inspect(path).status
}
