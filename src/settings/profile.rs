//! Render profile persistence.
//!
//! Saves and loads a [`RenderConfig`] as a small versioned JSON file so a
//! render profile can be shared between runs and tools.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::render_config::RenderConfig;

const PROFILE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ProfileFile {
    /// Format version for forward compatibility
    version: u32,
    render: RenderConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("profile version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub fn save_profile(config: &RenderConfig, path: &Path) -> Result<(), ProfileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let profile = ProfileFile {
        version: PROFILE_VERSION,
        render: config.clone(),
    };
    serde_json::to_writer_pretty(&mut writer, &profile)?;
    writer.flush()?;
    log::debug!("Saved render profile {:016x} to {}", config.fingerprint(), path.display());
    Ok(())
}

pub fn load_profile(path: &Path) -> Result<RenderConfig, ProfileError> {
    let file = File::open(path)?;
    let profile: ProfileFile = serde_json::from_reader(BufReader::new(file))?;

    if profile.version > PROFILE_VERSION {
        return Err(ProfileError::UnsupportedVersion {
            found: profile.version,
            supported: PROFILE_VERSION,
        });
    }

    log::debug!(
        "Loaded render profile {:016x} from {}",
        profile.render.fingerprint(),
        path.display()
    );
    Ok(profile.render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{FormatVersion, PaletteId, Shading};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let config = RenderConfig::builder()
            .z_range(-1024, 1023)
            .block_palette(FormatVersion::V1_13, PaletteId::new("ocean_ground"))
            .shading(Shading::Heightmap)
            .build();
        save_profile(&config, &path).unwrap();

        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.fingerprint(), config.fingerprint());
    }

    #[test]
    fn test_rejects_newer_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        std::fs::write(&path, r#"{"version": 99, "render": {}}"#).unwrap();

        match load_profile(&path) {
            Err(ProfileError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 99);
                assert_eq!(supported, PROFILE_VERSION);
            }
            other => panic!("expected version error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_profile(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ProfileError::Io(_))));
    }
}
