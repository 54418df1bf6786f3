//! Locating the game's default saves directory and the worlds inside it.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::resolver::is_world_root;

/// `.minecraft` directory for the given OS, using `var` to read environment
/// variables.
pub fn dot_minecraft_for<F>(os: &str, var: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match os {
        "windows" => var("APPDATA").map(|appdata| Path::new(&appdata).join(".minecraft")),
        "macos" => var("HOME").map(|home| {
            Path::new(&home)
                .join("Library")
                .join("Application Support")
                .join("minecraft")
        }),
        _ => var("HOME").map(|home| Path::new(&home).join(".minecraft")),
    }
}

/// The saves directory of the local installation, if the environment tells
/// us where it is. The directory itself may not exist.
pub fn default_saves_dir() -> Option<PathBuf> {
    dot_minecraft_for(env::consts::OS, |name| env::var(name).ok()).map(|dir| dir.join("saves"))
}

/// World roots directly inside `saves_dir`, sorted by path.
pub fn list_worlds(saves_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut worlds = Vec::new();
    for entry in fs::read_dir(saves_dir)? {
        let path = entry?.path();
        if path.is_dir() && is_world_root(&path) {
            worlds.push(path);
        }
    }
    worlds.sort();
    Ok(worlds)
}
