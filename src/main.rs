use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use world_mapper::render::{export_region_overview, OverviewError};
use world_mapper::settings::{self, BlockPalettes, PaletteId, ProfileError, RenderConfig, RenderConfigBuilder, Shading};
use world_mapper::world::{self, Dimension, DimensionChooser, FolderReport, FolderStatus, Preferred, ResolveError};

#[derive(Parser, Debug)]
#[command(name = "world_mapper")]
#[command(about = "Resolve a world save to a region folder and prepare a map render")]
struct Args {
    /// World folder or region folder (lists local saves if omitted)
    path: Option<PathBuf>,

    /// Dimension to use when the world has several (overworld, nether, end)
    #[arg(short, long)]
    dimension: Option<Dimension>,

    /// Load the render profile from a JSON file
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the effective render profile to a JSON file
    #[arg(long)]
    save_profile: Option<PathBuf>,

    /// Built-in block palette for every format version
    #[arg(long)]
    block_palette: Option<String>,

    /// Built-in biome palette
    #[arg(long)]
    biome_palette: Option<String>,

    /// Shading mode (flat, relief, biomes, heightmap)
    #[arg(long)]
    shading: Option<Shading>,

    #[arg(long, allow_negative_numbers = true)]
    min_x: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    max_x: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    min_y: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    max_y: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    min_z: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    max_z: Option<i32>,

    /// Write a region coverage overview PNG
    #[arg(long)]
    overview: Option<PathBuf>,

    /// Pixels per region in the overview (1-32)
    #[arg(long, default_value = "4")]
    overview_scale: u32,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Overview(#[from] OverviewError),
    #[error("unknown {kind} palette '{name}'")]
    UnknownPalette { kind: &'static str, name: String },
    #[error("could not list {}: {error}", .path.display())]
    Listing { path: PathBuf, error: io::Error },
}

impl CliError {
    fn category(&self) -> &'static str {
        match self {
            CliError::Resolve(e) => e.category(),
            CliError::Profile(_) => "profile",
            CliError::Overview(_) => "overview",
            CliError::UnknownPalette { .. } => "unknown_palette",
            CliError::Listing { .. } => "listing_failed",
        }
    }
}

/// Asks on the terminal. An empty answer or end of input cancels.
struct PromptChooser;

impl DimensionChooser for PromptChooser {
    fn choose(&mut self, candidates: &[Dimension]) -> Option<Dimension> {
        println!("Select dimension:");
        for (i, d) in candidates.iter().enumerate() {
            println!("  {}) {}", i + 1, d);
        }
        print!("> ");
        io::stdout().flush().ok()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        let answer = line.trim();
        if let Ok(n) = answer.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| candidates.get(i)).copied();
        }
        answer.parse::<Dimension>().ok().filter(|d| candidates.contains(d))
    }
}

fn build_config(args: &Args) -> Result<RenderConfig, CliError> {
    let base = match &args.profile {
        Some(path) => {
            println!("Loading render profile: {}", path.display());
            settings::load_profile(path)?
        }
        None => RenderConfig::default(),
    };

    let mut builder = base.to_builder();
    if let Some(name) = &args.block_palette {
        let palette = PaletteId::builtin(name).ok_or_else(|| CliError::UnknownPalette {
            kind: "block",
            name: name.clone(),
        })?;
        builder = builder.block_palettes(BlockPalettes::uniform(palette));
    }
    if let Some(name) = &args.biome_palette {
        let palette = PaletteId::builtin_biome(name).ok_or_else(|| CliError::UnknownPalette {
            kind: "biome",
            name: name.clone(),
        })?;
        builder = builder.biome_palette(palette);
    }
    if let Some(shading) = args.shading {
        builder = builder.shading(shading);
    }

    let bounds: [(Option<i32>, fn(RenderConfigBuilder, i32) -> RenderConfigBuilder); 6] = [
        (args.min_x, RenderConfigBuilder::min_x),
        (args.max_x, RenderConfigBuilder::max_x),
        (args.min_y, RenderConfigBuilder::min_y),
        (args.max_y, RenderConfigBuilder::max_y),
        (args.min_z, RenderConfigBuilder::min_z),
        (args.max_z, RenderConfigBuilder::max_z),
    ];
    for (value, set) in bounds {
        if let Some(v) = value {
            builder = set(builder, v);
        }
    }

    Ok(builder.build())
}

fn list_local_saves() -> Result<(), CliError> {
    let Some(saves) = world::default_saves_dir() else {
        println!("No path given and no default saves directory could be determined.");
        return Ok(());
    };
    if !saves.is_dir() {
        println!("No path given and {} does not exist.", saves.display());
        return Ok(());
    }

    let worlds = world::list_worlds(&saves).map_err(|error| CliError::Listing {
        path: saves.clone(),
        error,
    })?;
    println!("Worlds in {}:", saves.display());
    for w in &worlds {
        println!("  {}", w.display());
    }
    if worlds.is_empty() {
        println!("  (none)");
    }
    Ok(())
}

/// Listing warnings never block: a folder that could not be fully listed
/// is still treated as usable.
fn proceeds_to_regions(report: &FolderReport) -> bool {
    report.status.is_usable()
}

/// Explains why the requested dimension was not the one resolved.
fn dimension_note(wanted: Option<Dimension>, got: Option<Dimension>) -> Option<String> {
    match (wanted?, got) {
        (wanted, Some(got)) if wanted != got => Some(format!(
            "{} is the only dimension in this world, using it instead of {}",
            got, wanted
        )),
        (wanted, None) => Some(format!("Path is a region folder, ignoring --dimension {}", wanted)),
        _ => None,
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(path) = args.path.clone() else {
        return list_local_saves();
    };

    let config = build_config(&args)?;
    println!("Render profile: {:016x} ({} shading)", config.fingerprint(), config.shading());
    if config.is_empty() {
        println!("  Bounding box is inverted; nothing will be rendered.");
    }
    if let Some(save_path) = &args.save_profile {
        settings::save_profile(&config, save_path)?;
        println!("Saved render profile to: {}", save_path.display());
    }

    println!("Resolving world: {}", path.display());
    let resolved = match args.dimension {
        Some(d) => world::resolve(&path, &mut Preferred(d))?,
        None if io::stdin().is_terminal() => world::resolve(&path, &mut PromptChooser)?,
        // Headless without a dimension flag: decline instead of guessing
        None => world::resolve(&path, &mut |_: &[Dimension]| -> Option<Dimension> { None })?,
    };
    if let Some(note) = dimension_note(args.dimension, resolved.dimension()) {
        println!("  {}", note);
    }
    match resolved.dimension() {
        Some(d) => println!("Region folder: {} ({})", resolved.region_folder().display(), d),
        None => println!("Region folder: {}", resolved.region_folder().display()),
    }

    let report = world::inspect(resolved.region_folder());
    for warning in &report.warnings {
        eprintln!("warning [{}]: {}", warning.category(), warning);
    }
    match report.status {
        FolderStatus::Usable => {}
        FolderStatus::LegacyFormatOnly => eprintln!(
            "warning [{}]: the folder only contains region files in the old format; \
             open the world in a newer version of the game to convert them",
            report.status.category()
        ),
        status => eprintln!(
            "warning [{}]: the folder does not seem to contain any usable files",
            status.category()
        ),
    }
    if !proceeds_to_regions(&report) {
        return Ok(());
    }

    let folder = resolved.region_folder();
    let regions = world::list_regions(folder).map_err(|error| CliError::Listing {
        path: folder.to_path_buf(),
        error,
    })?;
    let in_bounds = regions.iter().filter(|r| config.clip_region(**r).is_some()).count();
    println!("Regions: {} ({} inside the bounding box)", regions.len(), in_bounds);

    if let Some(overview_path) = &args.overview {
        let scale = args.overview_scale.clamp(1, 32);
        let (width, height) = export_region_overview(&regions, &config, scale, overview_path)?;
        println!("Exported overview to: {}", overview_path.display());
        println!("  Image size: {}x{} pixels", width, height);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use world_mapper::world::FolderWarning;

    #[test]
    fn test_listing_warning_does_not_stop_pipeline() {
        let report = FolderReport {
            status: FolderStatus::Usable,
            modern_files: 0,
            legacy_files: 0,
            warnings: vec![FolderWarning::ListingFailed {
                path: Path::new("region").to_path_buf(),
                error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            }],
        };
        assert!(proceeds_to_regions(&report));
    }

    #[test]
    fn test_dimension_note() {
        assert_eq!(dimension_note(None, Some(Dimension::End)), None);
        assert_eq!(dimension_note(Some(Dimension::End), Some(Dimension::End)), None);
        assert!(dimension_note(Some(Dimension::End), Some(Dimension::Overworld))
            .unwrap()
            .contains("only dimension"));
        assert!(dimension_note(Some(Dimension::Nether), None).unwrap().contains("region folder"));
    }

    #[test]
    fn test_unusable_folder_stops_pipeline() {
        let report = FolderReport {
            status: FolderStatus::LegacyFormatOnly,
            modern_files: 0,
            legacy_files: 3,
            warnings: Vec::new(),
        };
        assert!(!proceeds_to_regions(&report));
    }
}
