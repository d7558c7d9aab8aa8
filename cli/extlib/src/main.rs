//! extlib — resolve and stage precompiled external libraries for a build.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::OutputFormat;
use manifest::{ExtlibManifest, MANIFEST_FILE};

#[derive(Parser)]
#[command(name = "extlib", version, about = "Link against precompiled external libraries")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter extlib.toml in the current directory
    Init {
        /// Module name
        name: String,
    },
    /// List supported platforms and configuration suffixes
    Platforms,
    /// Show resolved paths and artifact names for a library (no filesystem changes)
    Resolve {
        /// Library identifier as declared in extlib.toml
        library: String,
        /// Target platform (Win32, Win64)
        #[arg(long)]
        platform: Option<String>,
        /// Build configuration (Debug, DebugGame, Development, Test, Shipping)
        #[arg(long)]
        configuration: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Resolve libraries and copy runtime artifacts into the binaries directory
    Stage {
        /// Target platform (Win32, Win64)
        #[arg(long)]
        platform: Option<String>,
        /// Build configuration (Debug, DebugGame, Development, Test, Shipping)
        #[arg(long)]
        configuration: Option<String>,
        /// Only stage this library
        #[arg(long)]
        library: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check environment variables and installation directories
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&cwd, &name),

        Commands::Platforms => commands::platforms::list(),

        Commands::Resolve {
            library,
            platform,
            configuration,
            format,
        } => {
            let (manifest, _) = load_manifest_required(&cwd)?;
            let target =
                manifest.target_descriptor(platform.as_deref(), configuration.as_deref())?;
            commands::resolve::run(&manifest, &library, target, format)
        }

        Commands::Stage {
            platform,
            configuration,
            library,
            format,
        } => {
            let (manifest, module_dir) = load_manifest_required(&cwd)?;
            let target =
                manifest.target_descriptor(platform.as_deref(), configuration.as_deref())?;
            commands::stage::run(&module_dir, &manifest, target, library.as_deref(), format)
        }

        Commands::Doctor => commands::doctor::run(&cwd),
    }
}

/// Load manifest, returning error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(ExtlibManifest, PathBuf)> {
    match ExtlibManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no {MANIFEST_FILE} found (run `extlib init` first)"),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;

    use clap::CommandFactory;
    use extlib_stage::InstallRoots;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_stage_arguments() {
        let cli = Cli::parse_from([
            "extlib",
            "-vv",
            "stage",
            "--platform",
            "Win32",
            "--configuration",
            "DebugGame",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Stage {
                platform,
                configuration,
                library,
                format,
            } => {
                assert_eq!(platform.as_deref(), Some("Win32"));
                assert_eq!(configuration.as_deref(), Some("DebugGame"));
                assert!(library.is_none());
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected stage"),
        }
    }

    /// Full workflow: init → resolve → stage → stage again.
    #[test]
    fn init_resolve_stage_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let module_dir = dir.path().join("proj/Source/ExternalLibraries");
        fs::create_dir_all(&module_dir).unwrap();

        let install = dir.path().join("planet");
        fs::create_dir_all(install.join("include")).unwrap();
        fs::create_dir_all(install.join("lib")).unwrap();
        fs::write(install.join("lib/PlanetLibrary64Release.dll"), b"release dll").unwrap();
        let boost = dir.path().join("boost");
        fs::create_dir_all(&boost).unwrap();

        // 1. Init
        commands::init::run(&module_dir, "HexPlanet").unwrap();
        let (manifest, found) = load_manifest_required(&module_dir).unwrap();
        assert_eq!(found, module_dir);

        let roots = InstallRoots::from_pairs([
            ("PLANET_LIB_ROOT", install.clone()),
            ("BOOST_ROOT", boost.clone()),
        ]);
        let target = manifest.target_descriptor(None, None).unwrap();

        // 2. Resolve — nothing staged yet
        commands::resolve::execute(&manifest, &roots, "PlanetLibrary", target).unwrap();
        assert!(!dir.path().join("proj/Binaries").exists());

        // 3. Stage
        let plans =
            commands::stage::execute(&module_dir, &manifest, roots.clone(), target, None).unwrap();
        let staged = dir.path().join("proj/Binaries/Win64/PlanetLibrary64Release.dll");
        assert!(staged.is_file());
        assert_eq!(plans.len(), 2);

        // 4. Stage again — same end state
        fs::write(install.join("lib/PlanetLibrary64Release.dll"), b"rebuilt dll").unwrap();
        let again =
            commands::stage::execute(&module_dir, &manifest, roots, target, None).unwrap();
        assert_eq!(plans, again);
        assert_eq!(fs::read(&staged).unwrap(), b"rebuilt dll");
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest_required(dir.path());
        // A stray extlib.toml above the temp dir would be found instead.
        if let Err(e) = err {
            assert!(e.to_string().contains("run `extlib init` first"));
        }
    }
}
