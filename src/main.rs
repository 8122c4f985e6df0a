use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use update_versions::cli::orchestration::{run_post_release, run_pre_release, ReleaseArgs};
use update_versions::config;
use update_versions::ui;
use update_versions::UpdateVersionsError;

#[derive(Parser)]
#[command(
    name = "update-versions",
    version,
    about = "Update project version strings before and after a release"
)]
struct Cli {
    #[arg(long, global = true, default_value = ".", help = "Project root directory")]
    root: PathBuf,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Preview what would change without writing files")]
    dry_run: bool,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update package versions BEFORE release.
    ///
    /// Usage: update-versions pre-release --new-version 1.29.0
    PreRelease {
        #[arg(long, help = "New version to release")]
        new_version: String,
    },

    /// Update package versions AFTER release.
    ///
    /// Usage: update-versions post-release --new-version 1.29.0
    PostRelease {
        #[arg(long, help = "New version that was released")]
        new_version: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&e.to_string());
            let code = e
                .downcast_ref::<UpdateVersionsError>()
                .map_or(1, UpdateVersionsError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(&cli.root, cli.config.as_deref())?;

    let (new_version, post_release) = match cli.command {
        Commands::PreRelease { new_version } => (new_version, false),
        Commands::PostRelease { new_version } => (new_version, true),
    };
    let args = ReleaseArgs {
        root: cli.root,
        new_version,
        dry_run: cli.dry_run,
    };

    let report = if post_release {
        run_post_release(&args, &config)?
    } else {
        run_pre_release(&args, &config)?
    };

    ui::display_status(&format!("Current version: {}", report.current_version));
    ui::display_version_change(&report.current_version, &report.new_version);
    if report.dry_run {
        ui::display_status("Dry run: no files were written");
    }
    ui::display_report(&report, &args.root);

    Ok(())
}
