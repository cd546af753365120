use anyhow::{Context, Result, bail};
use clap::Parser;
use keep_anyblock_config::Config;
use keep_anyblock_engine::{
    ConvertOptions, Mode, UuidGenerator, ensure_output_dir, export_notes, ingest_notes,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Convert a Google Keep export into files Anytype can import.
#[derive(Debug, Parser)]
#[command(name = "keep-anyblock", version, about)]
struct Cli {
    /// Directory holding the Keep `.json` export files
    #[arg(short, long)]
    path: PathBuf,

    /// Directory to write the converted files to
    #[arg(short, long)]
    output: PathBuf,

    /// `pages` turns every note into a page; `mixed` only titled ones [default: mixed]
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Convert archived notes too
    #[arg(long, alias = "includeArchive")]
    include_archive: bool,

    /// Tag id attached to every converted object
    #[arg(long, env = "TAG_ID")]
    tag_id: Option<String>,

    /// Config file [default: ~/.config/keep-anyblock/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip notes that fail validation instead of aborting the run
    #[arg(long)]
    skip_invalid: bool,
}

/// Fully resolved run settings: flags, then environment, then config file.
#[derive(Debug)]
struct Settings {
    input: PathBuf,
    output: PathBuf,
    options: ConvertOptions,
    include_archive: bool,
    skip_invalid: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    converted: usize,
    skipped_archived: usize,
    failed: usize,
}

impl Cli {
    fn resolve(self, config: Config) -> Result<Settings> {
        let mode = match (self.mode, config.mode.as_deref()) {
            (Some(mode), _) => mode,
            (None, Some(mode)) => mode.parse().context("Invalid mode in config file")?,
            (None, None) => Mode::default(),
        };
        let tag_id = self.tag_id.filter(|tag| !tag.is_empty()).or(config.tag_id);

        Ok(Settings {
            input: self.path,
            output: self.output,
            options: ConvertOptions { mode, tag_id },
            include_archive: self.include_archive || config.include_archive,
            skip_invalid: self.skip_invalid,
        })
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Config::load_from_path(path)?
        }
        None => Config::load()?,
    };
    Ok(config.unwrap_or_default())
}

fn check_distinct(input: &Path, output: &Path) -> Result<()> {
    let same = input == output
        || matches!(
            (input.canonicalize(), output.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        bail!("path and output cannot be the same: {}", input.display());
    }
    Ok(())
}

fn run(settings: &Settings) -> Result<Summary> {
    check_distinct(&settings.input, &settings.output)?;

    let ingested = ingest_notes(&settings.input, settings.include_archive)
        .with_context(|| format!("Failed to read notes from {}", settings.input.display()))?;

    if !ingested.failures.is_empty() {
        for failure in &ingested.failures {
            if settings.skip_invalid {
                log::warn!("Skipping: {failure}");
            } else {
                log::error!("{failure}");
            }
        }
        if !settings.skip_invalid {
            bail!(
                "{} file(s) failed validation, nothing was converted (use --skip-invalid to convert the rest)",
                ingested.failures.len()
            );
        }
    }

    for path in &ingested.skipped_archived {
        log::debug!("Skipping archived note {}", path.display());
    }

    if ensure_output_dir(&settings.output)? {
        log::info!("Directory created: {}", settings.output.display());
    }

    let report = export_notes(
        &ingested.notes,
        &settings.options,
        &settings.output,
        &mut UuidGenerator,
    );

    for exported in &report.exported {
        log::info!(
            "Converted {} to {} -> {}",
            exported.source_path.display(),
            exported.object_type,
            exported.target.display()
        );
    }
    for failure in &report.failures {
        log::error!("{failure}");
    }

    Ok(Summary {
        converted: report.exported.len(),
        skipped_archived: ingested.skipped_archived.len(),
        failed: report.failures.len() + ingested.failures.len(),
    })
}

fn main() -> ExitCode {
    // TAG_ID may come from a .env file next to the export
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = load_config(cli.config.as_deref())
        .and_then(|config| cli.resolve(config))
        .and_then(|settings| {
            log::info!(
                "Converting {} into {} ({} mode)",
                settings.input.display(),
                settings.output.display(),
                settings.options.mode
            );
            run(&settings)
        });

    match result {
        Ok(summary) => {
            log::info!(
                "Done: {} converted, {} archived skipped, {} failed",
                summary.converted,
                summary.skipped_archived,
                summary.failed
            );
            if summary.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
