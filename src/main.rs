use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ies_rescale::{IesValidate, ParserConfig, PhotometricProfile, RescaleMode, ValidationConfig};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ies_rescale")]
#[command(about = "Rescale IESNA LM-63 photometric profiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use the strict parser limits (no external TILT files)
    #[arg(long, global = true, conflicts_with = "permissive")]
    strict: bool,

    /// Use the permissive parser limits
    #[arg(long, global = true)]
    permissive: bool,

    /// Directory relative TILT file names are resolved against
    #[arg(long, global = true)]
    tilt_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rescale a profile into a narrower illumination cone
    Rescale {
        /// Profile to read
        input: PathBuf,

        /// Profile to write
        output: PathBuf,

        /// Cone angle in degrees, 0 to 180 (180 leaves the profile unchanged)
        #[arg(short, long, allow_hyphen_values = true)]
        cone_angle: f32,

        /// Keep candela magnitudes instead of the distribution's outline
        #[arg(long)]
        preserve_intensity: bool,
    },

    /// Print a summary of a profile
    #[command(visible_alias = "i")]
    Info {
        input: PathBuf,

        /// Also require the keywords mandatory for LM-63-2002
        #[arg(long)]
        strict_validation: bool,
    },

    /// Dump a profile as JSON
    Json {
        input: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn parser_config(&self) -> ParserConfig {
        let config = if self.strict {
            ParserConfig::strict()
        } else if self.permissive {
            ParserConfig::permissive()
        } else {
            ParserConfig::default()
        };

        match &self.tilt_dir {
            Some(dir) => config.with_tilt_base_dir(dir),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "ies_rescale=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.parser_config();

    match &cli.command {
        Commands::Rescale {
            input,
            output,
            cone_angle,
            preserve_intensity,
        } => rescale(input, output, *cone_angle, (*preserve_intensity).into(), &config),
        Commands::Info {
            input,
            strict_validation,
        } => print_info(input, *strict_validation, &config),
        Commands::Json { input, output } => dump_json(input, output.as_deref(), &config),
    }
}

fn load(input: &Path, config: &ParserConfig) -> Result<PhotometricProfile> {
    PhotometricProfile::from_path_with_config(input, config)
        .with_context(|| format!("Failed to read profile {}", input.display()))
}

fn rescale(
    input: &Path,
    output: &Path,
    cone_angle: f32,
    mode: RescaleMode,
    config: &ParserConfig,
) -> Result<()> {
    if output.as_os_str().is_empty() {
        bail!("Output path is empty");
    }

    let profile = load(input, config)?;
    let scaled = profile
        .rescale(cone_angle, mode)
        .context("Rescale failed")?;
    scaled
        .write_to_path(output)
        .with_context(|| format!("Failed to write profile {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        cone_angle,
        ?mode,
        "rescaled profile"
    );
    Ok(())
}

fn print_info(input: &Path, strict_validation: bool, config: &ParserConfig) -> Result<()> {
    let profile = load(input, config)?;
    let photo = &profile.photo;

    println!("File:              {}", profile.file.name);
    println!("Format:            {}", profile.file.format);
    println!("Labels:            {}", profile.labels.len());
    for (keyword, value) in profile.keywords() {
        println!("  [{}] {}", keyword, value);
    }
    println!(
        "Lamps:             {} x {} lm",
        profile.lamp.num_lamps, profile.lamp.lumens_per_lamp
    );
    match &profile.lamp.tilt {
        Some(tilt) => println!(
            "TILT:              {} ({:?}, {} pairs)",
            profile.lamp.tilt_file_name, tilt.orientation, tilt.num_pairs
        ),
        None => println!("TILT:              none"),
    }
    println!("Goniometer:        {:?}", photo.goniometer_type);
    println!("Units:             {:?}", profile.units);
    println!(
        "Angles:            {} vertical x {} horizontal",
        photo.num_vert_angles, photo.num_horz_angles
    );
    if let (Some(first), Some(last)) = (photo.vert_angles.first(), photo.vert_angles.last()) {
        println!("Vertical range:    {} to {}", first, last);
    }
    println!("Peak candela:      {}", photo.max_candela());

    let validation = if strict_validation {
        ValidationConfig::strict()
    } else {
        ValidationConfig::default()
    };
    match profile.validate(&validation) {
        Ok(()) => println!("Validation:        ok"),
        Err(e) => println!("Validation:        {} ({})", e, e.suggested_action()),
    }
    Ok(())
}

fn dump_json(input: &Path, output: Option<&Path>, config: &ParserConfig) -> Result<()> {
    let profile = load(input, config)?;
    let json = serde_json::to_string_pretty(&profile).context("Failed to encode profile as JSON")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote JSON");
        },
        None => println!("{}", json),
    }
    Ok(())
}
