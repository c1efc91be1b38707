use asset_variants::{config, logging, markup, output, pipeline};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags for the default transcoding run.
#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Transcode every source image, not just the manifest entries
    #[arg(long)]
    all: bool,

    /// Delete source images the selection does not use (irreversible)
    #[arg(long)]
    prune_unused: bool,
}

#[derive(Parser)]
#[command(name = "asset-variants")]
#[command(version)]
#[command(about = "Transcode website images into responsive JPEG and WebP variants")]
#[command(long_about = "\
Transcode website images into responsive JPEG and WebP variants

Reads the image manifest, checks every entry exists in the source directory,
empties the output directory, and writes eight variants per selected image:

  images/
  ├── hero.jpg                     # Source (listed in image-manifest.json)
  ├── unused.png                   # Source nobody references
  └── optimized/
      ├── jpg/
      │   ├── hero.jpg             # Full size, quality 80
      │   ├── hero-480w.jpg        # Responsive widths, quality 78
      │   ├── hero-768w.jpg
      │   └── hero-1200w.jpg
      └── webp/
          ├── hero.webp
          └── hero-{480,768,1200}w.webp

Sources are never enlarged. Unused sources are always reported and deleted
only with --prune-unused.

Run 'asset-variants gen-config' to generate a documented config file.")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Source image directory (overrides config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Manifest file (overrides config)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Report unused source images without writing or deleting anything
    Audit {
        /// Treat every source image as selected
        #[arg(long)]
        all: bool,
    },
    /// Print <picture> markup for one source image
    Markup {
        /// Source file name, e.g. hero.jpg
        file: String,

        /// Alt text
        #[arg(long, default_value = "")]
        alt: String,

        /// Sizes hint (defaults to markup.sizes from config)
        #[arg(long)]
        sizes: Option<String>,

        /// Print the structured description as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Image pipeline failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = load_effective_config(&cli)?;
    let mut options = pipeline::RunOptions::from_config(&config);

    match cli.command {
        None => {
            options.all_sources = cli.run.all;
            options.prune_unused = cli.run.prune_unused;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = pipeline::run(&options, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_run_summary(&result?);
        }
        Some(Command::Audit { all }) => {
            options.all_sources = all;
            output::print_audit(&pipeline::audit(&options)?);
        }
        Some(Command::Markup {
            file,
            alt,
            sizes,
            json,
        }) => {
            let sizes = sizes.unwrap_or(config.markup.sizes);
            let picture =
                markup::build_picture(&file, &alt, Some(&sizes), &config.markup.url_prefix);
            if json {
                println!("{}", serde_json::to_string_pretty(&picture)?);
            } else {
                println!("{}", picture.to_markup().into_string());
            }
        }
        Some(Command::GenConfig) => {}
    }

    Ok(())
}

/// Stock defaults, then the config file, then command-line path flags.
fn load_effective_config(cli: &Cli) -> Result<config::PipelineConfig, config::ConfigError> {
    let stock = config::stock_defaults_value()?;
    let base = match config::load_raw_config(&cli.config)? {
        Some(file) => config::merge_toml(stock, file),
        None => stock,
    };
    config::resolve_config(base, Some(path_overrides(cli)))
}

fn path_overrides(cli: &Cli) -> toml::Value {
    let mut paths = toml::Table::new();
    let flags = [
        ("source_dir", &cli.source),
        ("manifest", &cli.manifest),
        ("output_dir", &cli.output),
    ];
    for (key, value) in flags {
        if let Some(path) = value {
            paths.insert(
                key.to_string(),
                toml::Value::String(path.to_string_lossy().into_owned()),
            );
        }
    }
    let mut root = toml::Table::new();
    root.insert("paths".to_string(), toml::Value::Table(paths));
    toml::Value::Table(root)
}
