use autonav::config::{self, OutputFormat};
use autonav::{generate, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autonav")]
#[command(version)]
#[command(about = "Generate site navigation from a directory of markdown pages")]
#[command(long_about = "\
Generate site navigation from a directory of markdown pages

The directory layout is the navigation. Directories become branches, pages
become leaves titled after their first `# ` heading (or their filename).

Site structure:

  site/
  ├── autonav.toml            # Generator config (optional)
  ├── _data/navigation.yml    # Output (reserved dir, never scanned)
  ├── _layouts/               # Reserved top-level dir: skipped
  ├── index.md                # → /
  ├── about.md                # → /about.html, title \"About\" if no heading
  └── guides/
      ├── index.md            # → /guides/
      ├── _drafts/wip.md      # Listed under \"guides\"
      └── setup/
          └── install.md      # → /guides/setup/install.html

Run 'autonav gen-config' to print a documented autonav.toml.")]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Log debug details (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the site and write the navigation file
    Generate {
        /// Output path, relative to the site root (overrides config)
        #[arg(long)]
        output: Option<String>,
        /// Output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Scan the site and print the navigation tree without writing it
    Check,
    /// Print a stock autonav.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate {
            output: output_override,
            format,
        } => {
            let mut nav_config = config::load_config(&cli.source)?;
            if let Some(path) = output_override {
                nav_config.output = path;
            }
            if let Some(format) = format {
                nav_config.format = format;
            }
            nav_config.validate()?;
            init_thread_pool(&nav_config.processing);

            let result = generate::generate(&cli.source, &nav_config)?;
            output::print_generate_output(&result, &cli.source);
        }
        Command::Check => {
            let nav_config = config::load_config(&cli.source)?;
            init_thread_pool(&nav_config.processing);

            println!("==> Checking {}", cli.source.display());
            let navigation = generate::build(&cli.source, &nav_config)?;
            output::print_check_output(&navigation);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr; `info` by default, `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
