//! `typings` command line front end.
//!
//! ## Usage
//!
//! ```bash
//! typings typings --api user.api --dir web/src/services
//! typings -v typings --api user.api --filename api.d.ts --version-tag 1.4.0
//!
//! # as a goctl plugin: the invocation payload arrives on stdin
//! goctl api plugin -plugin typings="typings typings" -api user.api -dir web
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use typings::PluginPayload;
use typings_codegen::{DEFAULT_FILENAME, DEFAULT_TOOL, Emission, GeneratorOptions, emit, load_spec};

/// Generate TypeScript declarations from API descriptions
#[derive(Parser)]
#[command(name = "typings", version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a typings.d.ts file
    Typings {
        /// API description file (read from the goctl payload on stdin if omitted)
        #[arg(long, value_name = "FILE")]
        api: Option<PathBuf>,

        /// Output directory, created if missing [default: payload dir or .]
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Output file name (empty selects the default)
        #[arg(long, default_value = DEFAULT_FILENAME)]
        filename: String,

        /// Tool name written in the header comment
        #[arg(long, default_value = DEFAULT_TOOL)]
        tool: String,

        /// Version written in the header comment (defaults to info.version)
        #[arg(long, value_name = "V")]
        version_tag: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn,typings_codegen=info".to_string(),
            1 => "info,typings_schema=debug,typings_codegen=debug".to_string(),
            _ => "debug".to_string(),
        },
    };
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Typings {
            api,
            dir,
            filename,
            tool,
            version_tag,
        } => {
            let (api, payload_dir) = match api {
                Some(api) => (api, None),
                None => {
                    let payload = PluginPayload::from_reader(std::io::stdin().lock())
                        .context("failed to read goctl plugin payload from stdin")?;
                    let dir = payload.output_dir();
                    (payload.api_file_path, Some(dir))
                }
            };
            let dir = dir.or(payload_dir).unwrap_or_else(|| PathBuf::from("."));
            let filename = if filename.is_empty() {
                DEFAULT_FILENAME.to_string()
            } else {
                filename
            };

            tracing::debug!(api = %api.display(), dir = %dir.display(), "generating declarations");
            let source = std::fs::read_to_string(&api)
                .with_context(|| format!("failed to read {}", api.display()))?;
            let spec = load_spec(&source)
                .with_context(|| format!("failed to load {}", api.display()))?;

            let mut options = GeneratorOptions::default().with_tool(tool);
            if let Some(version) = version_tag {
                options = options.with_version(version);
            }

            match emit(&spec, &options, &dir, &filename)? {
                Emission::Written(path) => println!("{}", path.display()),
                Emission::Exists(_) | Emission::Empty => {}
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("typings: {err:#}");
            ExitCode::FAILURE
        }
    }
}
