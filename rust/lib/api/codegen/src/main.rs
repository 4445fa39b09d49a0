//! `aemgen`: generate an AEM component from a JSON field list.
//!
//! Writes the authoring dialog, the Sling Model and the HTL script, or
//! prints them as one JSON record with `--json`.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use aemgen_codegen_lib::{generate, generate_parallel, ComponentConfig, Outcome};

/// Exit code when the request needs clarification rather than fixing.
const EXIT_CLARIFICATION: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "aemgen")]
#[command(about = "Generate an AEM component (dialog, Sling Model, HTL) from a field list")]
struct Cli {
    /// Request JSON file (`{"fields": [...], "tabs": [...]}`).
    #[arg(short, long)]
    input: PathBuf,

    /// Component config (TOML). A missing file means defaults.
    #[arg(short, long, default_value = "aemgen.toml")]
    config: PathBuf,

    /// Component name; overrides `name` from the config file.
    #[arg(short, long)]
    name: Option<String>,

    /// Component folder to write into.
    #[arg(short, long, required_unless_present = "json", conflicts_with = "json")]
    output: Option<PathBuf>,

    /// Print the generated files as JSON instead of writing them.
    #[arg(long)]
    json: bool,

    /// Run the three emitters on separate threads.
    #[arg(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut component = ComponentConfig::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    if let Some(name) = cli.name {
        component.name = name;
    }

    info!("Reading request from {}", cli.input.display());
    let request = output::load_request(&cli.input)?;

    let outcome = if cli.parallel {
        generate_parallel(&request, &component)
    } else {
        generate(&request, &component)
    };

    match outcome {
        Outcome::Success(generated) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else if let Some(dir) = &cli.output {
                let written = output::write_component(dir, &generated)?;
                for path in &written {
                    info!("wrote {}", path.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::NeedsClarification(question) => {
            eprintln!("clarification needed: {question}");
            Ok(ExitCode::from(EXIT_CLARIFICATION))
        }
        Outcome::StructuralError(e) => bail!("[{}] {e}", e.error_code()),
    }
}
