//! examgen CLI - Curriculum-aware exam generation and validation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use examgen::models::{GenerateResponse, ValidateExamRequest};
use examgen::{BatchRunner, Config, ExamGenerator, GenerateRequest, InMemoryCatalog, ModuleCatalog};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "examgen")]
#[command(version)]
#[command(about = "Generate and validate curriculum-aligned exams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "examgen.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one exam from a JSON request
    Generate {
        /// Path to the generate request JSON file
        #[arg(short, long)]
        request: PathBuf,

        /// Write the response here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an exam JSON file
    Validate {
        /// Path to the exam (or `{"exam": ...}`) JSON file
        #[arg(short, long)]
        exam: PathBuf,
    },

    /// Generate one exam per line of a JSONL file
    Batch {
        /// Path to input requests JSONL file
        #[arg(short, long)]
        requests: PathBuf,

        /// Path to output JSONL file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List modules known to the catalog
    Modules,

    /// Validate configuration file
    CheckConfig,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn print_example_config() {
    let example = r#"# examgen configuration file

[catalog]
# Include the built-in demo module (module-1)
include_seed = true
# Catalog JSON files or directories of *.json files
# paths = ["${EXAMGEN_DATA}/catalog/"]
paths = []

[generation]
# Framework applied when a request does not name one
framework = "es"

[output]
pretty = true
stamp_created_at = false
"#;
    println!("{example}");
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_default(path).with_context(|| format!("Failed to load config from {:?}", path))
}

fn build_generator(config: &Config) -> Result<ExamGenerator<InMemoryCatalog>> {
    let framework = config.framework().context("Invalid generation settings")?;
    let catalog = InMemoryCatalog::from_config(config).context("Failed to load module catalog")?;
    Ok(ExamGenerator::new(catalog, framework).with_created_at(config.output.stamp_created_at))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Example => {
            print_example_config();
        }

        Commands::CheckConfig => {
            let config = Config::from_file(&cli.config)
                .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
            config.validate().context("Invalid configuration")?;

            info!("Configuration is valid");
            info!("  Framework: {}", config.generation.framework);
            info!(
                "  Catalog: seed {}, {} path(s)",
                if config.catalog.include_seed { "on" } else { "off" },
                config.catalog.paths.len()
            );
        }

        Commands::Modules => {
            let config = load_config(&cli.config)?;
            let catalog =
                InMemoryCatalog::from_config(&config).context("Failed to load module catalog")?;

            for module_id in catalog.module_ids() {
                let Some(context) = catalog.resolve(&module_id) else {
                    continue;
                };
                println!(
                    "{module_id}\t{} learning outcomes\t{} criteria\t{} questions",
                    context.learning_outcomes.len(),
                    context.assessment_criteria.len(),
                    context.available_questions.len()
                );
            }
        }

        Commands::Generate { request, output } => {
            let config = load_config(&cli.config)?;
            let generator = build_generator(&config)?;

            let payload: GenerateRequest = read_json(&request)?;
            let response = generator.generate(payload)?;
            let json = render(&response, config.output.pretty)?;

            match output {
                Some(path) => std::fs::write(&path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write {:?}", path))?,
                None => println!("{json}"),
            }

            if let GenerateResponse::Errors { errors } = &response {
                for error in errors {
                    eprintln!("  - {error}");
                }
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Validate { exam } => {
            let config = load_config(&cli.config)?;
            let generator = build_generator(&config)?;

            let payload: serde_json::Value = read_json(&exam)?;
            let request = ValidateExamRequest::from_payload(payload)
                .with_context(|| format!("Failed to parse exam in {:?}", exam))?;
            let response = generator.validate(&request);
            println!("{}", render(&response, config.output.pretty)?);

            if !response.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Batch { requests, output } => {
            let config = load_config(&cli.config)?;
            let generator = build_generator(&config)?;

            let requests_data = examgen::generation::load_requests(&requests)?;
            let stats = BatchRunner::new(&generator).run(requests_data, &output)?;

            println!("\n=== Batch Generation Complete ===");
            println!("Requests:    {}", stats.total_requests);
            println!("Generated:   {}", stats.total_generated);
            println!("Rejected:    {}", stats.total_rejected);
            println!("Success:     {:.1}%", stats.success_rate * 100.0);
            println!("Runtime:     {:.1}s", stats.runtime_secs);
            println!("Output:      {output:?}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
