//! CLI entrypoint for persona-bias
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use persona_bias_application::{
    AuditLogger, ExperimentProgress, NoAuditLogger, NoProgress, RunExperimentUseCase,
    RunScenarioUseCase,
};
use persona_bias_infrastructure::{
    ConfigLoader, FileConfig, JsonlAuditLogger, OpenAiGateway, ScenarioDataset,
};
use persona_bias_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting persona-bias");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_overrides(&mut config, &cli);

    // Fail fast: the whole dataset is validated before any scenario runs
    let Some(dataset_path) = config.experiment.dataset.clone() else {
        bail!("No dataset given. Pass a path or set `experiment.dataset` in the config.");
    };
    let dataset = ScenarioDataset::load(&dataset_path)?;

    let provider = config.provider_config()?;
    if provider.api_key.is_empty() {
        warn!(
            "No API key found in ${}; sending requests without authorization",
            config.provider.api_key_env
        );
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::new(provider).context("Failed to create gateway")?);
    let model = gateway.default_model().clone();

    let logger: Arc<dyn AuditLogger> = match &config.experiment.audit_log {
        Some(path) => match JsonlAuditLogger::new(path) {
            Some(logger) => {
                info!("Audit log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoAuditLogger),
        },
        None => Arc::new(NoAuditLogger),
    };

    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match on_interrupt(&token) {
                    Interrupt::Drain => eprintln!(
                        "\nInterrupted: finishing running scenarios, skipping the rest (Ctrl-C again to abort)"
                    ),
                    Interrupt::Abort => {
                        eprintln!("\nAborted");
                        std::process::exit(130);
                    }
                }
            }
        });
    }

    let params = config.experiment_params().with_limit(cli.limit);
    let runner = RunScenarioUseCase::new(gateway, model.clone()).with_logger(logger.clone());
    let use_case = RunExperimentUseCase::new(runner, params)
        .with_logger(logger)
        .with_cancellation(cancellation);

    if !cli.quiet && cli.output == OutputFormat::Text {
        println!();
        println!("+============================================================+");
        println!("|           persona-bias - Interrogation Game                |");
        println!("+============================================================+");
        println!();
        println!("Dataset: {} ({} scenarios)", dataset_path.display(), dataset.len());
        println!("Model:   {}", model);
        println!();
    }

    // stdout is reserved for the report
    let progress: Box<dyn ExperimentProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress::new())
    };

    let report = use_case
        .execute_with_progress(dataset.into_scenarios(), progress.as_ref())
        .await?;

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(&report, &model),
        OutputFormat::Json => ConsoleFormatter::format_json(&report, &model),
    };
    println!("{}", output);

    Ok(())
}

/// Command line flags win over every config source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(dataset) = &cli.dataset {
        config.experiment.dataset = Some(dataset.clone());
    }
    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.provider.base_url = base_url.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.experiment.max_concurrency = concurrency;
    }
    if let Some(audit_log) = &cli.audit_log {
        config.experiment.audit_log = Some(audit_log.clone());
    }
}

/// Response to a Ctrl-C press
#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    /// First press: stop starting scenarios and let running ones finish
    Drain,
    /// Later press: exit right away
    Abort,
}

fn on_interrupt(token: &CancellationToken) -> Interrupt {
    if token.is_cancelled() {
        Interrupt::Abort
    } else {
        token.cancel();
        Interrupt::Drain
    }
}
