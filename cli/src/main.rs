//! CLI entrypoint for the-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    Artifact, ArtifactSink, EmbeddingGateway, LlmGateway, NoProgress, ProgressNotifier,
    RunCouncilInput, RunCouncilUseCase, SemanticDeduplicator, SynthesizeDocumentUseCase,
    SynthesizeInput,
};
use council_domain::DocumentTemplate;
use council_infrastructure::{
    ConfigLoader, EmbeddingProvider, EnvCredentialResolver, FileArtifactSink, FileConfig,
    LocalEmbedder, OllamaEmbedder, OpenAiCompatibleGateway,
};
use council_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!(
        started_at = %chrono::Local::now().to_rfc3339(),
        "Starting the-council"
    );

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);

    if !config.output.color {
        colored::control::set_override(false);
    }

    let resolved = config.resolve(&EnvCredentialResolver)?;
    info!(
        agents = resolved.roster.len(),
        variant = %resolved.settings.variant,
        "Configuration resolved"
    );

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(
        OpenAiCompatibleGateway::new(
            &config.provider.base_url,
            Duration::from_secs(config.provider.timeout_seconds),
        )?
        .with_system_prompt(config.provider.system_prompt.clone()),
    );
    let deduplicator = build_deduplicator(&config)?;
    let sink = FileArtifactSink::new(&config.output.directory, &config.output.stem);

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    // Synthesis mode
    if let Some(path) = &cli.synthesize {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let mut input =
            SynthesizeInput::from_roster(source, &resolved.roster, &config.synthesis.synthesizer)?
                .with_title(config.output.title.clone())
                .with_chunk_max_tokens(config.synthesis.chunk_max_tokens)
                .with_concurrency(config.synthesis.concurrency)
                .with_max_tokens(config.synthesis.max_tokens);
        if deduplicator.is_none() {
            input = input.without_deduplication();
        }

        let mut use_case = SynthesizeDocumentUseCase::new(gateway);
        if let Some(deduplicator) = deduplicator {
            use_case = use_case.with_deduplicator(deduplicator);
        }

        let output = use_case
            .execute_with_progress(input, progress.as_ref())
            .await?;
        let paths = sink.write(Artifact::document(&output.document))?;

        if cli.output == OutputFormat::Full {
            println!("{}", output.document.render_markdown());
        }
        println!("{}", ConsoleFormatter::format_synthesis(&output));
        println!("{}", ConsoleFormatter::format_paths(&paths));
        return Ok(());
    }

    // Council mode - idea is required
    let idea = match cli.idea {
        Some(idea) if !idea.trim().is_empty() => idea,
        _ => bail!("An idea is required. Use --synthesize <PATH> to synthesize a document."),
    };

    let mut input = RunCouncilInput::new(idea.clone(), resolved.roster)
        .with_settings(resolved.settings)
        .with_budget(resolved.budget)
        .with_template(DocumentTemplate::game_design().with_title(config.output.title.clone()));
    if cli.no_final_review {
        input = input.without_final_review();
    }
    if deduplicator.is_none() {
        input = input.without_deduplication();
    }

    if !cli.quiet && cli.output != OutputFormat::Json {
        println!();
        println!("Idea: {}", idea);
        println!("Council: {}", input.roster.names().join(", "));
        println!();
    }

    let mut use_case =
        RunCouncilUseCase::new(gateway).with_summarizer_model(resolved.summarizer_model);
    if let Some(deduplicator) = deduplicator {
        use_case = use_case.with_deduplicator(deduplicator);
    }

    let output = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;
    let paths = sink.write(Artifact::document(&output.document).with_results(&output.results))?;

    let rendered = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format_full(&output),
        OutputFormat::Summary => ConsoleFormatter::format(&output),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", rendered);
    if cli.output != OutputFormat::Json {
        println!("{}", ConsoleFormatter::format_paths(&paths));
    }

    Ok(())
}

/// Console logging chosen by verbosity (`RUST_LOG` wins when set), plus a
/// daily-rotated file when a log directory is given.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "the-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            Ok(None)
        }
    }
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(variant) = cli.variant {
        config.pipeline.variant = variant.as_str().to_string();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(stem) = &cli.stem {
        config.output.stem = stem.clone();
    }
    if cli.no_dedup {
        config.deduplication.enabled = false;
    }
}

fn build_deduplicator(config: &FileConfig) -> Result<Option<SemanticDeduplicator>> {
    let dedup = &config.deduplication;
    if !dedup.enabled {
        return Ok(None);
    }

    let embedder: Arc<dyn EmbeddingGateway> = match dedup.provider {
        EmbeddingProvider::Local => Arc::new(LocalEmbedder::new()),
        EmbeddingProvider::Ollama => Arc::new(OllamaEmbedder::new(
            &dedup.ollama_host,
            &dedup.ollama_model,
            Duration::from_secs(config.provider.timeout_seconds),
        )?),
    };
    if dedup.provider == EmbeddingProvider::Ollama {
        warn!(host = %dedup.ollama_host, "Deduplication depends on a running Ollama server");
    }
    info!(embedder = embedder.name(), threshold = dedup.threshold, "Deduplication enabled");

    Ok(Some(
        SemanticDeduplicator::new(embedder).with_threshold(dedup.threshold),
    ))
}
