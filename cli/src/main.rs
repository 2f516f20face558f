//! CLI entrypoint for Corporate Agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use corporate_agent_application::{
    AnalyzeDocumentsInput, AnalyzeDocumentsUseCase, ConversationLogger, RateLimiter,
    ReviewDocumentUseCase, Unlimited,
};
use corporate_agent_domain::OutputFormat;
use corporate_agent_infrastructure::{
    ConfigLoader, DocumentFetcher, DocxCodec, Embedder, FileConfig, IndexBuilder,
    JsonlConversationLogger, MinIntervalRateLimiter, OpenAiClient, OpenAiEmbedder,
    OpenAiGateway, VectorRetriever, http_client,
};
use corporate_agent_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env is optional
    dotenv::dotenv().ok();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let log_dir = cli.log_dir.clone().or_else(|| config.logging.dir.clone());
    let _log_guard = init_tracing(cli.verbose, log_dir.as_deref())?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    if cli.documents.is_empty() && !cli.build_index {
        bail!("No documents given. Pass at least one .docx path or URL, or --build-index.");
    }

    info!("Starting Corporate Agent");

    let api_key = std::env::var(&config.llm.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .with_context(|| format!("{} is not set", config.llm.api_key_env))?;

    // === Dependency Injection ===
    let http = http_client().context("Failed to build HTTP client")?;
    let client = OpenAiClient::new(http.clone(), &config.llm.base_url, api_key);

    let embedder: Arc<dyn Embedder> = Arc::new(
        OpenAiEmbedder::new(
            client.with_base_url(config.embedding_base_url()),
            &config.embedding.model,
        )
        .with_batch_size(config.embedding.batch_size),
    );

    let builder = IndexBuilder::new(
        embedder.clone(),
        Arc::new(
            DocumentFetcher::new(http.clone())
                .with_timeout(secs(config.retrieval.download_timeout_secs)),
        ),
        &config.embedding.model,
        &config.retrieval.sources_dir,
        &config.retrieval.index_path,
    )
    .with_sources(config.retrieval.regulation_sources())
    .with_splitter(config.retrieval.splitter());

    let index = if cli.build_index {
        builder.build().await
    } else {
        builder.load_or_build().await
    }
    .context("Failed to prepare the regulation index")?;

    if cli.documents.is_empty() {
        let chunks = index
            .len()
            .await
            .context("Failed to read the regulation index")?;
        println!(
            "Regulation index ready: {} chunks in {}",
            chunks,
            config.retrieval.index_path.display()
        );
        return Ok(());
    }

    let retriever = Arc::new(
        VectorRetriever::new(Arc::new(index), embedder).with_top_k(config.retrieval.top_k),
    );
    let gateway =
        Arc::new(OpenAiGateway::new(client).with_temperature(config.llm.temperature));

    let mut reviewer = ReviewDocumentUseCase::new(gateway, retriever, config.review_params())
        .with_rate_limiter(rate_limiter(&config));
    if let Some(logger) = transcript_logger(&config) {
        reviewer = reviewer.with_conversation_logger(logger);
    }

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current batch");
            ctrl_c.cancel();
        }
    });

    let use_case = AnalyzeDocumentsUseCase::new(
        reviewer,
        Arc::new(
            DocumentFetcher::new(http).with_timeout(secs(config.review.fetch_timeout_secs)),
        ),
        Arc::new(DocxCodec::new()),
    )
    .with_cancellation(token);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());
    let input = AnalyzeDocumentsInput::new(cli.document_refs(), output_dir);

    let output = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    if output.report.has_errors() {
        warn!(
            "{} document(s) could not be processed",
            output.report.document_errors.len()
        );
    }

    let format: OutputFormat = cli
        .format
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    println!("{}", ConsoleFormatter.format(&output, format));

    Ok(())
}

fn secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

/// Stderr logging by verbosity, plus a daily file when `log_dir` is set
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("corporate-agent")
                .filename_suffix("log")
                .build(dir)
                .with_context(|| format!("Cannot write logs to {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn rate_limiter(config: &FileConfig) -> Arc<dyn RateLimiter> {
    match config.llm.min_call_interval_secs {
        0 => Arc::new(Unlimited),
        interval => Arc::new(MinIntervalRateLimiter::new(secs(interval))),
    }
}

fn transcript_logger(config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = config.logging.transcript.as_ref()?;
    let logger = JsonlConversationLogger::new(path)?;
    info!("Writing review transcript to {}", path.display());
    Some(Arc::new(logger))
}
