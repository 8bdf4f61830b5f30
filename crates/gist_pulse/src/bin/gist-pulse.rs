use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use gist_pulse::{
    api::{router, ApiState},
    config::AppConfig,
    groq::GroqClient,
    scrape::WebScraper,
    tracing::init_tracing_subscriber,
    yt::ytdlp::YtDlp,
    SummaryOptions, SummaryPipeline, SummaryPipelineBuilder, SummaryStyle,
};

#[derive(Parser)]
#[command(name = "gist-pulse", about = "URL summarization service")]
struct Cli {
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY")]
    groq_api_key: String,

    /// Chat model used for summaries
    #[arg(long, env = "GROQ_MODEL", default_value = "llama3-8b-8192")]
    summary_model: String,

    /// Whisper model used for transcription
    #[arg(long, env = "GROQ_WHISPER_MODEL", default_value = "whisper-large-v3")]
    transcription_model: String,

    /// Base URL of the Groq API
    #[arg(long, env = "GROQ_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
    groq_base_url: String,

    /// Retries for transient Groq API failures
    #[arg(long, env = "GROQ_MAX_RETRIES", default_value = "3")]
    groq_max_retries: u32,

    /// Path to yt-dlp cookies file
    #[arg(long, env = "YTDLP_COOKIES_PATH")]
    cookies_path: Option<PathBuf>,

    /// Cache summaries in memory
    #[arg(long, env = "ENABLE_CACHE", default_value_t = true, action = clap::ArgAction::Set)]
    enable_cache: bool,

    /// Cache entry time-to-live in seconds
    #[arg(long, env = "CACHE_TTL_SECONDS", default_value = "3600")]
    cache_ttl_seconds: u64,

    /// Rate limit requests per client IP
    #[arg(long, env = "ENABLE_RATE_LIMITING", default_value_t = true, action = clap::ArgAction::Set)]
    enable_rate_limiting: bool,

    /// Allowed requests per window
    #[arg(long, env = "RATE_LIMIT_CALLS", default_value = "10")]
    rate_limit_calls: usize,

    /// Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_PERIOD_SECONDS", default_value = "60")]
    rate_limit_period_seconds: u64,

    /// Maximum characters of source content passed to the summarizer
    #[arg(long, env = "MAX_WEBSITE_CONTENT_LENGTH", default_value = "4000")]
    max_content_chars: usize,

    /// Audio chunk duration in seconds
    #[arg(long, default_value = "900")]
    chunk_duration: u16,

    /// Keep an in-memory history of recent summaries
    #[arg(long, env = "ENABLE_HISTORY", default_value_t = true, action = clap::ArgAction::Set)]
    enable_history: bool,

    /// Number of history entries to retain
    #[arg(long, env = "HISTORY_CAPACITY", default_value = "20")]
    history_capacity: usize,

    /// Working directory for downloaded audio
    #[arg(long, default_value = "/var/tmp/gist-pulse")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(long, env = "PORT", default_value = "8000")]
        port: u16,
    },
    /// Summarize a single URL and print the result as JSON
    Summarize {
        /// URL to summarize
        url: String,

        /// Summary style
        #[arg(long, default_value = "balanced")]
        style: SummaryStyle,

        /// Target summary length in words
        #[arg(long)]
        length: Option<u32>,

        /// Output language
        #[arg(long)]
        language: Option<String>,
    },
}

fn app_config(cli: &Cli) -> AppConfig {
    AppConfig {
        groq_api_key: cli.groq_api_key.clone(),
        summary_model: cli.summary_model.clone(),
        transcription_model: cli.transcription_model.clone(),
        groq_base_url: cli.groq_base_url.clone(),
        groq_max_retries: cli.groq_max_retries,
        cache_enabled: cli.enable_cache,
        cache_ttl: Duration::from_secs(cli.cache_ttl_seconds),
        rate_limit_enabled: cli.enable_rate_limiting,
        rate_limit_calls: cli.rate_limit_calls,
        rate_limit_period: Duration::from_secs(cli.rate_limit_period_seconds),
        max_content_chars: cli.max_content_chars,
        chunk_duration_seconds: cli.chunk_duration,
        history_enabled: cli.enable_history,
        history_capacity: cli.history_capacity,
        workdir: cli.workdir.clone(),
        ..AppConfig::default()
    }
}

fn build_pipeline(
    config: &AppConfig,
    cookies_path: Option<PathBuf>,
) -> anyhow::Result<SummaryPipeline<GroqClient<YtDlp>, GroqClient<YtDlp>, YtDlp, WebScraper>> {
    let yt_dlp = YtDlp::new(cookies_path);
    let groq = GroqClient::new(&config.groq_api_key, yt_dlp.clone(), config.groq_max_retries)
        .with_base_url(&config.groq_base_url)
        .with_models(&config.summary_model, &config.transcription_model);
    let scraper = WebScraper::new(Duration::from_secs(30))?;

    Ok(SummaryPipelineBuilder::new(&config.workdir)
        .transcriber(groq.clone())
        .summarizer(groq)
        .audio_handler(yt_dlp)
        .web_loader(scraper)
        .with_chunking(config.chunk_duration_seconds)
        .max_content_chars(config.max_content_chars)
        .build())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = app_config(&cli);
    config.validate()?;
    let pipeline = build_pipeline(&config, cli.cookies_path.clone())?;

    match cli.command {
        Command::Serve { host, port } => {
            let addr = format!("{host}:{port}");
            let state = ApiState::new(Arc::new(pipeline), config)?;
            let app = router(state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "Listening for requests");
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await?;
        }
        Command::Summarize {
            url,
            style,
            length,
            language,
        } => {
            let options = SummaryOptions {
                style,
                length_words: length.unwrap_or(config.default_summary_length),
                language: language.unwrap_or_else(|| config.default_language.clone()),
            };
            let summary = pipeline.summarize_url(&url, &options).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
