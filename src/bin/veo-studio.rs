//! CLI for Veo Studio - video generation with Google Veo.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use veo_studio::video::{
    compose, normalize_prompt, ArtifactStore, AspectRatio, GenerationDriver, GenerationService,
    GenerationSettings, ImageSource, JobContext, JobState, ProgressTicker, Resolution, VeoClient,
};
use veo_studio::StudioConfig;

#[derive(Parser)]
#[command(name = "veo-studio")]
#[command(about = "Generate videos from a prompt and/or reference image with Google Veo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a video
    Generate(GenerateArgs),

    /// Print the prompt extracted from JSON input
    Normalize {
        /// Prompt text, possibly a JSON document
        prompt: String,
    },

    /// Check that the API key is accepted and the model is available
    Check,
}

#[derive(Args)]
struct GenerateArgs {
    /// The text prompt describing the video (may be empty with --image)
    #[arg(default_value = "")]
    prompt: String,

    /// Reference image used as the starting frame
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Aspect ratio
    #[arg(long, value_enum, default_value = "16:9")]
    aspect_ratio: AspectRatioArg,

    /// Output resolution
    #[arg(long, value_enum, default_value = "720p")]
    resolution: ResolutionArg,

    /// Ask the model for sound design and audio
    #[arg(long)]
    sound: bool,

    /// Extract the prompt from JSON input before submitting
    #[arg(long)]
    normalize: bool,

    /// Output file path (default: veo-video-<unix-ms>.mp4)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AspectRatioArg {
    #[value(name = "16:9")]
    Landscape,
    #[value(name = "9:16")]
    Portrait,
}

impl From<AspectRatioArg> for AspectRatio {
    fn from(arg: AspectRatioArg) -> Self {
        match arg {
            AspectRatioArg::Landscape => AspectRatio::Landscape,
            AspectRatioArg::Portrait => AspectRatio::Portrait,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResolutionArg {
    #[value(name = "720p")]
    Hd,
    #[value(name = "1080p")]
    FullHd,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Hd => Resolution::Hd,
            ResolutionArg::FullHd => Resolution::FullHd,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("veo_studio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            generate_video(args, cli.json).await?;
        }
        Commands::Normalize { prompt } => {
            let normalized = normalize_prompt(&prompt);
            if cli.json {
                let result = serde_json::json!({ "prompt": normalized });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{normalized}");
            }
        }
        Commands::Check => {
            check(cli.json).await?;
        }
    }

    Ok(())
}

fn build_client(config: &StudioConfig) -> anyhow::Result<VeoClient> {
    Ok(VeoClient::builder()
        .api_key(config.api_key.clone())
        .model(config.model)
        .base_url(&config.base_url)
        .build()?)
}

async fn generate_video(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let config = StudioConfig::from_env()?;

    let prompt = if args.normalize {
        normalize_prompt(&args.prompt)
    } else {
        args.prompt.clone()
    };
    let settings = GenerationSettings::new(args.aspect_ratio.into(), args.resolution.into())
        .with_sound(args.sound);
    let request = compose(&prompt, args.image.map(ImageSource::Path), settings).await?;

    let client = build_client(&config)?;
    let driver = GenerationDriver::new(
        client.clone(),
        client,
        ArtifactStore::new(),
        config.api_key.clone(),
    )
    .with_poll_policy(config.poll);

    let cancel = CancellationToken::new();
    let ctx = JobContext::new()
        .with_cancellation(cancel.clone())
        .on_state(|state| {
            if let JobState::Polling { attempt } = state {
                tracing::debug!(attempt, "waiting for video");
            }
        });

    let ticker = ProgressTicker::spawn(config.progress_cadence);
    let printer = (!json_output).then(|| {
        let mut labels = ticker.subscribe();
        tokio::spawn(async move {
            eprintln!("{}", *labels.borrow_and_update());
            while labels.changed().await.is_ok() {
                eprintln!("{}", *labels.borrow_and_update());
            }
        })
    });

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Cancelling...");
            ctrl_c.cancel();
        }
    });

    let result = driver.run_with(&request, &ctx).await;
    ticker.stop();
    if let Some(printer) = printer {
        printer.abort();
    }
    let video = result?;

    let output = args.output.unwrap_or_else(default_output_path);
    driver.store().save(&video.local_url, &output).await?;
    driver.store().revoke(&video.local_url);

    if json_output {
        let result = serde_json::json!({
            "type": "video",
            "success": true,
            "output": output.display().to_string(),
            "size_bytes": video.size_bytes,
            "mime_type": video.mime_type,
            "model": video.metadata.model,
            "duration_ms": video.metadata.duration_ms,
            "poll_attempts": video.metadata.poll_attempts,
            "aspect_ratio": video.metadata.aspect_ratio,
            "resolution": video.metadata.resolution,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Generated video: {} ({} bytes)",
            output.display(),
            video.size_bytes
        );
        if let Some(duration) = video.metadata.duration_ms {
            println!("Generation time: {}ms", duration);
        }
    }

    Ok(())
}

async fn check(json_output: bool) -> anyhow::Result<()> {
    let config = StudioConfig::from_env()?;
    let client = build_client(&config)?;
    let outcome = client.health_check().await;

    if json_output {
        let result = serde_json::json!({
            "model": client.model_id(),
            "ok": outcome.is_ok(),
            "error": outcome.as_ref().err().map(ToString::to_string),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        match &outcome {
            Ok(()) => println!("✓ {} is available", client.model_id()),
            Err(e) => println!("✗ {}: {e}", client.model_id()),
        }
    }

    outcome.map_err(Into::into)
}

/// `veo-video-<unix-ms>.mp4` in the working directory.
fn default_output_path() -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    PathBuf::from(format!("veo-video-{millis}.mp4"))
}
