//! MogMatch CLI - demo driver for the swipe-deck engine.
//!
//! Runs a scripted deck session (or a one-off photo analysis) against the
//! offline provider or the live generative backend, printing deck events
//! as they happen.

mod error;

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use mogmatch::config::DeckConfig;
use mogmatch::deck::{DeckEvent, DeckPhase};
use mogmatch::haptics::NoopHaptics;
use mogmatch::log::init_tracing;
use mogmatch::profile::Profile;
use mogmatch::provider::{GeminiProvider, OfflineProvider, ReqwestClient};
use mogmatch::service::DeckService;
use mogmatch::swipe::SwipeDirection;
use mogmatch::viewport::FixedViewport;
use mogmatch::ContentProvider;

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "mogmatch", version, about = "Swipe-deck engine demo driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a scripted swipe session and print deck events
    Demo(DemoArgs),
    /// Analyze a base64-encoded photo and print the verdict
    Analyze(AnalyzeArgs),
}

/// Content provider selection for CLI arguments.
#[derive(Debug, Clone, ValueEnum, PartialEq)]
enum ProviderType {
    /// Bundled personas and placeholder images (no network, no API key)
    Offline,
    /// Gemini generative backend (requires API key)
    Gemini,
}

impl ProviderType {
    /// Build the provider, requiring an API key for the Gemini backend.
    fn to_provider(
        &self,
        api_key: Option<String>,
        latency_ms: Option<u64>,
    ) -> Result<Arc<dyn ContentProvider>, CliError> {
        match self {
            ProviderType::Offline => {
                let provider = match latency_ms {
                    Some(ms) => OfflineProvider::with_latency(Duration::from_millis(ms)),
                    None => OfflineProvider::new(),
                };
                Ok(Arc::new(provider))
            }
            ProviderType::Gemini => {
                let key = api_key
                    .or_else(|| std::env::var("GEMINI_API_KEY").ok())
                    .ok_or_else(|| {
                        CliError::Config(
                            "Gemini provider requires an API key. \
                             Set GEMINI_API_KEY or use --api-key"
                                .to_string(),
                        )
                    })?;
                let http = ReqwestClient::new()?;
                Ok(Arc::new(GeminiProvider::new(http, key)))
            }
        }
    }
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Number of cards to swipe through
    #[arg(long, default_value_t = 8)]
    rounds: usize,

    /// Content provider to run against
    #[arg(long, value_enum, default_value_t = ProviderType::Offline)]
    provider: ProviderType,

    /// API key for the Gemini provider (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Simulated response latency for the offline provider, in ms
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Viewport width in layout units; exit targets clear this
    #[arg(long, default_value_t = 390.0)]
    viewport: f32,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Base64-encoded JPEG bytes of the photo
    image_b64: String,

    /// Content provider to run against
    #[arg(long, value_enum, default_value_t = ProviderType::Offline)]
    provider: ProviderType,

    /// API key for the Gemini provider (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing("mogmatch=info");
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Demo(args) => run_demo(args).await,
        Command::Analyze(args) => run_analyze(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn card_line(profile: &Profile) -> String {
    format!(
        "{}, {} | jawline {:.1}, canthal tilt {}, mewing streak {}d",
        profile.name,
        profile.age,
        profile.stats.jawline,
        profile.stats.canthal_tilt,
        profile.stats.mewing_streak
    )
}

fn print_event(event: &DeckEvent<Profile>) {
    match event {
        DeckEvent::Committed {
            direction,
            item,
            exit,
        } => println!(
            "  committed {direction} on {} (exit to {} over {}ms)",
            item.name, exit.target, exit.duration_ms
        ),
        DeckEvent::SnappedBack => println!("  snapped back"),
        DeckEvent::Advanced { cursor } => println!("  advanced to card #{cursor}"),
        DeckEvent::FetchWanted => println!("  refill fetch dispatched"),
    }
}

async fn run_demo(args: DemoArgs) -> Result<(), CliError> {
    let provider = args.provider.to_provider(args.api_key, args.latency_ms)?;
    let mut service = DeckService::new(
        provider,
        Arc::new(FixedViewport::new(args.viewport)),
        Arc::new(NoopHaptics),
        DeckConfig::default(),
    );

    info!(provider = ?args.provider, rounds = args.rounds, "starting demo session");
    service.open().await;

    for round in 0..args.rounds {
        let Some(profile) = service.current() else {
            println!("Deck ran dry at round {round}.");
            break;
        };
        println!("Card {}: {}", round + 1, card_line(profile));

        // Like Right every third card, pass on the rest.
        let direction = if round % 3 == 0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        service.press(direction);
        service.settle().await;

        for event in service.drain_events() {
            print_event(&event);
        }
        debug_assert_eq!(service.phase(), DeckPhase::Idle);
    }

    println!();
    println!("Matches ({}):", service.matches().len());
    for m in service.matches().iter() {
        println!("  {}: \"{}\"", m.profile.name, m.last_message);
    }

    // Open a conversation with the freshest match.
    let freshest_id = service.matches().iter().next().map(|m| m.id);
    if let Some(id) = freshest_id {
        let outgoing = "do you even mew?";
        println!();
        println!("You: {outgoing}");
        if let Some(reply) = service.send_chat(id, outgoing).await {
            let name = &service.matches().get(id).map(|m| m.profile.name.clone());
            println!("{}: {reply}", name.as_deref().unwrap_or("Them"));
        }
    }

    service.shutdown();
    Ok(())
}

async fn run_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let provider = args.provider.to_provider(args.api_key, None)?;
    let verdict = provider.analyze_photo(&args.image_b64).await;

    println!("Score: {}/10, {}", verdict.score, verdict.title);
    println!("{}", verdict.analysis);
    println!("Breakdown:");
    println!("  jawline  {}/100", verdict.breakdown.jawline);
    println!("  eyes     {}/100", verdict.breakdown.eyes);
    println!("  skin     {}/100", verdict.breakdown.skin);
    println!("  symmetry {}/100", verdict.breakdown.symmetry);
    println!("  phenotype: {}", verdict.breakdown.phenotype);
    if !verdict.improvements.is_empty() {
        println!("Improvements:");
        for tip in &verdict.improvements {
            println!("  - {tip}");
        }
    }
    Ok(())
}
