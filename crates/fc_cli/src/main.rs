//! Match Audit CLI
//!
//! Recompute replay hashes, verify replays against an authoritative hash
//! (from a file or the recording service), and run plausibility validation
//! on finalized results.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fc_core::{validate_match, HistoricalMatch, MatchResult, ReplayDocument};
use fc_verifier::{HttpProvider, MemoryProvider, ReplayVerifier, VerificationResult};

#[derive(Parser)]
#[command(name = "fc_cli")]
#[command(about = "Audit finalized match results and replays", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute the result hash of a replay file
    Hash {
        /// Replay JSON file
        #[arg(long)]
        replay: PathBuf,
    },

    /// Verify a replay against the authoritative result hash
    Verify {
        /// Replay JSON file (offline mode)
        #[arg(long, conflicts_with = "server")]
        replay: Option<PathBuf>,

        /// Authoritative hash, hex-encoded (offline mode)
        #[arg(long, conflicts_with = "server")]
        hash: Option<String>,

        /// Recording service base URL (online mode)
        #[arg(long)]
        server: Option<String>,

        /// Match id (online mode; offline defaults to the replay's own id)
        #[arg(long)]
        match_id: Option<String>,
    },

    /// Run plausibility validation on a finalized match result
    Validate {
        /// MatchResult JSON file
        #[arg(long)]
        result: PathBuf,

        /// Player under review
        #[arg(long)]
        player: u32,

        /// JSON file with the player's recent match history, most recent first
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hash { replay } => {
            let doc = load_replay(&replay)?;
            println!("{}", doc.compute_hash());
        }

        Commands::Verify {
            replay,
            hash,
            server,
            match_id,
        } => {
            let result = match server {
                Some(base_url) => {
                    let match_id = match_id
                        .context("--match-id is required when verifying against a server")?;
                    verify_online(&base_url, &match_id).await?
                }
                None => {
                    let replay =
                        replay.context("--replay is required when no server is given")?;
                    let hash = hash.context("--hash is required when no server is given")?;
                    verify_offline(&replay, &hash, match_id.as_deref()).await?
                }
            };

            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.valid {
                println!("\n✅ Replay verified");
            } else {
                anyhow::bail!("❌ Replay verification failed");
            }
        }

        Commands::Validate {
            result,
            player,
            history,
        } => {
            let contents = fs::read_to_string(&result)
                .with_context(|| format!("reading {}", result.display()))?;
            let result: MatchResult =
                serde_json::from_str(&contents).context("parsing match result JSON")?;

            let history: Vec<HistoricalMatch> = match history {
                Some(path) => {
                    let contents = fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    serde_json::from_str(&contents).context("parsing history JSON")?
                }
                None => Vec::new(),
            };

            let report = validate_match(&result, player, &history);
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("\nScore: {}/100", report.score);
            if report.is_suspicious() {
                println!("🔍 Flagged for review");
            }
            if !report.is_valid() {
                anyhow::bail!("❌ Match result failed validation");
            }
            println!("✅ Match result plausible");
        }
    }

    Ok(())
}

fn load_replay(path: &PathBuf) -> Result<ReplayDocument> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).context("parsing replay JSON")
}

async fn verify_offline(
    replay: &PathBuf,
    hash: &str,
    match_id: Option<&str>,
) -> Result<VerificationResult> {
    let doc = load_replay(replay)?;
    let match_id = match_id.unwrap_or(&doc.match_id).to_string();

    let mut replays = MemoryProvider::new();
    let mut authority = MemoryProvider::new();
    authority.insert_hash(match_id.clone(), hash);
    replays.insert_replay(doc);

    let verifier = ReplayVerifier::new(replays, authority);
    Ok(verifier.verify(&match_id).await)
}

async fn verify_online(base_url: &str, match_id: &str) -> Result<VerificationResult> {
    let replays = HttpProvider::new(base_url).context("building HTTP client")?;
    let authority = HttpProvider::new(base_url).context("building HTTP client")?;
    let verifier = ReplayVerifier::new(replays, authority);
    Ok(verifier.verify(match_id).await)
}
