use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

mod analyzer;
mod chat;
mod classifier;
mod config;
mod db;
mod error;
mod logging;
mod models;
mod recommend;
mod report;
mod request;
mod sentiment;

use config::AppConfig;
use error::{EngineError, ErrorBody};

#[derive(Parser)]
#[command(name = "pcos-insights")]
#[command(about = "PCOS type classification and personalized recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Generate ranked recommendations from a JSON snapshot
    Recommend {
        /// Request body file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,
        #[arg(long)]
        user_id: String,
        /// Skip writing results to the database
        #[arg(long)]
        no_persist: bool,
    },
    /// Classify a PCOS type from symptom tags
    #[command(group(
        ArgGroup::new("source")
            .args(["symptom", "input"])
            .required(true)
            .multiple(false)
    ))]
    Classify {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        symptom: Vec<String>,
        /// Symptom-analyzer request body file, or `-` for stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Classify every row of a `user_id,symptoms` CSV file
    BatchClassify {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Reply to a companion chat message
    Chat {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        message: String,
    },
    /// Write a markdown report for a JSON snapshot
    Report {
        #[arg(long, default_value = "-")]
        input: PathBuf,
        #[arg(long)]
        user_id: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// List unexpired recommendations stored for a user
    History {
        #[arg(long)]
        user_id: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn read_body(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read request body from stdin")?;
        return Ok(body);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request body from {}", path.display()))
}

/// Prints the caller-facing error body and hands the error back for the exit code.
fn fail(err: EngineError) -> anyhow::Result<()> {
    let body = ErrorBody::from_error(&err, Utc::now());
    println!("{}", serde_json::to_string(&body)?);
    Err(err.into())
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for this command")?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

/// Connection for optional writes. A missing URL or an unreachable database
/// only costs the persistence side effect.
async fn optional_pool(config: &AppConfig) -> Option<PgPool> {
    config.database_url.as_ref()?;
    match connect(config).await {
        Ok(pool) => Some(pool),
        Err(err) => {
            let err = EngineError::UpstreamUnavailable(format!("{err:#}"));
            warn!(error = %err, "continuing without persistence");
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::LoggingConfig::from_env().init()?;
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::InitDb => {
            let pool = connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Recommend {
            input,
            user_id,
            no_persist,
        } => {
            let user_id = match request::require_user_id(&user_id) {
                Ok(id) => id.to_string(),
                Err(err) => return fail(err),
            };
            let body = read_body(&input)?;
            let request = match request::parse_recommendation_request(&body) {
                Ok(request) => request,
                Err(err) => return fail(err),
            };

            let now = Utc::now();
            let (analysis, response) = request::build_response(&request, &user_id, now);
            info!(
                user_id = %user_id,
                pcos_type = analysis.pcos_type.as_str(),
                count = response.recommendations.len(),
                "recommendations generated"
            );

            if !no_persist {
                if let Some(pool) = optional_pool(&config).await {
                    match db::store_recommendations(
                        &pool,
                        &user_id,
                        &response.recommendations,
                        config.recommendation_ttl_days,
                        now,
                    )
                    .await
                    {
                        Ok(stored) => info!(stored, "recommendations persisted"),
                        Err(err) => warn!(error = %err, "failed to persist recommendations"),
                    }
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Classify {
            user_id,
            symptom,
            input,
        } => {
            let symptoms = match input {
                Some(path) => match request::parse_symptom_request(&read_body(&path)?) {
                    Ok(symptoms) => symptoms,
                    Err(err) => return fail(err),
                },
                None => symptom,
            };
            let analysis = match request::symptom_analysis(&user_id, &symptoms) {
                Ok(analysis) => analysis,
                Err(err) => return fail(err),
            };
            println!("{}", serde_json::to_string(&analysis)?);
        }
        Commands::BatchClassify { csv } => {
            let file = std::fs::File::open(&csv)
                .with_context(|| format!("failed to open {}", csv.display()))?;
            let results = request::classify_batch(file)?;
            for result in &results {
                println!("{}", serde_json::to_string(result)?);
            }
            info!(rows = results.len(), "batch classification finished");
        }
        Commands::Chat { user_id, message } => {
            let user_id = match request::require_user_id(&user_id) {
                Ok(id) => id.to_string(),
                Err(err) => return fail(err),
            };
            let now = Utc::now();
            let reply = match chat::respond(&message, now) {
                Ok(reply) => reply,
                Err(err) => return fail(err),
            };

            if let Some(pool) = optional_pool(&config).await {
                if let Err(err) = db::store_conversation(&pool, &user_id, &message, &reply, now).await {
                    warn!(error = %err, "failed to log conversation");
                }
            }

            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Commands::Report {
            input,
            user_id,
            out,
        } => {
            let user_id = match request::require_user_id(&user_id) {
                Ok(id) => id.to_string(),
                Err(err) => return fail(err),
            };
            let request = match request::parse_recommendation_request(&read_body(&input)?) {
                Ok(request) => request,
                Err(err) => return fail(err),
            };
            let (analysis, response) = request::build_response(&request, &user_id, Utc::now());
            let report = report::build_report(&request.recent_symptoms, &analysis, &response);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::History { user_id, limit } => {
            let pool = connect(&config).await?;
            let stored = db::fetch_active_recommendations(&pool, &user_id, Utc::now()).await?;

            if stored.is_empty() {
                println!("No active recommendations for {user_id}.");
                return Ok(());
            }

            println!("Active recommendations for {user_id}:");
            for rec in stored.iter().take(limit) {
                println!(
                    "- {} [{}] {} ({} priority, confidence {:.2}) saved {} expires {}",
                    rec.title,
                    rec.recommendation_id,
                    rec.category,
                    rec.priority,
                    rec.confidence_score,
                    rec.created_at.format("%Y-%m-%d"),
                    rec.expires_at.format("%Y-%m-%d")
                );
            }
        }
    }

    Ok(())
}
