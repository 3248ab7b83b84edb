//! cohortrx: cohort-based drug recommendation service and CLI.
//!
//! Usage:
//!   cohortrx serve --config cohortrx.toml
//!   cohortrx serve --dataset data/ehr.csv --bind 0.0.0.0:8000
//!   cohortrx predict --dataset data/ehr.csv --patient patient.json
//!   cohortrx status --dataset data/ehr.csv

mod api;
mod config;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cohortrx_contracts::patient::PatientQuery;
use cohortrx_core::{CorpusSource, Recommender};
use cohortrx_dataset::CsvCorpusSource;
use cohortrx_knowledge::KnowledgeBase;

use crate::api::{router::router, AppState};
use crate::config::ServerConfig;
use crate::error::{CliError, CliResult};

// ── CLI definition ────────────────────────────────────────────────────────────

/// cohortrx: recommend drugs from similar historical patients.
#[derive(Parser)]
#[command(
    name = "cohortrx",
    about = "Cohort-based drug recommendation service",
    long_about = "Matches a patient against a corpus of historical records, recommends\n\
                  the drugs that similar patients received, explains the match, and\n\
                  flags interactions with the patient's current medications."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve {
        /// TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Address to listen on, e.g. 0.0.0.0:8000.
        #[arg(long)]
        bind: Option<String>,
        /// CSV dataset to serve.
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Reference-table TOML replacing the built-in tables.
        #[arg(long)]
        knowledge: Option<PathBuf>,
        /// Start even if the dataset fails to load.
        #[arg(long)]
        allow_missing_dataset: bool,
    },
    /// Run one prediction and print the response as JSON.
    Predict {
        #[arg(long)]
        dataset: PathBuf,
        /// JSON file holding the patient query.
        #[arg(long)]
        patient: PathBuf,
        #[arg(long)]
        knowledge: Option<PathBuf>,
    },
    /// Load a dataset and print its status as JSON.
    Status {
        #[arg(long)]
        dataset: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for per-request detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve {
            config,
            bind,
            dataset,
            knowledge,
            allow_missing_dataset,
        } => match resolve_config(config.as_deref(), bind, dataset, knowledge, allow_missing_dataset) {
            Ok(config) => run_serve(config).await,
            Err(e) => Err(e),
        },
        Command::Predict {
            dataset,
            patient,
            knowledge,
        } => run_predict(&dataset, &patient, knowledge.as_deref()),
        Command::Status { dataset } => run_status(&dataset),
    };

    if let Err(e) = result {
        eprintln!("cohortrx error: {}", e);
        std::process::exit(1);
    }
}

// ── Command dispatch ──────────────────────────────────────────────────────────

fn resolve_config(
    path: Option<&Path>,
    bind: Option<String>,
    dataset: Option<PathBuf>,
    knowledge: Option<PathBuf>,
    allow_missing_dataset: bool,
) -> CliResult<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(dataset) = dataset {
        config.dataset = dataset;
    }
    if knowledge.is_some() {
        config.knowledge = knowledge;
    }
    if allow_missing_dataset {
        config.require_dataset = false;
    }
    Ok(config)
}

fn load_knowledge(path: Option<&Path>) -> CliResult<KnowledgeBase> {
    let knowledge = match path {
        Some(path) => KnowledgeBase::from_file(path)?,
        None => KnowledgeBase::builtin()?,
    };
    Ok(knowledge)
}

async fn run_serve(config: ServerConfig) -> CliResult<()> {
    let addr = config.bind_addr()?;
    let knowledge = load_knowledge(config.knowledge.as_deref())?;
    let engine = Arc::new(Recommender::new(Arc::new(knowledge)));
    let source: Arc<dyn CorpusSource> = Arc::new(CsvCorpusSource::new(&config.dataset));

    if let Err(e) = engine.reload(source.as_ref()) {
        if config.require_dataset {
            return Err(e.into());
        }
        warn!(error = %e, "starting without a dataset; /predict will answer 503");
    }

    let app = router(AppState { engine, source });
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "drug recommendation API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn run_predict(dataset: &Path, patient: &Path, knowledge: Option<&Path>) -> CliResult<()> {
    let knowledge = load_knowledge(knowledge)?;
    let corpus = CsvCorpusSource::new(dataset).load()?;
    let engine = Recommender::with_corpus(Arc::new(knowledge), corpus);

    let query: PatientQuery = serde_json::from_str(&std::fs::read_to_string(patient)?)
        .map_err(|source| CliError::PatientJson {
            path: patient.display().to_string(),
            source,
        })?;
    let response = engine.predict(&query)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_status(dataset: &Path) -> CliResult<()> {
    let corpus = CsvCorpusSource::new(dataset).load()?;
    println!("{}", serde_json::to_string_pretty(&corpus.status())?);
    Ok(())
}
