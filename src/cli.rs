use clap::{Parser, Subcommand};
use std::str::FromStr;
use std::sync::{Arc, Mutex, RwLock};

use crate::config_loader::{load_config, ClinsightConfig};
use crate::disease::{Disease, ALL_DISEASES};
use crate::form_schema::schema_for;
use crate::model_registry::ModelRegistry;
use crate::prediction_store::PredictionStore;
use crate::prediction_store_sled::PredictionStoreSled;
use crate::runtime_core::DiagnosisRuntime;

/// Top-level CLI interface for Clinsight
#[derive(Parser)]
#[command(
    name = "clinsight",
    version = "0.1.0",
    about = "Clinical measurement intake and model-backed diagnosis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (forms, prediction, history, health)
    Serve {
        /// Host/IP to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a user's prediction history, newest first
    History {
        #[arg(short, long)]
        user: String,
    },

    /// List the supported disease forms
    Diseases,

    /// Show the ordered field schema for one disease form
    Schema {
        #[arg(short, long)]
        disease: String,
    },
}

fn build_runtime(config: &ClinsightConfig) -> Result<Arc<RwLock<DiagnosisRuntime>>, String> {
    // Failure to load any model artifact is fatal at startup
    let models = ModelRegistry::load(std::path::Path::new(&config.model_dir))
        .map_err(|e| format!("Failed to load model artifacts: {e}"))?;

    let store = PredictionStoreSled::new(&config.data_dir)
        .map_err(|e| format!("Failed to open prediction store: {e}"))?;

    let runtime = DiagnosisRuntime::new(models, Arc::new(Mutex::new(store)));
    Ok(Arc::new(RwLock::new(runtime)))
}

pub fn dispatch(cli: Cli) {
    match cli.command {
        Commands::Serve { host, port } => {
            // One config read covers both the bind address and the runtime
            let config = match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Failed to load config: {e}");
                    return;
                }
            };

            let runtime = match build_runtime(&config) {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to initialize server runtime: {e}");
                    return;
                }
            };

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");

            let app = crate::diagweb::build_diagnosis_router(runtime);

            let rt = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to build Tokio runtime: {e}");
                    return;
                }
            };

            rt.block_on(async move {
                let socket_addr: std::net::SocketAddr = match addr.parse() {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("Invalid bind address {addr}: {e}");
                        return;
                    }
                };
                match tokio::net::TcpListener::bind(socket_addr).await {
                    Ok(listener) => {
                        println!("HTTP server listening on http://{addr}");
                        if let Err(e) = axum::serve(listener, app).await {
                            eprintln!("Server error: {e}");
                        }
                    }
                    Err(e) => eprintln!("Failed to bind {addr}: {e}"),
                }
            });
        }

        Commands::History { user } => {
            let config = match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Failed to load config: {e}");
                    return;
                }
            };
            let store = match PredictionStoreSled::new(&config.data_dir) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to open prediction store: {e}");
                    return;
                }
            };

            match store.history(&user) {
                Ok(rows) if rows.is_empty() => {
                    println!("No prediction history for '{user}'");
                }
                Ok(rows) => {
                    println!("Prediction history for '{user}' ({} rows):", rows.len());
                    for row in rows {
                        println!(
                            "  {}  {:<14}  p={:.4}  {}",
                            row.timestamp.to_rfc3339(),
                            row.disease.key(),
                            row.probability,
                            row.result
                        );
                    }
                }
                Err(e) => eprintln!("History lookup failed: {e}"),
            }
        }

        Commands::Diseases => {
            println!("Supported disease forms:");
            for disease in ALL_DISEASES {
                println!(
                    "  {:<14}  {}  ({} fields)",
                    disease.key(),
                    disease.title(),
                    disease.feature_len()
                );
            }
        }

        Commands::Schema { disease } => {
            let disease = match Disease::from_str(&disease) {
                Ok(d) => d,
                Err(_) => {
                    eprintln!("Unknown disease '{disease}'. Try 'clinsight diseases'.");
                    return;
                }
            };
            let schema = schema_for(disease);
            println!("{} ({} fields, model order):", disease.title(), schema.fields.len());
            for (i, spec) in schema.fields.iter().enumerate() {
                println!("  {:>2}. {:<24}  {}", i + 1, spec.name, spec.label);
            }
        }
    }
}
