use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use protodeck::config::CatalogConfig;
use protodeck::model::{Feature, FlagRef, Pillar};
use protodeck::query::{FeatureQuery, ReleasedFilter, SortOption, StatusFilter};
use protodeck::repo::FeatureRepo;
use protodeck::server::{ServerConfig, start_server};

#[derive(Parser)]
#[command(name = "protodeck")]
#[command(version, about = "Internal catalog of product prototypes and their experiment flags")]
pub struct Cli {
    /// Path to a config file (defaults to ./protodeck.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the catalog HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind on all interfaces and allow cross-origin requests
        #[arg(long)]
        dev: bool,
    },
    /// List catalog entries
    List {
        /// Filter by status: all | in_progress | released
        #[arg(long, default_value = "all")]
        status: String,

        /// Filter by release state: all | released | unreleased
        #[arg(long, default_value = "all")]
        released: String,

        /// Filter by pillar display name (repeatable)
        #[arg(long)]
        pillar: Vec<String>,

        /// Sort: created_desc | created_asc | title_asc | title_desc
        #[arg(long, default_value = "created_desc")]
        sort: String,
    },
    /// Add a feature from a JSON file
    Add {
        /// Path to a JSON file containing a full feature record
        file: PathBuf,
    },
    /// Remove a feature by id
    Rm { id: String },
    /// Append a flag reference to a feature
    Flag {
        feature_id: String,
        name: String,

        /// Mark the flag as an experiment
        #[arg(long)]
        experiment: bool,

        /// Mark the flag as a feature gate
        #[arg(long)]
        gate: bool,

        /// Console URL for the flag
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("protodeck=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = CatalogConfig::load(cli.config.as_deref())?;
    let repo = FeatureRepo::new(config.build_store()?);

    match cli.command {
        Commands::Serve { port, dev } => {
            let server_config = ServerConfig {
                host: if dev {
                    "0.0.0.0".to_string()
                } else {
                    config.server.host.clone()
                },
                port: port.unwrap_or(config.server.port),
                dev_mode: dev || config.server.dev_mode,
            };
            start_server(server_config, repo).await
        }
        Commands::List {
            status,
            released,
            pillar,
            sort,
        } => cmd_list(&repo, &status, &released, &pillar, &sort).await,
        Commands::Add { file } => cmd_add(&repo, &file).await,
        Commands::Rm { id } => cmd_rm(&repo, &id).await,
        Commands::Flag {
            feature_id,
            name,
            experiment,
            gate,
            url,
        } => cmd_flag(&repo, &feature_id, name, experiment, gate, url).await,
    }
}

async fn cmd_list(
    repo: &FeatureRepo,
    status: &str,
    released: &str,
    pillars: &[String],
    sort: &str,
) -> Result<()> {
    let query = FeatureQuery {
        status: status
            .parse::<StatusFilter>()
            .map_err(|e| anyhow::anyhow!(e))?,
        released: released
            .parse::<ReleasedFilter>()
            .map_err(|e| anyhow::anyhow!(e))?,
        pillars: pillars
            .iter()
            .map(|p| p.parse::<Pillar>().map_err(|e| anyhow::anyhow!(e)))
            .collect::<Result<Vec<_>>>()?,
        sort: Some(sort.parse::<SortOption>().map_err(|e| anyhow::anyhow!(e))?),
    };

    let features = repo.get_all().await?;
    let view = query.apply(&features);

    println!();
    println!(
        "{:<32} {:<28} {:<12} {:<14} Created",
        "Id", "Title", "Status", "Pillar"
    );
    for feature in &view {
        println!(
            "{:<32} {:<28} {:<12} {:<14} {}",
            feature.id,
            feature.title,
            feature.status,
            feature.pillar,
            feature.date_created
        );
    }
    println!();
    println!(
        "{} of {} features",
        console::style(view.len()).bold(),
        features.len()
    );
    Ok(())
}

async fn cmd_add(repo: &FeatureRepo, file: &PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let feature: Feature =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", file.display()))?;
    if feature.id.is_empty() {
        bail!("Feature id is required");
    }

    let feature = repo.add(feature).await?;
    println!(
        "{} Added feature {} ({})",
        console::style("✓").green(),
        console::style(&feature.title).bold(),
        feature.id
    );
    Ok(())
}

async fn cmd_rm(repo: &FeatureRepo, id: &str) -> Result<()> {
    if !repo.remove(id).await? {
        bail!("No feature with id '{}'", id);
    }
    println!("{} Removed feature {}", console::style("✓").green(), id);
    Ok(())
}

async fn cmd_flag(
    repo: &FeatureRepo,
    feature_id: &str,
    name: String,
    experiment: bool,
    gate: bool,
    url: Option<String>,
) -> Result<()> {
    let flag = FlagRef {
        name,
        is_experiment: experiment,
        is_feature_gate: gate,
        url,
    };

    let Some(feature) = repo.add_flag(feature_id, flag.clone()).await? else {
        bail!("No feature with id '{}'", feature_id);
    };

    println!(
        "{} Added flag {} to feature {}",
        console::style("✓").green(),
        console::style(&flag.name).bold(),
        feature.title
    );
    let names: Vec<&str> = feature.flag_refs.iter().map(|f| f.name.as_str()).collect();
    println!("  Flags: {}", names.join(", "));
    Ok(())
}
