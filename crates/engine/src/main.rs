//! traitmint - mint unique, rarity-scored characters from a trait catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use traitmint_domain::CharacterId;
use traitmint_engine::infrastructure::catalog_file::JsonFileCatalogProvider;
use traitmint_engine::infrastructure::mint_config::MintConfig;
use traitmint_engine::use_cases::catalog::AugmentCatalog;
use traitmint_engine::use_cases::minting::{AttachAssetError, BatchRequest, MintError};
use traitmint_engine::App;

#[derive(Parser)]
#[command(name = "traitmint", version, about = "Generate and mint unique trait-based characters")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint one character under an id
    Mint {
        #[arg(long)]
        id: u64,
        /// Seed for a reproducible composition
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Mint consecutive ids, retrying trait duplicates
    Batch {
        #[arg(long)]
        start: u64,
        #[arg(long)]
        count: u64,
        /// Base seed; attempts use seed, seed + 1, ...
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        max_attempts: u32,
    },
    /// Compose and score a character without storing it
    Preview {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Attach an asset URL to a minted character
    Attach {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        url: String,
    },
    /// Print a minted character and its token metadata
    Show {
        #[arg(long)]
        id: u64,
    },
    /// Summarize the trait catalog
    Catalog {
        /// List every trait instead of per-tier counts
        #[arg(long)]
        flat: bool,
    },
    /// Merge an overlay catalog into a base catalog and write the result
    Augment {
        #[arg(long)]
        base: PathBuf,
        #[arg(long)]
        overlay: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

/// Result line for operations that did not complete.
#[derive(Serialize)]
struct Rejection<'a> {
    status: &'static str,
    id: u64,
    kind: &'a str,
    written: bool,
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traitmint_engine=info,traitmint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Augmenting works on files only and must not require a loadable catalog.
    if let Command::Augment { base, overlay, out } = &cli.command {
        let merged = AugmentCatalog::new()
            .execute(
                &JsonFileCatalogProvider::new(base),
                &JsonFileCatalogProvider::new(overlay),
                &JsonFileCatalogProvider::new(out),
            )
            .await?;
        print_json(&merged.summary())?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = MintConfig::from_env()?;
    let app = App::from_config(&config).await?;

    match cli.command {
        Command::Mint { id, seed } => {
            match app.use_cases.minting.mint.execute(CharacterId::new(id), seed).await {
                Ok(record) => print_json(&record)?,
                Err(e) => return reject_mint(&e),
            }
        }
        Command::Batch {
            start,
            count,
            seed,
            max_attempts,
        } => {
            let request = BatchRequest::new(CharacterId::new(start), count)
                .with_base_seed(seed)
                .with_max_attempts(max_attempts);
            let report = app.use_cases.minting.batch.execute(request).await;
            print_json(&report)?;
            if !report.is_complete() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Preview { seed } => {
            print_json(&app.use_cases.minting.preview.execute(seed))?;
        }
        Command::Attach { id, url } => {
            if let Err(e) = app
                .use_cases
                .minting
                .attach_asset
                .execute(CharacterId::new(id), &url)
                .await
            {
                let kind = match e {
                    AttachAssetError::EmptyUrl => "INVALID_URL",
                    AttachAssetError::NotFound { .. } => "NOT_FOUND",
                    AttachAssetError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
                };
                return reject(id, kind, e.to_string());
            }
            print_json(&serde_json::json!({ "status": "attached", "id": id, "asset_url": url }))?;
        }
        Command::Show { id } => match app.use_cases.minting.show.execute(CharacterId::new(id)).await? {
            Some(view) => print_json(&view)?,
            None => return reject(id, "NOT_FOUND", format!("Character not found: {}", id)),
        },
        Command::Catalog { flat } => {
            if flat {
                let rows: Vec<_> = app
                    .catalog
                    .flatten()
                    .into_iter()
                    .map(|row| {
                        serde_json::json!({
                            "category": row.category,
                            "rarity_tier": row.tier,
                            "name": row.descriptor.name,
                            "description": row.descriptor.description,
                            "compatibility_notes": row.descriptor.compatibility_notes,
                        })
                    })
                    .collect();
                print_json(&rows)?;
            } else {
                print_json(&app.catalog.summary())?;
            }
        }
        Command::Augment { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn reject_mint(error: &MintError) -> anyhow::Result<ExitCode> {
    reject(error.id().get(), &error.kind().to_string(), error.to_string())
}

fn reject(id: u64, kind: &str, message: String) -> anyhow::Result<ExitCode> {
    print_json(&Rejection {
        status: "rejected",
        id,
        kind,
        written: false,
        message,
    })?;
    Ok(ExitCode::FAILURE)
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides, then the working directory.
    for path in [repo_root.join(".env.local"), repo_root.join(".env")] {
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
