//! Shelf CLI: compose a product from the command line and save it.
//!
//! Backends and pipeline settings come from the environment (or `.env`); see `shelf config`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_cli::{init_tracing, SaveArgs, TerminalView};
use shelf_core::Config;
use shelf_db::create_document_store;
use shelf_processing::{FormView, FsImageSource, ProductForm, SaveOrchestrator};
use shelf_storage::create_storage;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "shelf", about = "Compose and save products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the photos and save the product record
    Save(SaveArgs),
    /// Print the effective configuration (credentials masked)
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Config => {
            for (key, value) in config.describe() {
                println!("{:<24} {}", key, value);
            }
        }
        Commands::Save(args) => save(&config, args).await?,
    }

    Ok(())
}

async fn save(config: &Config, args: SaveArgs) -> anyhow::Result<()> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize blob storage")?;
    let documents = create_document_store(config)
        .await
        .context("Failed to initialize document store")?;

    tracing::info!(
        storage_backend = %config.storage_backend,
        document_backend = %config.document_backend,
        collection = %config.products_collection,
        "Backends ready"
    );

    let view: Arc<dyn FormView> = Arc::new(TerminalView::stdout());
    let orchestrator = SaveOrchestrator::from_config(
        config,
        Arc::new(FsImageSource::new()),
        storage,
        documents,
        view.clone(),
    );
    let mut form = ProductForm::new(Arc::new(orchestrator), view);

    let events = args.into_events();
    let (tx, rx) = mpsc::channel(events.len());
    for event in events {
        tx.send(event)
            .await
            .context("Form event channel closed")?;
    }
    drop(tx);

    match form.run(rx).await {
        Some(Ok(saved)) => {
            println!("Document id: {}", saved.document_id);
            println!("Product id:  {}", saved.product.id);
            for url in &saved.product.images {
                println!("Image:       {}", url);
            }
            if saved.dropped_images > 0 {
                println!("Skipped {} unreadable image(s)", saved.dropped_images);
            }
            Ok(())
        }
        Some(Err(e)) => Err(anyhow::Error::new(e).context("Product was not saved")),
        None => anyhow::bail!("No save was requested"),
    }
}
