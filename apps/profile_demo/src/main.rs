use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::UserController;
use shared::domain::User;
use storage::InMemoryUserStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Overrides, Settings};

/// Seeds an in-memory profile, prints its label, and toggles the subscription.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    overrides: Overrides,
    /// Print the final user record as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug)]
struct RunReport {
    labels: Vec<String>,
    user: User,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings().with_overrides(&args.overrides);
    settings.validate()?;
    info!(?settings, "starting profile demo");

    let report = run(&settings).await?;
    info!(labels = report.labels.len(), user = %report.user, "profile demo finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.user)?);
    }

    Ok(())
}

/// Fetches once, runs the configured toggles, and prints every label the
/// subscription observes.
async fn run(settings: &Settings) -> Result<RunReport> {
    let store = Arc::new(InMemoryUserStore::with_latency(
        settings.seed_user(),
        settings.latency(),
    ));
    let controller = Arc::new(UserController::new(Arc::clone(&store)));

    let mut labels = controller.subscribe();
    let printer = tokio::spawn(async move {
        let mut seen = Vec::new();
        let initial = labels.borrow_and_update().label().to_string();
        println!("{initial}");
        seen.push(initial);
        while labels.changed().await.is_ok() {
            let label = labels.borrow_and_update().label().to_string();
            println!("{label}");
            seen.push(label);
        }
        seen
    });

    controller.fetch_user().await?;
    for round in 1..=settings.toggles {
        if !controller.toggle_subscription().await? {
            info!(round, "subscription toggle refused");
        }
    }

    // Dropping the last controller handle closes the label channel.
    drop(controller);
    let labels = printer.await?;

    Ok(RunReport {
        labels,
        user: store.snapshot().await,
    })
}
