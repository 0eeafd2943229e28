mod api;
mod cli;
mod config;
mod models;
mod stats;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use api::WorkoutClient;
use cli::args::{Cli, Commands};
use cli::handlers;
use config::{AppConfig, Preferences};
use models::ChartMetrics;
use store::RecordStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let prefs_path = AppConfig::preferences_path()?;
    let mut prefs = Preferences::load(&prefs_path).context("Loading preferences")?;

    let base_url = config.api.resolve_base_url(cli.api_url.as_deref());
    log::debug!("Using backend at {}", base_url);
    let mut store = RecordStore::new(WorkoutClient::new(base_url));

    match cli.command {
        // Preference commands never touch the backend
        Some(Commands::Units { unit }) => handlers::handle_units(&mut prefs, unit)?,
        Some(Commands::Theme { name }) => handlers::handle_theme(&mut prefs, name)?,
        Some(Commands::History { visibility }) => handlers::handle_history(&mut prefs, visibility)?,
        Some(Commands::Config { set_url }) => {
            handlers::handle_config(&mut config, set_url, cli.api_url.as_deref())?
        }

        Some(Commands::Log(args)) => handlers::handle_log(&mut store, &prefs, args).await?,

        // Read commands work on a freshly fetched list
        Some(Commands::List { page }) => {
            store.refresh().await;
            handlers::handle_list(&store, &prefs, page)?
        }
        Some(Commands::Delete { id, yes }) => {
            store.refresh().await;
            handlers::handle_delete(&mut store, id, yes).await?
        }
        Some(Commands::Stats) => {
            store.refresh().await;
            handlers::handle_stats(&store)?
        }
        Some(Commands::Heatmap { year }) => {
            store.refresh().await;
            handlers::handle_heatmap(&store, &prefs, year)?
        }
        Some(Commands::Progress { no_swing, no_getup }) => {
            store.refresh().await;
            let metrics = ChartMetrics {
                swing_weight: !no_swing,
                getup_weight: !no_getup,
            };
            handlers::handle_progress(&store, &prefs, metrics)?
        }

        // No subcommand → launch TUI
        None => tui::app::run(store, prefs).await?,
    }

    Ok(())
}
