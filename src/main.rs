use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::catalog::Catalogs;
use crate::config::KeyResolver;

mod app;
mod catalog;
mod cli;
mod config;
mod form;
mod theme;
mod timer;
pub mod tui;
mod ui;
mod widget;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting listing-form");

    let args = cli::Args::parse();

    let config = config::load(args.config.as_deref())?;
    let catalogs = match args.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => Catalogs::load(path)?,
        None => Catalogs::default(),
    };
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
    let theme = theme::theme_from_name(&config.theme.name);

    let app = App::new(&config, catalogs, resolver, theme, args.location.as_deref());
    if let Some(selection) = app.run().await? {
        println!("{selection}");
    }

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("listing-form").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "listing-form.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
