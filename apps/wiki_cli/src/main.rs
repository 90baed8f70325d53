use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use content_api::HttpContentApi;
use overlay_core::{theme::OverlayColourScheme, OverlayEvent, WikiOverlay};
use shared::{domain::Language, protocol::INDEX_PATH};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::info;

mod config;
mod display;

use config::load_settings;
use display::TerminalDisplay;

#[derive(Parser, Debug)]
struct Args {
    /// Wiki path to open first.
    #[arg(long, default_value = INDEX_PATH)]
    path: String,
    /// Culture code overriding the configured language (e.g. ja, pt-br).
    #[arg(long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = load_settings();

    let language = args
        .language
        .as_deref()
        .and_then(Language::from_culture_code)
        .unwrap_or_else(|| settings.language());
    let (language_tx, language_rx) = watch::channel(language);

    let api = Arc::new(HttpContentApi::new(
        settings.api_url.clone(),
        settings.website_root_url.clone(),
    ));
    let display = Arc::new(TerminalDisplay::new(OverlayColourScheme::orange()));
    let overlay = WikiOverlay::new(api, display, language_rx);

    let mut events = overlay.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                OverlayEvent::LoadingShown => println!("loading..."),
                OverlayEvent::LoadFailed {
                    requested_path,
                    message,
                } => eprintln!("failed to fetch '{requested_path}': {message}"),
                OverlayEvent::PageDisplayed { path } => info!(path = %path, "page displayed"),
                _ => {}
            }
        }
    });

    overlay.show_page(&args.path).await;

    println!("commands: <path> | up | index | lang <code> | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => break,
            "up" => overlay.show_parent_page().await,
            "index" => overlay.show_page(INDEX_PATH).await,
            other => {
                if let Some(code) = other.strip_prefix("lang ") {
                    match Language::from_culture_code(code.trim()) {
                        Some(lang) => {
                            let _ = language_tx.send(lang);
                            println!("language set to {}", lang.culture_code());
                        }
                        None => eprintln!("unknown culture code '{}'", code.trim()),
                    }
                } else {
                    overlay.show_page(other).await;
                }
            }
        }
    }

    overlay.dispose().await;
    Ok(())
}
