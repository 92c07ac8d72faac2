//! chat-widget - terminal chat client
//!
//! Keeps a linear conversation, sends the full history to a chat endpoint on
//! every user turn and shows the reply.

mod config;
mod conversation;
mod input;
mod panel;
mod runtime;
mod state_machine;
mod transport;
mod tui;

use config::WidgetConfig;
use runtime::ChatController;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use transport::{HttpTransport, LoggingTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::from_env()?;
    init_logging(&config)?;

    let http = HttpTransport::new(&config)?;
    let transport = LoggingTransport::new(Arc::new(http));
    let mut controller = ChatController::new(transport);

    tracing::info!(
        endpoint = %config.endpoint,
        timeout_secs = ?config.request_timeout.map(|t| t.as_secs()),
        "Chat widget starting"
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = tui::run(&mut terminal, &mut controller).await;
    tui::restore()?;
    terminal.show_cursor()?;
    result?;

    tracing::info!(
        turns = controller.conversation().len(),
        "Chat widget stopped"
    );
    Ok(())
}

/// JSON logs to a file; the terminal belongs to the UI
fn init_logging(config: &WidgetConfig) -> std::io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_widget=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}
