use crate::OutputFormat;
use crate::config::Config;
use crate::display::{DisplayState, render_lines};
use crate::session::Session;
use anyhow::{Context, Result};

/// Print one snapshot of the countdown. Returns false if the session failed.
pub async fn status(config: &Config, format: OutputFormat) -> Result<bool> {
    let session = Session::new(config)?;
    let state = session.snapshot().await;

    match format {
        OutputFormat::Text => {
            for line in render_lines(&state) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&state).context("Failed to serialize status")?;
            println!("{}", json);
        }
    }

    Ok(!matches!(state, DisplayState::Error(_)))
}
