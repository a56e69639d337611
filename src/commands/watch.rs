use crate::config::Config;
use crate::display::TerminalDisplay;
use crate::session::Session;
use anyhow::{Context, Result};

/// Live countdown until Ctrl-C.
///
/// A failed fetch leaves the error on screen; there is no retry.
pub async fn watch(config: &Config) -> Result<()> {
    let session = Session::new(config)?;
    let mut rx = session.subscribe();
    let cancel = session.cancel_token();

    let mut display = TerminalDisplay::enter()?;
    let initial = rx.borrow_and_update().clone();
    display.draw(&initial)?;

    let pipeline = session.run();
    tokio::pin!(pipeline);
    let mut pipeline_done = false;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                signal.context("Failed to listen for Ctrl-C")?;
                log::debug!("interrupted, tearing down countdown");
                cancel.cancel();
                break;
            }
            result = &mut pipeline, if !pipeline_done => {
                pipeline_done = true;
                if let Err(e) = result {
                    log::debug!("session ended: {}", e);
                }
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                display.draw(&state)?;
            }
        }
    }

    display.leave()
}
