pub mod commands;
pub mod config;
pub mod countdown;
pub mod display;
pub mod error;
pub mod location;
pub mod logging;
pub mod prayer;
pub mod session;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
