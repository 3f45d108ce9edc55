// Error types for f1champions

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum F1Error {
    // Errors for the remote API client
    #[snafu(display("Could not reach the F1 results service: {source}"))]
    Request { source: reqwest::Error },
    #[snafu(display("Request to {url} failed with status {status}"))]
    HttpStatus { status: u16, url: String },
    #[snafu(display("Unexpected response from the F1 results service: {source}"))]
    Decode { source: serde_json::Error },
    #[snafu(display("Invalid season: {season:?}"))]
    InvalidSeason { season: String },

    // Errors while running a background fetch
    #[snafu(display("Fetch task stopped before reporting a result"))]
    FetchTaskFailed,
    #[snafu(display("Could not start the async runtime"))]
    RuntimeError { source: io::Error },
    #[snafu(display("Could not start the desktop app: {description}"))]
    GuiError { description: String },
    #[snafu(display("Error serializing results"))]
    OutputSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}

impl F1Error {
    /// Message shown to the user when a fetch fails. `None` when the error
    /// has nothing meaningful to say, callers then fall back to a generic
    /// message.
    pub fn user_message(&self) -> Option<String> {
        match self {
            F1Error::FetchTaskFailed => None,
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    None
                } else {
                    Some(message)
                }
            }
        }
    }
}
