// Library interface for f1champions
// This allows integration tests to access internal modules

pub mod api;
pub mod champions;
pub mod config;
pub mod errors;
pub mod loader;
pub mod report;
pub mod routes;
pub mod season_details;

// Re-export commonly used types
pub use champions::{Champion, ChampionItem, RemoteChampionsRepository};
pub use errors::F1Error;
pub use loader::{LoadPhase, Repository, ScreenLoader, SingleShotLoader, ViewState};
pub use routes::Screen;
pub use season_details::{RaceItem, RaceResult, RemoteSeasonDetailsRepository};
