// Season details flow: the winner of every race of one season

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::F1Error;
use crate::api::ErgastClient;
use crate::loader::{Repository, ScreenLoader, SingleShotLoader};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceResult {
    pub round: String,
    pub race_name: String,
    pub date: String,
    pub winner: String,
    pub constructor: String,
}

/// Row of the season details list. Keyed by `round`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RaceItem {
    pub round: String,
    pub race_name: String,
    pub date: String,
    pub winner_name: String,
    pub constructor_name: String,
}

impl fmt::Display for RaceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {} | {} | {} | Winner: {} | Constructor: {}",
            self.round, self.race_name, self.date, self.winner_name, self.constructor_name
        )
    }
}

pub fn race_item(result: RaceResult) -> RaceItem {
    RaceItem {
        round: result.round,
        race_name: result.race_name,
        date: result.date,
        winner_name: result.winner,
        constructor_name: result.constructor,
    }
}

pub fn season_title(season: &String) -> String {
    format!("Season {}", season)
}

pub type SeasonDetailsLoader = SingleShotLoader<String, RaceResult, RaceItem>;
pub type SeasonDetailsScreenLoader = ScreenLoader<String, RaceResult, RaceItem>;

pub fn season_details_loader(
    repository: Arc<dyn Repository<String, RaceResult>>,
) -> SeasonDetailsLoader {
    SingleShotLoader::new(repository, race_item).with_title(season_title)
}

pub struct RemoteSeasonDetailsRepository {
    api: Arc<ErgastClient>,
}

impl RemoteSeasonDetailsRepository {
    pub fn new(api: Arc<ErgastClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Repository<String, RaceResult> for RemoteSeasonDetailsRepository {
    async fn fetch(&self, season: &String) -> Result<Vec<RaceResult>, F1Error> {
        self.api.race_winners(season).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_item_renames_winner_fields() {
        let item = race_item(RaceResult {
            round: "3".to_string(),
            race_name: "Australian Grand Prix".to_string(),
            date: "2023-04-02".to_string(),
            winner: "Max Verstappen".to_string(),
            constructor: "Red Bull".to_string(),
        });
        assert_eq!(
            item,
            RaceItem {
                round: "3".to_string(),
                race_name: "Australian Grand Prix".to_string(),
                date: "2023-04-02".to_string(),
                winner_name: "Max Verstappen".to_string(),
                constructor_name: "Red Bull".to_string(),
            }
        );
    }

    #[test]
    fn test_season_title() {
        assert_eq!(season_title(&"2023".to_string()), "Season 2023");
    }

    #[tokio::test]
    async fn test_remote_repository_surfaces_invalid_season() {
        let api = Arc::new(ErgastClient::new("http://127.0.0.1:9", 100));
        let mut loader = season_details_loader(Arc::new(RemoteSeasonDetailsRepository::new(api)));

        loader.load(String::new()).await;

        let state = loader.state();
        assert!(!state.is_loading);
        assert!(state.items.is_empty());
        assert_eq!(state.error_message.as_deref(), Some("Invalid season: \"\""));
        assert_eq!(state.title, None);
    }
}
