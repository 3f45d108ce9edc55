// Champions flow: one row per championship season

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::F1Error;
use crate::api::ErgastClient;
use crate::loader::{Repository, ScreenLoader, SingleShotLoader};

/// World champion of one season, as returned by the remote API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Champion {
    pub season: String,
    pub driver: String,
    pub constructor: String,
}

/// Row of the champions list. Keyed by `season`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChampionItem {
    pub season: String,
    pub driver: String,
    pub constructor: String,
}

impl fmt::Display for ChampionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Season: {} | Champion: {} | Constructor: {}",
            self.season, self.driver, self.constructor
        )
    }
}

pub fn champion_item(champion: Champion) -> ChampionItem {
    ChampionItem {
        season: champion.season,
        driver: champion.driver,
        constructor: champion.constructor,
    }
}

pub type ChampionsLoader = SingleShotLoader<(), Champion, ChampionItem>;
pub type ChampionsScreenLoader = ScreenLoader<(), Champion, ChampionItem>;

pub fn champions_loader(repository: Arc<dyn Repository<(), Champion>>) -> ChampionsLoader {
    SingleShotLoader::new(repository, champion_item)
}

pub struct RemoteChampionsRepository {
    api: Arc<ErgastClient>,
}

impl RemoteChampionsRepository {
    pub fn new(api: Arc<ErgastClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Repository<(), Champion> for RemoteChampionsRepository {
    async fn fetch(&self, _key: &()) -> Result<Vec<Champion>, F1Error> {
        self.api.champions().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn champion(season: &str, driver: &str, constructor: &str) -> Champion {
        Champion {
            season: season.to_string(),
            driver: driver.to_string(),
            constructor: constructor.to_string(),
        }
    }

    #[test]
    fn test_champion_item_copies_every_field() {
        let item = champion_item(champion("2021", "Max Verstappen", "Red Bull"));
        assert_eq!(item.season, "2021");
        assert_eq!(item.driver, "Max Verstappen");
        assert_eq!(item.constructor, "Red Bull");
    }

    #[test]
    fn test_champion_item_display() {
        let item = champion_item(champion("2008", "Lewis Hamilton", "McLaren"));
        assert_eq!(
            item.to_string(),
            "Season: 2008 | Champion: Lewis Hamilton | Constructor: McLaren"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_mapping_preserves_count_and_order(
            rows in proptest::collection::vec(("[0-9]{4}", "[A-Za-z ]{1,20}", "[A-Za-z ]{1,20}"), 0..40)
        ) {
            let champions: Vec<Champion> = rows
                .iter()
                .map(|(s, d, c)| champion(s, d, c))
                .collect();
            let items: Vec<ChampionItem> = champions.clone().into_iter().map(champion_item).collect();

            prop_assert_eq!(items.len(), champions.len());
            for (item, source) in items.iter().zip(champions.iter()) {
                prop_assert_eq!(&item.season, &source.season);
                prop_assert_eq!(&item.driver, &source.driver);
                prop_assert_eq!(&item.constructor, &source.constructor);
            }
        }
    }
}
