// Client for the Ergast-compatible F1 results API

use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer};

use crate::F1Error;
use crate::champions::Champion;
use crate::season_details::RaceResult;

/// One page of an Ergast listing.
///
/// `fetched` counts the raw entries of the page, including the ones that
/// were skipped while mapping, so it can be used to advance the offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: usize,
    pub fetched: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Offset of the next page, `None` once the listing is exhausted.
    pub fn next_offset(&self, offset: usize) -> Option<usize> {
        let next = offset + self.fetched;
        if self.fetched == 0 || next >= self.total {
            None
        } else {
            Some(next)
        }
    }
}

fn count_from_str<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(rename = "MRData")]
    data: StandingsData,
}

#[derive(Debug, Deserialize)]
struct StandingsData {
    #[serde(deserialize_with = "count_from_str")]
    total: usize,
    #[serde(rename = "StandingsTable")]
    table: StandingsTable,
}

#[derive(Debug, Deserialize)]
struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
struct StandingsList {
    season: String,
    #[serde(rename = "DriverStandings", default)]
    driver_standings: Vec<DriverStanding>,
}

#[derive(Debug, Deserialize)]
struct DriverStanding {
    #[serde(rename = "Driver")]
    driver: Driver,
    #[serde(rename = "Constructors", default)]
    constructors: Vec<Constructor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Driver {
    given_name: String,
    family_name: String,
}

impl Driver {
    fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

#[derive(Debug, Deserialize)]
struct Constructor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RaceResponse {
    #[serde(rename = "MRData")]
    data: RaceData,
}

#[derive(Debug, Deserialize)]
struct RaceData {
    #[serde(deserialize_with = "count_from_str")]
    total: usize,
    #[serde(rename = "RaceTable")]
    table: RaceTable,
}

#[derive(Debug, Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<Race>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Race {
    round: String,
    race_name: String,
    date: String,
    #[serde(rename = "Results", default)]
    results: Vec<ClassifiedResult>,
}

#[derive(Debug, Deserialize)]
struct ClassifiedResult {
    #[serde(rename = "Driver")]
    driver: Driver,
    #[serde(rename = "Constructor")]
    constructor: Constructor,
}

/// Decodes one page of `driverstandings/1.json` into season champions.
pub fn parse_champions_page(body: &str) -> Result<Page<Champion>, F1Error> {
    let response: StandingsResponse =
        serde_json::from_str(body).map_err(|e| F1Error::Decode { source: e })?;
    let lists = response.data.table.lists;
    let fetched = lists.len();

    let items = lists
        .into_iter()
        .filter_map(|list| {
            let Some(leader) = list.driver_standings.first() else {
                warn!("Season {} has no driver standings, skipping", list.season);
                return None;
            };
            Some(Champion {
                driver: leader.driver.full_name(),
                constructor: leader.constructors.iter().map(|c| &c.name).join(" / "),
                season: list.season,
            })
        })
        .collect();

    Ok(Page {
        total: response.data.total,
        fetched,
        items,
    })
}

/// Decodes one page of `{season}/results/1.json` into race winners.
pub fn parse_race_winners_page(body: &str) -> Result<Page<RaceResult>, F1Error> {
    let response: RaceResponse =
        serde_json::from_str(body).map_err(|e| F1Error::Decode { source: e })?;
    let races = response.data.table.races;
    let fetched = races.len();

    let items = races
        .into_iter()
        .filter_map(|race| {
            // races that have not been run yet come back without results
            let winner = race.results.first()?;
            Some(RaceResult {
                winner: winner.driver.full_name(),
                constructor: winner.constructor.name.clone(),
                round: race.round,
                race_name: race.race_name,
                date: race.date,
            })
        })
        .collect();

    Ok(Page {
        total: response.data.total,
        fetched,
        items,
    })
}

/// Seasons are addressed by their year.
pub fn validate_season(season: &str) -> Result<(), F1Error> {
    if season.is_empty() || !season.chars().all(|c| c.is_ascii_digit()) {
        return Err(F1Error::InvalidSeason {
            season: season.to_string(),
        });
    }
    Ok(())
}

pub struct ErgastClient {
    client: reqwest::Client,
    base_url: String,
    page_limit: usize,
}

impl ErgastClient {
    pub fn new(base_url: &str, page_limit: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            page_limit: page_limit.max(1),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// World champion of every season, oldest first.
    pub async fn champions(&self) -> Result<Vec<Champion>, F1Error> {
        let champions = self
            .fetch_all("driverstandings/1.json", parse_champions_page)
            .await?;
        info!("Fetched {} champions", champions.len());
        Ok(champions)
    }

    /// Winner of every race run in `season`, in round order.
    pub async fn race_winners(&self, season: &str) -> Result<Vec<RaceResult>, F1Error> {
        validate_season(season)?;
        let path = format!("{}/results/1.json", season);
        let races = self.fetch_all(&path, parse_race_winners_page).await?;
        info!("Fetched {} race winners for season {}", races.len(), season);
        Ok(races)
    }

    async fn fetch_all<T>(
        &self,
        path: &str,
        parse: fn(&str) -> Result<Page<T>, F1Error>,
    ) -> Result<Vec<T>, F1Error> {
        let mut results = Vec::new();
        let mut offset = 0;
        loop {
            let url = format!(
                "{}/{}?limit={}&offset={}",
                self.base_url, path, self.page_limit, offset
            );
            let page = parse(&self.get(&url).await?)?;
            let next = page.next_offset(offset);
            results.extend(page.items);
            match next {
                Some(next) => offset = next,
                None => break,
            }
        }
        Ok(results)
    }

    async fn get(&self, url: &str) -> Result<String, F1Error> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| F1Error::Request { source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(F1Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| F1Error::Request { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDINGS_PAGE: &str = r#"{"MRData":{"xmlns":"","series":"f1","limit":"2","offset":"0","total":"3","StandingsTable":{"driverStandings":"1","StandingsLists":[
        {"season":"1950","round":"7","DriverStandings":[{"position":"1","points":"30","wins":"3","Driver":{"driverId":"farina","givenName":"Nino","familyName":"Farina","nationality":"Italian"},"Constructors":[{"constructorId":"alfa","name":"Alfa Romeo"}]}]},
        {"season":"1951","round":"8","DriverStandings":[{"position":"1","points":"31","wins":"3","Driver":{"driverId":"fangio","givenName":"Juan","familyName":"Fangio","nationality":"Argentine"},"Constructors":[{"constructorId":"alfa","name":"Alfa Romeo"},{"constructorId":"ferrari","name":"Ferrari"}]}]}
    ]}}}"#;

    const RACES_PAGE: &str = r#"{"MRData":{"limit":"100","offset":"0","total":"3","RaceTable":{"season":"2023","position":"1","Races":[
        {"season":"2023","round":"1","raceName":"Bahrain Grand Prix","date":"2023-03-05","Circuit":{"circuitId":"bahrain"},"Results":[{"position":"1","Driver":{"givenName":"Max","familyName":"Verstappen"},"Constructor":{"name":"Red Bull"}}]},
        {"season":"2023","round":"2","raceName":"Saudi Arabian Grand Prix","date":"2023-03-19","Results":[{"position":"1","Driver":{"givenName":"Sergio","familyName":"Pérez"},"Constructor":{"name":"Red Bull"}}]},
        {"season":"2023","round":"3","raceName":"Australian Grand Prix","date":"2023-04-02","Results":[]}
    ]}}}"#;

    #[test]
    fn test_parse_champions_page() {
        let page = parse_champions_page(STANDINGS_PAGE).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.fetched, 2);
        assert_eq!(
            page.items,
            vec![
                Champion {
                    season: "1950".to_string(),
                    driver: "Nino Farina".to_string(),
                    constructor: "Alfa Romeo".to_string(),
                },
                Champion {
                    season: "1951".to_string(),
                    driver: "Juan Fangio".to_string(),
                    constructor: "Alfa Romeo / Ferrari".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_champions_skips_empty_standings() {
        let body = r#"{"MRData":{"total":"1","StandingsTable":{"StandingsLists":[{"season":"2030","DriverStandings":[]}]}}}"#;
        let page = parse_champions_page(body).unwrap();
        assert_eq!(page.fetched, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_parse_race_winners_skips_races_without_results() {
        let page = parse_race_winners_page(RACES_PAGE).unwrap();
        assert_eq!(page.fetched, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.items[1],
            RaceResult {
                round: "2".to_string(),
                race_name: "Saudi Arabian Grand Prix".to_string(),
                date: "2023-03-19".to_string(),
                winner: "Sergio Pérez".to_string(),
                constructor: "Red Bull".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_body_is_a_decode_error() {
        let result = parse_race_winners_page("<html>rate limited</html>");
        assert!(matches!(result, Err(F1Error::Decode { .. })));
    }

    #[test]
    fn test_non_numeric_total_is_a_decode_error() {
        let body = r#"{"MRData":{"total":"many","RaceTable":{"Races":[]}}}"#;
        assert!(matches!(
            parse_race_winners_page(body),
            Err(F1Error::Decode { .. })
        ));
    }

    #[test]
    fn test_next_offset_follows_total() {
        let page = Page::<()> {
            total: 75,
            fetched: 30,
            items: vec![],
        };
        assert_eq!(page.next_offset(0), Some(30));
        assert_eq!(page.next_offset(30), Some(60));
        assert_eq!(page.next_offset(45), None);
    }

    #[test]
    fn test_next_offset_stops_on_empty_page() {
        let page = Page::<()> {
            total: 75,
            fetched: 0,
            items: vec![],
        };
        assert_eq!(page.next_offset(10), None);
    }

    #[test]
    fn test_validate_season() {
        assert!(validate_season("2023").is_ok());
        assert!(validate_season("").is_err());
        assert!(validate_season("20x3").is_err());
        assert!(validate_season("../drivers").is_err());
    }

    #[tokio::test]
    async fn test_race_winners_rejects_invalid_season_without_request() {
        let client = ErgastClient::new("http://127.0.0.1:9/", 100);
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        let result = client.race_winners("").await;
        assert!(matches!(result, Err(F1Error::InvalidSeason { .. })));
    }
}
