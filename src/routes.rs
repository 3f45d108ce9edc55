// Navigation routes between the champions list and a season's details

use std::fmt;

const CHAMPIONS_ROUTE: &str = "champions";
const SEASON_DETAILS_PREFIX: &str = "season_details/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Champions,
    SeasonDetails { season: String },
}

impl Screen {
    pub fn route(&self) -> String {
        match self {
            Screen::Champions => CHAMPIONS_ROUTE.to_string(),
            Screen::SeasonDetails { season } => season_details_route(season),
        }
    }

    /// Inverse of [`Screen::route`]. Season routes need a non-empty, single
    /// segment season.
    pub fn from_route(route: &str) -> Option<Screen> {
        if route == CHAMPIONS_ROUTE {
            return Some(Screen::Champions);
        }
        let season = route.strip_prefix(SEASON_DETAILS_PREFIX)?;
        if season.is_empty() || season.contains('/') {
            return None;
        }
        Some(Screen::SeasonDetails {
            season: season.to_string(),
        })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route())
    }
}

pub fn season_details_route(season: &str) -> String {
    format!("{}{}", SEASON_DETAILS_PREFIX, season)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(Screen::Champions.route(), "champions");
        assert_eq!(
            Screen::SeasonDetails {
                season: "2023".to_string()
            }
            .route(),
            "season_details/2023"
        );
    }

    #[test]
    fn test_from_route_round_trip() {
        for screen in [
            Screen::Champions,
            Screen::SeasonDetails {
                season: "1988".to_string(),
            },
        ] {
            assert_eq!(Screen::from_route(&screen.route()), Some(screen));
        }
    }

    #[test]
    fn test_from_route_rejects_malformed_routes() {
        assert_eq!(Screen::from_route("season_details/"), None);
        assert_eq!(Screen::from_route("season_details/2023/1"), None);
        assert_eq!(Screen::from_route("drivers"), None);
        assert_eq!(Screen::from_route(""), None);
    }
}
