// Plain text rendering of a view state, used by the command line mode

use std::fmt::Display;

use serde::Serialize;

use crate::F1Error;
use crate::loader::{LoadPhase, ViewState};

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No results";

/// Renders the same branches the screens show: title, then either the
/// loading marker, the error, or one line per item.
pub fn render<D: Display>(state: &ViewState<D>) -> String {
    let mut lines = Vec::new();
    if let Some(title) = &state.title {
        lines.push(title.clone());
    }
    match state.phase() {
        LoadPhase::Loading => lines.push(LOADING_TEXT.to_string()),
        LoadPhase::Failed => lines.push(format!(
            "Error: {}",
            state.error_message.as_deref().unwrap_or_default()
        )),
        LoadPhase::Loaded => lines.extend(state.items.iter().map(|item| item.to_string())),
        LoadPhase::Idle => lines.push(EMPTY_TEXT.to_string()),
    }
    lines.join("\n")
}

pub fn render_json<D: Serialize>(state: &ViewState<D>) -> Result<String, F1Error> {
    serde_json::to_string_pretty(&state.items)
        .map_err(|e| F1Error::OutputSerializeError { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season_details::RaceItem;

    fn race(round: &str, name: &str) -> RaceItem {
        RaceItem {
            round: round.to_string(),
            race_name: name.to_string(),
            date: "2023-03-05".to_string(),
            winner_name: "Max Verstappen".to_string(),
            constructor_name: "Red Bull".to_string(),
        }
    }

    #[test]
    fn test_render_loaded_state() {
        let state = ViewState {
            title: Some("Season 2023".to_string()),
            items: vec![race("1", "Bahrain Grand Prix"), race("2", "Saudi Arabian Grand Prix")],
            ..ViewState::default()
        };
        assert_eq!(
            render(&state),
            "Season 2023\n\
             Round 1 | Bahrain Grand Prix | 2023-03-05 | Winner: Max Verstappen | Constructor: Red Bull\n\
             Round 2 | Saudi Arabian Grand Prix | 2023-03-05 | Winner: Max Verstappen | Constructor: Red Bull"
        );
    }

    #[test]
    fn test_render_loading_and_error() {
        let loading = ViewState::<RaceItem> {
            is_loading: true,
            ..ViewState::default()
        };
        assert_eq!(render(&loading), LOADING_TEXT);

        let failed = ViewState::<RaceItem> {
            error_message: Some("Unexpected error".to_string()),
            ..ViewState::default()
        };
        assert_eq!(render(&failed), "Error: Unexpected error");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&ViewState::<RaceItem>::default()), EMPTY_TEXT);
    }

    #[test]
    fn test_render_json_lists_items() {
        let state = ViewState {
            items: vec![race("1", "Bahrain Grand Prix")],
            ..ViewState::default()
        };
        let json: serde_json::Value = serde_json::from_str(&render_json(&state).unwrap()).unwrap();
        assert_eq!(json[0]["round"], "1");
        assert_eq!(json[0]["winner_name"], "Max Verstappen");
    }
}
