//! Query-parameter construction for the video details endpoint
//!
//! The stats API expects every request to carry its full 31-field parameter
//! set, most of which are fixed defaults. This module owns the
//! `ContextMeasure` vocabulary and the `VideoRequestParams` builder that
//! produces the complete mapping.

use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;

/// League identifier for the NBA ("00" in the stats API)
const LEAGUE_ID: &str = "00";

/// Season used when the caller does not specify one
const DEFAULT_SEASON: &str = "2024-25";

/// Season type used when the caller does not specify one
const DEFAULT_SEASON_TYPE: &str = "Regular Season";

/// Upper bound of the clock range covering a full game, in seconds
const FULL_GAME_END_RANGE: u32 = 28_800;

/// Statistical event categories accepted by the video details endpoint
///
/// The variant names match the wire values the API expects, so `as_str`
/// returns the exact query-parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextMeasure {
    /// Three-point field goal made
    Fg3m,
    /// Three-point field goal attempted
    Fg3a,
    /// Field goal made
    Fgm,
    /// Field goal attempted
    Fga,
    /// Offensive rebound
    Oreb,
    /// Defensive rebound
    Dreb,
    /// Total rebound
    Reb,
    /// Assist
    Ast,
    /// Steal
    Stl,
    /// Block
    Blk,
    /// Turnover
    Tov,
}

impl ContextMeasure {
    /// Returns the wire value used in query parameters and cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextMeasure::Fg3m => "FG3M",
            ContextMeasure::Fg3a => "FG3A",
            ContextMeasure::Fgm => "FGM",
            ContextMeasure::Fga => "FGA",
            ContextMeasure::Oreb => "OREB",
            ContextMeasure::Dreb => "DREB",
            ContextMeasure::Reb => "REB",
            ContextMeasure::Ast => "AST",
            ContextMeasure::Stl => "STL",
            ContextMeasure::Blk => "BLK",
            ContextMeasure::Tov => "TOV",
        }
    }
}

impl fmt::Display for ContextMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ContextMeasure {
    fn default() -> Self {
        ContextMeasure::Fgm
    }
}

/// Errors that can occur while building query parameters
#[derive(Debug, Error)]
pub enum ParamsError {
    /// An optional identifier was supplied but is not numeric
    #[error("invalid {field} '{value}': {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Ephemeral builder for one video-details request
///
/// Holds the semantic inputs and expands them into the fixed 31-field
/// parameter mapping via [`build`](VideoRequestParams::build). Created per
/// call and discarded after building.
#[derive(Debug, Clone)]
pub struct VideoRequestParams {
    /// Game identifier, passed through unchanged
    pub game_id: String,
    /// Optional player identifier; must be numeric when present
    pub player_id: Option<String>,
    /// Optional team identifier; must be numeric when present
    pub team_id: Option<String>,
    /// Event category to filter videos by
    pub context_measure: ContextMeasure,
    /// Season string, e.g. "2024-25"
    pub season: String,
    /// Season type, e.g. "Regular Season"
    pub season_type: String,
}

impl VideoRequestParams {
    /// Creates params for a game with the given context measure
    pub fn new(game_id: impl Into<String>, context_measure: ContextMeasure) -> Self {
        Self {
            game_id: game_id.into(),
            player_id: None,
            team_id: None,
            context_measure,
            season: DEFAULT_SEASON.to_string(),
            season_type: DEFAULT_SEASON_TYPE.to_string(),
        }
    }

    /// Sets the player identifier filter
    pub fn with_player_id(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    /// Sets the team identifier filter
    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Overrides the default season
    #[allow(dead_code)]
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = season.into();
        self
    }

    /// Overrides the default season type
    #[allow(dead_code)]
    pub fn with_season_type(mut self, season_type: impl Into<String>) -> Self {
        self.season_type = season_type.into();
        self
    }

    /// Builds the full query-parameter mapping the API requires
    ///
    /// Always emits the full 31-field set. Optional identifiers become their
    /// integer value when present and non-empty, else `0`; all other
    /// unfilterable fields carry their fixed defaults.
    ///
    /// # Returns
    /// * `Ok(Map)` - the complete parameter mapping
    /// * `Err(ParamsError)` - if a supplied identifier is non-numeric
    pub fn build(&self) -> Result<Map<String, Value>, ParamsError> {
        let team_id = numeric_id(self.team_id.as_deref(), "team id")?;
        let player_id = numeric_id(self.player_id.as_deref(), "player id")?;

        let mut params = Map::new();
        params.insert("LeagueID".to_string(), json!(LEAGUE_ID));
        params.insert("Season".to_string(), json!(self.season));
        params.insert("SeasonType".to_string(), json!(self.season_type));
        params.insert("TeamID".to_string(), json!(team_id));
        params.insert("PlayerID".to_string(), json!(player_id));
        params.insert("GameID".to_string(), json!(self.game_id));
        params.insert(
            "ContextMeasure".to_string(),
            json!(self.context_measure.as_str()),
        );
        params.insert("Outcome".to_string(), json!(""));
        params.insert("Location".to_string(), json!(""));
        params.insert("Month".to_string(), json!(0));
        params.insert("SeasonSegment".to_string(), json!(""));
        params.insert("DateFrom".to_string(), json!(""));
        params.insert("DateTo".to_string(), json!(""));
        params.insert("OpponentTeamID".to_string(), json!(0));
        params.insert("VsConference".to_string(), json!(""));
        params.insert("VsDivision".to_string(), json!(""));
        params.insert("Position".to_string(), json!(""));
        params.insert("RookieYear".to_string(), json!(""));
        params.insert("GameSegment".to_string(), json!(""));
        params.insert("Period".to_string(), json!(0));
        params.insert("LastNGames".to_string(), json!(0));
        params.insert("ClutchTime".to_string(), json!(""));
        params.insert("AheadBehind".to_string(), json!(""));
        params.insert("PointDiff".to_string(), json!(""));
        params.insert("RangeType".to_string(), json!(0));
        params.insert("StartPeriod".to_string(), json!(0));
        params.insert("EndPeriod".to_string(), json!(0));
        params.insert("StartRange".to_string(), json!(0));
        params.insert("EndRange".to_string(), json!(FULL_GAME_END_RANGE));
        params.insert("ContextFilter".to_string(), json!(""));
        params.insert("OppPlayerID".to_string(), json!(""));

        Ok(params)
    }
}

/// Converts an optional identifier string to its numeric value, `0` if absent
fn numeric_id(id: Option<&str>, field: &'static str) -> Result<i64, ParamsError> {
    match id {
        Some(value) if !value.is_empty() => {
            value.parse::<i64>().map_err(|source| ParamsError::InvalidId {
                field,
                value: value.to_string(),
                source,
            })
        }
        _ => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All 31 field names the endpoint requires, in no particular order
    const EXPECTED_KEYS: [&str; 31] = [
        "LeagueID",
        "Season",
        "SeasonType",
        "TeamID",
        "PlayerID",
        "GameID",
        "ContextMeasure",
        "Outcome",
        "Location",
        "Month",
        "SeasonSegment",
        "DateFrom",
        "DateTo",
        "OpponentTeamID",
        "VsConference",
        "VsDivision",
        "Position",
        "RookieYear",
        "GameSegment",
        "Period",
        "LastNGames",
        "ClutchTime",
        "AheadBehind",
        "PointDiff",
        "RangeType",
        "StartPeriod",
        "EndPeriod",
        "StartRange",
        "EndRange",
        "ContextFilter",
        "OppPlayerID",
    ];

    #[test]
    fn test_build_emits_all_required_fields() {
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Fgm)
            .build()
            .unwrap();

        assert_eq!(params.len(), 31);
        for key in EXPECTED_KEYS {
            assert!(params.contains_key(key), "missing field {key}");
        }
    }

    #[test]
    fn test_build_field_types() {
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Ast)
            .with_player_id("201939")
            .with_team_id("1610612744")
            .build()
            .unwrap();

        // Numeric fields are JSON numbers
        for key in [
            "TeamID",
            "PlayerID",
            "Month",
            "OpponentTeamID",
            "Period",
            "LastNGames",
            "RangeType",
            "StartPeriod",
            "EndPeriod",
            "StartRange",
            "EndRange",
        ] {
            assert!(params[key].is_number(), "{key} should be numeric");
        }

        // Everything else is a string
        for key in [
            "LeagueID",
            "Season",
            "SeasonType",
            "GameID",
            "ContextMeasure",
            "Outcome",
            "Location",
            "SeasonSegment",
            "DateFrom",
            "DateTo",
            "VsConference",
            "VsDivision",
            "Position",
            "RookieYear",
            "GameSegment",
            "ClutchTime",
            "AheadBehind",
            "PointDiff",
            "ContextFilter",
            "OppPlayerID",
        ] {
            assert!(params[key].is_string(), "{key} should be a string");
        }
    }

    #[test]
    fn test_absent_ids_default_to_zero() {
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Fgm)
            .build()
            .unwrap();

        assert_eq!(params["TeamID"], json!(0));
        assert_eq!(params["PlayerID"], json!(0));
    }

    #[test]
    fn test_empty_string_ids_default_to_zero() {
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Fgm)
            .with_player_id("")
            .with_team_id("")
            .build()
            .unwrap();

        assert_eq!(params["TeamID"], json!(0));
        assert_eq!(params["PlayerID"], json!(0));
    }

    #[test]
    fn test_numeric_ids_are_converted() {
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Fg3m)
            .with_player_id("201939")
            .with_team_id("1610612744")
            .build()
            .unwrap();

        assert_eq!(params["PlayerID"], json!(201939));
        assert_eq!(params["TeamID"], json!(1610612744));
    }

    #[test]
    fn test_non_numeric_id_errors() {
        let result = VideoRequestParams::new("0022400001", ContextMeasure::Fgm)
            .with_player_id("curry")
            .build();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("player id"));
        assert!(err.to_string().contains("curry"));
    }

    #[test]
    fn test_clock_range_covers_full_game() {
        // StartRange/EndRange are fixed regardless of other inputs
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Tov)
            .with_player_id("1629029")
            .with_season("2023-24")
            .build()
            .unwrap();

        assert_eq!(params["StartRange"], json!(0));
        assert_eq!(params["EndRange"], json!(28800));
    }

    #[test]
    fn test_passthrough_fields() {
        let params = VideoRequestParams::new("0022400123", ContextMeasure::Blk)
            .with_season("2022-23")
            .with_season_type("Playoffs")
            .build()
            .unwrap();

        assert_eq!(params["LeagueID"], json!("00"));
        assert_eq!(params["GameID"], json!("0022400123"));
        assert_eq!(params["Season"], json!("2022-23"));
        assert_eq!(params["SeasonType"], json!("Playoffs"));
        assert_eq!(params["ContextMeasure"], json!("BLK"));
    }

    #[test]
    fn test_context_measure_wire_values() {
        let cases = [
            (ContextMeasure::Fg3m, "FG3M"),
            (ContextMeasure::Fg3a, "FG3A"),
            (ContextMeasure::Fgm, "FGM"),
            (ContextMeasure::Fga, "FGA"),
            (ContextMeasure::Oreb, "OREB"),
            (ContextMeasure::Dreb, "DREB"),
            (ContextMeasure::Reb, "REB"),
            (ContextMeasure::Ast, "AST"),
            (ContextMeasure::Stl, "STL"),
            (ContextMeasure::Blk, "BLK"),
            (ContextMeasure::Tov, "TOV"),
        ];

        for (measure, wire) in cases {
            assert_eq!(measure.as_str(), wire);
            assert_eq!(measure.to_string(), wire);
        }
    }

    #[test]
    fn test_default_context_measure() {
        assert_eq!(ContextMeasure::default(), ContextMeasure::Fgm);
    }

    #[test]
    fn test_default_season_fields() {
        let params = VideoRequestParams::new("0022400001", ContextMeasure::Fgm);
        assert_eq!(params.season, "2024-25");
        assert_eq!(params.season_type, "Regular Season");
    }
}
