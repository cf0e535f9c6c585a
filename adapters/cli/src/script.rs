//! Textual pointer scripts and panel values accepted on the command line.

use board_editor_core::{BarricadeMask, Command, Direction, TileNum};
use thiserror::Error;

/// Separator between a pointer action and its tile number.
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while parsing command-line scripts.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// A step named an action other than press, enter or release.
    #[error("unknown pointer action '{0}'")]
    UnknownAction(String),
    /// A press or enter step did not name a tile.
    #[error("pointer action '{0}' needs a tile number")]
    MissingTile(String),
    /// The tile number could not be parsed.
    #[error("could not parse tile number '{0}'")]
    InvalidTile(String),
    /// A release step carried a tile number.
    #[error("release does not take a tile number")]
    UnexpectedTile,
    /// An edge list named something other than N, E, S or W.
    #[error("unknown edge '{0}', expected N, E, S or W")]
    UnknownEdge(String),
}

/// Parses a pointer script such as `press:0 enter:1 enter:5 release`.
///
/// Steps are separated by whitespace or commas.
pub(crate) fn parse_gesture(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|step| !step.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(step: &str) -> Result<Command, ScriptError> {
    let (action, tile) = match step.split_once(FIELD_DELIMITER) {
        Some((action, tile)) => (action, Some(tile)),
        None => (step, None),
    };

    match action.to_ascii_lowercase().as_str() {
        "press" => Ok(Command::PointerPressed {
            tile: parse_tile(action, tile)?,
        }),
        "enter" => Ok(Command::PointerEntered {
            tile: parse_tile(action, tile)?,
        }),
        "release" => match tile {
            None => Ok(Command::PointerReleased),
            Some(_) => Err(ScriptError::UnexpectedTile),
        },
        _ => Err(ScriptError::UnknownAction(action.to_owned())),
    }
}

fn parse_tile(action: &str, tile: Option<&str>) -> Result<TileNum, ScriptError> {
    let tile = tile.ok_or_else(|| ScriptError::MissingTile(action.to_owned()))?;
    tile.trim()
        .parse::<u32>()
        .map(TileNum::new)
        .map_err(|_| ScriptError::InvalidTile(tile.to_owned()))
}

/// Parses an edge list such as `N,S` into a barricade mask.
pub(crate) fn parse_edges(edges: &str) -> Result<BarricadeMask, ScriptError> {
    let mut directions = Vec::new();
    for edge in edges.split(',').map(str::trim).filter(|edge| !edge.is_empty()) {
        let direction = match edge.to_ascii_uppercase().as_str() {
            "N" | "NORTH" => Direction::North,
            "E" | "EAST" => Direction::East,
            "S" | "SOUTH" => Direction::South,
            "W" | "WEST" => Direction::West,
            _ => return Err(ScriptError::UnknownEdge(edge.to_owned())),
        };
        directions.push(direction);
    }
    Ok(BarricadeMask::from_directions(&directions))
}
