#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for the editor.
//!
//! The [`Grid`] owns every [`Tile`], the set of selected tiles and the drag
//! gesture shared between them. All mutation flows through [`apply`], which
//! keeps a tile's selection flag and the grid's selected-set in lockstep.

mod gesture;
mod tile;

use std::collections::BTreeSet;

use board_editor_core::{Border, Command, EditRejection, Event, TileEdit, TileNum};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use gesture::DragGesture;
pub use tile::Tile;

/// Largest number of tiles a board may hold.
pub const MAX_TILES: u32 = 1 << 20;

/// Errors raised while addressing the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The tile number lies outside the configured board.
    #[error("tile {tile} does not exist on a {columns}x{rows} board")]
    UnknownTile {
        /// Tile number that was requested.
        tile: TileNum,
        /// Columns of the configured board.
        columns: u32,
        /// Rows of the configured board.
        rows: u32,
    },
    /// The requested dimensions hold more than [`MAX_TILES`] tiles.
    #[error("a {columns}x{rows} board exceeds the {} tile limit", MAX_TILES)]
    BoardTooLarge {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}

impl GridError {
    /// Rejection reason broadcast when a command fails with this error.
    #[must_use]
    pub const fn rejection(&self) -> EditRejection {
        match self {
            Self::UnknownTile { .. } => EditRejection::UnknownTile,
            Self::BoardTooLarge { .. } => EditRejection::BoardTooLarge,
        }
    }

    const fn tile(&self) -> Option<TileNum> {
        match self {
            Self::UnknownTile { tile, .. } => Some(*tile),
            Self::BoardTooLarge { .. } => None,
        }
    }
}

/// Represents the authoritative board state.
#[derive(Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    selected: BTreeSet<TileNum>,
    gesture: DragGesture,
}

impl Grid {
    /// Creates a board of `columns x rows` default tiles numbered row by row.
    ///
    /// Boards holding more than [`MAX_TILES`] tiles are rejected.
    pub fn new(columns: u32, rows: u32) -> Result<Self, GridError> {
        let count = columns
            .checked_mul(rows)
            .filter(|count| *count <= MAX_TILES)
            .ok_or(GridError::BoardTooLarge { columns, rows })?;
        let tiles = (0..count).map(|num| Tile::new(TileNum::new(num))).collect();
        Ok(Self {
            columns,
            rows,
            tiles,
            selected: BTreeSet::new(),
            gesture: DragGesture::default(),
        })
    }

    fn tile_mut(&mut self, num: TileNum) -> Result<&mut Tile, GridError> {
        let (columns, rows) = (self.columns, self.rows);
        usize::try_from(num.get())
            .ok()
            .and_then(|index| self.tiles.get_mut(index))
            .ok_or(GridError::UnknownTile {
                tile: num,
                columns,
                rows,
            })
    }

    fn tile(&self, num: TileNum) -> Option<&Tile> {
        usize::try_from(num.get())
            .ok()
            .and_then(|index| self.tiles.get(index))
    }

    /// Moves a tile into the requested selection state.
    ///
    /// This is the only path that touches either the tile's flag or the
    /// selected-set. Returns whether anything changed; redundant calls write
    /// nothing, log nothing and emit nothing.
    fn set_selected(
        &mut self,
        num: TileNum,
        selected: bool,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, GridError> {
        let tile = self.tile_mut(num)?;
        if tile.selected == selected {
            return Ok(false);
        }

        tile.selected = selected;
        if selected {
            tile.border = Border::Selected;
            let _ = self.selected.insert(num);
            info!(tile = %num, "selected tile");
            out_events.push(Event::TileSelected { tile: num });
        } else {
            tile.border = Border::from_barricades(tile.barricades());
            let _ = self.selected.remove(&num);
            info!(tile = %num, "deselected tile");
            out_events.push(Event::TileDeselected { tile: num });
        }
        Ok(true)
    }

    fn edit(
        &mut self,
        num: TileNum,
        edit: TileEdit,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GridError> {
        self.tile_mut(num)?.apply_edit(edit);
        debug!(tile = %num, ?edit, "edited tile");
        out_events.push(Event::TileEdited { tile: num, edit });
        Ok(())
    }

    fn refresh(&mut self, num: TileNum, out_events: &mut Vec<Event>) -> Result<(), GridError> {
        let tile = self.tile_mut(num)?;
        tile.border = Border::for_state(tile.selected, tile.barricades());
        out_events.push(Event::TileRefreshed {
            tile: num,
            border: tile.border,
        });
        Ok(())
    }

    fn press(&mut self, num: TileNum, out_events: &mut Vec<Event>) -> Result<(), GridError> {
        let toggled = !self.tile(num).map_or(false, Tile::is_selected);
        debug!(tile = %num, "pointer pressed");
        let _ = self.set_selected(num, toggled, out_events)?;
        self.gesture.begin(toggled);
        info!(origin = %num, polarity = toggled, "drag gesture started");
        out_events.push(Event::GestureStarted {
            origin: num,
            polarity: toggled,
        });
        Ok(())
    }

    fn enter(&mut self, num: TileNum, out_events: &mut Vec<Event>) -> Result<(), GridError> {
        let Some(polarity) = self.gesture.propagated() else {
            return Ok(());
        };
        debug!(tile = %num, polarity, "pointer entered during drag");
        let _ = self.set_selected(num, polarity, out_events)?;
        Ok(())
    }

    fn release(&mut self, out_events: &mut Vec<Event>) {
        if self.gesture.end() {
            info!("drag gesture ended");
            out_events.push(Event::GestureEnded);
        }
    }

    fn clear_selection(&mut self, out_events: &mut Vec<Event>) -> Result<(), GridError> {
        let selected: Vec<TileNum> = self.selected.iter().copied().collect();
        for num in selected {
            let _ = self.set_selected(num, false, out_events)?;
        }
        Ok(())
    }
}

/// Applies the provided command to the grid, mutating state deterministically.
///
/// Commands addressing tiles outside the board mutate nothing and are
/// answered with [`Event::CommandRejected`].
pub fn apply(grid: &mut Grid, command: Command, out_events: &mut Vec<Event>) {
    let result = match command {
        Command::ConfigureBoard { columns, rows } => Grid::new(columns, rows).map(|configured| {
            *grid = configured;
            info!(columns, rows, "board configured");
            out_events.push(Event::BoardConfigured { columns, rows });
        }),
        Command::EditTile { tile, edit } => grid.edit(tile, edit, out_events),
        Command::SetSelected { tile, selected } => {
            grid.set_selected(tile, selected, out_events).map(|_| ())
        }
        Command::ClearSelection => grid.clear_selection(out_events),
        Command::RefreshTile { tile } => grid.refresh(tile, out_events),
        Command::PointerPressed { tile } => grid.press(tile, out_events),
        Command::PointerEntered { tile } => grid.enter(tile, out_events),
        Command::PointerReleased => {
            grid.release(out_events);
            Ok(())
        }
    };

    if let Err(error) = result {
        warn!(%error, "command rejected");
        out_events.push(Event::CommandRejected {
            tile: error.tile(),
            reason: error.rejection(),
        });
    }
}

/// Query functions that provide read-only access to the grid state.
pub mod query {
    use board_editor_core::{TileNum, TileSnapshot};

    use super::{DragGesture, Grid, Tile};

    /// Number of columns and rows on the configured board.
    #[must_use]
    pub fn dimensions(grid: &Grid) -> (u32, u32) {
        (grid.columns, grid.rows)
    }

    /// Provides read-only access to a single tile.
    #[must_use]
    pub fn tile(grid: &Grid, num: TileNum) -> Option<&Tile> {
        grid.tile(num)
    }

    /// Iterates over every tile in numbering order.
    pub fn tiles(grid: &Grid) -> impl Iterator<Item = &Tile> {
        grid.tiles.iter()
    }

    /// Captures snapshots of every tile in numbering order.
    #[must_use]
    pub fn tile_snapshots(grid: &Grid) -> Vec<TileSnapshot> {
        grid.tiles.iter().map(Tile::snapshot).collect()
    }

    /// Tiles currently in the selected-set, in ascending order.
    #[must_use]
    pub fn selected_tiles(grid: &Grid) -> Vec<TileNum> {
        grid.selected.iter().copied().collect()
    }

    /// Reports whether the tile is in the selected-set.
    #[must_use]
    pub fn is_selected(grid: &Grid, num: TileNum) -> bool {
        grid.selected.contains(&num)
    }

    /// Drag gesture state shared by every tile.
    #[must_use]
    pub fn drag_gesture(grid: &Grid) -> DragGesture {
        grid.gesture
    }
}
