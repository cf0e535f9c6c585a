#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editing system that applies the settings panel to every selected tile.

use std::collections::BTreeSet;

use board_editor_core::{
    BarricadeMask, Command, Event, MeshIndex, Orientation, Owner, TileEdit, TileNum,
};
use tracing::debug;

/// Settings chosen in the editor panel.
///
/// Fields left as `None` are not written to the tiles. Barricades are only
/// applied to the edges ticked in `barricade_edges`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrushSettings {
    /// Road (`true`) or building (`false`) flag to paint.
    pub road: Option<bool>,
    /// Facing to paint.
    pub orientation: Option<Orientation>,
    /// Owner to paint.
    pub owner: Option<Owner>,
    /// Mesh index to paint.
    pub mesh: Option<MeshIndex>,
    /// Barricade severity to paint on the ticked edges.
    pub barricade_kind: Option<u32>,
    /// Per-edge checkboxes ordered north, east, south, west.
    pub barricade_edges: BarricadeMask,
}

impl BrushSettings {
    /// Expands the settings into the edits applied to each tile.
    #[must_use]
    pub fn edits(&self) -> Vec<TileEdit> {
        let mut edits = Vec::new();
        if let Some(road) = self.road {
            edits.push(TileEdit::Road(road));
        }
        if let Some(orientation) = self.orientation {
            edits.push(TileEdit::Orientation(orientation));
        }
        if let Some(owner) = self.owner {
            edits.push(TileEdit::Owner(owner));
        }
        if let Some(mesh) = self.mesh {
            edits.push(TileEdit::Mesh(mesh));
        }
        if let Some(kind) = self.barricade_kind {
            if !self.barricade_edges.is_empty() {
                edits.push(TileEdit::Barricades {
                    kind,
                    mask: self.barricade_edges,
                });
            }
        }
        edits
    }
}

/// Input snapshot distilled from adapter-provided panel interactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrushInput {
    /// Indicates whether the player pressed "apply" on this frame.
    pub apply_action: bool,
    /// Indicates whether the selection should be dropped once applied.
    pub clear_after_apply: bool,
}

/// Editing system that mirrors the grid's selected-set from events.
#[derive(Debug, Clone, Default)]
pub struct Brush {
    selected: BTreeSet<TileNum>,
}

impl Brush {
    /// Creates a new brush system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    /// Tiles the brush currently believes are selected.
    pub fn selected(&self) -> impl Iterator<Item = TileNum> + '_ {
        self.selected.iter().copied()
    }

    /// Consumes grid events and panel input to emit edit commands.
    ///
    /// Every selected tile receives the same edits in ascending tile order,
    /// followed by a refresh so the display picks up the new state.
    pub fn handle(
        &mut self,
        events: &[Event],
        settings: &BrushSettings,
        input: BrushInput,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::TileSelected { tile } => {
                    let _ = self.selected.insert(*tile);
                }
                Event::TileDeselected { tile } => {
                    let _ = self.selected.remove(tile);
                }
                Event::BoardConfigured { .. } => self.selected.clear(),
                _ => {}
            }
        }

        if !input.apply_action || self.selected.is_empty() {
            return;
        }

        let edits = settings.edits();
        debug!(
            tiles = self.selected.len(),
            edits = edits.len(),
            "applying brush to selection"
        );
        for &tile in &self.selected {
            for &edit in &edits {
                out.push(Command::EditTile { tile, edit });
            }
            out.push(Command::RefreshTile { tile });
        }

        if input.clear_after_apply {
            out.push(Command::ClearSelection);
        }
    }
}
