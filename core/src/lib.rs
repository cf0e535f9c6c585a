#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the board editor.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative grid, and pure systems. Adapters translate pointer input and
//! editor panels into [`Command`] values, the grid executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! [`TileSnapshot`]s, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cardinal directions used both as tile facings and as edge indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices. Drawn as the top edge.
    North,
    /// Toward increasing column indices. Drawn as the right edge.
    East,
    /// Toward increasing row indices. Drawn as the bottom edge.
    South,
    /// Toward decreasing column indices. Drawn as the left edge.
    West,
}

impl Direction {
    /// Every direction in edge-index order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Index of the direction inside a tile's barricade array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Decodes a raw direction constant, returning `None` outside `0..=3`.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            _ => None,
        }
    }

    /// Name of the direction as used in asset keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        }
    }
}

/// Facing stored on a tile.
///
/// Writes are permissive: raw values outside the four cardinal constants are
/// kept as [`Orientation::Unknown`] and only reported when the tile is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// One of the four cardinal facings.
    Facing(Direction),
    /// Raw value that does not name a cardinal facing.
    Unknown(i32),
}

impl Orientation {
    /// Decodes a raw orientation constant.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match Direction::from_raw(raw) {
            Some(direction) => Self::Facing(direction),
            None => Self::Unknown(raw),
        }
    }

    /// Cardinal facing, if the orientation names one.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Facing(direction) => Some(direction),
            Self::Unknown(_) => None,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Facing(Direction::North)
    }
}

impl From<Direction> for Orientation {
    fn from(direction: Direction) -> Self {
        Self::Facing(direction)
    }
}

/// Player or marker that owns a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Tile is not owned by anyone.
    #[default]
    None,
    /// First player.
    PlayerOne,
    /// Second player.
    PlayerTwo,
    /// Third player.
    PlayerThree,
    /// Fourth player.
    PlayerFour,
    /// Tile carries a special marker rather than a player.
    Special,
    /// Board-wide default owner.
    Default,
    /// Raw value that does not name a known owner.
    Unknown(i32),
}

impl Owner {
    /// Decodes a raw owner constant.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::PlayerOne,
            2 => Self::PlayerTwo,
            3 => Self::PlayerThree,
            4 => Self::PlayerFour,
            5 => Self::Special,
            6 => Self::Default,
            other => Self::Unknown(other),
        }
    }

    /// One-based player number for the four player owners.
    #[must_use]
    pub const fn player_number(self) -> Option<u8> {
        match self {
            Self::PlayerOne => Some(1),
            Self::PlayerTwo => Some(2),
            Self::PlayerThree => Some(3),
            Self::PlayerFour => Some(4),
            _ => None,
        }
    }
}

/// Obstruction placed on a single tile edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Barricade {
    kind: u32,
}

impl Barricade {
    /// Edge without any obstruction.
    pub const NONE: Self = Self::new(0);

    /// Creates a barricade of the provided severity.
    #[must_use]
    pub const fn new(kind: u32) -> Self {
        Self { kind }
    }

    /// Severity code of the barricade; zero means no barricade.
    #[must_use]
    pub const fn kind(&self) -> u32 {
        self.kind
    }
}

/// Per-edge selection aligned with [`Direction::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarricadeMask([bool; 4]);

impl BarricadeMask {
    /// Mask selecting every edge.
    pub const ALL: Self = Self([true; 4]);

    /// Mask selecting no edge.
    pub const NONE: Self = Self([false; 4]);

    /// Creates a mask from flags ordered north, east, south, west.
    #[must_use]
    pub const fn new(edges: [bool; 4]) -> Self {
        Self(edges)
    }

    /// Creates a mask selecting exactly the provided directions.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut edges = [false; 4];
        for direction in directions {
            edges[direction.index()] = true;
        }
        Self(edges)
    }

    /// Builds a mask from a checkbox slice, which must hold one entry per edge.
    pub fn from_checkboxes(checkboxes: &[bool]) -> Result<Self, BarricadeMaskError> {
        let edges: [bool; 4] = checkboxes
            .try_into()
            .map_err(|_| BarricadeMaskError::WrongLength {
                len: checkboxes.len(),
            })?;
        Ok(Self(edges))
    }

    /// Reports whether the edge facing `direction` is selected.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    /// Reports whether no edge is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|edge| !edge)
    }

    /// Raw flags ordered north, east, south, west.
    #[must_use]
    pub const fn edges(&self) -> [bool; 4] {
        self.0
    }
}

/// Reasons a barricade mask could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BarricadeMaskError {
    /// The checkbox slice did not contain exactly one entry per edge.
    #[error("barricade mask needs 4 edges, received {len}")]
    WrongLength {
        /// Number of entries that were supplied.
        len: usize,
    },
}

/// Index into the external mesh table, or the "no mesh" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshIndex(Option<u32>);

impl MeshIndex {
    /// Sentinel used by tiles that have no mesh assigned.
    pub const NONE: Self = Self(None);

    /// Creates a mesh index pointing at the provided table slot.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(Some(index))
    }

    /// Table slot referenced by the index, if any.
    #[must_use]
    pub const fn get(&self) -> Option<u32> {
        self.0
    }
}

impl Default for MeshIndex {
    fn default() -> Self {
        Self::NONE
    }
}

/// Number assigned to a tile when the board is configured.
///
/// Used for identification and logging only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileNum(u32);

impl TileNum {
    /// Creates a new tile number with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tile number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Border line widths for each side of a drawn tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeThickness {
    /// Width of the top line, taken from the north barricade.
    pub top: u32,
    /// Width of the left line, taken from the west barricade.
    pub left: u32,
    /// Width of the bottom line, taken from the south barricade.
    pub bottom: u32,
    /// Width of the right line, taken from the east barricade.
    pub right: u32,
}

impl EdgeThickness {
    /// Widths derived from barricade severities, two units per severity step.
    #[must_use]
    pub fn from_barricades(barricades: &[Barricade; 4]) -> Self {
        let width = |direction: Direction| barricades[direction.index()].kind().saturating_mul(2);
        Self {
            top: width(Direction::North),
            left: width(Direction::West),
            bottom: width(Direction::South),
            right: width(Direction::East),
        }
    }
}

/// Border style displayed around a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Border {
    /// Style applied before the tile has ever been refreshed or deselected.
    #[default]
    Default,
    /// Fixed highlight shown while the tile is selected.
    Selected,
    /// Solid lines whose widths encode the barricades.
    Matte(EdgeThickness),
}

impl Border {
    /// Matte border computed from barricade severities.
    #[must_use]
    pub fn from_barricades(barricades: &[Barricade; 4]) -> Self {
        Self::Matte(EdgeThickness::from_barricades(barricades))
    }

    /// Border a tile displays after a refresh in the provided state.
    #[must_use]
    pub fn for_state(selected: bool, barricades: &[Barricade; 4]) -> Self {
        if selected {
            Self::Selected
        } else {
            Self::from_barricades(barricades)
        }
    }
}

/// Single field update applied to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileEdit {
    /// Marks the tile as a road (`true`) or building (`false`).
    Road(bool),
    /// Replaces the tile's facing.
    Orientation(Orientation),
    /// Replaces the tile's owner.
    Owner(Owner),
    /// Replaces the tile's mesh index.
    Mesh(MeshIndex),
    /// Replaces the barricades on every edge selected by the mask.
    Barricades {
        /// Severity applied to the selected edges.
        kind: u32,
        /// Edges that receive the new barricade.
        mask: BarricadeMask,
    },
}

impl TileEdit {
    /// Edit that replaces every edge with a barricade of the provided kind.
    #[must_use]
    pub const fn uniform_barricades(kind: u32) -> Self {
        Self::Barricades {
            kind,
            mask: BarricadeMask::ALL,
        }
    }
}

/// Commands that express all permissible grid mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rebuilds the board with default tiles laid out row by row.
    ConfigureBoard {
        /// Number of tile columns.
        columns: u32,
        /// Number of tile rows.
        rows: u32,
    },
    /// Applies a single field update to a tile.
    EditTile {
        /// Tile receiving the edit.
        tile: TileNum,
        /// Update to apply.
        edit: TileEdit,
    },
    /// Forces a tile into the provided selection state.
    SetSelected {
        /// Tile whose selection changes.
        tile: TileNum,
        /// Desired selection state.
        selected: bool,
    },
    /// Deselects every selected tile.
    ClearSelection,
    /// Recomputes the border a tile displays from its current state.
    RefreshTile {
        /// Tile to refresh.
        tile: TileNum,
    },
    /// Pointer button went down over a tile.
    PointerPressed {
        /// Tile under the pointer.
        tile: TileNum,
    },
    /// Pointer moved onto a tile.
    PointerEntered {
        /// Tile under the pointer.
        tile: TileNum,
    },
    /// Pointer button was released anywhere.
    PointerReleased,
}

/// Events broadcast by the grid after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms the board was rebuilt with default tiles.
    BoardConfigured {
        /// Number of tile columns.
        columns: u32,
        /// Number of tile rows.
        rows: u32,
    },
    /// Confirms an edit was applied to a tile.
    TileEdited {
        /// Tile that was edited.
        tile: TileNum,
        /// Update that was applied.
        edit: TileEdit,
    },
    /// Announces that a tile joined the selected-set.
    TileSelected {
        /// Tile that became selected.
        tile: TileNum,
    },
    /// Announces that a tile left the selected-set.
    TileDeselected {
        /// Tile that became unselected.
        tile: TileNum,
    },
    /// Reports the border a tile displays after a refresh.
    TileRefreshed {
        /// Tile that was refreshed.
        tile: TileNum,
        /// Border now displayed by the tile.
        border: Border,
    },
    /// Announces that a drag gesture began.
    GestureStarted {
        /// Tile where the pointer went down.
        origin: TileNum,
        /// Selection value propagated to every tile entered during the gesture.
        polarity: bool,
    },
    /// Announces that the active drag gesture finished.
    GestureEnded,
    /// Reports that a command could not be applied.
    CommandRejected {
        /// Tile addressed by the rejected command, if it addressed one.
        tile: Option<TileNum>,
        /// Specific reason the command failed.
        reason: EditRejection,
    },
}

/// Reasons a command may be rejected by the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditRejection {
    /// No tile with the provided number exists on the board.
    UnknownTile,
    /// The requested board holds more tiles than can be numbered.
    BoardTooLarge,
}

/// Immutable representation of a single tile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Number assigned to the tile.
    pub num: TileNum,
    /// Whether the tile is a road rather than a building.
    pub is_road: bool,
    /// Facing stored on the tile.
    pub orientation: Orientation,
    /// Owner stored on the tile.
    pub owner: Owner,
    /// Mesh index stored on the tile.
    pub mesh: MeshIndex,
    /// Barricades indexed by [`Direction::index`].
    pub barricades: [Barricade; 4],
    /// Whether the tile is in the grid's selected-set.
    pub selected: bool,
    /// Border currently displayed by the tile.
    pub border: Border,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn direction_indices_follow_north_east_south_west() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        for direction in Direction::ALL {
            assert_eq!(Direction::from_raw(direction.index() as i32), Some(direction));
        }
    }

    #[test]
    fn orientation_keeps_out_of_range_values() {
        assert_eq!(Orientation::from_raw(1), Orientation::Facing(Direction::East));
        assert_eq!(Orientation::from_raw(9), Orientation::Unknown(9));
        assert_eq!(Orientation::from_raw(-1).direction(), None);
        assert_eq!(Orientation::default(), Orientation::Facing(Direction::North));
    }

    #[test]
    fn owner_decodes_known_constants() {
        assert_eq!(Owner::from_raw(0), Owner::None);
        assert_eq!(Owner::from_raw(2), Owner::PlayerTwo);
        assert_eq!(Owner::from_raw(5), Owner::Special);
        assert_eq!(Owner::from_raw(42), Owner::Unknown(42));
        assert_eq!(Owner::PlayerFour.player_number(), Some(4));
        assert_eq!(Owner::Special.player_number(), None);
    }

    #[test]
    fn edge_thickness_doubles_severity_per_side() {
        let mut barricades = [Barricade::NONE; 4];
        barricades[Direction::North.index()] = Barricade::new(1);
        barricades[Direction::East.index()] = Barricade::new(2);
        barricades[Direction::South.index()] = Barricade::new(3);
        barricades[Direction::West.index()] = Barricade::new(4);

        let thickness = EdgeThickness::from_barricades(&barricades);
        assert_eq!(
            thickness,
            EdgeThickness {
                top: 2,
                left: 8,
                bottom: 6,
                right: 4,
            }
        );
    }

    #[test]
    fn edge_thickness_saturates_on_huge_severity() {
        let barricades = [Barricade::new(u32::MAX); 4];
        assert_eq!(EdgeThickness::from_barricades(&barricades).top, u32::MAX);
    }

    #[test]
    fn border_for_selected_state_ignores_barricades() {
        let barricades = [Barricade::new(3); 4];
        assert_eq!(Border::for_state(true, &barricades), Border::Selected);
        assert_eq!(
            Border::for_state(false, &barricades),
            Border::Matte(EdgeThickness {
                top: 6,
                left: 6,
                bottom: 6,
                right: 6,
            })
        );
    }

    #[test]
    fn mask_from_checkboxes_requires_four_entries() {
        let mask = BarricadeMask::from_checkboxes(&[true, false, true, false]).expect("four");
        assert!(mask.contains(Direction::North));
        assert!(!mask.contains(Direction::East));
        assert!(mask.contains(Direction::South));
        assert!(!mask.contains(Direction::West));

        let error = BarricadeMask::from_checkboxes(&[true, false]).expect_err("too short");
        assert_eq!(error, BarricadeMaskError::WrongLength { len: 2 });
    }

    #[test]
    fn mask_from_directions_matches_checkbox_order() {
        let mask = BarricadeMask::from_directions(&[Direction::West, Direction::North]);
        assert_eq!(mask.edges(), [true, false, false, true]);
        assert!(BarricadeMask::NONE.is_empty());
        assert!(!BarricadeMask::ALL.is_empty());
    }

    #[test]
    fn tile_edit_round_trips_through_bincode() {
        assert_round_trip(&TileEdit::Barricades {
            kind: 2,
            mask: BarricadeMask::new([true, false, true, false]),
        });
        assert_round_trip(&TileEdit::Orientation(Orientation::Unknown(7)));
    }

    #[test]
    fn tile_snapshot_round_trips_through_bincode() {
        let snapshot = TileSnapshot {
            num: TileNum::new(12),
            is_road: false,
            orientation: Orientation::Facing(Direction::South),
            owner: Owner::PlayerThree,
            mesh: MeshIndex::new(5),
            barricades: [Barricade::new(1), Barricade::NONE, Barricade::new(2), Barricade::NONE],
            selected: true,
            border: Border::Selected,
        };
        assert_round_trip(&snapshot);
    }
}
