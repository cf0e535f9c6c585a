//! Per-cell state owned by the grid.

use board_editor_core::{
    Barricade, BarricadeMask, Border, Direction, MeshIndex, Orientation, Owner, TileEdit, TileNum,
    TileSnapshot,
};

/// Single board cell.
///
/// Tiles are created and owned by the [`Grid`](crate::Grid); they hold no
/// reference back to it, so every operation that must keep the grid's
/// selected-set consistent goes through the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    num: TileNum,
    is_road: bool,
    orientation: Orientation,
    owner: Owner,
    mesh: MeshIndex,
    barricades: [Barricade; 4],
    pub(crate) selected: bool,
    pub(crate) border: Border,
}

impl Tile {
    pub(crate) fn new(num: TileNum) -> Self {
        Self {
            num,
            is_road: true,
            orientation: Orientation::default(),
            owner: Owner::None,
            mesh: MeshIndex::NONE,
            barricades: [Barricade::NONE; 4],
            selected: false,
            border: Border::Default,
        }
    }

    /// Number assigned to the tile when the board was configured.
    #[must_use]
    pub const fn num(&self) -> TileNum {
        self.num
    }

    /// Whether the tile is a road rather than a building.
    #[must_use]
    pub const fn is_road(&self) -> bool {
        self.is_road
    }

    /// Facing stored on the tile.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Owner stored on the tile.
    #[must_use]
    pub const fn owner(&self) -> Owner {
        self.owner
    }

    /// Mesh index stored on the tile.
    #[must_use]
    pub const fn mesh(&self) -> MeshIndex {
        self.mesh
    }

    /// Barricades indexed by [`Direction::index`].
    #[must_use]
    pub const fn barricades(&self) -> &[Barricade; 4] {
        &self.barricades
    }

    /// Barricade on the edge facing `direction`.
    #[must_use]
    pub const fn barricade(&self, direction: Direction) -> Barricade {
        self.barricades[direction.index()]
    }

    /// Whether the tile is in the grid's selected-set.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Border currently displayed by the tile.
    #[must_use]
    pub const fn border(&self) -> Border {
        self.border
    }

    /// Captures an immutable snapshot of the tile.
    #[must_use]
    pub fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            num: self.num,
            is_road: self.is_road,
            orientation: self.orientation,
            owner: self.owner,
            mesh: self.mesh,
            barricades: self.barricades,
            selected: self.selected,
            border: self.border,
        }
    }

    pub(crate) fn set_road(&mut self, is_road: bool) {
        self.is_road = is_road;
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub(crate) fn set_owner(&mut self, owner: Owner) {
        self.owner = owner;
    }

    pub(crate) fn set_mesh(&mut self, mesh: MeshIndex) {
        self.mesh = mesh;
    }

    /// Replaces every edge selected by `mask`; unselected edges keep their barricade.
    pub(crate) fn set_barricades(&mut self, kind: u32, mask: BarricadeMask) {
        for direction in Direction::ALL {
            if mask.contains(direction) {
                self.barricades[direction.index()] = Barricade::new(kind);
            }
        }
    }

    pub(crate) fn apply_edit(&mut self, edit: TileEdit) {
        match edit {
            TileEdit::Road(is_road) => self.set_road(is_road),
            TileEdit::Orientation(orientation) => self.set_orientation(orientation),
            TileEdit::Owner(owner) => self.set_owner(owner),
            TileEdit::Mesh(mesh) => self.set_mesh(mesh),
            TileEdit::Barricades { kind, mask } => self.set_barricades(kind, mask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_starts_with_defaults() {
        let tile = Tile::new(TileNum::new(3));

        assert_eq!(tile.num(), TileNum::new(3));
        assert!(tile.is_road());
        assert_eq!(tile.orientation(), Orientation::Facing(Direction::North));
        assert_eq!(tile.owner(), Owner::None);
        assert_eq!(tile.mesh(), MeshIndex::NONE);
        assert_eq!(tile.barricades(), &[Barricade::NONE; 4]);
        assert!(!tile.is_selected());
        assert_eq!(tile.border(), Border::Default);
    }

    #[test]
    fn masked_barricades_leave_unselected_edges_untouched() {
        let mut tile = Tile::new(TileNum::new(0));
        tile.set_barricades(2, BarricadeMask::new([true, false, true, false]));

        assert_eq!(tile.barricade(Direction::North), Barricade::new(2));
        assert_eq!(tile.barricade(Direction::East), Barricade::NONE);
        assert_eq!(tile.barricade(Direction::South), Barricade::new(2));
        assert_eq!(tile.barricade(Direction::West), Barricade::NONE);
    }

    #[test]
    fn empty_mask_is_a_no_op() {
        let mut tile = Tile::new(TileNum::new(0));
        tile.set_barricades(1, BarricadeMask::ALL);
        let before = tile.clone();

        tile.set_barricades(5, BarricadeMask::NONE);

        assert_eq!(tile, before);
    }

    #[test]
    fn uniform_barricades_replace_every_edge() {
        let mut tile = Tile::new(TileNum::new(0));
        tile.set_barricades(3, BarricadeMask::new([true, false, true, false]));

        tile.apply_edit(TileEdit::uniform_barricades(1));
        assert_eq!(
            tile.barricades(),
            &[Barricade::new(1); 4],
            "bulk form must overwrite mixed edges"
        );

        tile.apply_edit(TileEdit::uniform_barricades(0));
        assert_eq!(
            tile.barricades(),
            &[Barricade::NONE; 4],
            "kind zero clears every edge"
        );
    }

    #[test]
    fn field_edits_write_without_validation() {
        let mut tile = Tile::new(TileNum::new(0));
        tile.apply_edit(TileEdit::Orientation(Orientation::Unknown(17)));
        tile.apply_edit(TileEdit::Owner(Owner::Unknown(-4)));
        tile.apply_edit(TileEdit::Road(false));
        tile.apply_edit(TileEdit::Mesh(MeshIndex::new(9)));

        assert_eq!(tile.orientation(), Orientation::Unknown(17));
        assert_eq!(tile.owner(), Owner::Unknown(-4));
        assert!(!tile.is_road());
        assert_eq!(tile.mesh().get(), Some(9));
    }

    #[test]
    fn edits_do_not_touch_displayed_border() {
        let mut tile = Tile::new(TileNum::new(0));
        tile.apply_edit(TileEdit::uniform_barricades(3));

        assert_eq!(tile.border(), Border::Default);
    }
}
