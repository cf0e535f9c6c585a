#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for board editor adapters.
//!
//! [`encode_tile`] turns a [`TileSnapshot`] into a [`TileAppearance`]: the
//! border a backend should draw, the icon key identifying the tile artwork and
//! a handful of secondary labels. Keys are resolved to files by an
//! [`IconCatalog`] owned by the display backend.

mod catalog;

use std::fmt;

use board_editor_core::{Border, Direction, Orientation, Owner, TileNum, TileSnapshot};
use tracing::error;

pub use catalog::IconCatalog;

/// Directory prefix shared by every icon key.
pub const ICON_ROOT: &str = "Icons/";

const ICON_EXTENSION: &str = ".png";

/// RGBA color used when presenting tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);

    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Path-like key identifying a displayable icon.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconKey(String);

impl IconKey {
    /// Wraps an existing key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key has the shape produced by the encoder.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.len() > ICON_ROOT.len() + ICON_EXTENSION.len()
            && self.0.starts_with(ICON_ROOT)
            && self.0.ends_with(ICON_EXTENSION)
    }

    fn from_stem(stem: &str) -> Self {
        Self(format!("{ICON_ROOT}{stem}{ICON_EXTENSION}"))
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anomalies detected while encoding a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderAnomaly {
    /// The stored orientation is not a cardinal facing; north was drawn instead.
    UnknownOrientation {
        /// Tile that carried the orientation.
        tile: TileNum,
        /// Raw orientation value.
        raw: i32,
    },
}

/// Everything a backend needs to draw one tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileAppearance {
    /// Tile the appearance was derived from.
    pub tile: TileNum,
    /// Border to draw around the tile.
    pub border: Border,
    /// Key of the main tile artwork.
    pub icon: IconKey,
    /// Key of the orientation arrow overlay, absent for unknown orientations.
    pub arrow: Option<IconKey>,
    /// Fill drawn behind the icon: white for roads, black for buildings.
    pub background: Color,
    /// Short owner tag shown as button text.
    pub owner_label: &'static str,
    /// Anomaly reported while encoding, if any.
    pub anomaly: Option<RenderAnomaly>,
}

/// Encodes the tile's current state into its visual representation.
///
/// Never fails: an unknown orientation is drawn as north, reported through
/// the log and recorded in [`TileAppearance::anomaly`].
#[must_use]
pub fn encode_tile(tile: &TileSnapshot) -> TileAppearance {
    let (facing, anomaly) = match tile.orientation {
        Orientation::Facing(direction) => (direction, None),
        Orientation::Unknown(raw) => {
            error!(tile = %tile.num, raw, "unknown orientation, drawing as north");
            (
                Direction::North,
                Some(RenderAnomaly::UnknownOrientation {
                    tile: tile.num,
                    raw,
                }),
            )
        }
    };

    TileAppearance {
        tile: tile.num,
        border: Border::for_state(tile.selected, &tile.barricades),
        icon: icon_key(tile.is_road, tile.owner, facing),
        arrow: anomaly.is_none().then(|| arrow_key(facing)),
        background: if tile.is_road {
            Color::WHITE
        } else {
            Color::BLACK
        },
        owner_label: owner_label(tile.owner),
        anomaly,
    }
}

/// Icon key for a tile with the provided attributes.
///
/// Roads carry an owner bucket (`Player1`..`Player4`, or `Def` for every
/// other owner); buildings never do.
#[must_use]
pub fn icon_key(is_road: bool, owner: Owner, facing: Direction) -> IconKey {
    let stem = if is_road {
        format!("Road_{}_{}", owner_bucket(owner), facing.name())
    } else {
        format!("Building_{}", facing.name())
    };
    IconKey::from_stem(&stem)
}

/// Key of the arrow overlay pointing toward `facing`.
#[must_use]
pub fn arrow_key(facing: Direction) -> IconKey {
    IconKey::from_stem(&format!("Arrow_{}", facing.name()))
}

fn owner_bucket(owner: Owner) -> &'static str {
    match owner.player_number() {
        Some(1) => "Player1",
        Some(2) => "Player2",
        Some(3) => "Player3",
        Some(4) => "Player4",
        _ => "Def",
    }
}

fn owner_label(owner: Owner) -> &'static str {
    match owner {
        Owner::PlayerOne => "P1",
        Owner::PlayerTwo => "P2",
        Owner::Special => "S",
        _ => "D",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_editor_core::{Barricade, EdgeThickness, MeshIndex};

    fn snapshot() -> TileSnapshot {
        TileSnapshot {
            num: TileNum::new(7),
            is_road: true,
            orientation: Orientation::default(),
            owner: Owner::None,
            mesh: MeshIndex::NONE,
            barricades: [Barricade::NONE; 4],
            selected: false,
            border: Border::Default,
        }
    }

    #[test]
    fn road_key_includes_owner_bucket() {
        let tile = TileSnapshot {
            owner: Owner::PlayerTwo,
            orientation: Orientation::Facing(Direction::East),
            ..snapshot()
        };

        let appearance = encode_tile(&tile);
        assert_eq!(appearance.icon.as_str(), "Icons/Road_Player2_East.png");
        assert_eq!(appearance.anomaly, None);
    }

    #[test]
    fn building_key_omits_owner_bucket() {
        for owner in [Owner::PlayerOne, Owner::Special, Owner::Unknown(12)] {
            let tile = TileSnapshot {
                is_road: false,
                owner,
                orientation: Orientation::Facing(Direction::South),
                ..snapshot()
            };

            assert_eq!(encode_tile(&tile).icon.as_str(), "Icons/Building_South.png");
        }
    }

    #[test]
    fn non_player_owners_share_default_bucket() {
        for owner in [
            Owner::None,
            Owner::Special,
            Owner::Default,
            Owner::Unknown(-3),
        ] {
            let key = icon_key(true, owner, Direction::West);
            assert_eq!(key.as_str(), "Icons/Road_Def_West.png", "owner {owner:?}");
        }
        assert_eq!(
            icon_key(true, Owner::PlayerFour, Direction::North).as_str(),
            "Icons/Road_Player4_North.png"
        );
    }

    #[test]
    fn unknown_orientation_falls_back_to_north() {
        let tile = TileSnapshot {
            orientation: Orientation::Unknown(9),
            owner: Owner::PlayerOne,
            ..snapshot()
        };

        let appearance = encode_tile(&tile);
        assert_eq!(appearance.icon.as_str(), "Icons/Road_Player1_North.png");
        assert_eq!(appearance.arrow, None);
        assert_eq!(
            appearance.anomaly,
            Some(RenderAnomaly::UnknownOrientation {
                tile: TileNum::new(7),
                raw: 9,
            })
        );
    }

    #[test]
    fn border_maps_barricades_to_sides() {
        for kind in [0, 1, 5, 40] {
            let mut barricades = [Barricade::NONE; 4];
            barricades[Direction::North.index()] = Barricade::new(kind);
            barricades[Direction::West.index()] = Barricade::new(kind + 1);
            barricades[Direction::South.index()] = Barricade::new(kind + 2);
            barricades[Direction::East.index()] = Barricade::new(kind + 3);
            let tile = TileSnapshot {
                barricades,
                ..snapshot()
            };

            assert_eq!(
                encode_tile(&tile).border,
                Border::Matte(EdgeThickness {
                    top: 2 * kind,
                    left: 2 * (kind + 1),
                    bottom: 2 * (kind + 2),
                    right: 2 * (kind + 3),
                })
            );
        }
    }

    #[test]
    fn selected_tile_shows_selected_border() {
        let tile = TileSnapshot {
            selected: true,
            barricades: [Barricade::new(4); 4],
            ..snapshot()
        };

        assert_eq!(encode_tile(&tile).border, Border::Selected);
    }

    #[test]
    fn icon_does_not_depend_on_selection() {
        let unselected = encode_tile(&snapshot());
        let selected = encode_tile(&TileSnapshot {
            selected: true,
            ..snapshot()
        });

        assert_eq!(unselected.icon, selected.icon);
        assert_eq!(unselected.arrow, selected.arrow);
    }

    #[test]
    fn secondary_labels_follow_state() {
        let road = encode_tile(&TileSnapshot {
            owner: Owner::Special,
            ..snapshot()
        });
        assert_eq!(road.background, Color::WHITE);
        assert_eq!(road.owner_label, "S");
        assert_eq!(
            road.arrow.as_ref().map(IconKey::as_str),
            Some("Icons/Arrow_North.png")
        );

        let building = encode_tile(&TileSnapshot {
            is_road: false,
            owner: Owner::PlayerThree,
            ..snapshot()
        });
        assert_eq!(building.background, Color::BLACK);
        assert_eq!(building.owner_label, "D");
    }

    #[test]
    fn encoded_keys_are_well_formed() {
        assert!(icon_key(false, Owner::None, Direction::East).is_well_formed());
        assert!(arrow_key(Direction::West).is_well_formed());
        assert!(!IconKey::new("Road_Def_North.png").is_well_formed());
        assert!(!IconKey::new("Icons/.png").is_well_formed());
    }
}
