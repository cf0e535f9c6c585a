#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the board editor headlessly.
//!
//! The adapter configures a board, replays a pointer script through the
//! drag-select protocol, optionally paints the resulting selection with the
//! brush, and prints the encoded appearance of every tile.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use board_editor_core::{BarricadeMask, Command, MeshIndex, Orientation, Owner};
use board_editor_grid::{self as grid, query, Grid};
use board_editor_rendering::{encode_tile, IconCatalog, TileAppearance};
use board_editor_system_brush::{Brush, BrushInput, BrushSettings};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless driver for the board editor.
#[derive(Debug, Parser)]
#[command(name = "board-editor")]
#[command(about = "Replays pointer gestures on an editor board and prints tile icons", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of tile columns.
    #[arg(long, default_value_t = 4)]
    columns: u32,

    /// Number of tile rows.
    #[arg(long, default_value_t = 4)]
    rows: u32,

    /// Pointer script, e.g. "press:0 enter:1 enter:5 release".
    #[arg(long, default_value = "")]
    gesture: String,

    /// Paint the selection with the brush settings after the gesture.
    #[arg(long)]
    apply: bool,

    /// Deselect everything after painting.
    #[arg(long, requires = "apply")]
    clear: bool,

    /// Road (`true`) or building (`false`) flag to paint.
    #[arg(long)]
    road: Option<bool>,

    /// Raw orientation constant to paint (0 north, 1 east, 2 south, 3 west).
    #[arg(long, allow_negative_numbers = true)]
    orientation: Option<i32>,

    /// Raw owner constant to paint (0 none, 1-4 players, 5 special, 6 default).
    #[arg(long, allow_negative_numbers = true)]
    owner: Option<i32>,

    /// Mesh table index to paint.
    #[arg(long)]
    mesh: Option<u32>,

    /// Barricade severity to paint on the ticked edges.
    #[arg(long)]
    barricade: Option<u32>,

    /// Edges that receive the barricade, e.g. "N,S". Defaults to every edge.
    #[arg(long, value_parser = script::parse_edges)]
    edges: Option<BarricadeMask>,

    /// TOML manifest mapping icon keys to artwork files.
    #[arg(long)]
    icons: Option<PathBuf>,

    /// Log filter directive; falls back to `RUST_LOG`, then `info`.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Cli {
    fn brush_settings(&self) -> BrushSettings {
        BrushSettings {
            road: self.road,
            orientation: self.orientation.map(Orientation::from_raw),
            owner: self.owner.map(Owner::from_raw),
            mesh: self.mesh.map(MeshIndex::new),
            barricade_kind: self.barricade,
            barricade_edges: self.edges.unwrap_or(BarricadeMask::ALL),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref())?;

    let gesture = script::parse_gesture(&cli.gesture).context("invalid --gesture script")?;
    let catalog = match &cli.icons {
        Some(path) => IconCatalog::from_manifest_path(path)?,
        None => IconCatalog::default(),
    };

    let mut board = Grid::new(cli.columns, cli.rows).context("invalid board dimensions")?;
    let mut brush = Brush::new();
    let mut events = Vec::new();
    for command in gesture {
        grid::apply(&mut board, command, &mut events);
    }

    let mut painting = Vec::new();
    brush.handle(
        &events,
        &cli.brush_settings(),
        BrushInput {
            apply_action: cli.apply,
            clear_after_apply: cli.clear,
        },
        &mut painting,
    );
    let mut paint_events = Vec::new();
    for command in painting {
        grid::apply(&mut board, command, &mut paint_events);
    }

    let tiles: Vec<_> = query::tiles(&board).map(|tile| tile.num()).collect();
    let mut refresh_events = Vec::new();
    for tile in tiles {
        grid::apply(&mut board, Command::RefreshTile { tile }, &mut refresh_events);
    }

    info!(
        selected = query::selected_tiles(&board).len(),
        "rendering board"
    );
    for snapshot in query::tile_snapshots(&board) {
        println!("{}", describe(&encode_tile(&snapshot), &catalog));
    }
    Ok(())
}

fn init_tracing(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid --log-filter '{directive}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn describe(appearance: &TileAppearance, catalog: &IconCatalog) -> String {
    let asset = catalog
        .resolve(&appearance.icon)
        .map_or_else(|| "<no asset>".to_owned(), |path| path.display().to_string());
    format!(
        "tile {:>3}  {:<32} {:<2} {:?}  {}",
        appearance.tile.get(),
        appearance.icon,
        appearance.owner_label,
        appearance.border,
        asset,
    )
}
