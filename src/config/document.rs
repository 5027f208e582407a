//! World document codec: JSON persistence with type-checked field defaults
//!
//! Every scalar field of a world document is optional; an absent field or
//! one holding the wrong JSON type is silently replaced by its documented
//! default. Only unreadable files and malformed JSON surface as errors.

use crate::error::WorldError;
use crate::life::{EdgePolicy, Grid, MAX_SPECIES};
use crate::Rgba;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;

/// Built-in species palette; entry 0 matches the single-species default.
pub const DEFAULT_PALETTE: [Rgba; MAX_SPECIES] = [
    [255, 0, 0, 255],
    [0, 170, 0, 255],
    [0, 80, 255, 255],
    [255, 160, 0, 255],
    [160, 0, 200, 255],
    [0, 190, 190, 255],
    [230, 60, 140, 255],
    [120, 80, 40, 255],
    [90, 90, 90, 255],
];

/// The documented fallback for every optional document field.
///
/// A single explicit value object, passed into field resolution, instead
/// of scattering literals through the codec.
#[derive(Debug, Clone)]
pub struct WorldDefaults {
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
    pub percent: f32,
    pub is_grid: bool,
    pub edge: EdgePolicy,
    pub rate: f32,
    pub generation: u64,
    pub colors: u8,
    pub grid_color: Rgba,
    pub bg_color: Rgba,
    pub text_color: Rgba,
}

impl Default for WorldDefaults {
    fn default() -> Self {
        Self {
            cell_size: 4,
            width: 400,
            height: 400,
            percent: 0.1,
            is_grid: true,
            edge: EdgePolicy::Wrap,
            rate: 5.0,
            generation: 0,
            colors: 1,
            grid_color: [0, 0, 0, 255],
            bg_color: [255, 255, 255, 255],
            text_color: [0, 0, 0, 255],
        }
    }
}

/// Scalar configuration plus the optional explicit grid resolved from a
/// world document. Viewport dimensions are already snapped to multiples of
/// `cell_size` and `rows`/`columns` derived from them.
#[derive(Debug, Clone)]
pub struct ResolvedWorld {
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub columns: usize,
    pub percent: f32,
    pub is_grid: bool,
    pub edge: EdgePolicy,
    pub rate: f32,
    pub generation: u64,
    pub colors: u8,
    pub cell_colors: Vec<Rgba>,
    pub grid_color: Rgba,
    pub bg_color: Rgba,
    pub text_color: Rgba,
    /// Present only when the document carried an explicit `current` array.
    pub grid: Option<Grid>,
}

/// The fully resolved built-in world, used when no document is available.
pub fn builtin(defaults: &WorldDefaults) -> ResolvedWorld {
    let width = defaults.width - defaults.width % defaults.cell_size;
    let height = defaults.height - defaults.height % defaults.cell_size;

    ResolvedWorld {
        cell_size: defaults.cell_size,
        width,
        height,
        rows: (height / defaults.cell_size) as usize,
        columns: (width / defaults.cell_size) as usize,
        percent: defaults.percent,
        is_grid: defaults.is_grid,
        edge: defaults.edge,
        rate: defaults.rate,
        generation: defaults.generation,
        colors: defaults.colors,
        cell_colors: DEFAULT_PALETTE[..usize::from(defaults.colors)].to_vec(),
        grid_color: defaults.grid_color,
        bg_color: defaults.bg_color,
        text_color: defaults.text_color,
        grid: None,
    }
}

/// Read and parse a world document.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read world file: {}", path.as_ref().display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse world file: {}", path.as_ref().display()))
}

/// Resolve a parsed document against a defaults object.
///
/// Dimensions must be resolved before the grid array is read, since the
/// grid read needs `rows` and `columns`.
pub fn resolve(root: &Value, defaults: &WorldDefaults) -> Result<ResolvedWorld, WorldError> {
    let cell_size = uint_field(root, "cell_size").unwrap_or(u64::from(defaults.cell_size)) as u32;
    let mut width = uint_field(root, "width").unwrap_or(u64::from(defaults.width)) as u32;
    let mut height = uint_field(root, "height").unwrap_or(u64::from(defaults.height)) as u32;

    if cell_size == 0 || cell_size > width.min(height) {
        return Err(WorldError::CellSizeTooLarge {
            cell_size,
            width,
            height,
        });
    }

    width -= width % cell_size;
    height -= height % cell_size;

    let rows = (height / cell_size) as usize;
    let columns = (width / cell_size) as usize;
    if rows == 0 || columns == 0 {
        return Err(WorldError::InvalidDimensions { rows, columns });
    }

    let percent = float_field(root, "percent")
        .map(|p| p.clamp(0.0, 1.0) as f32)
        .unwrap_or(defaults.percent);

    let is_grid = uint_field(root, "grid")
        .map(|v| v != 0)
        .unwrap_or(defaults.is_grid);

    let edge = int_field(root, "type")
        .map(EdgePolicy::from_code)
        .unwrap_or(defaults.edge);

    let rate = float_field(root, "rate")
        .filter(|&r| r > 0.0)
        .map(|r| r as f32)
        .unwrap_or(defaults.rate);

    let generation = uint_field(root, "generation").unwrap_or(defaults.generation);

    let colors = uint_field(root, "colors")
        .map(|c| c.clamp(1, MAX_SPECIES as u64) as u8)
        .unwrap_or(defaults.colors);

    let cell_colors = palette_field(root, "cell_color", colors);
    let grid_color = color_field(root, "grid_color", defaults.grid_color);
    let bg_color = color_field(root, "bg_color", defaults.bg_color);
    let text_color = color_field(root, "text_color", defaults.text_color);

    let grid = grid_field(root, "current", rows, columns, colors)?;

    Ok(ResolvedWorld {
        cell_size,
        width,
        height,
        rows,
        columns,
        percent,
        is_grid,
        edge,
        rate,
        generation,
        colors,
        cell_colors,
        grid_color,
        bg_color,
        text_color,
        grid,
    })
}

/// Serialize a resolved world back into a document value.
///
/// The writer omits no field, so a round-trip reproduces every scalar and
/// cell exactly.
pub fn to_document(world: &ResolvedWorld) -> Value {
    let palette: Vec<Value> = world
        .cell_colors
        .iter()
        .map(|c| json!([c[0], c[1], c[2], c[3]]))
        .collect();

    let grid_rows: Vec<Vec<u8>> = world
        .grid
        .as_ref()
        .map(Grid::to_rows)
        .unwrap_or_else(|| vec![vec![0; world.columns]; world.rows]);

    json!({
        "cell_size": world.cell_size,
        "width": world.width,
        "height": world.height,
        "percent": world.percent,
        "grid": if world.is_grid { 1 } else { 0 },
        "type": world.edge.code(),
        "rate": world.rate,
        "generation": world.generation,
        "colors": world.colors,
        "cell_color": palette,
        "grid_color": world.grid_color,
        "bg_color": world.bg_color,
        "text_color": world.text_color,
        "current": grid_rows,
    })
}

/// Write a resolved world to disk, creating the destination directory.
pub fn save_document<P: AsRef<Path>>(path: P, world: &ResolvedWorld) -> Result<()> {
    let content = serde_json::to_string_pretty(&to_document(world))
        .context("failed to serialize world document")?;

    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }

    std::fs::write(&path, content)
        .with_context(|| format!("failed to write world file: {}", path.as_ref().display()))?;

    Ok(())
}

fn int_field(root: &Value, name: &str) -> Option<i64> {
    root.get(name)?.as_i64()
}

fn uint_field(root: &Value, name: &str) -> Option<u64> {
    root.get(name)?.as_u64()
}

fn float_field(root: &Value, name: &str) -> Option<f64> {
    root.get(name)?.as_f64()
}

/// Parse one `[r, g, b, a]` array of at least four numbers.
fn rgba_from(value: &Value) -> Option<Rgba> {
    let items = value.as_array()?;
    if items.len() < 4 {
        return None;
    }

    let mut color = [0u8; 4];
    for (slot, item) in color.iter_mut().zip(items) {
        *slot = item.as_u64()?.min(255) as u8;
    }
    Some(color)
}

fn color_field(root: &Value, name: &str, default: Rgba) -> Rgba {
    root.get(name).and_then(rgba_from).unwrap_or(default)
}

/// Resolve the species palette: an array of per-species 4-tuples, or a
/// single flat `[r, g, b, a]` for one-species documents. Missing entries
/// are padded from the built-in palette.
fn palette_field(root: &Value, name: &str, colors: u8) -> Vec<Rgba> {
    let mut palette = Vec::with_capacity(usize::from(colors));

    if let Some(items) = root.get(name).and_then(Value::as_array) {
        if items.first().map_or(false, Value::is_array) {
            palette.extend(items.iter().filter_map(rgba_from));
        } else if let Some(flat) = rgba_from(root.get(name).unwrap_or(&Value::Null)) {
            palette.push(flat);
        }
    }

    palette.truncate(usize::from(colors));
    while palette.len() < usize::from(colors) {
        palette.push(DEFAULT_PALETTE[palette.len() % MAX_SPECIES]);
    }

    palette
}

/// Read the explicit cell grid, clipping rows and columns that overflow
/// the resolved dimensions and clamping values into `0..=colors`.
fn grid_field(
    root: &Value,
    name: &str,
    rows: usize,
    columns: usize,
    colors: u8,
) -> Result<Option<Grid>, WorldError> {
    let Some(outer) = root.get(name).and_then(Value::as_array) else {
        return Ok(None);
    };

    let mut grid = Grid::new(rows, columns)?;

    for (row, line) in outer.iter().take(rows).enumerate() {
        let Some(cells) = line.as_array() else {
            continue;
        };

        for (column, cell) in cells.iter().take(columns).enumerate() {
            let value = cell.as_u64().unwrap_or(0).min(u64::from(colors)) as u8;
            grid.set(row, column, value)?;
        }
    }

    Ok(Some(grid))
}
