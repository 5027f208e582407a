//! Presentation adapter: world state to canvas draw calls

use super::backend::{Canvas, Rect};
use crate::world::World;

/// Draw one frame of the world: background, live cells in their species
/// colors, and the optional grid-line pass.
pub fn draw_world(world: &World, canvas: &mut dyn Canvas) {
    canvas.set_color(world.bg_color);
    canvas.clear();

    let size = world.cell_size;
    for row in 0..world.rows {
        for column in 0..world.columns {
            let value = world.current.get(row, column);
            if value == 0 {
                continue;
            }

            canvas.set_color(species_color(world, value));
            canvas.fill_rect(Rect {
                x: (column as u32 * size) as i32,
                y: (row as u32 * size) as i32,
                w: size,
                h: size,
            });
        }
    }

    if world.is_grid {
        canvas.set_color(world.grid_color);
        canvas.draw_grid(size);
    }
}

/// Palette lookup for a live cell value.
pub fn species_color(world: &World, value: u8) -> crate::Rgba {
    let index = usize::from(value.max(1) - 1).min(world.cell_colors.len().saturating_sub(1));
    world.cell_colors.get(index).copied().unwrap_or([255, 0, 0, 255])
}
