//! Edit mode: hover, click-to-toggle, and species selection

use super::backend::{Canvas, EventSource, InputEvent, Rect};
use super::render;
use super::timer::IntervalTimer;
use crate::world::World;
use anyhow::Result;

/// Interactive editor loop. No automatic evolution happens here.
///
/// The mouse position is quantized to the cell under it and shown as a
/// half-alpha hover highlight; a left click toggles that cell using the
/// selected species. Digit keys 1..=9 pick the species, bounded by the
/// world's species count. When `clean` is set the grid is cleared on entry.
pub fn edit(
    world: &mut World,
    canvas: &mut dyn Canvas,
    events: &mut dyn EventSource,
    display: &mut IntervalTimer,
    clean: bool,
) -> Result<()> {
    if clean {
        world.clear();
    }

    let size = world.cell_size;
    let mut cursor = Rect {
        x: 0,
        y: 0,
        w: size,
        h: size,
    };
    let mut species: u8 = 1;
    let mut running = true;

    while running {
        display.tick();

        while let Some(event) = events.poll()? {
            match event {
                InputEvent::Quit => running = false,
                InputEvent::MouseMove { x, y } => {
                    cursor.x = (x - x.rem_euclid(size as i32)).max(0);
                    cursor.y = (y - y.rem_euclid(size as i32)).max(0);
                }
                InputEvent::MouseDown { x, y } => {
                    if let Some((row, column)) = world.cell_at(x, y) {
                        world.toggle(row, column, species)?;
                    }
                }
                InputEvent::Digit(digit) => {
                    if (1..=world.colors).contains(&digit) {
                        species = digit;
                    }
                }
            }
        }

        if display.is_ready() {
            render::draw_world(world, canvas);

            let mut hover = render::species_color(world, species);
            hover[3] = 127;
            canvas.set_color(hover);
            canvas.fill_rect(cursor);

            canvas.present()?;
            display.reset();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{self, WorldDefaults};
    use crate::runtime::testkit::{DrawOp, RecordingCanvas, ScriptedEvents};
    use std::time::Duration;

    fn editor_world(colors: u8) -> World {
        let doc = serde_json::json!({
            "cell_size": 4,
            "width": 16,
            "height": 16,
            "percent": 0.0,
            "colors": colors,
            "current": [
                [3, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        });
        let resolved = config::resolve(&doc, &WorldDefaults::default()).unwrap();
        World::from_resolved(resolved).unwrap()
    }

    #[test]
    fn test_click_toggles_with_selected_species() {
        let mut world = editor_world(3);
        let mut canvas = RecordingCanvas::default();
        let mut events = ScriptedEvents::new(vec![
            Some(InputEvent::Digit(2)),
            Some(InputEvent::MouseDown { x: 9, y: 5 }),
        ]);
        let mut display = IntervalTimer::new(1.0);

        edit(&mut world, &mut canvas, &mut events, &mut display, false).unwrap();
        assert_eq!(world.current.get(1, 2), 2);
    }

    #[test]
    fn test_click_kills_live_cell() {
        let mut world = editor_world(3);
        let mut canvas = RecordingCanvas::default();
        let mut events = ScriptedEvents::new(vec![Some(InputEvent::MouseDown { x: 0, y: 0 })]);
        let mut display = IntervalTimer::new(1.0);

        edit(&mut world, &mut canvas, &mut events, &mut display, false).unwrap();
        assert_eq!(world.current.get(0, 0), 0);
    }

    #[test]
    fn test_species_selection_bounded_by_colors() {
        let mut world = editor_world(2);
        let mut canvas = RecordingCanvas::default();
        let mut events = ScriptedEvents::new(vec![
            Some(InputEvent::Digit(9)),
            Some(InputEvent::MouseDown { x: 5, y: 9 }),
        ]);
        let mut display = IntervalTimer::new(1.0);

        edit(&mut world, &mut canvas, &mut events, &mut display, false).unwrap();
        // The out-of-range key was ignored, so species 1 painted the cell.
        assert_eq!(world.current.get(2, 1), 1);
    }

    #[test]
    fn test_clean_flag_clears_on_entry() {
        let mut world = editor_world(3);
        let mut canvas = RecordingCanvas::default();
        let mut events = ScriptedEvents::new(vec![]);
        let mut display = IntervalTimer::new(1.0);

        edit(&mut world, &mut canvas, &mut events, &mut display, true).unwrap();
        assert!(world.current.is_empty());
    }

    #[test]
    fn test_hover_highlight_follows_cursor() {
        let mut world = editor_world(3);
        let mut canvas = RecordingCanvas::default();
        let mut events = ScriptedEvents::new(vec![
            Some(InputEvent::MouseMove { x: 10, y: 6 }),
            None,
        ]);
        let mut display = IntervalTimer::new(1.0);
        display.advance(Duration::from_secs(2));

        edit(&mut world, &mut canvas, &mut events, &mut display, false).unwrap();

        let quantized = Rect { x: 8, y: 4, w: 4, h: 4 };
        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::FillRect(rect) if *rect == quantized)));
        // Generation counter untouched: the editor never evolves.
        assert_eq!(world.generation, 0);
    }
}
