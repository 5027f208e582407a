//! Run mode: timed redraw and timed evolution on one cooperative loop

use super::backend::{Canvas, EventSource, InputEvent};
use super::render;
use super::timer::IntervalTimer;
use crate::world::World;
use anyhow::Result;

/// How long the seed pattern is held on screen before evolution begins.
pub const WARMUP_SECONDS: f32 = 3.0;

/// Drive the world until a quit event arrives.
///
/// Display cadence and generation cadence are decoupled: the caller's
/// display timer throttles redraws while the world's own clock throttles
/// `evolve` calls. A separate warm-up timer keeps the grid static for
/// `warmup_seconds`, after which evolution runs for the rest of the session.
pub fn run(
    world: &mut World,
    canvas: &mut dyn Canvas,
    events: &mut dyn EventSource,
    display: &mut IntervalTimer,
    warmup_seconds: f32,
) -> Result<()> {
    let mut delay = IntervalTimer::new(warmup_seconds);
    let mut started = false;
    let mut running = true;

    while running {
        display.tick();
        world.clock.tick();
        delay.tick();

        while let Some(event) = events.poll()? {
            if event == InputEvent::Quit {
                running = false;
            }
        }

        if display.is_ready() {
            let interval = display.interval();
            let fps = if interval > 0.0 { 1.0 / interval } else { 0.0 };

            render::draw_world(world, canvas);

            canvas.set_color(world.text_color);
            let hud_x = world.width as i32 - 96;
            canvas.draw_text(hud_x, world.height as i32 - 48, &format!("fps: {:.1}", fps));
            canvas.draw_text(
                hud_x,
                world.height as i32 - 32,
                &format!("gen: {}", world.generation),
            );

            canvas.present()?;
            display.reset();
        }

        if started && world.clock.is_ready() {
            world.clock.reset();
            world.evolve()?;
        }

        if !started && delay.is_ready() {
            started = true;
        }
    }

    Ok(())
}
