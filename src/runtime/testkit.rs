//! Recording canvas and scripted event source for loop tests

use super::backend::{Canvas, EventSource, InputEvent, Rect};
use crate::Rgba;
use anyhow::Result;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    SetColor(Rgba),
    Clear,
    FillRect(Rect),
    Grid(u32),
    Text(String),
    Present,
}

/// Canvas that records every call for later assertions.
#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Rgba) {
        self.ops.push(DrawOp::SetColor(color));
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRect(rect));
    }

    fn draw_grid(&mut self, cell_size: u32) {
        self.ops.push(DrawOp::Grid(cell_size));
    }

    fn draw_text(&mut self, _x: i32, _y: i32, text: &str) {
        self.ops.push(DrawOp::Text(text.to_string()));
    }

    fn present(&mut self) -> Result<()> {
        self.ops.push(DrawOp::Present);
        Ok(())
    }
}

/// Event source that replays a script one slot per poll.
///
/// A `None` slot reports an empty queue for that iteration, letting the
/// loop run one full frame. Once the script is exhausted a single quit
/// event is emitted so loops always terminate.
pub struct ScriptedEvents {
    script: VecDeque<Option<InputEvent>>,
    quit_sent: bool,
}

impl ScriptedEvents {
    pub fn new(script: Vec<Option<InputEvent>>) -> Self {
        Self {
            script: script.into(),
            quit_sent: false,
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Result<Option<InputEvent>> {
        if let Some(slot) = self.script.pop_front() {
            return Ok(slot);
        }

        if self.quit_sent {
            Ok(None)
        } else {
            self.quit_sent = true;
            Ok(Some(InputEvent::Quit))
        }
    }
}
