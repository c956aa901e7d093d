//! Frame-level plumbing between the widget and whatever draws it.

use std::time::Duration;

use crate::stack::{PageStack, RenderPriority};
use crate::widget::CalendarWidget;

/// Enabled state of the two navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl NavigationState {
    pub fn evaluate(current_page: usize, page_count: usize, animating: bool) -> Self {
        Self {
            previous_enabled: current_page > 0 && !animating,
            next_enabled: current_page < page_count && !animating,
        }
    }
}

/// A change the host has to mirror in its scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// Pivot transform of a page: rotation around X and Z offset.
    Pivot {
        page: usize,
        rotation: f32,
        depth: f32,
    },
    /// The live vertex buffers of a page changed; re-upload positions and
    /// recompute normals.
    Geometry { page: usize },
    Priority {
        page: usize,
        priority: RenderPriority,
    },
    Navigation(NavigationState),
}

/// Receives the commands of one frame.
pub trait FrameSink {
    fn apply(&mut self, stack: &PageStack, command: &RenderCommand);

    /// Called once after all commands of the frame, e.g. to step the camera
    /// damping and draw.
    fn finish_frame(&mut self) {}
}

/// Runs one frame: ticks the widget and forwards every command to `sink`.
///
/// Returns the number of commands applied.
pub fn run_frame<S: FrameSink + ?Sized>(
    widget: &mut CalendarWidget,
    sink: &mut S,
    now: Duration,
) -> usize {
    let commands = widget.tick(now);
    for command in &commands {
        sink.apply(widget.stack(), command);
    }
    sink.finish_frame();
    commands.len()
}
