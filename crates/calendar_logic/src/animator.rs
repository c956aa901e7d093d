//! Page flip state machine.
//!
//! Idle until [`FlipAnimator::begin`] accepts a request, then animating until
//! a tick reaches the end of the flip duration. At most one page flips at a
//! time.

use std::f32::consts::PI;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::{AnimationSettings, PAGE_COUNT};
use crate::curvature::flip_bend;
use crate::stack::{PageStack, RenderPriority};
use crate::LOG_CALENDAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Forward,
    Backward,
}

impl FlipDirection {
    pub fn sign(self) -> i32 {
        match self {
            FlipDirection::Forward => 1,
            FlipDirection::Backward => -1,
        }
    }
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Exact at both ends: `lerp(a, b, 0) == a`, `lerp(a, b, 1) == b`.
fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipParams {
    pub duration: Duration,
    pub flipped_rotation: f32,
    pub flip_bend: f32,
    /// Peak Z lift halfway through a flip so the page clears the stack.
    pub lift_height: f32,
}

impl Default for FlipParams {
    fn default() -> Self {
        Self::from_settings(&AnimationSettings::default())
    }
}

impl FlipParams {
    pub fn from_settings(settings: &AnimationSettings) -> Self {
        Self {
            duration: settings.duration(),
            flipped_rotation: settings.flipped_rotation,
            flip_bend: settings.flip_bend,
            lift_height: PAGE_COUNT as f32 * settings.z_step * settings.lift_factor,
        }
    }
}

/// Pivot pose and bend of the flipping page at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipPose {
    pub rotation: f32,
    pub depth: f32,
    pub bend: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlipSession {
    pub page: usize,
    pub direction: FlipDirection,
    pub start_rotation: f32,
    pub end_rotation: f32,
    pub start_depth: f32,
    pub end_depth: f32,
    pub started_at: Duration,
    pub duration: Duration,
}

impl FlipSession {
    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started_at).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Pose at linear progress `t`.
    ///
    /// The lift is only part of the pose, the end depths stay untouched.
    pub fn sample(&self, t: f32, params: &FlipParams) -> FlipPose {
        let eased = ease_in_out_cubic(t.clamp(0.0, 1.0));
        let lift = if eased > 0.0 && eased < 1.0 {
            (eased * PI).sin() * params.lift_height
        } else {
            0.0
        };

        FlipPose {
            rotation: lerp(self.start_rotation, self.end_rotation, eased),
            depth: lerp(self.start_depth, self.end_depth, eased) + lift,
            bend: flip_bend(eased, params.flip_bend),
        }
    }
}

/// Outcome of one animator tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipProgress {
    Running { page: usize, pose: FlipPose },
    Completed { page: usize, direction: FlipDirection },
}

#[derive(Debug, Clone, Default)]
pub struct FlipAnimator {
    params: FlipParams,
    session: Option<FlipSession>,
}

impl FlipAnimator {
    pub fn new(params: FlipParams) -> Self {
        Self {
            params,
            session: None,
        }
    }

    pub fn params(&self) -> &FlipParams {
        &self.params
    }

    pub fn session(&self) -> Option<&FlipSession> {
        self.session.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Starts flipping the page in front (`Forward`) or the last flipped page
    /// (`Backward`).
    ///
    /// Returns `None` without touching anything while a flip runs or when the
    /// stack has no page to flip in that direction.
    pub fn begin(
        &mut self,
        stack: &mut PageStack,
        direction: FlipDirection,
        now: Duration,
    ) -> Option<&FlipSession> {
        if self.session.is_some() {
            debug!(target: LOG_CALENDAR, "flip {direction:?} ignored, a flip is running");
            return None;
        }

        let cursor = stack.current_page();
        let (page, end_cursor) = match direction {
            FlipDirection::Forward if cursor < stack.len() => (cursor, cursor + 1),
            FlipDirection::Backward if cursor > 0 => (cursor - 1, cursor - 1),
            _ => {
                debug!(target: LOG_CALENDAR, "flip {direction:?} ignored at page {cursor}");
                return None;
            }
        };

        let start_rotation = stack.page(page)?.rotation();
        let end_rotation = match direction {
            FlipDirection::Forward => self.params.flipped_rotation,
            FlipDirection::Backward => 0.0,
        };
        let start_depth = stack.compute_depth(page, cursor);
        let end_depth = stack.compute_depth(page, end_cursor);

        stack.restack();
        let target = stack.page_mut(page)?;
        target.set_pose(start_rotation, start_depth);
        target.set_priority(RenderPriority::OnTop);

        debug!(target: LOG_CALENDAR, "flipping page {page} {direction:?}");
        self.session = Some(FlipSession {
            page,
            direction,
            start_rotation,
            end_rotation,
            start_depth,
            end_depth,
            started_at: now,
            duration: self.params.duration,
        });
        self.session.as_ref()
    }

    /// Advances the running flip to `now`. Does nothing while idle.
    pub fn tick(&mut self, stack: &mut PageStack, now: Duration) -> Option<FlipProgress> {
        let session = self.session.as_ref()?;
        let t = session.progress(now);
        let page = session.page;

        if t < 1.0 {
            let pose = session.sample(t, &self.params);
            let target = stack.page_mut(page)?;
            target.set_pose(pose.rotation, pose.depth);
            target.set_bend(pose.bend);
            return Some(FlipProgress::Running { page, pose });
        }

        let session = self.session.take()?;
        if let Some(target) = stack.page_mut(page) {
            target.set_pose(session.end_rotation, session.end_depth);
            target.set_bend(0.0);
            target.set_priority(RenderPriority::Normal);
        }
        stack.advance(session.direction == FlipDirection::Forward);
        stack.restack();

        info!(
            target: LOG_CALENDAR,
            "page {page} flipped {:?}, now at page {}",
            session.direction,
            stack.current_page()
        );
        Some(FlipProgress::Completed {
            page,
            direction: session.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::geometry::PageGeometry;
    use crate::stack::DepthRule;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn stack() -> PageStack {
        let geometry = PageGeometry::sheet(&LayoutSettings::default(), 0.028);
        PageStack::new(&geometry, DepthRule::default())
    }

    #[test]
    fn easing_hits_the_anchor_points() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn easing_is_monotonic() {
        let samples: Vec<f32> = (0..=100).map(|i| ease_in_out_cubic(i as f32 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn lift_height_scales_with_the_stack() {
        let params = FlipParams::default();
        assert!((params.lift_height - 12.0 * 0.003 * 0.9).abs() < 1e-6);
        assert_eq!(params.duration, ms(900));
    }

    #[test]
    fn sample_is_exact_at_both_ends() {
        let params = FlipParams::default();
        let session = FlipSession {
            page: 0,
            direction: FlipDirection::Forward,
            start_rotation: 0.0,
            end_rotation: -5.75,
            start_depth: 0.033,
            end_depth: -0.025,
            started_at: ms(0),
            duration: ms(900),
        };

        let start = session.sample(0.0, &params);
        assert_eq!(start.rotation, 0.0);
        assert_eq!(start.depth, 0.033);
        assert_eq!(start.bend, 0.0);

        let end = session.sample(1.0, &params);
        assert_eq!(end.rotation, -5.75);
        assert_eq!(end.depth, -0.025);
        assert_eq!(end.bend, 0.0);

        let middle = session.sample(0.5, &params);
        assert!(middle.bend > 0.0);
        assert!((middle.rotation + 2.875).abs() < 1e-5);
        assert!((middle.depth - (0.004 + params.lift_height)).abs() < 1e-5);
    }

    #[test]
    fn progress_clamps() {
        let session = FlipSession {
            page: 0,
            direction: FlipDirection::Forward,
            start_rotation: 0.0,
            end_rotation: -5.75,
            start_depth: 0.0,
            end_depth: 0.0,
            started_at: ms(100),
            duration: ms(900),
        };

        assert_eq!(session.progress(ms(50)), 0.0);
        assert!((session.progress(ms(550)) - 0.5).abs() < 1e-6);
        assert_eq!(session.progress(ms(5_000)), 1.0);
    }

    #[test]
    fn begin_marks_the_page_on_top() {
        let mut stack = stack();
        let mut animator = FlipAnimator::default();

        let session = animator
            .begin(&mut stack, FlipDirection::Forward, ms(0))
            .cloned()
            .expect("forward flip from the first page");

        assert_eq!(session.page, 0);
        assert_eq!(session.end_rotation, -5.75);
        assert_eq!(session.start_depth, stack.compute_depth(0, 0));
        assert_eq!(session.end_depth, stack.compute_depth(0, 1));
        assert_eq!(stack.page(0).unwrap().priority(), RenderPriority::OnTop);
        assert!(animator.is_animating());
    }

    #[test]
    fn second_request_is_ignored_while_animating() {
        let mut stack = stack();
        let mut animator = FlipAnimator::default();
        animator.begin(&mut stack, FlipDirection::Forward, ms(0));

        assert!(animator
            .begin(&mut stack, FlipDirection::Forward, ms(10))
            .is_none());
        assert!(animator
            .begin(&mut stack, FlipDirection::Backward, ms(10))
            .is_none());
        assert_eq!(animator.session().unwrap().page, 0);
        assert_eq!(animator.session().unwrap().started_at, ms(0));
    }

    #[test]
    fn backward_at_the_first_page_is_ignored() {
        let mut stack = stack();
        let mut animator = FlipAnimator::default();

        assert!(animator
            .begin(&mut stack, FlipDirection::Backward, ms(0))
            .is_none());
        assert!(!animator.is_animating());
        assert_eq!(stack.page(0).unwrap().priority(), RenderPriority::Normal);
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut stack = stack();
        let mut animator = FlipAnimator::default();

        assert_eq!(animator.tick(&mut stack, ms(500)), None);
    }

    #[test]
    fn completion_commits_the_cursor() {
        let mut stack = stack();
        let mut animator = FlipAnimator::default();
        animator.begin(&mut stack, FlipDirection::Forward, ms(0));

        let running = animator.tick(&mut stack, ms(450));
        assert!(matches!(running, Some(FlipProgress::Running { page: 0, .. })));
        assert!(stack.page(0).unwrap().geometry().bend() > 0.0);
        assert_eq!(stack.current_page(), 0);

        let done = animator.tick(&mut stack, ms(900));
        assert_eq!(
            done,
            Some(FlipProgress::Completed {
                page: 0,
                direction: FlipDirection::Forward
            })
        );

        let page = stack.page(0).unwrap();
        assert_eq!(stack.current_page(), 1);
        assert_eq!(page.rotation(), -5.75);
        assert_eq!(page.depth(), stack.compute_depth(0, 1));
        assert_eq!(page.geometry().bend(), 0.0);
        assert_eq!(page.priority(), RenderPriority::Normal);
        assert!(!animator.is_animating());
    }

    #[test]
    fn backward_flip_starts_from_the_flipped_rotation() {
        let mut stack = stack();
        let mut animator = FlipAnimator::default();
        animator.begin(&mut stack, FlipDirection::Forward, ms(0));
        animator.tick(&mut stack, ms(900));

        let session = animator
            .begin(&mut stack, FlipDirection::Backward, ms(1_000))
            .cloned()
            .unwrap();

        assert_eq!(session.page, 0);
        assert_eq!(session.start_rotation, -5.75);
        assert_eq!(session.end_rotation, 0.0);
        assert_eq!(session.end_depth, stack.compute_depth(0, 0));
    }
}
