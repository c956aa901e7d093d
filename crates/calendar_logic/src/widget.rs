//! The calendar aggregate the host talks to.

use std::time::Duration;

use crate::animator::{FlipAnimator, FlipDirection, FlipParams, FlipProgress};
use crate::config::{AnimationSettings, LayoutSettings};
use crate::geometry::PageGeometry;
use crate::render::{NavigationState, RenderCommand};
use crate::stack::{DepthRule, PageStack, RenderPriority};
use crate::LayoutError;

/// Owns the page stack and the flip animator.
///
/// Input goes in through [`request_next`](Self::request_next) and
/// [`request_previous`](Self::request_previous); once per frame
/// [`tick`](Self::tick) hands back everything the host must redraw.
#[derive(Debug, Clone)]
pub struct CalendarWidget {
    stack: PageStack,
    animator: FlipAnimator,
    navigation: NavigationState,
    pending: Vec<RenderCommand>,
}

impl Default for CalendarWidget {
    fn default() -> Self {
        let animation = AnimationSettings::default();
        let geometry = PageGeometry::sheet(&LayoutSettings::default(), animation.static_bend);
        Self::new(
            PageStack::new(&geometry, DepthRule::from_settings(&animation)),
            FlipAnimator::new(FlipParams::from_settings(&animation)),
        )
    }
}

impl CalendarWidget {
    /// The first tick replays the full state so the host can sync from scratch.
    pub fn new(stack: PageStack, animator: FlipAnimator) -> Self {
        let navigation =
            NavigationState::evaluate(stack.current_page(), stack.len(), animator.is_animating());
        let mut widget = Self {
            stack,
            animator,
            navigation,
            pending: Vec::new(),
        };
        widget.pending = widget.sync_commands();
        widget
    }

    pub fn from_settings(
        layout: &LayoutSettings,
        animation: &AnimationSettings,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;
        animation.validate()?;

        let geometry = PageGeometry::sheet(layout, animation.static_bend);
        Ok(Self::new(
            PageStack::new(&geometry, DepthRule::from_settings(animation)),
            FlipAnimator::new(FlipParams::from_settings(animation)),
        ))
    }

    pub fn stack(&self) -> &PageStack {
        &self.stack
    }

    pub fn animator(&self) -> &FlipAnimator {
        &self.animator
    }

    pub fn current_page(&self) -> usize {
        self.stack.current_page()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    /// Flips the front page over. Ignored while a flip runs or on the last page.
    pub fn request_next(&mut self, now: Duration) -> bool {
        self.request(FlipDirection::Forward, now)
    }

    /// Flips the last flipped page back. Ignored while a flip runs or on the
    /// first page.
    pub fn request_previous(&mut self, now: Duration) -> bool {
        self.request(FlipDirection::Backward, now)
    }

    fn request(&mut self, direction: FlipDirection, now: Duration) -> bool {
        let Some(page) = self
            .animator
            .begin(&mut self.stack, direction, now)
            .map(|session| session.page)
        else {
            return false;
        };

        let mut commands = vec![RenderCommand::Priority {
            page,
            priority: RenderPriority::OnTop,
        }];
        commands.extend(self.pivot_commands());
        self.refresh_navigation(&mut commands);
        self.pending.append(&mut commands);
        true
    }

    /// Advances the running flip and drains queued commands.
    pub fn tick(&mut self, now: Duration) -> Vec<RenderCommand> {
        let mut commands = std::mem::take(&mut self.pending);

        match self.animator.tick(&mut self.stack, now) {
            Some(FlipProgress::Running { page, pose }) => {
                commands.push(RenderCommand::Pivot {
                    page,
                    rotation: pose.rotation,
                    depth: pose.depth,
                });
                commands.push(RenderCommand::Geometry { page });
            }
            Some(FlipProgress::Completed { page, .. }) => {
                commands.push(RenderCommand::Geometry { page });
                commands.push(RenderCommand::Priority {
                    page,
                    priority: RenderPriority::Normal,
                });
                commands.extend(self.pivot_commands());
                self.refresh_navigation(&mut commands);
            }
            None => {}
        }

        commands
    }

    /// Commands describing the complete current state.
    pub fn sync_commands(&self) -> Vec<RenderCommand> {
        let mut commands = self.pivot_commands();
        for page in self.stack.pages() {
            commands.push(RenderCommand::Geometry { page: page.index() });
            commands.push(RenderCommand::Priority {
                page: page.index(),
                priority: page.priority(),
            });
        }
        commands.push(RenderCommand::Navigation(self.navigation));
        commands
    }

    fn pivot_commands(&self) -> Vec<RenderCommand> {
        self.stack
            .pages()
            .iter()
            .map(|page| RenderCommand::Pivot {
                page: page.index(),
                rotation: page.rotation(),
                depth: page.depth(),
            })
            .collect()
    }

    fn refresh_navigation(&mut self, commands: &mut Vec<RenderCommand>) {
        let navigation = NavigationState::evaluate(
            self.stack.current_page(),
            self.stack.len(),
            self.animator.is_animating(),
        );
        if navigation != self.navigation {
            self.navigation = navigation;
            commands.push(RenderCommand::Navigation(navigation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PAGE_COUNT;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn navigation_in(commands: &[RenderCommand]) -> Option<NavigationState> {
        commands.iter().rev().find_map(|command| match command {
            RenderCommand::Navigation(state) => Some(*state),
            _ => None,
        })
    }

    #[test]
    fn first_tick_syncs_everything() {
        let mut widget = CalendarWidget::default();

        let commands = widget.tick(ms(0));

        let pivots = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Pivot { .. }))
            .count();
        assert_eq!(pivots, PAGE_COUNT);
        assert_eq!(
            navigation_in(&commands),
            Some(NavigationState {
                previous_enabled: false,
                next_enabled: true
            })
        );
        assert!(widget.tick(ms(16)).is_empty());
    }

    #[test]
    fn request_disables_both_controls() {
        let mut widget = CalendarWidget::default();
        widget.tick(ms(0));

        assert!(widget.request_next(ms(10)));
        let commands = widget.tick(ms(10));

        assert_eq!(
            navigation_in(&commands),
            Some(NavigationState {
                previous_enabled: false,
                next_enabled: false
            })
        );
        assert!(commands.contains(&RenderCommand::Priority {
            page: 0,
            priority: RenderPriority::OnTop
        }));
    }

    #[test]
    fn requests_during_a_flip_are_rejected() {
        let mut widget = CalendarWidget::default();
        assert!(widget.request_next(ms(0)));

        assert!(!widget.request_next(ms(100)));
        assert!(!widget.request_previous(ms(100)));
    }

    #[test]
    fn boundaries_reject_requests() {
        let mut widget = CalendarWidget::default();
        assert!(!widget.request_previous(ms(0)));

        let mut now = 0;
        for _ in 0..PAGE_COUNT {
            assert!(widget.request_next(ms(now)));
            now += 900;
            widget.tick(ms(now));
        }

        assert_eq!(widget.current_page(), PAGE_COUNT);
        assert!(!widget.request_next(ms(now)));
        assert_eq!(
            widget.navigation(),
            NavigationState {
                previous_enabled: true,
                next_enabled: false
            }
        );
    }

    #[test]
    fn invalid_layout_is_reported() {
        let layout = LayoutSettings {
            width_segments: 0,
            ..Default::default()
        };

        let result = CalendarWidget::from_settings(&layout, &AnimationSettings::default());

        assert!(matches!(
            result,
            Err(LayoutError::ZeroSegments {
                field: "width_segments"
            })
        ));
    }
}
