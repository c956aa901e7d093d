//! The page stack and its depth ordering.

use crate::config::{AnimationSettings, PAGE_COUNT};
use crate::geometry::PageGeometry;

/// Draw ordering hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPriority {
    #[default]
    Normal,
    /// The page currently flipping; drawn over its neighbours.
    OnTop,
}

/// Z placement of resting pages.
///
/// Unflipped pages stack towards the viewer with the current page in front.
/// Flipped pages hang behind the binding at `back_offset`, each further one a
/// step deeper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRule {
    pub z_step: f32,
    pub back_offset: f32,
}

impl Default for DepthRule {
    fn default() -> Self {
        Self::from_settings(&AnimationSettings::default())
    }
}

impl DepthRule {
    pub fn from_settings(settings: &AnimationSettings) -> Self {
        Self {
            z_step: settings.z_step,
            back_offset: settings.back_offset,
        }
    }

    pub fn compute_depth(&self, index: usize, cursor: usize) -> f32 {
        if index < cursor {
            self.back_offset - index as f32 * self.z_step
        } else {
            (PAGE_COUNT - 1 - index) as f32 * self.z_step
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    index: usize,
    geometry: PageGeometry,
    rotation: f32,
    depth: f32,
    priority: RenderPriority,
}

impl Page {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Pivot rotation around X, radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Pivot offset along Z.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn priority(&self) -> RenderPriority {
        self.priority
    }

    pub(crate) fn set_pose(&mut self, rotation: f32, depth: f32) {
        self.rotation = rotation;
        self.depth = depth;
    }

    pub(crate) fn set_bend(&mut self, bend: f32) {
        self.geometry.set_bend(bend);
    }

    pub(crate) fn set_priority(&mut self, priority: RenderPriority) {
        self.priority = priority;
    }
}

/// Fixed set of pages plus the cursor `current_page`, the number of pages
/// already flipped past.
#[derive(Debug, Clone)]
pub struct PageStack {
    pages: Vec<Page>,
    current_page: usize,
    depth_rule: DepthRule,
}

impl PageStack {
    /// Creates [`PAGE_COUNT`] unflipped pages sharing the same sheet shape.
    pub fn new(geometry: &PageGeometry, depth_rule: DepthRule) -> Self {
        let pages = (0..PAGE_COUNT)
            .map(|index| Page {
                index,
                geometry: geometry.clone(),
                rotation: 0.0,
                depth: depth_rule.compute_depth(index, 0),
                priority: RenderPriority::Normal,
            })
            .collect();

        Self {
            pages,
            current_page: 0,
            depth_rule,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub(crate) fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn depth_rule(&self) -> DepthRule {
        self.depth_rule
    }

    pub fn compute_depth(&self, index: usize, cursor: usize) -> f32 {
        self.depth_rule.compute_depth(index, cursor)
    }

    /// Moves the cursor by one page. Callers check the bounds first.
    pub(crate) fn advance(&mut self, forward: bool) {
        if forward {
            self.current_page = (self.current_page + 1).min(self.pages.len());
        } else {
            self.current_page = self.current_page.saturating_sub(1);
        }
    }

    /// Reassigns every page depth for the current cursor.
    pub fn restack(&mut self) {
        let cursor = self.current_page;
        let rule = self.depth_rule;
        for page in &mut self.pages {
            page.depth = rule.compute_depth(page.index, cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;

    fn stack() -> PageStack {
        let geometry = PageGeometry::sheet(&LayoutSettings::default(), 0.028);
        PageStack::new(&geometry, DepthRule::default())
    }

    #[test]
    fn depth_follows_the_two_branches() {
        let rule = DepthRule::default();

        // unflipped: front page nearest to the viewer
        assert!((rule.compute_depth(0, 0) - 11.0 * 0.003).abs() < 1e-6);
        assert_eq!(rule.compute_depth(11, 0), 0.0);
        // flipped: behind the binding
        assert!((rule.compute_depth(0, 1) + 0.025).abs() < 1e-6);
        assert!((rule.compute_depth(3, 5) - (-0.025 - 3.0 * 0.003)).abs() < 1e-6);
    }

    #[test]
    fn depth_is_pure() {
        let rule = DepthRule::default();
        for cursor in 0..=PAGE_COUNT {
            for index in 0..PAGE_COUNT {
                assert_eq!(
                    rule.compute_depth(index, cursor),
                    rule.compute_depth(index, cursor)
                );
            }
        }
    }

    #[test]
    fn no_two_pages_share_a_depth() {
        let rule = DepthRule::default();
        for cursor in 0..=PAGE_COUNT {
            let mut depths: Vec<f32> = (0..PAGE_COUNT)
                .map(|index| rule.compute_depth(index, cursor))
                .collect();
            depths.sort_by(|a, b| a.total_cmp(b));
            assert!(
                depths.windows(2).all(|w| w[0] != w[1]),
                "tie at cursor {cursor}: {depths:?}"
            );
        }
    }

    #[test]
    fn new_stack_starts_unflipped() {
        let stack = stack();

        assert_eq!(stack.len(), PAGE_COUNT);
        assert_eq!(stack.current_page(), 0);
        for page in stack.pages() {
            assert_eq!(page.rotation(), 0.0);
            assert_eq!(page.priority(), RenderPriority::Normal);
            assert_eq!(page.depth(), stack.compute_depth(page.index(), 0));
        }
    }

    #[test]
    fn restack_uses_the_cursor() {
        let mut stack = stack();
        stack.advance(true);
        stack.advance(true);
        stack.restack();

        assert_eq!(stack.current_page(), 2);
        for page in stack.pages() {
            assert_eq!(page.depth(), stack.compute_depth(page.index(), 2));
        }
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut stack = stack();
        stack.advance(false);
        assert_eq!(stack.current_page(), 0);

        for _ in 0..PAGE_COUNT + 3 {
            stack.advance(true);
        }
        assert_eq!(stack.current_page(), PAGE_COUNT);
    }
}
