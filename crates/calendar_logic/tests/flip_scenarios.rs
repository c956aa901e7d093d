//! End-to-end flip scenarios driven through the public widget API.

use std::time::Duration;

use calendar_logic::{
    run_frame, CalendarWidget, FrameSink, NavigationState, PageStack, RenderCommand,
    RenderPriority, PAGE_COUNT,
};
use test_log::test;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Mirrors commands into plain vectors, the way a scene would.
#[derive(Default)]
struct SceneMirror {
    rotation: Vec<f32>,
    depth: Vec<f32>,
    on_top: Vec<bool>,
    geometry_uploads: usize,
    navigation: Option<NavigationState>,
    frames: usize,
}

impl FrameSink for SceneMirror {
    fn apply(&mut self, stack: &PageStack, command: &RenderCommand) {
        if self.rotation.is_empty() {
            self.rotation = vec![0.0; stack.len()];
            self.depth = vec![0.0; stack.len()];
            self.on_top = vec![false; stack.len()];
        }
        match *command {
            RenderCommand::Pivot {
                page,
                rotation,
                depth,
            } => {
                self.rotation[page] = rotation;
                self.depth[page] = depth;
            }
            RenderCommand::Geometry { page } => {
                assert!(stack.page(page).is_some());
                self.geometry_uploads += 1;
            }
            RenderCommand::Priority { page, priority } => {
                self.on_top[page] = priority == RenderPriority::OnTop;
            }
            RenderCommand::Navigation(state) => self.navigation = Some(state),
        }
    }

    fn finish_frame(&mut self) {
        self.frames += 1;
    }
}

fn flip_fully(widget: &mut CalendarWidget, sink: &mut SceneMirror, forward: bool, start: u64) -> u64 {
    let accepted = if forward {
        widget.request_next(ms(start))
    } else {
        widget.request_previous(ms(start))
    };
    assert!(accepted, "flip at {start}ms should be accepted");

    let mut now = start;
    while widget.is_animating() {
        now += 16;
        run_frame(widget, sink, ms(now));
    }
    now
}

#[test]
fn next_page_end_to_end() {
    let mut widget = CalendarWidget::default();
    let mut scene = SceneMirror::default();
    run_frame(&mut widget, &mut scene, ms(0));
    let initial_depth = scene.depth[0];

    assert!(widget.request_next(ms(0)));
    run_frame(&mut widget, &mut scene, ms(0));
    assert_eq!(
        scene.navigation,
        Some(NavigationState {
            previous_enabled: false,
            next_enabled: false
        })
    );
    assert!(scene.on_top[0]);
    assert_eq!(scene.rotation[0], 0.0);
    assert_eq!(scene.depth[0], initial_depth);

    run_frame(&mut widget, &mut scene, ms(450));
    assert!((scene.rotation[0] + 2.875).abs() < 1e-3);
    assert!(scene.depth[0] > initial_depth, "lifted halfway");
    assert!(widget.stack().page(0).unwrap().geometry().bend() > 0.0);

    run_frame(&mut widget, &mut scene, ms(900));
    assert_eq!(widget.current_page(), 1);
    assert_eq!(scene.rotation[0], -5.75);
    assert_eq!(scene.depth[0], widget.stack().compute_depth(0, 1));
    assert!(!scene.on_top[0]);
    assert_eq!(widget.stack().page(0).unwrap().geometry().bend(), 0.0);
    assert_eq!(
        scene.navigation,
        Some(NavigationState {
            previous_enabled: true,
            next_enabled: true
        })
    );
    assert_eq!(scene.frames, 4);
}

#[test]
fn flipping_everything_and_back_restores_the_stack() {
    let mut widget = CalendarWidget::default();
    let mut scene = SceneMirror::default();
    run_frame(&mut widget, &mut scene, ms(0));
    let construction_depths = scene.depth.clone();

    let mut now = 0;
    for _ in 0..PAGE_COUNT {
        now = flip_fully(&mut widget, &mut scene, true, now + 100);
    }
    assert_eq!(widget.current_page(), PAGE_COUNT);
    assert!(scene.rotation.iter().all(|&r| r == -5.75));
    assert!(scene.depth.iter().all(|&d| d < 0.0), "every page behind the binding");

    for _ in 0..PAGE_COUNT {
        now = flip_fully(&mut widget, &mut scene, false, now + 100);
    }

    assert_eq!(widget.current_page(), 0);
    assert_eq!(scene.depth, construction_depths);
    assert!(scene.rotation.iter().all(|&r| r == 0.0));
    assert!(scene.on_top.iter().all(|&top| !top));
    for page in widget.stack().pages() {
        let front = page.geometry().faces().first().unwrap();
        assert_eq!(front.positions(), front.rest());
    }
}

#[test]
fn requests_while_animating_change_nothing() {
    let mut widget = CalendarWidget::default();
    let mut scene = SceneMirror::default();
    run_frame(&mut widget, &mut scene, ms(0));

    assert!(widget.request_next(ms(0)));
    run_frame(&mut widget, &mut scene, ms(200));
    let session = widget.animator().session().cloned();

    assert!(!widget.request_next(ms(210)));
    assert!(!widget.request_previous(ms(220)));

    assert_eq!(widget.animator().session().cloned(), session);
    run_frame(&mut widget, &mut scene, ms(900));
    assert_eq!(widget.current_page(), 1);
}

#[test]
fn late_frames_snap_to_the_end() {
    let mut widget = CalendarWidget::default();
    let mut scene = SceneMirror::default();
    run_frame(&mut widget, &mut scene, ms(0));

    widget.request_next(ms(1_000));
    // a single frame long after the flip should have ended
    run_frame(&mut widget, &mut scene, ms(60_000));

    assert!(!widget.is_animating());
    assert_eq!(widget.current_page(), 1);
    assert_eq!(scene.rotation[0], -5.75);
}
