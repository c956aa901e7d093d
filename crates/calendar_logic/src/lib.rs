//! Core of the desk calendar: page stack, paper curl and the flip animation.
//!
//! Nothing in here talks to a renderer. The host drives a [`CalendarWidget`]
//! once per frame and applies the [`RenderCommand`]s it hands back.

pub mod animator;
pub mod assets;
pub mod config;
pub mod curvature;
mod errors;
pub mod geometry;
pub mod render;
pub mod stack;
pub mod texture;
pub mod widget;

pub use animator::{
    ease_in_out_cubic, FlipAnimator, FlipDirection, FlipParams, FlipPose, FlipProgress, FlipSession,
};
pub use assets::{
    AssetManifest, ImageRequest, LoadStatus, PageAssetLoader, PageAssets, PageSide, PageTexture,
};
pub use config::{AnimationSettings, AssetSettings, LayoutSettings, SceneSettings, PAGE_COUNT};
pub use errors::LayoutError;
pub use geometry::{FaceGeometry, FaceKind, PageGeometry};
pub use render::{run_frame, FrameSink, NavigationState, RenderCommand};
pub use stack::{DepthRule, Page, PageStack, RenderPriority};
pub use texture::{PaperGrain, PlaceholderImage};
pub use widget::CalendarWidget;

/// Log targets of the calendar; hosts log input under [`LOG_INPUT`].
pub const LOG_CALENDAR: &str = "calendar";
pub const LOG_ASSETS: &str = "calendar/assets";
pub const LOG_INPUT: &str = "calendar/input";
