//! Settings sections of the calendar.
//!
//! Every section lives under its own table in `desk_calendar.settings.toml`;
//! the file only carries deviations from the `Default` impls below.

use serde::{Deserialize, Serialize};
use settings::Settings;
use std::time::Duration;

use crate::LayoutError;

/// Number of pages in the stack. Not configurable.
pub const PAGE_COUNT: usize = 12;

fn positive(field: &'static str, value: f32) -> Result<(), LayoutError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NonPositive { field, value })
    }
}

fn segments(field: &'static str, value: u32) -> Result<(), LayoutError> {
    if value == 0 {
        Err(LayoutError::ZeroSegments { field })
    } else {
        Ok(())
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Dimensions of pages, stand and spiral binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutSettings {
    pub page_width: f32,
    pub page_height: f32,
    pub page_thickness: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub stand_width: f32,
    pub stand_height: f32,
    pub stand_depth: f32,
    /// Rotation of the pages root around X (radians), tilts the pages back.
    pub binding_tilt: f32,
    pub spiral_loops: u32,
    pub ring_radius: f32,
    pub ring_tube: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_width: 2.9,
            page_height: 2.15,
            page_thickness: 0.02,
            width_segments: 6,
            height_segments: 12,
            stand_width: 3.0,
            stand_height: 2.2,
            stand_depth: 1.0,
            binding_tilt: -0.25,
            spiral_loops: 10,
            ring_radius: 0.04,
            ring_tube: 0.012,
        }
    }
}

impl Settings for LayoutSettings {
    const SECTION: &'static str = "layout";
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        positive("page_width", self.page_width)?;
        positive("page_height", self.page_height)?;
        positive("page_thickness", self.page_thickness)?;
        segments("width_segments", self.width_segments)?;
        segments("height_segments", self.height_segments)?;
        positive("stand_width", self.stand_width)?;
        positive("stand_height", self.stand_height)?;
        positive("stand_depth", self.stand_depth)?;
        positive("ring_radius", self.ring_radius)?;
        positive("ring_tube", self.ring_tube)?;
        Ok(())
    }

    pub fn half_height(&self) -> f32 {
        self.page_height / 2.0
    }

    /// X positions of the binding rings, evenly spread across the page width.
    pub fn ring_positions(&self) -> Vec<f32> {
        let spacing = self.page_width / (self.spiral_loops + 1) as f32;
        (1..=self.spiral_loops)
            .map(|i| -self.page_width / 2.0 + spacing * i as f32)
            .collect()
    }
}

// ============================================================================
// Animation
// ============================================================================

/// Timing and shape of a page flip and of the resting stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationSettings {
    pub duration_ms: u64,
    /// Pivot rotation of a page that has been flipped past (radians).
    pub flipped_rotation: f32,
    /// Curl every page keeps at rest.
    pub static_bend: f32,
    /// Peak additional curl halfway through a flip.
    pub flip_bend: f32,
    pub z_step: f32,
    pub back_offset: f32,
    pub lift_factor: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: 900,
            flipped_rotation: -5.75,
            static_bend: 0.028,
            flip_bend: 0.085,
            z_step: 0.003,
            back_offset: -0.025,
            lift_factor: 0.9,
        }
    }
}

impl Settings for AnimationSettings {
    const SECTION: &'static str = "animation";
}

impl AnimationSettings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.duration_ms == 0 {
            return Err(LayoutError::ZeroDuration);
        }
        positive("z_step", self.z_step)?;
        positive("flip_bend", self.flip_bend)?;
        if !self.static_bend.is_finite() {
            return Err(LayoutError::OutOfRange {
                field: "static_bend",
                value: self.static_bend,
                min: f32::MIN,
                max: f32::MAX,
            });
        }
        // Flipped pages stay behind the unflipped pile, which starts at 0.
        if !(self.back_offset < 0.0 && self.back_offset.is_finite()) {
            return Err(LayoutError::OutOfRange {
                field: "back_offset",
                value: self.back_offset,
                min: f32::MIN,
                max: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.lift_factor) {
            return Err(LayoutError::OutOfRange {
                field: "lift_factor",
                value: self.lift_factor,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Camera, fog and backdrop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneSettings {
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fog_start: f32,
    pub fog_end: f32,
    /// sRGB background / fog color.
    pub background: [u8; 3],
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            camera_position: [0.0, 1.7, 4.6],
            camera_target: [0.0, 1.1, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            min_distance: 2.6,
            max_distance: 7.0,
            fog_start: 6.0,
            fog_end: 14.0,
            background: [0xf5, 0xef, 0xe6],
        }
    }
}

impl Settings for SceneSettings {
    const SECTION: &'static str = "scene";
}

impl SceneSettings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        positive("fov_degrees", self.fov_degrees)?;
        positive("near", self.near)?;
        positive("min_distance", self.min_distance)?;
        if self.far <= self.near {
            return Err(LayoutError::OutOfRange {
                field: "far",
                value: self.far,
                min: self.near,
                max: f32::MAX,
            });
        }
        if self.max_distance < self.min_distance {
            return Err(LayoutError::OutOfRange {
                field: "max_distance",
                value: self.max_distance,
                min: self.min_distance,
                max: f32::MAX,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Assets
// ============================================================================

/// Where the page images are found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetSettings {
    pub directory: String,
    pub file_prefix: String,
    pub file_suffix: String,
    pub placeholder_label: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            directory: "calendario".into(),
            file_prefix: "calendario-".into(),
            file_suffix: ".jpg.jpeg".into(),
            placeholder_label: "Image missing".into(),
        }
    }
}

impl Settings for AssetSettings {
    const SECTION: &'static str = "assets";
}
