use eframe::egui::{Pos2, Rect, Vec2, pos2};

use crate::layout;
use crate::util::ease_out_cubic;

pub const SCALE_MIN: f32 = 0.3;
pub const SCALE_MAX: f32 = 1.5;
pub const INITIAL_SCALE: f32 = 0.6;

/// Multiplicative scale change per wheel tick; scroll-up zooms in.
pub const WHEEL_ZOOM_STEP: f32 = 1.05;

/// Upper bound for the enlarged zoom used when focusing a single leaf.
pub const LEAF_ZOOM_MAX: f32 = 0.9;

const FIT_MARGIN: f32 = 0.95;
const GROUP_PADDING: f32 = 50.0;
const SINGLE_PADDING: f32 = 20.0;
const LEAF_TARGET_FRACTION: f32 = 0.10;

pub const CENTER_ANIMATION_SECS: f64 = 0.9;

/// The full viewport transform: screen = world * scale + offset, in
/// viewport-local coordinates. Offsets are unbounded; producing the values
/// is this controller's whole job — applying them is the canvas's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    pub fn initial() -> Self {
        Self {
            scale: INITIAL_SCALE,
            offset: Vec2::ZERO,
        }
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        pos2(
            (world.x * self.scale) + self.offset.x,
            (world.y * self.scale) + self.offset.y,
        )
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        pos2(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    pub fn world_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.world_to_screen(rect.min), self.world_to_screen(rect.max))
    }

    pub fn panned(&self, delta: Vec2) -> Self {
        Self {
            scale: self.scale,
            offset: self.offset + delta,
        }
    }

    /// One cursor-anchored wheel tick: the world point under `cursor` stays
    /// under it after the scale change.
    pub fn zoomed(&self, cursor: Pos2, zoom_in: bool) -> Self {
        let world_before = self.screen_to_world(cursor);
        let scale = if zoom_in {
            (self.scale * WHEEL_ZOOM_STEP).min(SCALE_MAX)
        } else {
            (self.scale / WHEEL_ZOOM_STEP).max(SCALE_MIN)
        };

        Self {
            scale,
            offset: cursor.to_vec2() - (world_before.to_vec2() * scale),
        }
    }

    /// Transform that centers the union of `rects` (world-space card rects)
    /// in a viewport of `size`. Scale is the override if given, else the
    /// fit scale with a margin, capped at SCALE_MAX; a huge bounding box may
    /// legitimately fit below SCALE_MIN.
    pub fn centered_on(size: Vec2, rects: &[Rect], scale_override: Option<f32>) -> Option<Self> {
        let (&first, rest) = rects.split_first()?;
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }

        let mut bounds = first;
        for rect in rest {
            bounds = bounds.union(*rect);
        }
        let padding = if rects.len() > 1 {
            GROUP_PADDING
        } else {
            SINGLE_PADDING
        };
        let bounds = bounds.expand(padding);

        let scale = scale_override.unwrap_or_else(|| {
            ((size.x / bounds.width()).min(size.y / bounds.height()) * FIT_MARGIN).min(SCALE_MAX)
        });

        Some(Self {
            scale,
            offset: (size * 0.5) - (bounds.center().to_vec2() * scale),
        })
    }

    /// Enlarged scale for zooming in on a single leaf card.
    pub fn leaf_zoom_scale(viewport_width: f32) -> f32 {
        ((viewport_width * LEAF_TARGET_FRACTION) / layout::CARD_WIDTH).min(LEAF_ZOOM_MAX)
    }

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            scale: from.scale + ((to.scale - from.scale) * t),
            offset: from.offset + ((to.offset - from.offset) * t),
        }
    }
}

/// An in-flight recentering. Sampled every frame while it lasts and dropped
/// the moment it finishes (or the user pans/zooms), so direct manipulation
/// never animates. A new center request mid-flight restarts from the
/// currently displayed transform.
#[derive(Clone, Copy, Debug)]
pub struct CenterAnimation {
    from: Viewport,
    to: Viewport,
    started_at: f64,
}

impl CenterAnimation {
    pub fn new(from: Viewport, to: Viewport, now: f64) -> Self {
        Self {
            from,
            to,
            started_at: now,
        }
    }

    pub fn target(&self) -> Viewport {
        self.to
    }

    pub fn sample(&self, now: f64) -> Viewport {
        let t = ((now - self.started_at) / CENTER_ANIMATION_SECS).clamp(0.0, 1.0) as f32;
        Viewport::lerp(self.from, self.to, ease_out_cubic(t))
    }

    pub fn finished(&self, now: f64) -> bool {
        (now - self.started_at) >= CENTER_ANIMATION_SECS
    }
}
