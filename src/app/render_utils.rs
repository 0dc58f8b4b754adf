use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use super::viewport::Viewport;

const LEVEL_COLORS: [Color32; 6] = [
    Color32::from_rgb(103, 196, 255),
    Color32::from_rgb(126, 211, 159),
    Color32::from_rgb(246, 206, 104),
    Color32::from_rgb(241, 146, 94),
    Color32::from_rgb(205, 143, 245),
    Color32::from_rgb(148, 156, 170),
];

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Stroke color for a connection at the given (already capped) level.
pub(super) fn level_color(level: usize) -> Color32 {
    LEVEL_COLORS[level.min(LEVEL_COLORS.len() - 1)]
}

pub(super) fn card_fill(level: usize, is_root: bool) -> Color32 {
    let base = Color32::from_rgb(36, 42, 52);
    if is_root {
        return blend_color(base, Color32::from_rgb(245, 206, 93), 0.22);
    }
    blend_color(base, level_color(level), 0.12)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, viewport: Viewport) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * viewport.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.left_top() + viewport.offset;

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        y += step;
    }
}

pub(super) fn rect_visible(bounds: Rect, card: Rect) -> bool {
    !(card.max.x < bounds.left()
        || card.min.x > bounds.right()
        || card.max.y < bounds.top()
        || card.min.y > bounds.bottom())
}

pub(super) fn segment_visible(bounds: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < bounds.left()
        || min_x > bounds.right()
        || max_y < bounds.top()
        || min_y > bounds.bottom())
}

/// World card rect mapped into absolute screen space inside `rect`.
pub(super) fn card_screen_rect(rect: Rect, viewport: Viewport, world: Rect) -> Rect {
    viewport
        .world_rect_to_screen(world)
        .translate(rect.left_top().to_vec2())
}

pub(super) fn screen_point(rect: Rect, viewport: Viewport, world: Pos2) -> Pos2 {
    rect.left_top() + viewport.world_to_screen(world).to_vec2()
}

pub(super) fn local_pointer(rect: Rect, pointer: Pos2) -> Pos2 {
    (pointer - rect.left_top()).to_pos2()
}
