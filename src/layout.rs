use eframe::egui::{Pos2, Rect, Vec2, pos2};

pub const CARD_WIDTH: f32 = 220.0;
pub const CARD_HEIGHT: f32 = 130.0;
pub const COLUMN_SPACING: f32 = 300.0;
pub const ROW_SPACING: f32 = 180.0;

/// Where the root card is placed; everything else hangs off it.
pub const ROOT_ORIGIN: Pos2 = Pos2::new(50.0, 50.0);

pub const CARD_SIZE: Vec2 = Vec2::new(CARD_WIDTH, CARD_HEIGHT);

pub fn card_rect(position: Pos2) -> Rect {
    Rect::from_min_size(position, CARD_SIZE)
}

/// Positions for the `count` children of a card at `parent`: consecutive
/// fixed-width slots on the band one row down, with the whole row of slots
/// centered on the parent card's horizontal midpoint. Slot order is source
/// order.
pub fn child_positions(parent: Pos2, count: usize) -> Vec<Pos2> {
    let band_y = parent.y + ROW_SPACING;
    let row_width = count as f32 * COLUMN_SPACING;
    let start_x = parent.x + (CARD_WIDTH / 2.0) - (row_width / 2.0);

    (0..count)
        .map(|slot| pos2(start_x + (slot as f32 * COLUMN_SPACING), band_y))
        .collect()
}

/// Bottom-center of a card, where outgoing connections attach.
pub fn bottom_anchor(position: Pos2) -> Pos2 {
    pos2(position.x + (CARD_WIDTH / 2.0), position.y + CARD_HEIGHT)
}

/// Top-center of a card, where the incoming connection attaches.
pub fn top_anchor(position: Pos2) -> Pos2 {
    pos2(position.x + (CARD_WIDTH / 2.0), position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_row_is_centered_on_parent_midpoint() {
        let parent = pos2(50.0, 50.0);
        for count in 1..=6 {
            let positions = child_positions(parent, count);
            assert_eq!(positions.len(), count);

            let row_width = count as f32 * COLUMN_SPACING;
            let row_center = positions[0].x + (row_width / 2.0);
            assert!((row_center - (parent.x + CARD_WIDTH / 2.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn children_sit_one_row_below_parent() {
        let parent = pos2(-120.0, 400.0);
        for position in child_positions(parent, 3) {
            assert_eq!(position.y, parent.y + ROW_SPACING);
        }
    }

    #[test]
    fn slots_are_consecutive_and_in_source_order() {
        let positions = child_positions(pos2(0.0, 0.0), 4);
        for pair in positions.windows(2) {
            assert!((pair[1].x - pair[0].x - COLUMN_SPACING).abs() < 1e-3);
        }
    }

    #[test]
    fn anchors_sit_on_the_card_midline() {
        let position = pos2(10.0, 20.0);
        assert_eq!(bottom_anchor(position), pos2(120.0, 150.0));
        assert_eq!(top_anchor(position), pos2(120.0, 20.0));
        assert_eq!(card_rect(position).center().x, 120.0);
    }
}
