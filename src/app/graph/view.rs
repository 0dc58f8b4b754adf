use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::layout;
use crate::ontology::NodeId;
use crate::util::truncate_label;

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, card_fill, card_screen_rect, draw_background, level_color, rect_visible,
    screen_point, segment_visible, with_alpha,
};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let now = ui.ctx().input(|input| input.time);

        if let Some(request) = self.pending_center.take() {
            self.start_centering(rect.size(), request, now);
        }

        let hover_transform = self.displayed_viewport(now);
        let hovered = response
            .hover_pos()
            .and_then(|pointer| self.card_at(rect, hover_transform, pointer));

        self.handle_wheel_zoom(ui, rect, &response, now);
        self.handle_background_pan(&response, hovered.is_some(), now);

        let display = self.displayed_viewport(now);
        if self.animation.is_some() {
            ui.ctx().request_repaint();
        }

        draw_background(&painter, rect, display);

        // Connections go under the cards.
        for connection in &self.connections {
            let start = screen_point(rect, display, connection.from);
            let end = screen_point(rect, display, connection.to);
            if !segment_visible(rect, start, end, 2.5) {
                continue;
            }

            let stroke_width = (2.2 * display.scale).clamp(0.8, 3.5);
            painter.line_segment(
                [start, end],
                Stroke::new(stroke_width, with_alpha(level_color(connection.level), 170)),
            );
        }

        let visible = self.view.visible_nodes(&self.tree).collect::<Vec<_>>();
        let overlapping = self.overlapping_cards(&visible);
        let focused_leaf = self.view.focused_leaf();
        let label_font = FontId::proportional((15.0 * display.scale).max(6.0));
        let marker_font = FontId::proportional((20.0 * display.scale).max(8.0));

        for &id in &visible {
            let Some(node) = self.tree.node(id) else {
                continue;
            };

            let screen = card_screen_rect(rect, display, layout::card_rect(node.position));
            if !rect_visible(rect, screen) {
                continue;
            }

            let mut fill = card_fill(node.level, node.is_root());
            if overlapping.contains(&id) {
                fill = with_alpha(fill, 150);
            }
            painter.rect_filled(screen, 6.0, fill);

            let stroke = if self.selected == Some(id) {
                Stroke::new(2.5, Color32::from_rgb(245, 206, 93))
            } else if focused_leaf == Some(id) {
                Stroke::new(2.0, Color32::from_rgb(103, 196, 255))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.rect_stroke(screen, 6.0, stroke, StrokeKind::Inside);

            painter.text(
                screen.center() - vec2(0.0, screen.height() * 0.12),
                Align2::CENTER_CENTER,
                truncate_label(&node.label, 26),
                label_font.clone(),
                Color32::from_gray(235),
            );

            if !self.tree.is_leaf(id) {
                let marker = if self.view.is_collapsed(id) {
                    "+"
                } else {
                    "\u{2212}"
                };
                painter.text(
                    screen.center_bottom() - vec2(0.0, screen.height() * 0.14),
                    Align2::CENTER_CENTER,
                    marker,
                    marker_font.clone(),
                    blend_color(level_color(node.level), Color32::WHITE, 0.35),
                );
            }
        }

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if let Some(hovered_id) = hovered
            && let Some(node) = self.tree.node(hovered_id)
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  level {}", self.tree.path(node.id), node.level),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(id) = hovered
        {
            self.handle_card_click(id);
            ui.ctx().request_repaint();
        }
    }

    /// Visible cards whose world rects intersect another visible card's.
    fn overlapping_cards(&self, visible: &[NodeId]) -> HashSet<NodeId> {
        let rects = visible
            .iter()
            .filter_map(|&id| {
                self.tree
                    .node(id)
                    .map(|node| (id, layout::card_rect(node.position)))
            })
            .collect::<Vec<_>>();

        let mut overlapping = HashSet::new();
        for (index, (id_a, rect_a)) in rects.iter().enumerate() {
            for (id_b, rect_b) in rects.iter().skip(index + 1) {
                if rect_a.intersects(*rect_b) {
                    overlapping.insert(*id_a);
                    overlapping.insert(*id_b);
                }
            }
        }
        overlapping
    }
}
