use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use crate::layout;
use crate::ontology::NodeId;

use super::super::render_utils::{card_screen_rect, local_pointer};
use super::super::view_state::CenterRequest;
use super::super::viewport::{CenterAnimation, Viewport};
use super::super::ViewModel;

impl ViewModel {
    /// The transform to draw with this frame: the animation sample while a
    /// recentering is in flight, the settled viewport otherwise.
    pub(in crate::app) fn displayed_viewport(&mut self, now: f64) -> Viewport {
        match self.animation {
            Some(animation) if animation.finished(now) => {
                self.viewport = animation.target();
                self.animation = None;
                self.viewport
            }
            Some(animation) => animation.sample(now),
            None => self.viewport,
        }
    }

    /// Direct manipulation never animates: freeze the transform where the
    /// animation currently shows it and drop the animation.
    pub(in crate::app) fn cancel_animation(&mut self, now: f64) {
        if let Some(animation) = self.animation.take() {
            self.viewport = if animation.finished(now) {
                animation.target()
            } else {
                animation.sample(now)
            };
        }
    }

    /// Resolves a centering request now that the canvas size is known and
    /// starts the ease-out transition toward it. A request arriving while a
    /// previous animation runs restarts from the currently displayed
    /// transform.
    pub(in crate::app) fn start_centering(
        &mut self,
        size: Vec2,
        request: CenterRequest,
        now: f64,
    ) {
        let rects = request
            .nodes
            .iter()
            .filter_map(|&id| self.tree.node(id))
            .map(|node| layout::card_rect(node.position))
            .collect::<Vec<_>>();

        let scale_override = request
            .leaf_focus
            .then(|| Viewport::leaf_zoom_scale(size.x));
        let Some(target) = Viewport::centered_on(size, &rects, scale_override) else {
            return;
        };

        let from = match self.animation {
            Some(animation) if animation.finished(now) => animation.target(),
            Some(animation) => animation.sample(now),
            None => self.viewport,
        };

        self.viewport = target;
        self.animation = Some(CenterAnimation::new(from, target, now));
    }

    pub(in crate::app) fn handle_wheel_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        now: f64,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());

        self.cancel_animation(now);
        let cursor = local_pointer(rect, pointer);
        self.viewport = self.viewport.zoomed(cursor, scroll > 0.0);
    }

    /// Pans only for drags that started on the background; a drag that
    /// began on a card never moves the canvas.
    pub(in crate::app) fn handle_background_pan(
        &mut self,
        response: &egui::Response,
        over_card: bool,
        now: f64,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            self.drag_active = !over_card;
        }

        if self.drag_active && response.dragged_by(egui::PointerButton::Primary) {
            self.cancel_animation(now);
            self.viewport = self.viewport.panned(response.drag_delta());
        }

        if response.drag_stopped() {
            self.drag_active = false;
        }
    }

    /// Topmost visible card under the pointer; later cards draw on top.
    pub(in crate::app) fn card_at(
        &self,
        rect: Rect,
        viewport: Viewport,
        pointer: Pos2,
    ) -> Option<NodeId> {
        let mut hit = None;
        for id in self.view.visible_nodes(&self.tree) {
            let Some(node) = self.tree.node(id) else {
                continue;
            };

            let screen = card_screen_rect(rect, viewport, layout::card_rect(node.position));
            if screen.contains(pointer) {
                hit = Some(id);
            }
        }
        hit
    }
}
