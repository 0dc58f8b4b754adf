use eframe::egui::{Align, Layout, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_definition_panel(&mut self, ui: &mut Ui) {
        let Some(selected_id) = self.selected else {
            ui.label("Select a concept card to see its definition.");
            return;
        };
        let Some(node) = self.tree.node(selected_id) else {
            ui.label("Selected concept no longer exists in the loaded tree.");
            return;
        };

        let label = node.label.clone();
        let definition = node.definition.clone();
        let level = node.level;
        let child_count = self.tree.children(selected_id).len();
        let path = self.tree.path(selected_id);
        let is_focused = self.view.focused_leaf() == Some(selected_id);

        let mut close_requested = false;
        ui.horizontal(|ui| {
            ui.heading(label);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("\u{2715}").clicked() {
                    close_requested = true;
                }
            });
        });
        ui.small(path);
        ui.add_space(6.0);
        ui.separator();

        ui.label(definition);
        ui.add_space(10.0);

        ui.label(format!("Level: {level}"));
        if child_count > 0 {
            ui.label(format!("Narrower concepts: {child_count}"));
        } else {
            ui.label("End concept (no narrower concepts)");
            if is_focused {
                ui.label(RichText::new("Currently zoomed in").italics());
            }
        }

        if close_requested {
            self.set_selected(None);
        }
    }
}
