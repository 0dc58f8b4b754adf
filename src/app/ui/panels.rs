use eframe::egui::{self, Align, Context, Layout};

use crate::ontology::{ConceptTree, NodeId};

use super::super::connections::visible_connections;
use super::super::view_state::{CenterRequest, Transition, ViewState};
use super::super::viewport::Viewport;
use super::super::{ViewMode, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(tree: ConceptTree) -> Self {
        let view = ViewState::initial(&tree);
        let connections = visible_connections(&tree, &view);

        let mut rows = tree
            .nodes()
            .iter()
            .map(|node| (tree.path(node.id), node.id))
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        let table_rows = rows.into_iter().map(|(_, id)| id).collect();

        Self {
            pending_center: Some(CenterRequest {
                nodes: vec![tree.root()],
                leaf_focus: false,
            }),
            view,
            connections,
            tree,
            selected: None,
            mode: ViewMode::Tree,
            search: String::new(),
            search_cache: None,
            table_rows,
            viewport: Viewport::initial(),
            animation: None,
            drag_active: false,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        tree_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Ontology Atlas");
                    ui.separator();
                    ui.label(format!("document: {tree_path}"));
                    ui.label(format!("concepts: {}", self.tree.node_count()));
                    ui.separator();

                    let in_tree = self.mode == ViewMode::Tree;
                    if ui.selectable_label(in_tree, "Tree").clicked() && !in_tree {
                        // Returning to the tree always starts from a clean slate.
                        self.mode = ViewMode::Tree;
                        self.apply_reset();
                    }
                    if ui
                        .selectable_label(self.mode == ViewMode::Table, "Table")
                        .clicked()
                    {
                        self.mode = ViewMode::Table;
                    }

                    if self.mode == ViewMode::Tree && ui.button("Reset").clicked() {
                        self.apply_reset();
                    }

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload document"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "visible: {}  connections: {}",
                            self.view.visible_nodes(&self.tree).count(),
                            self.connections.len()
                        ));
                    });
                });
            });

        if self.mode == ViewMode::Tree && self.selected.is_some() {
            egui::SidePanel::right("definition")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_definition_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading ontology tree...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                match self.mode {
                    ViewMode::Tree => self.draw_graph(ui),
                    ViewMode::Table => self.draw_table(ui),
                }
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<NodeId>) {
        self.selected = selected;
    }

    /// Swaps in the snapshot a transition produced and rebuilds everything
    /// derived from it.
    pub(in crate::app) fn apply_transition(&mut self, transition: Transition) {
        self.view = transition.next;
        self.connections = visible_connections(&self.tree, &self.view);
        self.pending_center = Some(transition.center);
    }

    pub(in crate::app) fn apply_reset(&mut self) {
        self.set_selected(None);
        let transition = ViewState::reset(&self.tree);
        self.apply_transition(transition);
    }

    pub(in crate::app) fn handle_card_click(&mut self, id: NodeId) {
        if self.tree.node(id).is_none() {
            return;
        }

        self.set_selected(Some(id));
        if let Some(transition) = self.view.toggle(&self.tree, id) {
            self.apply_transition(transition);
        }
    }
}
