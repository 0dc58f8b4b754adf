use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use log::error;

use crate::ontology::{ConceptTree, NodeId, load_concept_tree};

mod connections;
mod graph;
mod render_utils;
mod ui;
mod view_state;
mod viewport;

use connections::Connection;
use view_state::{CenterRequest, ViewState};
use viewport::{CenterAnimation, Viewport};

pub struct OntologyAtlasApp {
    tree_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<ConceptTree, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<ConceptTree, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
    Tree,
    Table,
}

struct ViewModel {
    tree: ConceptTree,
    view: ViewState,
    connections: Vec<Connection>,
    selected: Option<NodeId>,
    mode: ViewMode,
    search: String,
    search_cache: Option<SearchMatchCache>,
    /// All concepts in path order; fixed per loaded tree.
    table_rows: Vec<NodeId>,
    viewport: Viewport,
    animation: Option<CenterAnimation>,
    /// Centering deferred until the canvas size is known.
    pending_center: Option<CenterRequest>,
    drag_active: bool,
}

struct SearchMatchCache {
    query: String,
    /// Matching concepts plus their ancestors for context.
    matches: Arc<HashSet<NodeId>>,
}

impl OntologyAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, tree_path: String) -> Self {
        let state = Self::start_load(tree_path.clone());
        Self {
            tree_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(tree_path: String) -> Receiver<Result<ConceptTree, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_concept_tree(&tree_path).map_err(|load_error| {
                error!("ontology load failed: {load_error:#}");
                format!("{load_error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(tree_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(tree_path),
        }
    }
}

impl eframe::App for OntologyAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(tree) => AppState::Ready(Box::new(ViewModel::new(tree))),
                        Err(load_error) => AppState::Error(load_error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading ontology tree...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(load_error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the ontology document");
                    ui.add_space(6.0);
                    ui.label(load_error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.tree_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.tree_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.tree_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(tree) => AppState::Ready(Box::new(ViewModel::new(tree))),
                                Err(load_error) => AppState::Error(load_error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
