use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::ontology::NodeId;
use crate::util::truncate_label;

use super::super::{SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    /// Concepts matching the current query on name, definition, or path,
    /// widened with their ancestors for context. Cached per query; the tree
    /// itself never changes under a cache.
    fn cached_table_matches(&mut self) -> Option<Arc<HashSet<NodeId>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let mut matches = HashSet::new();
        for node in self.tree.nodes() {
            let path = self.tree.path(node.id);
            if fuzzy_match_score(&matcher, &node.label, query).is_some()
                || fuzzy_match_score(&matcher, &node.definition, query).is_some()
                || fuzzy_match_score(&matcher, &path, query).is_some()
            {
                matches.insert(node.id);
            }
        }

        let mut include = matches.clone();
        for &id in &matches {
            let mut cursor = self.tree.parent(id);
            while let Some(ancestor) = cursor {
                if !include.insert(ancestor) {
                    break;
                }
                cursor = self.tree.parent(ancestor);
            }
        }

        let matches = Arc::new(include);
        self.search_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_table(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.text_edit_singleline(&mut self.search);
            if !self.search.is_empty() && ui.button("Clear").clicked() {
                self.search.clear();
            }
        });

        let matches = self.cached_table_matches();
        let rows = self
            .table_rows
            .iter()
            .copied()
            .filter(|id| matches.as_ref().is_none_or(|set| set.contains(id)))
            .collect::<Vec<_>>();

        ui.label(format!(
            "{} / {} concepts",
            rows.len(),
            self.table_rows.len()
        ));
        ui.separator();

        if rows.is_empty() {
            ui.label("No results. Try a different search query.");
            return;
        }

        let mut pending_selection = None;

        egui::ScrollArea::vertical()
            .id_salt("concept_table")
            .auto_shrink([false, false])
            .show_rows(ui, 24.0, rows.len(), |ui, row_range| {
                for index in row_range {
                    let Some(&id) = rows.get(index) else {
                        continue;
                    };
                    let Some(node) = self.tree.node(id) else {
                        continue;
                    };

                    let is_selected = self.selected == Some(id);
                    ui.horizontal(|ui| {
                        ui.add_space(node.level as f32 * 16.0);
                        let header = ui
                            .selectable_label(is_selected, RichText::new(node.label.as_str()).strong())
                            .on_hover_text(self.tree.path(id));
                        ui.small(format!("level {}", node.level));
                        ui.label(truncate_label(&node.definition, 96));
                        if header.clicked() {
                            pending_selection = Some(id);
                        }
                    });
                }
            });

        if let Some(id) = pending_selection {
            self.set_selected(Some(id));
        }
    }
}
