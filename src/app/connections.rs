use eframe::egui::Pos2;

use crate::layout;
use crate::ontology::{ConceptTree, NodeId};

use super::view_state::ViewState;

/// Levels deeper than this all share the last stroke style.
pub const MAX_STYLE_LEVEL: usize = 5;

/// One parent->child segment between two visible cards. Derived state: the
/// whole list is rebuilt and replaced whenever the visibility snapshot
/// changes, never patched in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub parent: NodeId,
    pub child: NodeId,
    /// Parent card bottom-center.
    pub from: Pos2,
    /// Child card top-center.
    pub to: Pos2,
    /// min(parent level, MAX_STYLE_LEVEL); styling only.
    pub level: usize,
}

pub fn visible_connections(tree: &ConceptTree, state: &ViewState) -> Vec<Connection> {
    tree.nodes()
        .iter()
        .filter_map(|node| {
            let parent_id = node.parent?;
            if !state.is_visible(node.id) || !state.is_visible(parent_id) {
                return None;
            }
            let parent = tree.node(parent_id)?;

            Some(Connection {
                parent: parent_id,
                child: node.id,
                from: layout::bottom_anchor(parent.position),
                to: layout::top_anchor(node.position),
                level: parent.level.min(MAX_STYLE_LEVEL),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::ConceptTree;
    use crate::app::view_state::ViewState;

    fn id_of(tree: &ConceptTree, label: &str) -> NodeId {
        tree.nodes()
            .iter()
            .find(|node| node.label == label)
            .map(|node| node.id)
            .unwrap()
    }

    fn expand(tree: &ConceptTree, state: &ViewState, label: &str) -> ViewState {
        state.toggle(tree, id_of(tree, label)).unwrap().next
    }

    #[test]
    fn no_connections_while_only_the_root_is_visible() {
        let tree = ConceptTree::from_json(
            r#"{"name": "Root", "children": [{"name": "A"}, {"name": "B"}]}"#,
        )
        .unwrap();
        let state = ViewState::initial(&tree);
        assert!(visible_connections(&tree, &state).is_empty());
    }

    #[test]
    fn expanding_emits_one_segment_per_visible_pair() {
        let tree = ConceptTree::from_json(
            r#"{"name": "Root", "children": [
                {"name": "A", "children": [{"name": "X"}]},
                {"name": "B"}
            ]}"#,
        )
        .unwrap();
        let state = ViewState::initial(&tree);
        let state = expand(&tree, &state, "Root");

        let connections = visible_connections(&tree, &state);
        assert_eq!(connections.len(), 2);

        let root = tree.node(tree.root()).unwrap();
        let a = tree.node(id_of(&tree, "A")).unwrap();
        let to_a = connections
            .iter()
            .find(|connection| connection.child == a.id)
            .unwrap();
        assert_eq!(to_a.parent, root.id);
        assert_eq!(to_a.from, layout::bottom_anchor(root.position));
        assert_eq!(to_a.to, layout::top_anchor(a.position));
        assert_eq!(to_a.level, 0);

        let state = expand(&tree, &state, "A");
        assert_eq!(visible_connections(&tree, &state).len(), 3);
    }

    #[test]
    fn collapsing_rebuilds_the_list_without_the_hidden_pairs() {
        let tree = ConceptTree::from_json(
            r#"{"name": "Root", "children": [
                {"name": "A", "children": [{"name": "X"}, {"name": "Y"}]}
            ]}"#,
        )
        .unwrap();
        let state = ViewState::initial(&tree);
        let state = expand(&tree, &state, "Root");
        let state = expand(&tree, &state, "A");
        assert_eq!(visible_connections(&tree, &state).len(), 3);

        let state = expand(&tree, &state, "A"); // collapse again
        let connections = visible_connections(&tree, &state);
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].child, id_of(&tree, "A"));
    }

    #[test]
    fn style_level_caps_at_five() {
        let mut document = String::from(r#"{"name": "n0""#);
        for level in 1..9 {
            document.push_str(&format!(r#", "children": [{{"name": "n{level}""#));
        }
        document.push_str(&"}]".repeat(8));
        document.push('}');

        let tree = ConceptTree::from_json(&document).unwrap();
        let mut state = ViewState::initial(&tree);
        for level in 0..8 {
            state = expand(&tree, &state, &format!("n{level}"));
        }

        let connections = visible_connections(&tree, &state);
        assert_eq!(connections.len(), 8);
        let deepest = connections
            .iter()
            .find(|connection| connection.child == id_of(&tree, "n8"))
            .unwrap();
        assert_eq!(deepest.level, MAX_STYLE_LEVEL);
    }
}
