use anyhow::Result;
use eframe::egui::Pos2;

use crate::layout;

use super::parse::{RawConcept, parse_document};

/// Index of a concept in the tree arena. Ids are assigned in depth-first
/// traversal order at build time and stay stable for the lifetime of one
/// loaded tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct ConceptNode {
    pub id: NodeId,
    pub label: String,
    pub definition: String,
    pub parent: Option<NodeId>,
    pub level: usize,
    /// Assigned once at build time; read-only afterward regardless of
    /// visibility.
    pub position: Pos2,
}

impl ConceptNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Flat arena of concepts plus the parent->children adjacency. The structure
/// is immutable after construction; interaction state lives elsewhere.
#[derive(Clone, Debug)]
pub struct ConceptTree {
    nodes: Vec<ConceptNode>,
    children: Vec<Vec<NodeId>>,
    root: NodeId,
}

struct Pending {
    raw: RawConcept,
    position: Pos2,
    level: usize,
    parent: Option<NodeId>,
}

impl ConceptTree {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::build(parse_document(raw)?))
    }

    fn build(root: RawConcept) -> Self {
        let mut nodes: Vec<ConceptNode> = Vec::new();
        let mut children: Vec<Vec<NodeId>> = Vec::new();

        // Explicit id counter, local to this build; ids come out in preorder.
        let mut counter = 0usize;
        let mut stack = vec![Pending {
            raw: root,
            position: layout::ROOT_ORIGIN,
            level: 0,
            parent: None,
        }];

        while let Some(entry) = stack.pop() {
            let Pending {
                raw,
                position,
                level,
                parent,
            } = entry;

            let id = NodeId(counter);
            counter += 1;

            let definition = raw
                .definition
                .filter(|definition| !definition.is_empty())
                .unwrap_or_else(|| raw.name.clone());

            nodes.push(ConceptNode {
                id,
                label: raw.name,
                definition,
                parent,
                level,
                position,
            });
            children.push(Vec::new());

            if let Some(parent) = parent {
                children[parent.index()].push(id);
            }

            let slots = layout::child_positions(position, raw.children.len());
            for (child, slot) in raw.children.into_iter().zip(slots).rev() {
                stack.push(Pending {
                    raw: child,
                    position: slot,
                    level: level + 1,
                    parent: Some(id),
                });
            }
        }

        Self {
            nodes,
            children,
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&ConceptNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[ConceptNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|node| node.level).max().unwrap_or(0)
    }

    /// All transitive descendants of `id`, collected iteratively over the
    /// adjacency, not by recursion.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut collected = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            for &child in self.children(current) {
                collected.push(child);
                stack.push(child);
            }
        }

        collected
    }

    /// Display path from the root down to `id`, names joined with " › ".
    pub fn path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                break;
            };
            parts.push(node.label.as_str());
            cursor = node.parent;
        }

        parts.reverse();
        parts.join(" \u{203a} ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "name": "Root",
        "children": [
            {"name": "A", "children": [{"name": "X"}, {"name": "Y"}]},
            {"name": "B"}
        ]
    }"#;

    fn scenario_tree() -> ConceptTree {
        ConceptTree::from_json(SCENARIO).unwrap()
    }

    fn id_of(tree: &ConceptTree, label: &str) -> NodeId {
        tree.nodes()
            .iter()
            .find(|node| node.label == label)
            .map(|node| node.id)
            .unwrap()
    }

    #[test]
    fn flattening_preserves_node_count_and_assigns_preorder_ids() {
        let tree = scenario_tree();
        assert_eq!(tree.node_count(), 5);

        for (index, node) in tree.nodes().iter().enumerate() {
            assert_eq!(node.id.index(), index);
        }

        // Preorder: Root, A, X, Y, B.
        let labels = tree
            .nodes()
            .iter()
            .map(|node| node.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Root", "A", "X", "Y", "B"]);
    }

    #[test]
    fn levels_equal_depth_and_exactly_one_root() {
        let tree = scenario_tree();
        assert_eq!(tree.node(tree.root()).unwrap().level, 0);
        assert_eq!(tree.node(id_of(&tree, "A")).unwrap().level, 1);
        assert_eq!(tree.node(id_of(&tree, "X")).unwrap().level, 2);

        let roots = tree.nodes().iter().filter(|node| node.is_root()).count();
        assert_eq!(roots, 1);
    }

    #[test]
    fn children_keep_source_order() {
        let tree = scenario_tree();
        let root_children = tree
            .children(tree.root())
            .iter()
            .map(|&id| tree.node(id).unwrap().label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(root_children, ["A", "B"]);
    }

    #[test]
    fn layout_is_assigned_during_the_build_traversal() {
        let tree = scenario_tree();
        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.position, layout::ROOT_ORIGIN);

        let expected = layout::child_positions(root.position, 2);
        let a = tree.node(id_of(&tree, "A")).unwrap();
        let b = tree.node(id_of(&tree, "B")).unwrap();
        assert_eq!(a.position, expected[0]);
        assert_eq!(b.position, expected[1]);
        assert_eq!(a.position.y, root.position.y + layout::ROW_SPACING);
    }

    #[test]
    fn missing_definition_falls_back_to_the_label() {
        let tree = scenario_tree();
        let b = tree.node(id_of(&tree, "B")).unwrap();
        assert_eq!(b.definition, "B");

        let tree = ConceptTree::from_json(
            r#"{"name": "Root", "definition": "", "children": []}"#,
        )
        .unwrap();
        assert_eq!(tree.node(tree.root()).unwrap().definition, "Root");
    }

    #[test]
    fn descendants_are_transitive_and_exclude_the_node_itself() {
        let tree = scenario_tree();
        let mut from_root = tree.descendants(tree.root());
        from_root.sort();
        assert_eq!(from_root.len(), 4);
        assert!(!from_root.contains(&tree.root()));

        let from_a = tree.descendants(id_of(&tree, "A"));
        assert_eq!(from_a.len(), 2);
        assert!(tree.descendants(id_of(&tree, "X")).is_empty());
    }

    #[test]
    fn paths_join_labels_from_the_root() {
        let tree = scenario_tree();
        assert_eq!(tree.path(id_of(&tree, "X")), "Root \u{203a} A \u{203a} X");
        assert_eq!(tree.path(tree.root()), "Root");
    }

    #[test]
    fn single_chain_document_builds_level_per_node() {
        let depth = 40;
        let mut document = String::from(r#"{"name": "n0""#);
        for level in 1..depth {
            document.push_str(&format!(r#", "children": [{{"name": "n{level}""#));
        }
        document.push_str(&"}]".repeat(depth - 1));
        document.push('}');

        let tree = ConceptTree::from_json(&document).unwrap();
        assert_eq!(tree.node_count(), depth);
        assert_eq!(tree.max_level(), depth - 1);
        assert_eq!(tree.descendants(tree.root()).len(), depth - 1);
    }
}
