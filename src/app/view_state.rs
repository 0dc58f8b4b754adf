use crate::ontology::{ConceptTree, NodeId};

/// Interaction flags for one concept. Structure (parent/child edges, layout)
/// never changes after load; these three bits are the only mutable per-node
/// state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeFlags {
    pub visible: bool,
    pub collapsed: bool,
    /// Hidden because an ancestor collapsed, as opposed to never revealed.
    pub hidden_by_collapse: bool,
}

impl NodeFlags {
    const HIDDEN: Self = Self {
        visible: false,
        collapsed: true,
        hidden_by_collapse: false,
    };
}

/// Snapshot of all interaction state over one loaded tree. Transitions never
/// mutate a snapshot in place; they return a new one for the caller to swap
/// in wholesale, so readers cannot observe a half-updated tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    flags: Vec<NodeFlags>,
    focused_leaf: Option<NodeId>,
}

/// Which nodes the viewport should recenter on after a transition.
/// `leaf_focus` selects the enlarged leaf zoom instead of the fit scale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CenterRequest {
    pub nodes: Vec<NodeId>,
    pub leaf_focus: bool,
}

impl CenterRequest {
    fn fit(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            leaf_focus: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Transition {
    pub next: ViewState,
    pub center: CenterRequest,
}

impl ViewState {
    /// State right after a load: only the root is visible, everything is
    /// collapsed, nothing is hidden-by-collapse.
    pub fn initial(tree: &ConceptTree) -> Self {
        let mut flags = vec![NodeFlags::HIDDEN; tree.node_count()];
        if let Some(root) = flags.get_mut(tree.root().index()) {
            root.visible = true;
        }

        Self {
            flags,
            focused_leaf: None,
        }
    }

    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.flags.get(id.index()).copied()
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.flags(id).is_some_and(|flags| flags.visible)
    }

    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.flags(id).is_some_and(|flags| flags.collapsed)
    }

    pub fn focused_leaf(&self) -> Option<NodeId> {
        self.focused_leaf
    }

    pub fn visible_nodes<'a>(
        &'a self,
        tree: &'a ConceptTree,
    ) -> impl Iterator<Item = NodeId> + 'a {
        tree.nodes()
            .iter()
            .map(|node| node.id)
            .filter(|&id| self.is_visible(id))
    }

    /// Applies a click on `id`. Returns `None` for stale ids (a snapshot
    /// that outlived its tree, or an id that never existed) so the caller
    /// can treat them as no-ops.
    pub fn toggle(&self, tree: &ConceptTree, id: NodeId) -> Option<Transition> {
        if tree.node(id).is_none() || self.flags.len() != tree.node_count() {
            return None;
        }

        if tree.is_leaf(id) {
            Some(self.toggle_leaf_focus(tree, id))
        } else {
            Some(self.toggle_collapse(tree, id))
        }
    }

    /// Leaf clicks toggle zoom focus only; no visibility flag changes.
    fn toggle_leaf_focus(&self, tree: &ConceptTree, id: NodeId) -> Transition {
        let mut next = self.clone();

        if self.focused_leaf == Some(id) {
            next.focused_leaf = None;
            let center = match tree.parent(id) {
                Some(parent) => {
                    let mut nodes = vec![parent];
                    nodes.extend(
                        tree.children(parent)
                            .iter()
                            .copied()
                            .filter(|&child| self.is_visible(child)),
                    );
                    CenterRequest::fit(nodes)
                }
                None => CenterRequest::fit(vec![id]),
            };

            Transition { next, center }
        } else {
            next.focused_leaf = Some(id);
            Transition {
                next,
                center: CenterRequest {
                    nodes: vec![id],
                    leaf_focus: true,
                },
            }
        }
    }

    fn toggle_collapse(&self, tree: &ConceptTree, id: NodeId) -> Transition {
        let mut flags = self.flags.clone();
        let new_collapsed = !flags[id.index()].collapsed;

        if !new_collapsed {
            // Expanding: any sibling that is itself expanded gets force-
            // collapsed first. The sibling stays visible; its whole subtree
            // goes dark. Siblings that were already collapsed are untouched.
            if let Some(parent) = tree.parent(id) {
                for &sibling in tree.children(parent) {
                    if sibling == id || flags[sibling.index()].collapsed {
                        continue;
                    }

                    flags[sibling.index()].collapsed = true;
                    for descendant in tree.descendants(sibling) {
                        let entry = &mut flags[descendant.index()];
                        entry.visible = false;
                        entry.hidden_by_collapse = true;
                        entry.collapsed = true;
                    }
                }
            }
        }

        flags[id.index()].collapsed = new_collapsed;

        if new_collapsed {
            for descendant in tree.descendants(id) {
                let entry = &mut flags[descendant.index()];
                entry.visible = false;
                entry.hidden_by_collapse = true;
                entry.collapsed = true;
            }
        } else {
            // Direct children come back; their own collapsed flags are left
            // as they were.
            for &child in tree.children(id) {
                let entry = &mut flags[child.index()];
                entry.visible = true;
                entry.hidden_by_collapse = false;
            }
        }

        let center = if new_collapsed {
            CenterRequest::fit(vec![id])
        } else {
            let mut nodes = vec![id];
            nodes.extend(tree.children(id).iter().copied());
            CenterRequest::fit(nodes)
        };

        Transition {
            next: Self {
                flags,
                focused_leaf: None,
            },
            center,
        }
    }

    /// Back to the root-only expanded state: root visible and expanded, its
    /// direct children visible and collapsed, everything deeper hidden.
    pub fn reset(tree: &ConceptTree) -> Transition {
        let mut flags = vec![NodeFlags::HIDDEN; tree.node_count()];
        let root = tree.root();

        if let Some(entry) = flags.get_mut(root.index()) {
            entry.visible = true;
            entry.collapsed = false;
        }
        for &child in tree.children(root) {
            flags[child.index()].visible = true;
        }

        Transition {
            next: Self {
                flags,
                focused_leaf: None,
            },
            center: CenterRequest::fit(vec![root]),
        }
    }
}
