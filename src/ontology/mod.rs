mod load;
mod parse;
mod tree;

pub use load::load_concept_tree;
pub use tree::{ConceptNode, ConceptTree, NodeId};
