use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// One entry of the nested input document. `definition` and `children` are
/// both optional in the source material.
#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawConcept {
    pub(super) name: String,
    #[serde(default)]
    pub(super) definition: Option<String>,
    #[serde(default)]
    pub(super) children: Vec<RawConcept>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Single(RawConcept),
    Many(Vec<RawConcept>),
}

/// Extracts the root concept from a document that is either a single object
/// or an array whose first element is the root.
pub(super) fn parse_document(raw: &str) -> Result<RawConcept> {
    let document: RawDocument =
        serde_json::from_str(raw).context("invalid ontology document JSON")?;

    match document {
        RawDocument::Single(root) => Ok(root),
        RawDocument::Many(roots) => roots
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("ontology document is an empty array")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_document;

    #[test]
    fn parses_single_object_document() {
        let root = parse_document(r#"{"name": "Root", "definition": "top"}"#).unwrap();
        assert_eq!(root.name, "Root");
        assert_eq!(root.definition.as_deref(), Some("top"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn array_document_uses_first_element() {
        let root =
            parse_document(r#"[{"name": "First"}, {"name": "Second"}]"#).unwrap();
        assert_eq!(root.name, "First");
    }

    #[test]
    fn empty_array_is_an_error() {
        assert!(parse_document("[]").is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_document("{not json").is_err());
        assert!(parse_document(r#"{"label": "no name field"}"#).is_err());
    }

    #[test]
    fn nested_children_round_through() {
        let root = parse_document(
            r#"{"name": "Root", "children": [{"name": "A", "children": [{"name": "X"}]}]}"#,
        )
        .unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children[0].name, "X");
    }
}
