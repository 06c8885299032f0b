use serde_json::Value;
use std::collections::HashMap;

/// Display name used when an office entry has no `name` field.
pub const UNNAMED_AREA: &str = "不明";

/// Code → display name map flattened out of the hierarchy's `offices` entry.
///
/// The index is allowed to be incomplete relative to the hierarchy: codes
/// listed under a center but absent from `offices` resolve to a synthesized
/// placeholder instead.
#[derive(Debug, Clone, Default)]
pub struct AreaIndex {
    names: HashMap<String, String>,
}

impl AreaIndex {
    /// Builds the index from the raw hierarchy document. Any shape other
    /// than an object with an `offices` object yields an empty index.
    pub fn from_hierarchy(hierarchy: &Value) -> Self {
        let mut names = HashMap::new();

        if let Some(offices) = hierarchy.get("offices").and_then(Value::as_object) {
            for (code, info) in offices {
                let name = info
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(UNNAMED_AREA);
                names.insert(code.clone(), name.to_string());
            }
        }

        Self { names }
    }

    /// Resolves a code to its display name, falling back to `Area <code>`.
    pub fn display_name(&self, code: &str) -> String {
        self.names
            .get(code)
            .cloned()
            .unwrap_or_else(|| format!("Area {code}"))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }
}

/// One selectable row in the navigation tree. The row owns its code: the
/// activation path reads this field, never a shared loop variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRow {
    pub code: String,
    pub name: String,
}

impl AreaRow {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// A regional center and its child area rows, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterGroup {
    pub code: String,
    pub name: String,
    pub en_name: String,
    pub areas: Vec<AreaRow>,
}

/// Builds the ordered (center, [children]) groups for the sidebar.
///
/// Iteration order is the insertion order of the `centers` mapping as
/// received from the source document. Missing or ill-shaped keys degrade
/// to empty output rather than failing.
pub fn build_center_groups(hierarchy: &Value, index: &AreaIndex) -> Vec<CenterGroup> {
    let Some(centers) = hierarchy.get("centers").and_then(Value::as_object) else {
        return Vec::new();
    };

    centers
        .iter()
        .map(|(code, center)| {
            let name = center
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(UNNAMED_AREA)
                .to_string();
            let en_name = center
                .get("enName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let areas = center
                .get("children")
                .and_then(Value::as_array)
                .map(|children| {
                    children
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|child| AreaRow {
                            code: child.to_string(),
                            name: index.display_name(child),
                        })
                        .collect()
                })
                .unwrap_or_default();

            CenterGroup {
                code: code.clone(),
                name,
                en_name,
                areas,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_hierarchy() -> Value {
        json!({
            "centers": {
                "010300": {
                    "name": "関東甲信地方",
                    "enName": "Kanto Koshin",
                    "children": ["130000", "140000"]
                },
                "010100": {
                    "name": "北海道地方",
                    "children": ["016000"]
                }
            },
            "offices": {
                "130000": { "name": "東京都", "enName": "Tokyo" },
                "140000": { "name": "神奈川県" },
                "016000": {}
            }
        })
    }

    #[test]
    fn index_key_set_matches_offices() {
        let index = AreaIndex::from_hierarchy(&sample_hierarchy());

        assert_eq!(index.len(), 3);
        assert!(index.contains("130000"));
        assert!(index.contains("140000"));
        assert!(index.contains("016000"));
    }

    #[test]
    fn index_falls_back_for_missing_name() {
        let index = AreaIndex::from_hierarchy(&sample_hierarchy());

        assert_eq!(index.display_name("016000"), UNNAMED_AREA);
    }

    #[test]
    fn index_synthesizes_placeholder_for_unknown_code() {
        let index = AreaIndex::from_hierarchy(&sample_hierarchy());

        assert_eq!(index.display_name("999999"), "Area 999999");
    }

    #[test]
    fn malformed_hierarchy_yields_empty_index() {
        for doc in [
            Value::Null,
            json!("not an object"),
            json!([1, 2, 3]),
            json!({ "centers": {} }),
            json!({ "offices": "wrong shape" }),
        ] {
            let index = AreaIndex::from_hierarchy(&doc);
            assert!(index.is_empty(), "expected empty index for {doc}");
        }
    }

    #[test]
    fn groups_follow_document_order() {
        let hierarchy = sample_hierarchy();
        let index = AreaIndex::from_hierarchy(&hierarchy);
        let groups = build_center_groups(&hierarchy, &index);

        // "010300" precedes "010100" in the document even though a sorted
        // map would swap them.
        let codes: Vec<&str> = groups.iter().map(|g| g.code.as_str()).collect();
        assert_eq!(codes, ["010300", "010100"]);
    }

    #[test]
    fn group_rows_resolve_labels() {
        let hierarchy = sample_hierarchy();
        let index = AreaIndex::from_hierarchy(&hierarchy);
        let groups = build_center_groups(&hierarchy, &index);

        assert_eq!(groups[0].name, "関東甲信地方");
        assert_eq!(groups[0].en_name, "Kanto Koshin");
        assert_eq!(groups[0].areas.len(), 2);
        assert_eq!(groups[0].areas[0].label(), "東京都 (130000)");
        assert_eq!(groups[0].areas[1].label(), "神奈川県 (140000)");

        // enName absent renders empty, not a placeholder.
        assert_eq!(groups[1].en_name, "");
        assert_eq!(groups[1].areas[0].label(), "不明 (016000)");
    }

    #[test]
    fn unresolved_children_get_placeholder_rows() {
        let hierarchy = json!({
            "centers": {
                "C1": { "name": "Kanto", "children": ["130010", "130020"] }
            },
            "offices": {
                "130010": { "name": "Tokyo" }
            }
        });
        let index = AreaIndex::from_hierarchy(&hierarchy);
        let groups = build_center_groups(&hierarchy, &index);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].areas[0].label(), "Tokyo (130010)");
        assert_eq!(groups[0].areas[1].label(), "Area 130020 (130020)");
    }

    #[test]
    fn malformed_centers_yield_no_groups() {
        let index = AreaIndex::default();

        assert!(build_center_groups(&Value::Null, &index).is_empty());
        assert!(build_center_groups(&json!({ "offices": {} }), &index).is_empty());
        assert!(build_center_groups(&json!({ "centers": [] }), &index).is_empty());
    }

    #[test]
    fn non_string_children_are_skipped() {
        let hierarchy = json!({
            "centers": {
                "C1": { "name": "Kanto", "children": ["130010", 42, null] }
            },
            "offices": {}
        });
        let index = AreaIndex::from_hierarchy(&hierarchy);
        let groups = build_center_groups(&hierarchy, &index);

        assert_eq!(groups[0].areas.len(), 1);
        assert_eq!(groups[0].areas[0].code, "130010");
    }
}
