use crate::query::QueryResult;

/// Serialize a query result to the wire shape
/// `{"hits": <int>, "top": [{"article": <string>, "weight": <int>}, ...]}`.
///
/// The `top` array keeps exactly the engine's ordering. Article names are
/// escaped by serde_json, so quotes, slashes, and unicode survive intact.
pub fn to_json(result: &QueryResult) -> String {
    // Strings and integers cannot fail to serialize.
    serde_json::to_string(result).expect("query result serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::WeightedEntry;

    #[test]
    fn empty_result_shape() {
        assert_eq!(to_json(&QueryResult::empty()), r#"{"hits":0,"top":[]}"#);
    }

    #[test]
    fn escapes_article_names() {
        let r = QueryResult {
            hits: 3,
            top: vec![WeightedEntry { article: "He said \"hi\" / café".into(), weight: 3 }],
        };
        let s = to_json(&r);
        let back: serde_json::Value = serde_json::from_str(&s).unwrap();
        assert_eq!(back["top"][0]["article"], "He said \"hi\" / café");
    }

    #[test]
    fn preserves_engine_order() {
        let r = QueryResult {
            hits: 16,
            top: vec![
                WeightedEntry { article: "Apple".into(), weight: 12 },
                WeightedEntry { article: "Apples (fruit)".into(), weight: 4 },
            ],
        };
        assert_eq!(
            to_json(&r),
            r#"{"hits":16,"top":[{"article":"Apple","weight":12},{"article":"Apples (fruit)","weight":4}]}"#
        );
    }
}
