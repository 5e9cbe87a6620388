use serde::{Deserialize, Serialize};

use super::ContentCodec;
use crate::{error::ContentError, properties::Textbook};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDataset {
    Bare(Vec<Textbook>),
    Wrapped { textbooks: Vec<Textbook> },
}

#[derive(Debug, Serialize)]
struct JsonDatasetRef<'a> {
    textbooks: &'a [Textbook],
}

/// JSON datasets. Decodes both a bare array and a `{"textbooks": [...]}` object; encodes the
/// bare array, pretty-printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Encode in the wrapped form, for files shared with the TOML layout.
    pub fn encode_wrapped(&self, textbooks: &[Textbook]) -> Result<String, ContentError> {
        Ok(serde_json::to_string_pretty(&JsonDatasetRef { textbooks })?)
    }
}

impl ContentCodec for JsonCodec {
    fn decode(&self, content: &str) -> Result<Vec<Textbook>, ContentError> {
        match serde_json::from_str::<JsonDataset>(content) {
            Ok(JsonDataset::Bare(textbooks)) | Ok(JsonDataset::Wrapped { textbooks }) => {
                Ok(textbooks)
            }
            // Untagged errors say nothing useful, so retry as the bare form for the message.
            Err(_) => Ok(serde_json::from_str::<Vec<Textbook>>(content)?),
        }
    }

    fn encode(&self, textbooks: &[Textbook]) -> Result<String, ContentError> {
        Ok(serde_json::to_string_pretty(textbooks)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {
            "id": 1,
            "title": "Calculus, Vol. 1",
            "author": "Tom M. Apostol",
            "edition": "Second Edition",
            "year": "1967",
            "chapters": [{
                "id": 13,
                "title": "Chapter 13: Applications of Vector Algebra to Analytic Geometry",
                "description": "Lines, planes, conic sections.",
                "problemSets": [{
                    "id": 25,
                    "title": "13.25 Miscellaneous exercises on conic sections",
                    "description": "Review",
                    "problems": [{
                        "id": 1,
                        "number": "13.25.1",
                        "content": "Show that $\\frac{x^2}{a^2} + \\frac{y^2}{b^2} = 1$ bounds area $\\pi ab$.",
                        "hint": "Use Theorem 1.19.",
                        "solution": "",
                        "date": "2024-11-25",
                        "hasVisualization": true,
                        "visualization": {"xRange": [-3, 3], "curves": []}
                    }]
                }]
            }]
        }
    ]"#;

    #[test]
    fn decodes_bare_array() {
        let textbooks = JsonCodec.decode(DATASET).unwrap();
        assert_eq!(textbooks.len(), 1);
        let problem = &textbooks[0].chapters[0].problem_sets[0].problems[0];
        assert_eq!(problem.number, "13.25.1");
        assert!(problem.content.contains("\\frac"));
        assert!(problem.has_visualization);
        assert_eq!(problem.sketch().unwrap().x_range, [-3.0, 3.0]);
    }

    #[test]
    fn decodes_wrapped_shape() {
        let wrapped = format!(r#"{{"textbooks": {DATASET}}}"#);
        let textbooks = JsonCodec.decode(&wrapped).unwrap();
        assert_eq!(textbooks[0].id, 1);
        let reencoded = JsonCodec.encode_wrapped(&textbooks).unwrap();
        assert_eq!(JsonCodec.decode(&reencoded).unwrap(), textbooks);
    }

    #[test]
    fn reports_missing_fields() {
        let err = JsonCodec.decode(r#"[{"title": "no id"}]"#).unwrap_err();
        assert!(matches!(err, ContentError::Serialization(ref msg) if msg.contains("id")));
    }
}
