use serde::{Deserialize, Serialize};

use super::ContentCodec;
use crate::{error::ContentError, properties::Textbook};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlDataset {
    #[serde(default)]
    textbooks: Vec<Textbook>,
}

/// TOML datasets: a top-level `[[textbooks]]` array of tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl ContentCodec for TomlCodec {
    fn decode(&self, content: &str) -> Result<Vec<Textbook>, ContentError> {
        let dataset: TomlDataset = ::toml::from_str(content)?;
        Ok(dataset.textbooks)
    }

    fn encode(&self, textbooks: &[Textbook]) -> Result<String, ContentError> {
        let dataset = TomlDataset {
            textbooks: textbooks.to_vec(),
        };
        Ok(::toml::to_string(&dataset)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"
[[textbooks]]
id = 2
title = "Linear Algebra Done Right"
author = "Sheldon Axler"
edition = "Third Edition"
year = "2015"

[[textbooks.chapters]]
id = 1
title = "Chapter 1: Vector Spaces"

[[textbooks.chapters.problemSets]]
id = 1
title = "1.A R^n and C^n"

[[textbooks.chapters.problemSets.problems]]
id = 1
number = "1.1.1"
content = '''Suppose $a$ and $b$ are real numbers, not both $0$. Find $\frac{1}{a + bi}$.'''
date = "2025-01-02"
"#;

    #[test]
    fn decodes_nested_tables_and_literal_strings() {
        let textbooks = TomlCodec.decode(DATASET).unwrap();
        assert_eq!(textbooks.len(), 1);
        assert_eq!(textbooks[0].author, "Sheldon Axler");
        let problem = &textbooks[0].chapters[0].problem_sets[0].problems[0];
        assert!(problem.content.contains(r"\frac{1}{a + bi}"));
        assert!(problem.hint.is_empty());
        assert!(!problem.has_visualization);
    }

    #[test]
    fn empty_document_has_no_textbooks() {
        assert!(TomlCodec.decode("").unwrap().is_empty());
    }

    #[test]
    fn encode_then_decode_preserves_tree() {
        let textbooks = TomlCodec.decode(DATASET).unwrap();
        let encoded = TomlCodec.encode(&textbooks).unwrap();
        assert_eq!(TomlCodec.decode(&encoded).unwrap(), textbooks);
    }
}
