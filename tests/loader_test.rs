//! Loading datasets from disk through the codec registry and the site config.

mod common;

use common::*;
use std::path::PathBuf;
use tempfile::TempDir;
use test_log::test;
use textbook_core::{
    codec::{load_content_base, load_textbooks, save_textbooks, ContentCodec, CODECS},
    config::{SiteConfigProvider, TomlConfigProvider},
    nodekey::NodeKey,
    properties::Textbook,
    ContentError,
};

fn sample() -> Vec<Textbook> {
    vec![textbook(
        1,
        vec![
            chapter(13, vec![problem_set(13, 25, &[1, 2, 3])]),
            chapter(14, vec![problem_set(14, 1, &[1])]),
        ],
    )]
}

#[test]
fn test_json_and_toml_load_the_same_tree() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let json = dir.path().join("books.json");
    let toml = dir.path().join("books.TOML");
    save_textbooks(&json, &sample())?;
    save_textbooks(&toml, &sample())?;

    assert_eq!(load_textbooks(&json)?, sample());
    assert_eq!(load_textbooks(&toml)?, sample());

    let content = load_content_base(&toml)?;
    let next = content
        .next_problem(&NodeKey::Problem {
            book: 1,
            chapter: 13,
            set: 25,
            problem: 3,
        })
        .ok_or("no next problem")?;
    assert_eq!(next.problem.number, "14.1.1");
    Ok(())
}

#[test]
fn test_unknown_extension_is_a_command_error() {
    let err = load_textbooks("books.yaml").unwrap_err();
    match err {
        ContentError::Command(msg) => {
            assert!(msg.contains("json"));
            assert!(msg.contains("toml"));
        }
        other => panic!("expected Command error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_textbooks(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ContentError::NotFound(_)));
}

#[test]
fn test_invalid_dataset_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.json");
    let mut books = sample();
    books[0].chapters[1].problem_sets[0].problems[0].number = "13.25.4".to_string();
    save_textbooks(&path, &books).unwrap();

    // Decoding does not validate; building the content base does.
    assert_eq!(load_textbooks(&path).unwrap(), books);
    let err = load_content_base(&path).unwrap_err();
    assert!(matches!(err, ContentError::InvalidDataset(ref msg) if msg.contains("14.1.1")));
    assert!(err.is_data_error());
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.toml");
    std::fs::write(&path, "[[textbooks]]\nid = \"one\"\n").unwrap();
    assert!(matches!(
        load_textbooks(&path),
        Err(ContentError::Serialization(_))
    ));
}

#[derive(Default)]
struct LineCodec;

// One textbook title per line, no chapters.
impl ContentCodec for LineCodec {
    fn decode(&self, content: &str) -> Result<Vec<Textbook>, ContentError> {
        Ok(content
            .lines()
            .enumerate()
            .map(|(i, title)| Textbook {
                title: title.to_string(),
                ..textbook(i as u32 + 1, vec![])
            })
            .collect())
    }

    fn encode(&self, textbooks: &[Textbook]) -> Result<String, ContentError> {
        Ok(textbooks
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[test]
fn test_registered_codec_is_used_by_extension() {
    CODECS.insert::<LineCodec>("lines");
    assert!(CODECS.extensions().contains(&"lines".to_string()));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.lines");
    std::fs::write(&path, "Calculus\nLinear Algebra\n").unwrap();
    let content = load_content_base(&path).unwrap();
    assert_eq!(content.textbooks().len(), 2);
    assert_eq!(content.textbook(2).unwrap().title, "Linear Algebra");
    assert_eq!(content.traversal(1).count(), 0);
}

#[test]
fn test_config_points_at_dataset() {
    let dir = TempDir::new().unwrap();
    save_textbooks(dir.path().join("books.json"), &sample()).unwrap();
    std::fs::write(
        dir.path().join("site.toml"),
        "content = \"books.json\"\nstrict = true\n",
    )
    .unwrap();

    let provider = TomlConfigProvider::new(dir.path().join("site.toml"));
    let config = provider.get_config().unwrap();
    assert_eq!(config.content, Some(PathBuf::from("books.json")));
    let content = config.load_content(&provider.base_dir()).unwrap();
    assert_eq!(content.textbooks(), sample().as_slice());
}
