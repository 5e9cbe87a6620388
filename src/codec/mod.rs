//! # Content Codecs
//!
//! Decoding (and re-encoding) of textbook datasets. A dataset is a list of [Textbook] trees; the
//! on-disk format is chosen by file extension through the global [CODECS] map.
//!
//! Built-in codecs:
//!
//! - `json`: a bare array of textbooks, or an object with a `textbooks` array. This is the shape
//!   of the site's legacy content module.
//! - `toml`: a `[[textbooks]]` array of tables. Literal strings (`'''...'''`) make it the
//!   friendlier format for hand-written math markup, which is full of backslashes.
//!
//! Decoding does not validate; hand the result to [crate::contentbase::ContentBase::new].

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::{fs::read_to_string, path::Path, result::Result, sync::Arc};

use crate::{contentbase::ContentBase, error::ContentError, properties::Textbook};

pub mod json;
pub mod toml;

pub use self::json::JsonCodec;
pub use self::toml::TomlCodec;

/// Global singleton codec map with builtin codecs (json, toml)
pub static CODECS: Lazy<CodecMap> = Lazy::new(CodecMap::create);

pub trait ContentCodec: Send + Sync {
    fn decode(&self, content: &str) -> Result<Vec<Textbook>, ContentError>;

    fn encode(&self, textbooks: &[Textbook]) -> Result<String, ContentError>;
}

// It is better to express the complexity of the singleton than hide it.
#[allow(clippy::type_complexity)]
pub struct CodecMap(Arc<RwLock<Vec<(String, Arc<dyn ContentCodec>)>>>);

impl Clone for CodecMap {
    fn clone(&self) -> Self {
        CodecMap(self.0.clone())
    }
}

impl CodecMap {
    pub fn create() -> Self {
        CodecMap(Arc::new(RwLock::new(vec![
            ("json".to_string(), Arc::new(JsonCodec) as Arc<dyn ContentCodec>),
            ("toml".to_string(), Arc::new(TomlCodec) as Arc<dyn ContentCodec>),
        ])))
    }

    /// Register `T` for `extension`, replacing any codec already registered for it. Extensions
    /// are case-insensitive.
    pub fn insert<T: ContentCodec + Default + 'static>(&self, extension: &str) {
        let extension = extension.to_lowercase();
        let mut writer = self.0.write();
        let codec: Arc<dyn ContentCodec> = Arc::new(T::default());
        if let Some(entry) = writer.iter_mut().find(|(ext, _)| *ext == extension) {
            entry.1 = codec;
        } else {
            writer.push((extension, codec));
        }
    }

    pub fn get(&self, ext: &str) -> Option<Arc<dyn ContentCodec>> {
        let ext = ext.to_lowercase();
        let reader = self.0.read();
        reader
            .iter()
            .find(|(codec_ext, _value)| &ext == codec_ext)
            .map(|(_codec_ext, value)| value.clone())
    }

    pub fn extensions(&self) -> Vec<String> {
        let reader = self.0.read();
        reader
            .iter()
            .map(|(codec_ext, _value)| codec_ext.clone())
            .collect::<Vec<String>>()
    }
}

/// The codec registered for the extension of `path`.
pub fn codec_for<P: AsRef<Path>>(path: P) -> Result<Arc<dyn ContentCodec>, ContentError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_string())
        .unwrap_or_default();
    CODECS.get(&ext).ok_or_else(|| {
        ContentError::Command(format!(
            "No content codec for {path:?}. Known extensions: {}",
            CODECS.extensions().join(", ")
        ))
    })
}

/// Read and decode the textbook dataset at `path`.
pub fn load_textbooks<P: AsRef<Path>>(path: P) -> Result<Vec<Textbook>, ContentError> {
    let codec = codec_for(&path)?;
    tracing::debug!("Reading content from {:?}", path.as_ref());
    let content = read_to_string(&path)?;
    codec.decode(&content)
}

/// Read, decode, validate and index the textbook dataset at `path`.
pub fn load_content_base<P: AsRef<Path>>(path: P) -> Result<ContentBase, ContentError> {
    ContentBase::new(load_textbooks(path)?)
}

/// Encode `textbooks` with the codec for `path` and write them there.
pub fn save_textbooks<P: AsRef<Path>>(path: P, textbooks: &[Textbook]) -> Result<(), ContentError> {
    let codec = codec_for(&path)?;
    let content = codec.encode(textbooks)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn extensions_match_regardless_of_case() {
        let codecs = CodecMap::create();
        codecs.insert::<JsonCodec>("JSN");
        assert!(codecs.get("jsn").is_some());
        assert!(codecs.get("JSN").is_some());
        assert!(codecs.get("Jsn").is_some());

        // Re-registering under another case replaces rather than duplicates.
        codecs.insert::<TomlCodec>("Jsn");
        assert_eq!(codecs.extensions(), vec!["json", "toml", "jsn"]);
        // An empty document is an empty TOML dataset but not valid JSON.
        assert_eq!(codecs.get("JSN").unwrap().decode("").ok(), Some(vec![]));
    }
}
