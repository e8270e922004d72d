//! XLIFF 1.2 document model.
//!
//! Only the parts the connector exchanges with the vendor are modelled:
//! `xliff > file > body > trans-unit > {source, target}`. Unknown elements
//! such as `header` are skipped on read.
//!
//! See <https://docs.oasis-open.org/xliff/v1.2/os/xliff-core.html>.

mod codec;

pub use codec::{from_bytes, to_bytes};

use serde::{Deserialize, Serialize};

pub const VERSION: &str = "1.2";
pub const XMLNS: &str = "urn:oasis:names:tc:xliff:document:1.2";
const DEFAULT_DATATYPE: &str = "plaintext";

/// Extension given to every document uploaded to the vendor.
pub const FILE_EXTENSION: &str = "xlf";

/// Document name for a translation: `<translationId>.xlf`.
pub fn document_name(translation_id: &str) -> String {
    format!("{}.{}", translation_id, FILE_EXTENSION)
}

/// Root `<xliff>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "xliff")]
pub struct XliffDocument {
    #[serde(rename = "@version", default = "default_version")]
    pub version: String,

    #[serde(rename = "@xmlns", default = "default_xmlns")]
    pub xmlns: String,

    #[serde(rename = "file", default)]
    pub files: Vec<XliffFile>,
}

impl XliffDocument {
    /// Container holding exactly one file, the shape the vendor exchanges.
    pub fn single(file: XliffFile) -> Self {
        Self {
            version: default_version(),
            xmlns: default_xmlns(),
            files: vec![file],
        }
    }

    /// Take the first embedded file out of the document.
    pub fn into_first_file(self) -> Option<XliffFile> {
        self.files.into_iter().next()
    }
}

fn default_version() -> String {
    VERSION.to_string()
}

fn default_xmlns() -> String {
    XMLNS.to_string()
}

fn default_datatype() -> String {
    DEFAULT_DATATYPE.to_string()
}

/// One `<file>` element: a single translatable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XliffFile {
    #[serde(rename = "@original", default)]
    pub original: String,

    #[serde(rename = "@source-language")]
    pub source_language: String,

    #[serde(
        rename = "@target-language",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_language: Option<String>,

    #[serde(rename = "@datatype", default = "default_datatype")]
    pub datatype: String,

    #[serde(default)]
    pub body: XliffBody,
}

impl XliffFile {
    pub fn new(original: impl Into<String>, source_language: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            source_language: source_language.into(),
            target_language: None,
            datatype: default_datatype(),
            body: XliffBody::default(),
        }
    }

    pub fn with_unit(mut self, unit: TransUnit) -> Self {
        self.body.units.push(unit);
        self
    }

    pub fn units(&self) -> &[TransUnit] {
        &self.body.units
    }

    /// Move every unit's source text into its target slot and clear the
    /// source. The vendor reads the text to translate from `<target>`.
    ///
    /// Not idempotent: a second pass leaves both slots empty.
    pub fn move_source_to_target(&mut self) {
        for unit in &mut self.body.units {
            unit.target = unit.source.take();
        }
    }
}

/// `<body>`: ordered translation units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XliffBody {
    #[serde(rename = "trans-unit", default)]
    pub units: Vec<TransUnit>,
}

/// `<trans-unit>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransUnit {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TransUnit {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
            target: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn document_name_appends_extension() {
        assert_eq!(document_name("T1"), "T1.xlf");
        assert_eq!(document_name("a.b"), "a.b.xlf");
    }

    #[test]
    fn swap_moves_source_into_target() {
        let mut file = XliffFile::new("page", "en")
            .with_unit(TransUnit::new("1", "Hello"))
            .with_unit(TransUnit::new("2", "World"));

        file.move_source_to_target();

        let units = file.units();
        assert_eq!(units[0].source, None);
        assert_eq!(units[0].target.as_deref(), Some("Hello"));
        assert_eq!(units[1].source, None);
        assert_eq!(units[1].target.as_deref(), Some("World"));
    }

    #[test]
    fn swap_twice_empties_target() {
        let mut file = XliffFile::new("page", "en").with_unit(TransUnit::new("1", "Hello"));
        file.move_source_to_target();
        file.move_source_to_target();
        assert_eq!(file.units()[0].source, None);
        assert_eq!(file.units()[0].target, None);
    }

    #[test]
    fn single_document_wraps_one_file() {
        let doc = XliffDocument::single(XliffFile::new("page", "en"));
        assert_eq!(doc.version, VERSION);
        assert_eq!(doc.xmlns, XMLNS);
        assert_eq!(doc.files.len(), 1);
        assert_eq!(doc.into_first_file().map(|f| f.original), Some("page".to_string()));
    }

    proptest! {
        #[test]
        fn swap_preserves_order_and_text(sources in proptest::collection::vec("[a-zA-Z ]{1,20}", 0..10)) {
            let mut file = XliffFile::new("p", "en");
            for (i, s) in sources.iter().enumerate() {
                file = file.with_unit(TransUnit::new(i.to_string(), s.clone()));
            }

            file.move_source_to_target();

            prop_assert_eq!(file.units().len(), sources.len());
            for (unit, original) in file.units().iter().zip(&sources) {
                prop_assert_eq!(unit.source.as_deref(), None);
                prop_assert_eq!(unit.target.as_deref(), Some(original.as_str()));
            }
        }
    }
}
