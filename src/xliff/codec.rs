//! XLIFF payload codec: written through `quick-xml`'s serde serializer, read
//! back with its event reader.

use bytes::Bytes;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{TransUnit, XliffDocument, XliffFile, VERSION, XMLNS};
use crate::types::{Error, Result};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Serialize a document into the UTF-8 byte payload uploaded to the vendor.
pub fn to_bytes(document: &XliffDocument) -> Result<Bytes> {
    let body = quick_xml::se::to_string(document).map_err(|e| Error::xml(e.to_string()))?;

    let mut out = String::with_capacity(DECLARATION.len() + 1 + body.len());
    out.push_str(DECLARATION);
    out.push('\n');
    out.push_str(&body);
    Ok(Bytes::from(out))
}

/// Parse a document downloaded from the vendor.
///
/// Segment text is kept byte for byte: leading, trailing and
/// whitespace-only content in `<source>`/`<target>` survives. Inline markup
/// inside a segment is dropped and its text kept. Elements outside
/// `xliff > file > body > trans-unit` are skipped.
pub fn from_bytes(data: &[u8]) -> Result<XliffDocument> {
    let xml = std::str::from_utf8(data).map_err(|e| Error::xliff(e.to_string()))?;
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut document: Option<XliffDocument> = None;
    let mut file: Option<XliffFile> = None;
    let mut unit: Option<TransUnit> = None;
    let mut segment: Option<(Slot, String)> = None;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| Error::xliff(e.to_string()))?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let empty = matches!(event, Event::Empty(_));
                if !empty {
                    depth += 1;
                }
                if segment.is_some() {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"xliff" if depth <= 1 => {
                        let mut root = XliffDocument {
                            version: VERSION.to_string(),
                            xmlns: XMLNS.to_string(),
                            files: Vec::new(),
                        };
                        for (key, value) in attributes(e)? {
                            match key.as_str() {
                                "version" => root.version = value,
                                "xmlns" => root.xmlns = value,
                                _ => {}
                            }
                        }
                        document = Some(root);
                    }
                    b"file" if document.is_some() => {
                        let next = read_file(e)?;
                        match (empty, document.as_mut()) {
                            (true, Some(doc)) => doc.files.push(next),
                            _ => file = Some(next),
                        }
                    }
                    b"trans-unit" if file.is_some() => {
                        let id = attributes(e)?
                            .into_iter()
                            .find(|(k, _)| k == "id")
                            .map(|(_, v)| v)
                            .ok_or_else(|| Error::xliff("trans-unit is missing id"))?;
                        let next = TransUnit {
                            id,
                            source: None,
                            target: None,
                        };
                        match (empty, file.as_mut()) {
                            (true, Some(f)) => f.body.units.push(next),
                            _ => unit = Some(next),
                        }
                    }
                    b"source" | b"target" if unit.is_some() => {
                        let slot = if e.local_name().as_ref() == Slot::Source.tag() {
                            Slot::Source
                        } else {
                            Slot::Target
                        };
                        if empty {
                            set_segment(unit.as_mut(), slot, String::new());
                        } else {
                            segment = Some((slot, String::new()));
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if let Some((_, text)) = segment.as_mut() {
                    text.push_str(&t.unescape().map_err(|e| Error::xliff(e.to_string()))?);
                }
            }
            Event::CData(c) => {
                if let Some((_, text)) = segment.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::xliff("unbalanced end tag"))?;
                let name = e.local_name();
                if let Some((slot, _)) = &segment {
                    if slot.tag() == name.as_ref() {
                        if let Some((slot, text)) = segment.take() {
                            set_segment(unit.as_mut(), slot, text);
                        }
                    }
                    continue;
                }
                match name.as_ref() {
                    b"trans-unit" => {
                        if let (Some(done), Some(f)) = (unit.take(), file.as_mut()) {
                            f.body.units.push(done);
                        }
                    }
                    b"file" => {
                        if let (Some(done), Some(doc)) = (file.take(), document.as_mut()) {
                            doc.files.push(done);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::xliff("unexpected end of document"));
    }
    document.ok_or_else(|| Error::xliff("document has no <xliff> root"))
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Source,
    Target,
}

impl Slot {
    fn tag(self) -> &'static [u8] {
        match self {
            Slot::Source => b"source",
            Slot::Target => b"target",
        }
    }
}

fn set_segment(unit: Option<&mut TransUnit>, slot: Slot, text: String) {
    if let Some(unit) = unit {
        match slot {
            Slot::Source => unit.source = Some(text),
            Slot::Target => unit.target = Some(text),
        }
    }
}

fn attributes(element: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(|e| Error::xliff(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::xliff(e.to_string()))?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}

fn read_file(element: &BytesStart<'_>) -> Result<XliffFile> {
    let mut original = String::new();
    let mut source_language = None;
    let mut target_language = None;
    let mut datatype = None;
    for (key, value) in attributes(element)? {
        match key.as_str() {
            "original" => original = value,
            "source-language" => source_language = Some(value),
            "target-language" => target_language = Some(value),
            "datatype" => datatype = Some(value),
            _ => {}
        }
    }

    let source_language =
        source_language.ok_or_else(|| Error::xliff("file is missing source-language"))?;
    let mut file = XliffFile::new(original, source_language);
    file.target_language = target_language;
    if let Some(datatype) = datatype {
        file.datatype = datatype;
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serialized_payload_carries_declaration_and_namespace() {
        let mut file = XliffFile::new("news-42", "en").with_unit(TransUnit::new("1", "Hello"));
        file.target_language = Some("fr".to_string());
        file.move_source_to_target();

        let bytes = to_bytes(&XliffDocument::single(file)).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();

        assert!(text.starts_with(DECLARATION));
        assert!(text.contains(&format!(r#"xmlns="{}""#, XMLNS)));
        assert!(text.contains(r#"source-language="en""#));
        assert!(text.contains(r#"target-language="fr""#));
        assert!(text.contains("<target>Hello</target>"));
        assert!(!text.contains("<source>"));
    }

    #[test]
    fn text_is_escaped() {
        let file = XliffFile::new("p", "en").with_unit(TransUnit::new("1", "a < b & c"));
        let bytes = to_bytes(&XliffDocument::single(file.clone())).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.contains("a &lt; b &amp; c"));

        let parsed = from_bytes(&bytes).unwrap();
        assert_eq!(parsed.files[0].units()[0].source.as_deref(), Some("a < b & c"));
    }

    #[test]
    fn reads_vendor_document_with_header() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file original="news-42" source-language="en" target-language="fr" datatype="plaintext">
    <header><note>from vendor</note></header>
    <body>
      <trans-unit id="title">
        <source>Hello</source>
        <target>Bonjour</target>
      </trans-unit>
      <trans-unit id="body">
        <target>Le monde</target>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

        let doc = from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(doc.version, "1.2");
        assert_eq!(doc.files.len(), 1);

        let file = doc.into_first_file().unwrap();
        assert_eq!(file.original, "news-42");
        assert_eq!(file.target_language.as_deref(), Some("fr"));
        assert_eq!(
            file.units().to_vec(),
            vec![
                TransUnit {
                    id: "title".to_string(),
                    source: Some("Hello".to_string()),
                    target: Some("Bonjour".to_string()),
                },
                TransUnit {
                    id: "body".to_string(),
                    source: None,
                    target: Some("Le monde".to_string()),
                },
            ]
        );
    }

    #[test]
    fn document_without_files_parses_empty() {
        let doc = from_bytes(br#"<xliff version="1.2"></xliff>"#).unwrap();
        assert!(doc.files.is_empty());
        assert_eq!(doc.xmlns, XMLNS);
    }

    #[test]
    fn segment_whitespace_survives_round_trip() {
        let mut file = XliffFile::new("p", "en").with_unit(TransUnit::new("1", "  Hello "));
        file.move_source_to_target();

        let bytes = to_bytes(&XliffDocument::single(file)).unwrap();
        let parsed = from_bytes(&bytes).unwrap();

        assert_eq!(parsed.files[0].units()[0].target.as_deref(), Some("  Hello "));
        assert_eq!(parsed.files[0].units()[0].source, None);
    }

    #[test]
    fn whitespace_only_and_empty_segments_are_kept() {
        let xml = br#"<xliff version="1.2"><file original="p" source-language="en"><body>
  <trans-unit id="1"><source>Hi</source><target>   </target></trans-unit>
  <trans-unit id="2"><target/></trans-unit>
</body></file></xliff>"#;

        let units = from_bytes(xml).unwrap().into_first_file().unwrap().body.units;
        assert_eq!(units[0].target.as_deref(), Some("   "));
        assert_eq!(units[1].target.as_deref(), Some(""));
        assert_eq!(units[1].source, None);
    }

    #[test]
    fn inline_markup_and_cdata_keep_their_text() {
        let xml = br#"<xliff version="1.2"><file original="p" source-language="en"><body>
  <trans-unit id="1"><target>Bon <g id="b">jour</g> <![CDATA[<monde>]]></target></trans-unit>
</body></file></xliff>"#;

        let units = from_bytes(xml).unwrap().into_first_file().unwrap().body.units;
        assert_eq!(units[0].target.as_deref(), Some("Bon jour <monde>"));
    }

    #[test]
    fn file_without_source_language_is_rejected() {
        let err = from_bytes(br#"<xliff version="1.2"><file original="p"/></xliff>"#).unwrap_err();
        assert!(matches!(err, Error::Xliff(_)));
    }

    #[test]
    fn garbage_is_an_xliff_error() {
        let err = from_bytes(b"<xliff><file>").unwrap_err();
        assert!(matches!(err, Error::Xliff(_)));
    }
}
