use crate::domain::model::RawRecord;
use crate::utils::error::Result;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Streaming extractor for `<part>` elements. Child text content is
/// collected as string leaves; numeric parsing and invariant checks are the
/// normalizer's job, so a record missing a child is carried through here and
/// rejected (and skipped) downstream instead of aborting the document.
struct PartExtractor {
    records: Vec<RawRecord>,
    fields: Map<String, Value>,
    spec_fields: Map<String, Value>,
    current_tag: String,
    in_part: bool,
    in_specifications: bool,
}

impl PartExtractor {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            fields: Map::new(),
            spec_fields: Map::new(),
            current_tag: String::new(),
            in_part: false,
            in_specifications: false,
        }
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) {
        let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
        match tag.as_str() {
            "part" => {
                self.in_part = true;
                self.fields.clear();
                self.spec_fields.clear();
                self.current_tag.clear();
            }
            "specifications" if self.in_part => {
                self.in_specifications = true;
            }
            _ if self.in_part => {
                self.current_tag = tag;
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, e: &BytesText<'_>) {
        let text = e.unescape().unwrap_or_default().to_string();
        self.append_text(&text);
    }

    // CDATA content is already literal text; no unescaping.
    fn handle_cdata(&mut self, e: &BytesCData<'_>) {
        let text = String::from_utf8_lossy(e).to_string();
        self.append_text(&text);
    }

    fn append_text(&mut self, text: &str) {
        if !self.in_part || self.current_tag.is_empty() {
            return;
        }
        let target = if self.in_specifications {
            &mut self.spec_fields
        } else {
            &mut self.fields
        };
        // Text events may arrive split around entities; accumulate.
        match target
            .entry(self.current_tag.clone())
            .or_insert_with(|| Value::String(String::new()))
        {
            Value::String(existing) => existing.push_str(text),
            _ => {}
        }
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) {
        let name = e.name();
        let tag = String::from_utf8_lossy(name.as_ref());
        match tag.as_ref() {
            "part" => {
                if self.in_part {
                    let data = std::mem::take(&mut self.fields);
                    self.records.push(RawRecord { data });
                }
                self.in_part = false;
                self.current_tag.clear();
            }
            "specifications" => {
                if self.in_specifications && !self.spec_fields.is_empty() {
                    let spec = std::mem::take(&mut self.spec_fields);
                    self.fields
                        .insert("specifications".to_string(), Value::Object(spec));
                }
                self.in_specifications = false;
                self.current_tag.clear();
            }
            _ => {
                self.current_tag.clear();
            }
        }
    }
}

/// Parses an XML catalog document into raw records, one per `<part>`
/// element, in document order. Malformed XML is a parse error for the whole
/// document.
pub fn parse_xml(xml: &str) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut extractor = PartExtractor::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => extractor.handle_start(e),
            Event::Text(ref e) => extractor.handle_text(e),
            Event::CData(ref e) => extractor.handle_cdata(e),
            Event::End(ref e) => extractor.handle_end(e),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(extractor.records)
}
