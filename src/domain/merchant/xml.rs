//! XML body codec.
//!
//! Requests are a flat `<xml>` document: one child element per parameter,
//! text values wrapped in CDATA and numbers written bare. Responses are
//! parsed into a [`ResponseMap`] with the root element dropped; nested
//! elements become maps and repeated siblings become lists.

use std::collections::BTreeMap;
use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::errors::MerchantPayError;
use super::params::{ParamValue, RequestParams};
use super::response::{ResponseMap, ResponseValue};

const ROOT: &str = "xml";

/// Serialize parameters into the provider's request document.
pub fn build(params: &RequestParams) -> Result<String, MerchantPayError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;

    for (key, value) in params {
        if !is_valid_element_name(key) {
            return Err(MerchantPayError::serialization(format!(
                "invalid element name `{}`",
                key
            )));
        }

        writer.write_event(Event::Start(BytesStart::new(key.as_str())))?;
        match value {
            ParamValue::Number(n) => {
                writer.write_event(Event::Text(BytesText::new(&n.to_string())))?;
            }
            ParamValue::Text(text) => write_cdata(&mut writer, text)?,
            ParamValue::Null => {}
        }
        writer.write_event(Event::End(BytesEnd::new(key.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| MerchantPayError::serialization(e.to_string()))
}

/// Write `text` as CDATA, splitting sections around any `]]>` it contains.
fn write_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, text: &str) -> Result<(), MerchantPayError> {
    let mut rest = text;
    while let Some(idx) = rest.find("]]>") {
        writer.write_event(Event::CData(BytesCData::new(&rest[..idx + 2])))?;
        rest = &rest[idx + 2..];
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))?;
    Ok(())
}

/// An element being assembled while parsing.
struct Frame {
    name: String,
    text: String,
    children: ResponseMap,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: BTreeMap::new(),
        }
    }

    /// Leaf text is kept verbatim; whitespace between child elements is dropped.
    fn into_value(self) -> ResponseValue {
        if self.children.is_empty() {
            ResponseValue::Text(self.text)
        } else {
            ResponseValue::Map(self.children)
        }
    }
}

/// Parse a provider document into a map of the root element's children.
pub fn parse(raw: &str) -> Result<ResponseMap, MerchantPayError> {
    let mut reader = Reader::from_str(raw);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<ResponseMap> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(MerchantPayError::serialization(
                        "content after document root",
                    ));
                }
                stack.push(Frame::new(element_name(e.name().as_ref())?));
            }
            Event::Empty(e) => {
                let name = element_name(e.name().as_ref())?;
                match stack.last_mut() {
                    Some(parent) => {
                        insert_child(&mut parent.children, name, ResponseValue::Text(String::new()))
                    }
                    None if root.is_none() => root = Some(BTreeMap::new()),
                    None => {
                        return Err(MerchantPayError::serialization(
                            "content after document root",
                        ))
                    }
                }
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| MerchantPayError::serialization(err.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|err| MerchantPayError::serialization(err.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| MerchantPayError::serialization("unbalanced end tag"))?;
                match stack.last_mut() {
                    Some(parent) => {
                        let name = frame.name.clone();
                        insert_child(&mut parent.children, name, frame.into_value());
                    }
                    None => root = Some(frame.children),
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(MerchantPayError::serialization("unexpected end of document"));
    }

    root.ok_or_else(|| MerchantPayError::serialization("document has no root element"))
}

fn push_text(stack: &mut [Frame], text: &str) -> Result<(), MerchantPayError> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MerchantPayError::serialization(
            "text outside of document root",
        )),
    }
}

fn insert_child(children: &mut ResponseMap, name: String, value: ResponseValue) {
    match children.remove(&name) {
        None => {
            children.insert(name, value);
        }
        Some(ResponseValue::List(mut items)) => {
            items.push(value);
            children.insert(name, ResponseValue::List(items));
        }
        Some(existing) => {
            children.insert(name, ResponseValue::List(vec![existing, value]));
        }
    }
}

fn element_name(raw: &[u8]) -> Result<String, MerchantPayError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| MerchantPayError::serialization(e.to_string()))
}

fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
