//! Low-level event helpers shared by the entry decoder

use std::io::BufRead;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::UniProtError;
use crate::uniprot::models::{Evidence, EvidencedString};

/// Get an attribute value from a start tag
pub(super) fn get_attribute(
    e: &BytesStart,
    name: &str,
) -> Result<Option<String>, UniProtError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| UniProtError::Xml(quick_xml::Error::from(e)))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = std::str::from_utf8(&attr.value)?.to_string();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Get an attribute and parse it as `T`, reporting the raw text on failure
pub(super) fn parse_attribute<T: FromStr>(
    e: &BytesStart,
    name: &'static str,
) -> Result<Option<T>, UniProtError> {
    match get_attribute(e, name)? {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(UniProtError::InvalidValue {
                what: name,
                value: raw,
            }),
        },
        None => Ok(None),
    }
}

/// Parse an `<evidence type=".." key=".."/>` tag
pub(super) fn parse_evidence(e: &BytesStart) -> Result<Evidence, UniProtError> {
    Ok(Evidence {
        evidence_type: get_attribute(e, "type")?.unwrap_or_default(),
        key: get_attribute(e, "key")?,
    })
}

/// Attach the reader's byte position to a token-level failure
pub(super) fn xml_err<R>(reader: &Reader<R>, source: quick_xml::Error) -> UniProtError {
    UniProtError::MalformedXml {
        position: reader.buffer_position(),
        source,
    }
}

/// Truncation inside an element whose end tag never arrived
pub(super) fn unexpected_eof(tag: &[u8]) -> UniProtError {
    UniProtError::InvalidStructure(format!(
        "unexpected EOF inside <{}>",
        String::from_utf8_lossy(tag)
    ))
}

/// Consume and discard everything up to the end tag matching `start`
pub(super) fn skip_element<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<(), UniProtError> {
    let end = start.to_end().into_owned();
    let mut buf = Vec::new();
    match reader.read_to_end_into(end.name(), &mut buf) {
        Ok(_) => Ok(()),
        Err(e) => Err(xml_err(reader, e)),
    }
}

/// Read the text content of the current element up to `</tag>`, collecting
/// any `<evidence>` children along the way. Unknown child elements are
/// skipped.
pub(super) fn read_evidenced_text<R: BufRead>(
    reader: &mut Reader<R>,
    tag: &[u8],
) -> Result<EvidencedString, UniProtError> {
    let mut out = EvidencedString::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => out.value.push_str(&t.unescape()?),
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    out.evidence.push(parse_evidence(e)?);
                }
            }
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    out.evidence.push(parse_evidence(e)?);
                }
                skip_element(reader, e)?;
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == tag {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(tag)),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

/// Read plain text content of the current element up to `</tag>`
pub(super) fn read_text_content<R: BufRead>(
    reader: &mut Reader<R>,
    tag: &[u8],
) -> Result<String, UniProtError> {
    Ok(read_evidenced_text(reader, tag)?.value)
}
