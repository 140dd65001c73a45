use std::borrow::Cow;

use quick_xml::errors::{Error as XmlError, SyntaxError};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::MarkupEvent;

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Longest tail `&...` held back as a possibly cut character reference.
const MAX_REFERENCE_LEN: usize = 32;

/// Incremental HTML tokenizer over [`quick_xml::Reader`].
///
/// Input may be split anywhere. Markup cut off at the end of a chunk, and a
/// trailing `&...` that may be an unfinished character reference, stay
/// buffered until the next [`feed`](Self::feed). Every other text run is
/// emitted as soon as it is read, so text interrupted by a comment or by a
/// chunk boundary arrives as separate events.
#[derive(Debug, Clone, Default)]
pub struct MarkupLexer {
    carry: String,
    raw_text_element: Option<String>,
}

/// Why one reader pass over the input stopped.
enum Stop {
    /// Everything was consumed.
    Consumed,
    /// Input from this offset needs more data.
    Incomplete(usize),
    /// Markup at this offset is not something the reader accepts.
    Malformed(usize),
    /// A raw-text element opened; its content starts at this offset.
    RawText { name: String, content_at: usize },
}

impl MarkupLexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes as much of `buffered input + chunk` as possible.
    pub fn feed(&mut self, chunk: &str) -> Vec<MarkupEvent> {
        self.carry.push_str(chunk);
        let input = std::mem::take(&mut self.carry);
        let mut events = Vec::new();
        let consumed = self.tokenize(&input, &mut events);
        self.carry = input[consumed..].to_owned();
        events
    }

    /// Emits whatever text is still held back. Unterminated markup is discarded.
    pub fn finish(&mut self) -> Vec<MarkupEvent> {
        let rest = std::mem::take(&mut self.carry);
        let in_raw_text = self.raw_text_element.take().is_some();
        if rest.is_empty() || (!in_raw_text && rest.starts_with('<')) {
            return Vec::new();
        }
        if in_raw_text {
            vec![MarkupEvent::Text(rest)]
        } else {
            vec![MarkupEvent::Text(decode_text(&rest))]
        }
    }

    fn tokenize(&mut self, input: &str, events: &mut Vec<MarkupEvent>) -> usize {
        let mut pos = 0;
        loop {
            if let Some(element) = self.raw_text_element.as_deref() {
                let close = format!("</{element}");
                let Some(offset) = input[pos..].to_ascii_lowercase().find(&close) else {
                    return pos;
                };
                if offset > 0 {
                    events.push(MarkupEvent::Text(input[pos..pos + offset].to_owned()));
                }
                pos += offset;
                self.raw_text_element = None;
            }

            match read_markup(&input[pos..], events) {
                Stop::Consumed => return input.len(),
                Stop::Incomplete(offset) => return pos + offset,
                Stop::Malformed(offset) => match input[pos + offset..].find('>') {
                    Some(gt) => pos += offset + gt + 1,
                    None => return pos + offset,
                },
                Stop::RawText { name, content_at } => {
                    pos += content_at;
                    self.raw_text_element = Some(name);
                }
            }
        }
    }
}

/// Runs one reader over `input`, pushing events until it stops.
fn read_markup(input: &str, events: &mut Vec<MarkupEvent>) -> Stop {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut last = 0;
    loop {
        let event = reader.read_event();
        let end = usize::try_from(reader.buffer_position())
            .map_or(input.len(), |position| position.min(input.len()));

        match event {
            Ok(Event::Eof) => return Stop::Consumed,
            Ok(Event::Text(_)) => {
                let raw = &input[last..end];
                if end == input.len() {
                    if let Some(amp) = cut_reference(raw) {
                        push_text(events, &raw[..amp]);
                        return Stop::Incomplete(last + amp);
                    }
                }
                push_text(events, raw);
            }
            Ok(Event::CData(data)) => {
                events.push(MarkupEvent::Text(
                    String::from_utf8_lossy(&data).into_owned(),
                ));
            }
            Ok(Event::Start(tag)) => {
                let (name, attributes) = start_tag(&tag);
                let raw_text = RAW_TEXT_ELEMENTS.contains(&name.as_str());
                events.push(MarkupEvent::StartTag {
                    name: name.clone(),
                    attributes,
                });
                if raw_text {
                    return Stop::RawText {
                        name,
                        content_at: end,
                    };
                }
            }
            Ok(Event::Empty(tag)) => {
                let (name, attributes) = start_tag(&tag);
                events.push(MarkupEvent::StartTag {
                    name: name.clone(),
                    attributes,
                });
                events.push(MarkupEvent::EndTag { name });
            }
            Ok(Event::End(tag)) => {
                events.push(MarkupEvent::EndTag {
                    name: lowercase(tag.name().as_ref()),
                });
            }
            // comments, doctypes, declarations, processing instructions
            Ok(_) => {}
            Err(XmlError::Syntax(
                SyntaxError::UnclosedTag
                | SyntaxError::UnclosedComment
                | SyntaxError::UnclosedDoctype
                | SyntaxError::UnclosedCData
                | SyntaxError::UnclosedPIOrXmlDecl,
            )) => return Stop::Incomplete(last),
            Err(err) => {
                tracing::trace!(error = %err, offset = last, "skipping unreadable markup");
                return Stop::Malformed(last);
            }
        }
        last = end;
    }
}

fn start_tag(tag: &BytesStart<'_>) -> (String, Vec<(String, String)>) {
    let name = lowercase(tag.name().as_ref());
    let attributes = tag
        .html_attributes()
        .with_checks(false)
        .filter_map(Result::ok)
        .map(|attr| {
            let value = attr
                .unescape_value_with(resolve_html5_entity)
                .map_or_else(
                    |_| String::from_utf8_lossy(&attr.value).into_owned(),
                    Cow::into_owned,
                );
            (lowercase(attr.key.as_ref()), value)
        })
        .collect();
    (name, attributes)
}

fn lowercase(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_ascii_lowercase()
}

fn push_text(events: &mut Vec<MarkupEvent>, raw: &str) {
    if !raw.is_empty() {
        events.push(MarkupEvent::Text(decode_text(raw)));
    }
}

/// Resolves character references; text with a reference that does not
/// resolve is kept verbatim.
fn decode_text(raw: &str) -> String {
    unescape_with(raw, resolve_html5_entity).map_or_else(|_| raw.to_owned(), Cow::into_owned)
}

/// Offset of a trailing `&...` that a later chunk could still complete.
fn cut_reference(raw: &str) -> Option<usize> {
    let amp = raw.rfind('&')?;
    let tail = &raw[amp + 1..];
    let open = tail.len() <= MAX_REFERENCE_LEN
        && !tail.contains(|c: char| c == ';' || c.is_whitespace());
    open.then_some(amp)
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
