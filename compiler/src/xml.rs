use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::WlgenError;
use crate::utils::quote;

/// An element of the markup tree with everything the schema parser needs:
/// its tag, attributes, element children, the concatenation of its direct
/// text, and where its start tag sits in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name:       String,
    pub line:       usize,
    pub column:     usize,
    pub attributes: Vec<(String, String)>,
    pub children:   Vec<Element>,
    pub text:       String,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct text of the element, `None` when there is none at all.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

/// Byte offsets of line starts, to turn reader positions into line/column.
/// Columns count characters, not bytes.
struct LineIndex<'a> {
    text:   &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { text, starts }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.starts[line];
        let column = self
            .text
            .get(start..offset)
            .map_or(offset - start, |prefix| prefix.chars().count());
        (line + 1, column + 1)
    }

    fn error(&self, msg: &str, offset: usize) -> WlgenError {
        let (line, column) = self.position(offset);
        WlgenError::Xml {
            msg: msg.to_string(),
            line,
            column,
        }
    }
}

struct OpenElement {
    element: Element,
    text:    Vec<u8>,
}

impl OpenElement {
    fn close(self) -> Result<Element, WlgenError> {
        let mut element = self.element;
        element.text = String::from_utf8(self.text)?;
        Ok(element)
    }
}

/// Reads a whole document into its single root element.
///
/// Comments, processing instructions, the XML declaration and doctypes are
/// dropped. Character and predefined entity references in text are
/// resolved.
pub fn read_document(text: &str) -> Result<Element, WlgenError> {
    let index = LineIndex::new(text);
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut roots: Vec<Element> = Vec::new();

    loop {
        let offset = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(index.error(&e.to_string(), reader.buffer_position() as usize));
            }
        };
        match event {
            Event::Start(start) => {
                stack.push(OpenElement {
                    element: open_element(&start, offset, &index)?,
                    text:    Vec::new(),
                });
            }
            Event::Empty(start) => {
                let element = open_element(&start, offset, &index)?;
                attach(&mut stack, &mut roots, element);
            }
            Event::End(_) => {
                let open = stack
                    .pop()
                    .ok_or_else(|| index.error("Unexpected closing tag", offset))?;
                let element = open.close()?;
                attach(&mut stack, &mut roots, element);
            }
            Event::Text(t) => {
                let bytes: &[u8] = t.as_ref();
                match stack.last_mut() {
                    Some(open) => open.text.extend_from_slice(bytes),
                    None if bytes.iter().all(u8::is_ascii_whitespace) => {}
                    None => return Err(index.error("Text outside of the root element", offset)),
                }
            }
            Event::CData(c) => {
                if let Some(open) = stack.last_mut() {
                    open.text.extend_from_slice(&c.into_inner());
                }
            }
            Event::GeneralRef(r) => {
                let bytes: &[u8] = r.as_ref();
                let name = String::from_utf8(bytes.to_vec())?;
                let resolved = resolve_reference(&name).ok_or_else(|| {
                    index.error(&format!("Unknown entity reference {}", quote(&name)), offset)
                })?;
                if let Some(open) = stack.last_mut() {
                    let mut buf = [0u8; 4];
                    open.text.extend_from_slice(resolved.encode_utf8(&mut buf).as_bytes());
                }
            }
            Event::Eof => break,
            _ => continue,
        }
    }

    if let Some(open) = stack.last() {
        return Err(WlgenError::Xml {
            msg:    format!("Element {} is never closed", quote(&open.element.name)),
            line:   open.element.line,
            column: open.element.column,
        });
    }

    let mut roots = roots.into_iter();
    match (roots.next(), roots.next()) {
        (Some(root), None) => Ok(root),
        (None, _) => Err(index.error("Document has no root element", 0)),
        (Some(_), Some(second)) => Err(WlgenError::Xml {
            msg:    format!("Unexpected second root element {}", quote(&second.name)),
            line:   second.line,
            column: second.column,
        }),
    }
}

fn open_element(start: &BytesStart, offset: usize, index: &LineIndex<'_>) -> Result<Element, WlgenError> {
    let name = String::from_utf8(start.local_name().as_ref().to_vec())?;
    let (line, column) = index.position(offset);

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| index.error(&e.to_string(), offset))?;
        let key = String::from_utf8(attr.key.local_name().into_inner().to_vec())?;
        let value = attr
            .unescape_value()
            .map_err(|e| index.error(&e.to_string(), offset))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        line,
        column,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(stack: &mut [OpenElement], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.element.children.push(element),
        None => roots.push(element),
    }
}

fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp"  => Some('&'),
        "lt"   => Some('<'),
        "gt"   => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
