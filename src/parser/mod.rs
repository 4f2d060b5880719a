//! XML parser.
//!
//! A hand-rolled, non-validating recursive descent parser that builds a
//! [`Document`] tree. It handles elements, attributes in either quote
//! style, character data with the five predefined entities and
//! decimal/hex character references, CDATA sections, comments, processing
//! instructions, and XML declaration capture.
//!
//! Not handled: DTDs (a `<!DOCTYPE` is rejected), external entities, and
//! error recovery. Structural validation beyond well-formedness is out of
//! scope for this crate.
//!
//! See <https://www.w3.org/TR/xml/> for the grammar.

use crate::error::{ParseError, SourceLocation};
use crate::tree::{Attribute, Document, NodeId, NodeKind};
use crate::util::qname::split_qname;

/// Parse options controlling whitespace handling.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use xylo::parser::ParseOptions;
///
/// let opts = ParseOptions::default().preserve_whitespace(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// If true, keep whitespace-only text nodes between elements.
    /// The default strips them.
    pub preserve_whitespace: bool,
}

impl ParseOptions {
    /// Enables or disables preservation of whitespace-only text nodes.
    #[must_use]
    pub fn preserve_whitespace(mut self, yes: bool) -> Self {
        self.preserve_whitespace = yes;
        self
    }
}

/// Parses an XML string into a `Document`.
pub(crate) fn parse_str(input: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    let mut parser = Parser {
        text: input,
        pos: 0,
        doc: Document::new(),
        preserve_whitespace: options.preserve_whitespace,
    };
    parser.parse()?;
    Ok(parser.doc)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    doc: Document,
    preserve_whitespace: bool,
}

impl<'a> Parser<'a> {
    fn parse(&mut self) -> Result<(), ParseError> {
        if self.looking_at("<?xml")
            && matches!(
                self.text.as_bytes().get(self.pos + 5),
                Some(b' ' | b'\t' | b'\r' | b'\n')
            )
        {
            self.parse_xml_declaration()?;
        }

        self.parse_misc()?;

        if self.looking_at("<!DOCTYPE") || self.looking_at("<!doctype") {
            return Err(self.error("DOCTYPE declarations are not supported"));
        }

        if self.peek() == Some(b'<') {
            let root = self.doc.root();
            self.parse_element(root)?;
        } else {
            return Err(self.error("missing root element"));
        }

        self.parse_misc()?;

        if self.pos < self.text.len() {
            return Err(self.error("content after document end"));
        }
        Ok(())
    }

    /// Parses comments, PIs, and whitespace at document level.
    fn parse_misc(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.looking_at("<!--") {
                let root = self.doc.root();
                self.parse_comment(root)?;
            } else if self.looking_at("<?") {
                let root = self.doc.root();
                self.parse_pi(root)?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_xml_declaration(&mut self) -> Result<(), ParseError> {
        self.pos += "<?xml".len();
        loop {
            self.skip_whitespace();
            if self.looking_at("?>") {
                self.pos += 2;
                return Ok(());
            }
            if self.pos >= self.text.len() {
                return Err(self.error("unterminated XML declaration"));
            }
            let name = self.parse_name()?;
            self.skip_whitespace();
            self.expect(b'=')?;
            self.skip_whitespace();
            let value = self.parse_quoted()?;
            match name {
                "version" => self.doc.version = Some(value),
                "encoding" => self.doc.encoding = Some(value),
                "standalone" => self.doc.standalone = Some(value == "yes"),
                other => {
                    return Err(self.error(format!(
                        "unexpected attribute '{other}' in XML declaration"
                    )))
                }
            }
        }
    }

    fn parse_element(&mut self, parent: NodeId) -> Result<(), ParseError> {
        self.expect(b'<')?;
        let qname = self.parse_name()?;
        let mut attributes = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            if self.looking_at("/>") {
                self.pos += 2;
                self.attach_element(parent, qname, attributes);
                return Ok(());
            }
            if self.peek() == Some(b'>') {
                self.pos += 1;
                break;
            }
            if self.pos >= self.text.len() {
                return Err(self.error(format!("unterminated start tag for '{qname}'")));
            }
            if !had_space {
                return Err(self.error("expected whitespace before attribute"));
            }

            let attr_qname = self.parse_name()?;
            let (attr_prefix, attr_local) = split_qname(attr_qname);
            self.skip_whitespace();
            self.expect(b'=')?;
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attributes
                .iter()
                .any(|a: &Attribute| a.prefix.as_deref() == attr_prefix && a.name == attr_local)
            {
                return Err(self.error(format!("duplicate attribute '{attr_qname}'")));
            }
            attributes.push(Attribute {
                prefix: attr_prefix.map(str::to_string),
                name: attr_local.to_string(),
                value,
            });
        }

        // Start tag closed with content to follow.
        let element = self.attach_element(parent, qname, attributes);
        self.parse_content(element, qname)
    }

    fn attach_element(
        &mut self,
        parent: NodeId,
        qname: &str,
        attributes: Vec<Attribute>,
    ) -> NodeId {
        let (prefix, local) = split_qname(qname);
        let element = self.doc.create_node(NodeKind::Element {
            name: local.to_string(),
            prefix: prefix.map(str::to_string),
            attributes,
        });
        self.doc.append_child(parent, element);
        element
    }

    /// Parses element content up to and including the matching end tag.
    fn parse_content(&mut self, element: NodeId, qname: &str) -> Result<(), ParseError> {
        loop {
            if self.pos >= self.text.len() {
                return Err(self.error(format!("unclosed element '{qname}'")));
            }
            if self.looking_at("</") {
                self.pos += 2;
                let end_name = self.parse_name()?;
                if end_name != qname {
                    return Err(self.error(format!(
                        "end tag '{end_name}' does not match start tag '{qname}'"
                    )));
                }
                self.skip_whitespace();
                self.expect(b'>')?;
                return Ok(());
            }
            if self.looking_at("<![CDATA[") {
                self.parse_cdata(element)?;
            } else if self.looking_at("<!--") {
                self.parse_comment(element)?;
            } else if self.looking_at("<?") {
                self.parse_pi(element)?;
            } else if self.peek() == Some(b'<') {
                self.parse_element(element)?;
            } else {
                self.parse_text(element)?;
            }
        }
    }

    fn parse_text(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let start = self.pos;
        let mut content = String::new();
        while let Some(b) = self.peek() {
            if b == b'<' {
                break;
            }
            if b == b'&' {
                content.push(self.parse_reference()?);
            } else {
                let ch = self.current_char();
                // The literal sequence "]]>" is reserved for CDATA ends;
                // the check is against raw input, so references that decode
                // to it are still fine.
                if ch == '>' && self.text[start..self.pos].ends_with("]]") {
                    return Err(self.error("']]>' is not allowed in character data"));
                }
                content.push(ch);
                self.pos += ch.len_utf8();
            }
        }
        let keep = self.preserve_whitespace || !content.chars().all(char::is_whitespace);
        if keep && !content.is_empty() {
            let text = self.doc.create_text(content);
            self.doc.append_child(parent, text);
        }
        Ok(())
    }

    fn parse_cdata(&mut self, parent: NodeId) -> Result<(), ParseError> {
        self.pos += "<![CDATA[".len();
        let rest = &self.text[self.pos..];
        let Some(end) = rest.find("]]>") else {
            return Err(self.error("unterminated CDATA section"));
        };
        let content = rest[..end].to_string();
        self.pos += end + 3;
        let node = self.doc.create_cdata(content);
        self.doc.append_child(parent, node);
        Ok(())
    }

    fn parse_comment(&mut self, parent: NodeId) -> Result<(), ParseError> {
        self.pos += "<!--".len();
        let rest = &self.text[self.pos..];
        let Some(end) = rest.find("--") else {
            return Err(self.error("unterminated comment"));
        };
        if !rest[end..].starts_with("-->") {
            return Err(self.error("'--' is not allowed inside a comment"));
        }
        let content = rest[..end].to_string();
        self.pos += end + 3;
        let node = self.doc.create_comment(content);
        self.doc.append_child(parent, node);
        Ok(())
    }

    fn parse_pi(&mut self, parent: NodeId) -> Result<(), ParseError> {
        self.pos += "<?".len();
        let target = self.parse_name()?;
        if target.eq_ignore_ascii_case("xml") {
            return Err(self.error("processing instruction target 'xml' is reserved"));
        }
        let had_space = self.skip_whitespace();
        let rest = &self.text[self.pos..];
        let Some(end) = rest.find("?>") else {
            return Err(self.error("unterminated processing instruction"));
        };
        if end > 0 && !had_space {
            return Err(self.error("expected whitespace after PI target"));
        }
        let data = if end == 0 {
            None
        } else {
            Some(rest[..end].to_string())
        };
        self.pos += end + 2;
        let node = self.doc.create_pi(target, data);
        self.doc.append_child(parent, node);
        Ok(())
    }

    fn parse_attribute_value(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.error("expected quoted attribute value")),
        };
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated attribute value")),
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some(b'<') => return Err(self.error("'<' is not allowed in attribute values")),
                Some(b'&') => value.push(self.parse_reference()?),
                // Attribute-value normalization (XML 1.0 §3.3.3): literal
                // whitespace becomes a space; \r\n counts as one.
                Some(b @ (b'\t' | b'\n' | b'\r')) => {
                    value.push(' ');
                    self.pos += 1;
                    if b == b'\r' && self.peek() == Some(b'\n') {
                        self.pos += 1;
                    }
                }
                Some(_) => {
                    let ch = self.current_char();
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// Parses an entity or character reference, returning the character.
    fn parse_reference(&mut self) -> Result<char, ParseError> {
        let rest = &self.text[self.pos..];
        let Some(end) = rest.find(';') else {
            return Err(self.error("unterminated entity reference"));
        };
        let body = &rest[1..end];
        let ch = if let Some(num) = body.strip_prefix('#') {
            let code = if let Some(hex) = num.strip_prefix('x') {
                u32::from_str_radix(hex, 16).ok()
            } else {
                num.parse::<u32>().ok()
            };
            match code.and_then(char::from_u32) {
                Some(c) => c,
                None => return Err(self.error(format!("invalid character reference '&{body};'"))),
            }
        } else {
            match body {
                "amp" => '&',
                "lt" => '<',
                "gt" => '>',
                "apos" => '\'',
                "quot" => '"',
                _ => return Err(self.error(format!("unknown entity '&{body};'"))),
            }
        };
        self.pos += end + 1;
        Ok(ch)
    }

    // --- low-level input handling ---

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn current_char(&self) -> char {
        self.text[self.pos..].chars().next().unwrap_or('\0')
    }

    fn looking_at(&self, pattern: &str) -> bool {
        self.text[self.pos..].starts_with(pattern)
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", byte as char)))
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_name(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        let mut chars = self.text[self.pos..].chars();
        match chars.next() {
            Some(c) if is_name_start(c) => self.pos += c.len_utf8(),
            _ => return Err(self.error("expected a name")),
        }
        for c in chars {
            if is_name_char(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        Ok(&self.text[start..self.pos])
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q as char,
            _ => return Err(self.error("expected quoted value")),
        };
        self.pos += 1;
        let rest = &self.text[self.pos..];
        let Some(end) = rest.find(quote) else {
            return Err(self.error("unterminated quoted value"));
        };
        let value = rest[..end].to_string();
        self.pos += end + 1;
        Ok(value)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let before = &self.text[..self.pos];
        let line = u32::try_from(before.matches('\n').count()).unwrap_or(u32::MAX - 1) + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column =
            u32::try_from(before[line_start..].chars().count()).unwrap_or(u32::MAX - 1) + 1;
        ParseError {
            message: message.into(),
            location: SourceLocation {
                line,
                column,
                byte_offset: self.pos,
            },
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}
