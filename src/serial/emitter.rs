//! Incremental XML emission.
//!
//! The emitter is the single write layer behind both tree serialization
//! ([`super::xml`]) and streaming serialization ([`super::streaming`]): it
//! accepts start-tag/attribute/content/end-tag events and produces text,
//! tracking the open-tag state needed for self-closing forms and the
//! mixed-content state needed for formatting.
//!
//! Formatting is single-pass: a break plus indentation is inserted before
//! a child start tag, comment, or PI while the enclosing element has seen
//! no character data. The first text or CDATA written inside an element
//! latches it as mixed content, which suppresses injected whitespace for
//! the rest of that element, including its end tag. Whitespace-preserved
//! input like `<e> <e2 /> </e>` therefore passes through untouched, while
//! element-only content is pretty-printed.

use super::SaveOptions;

/// Line break used for injected formatting.
const LINE_BREAK: &str = "\r\n";
/// Indentation per depth level.
const INDENT: &str = "  ";

/// State for one open element.
struct Frame {
    /// Qualified name, kept for the end tag.
    qname: String,
    /// Set once any text or CDATA is written inside this element.
    mixed: bool,
    /// Set once any content (of any kind) is written inside this element.
    had_content: bool,
}

/// Event-driven XML writer over a growable string buffer.
pub(crate) struct Emitter {
    out: String,
    format: bool,
    frames: Vec<Frame>,
    /// A start tag is open and still accepting attributes.
    tag_open: bool,
    /// Content has been written at document level (outside any element).
    had_top_level: bool,
}

impl Emitter {
    pub(crate) fn new(options: SaveOptions) -> Self {
        Self {
            out: String::new(),
            format: !options.disable_formatting,
            frames: Vec::new(),
            tag_open: false,
            had_top_level: false,
        }
    }

    /// Consumes the emitter and returns the produced text.
    ///
    /// # Panics
    ///
    /// Panics if elements remain open (caller bug).
    pub(crate) fn finish(self) -> String {
        assert!(self.frames.is_empty(), "unclosed element in emitter");
        self.out
    }

    /// Terminates a pending start tag with `>` before content follows.
    fn close_pending_tag(&mut self) {
        if self.tag_open {
            self.out.push('>');
            self.tag_open = false;
        }
    }

    /// Inserts the formatting break before a non-text child, if due.
    fn break_before_child(&mut self) {
        if !self.format {
            return;
        }
        match self.frames.last() {
            Some(frame) => {
                if !frame.mixed {
                    self.out.push_str(LINE_BREAK);
                    for _ in 0..self.frames.len() {
                        self.out.push_str(INDENT);
                    }
                }
            }
            None => {
                if self.had_top_level {
                    self.out.push_str(LINE_BREAK);
                }
            }
        }
    }

    /// Marks content written into the current container.
    fn mark_content(&mut self, is_character_data: bool) {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.had_content = true;
                if is_character_data {
                    frame.mixed = true;
                }
            }
            None => self.had_top_level = true,
        }
    }

    pub(crate) fn start_element(&mut self, prefix: Option<&str>, name: &str) {
        self.close_pending_tag();
        self.break_before_child();
        self.mark_content(false);

        let mut qname = String::new();
        if let Some(p) = prefix {
            qname.push_str(p);
            qname.push(':');
        }
        qname.push_str(name);

        self.out.push('<');
        self.out.push_str(&qname);
        self.tag_open = true;
        self.frames.push(Frame {
            qname,
            mixed: false,
            had_content: false,
        });
    }

    /// Writes an attribute into the open start tag.
    ///
    /// # Panics
    ///
    /// Panics if no start tag is open (caller bug).
    pub(crate) fn attribute(&mut self, prefix: Option<&str>, name: &str, value: &str) {
        assert!(self.tag_open, "attribute written outside a start tag");
        self.out.push(' ');
        if let Some(p) = prefix {
            self.out.push_str(p);
            self.out.push(':');
        }
        self.out.push_str(name);
        self.out.push_str("=\"");
        write_escaped_attr(&mut self.out, value);
        self.out.push('"');
    }

    /// Closes the innermost element, using the self-closing form when no
    /// content was written since its start tag.
    ///
    /// # Panics
    ///
    /// Panics if no element is open (caller bug).
    #[allow(clippy::expect_used)]
    pub(crate) fn end_element(&mut self) {
        let frame = self.frames.pop().expect("end_element without start_element");
        if self.tag_open {
            self.out.push_str(" />");
            self.tag_open = false;
            return;
        }
        if self.format && frame.had_content && !frame.mixed {
            self.out.push_str(LINE_BREAK);
            for _ in 0..self.frames.len() {
                self.out.push_str(INDENT);
            }
        }
        self.out.push_str("</");
        self.out.push_str(&frame.qname);
        self.out.push('>');
    }

    pub(crate) fn text(&mut self, content: &str) {
        self.close_pending_tag();
        self.mark_content(true);
        write_escaped_text(&mut self.out, content);
    }

    pub(crate) fn cdata(&mut self, content: &str) {
        self.close_pending_tag();
        self.mark_content(true);
        self.out.push_str("<![CDATA[");
        self.out.push_str(content);
        self.out.push_str("]]>");
    }

    pub(crate) fn comment(&mut self, content: &str) {
        self.close_pending_tag();
        self.break_before_child();
        self.mark_content(false);
        self.out.push_str("<!--");
        self.out.push_str(content);
        self.out.push_str("-->");
    }

    pub(crate) fn pi(&mut self, target: &str, data: Option<&str>) {
        self.close_pending_tag();
        self.break_before_child();
        self.mark_content(false);
        self.out.push_str("<?");
        self.out.push_str(target);
        if let Some(d) = data {
            self.out.push(' ');
            self.out.push_str(d);
        }
        self.out.push_str("?>");
    }
}

/// Escapes text content for XML output (`&`, `<`, `>`; `\r` as a character
/// reference so it survives round-tripping).
fn write_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}

/// Escapes attribute values for XML output. Quotes are escaped because
/// attribute values are always double-quoted; tab/newline/return become
/// character references so they survive attribute-value normalization.
fn write_escaped_attr(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}
