//! Rich-Text Markup Rendering Support
//!
//! Document content is HTML produced by a rich-text editor. The desktop UI
//! and the PDF exporter both need it as styled text rather than raw tags, so
//! this module flattens the markup into a list of [`Block`]s, each holding
//! styled [`Span`]s.
//!
//! Only the structure a note editor emits is understood: paragraphs, line
//! breaks, headings, list items, bold and italic. Any other tag is dropped
//! while its text is kept.
//!
//! # Security
//!
//! No sanitization happens here. Markup is trusted as served by the backend;
//! the only thing this module guarantees is that it never executes anything,
//! because it only ever produces text.

/// Kind of block-level element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Heading level 1-6
    Heading(u8),
    ListItem,
}

/// A run of text with uniform styling
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A block-level element holding one or more spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl Block {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// First `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Plain text of a parsed document, one line per block
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse markup into blocks.
///
/// Tags cut off by truncation (a `<` with no closing `>`) are dropped.
pub fn parse(markup: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        builder.push_text(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                builder.handle_tag(&after[..close]);
                rest = &after[close + 1..];
            }
            None => {
                rest = "";
                break;
            }
        }
    }
    builder.push_text(rest);
    builder.finish()
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    kind: Option<BlockKind>,
    spans: Vec<Span>,
    pending: String,
    bold: u32,
    italic: u32,
}

impl BlockBuilder {
    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        self.pending.push_str(raw);
    }

    fn handle_tag(&mut self, raw_tag: &str) {
        let tag = raw_tag.trim();
        if tag.starts_with('!') || tag.starts_with('?') {
            return;
        }
        let closing = tag.starts_with('/');
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match name.as_str() {
            "b" | "strong" => {
                self.flush_span();
                self.bold = adjust(self.bold, closing);
            }
            "i" | "em" => {
                self.flush_span();
                self.italic = adjust(self.italic, closing);
            }
            "br" => {
                let kind = self.kind;
                self.flush_block();
                self.kind = kind;
            }
            "p" | "div" | "blockquote" | "pre" | "ul" | "ol" => {
                self.flush_block();
            }
            "li" => {
                self.flush_block();
                if !closing {
                    self.kind = Some(BlockKind::ListItem);
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush_block();
                if !closing {
                    let level = name[1..].parse().unwrap_or(1);
                    self.kind = Some(BlockKind::Heading(level));
                }
            }
            _ => {}
        }
    }

    fn flush_span(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = collapse_whitespace(&decode_entities(&self.pending));
        self.pending.clear();
        let bold = self.bold > 0;
        let italic = self.italic > 0;

        match self.spans.last_mut() {
            Some(last) if last.bold == bold && last.italic == italic => last.text.push_str(&text),
            _ => self.spans.push(Span { text, bold, italic }),
        }
    }

    fn flush_block(&mut self) {
        self.flush_span();
        let kind = self.kind.take().unwrap_or(BlockKind::Paragraph);
        let mut spans = std::mem::take(&mut self.spans);

        if let Some(first) = spans.first_mut() {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = spans.last_mut() {
            last.text = last.text.trim_end().to_string();
        }
        spans.retain(|s| !s.text.is_empty());

        if !spans.is_empty() {
            self.blocks.push(Block { kind, spans });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_block();
        self.blocks
    }
}

fn adjust(depth: u32, closing: bool) -> u32 {
    if closing {
        depth.saturating_sub(1)
    } else {
        depth + 1
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.chars() {
        // nbsp survives collapsing
        if c.is_whitespace() && c != '\u{a0}' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(if c == '\u{a0}' { ' ' } else { c });
            last_space = false;
        }
    }
    out
}

/// Decode the named and numeric character references editors emit
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        let decoded = candidate
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&candidate[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
