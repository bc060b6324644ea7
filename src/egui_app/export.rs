//! PDF export.
//!
//! Export happens in two steps. [`layout`] turns a document into pages of
//! positioned, styled lines; it is pure and does all the wrapping and
//! pagination. [`export_pdf`] then draws that layout with the builtin PDF
//! fonts. [`save_pdf`] only touches the filesystem once the whole file is in
//! memory, and writes through a temporary file so a failure never leaves a
//! partial PDF behind.

use std::fs;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use thiserror::Error;

use crate::shared::markup::{self, BlockKind, Span};
use crate::shared::Document;

pub const NO_CONTENT: &str = "No content";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
/// Average glyph width of Helvetica as a fraction of the font size
const AVG_GLYPH_WIDTH: f32 = 0.52;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 11.0;
const META_SIZE: f32 = 9.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render pdf: {0}")]
    Render(String),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl TextStyle {
    fn of(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => TextStyle::Regular,
            (true, false) => TextStyle::Bold,
            (false, true) => TextStyle::Italic,
            (true, true) => TextStyle::BoldItalic,
        }
    }

    fn font(&self) -> BuiltinFont {
        match self {
            TextStyle::Regular => BuiltinFont::Helvetica,
            TextStyle::Bold => BuiltinFont::HelveticaBold,
            TextStyle::Italic => BuiltinFont::HelveticaOblique,
            TextStyle::BoldItalic => BuiltinFont::HelveticaBoldOblique,
        }
    }
}

/// Consecutive text on one line sharing a style
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub runs: Vec<Run>,
    pub size_pt: f32,
    pub x_mm: f32,
    /// Baseline, measured from the bottom of the page
    pub y_mm: f32,
}

impl Line {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Layout {
    /// Every line's text, in reading order
    pub fn text(&self) -> Vec<String> {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter().map(Line::text))
            .collect()
    }
}

/// Builtin fonts only cover a Latin subset; keep output to plain ASCII
fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 18.0,
        2 => 16.0,
        3 => 14.0,
        _ => 12.0,
    }
}

struct Paginator {
    pages: Vec<Page>,
    cursor_mm: f32,
}

impl Paginator {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn line_height(size_pt: f32) -> f32 {
        size_pt * PT_TO_MM * LINE_SPACING
    }

    fn place(&mut self, runs: Vec<Run>, size_pt: f32, indent_mm: f32) {
        let height = Self::line_height(size_pt);
        if self.cursor_mm - height < MARGIN_MM {
            self.pages.push(Page::default());
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.cursor_mm -= height;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(Line {
                runs,
                size_pt,
                x_mm: MARGIN_MM + indent_mm,
                y_mm: self.cursor_mm,
            });
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    /// Word-wrap `spans` to the page width and place the resulting lines
    fn place_wrapped(&mut self, spans: &[Span], size_pt: f32, indent_mm: f32, force_bold: bool) {
        let width_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent_mm;
        let max_chars = ((width_mm / (size_pt * PT_TO_MM * AVG_GLYPH_WIDTH)) as usize).max(1);

        let words = spans.iter().flat_map(|span| {
            let style = TextStyle::of(span.bold || force_bold, span.italic);
            pdf_safe(&span.text)
                .split_whitespace()
                .map(|w| (w.to_string(), style))
                .collect::<Vec<_>>()
        });

        let mut line: Vec<Run> = Vec::new();
        let mut line_chars = 0usize;
        for (word, style) in words {
            for chunk in split_long(&word, max_chars) {
                let needed = chunk.len() + usize::from(line_chars > 0);
                if line_chars > 0 && line_chars + needed > max_chars {
                    self.place(std::mem::take(&mut line), size_pt, indent_mm);
                    line_chars = 0;
                }
                let text = if line_chars > 0 { format!(" {}", chunk) } else { chunk.to_string() };
                line_chars += text.len();
                match line.last_mut() {
                    Some(run) if run.style == style => run.text.push_str(&text),
                    _ => line.push(Run { text, style }),
                }
            }
        }
        if !line.is_empty() {
            self.place(line, size_pt, indent_mm);
        }
    }
}

/// Break a word that does not fit on a line at all. Input is ASCII.
fn split_long(word: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = word;
    while rest.len() > max_chars {
        let (head, tail) = rest.split_at(max_chars);
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}

/// Lay out title, content and creation time on A4 pages
pub fn layout(doc: &Document) -> Layout {
    let mut pages = Paginator::new();
    let title = pdf_safe(doc.display_title());

    pages.place_wrapped(&[Span::plain(title.clone())], TITLE_SIZE, 0.0, true);
    pages.gap(4.0);

    let blocks: Vec<_> = markup::parse(&doc.content)
        .into_iter()
        .filter(|b| !b.text().trim().is_empty())
        .collect();

    if blocks.is_empty() {
        pages.place_wrapped(&[Span::plain(NO_CONTENT)], BODY_SIZE, 0.0, false);
    }
    for block in &blocks {
        match block.kind {
            BlockKind::Heading(level) => {
                pages.gap(2.0);
                pages.place_wrapped(&block.spans, heading_size(level), 0.0, true);
            }
            BlockKind::Paragraph => pages.place_wrapped(&block.spans, BODY_SIZE, 0.0, false),
            BlockKind::ListItem => {
                let mut spans = vec![Span::plain("-")];
                spans.extend(block.spans.iter().cloned());
                pages.place_wrapped(&spans, BODY_SIZE, 5.0, false);
            }
        }
        pages.gap(1.5);
    }

    pages.gap(4.0);
    let created = format!("Created at: {}", doc.created_at_display());
    let meta = Span {
        text: created,
        bold: false,
        italic: true,
    };
    pages.place_wrapped(&[meta], META_SIZE, 0.0, false);

    Layout {
        title,
        pages: pages.pages,
    }
}

/// Render `doc` to PDF bytes
pub fn export_pdf(doc: &Document) -> Result<Vec<u8>, ExportError> {
    let layout = layout(doc);
    render(&layout)
}

fn render(layout: &Layout) -> Result<Vec<u8>, ExportError> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(layout.title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Content");

    let mut fonts: Vec<(TextStyle, IndirectFontRef)> = Vec::new();
    for style in [
        TextStyle::Regular,
        TextStyle::Bold,
        TextStyle::Italic,
        TextStyle::BoldItalic,
    ] {
        fonts.push((style, pdf.add_builtin_font(style.font()).map_err(render_err)?));
    }
    let font_for = |style: TextStyle| {
        fonts
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, f)| f)
            .ok_or_else(|| ExportError::Render(format!("font for {:?} not loaded", style)))
    };

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Content");
            pdf.get_page(page_ref).get_layer(layer_ref)
        };

        for line in &page.lines {
            layer.begin_text_section();
            layer.set_text_cursor(Mm(line.x_mm), Mm(line.y_mm));
            for run in &line.runs {
                let font = font_for(run.style)?;
                layer.set_font(font, line.size_pt);
                layer.write_text(run.text.as_str(), font);
            }
            layer.end_text_section();
        }
    }

    pdf.save_to_bytes().map_err(render_err)
}

fn render_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render(e.to_string())
}

/// `My Notes` becomes `My_Notes.pdf`
pub fn export_filename(doc: &Document) -> String {
    let stem: String = doc
        .title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{}.pdf", stem)
    }
}

/// Where exported files go by default
pub fn download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Render `doc` and write it into `dir`, returning the file's path
pub fn save_pdf(doc: &Document, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = export_pdf(doc)?;

    let filename = export_filename(doc);
    let path = dir.join(&filename);
    let tmp = dir.join(format!(".{}.part", filename));

    if let Err(source) = fs::write(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(ExportError::Io { path: tmp, source });
    }
    if let Err(source) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(ExportError::Io { path, source });
    }

    tracing::info!(id = doc.id, path = %path.display(), bytes = bytes.len(), "exported document");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Visibility;

    fn doc(title: &str, content: &str) -> Document {
        Document {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            visibility: Visibility::Private,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_content_gets_placeholder() {
        let layout = layout(&doc("Empty", ""));
        let text = layout.text();
        assert_eq!(text[0], "Empty");
        assert!(text.iter().any(|l| l == NO_CONTENT));
        assert!(text.last().unwrap().starts_with("Created at: "));
    }

    #[test]
    fn test_markup_only_content_counts_as_empty() {
        let text = layout(&doc("T", "<p><br></p>")).text();
        assert!(text.iter().any(|l| l == NO_CONTENT));
    }

    #[test]
    fn test_untitled_fallback() {
        assert_eq!(layout(&doc("  ", "<p>x</p>")).title, "Untitled");
    }

    #[test]
    fn test_long_content_paginates() {
        let paragraph = format!("<p>{}</p>", "word ".repeat(60));
        let content = paragraph.repeat(40);
        let layout = layout(&doc("Long", &content));
        assert!(layout.pages.len() > 1);
        for page in &layout.pages {
            for line in &page.lines {
                assert!(line.y_mm >= MARGIN_MM);
            }
        }
    }

    #[test]
    fn test_wrapped_lines_fit_width() {
        let content = format!("<p>{}</p>", "abcdefghij ".repeat(50));
        let layout = layout(&doc("W", &content));
        let max_chars = ((PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / (BODY_SIZE * PT_TO_MM * AVG_GLYPH_WIDTH)) as usize;
        for line in layout.text().iter().skip(1) {
            assert!(line.len() <= max_chars, "{:?} too long", line);
        }
    }

    #[test]
    fn test_inline_styles_become_runs() {
        let layout = layout(&doc("S", "<p>plain <strong>bold</strong> tail</p>"));
        let line = &layout.pages[0].lines[1];
        let styles: Vec<TextStyle> = line.runs.iter().map(|r| r.style).collect();
        assert_eq!(styles, vec![TextStyle::Regular, TextStyle::Bold, TextStyle::Regular]);
        assert_eq!(line.text(), "plain bold tail");
    }

    #[test]
    fn test_pdf_safe_text() {
        assert_eq!(pdf_safe("\u{201C}hi\u{201D} \u{2014} caf\u{e9}"), "\"hi\" - caf?");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(&doc("My  Notes\tv2", "")), "My_Notes_v2.pdf");
        assert_eq!(export_filename(&doc("a/b", "")), "a_b.pdf");
        assert_eq!(export_filename(&doc("   ", "")), "document.pdf");
    }

    #[test]
    fn test_export_pdf_bytes() {
        let bytes = export_pdf(&doc("Hello", "<h1>Head</h1><ul><li>one</li></ul>")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
