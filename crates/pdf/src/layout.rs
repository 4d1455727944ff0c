//! # Text Layout
//!
//! Word-wraps plain text into fixed-width lines and groups the lines into
//! pages. No markup is interpreted: `#`, `*` and friends are ordinary
//! characters. Only spaces at wrap points are dropped, so every other input
//! character survives, once and in order.

use crate::RenderError;

/// Page and font metrics, in millimetres unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
    /// Advance width of one glyph as a fraction of the font size.
    pub glyph_advance_em: f32,
}

/// A4 portrait, Courier 12pt, 10mm margins and 10mm lines.
pub const A4_COURIER: PageGeometry = PageGeometry {
    page_width_mm: 210.0,
    page_height_mm: 297.0,
    margin_mm: 10.0,
    line_height_mm: 10.0,
    font_size_pt: 12.0,
    glyph_advance_em: 0.6,
};

const PT_PER_MM: f32 = 72.0 / 25.4;
const TAB_WIDTH: usize = 4;

impl PageGeometry {
    /// How many glyphs fit between the side margins.
    pub fn chars_per_line(&self) -> usize {
        let usable_pt = (self.page_width_mm - 2.0 * self.margin_mm) * PT_PER_MM;
        let glyph_pt = self.font_size_pt * self.glyph_advance_em;
        ((usable_pt / glyph_pt).floor() as usize).max(1)
    }

    /// How many lines fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable_mm = self.page_height_mm - 2.0 * self.margin_mm;
        ((usable_mm / self.line_height_mm).floor() as usize).max(1)
    }

    /// Baseline of the `index`-th line on a page, measured up from the page bottom.
    pub fn baseline_mm(&self, index: usize) -> f32 {
        let font_mm = self.font_size_pt / PT_PER_MM;
        let cell_top = self.margin_mm + index as f32 * self.line_height_mm;
        self.page_height_mm - (cell_top + self.line_height_mm / 2.0 + 0.3 * font_mm)
    }
}

/// Lines of text, grouped by page.
pub type Pages = Vec<Vec<String>>;

/// Checks that every character can be drawn with the built-in Latin-1 font.
///
/// Accepted: printable ASCII, `\n`, `\r`, `\t`, and U+00A0..=U+00FF.
pub fn check_encoding(text: &str) -> Result<(), RenderError> {
    match text.chars().enumerate().find(|(_, c)| !is_supported(*c)) {
        Some((position, character)) => Err(RenderError::UnsupportedCharacter {
            character,
            position,
        }),
        None => Ok(()),
    }
}

fn is_supported(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | ' '..='~' | '\u{A0}'..='\u{FF}')
}

/// Lays `text` out into pages. Empty text yields one page with one empty line.
pub fn paginate(text: &str, geometry: &PageGeometry) -> Result<Pages, RenderError> {
    check_encoding(text)?;

    let width = geometry.chars_per_line();
    let normalized = text.replace('\r', "").replace('\t', &" ".repeat(TAB_WIDTH));
    let lines: Vec<String> = normalized
        .split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, width))
        .collect();

    let pages: Pages = lines
        .chunks(geometry.lines_per_page())
        .map(|chunk| chunk.to_vec())
        .collect();

    if pages.is_empty() {
        Ok(vec![Vec::new()])
    } else {
        Ok(pages)
    }
}

/// Greedy word wrap. Breaks at the last space that keeps the line within
/// `width`; a word longer than `width` is split mid-word.
pub fn wrap_paragraph(paragraph: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;

    while chars.len() - start > width {
        let limit = start + width;
        match (start + 1..=limit).rev().find(|&i| chars[i] == ' ') {
            Some(space) => {
                lines.push(chars[start..space].iter().collect());
                start = space + 1;
            }
            None => {
                lines.push(chars[start..limit].iter().collect());
                start = limit;
            }
        }
    }
    lines.push(chars[start..].iter().collect());
    lines
}
