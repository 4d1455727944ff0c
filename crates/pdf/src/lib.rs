//! # contentgen-pdf: Plain-Text PDF Rendering
//!
//! Renders a block of plain text as an A4 PDF in a single monospaced font,
//! word-wrapped and paginated. Markdown in the input is not interpreted; the
//! on-screen preview is formatted, the PDF is literal.

pub mod layout;

use layout::{paginate, PageGeometry, A4_COURIER};
use printpdf::{
    BuiltinFont, DictItem, Layer, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextMatrix,
    TextRenderingMode,
};
use thiserror::Error;
use tracing::{debug, info, instrument};

// --- Error Definitions ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Character {character:?} at position {position} cannot be encoded in the PDF font")]
    UnsupportedCharacter { character: char, position: usize },
}

// --- Data Structures ---

/// A complete PDF held in memory, ready to be sent as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl RenderedDocument {
    /// The media type to serve the document with.
    pub const MEDIA_TYPE: &'static str = "application/pdf";
}

// --- Rendering ---

/// Renders `text` with the default A4 / Courier 12pt geometry.
pub fn render(text: &str) -> Result<RenderedDocument, RenderError> {
    render_with(text, &A4_COURIER)
}

/// Renders `text` with a custom page geometry.
#[instrument(skip(text, geometry), fields(chars = text.len()))]
pub fn render_with(text: &str, geometry: &PageGeometry) -> Result<RenderedDocument, RenderError> {
    let pages = paginate(text, geometry)?;

    let mut doc = PdfDocument::new("Generated Content");
    let layer_id = doc.add_layer(&Layer::new("Text"));
    // The standard Courier font is WinAnsi-encoded, which covers Latin-1.
    let font = BuiltinFont::Courier;

    let x = Mm(geometry.margin_mm);
    for lines in &pages {
        let mut ops = vec![
            Op::BeginLayer {
                layer_id: layer_id.clone(),
            },
            Op::StartTextSection,
            Op::SetFontSizeBuiltinFont {
                size: Pt(geometry.font_size_pt),
                font,
            },
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::Fill,
            },
            // Registers the font with the document resources; draws nothing.
            Op::WriteTextBuiltinFont {
                items: Vec::new(),
                font,
            },
        ];
        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            ops.push(Op::SetTextMatrix {
                matrix: TextMatrix::Translate(x.into(), Mm(geometry.baseline_mm(index)).into()),
            });
            ops.push(show_latin1(line));
        }
        ops.push(Op::EndTextSection);
        ops.push(Op::EndLayer {
            layer_id: layer_id.clone(),
        });

        doc.pages.push(PdfPage::new(
            Mm(geometry.page_width_mm),
            Mm(geometry.page_height_mm),
            ops,
        ));
    }

    let mut warnings = Vec::new();
    // Raw `Tj` operators are dropped by the secure serializer.
    let options = PdfSaveOptions {
        secure: false,
        ..PdfSaveOptions::default()
    };
    let bytes = doc.save(&options, &mut warnings);
    if !warnings.is_empty() {
        debug!("PDF generation warnings: {warnings:?}");
    }

    info!(pages = pages.len(), bytes = bytes.len(), "Rendered PDF.");
    Ok(RenderedDocument {
        bytes,
        page_count: pages.len(),
    })
}

/// A `Tj` operator drawing `line` as single-byte WinAnsi codes.
///
/// `paginate` has already rejected anything above U+00FF, so every char maps
/// to exactly one byte.
fn show_latin1(line: &str) -> Op {
    Op::Unknown {
        key: "Tj".to_string(),
        value: vec![DictItem::String {
            data: line.chars().map(|c| c as u8).collect(),
            literal: false,
        }],
    }
}
