//! Printable question sheet for building a Kahoot.
//!
//! Text is laid out into [`PdfBlock`]s first and drawn afterwards, so the
//! layout rules can be checked without parsing a PDF.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb, TextRenderingMode,
};
use tracing::{debug, warn};

use super::ExportError;
use crate::models::QuestionItem;

pub const TITLE: &str = "KAHOOT QUESTION LIST";
pub const CORRECT_MARKER: &str = " (CORRECT)";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;
const TITLE_HEIGHT: f32 = 10.0;
const QUESTION_LINE_HEIGHT: f32 = 8.0;
const OPTION_LINE_HEIGHT: f32 = 6.0;
const SPACER_HEIGHT: f32 = 5.0;
/// Characters per line at 12pt across the printable width.
const WRAP_WIDTH: usize = 85;
const PT_TO_MM: f32 = 0.3528;
const LAYER_NAME: &str = "Layer 1";

/// How text reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// An embedded TrueType font covers the whole text.
    Unicode,
    /// Built-in Helvetica; anything outside Latin-1 becomes `?`.
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfBlock {
    Title(String),
    Question(String),
    Option { text: String, correct: bool },
    Spacer,
}

/// Lossy re-encoding for fonts without Unicode coverage.
pub fn to_latin1_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if u32::from(c) <= 0xFF { c } else { '?' })
        .collect()
}

fn option_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.iter().rev().collect()
}

/// Turns the question list into the blocks drawn on the sheet.
///
/// # Arguments
///
/// * `questions` - Questions in output order, numbered from 1
/// * `encoding` - With [`TextEncoding::Latin1`] every user string goes
///   through [`to_latin1_lossy`] first
///
/// # Example
///
/// ```text
/// Title("KAHOOT QUESTION LIST"), Spacer,
/// Question("Question 1: 1 + 1 = ?"),
/// Option { "   A. 1", false }, Option { "   B. 2 (CORRECT)", true }, Spacer
/// ```
pub fn layout(questions: &[QuestionItem], encoding: TextEncoding) -> Vec<PdfBlock> {
    let encode = |text: &str| match encoding {
        TextEncoding::Unicode => text.to_string(),
        TextEncoding::Latin1 => to_latin1_lossy(text),
    };

    let mut blocks = vec![PdfBlock::Title(TITLE.to_string()), PdfBlock::Spacer];

    for (idx, question) in questions.iter().enumerate() {
        blocks.push(PdfBlock::Question(format!(
            "Question {}: {}",
            idx + 1,
            encode(&question.question)
        )));

        for (i, option) in question.options.iter().enumerate() {
            let correct = i == question.correct_index;
            let marker = if correct { CORRECT_MARKER } else { "" };
            blocks.push(PdfBlock::Option {
                text: format!("   {}. {}{}", option_label(i), encode(option), marker),
                correct,
            });
        }

        blocks.push(PdfBlock::Spacer);
    }

    blocks
}

/// Fake bold strokes the glyph outlines, which only works with an embedded font.
fn draws_bold(correct: bool, encoding: TextEncoding) -> bool {
    correct && encoding == TextEncoding::Unicode
}

/// Draws lines top to bottom, starting a new page when one fills up.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    encoding: TextEncoding,
    y: f32,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, height: f32) {
        if self.y - height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, text: &str, x: f32, height: f32, color: (f32, f32, f32), correct: bool) {
        self.ensure_room(height);

        let (r, g, b) = color;
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));

        let bold = draws_bold(correct, self.encoding);
        if bold {
            self.layer.set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
            self.layer.set_outline_thickness(0.4);
            self.layer.set_text_rendering_mode(TextRenderingMode::FillStroke);
        }

        let baseline = self.y - height * 0.75;
        self.layer
            .use_text(text, FONT_SIZE, Mm(x), Mm(baseline), &self.font);

        if bold {
            self.layer.set_text_rendering_mode(TextRenderingMode::Fill);
        }
        self.y -= height;
    }

    fn paragraph(&mut self, text: &str, height: f32, color: (f32, f32, f32), correct: bool) {
        let options = textwrap::Options::new(WRAP_WIDTH).subsequent_indent("      ");
        for line in textwrap::wrap(text, options) {
            self.line(&line, MARGIN, height, color, correct);
        }
    }

    fn centered(&mut self, text: &str, height: f32) {
        let width = text.chars().count() as f32 * FONT_SIZE * 0.5 * PT_TO_MM;
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        self.line(text, x, height, BLACK, false);
    }

    fn spacer(&mut self) {
        self.y -= SPACER_HEIGHT;
    }
}

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const NAVY: (f32, f32, f32) = (0.0, 0.0, 128.0 / 255.0);

fn load_font(
    doc: &PdfDocumentReference,
    font_path: &Path,
) -> Result<(IndirectFontRef, TextEncoding), ExportError> {
    if font_path.is_file() {
        let embedded = File::open(font_path)
            .map_err(|e| e.to_string())
            .and_then(|file| doc.add_external_font(file).map_err(|e| e.to_string()));

        match embedded {
            Ok(font) => return Ok((font, TextEncoding::Unicode)),
            Err(e) => warn!(
                font = %font_path.display(),
                "Unicode font could not be loaded, using Latin-1 fallback: {}",
                e
            ),
        }
    } else {
        debug!(font = %font_path.display(), "Unicode font not found, using Latin-1 fallback");
    }

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok((font, TextEncoding::Latin1))
}

pub(super) fn write(
    questions: &[QuestionItem],
    path: &Path,
    font_path: &Path,
) -> Result<(), ExportError> {
    let (doc, page, layer) = PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
    let (font, encoding) = load_font(&doc, font_path)?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        font,
        encoding,
        y: PAGE_HEIGHT - MARGIN,
    };

    for block in layout(questions, encoding) {
        match block {
            PdfBlock::Title(text) => writer.centered(&text, TITLE_HEIGHT),
            PdfBlock::Question(text) => {
                writer.paragraph(&text, QUESTION_LINE_HEIGHT, NAVY, false)
            }
            PdfBlock::Option { text, correct } => {
                writer.paragraph(&text, OPTION_LINE_HEIGHT, BLACK, correct)
            }
            PdfBlock::Spacer => writer.spacer(),
        }
    }

    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(())
}
