//! Renders plain text (a tailored resume) into a simple single-column PDF.
//!
//! A4, 15 mm margins, Helvetica 11 pt with 6 mm line height. Lines are word-wrapped by
//! measured glyph width and overflow onto new pages. The built-in font only covers Latin-1,
//! so anything outside it is replaced with `?`.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::documents::font_metrics::{HELVETICA, MM_PER_PT};

const DOCUMENT_TITLE: &str = "Tailored Resume";
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const FONT_SIZE_PT: f32 = 11.0;

pub const PDF_FILE_NAME: &str = "tailored_resume.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("PDF rendering task failed: {0}")]
    Task(String),
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM).floor() as usize
}

/// Width of the text column in em units at the body font size.
fn text_width_em() -> f32 {
    (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / (FONT_SIZE_PT * MM_PER_PT)
}

/// Replaces every character outside Latin-1 with `?`.
pub fn to_latin1_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Greedy word-wrap of `text` so no line is wider than `max_width_em` in Helvetica.
/// Existing line breaks are kept, blank lines survive, and words wider than the column are
/// split between characters.
pub fn wrap_text(text: &str, max_width_em: f32) -> Vec<String> {
    let metrics = &HELVETICA;
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in raw_line.split_whitespace() {
            let word_width = metrics.measure_str(word);

            if !current.is_empty() {
                let joined = current_width + metrics.space_width + word_width;
                if joined <= max_width_em {
                    current.push(' ');
                    current.push_str(word);
                    current_width = joined;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width_em {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            // A single glyph wider than the column still gets a line of its own
            for ch in word.chars() {
                let ch_width = metrics.char_width(ch);
                if !current.is_empty() && current_width + ch_width > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Renders `text` to PDF bytes.
pub fn render_text_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let lines = wrap_text(&to_latin1_lossy(text), text_width_em());
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    for (page_number, page_lines) in lines.chunks(lines_per_page()).enumerate() {
        if page_number > 0 {
            let (page, page_layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", page_number + 1),
            );
            layer = doc.get_page(page).get_layer(page_layer);
        }

        for (row, line) in page_lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * (row as f32 + 1.0);
            layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Runs rendering on the blocking pool.
pub async fn render_text_pdf_blocking(text: String) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || render_text_pdf(&text))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_lossy_replaces_wide_characters() {
        assert_eq!(to_latin1_lossy("café – naïve ✓"), "café ? naïve ?");
        assert_eq!(to_latin1_lossy("plain"), "plain");
    }

    #[test]
    fn test_wrap_keeps_short_lines_and_blank_lines() {
        let lines = wrap_text("Summary\n\nRust engineer", 20.0);
        assert_eq!(lines, vec!["Summary", "", "Rust engineer"]);
    }

    #[test]
    fn test_wrap_breaks_on_word_boundaries() {
        // "one two" = 3.502 em, "three four" = 4.28 em, "four five" = 3.557 em
        let lines = wrap_text("one two three four five", 4.0);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap_text("ab abcdefghij", 1.5);
        assert_eq!(lines, vec!["ab", "ab", "cd", "efg", "hij"]);
    }

    #[test]
    fn test_wrap_treats_tabs_as_whitespace() {
        let lines = wrap_text("\tindented\tline", 40.0);
        assert_eq!(lines, vec!["indented line"]);
    }

    #[test]
    fn test_wrap_uses_glyph_widths_not_char_counts() {
        let narrow = "il ".repeat(40);
        let wide = "WM ".repeat(40);
        assert_eq!(narrow.len(), wide.len());
        assert_eq!(wrap_text(narrow.trim_end(), text_width_em()).len(), 1);
        assert!(wrap_text(wide.trim_end(), text_width_em()).len() > 1);
    }

    #[test]
    fn test_wrapped_lines_fit_the_text_column() {
        let column_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let heading = "SENIOR SOFTWARE ENGINEER WITH DISTRIBUTED SYSTEMS AND KAFKA POSTGRES EXPERIENCE WORLDWIDE";
        let text = format!(
            "{heading}\n{}\n{}",
            "MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM",
            "- Built resilient services in Rust, Go and Python for 10M+ users. ".repeat(5)
        );

        let lines = wrap_text(&text, text_width_em());
        assert!(lines.len() > 3);
        for line in &lines {
            let width_mm = HELVETICA.measure_str(line) * FONT_SIZE_PT * MM_PER_PT;
            assert!(width_mm <= column_mm, "{line:?} is {width_mm} mm wide");
        }
        // An 89-character all-caps heading cannot fit on one line
        assert_ne!(lines[0], heading);
    }

    #[test]
    fn test_lines_per_page_fits_margins() {
        assert_eq!(lines_per_page(), 44);
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_text_pdf("Jane Doe\nSenior Rust Engineer — résumé ✓").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_multi_page_text() {
        let text = (0..200)
            .map(|i| format!("- Bullet point number {i} describing measurable impact"))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render_text_pdf_blocking(text).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_text() {
        let bytes = render_text_pdf("").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
