//! Paragraphs: styled rich text broken into lines

use super::markup::{escape_markup, parse_markup, Inline};
use crate::canvas::Color;
use crate::font::{FontWeight, StandardFont};
use crate::Align;

/// Tolerance when comparing widths, in points
const WIDTH_EPSILON: f64 = 1e-6;

/// Paragraph style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    /// Regular font; `<b>` switches it to the bold weight
    pub font: StandardFont,
    pub font_size: f64,
    /// Distance between baselines
    pub leading: f64,
    pub align: Align,
    pub space_before: f64,
    pub space_after: f64,
    pub color: Color,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            font: StandardFont::Helvetica,
            font_size: 10.0,
            leading: 12.0,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
            color: Color::black(),
        }
    }
}

impl ParagraphStyle {
    fn font_for(&self, bold: bool) -> StandardFont {
        if bold {
            self.font.with_weight(FontWeight::Bold)
        } else {
            self.font
        }
    }
}

/// Same-style run of text within a line
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub bold: bool,
}

/// One broken line of a paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    /// Natural width in points, without justification
    pub width: f64,
    /// Number of inter-word spaces
    pub spaces: usize,
    /// Line ends at `<br/>` or at the end of the paragraph; such lines
    /// are never stretched
    pub ends_with_break: bool,
}

impl Line {
    fn empty() -> Self {
        Self {
            fragments: Vec::new(),
            width: 0.0,
            spaces: 0,
            ends_with_break: false,
        }
    }

    /// Plain text of the line
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, bold: bool) {
        match self.fragments.last_mut() {
            Some(last) if last.bold == bold => last.text.push_str(text),
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                bold,
            }),
        }
    }
}

/// A word: adjacent pieces with no whitespace between them
#[derive(Debug, Clone)]
struct Word {
    pieces: Vec<(String, bool)>,
}

enum Token {
    Word(Word),
    Break,
}

fn tokenize(inlines: &[Inline]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = Word { pieces: Vec::new() };

    fn push_char(word: &mut Word, c: char, bold: bool) {
        match word.pieces.last_mut() {
            Some((text, b)) if *b == bold => text.push(c),
            _ => word.pieces.push((c.to_string(), bold)),
        }
    }

    fn end_word(tokens: &mut Vec<Token>, current: &mut Word) {
        if !current.pieces.is_empty() {
            tokens.push(Token::Word(std::mem::replace(
                current,
                Word { pieces: Vec::new() },
            )));
        }
    }

    for inline in inlines {
        match inline {
            Inline::Text { text, bold } => {
                for c in text.chars() {
                    // Non-breaking space stays inside the word
                    if c.is_whitespace() && c != '\u{A0}' {
                        end_word(&mut tokens, &mut current);
                    } else {
                        push_char(&mut current, c, *bold);
                    }
                }
            }
            Inline::Break => {
                end_word(&mut tokens, &mut current);
                tokens.push(Token::Break);
            }
        }
    }
    end_word(&mut tokens, &mut current);
    tokens
}

/// A block of rich text
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    inlines: Vec<Inline>,
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Parse `markup` (see [`super::markup`])
    pub fn new(markup: &str, style: ParagraphStyle) -> Self {
        Self {
            inlines: parse_markup(markup),
            style,
        }
    }

    /// Paragraph whose text is shown literally
    pub fn plain(text: &str, style: ParagraphStyle) -> Self {
        Self::new(&escape_markup(text), style)
    }

    pub fn inlines(&self) -> &[Inline] {
        &self.inlines
    }

    fn piece_width(&self, text: &str, bold: bool) -> f64 {
        self.style
            .font_for(bold)
            .text_width_points(text, self.style.font_size)
    }

    fn word_width(&self, word: &Word) -> f64 {
        word.pieces
            .iter()
            .map(|(text, bold)| self.piece_width(text, *bold))
            .sum()
    }

    /// Split a word wider than `max_width` into chunks that fit
    fn split_long_word(&self, word: &Word, max_width: f64) -> Vec<Word> {
        let mut chunks = Vec::new();
        let mut chunk = Word { pieces: Vec::new() };
        let mut chunk_width = 0.0;

        for (text, bold) in &word.pieces {
            for c in text.chars() {
                let mut buf = [0u8; 4];
                let w = self.piece_width(c.encode_utf8(&mut buf), *bold);
                if chunk_width + w > max_width + WIDTH_EPSILON && !chunk.pieces.is_empty() {
                    chunks.push(std::mem::replace(&mut chunk, Word { pieces: Vec::new() }));
                    chunk_width = 0.0;
                }
                match chunk.pieces.last_mut() {
                    Some((t, b)) if *b == *bold => t.push(c),
                    _ => chunk.pieces.push((c.to_string(), *bold)),
                }
                chunk_width += w;
            }
        }
        if !chunk.pieces.is_empty() {
            chunks.push(chunk);
        }
        chunks
    }

    /// Break the paragraph into lines no wider than `max_width`
    ///
    /// Words are never split unless a single word is wider than the line.
    /// An empty paragraph has no lines.
    pub fn wrap(&self, max_width: f64) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut line = Line::empty();
        // Style of the last piece on the line, which owns the next space
        let mut last_bold = false;

        let mut words = Vec::new();
        for token in tokenize(&self.inlines) {
            match token {
                Token::Word(word) if self.word_width(&word) > max_width + WIDTH_EPSILON => {
                    words.extend(
                        self.split_long_word(&word, max_width)
                            .into_iter()
                            .map(Token::Word),
                    );
                }
                other => words.push(other),
            }
        }

        for token in words {
            match token {
                Token::Break => {
                    line.ends_with_break = true;
                    lines.push(std::mem::replace(&mut line, Line::empty()));
                }
                Token::Word(word) => {
                    let word_width = self.word_width(&word);
                    if !line.fragments.is_empty() {
                        let space = self.piece_width(" ", last_bold);
                        if line.width + space + word_width > max_width + WIDTH_EPSILON {
                            lines.push(std::mem::replace(&mut line, Line::empty()));
                        } else {
                            line.push(" ", last_bold);
                            line.width += space;
                            line.spaces += 1;
                        }
                    }
                    for (text, bold) in &word.pieces {
                        line.push(text, *bold);
                        last_bold = *bold;
                    }
                    line.width += word_width;
                }
            }
        }

        if !line.fragments.is_empty() {
            line.ends_with_break = true;
            lines.push(line);
        }
        lines
    }

    /// Height of the wrapped text, without space before/after
    pub fn height(&self, max_width: f64) -> f64 {
        self.wrap(max_width).len() as f64 * self.style.leading
    }
}

/// Horizontal placement of one fragment of a drawn line
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedFragment {
    pub x: f64,
    pub text: String,
    pub font: StandardFont,
    pub word_spacing: f64,
}

/// Position the fragments of `line` inside a box `width` wide starting at `x`
pub(crate) fn place_line(
    line: &Line,
    style: &ParagraphStyle,
    x: f64,
    width: f64,
) -> Vec<PlacedFragment> {
    let stretch = style.align == Align::Justify && !line.ends_with_break && line.spaces > 0;
    let word_spacing = if stretch {
        ((width - line.width) / line.spaces as f64).max(0.0)
    } else {
        0.0
    };

    let mut cursor = x + crate::text::calculate_x_offset(line.width, width, style.align);
    let mut placed = Vec::with_capacity(line.fragments.len());
    for fragment in &line.fragments {
        let font = style.font_for(fragment.bold);
        placed.push(PlacedFragment {
            x: cursor,
            text: fragment.text.clone(),
            font,
            word_spacing,
        });
        let spaces = fragment.text.chars().filter(|&c| c == ' ').count();
        cursor += font.text_width_points(&fragment.text, style.font_size)
            + spaces as f64 * word_spacing;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn style() -> ParagraphStyle {
        ParagraphStyle {
            font_size: 10.0,
            leading: 12.0,
            ..ParagraphStyle::default()
        }
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn test_whitespace_collapses() {
        let para = Paragraph::new("  um\n   dois\tTRÊS  ", style());
        assert_eq!(texts(&para.wrap(500.0)), vec!["um dois TRÊS"]);
    }

    #[test]
    fn test_empty_paragraph_has_no_lines() {
        assert!(Paragraph::new("   ", style()).wrap(100.0).is_empty());
        assert_eq!(Paragraph::new("", style()).height(100.0), 0.0);
    }

    #[test]
    fn test_wrap_at_width() {
        // "aaaa" is 4 * 5.56 = 22.24pt at 10pt, a space is 2.78pt
        let para = Paragraph::new("aaaa aaaa aaaa", style());
        let lines = para.wrap(50.0);
        assert_eq!(texts(&lines), vec!["aaaa aaaa", "aaaa"]);
        assert!(!lines[0].ends_with_break);
        assert!(lines[1].ends_with_break);
        assert_eq!(lines[0].spaces, 1);
        assert!((lines[0].width - 47.26).abs() < 1e-9);
    }

    #[test]
    fn test_hard_break() {
        let para = Paragraph::new("um<br/>dois<br/><br/>tres", style());
        let lines = para.wrap(500.0);
        assert_eq!(texts(&lines), vec!["um", "dois", "", "tres"]);
        assert!(lines.iter().all(|l| l.ends_with_break));
    }

    #[test]
    fn test_long_word_is_split() {
        let para = Paragraph::new("aaaaaaaaaa", style());
        // 10 * 5.56 = 55.6pt into 25pt lines: 4 chars per line
        assert_eq!(texts(&para.wrap(25.0)), vec!["aaaa", "aaaa", "aa"]);
    }

    #[test]
    fn test_bold_fragments() {
        let para = Paragraph::new("Nome: <b>Maria Silva</b>, CPF", style());
        let lines = para.wrap(500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].fragments,
            vec![
                Fragment {
                    text: "Nome: ".to_string(),
                    bold: false
                },
                Fragment {
                    text: "Maria Silva".to_string(),
                    bold: true
                },
                Fragment {
                    text: ", CPF".to_string(),
                    bold: false
                },
            ]
        );
    }

    #[test]
    fn test_bold_words_measure_wider() {
        let regular = Paragraph::new("Comprador", style()).wrap(500.0);
        let bold = Paragraph::new("<b>Comprador</b>", style()).wrap(500.0);
        assert!(bold[0].width > regular[0].width);
    }

    #[test]
    fn test_plain_escapes_markup() {
        let para = Paragraph::plain("<b>x</b>", style());
        assert_eq!(texts(&para.wrap(500.0)), vec!["<b>x</b>"]);
    }

    #[test]
    fn test_justified_line_fills_width() {
        let para = Paragraph::new(
            "aaaa aaaa aaaa",
            ParagraphStyle {
                align: Align::Justify,
                ..style()
            },
        );
        let lines = para.wrap(50.0);

        let first = place_line(&lines[0], &para.style, 0.0, 50.0);
        assert!((first[0].word_spacing - (50.0 - 47.26)).abs() < 1e-9);

        // Last line keeps natural spacing
        let last = place_line(&lines[1], &para.style, 0.0, 50.0);
        assert_eq!(last[0].word_spacing, 0.0);
    }

    #[test]
    fn test_centred_line_offset() {
        let para = Paragraph::new(
            "aaaa",
            ParagraphStyle {
                align: Align::Center,
                ..style()
            },
        );
        let lines = para.wrap(100.0);
        let placed = place_line(&lines[0], &para.style, 10.0, 100.0);
        assert!((placed[0].x - (10.0 + (100.0 - 22.24) / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fragment_positions_advance() {
        let para = Paragraph::new("aa <b>bb</b>", style());
        let lines = para.wrap(500.0);
        let placed = place_line(&lines[0], &para.style, 0.0, 500.0);

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].font, StandardFont::HelveticaBold);
        let expected = StandardFont::Helvetica.text_width_points("aa ", 10.0);
        assert!((placed[1].x - expected).abs() < 1e-9);
    }
}
