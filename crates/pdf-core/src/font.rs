//! Standard Helvetica fonts and WinAnsi text encoding
//!
//! The four Helvetica variants are part of the PDF base-14 set: viewers
//! ship them, so nothing is embedded. Text is written as single-byte
//! WinAnsiEncoding strings, which covers Latin-1 (all Portuguese accents).

use lopdf::{Dictionary, Object};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One of the Helvetica base-14 fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

/// Advance widths (1/1000 em) of Helvetica for codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

/// Advance widths (1/1000 em) of Helvetica-Bold for codes 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

impl StandardFont {
    /// Pick the variant for a weight/style pair
    pub fn from_variant(weight: FontWeight, style: FontStyle) -> Self {
        match (weight, style) {
            (FontWeight::Regular, FontStyle::Normal) => Self::Helvetica,
            (FontWeight::Bold, FontStyle::Normal) => Self::HelveticaBold,
            (FontWeight::Regular, FontStyle::Italic) => Self::HelveticaOblique,
            (FontWeight::Bold, FontStyle::Italic) => Self::HelveticaBoldOblique,
        }
    }

    /// The same family and style with the given weight
    pub fn with_weight(self, weight: FontWeight) -> Self {
        Self::from_variant(weight, self.style())
    }

    pub fn weight(self) -> FontWeight {
        match self {
            Self::HelveticaBold | Self::HelveticaBoldOblique => FontWeight::Bold,
            _ => FontWeight::Regular,
        }
    }

    pub fn style(self) -> FontStyle {
        match self {
            Self::HelveticaOblique | Self::HelveticaBoldOblique => FontStyle::Italic,
            _ => FontStyle::Normal,
        }
    }

    /// PostScript name used as /BaseFont
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Page resource name (e.g., "F1")
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
            Self::HelveticaOblique => "F3",
            Self::HelveticaBoldOblique => "F4",
        }
    }

    /// Advance width of a WinAnsi code in 1/1000 em
    ///
    /// Oblique variants share the metrics of their upright counterpart.
    pub fn code_width(self, code: u8) -> u16 {
        let bold = self.weight() == FontWeight::Bold;
        let table = if bold {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };

        if (32..=126).contains(&code) {
            return table[(code - 32) as usize];
        }
        if let Some(base) = accent_base(code) {
            return table[(base - 32) as usize];
        }

        match code {
            // dotless-i accented forms are wider than plain i
            0xEC..=0xEF => 278,
            0xA0 => 278,
            0x96 => 556,
            0x97 | 0x85 | 0xC6 => 1000,
            0x91 | 0x92 => {
                if bold {
                    278
                } else {
                    222
                }
            }
            0x93 | 0x94 => {
                if bold {
                    500
                } else {
                    333
                }
            }
            0x95 => 350,
            0xAA => 370,
            0xBA => 365,
            0xB0 => 400,
            0xA6 => {
                if bold {
                    280
                } else {
                    260
                }
            }
            0xA9 | 0xAE => 737,
            0xAC | 0xB1 | 0xD7 | 0xF7 => 584,
            0xA1 | 0xA8 | 0xAD | 0xAF | 0xB2 | 0xB3 | 0xB4 | 0xB8 | 0xB9 => 333,
            0xBC..=0xBE => 834,
            0xB7 => 278,
            0xE6 => 889,
            0xD8 | 0xDE => 778,
            0xBF | 0xDF | 0xF8 => 611,
            _ => 556,
        }
    }

    /// Width of a text string in points
    pub fn text_width_points(self, text: &str, font_size: f64) -> f64 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| self.code_width(code) as u32)
            .sum();
        units as f64 * font_size / 1000.0
    }

    /// Font dictionary for the page resources
    pub fn to_pdf_dictionary(self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set("BaseFont", Object::Name(self.base_name().as_bytes().to_vec()));
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        dict
    }
}

/// Unaccented ASCII letter whose width an accented WinAnsi letter shares
fn accent_base(code: u8) -> Option<u8> {
    let base = match code {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD1 => b'N',
        0xD2..=0xD6 => b'O',
        0xD9..=0xDC => b'U',
        0xDD | 0x9F => b'Y',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xF1 => b'n',
        0xF2..=0xF6 => b'o',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        0x8A => b'S',
        0x9A => b's',
        0x8E => b'Z',
        0x9E => b'z',
        _ => return None,
    };
    Some(base)
}

/// Map a Unicode scalar to its WinAnsiEncoding byte
pub fn to_win_ansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let byte = match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(byte)
        }
    }
}

/// Encode text as WinAnsi bytes
///
/// Tabs and line breaks become spaces; characters outside the encoding
/// are replaced with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            _ => to_win_ansi(c).unwrap_or(b'?'),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_resolution() {
        assert_eq!(
            StandardFont::from_variant(FontWeight::Bold, FontStyle::Normal),
            StandardFont::HelveticaBold
        );
        assert_eq!(
            StandardFont::HelveticaOblique.with_weight(FontWeight::Bold),
            StandardFont::HelveticaBoldOblique
        );
        assert_eq!(StandardFont::HelveticaBold.weight(), FontWeight::Bold);
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let names: std::collections::HashSet<_> = [
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique,
            StandardFont::HelveticaBoldOblique,
        ]
        .iter()
        .map(|f| f.resource_name())
        .collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_ascii_widths() {
        assert_eq!(StandardFont::Helvetica.code_width(b' '), 278);
        assert_eq!(StandardFont::Helvetica.code_width(b'i'), 222);
        assert_eq!(StandardFont::HelveticaBold.code_width(b'i'), 278);
        assert_eq!(StandardFont::Helvetica.code_width(b'W'), 944);
        assert_eq!(StandardFont::Helvetica.code_width(b'~'), 584);
    }

    #[test]
    fn test_accented_width_matches_base_letter() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.code_width(0xE7), font.code_width(b'c')); // ç
        assert_eq!(font.code_width(0xC3), font.code_width(b'A')); // Ã
        assert_eq!(font.code_width(0xE9), font.code_width(b'e')); // é
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = StandardFont::Helvetica.text_width_points("Comprador", 11.0);
        let bold = StandardFont::HelveticaBold.text_width_points("Comprador", 11.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_text_width_points() {
        // "AB" = 667 + 667 units at 10pt
        let width = StandardFont::Helvetica.text_width_points("AB", 10.0);
        assert!((width - 13.34).abs() < 1e-9);
        assert_eq!(StandardFont::Helvetica.text_width_points("", 10.0), 0.0);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Calçados"), b"Cal\xE7ados".to_vec());
        assert_eq!(encode_win_ansi("R$ 1,00"), b"R$ 1,00".to_vec());
        assert_eq!(encode_win_ansi("–"), vec![0x96]);
        assert_eq!(encode_win_ansi("\u{4E2D}"), b"?".to_vec());
        assert_eq!(encode_win_ansi("a\nb"), b"a b".to_vec());
    }

    #[test]
    fn test_pdf_dictionary() {
        let dict = StandardFont::HelveticaBold.to_pdf_dictionary();
        assert_eq!(
            dict.get(b"BaseFont").unwrap().as_name().unwrap(),
            b"Helvetica-Bold"
        );
        assert_eq!(
            dict.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );
    }
}
