//! Small SVG document builder for chart overlays.

use std::borrow::Cow;

use image::Rgb;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Anchor is on the alphabetic baseline
    Alphabetic,
    /// Anchor is at the vertical centre of the glyph box
    Central,
}

/// How a text run is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle<'a> {
    pub font_family: &'a str,
    pub font_size: f64,
    pub fill: Rgb<u8>,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
}

/// An SVG document assembled element by element, in paint order.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    body: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Unfilled circle outline.
    pub fn circle_outline(&mut self, cx: f64, cy: f64, r: f64, stroke: Rgb<u8>, width: f64) {
        self.body.push_str(&format!(
            r#"<circle cx="{cx:.3}" cy="{cy:.3}" r="{r:.3}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
            hex_color(stroke)
        ));
    }

    /// Solid disc.
    pub fn circle_filled(&mut self, cx: f64, cy: f64, r: f64, fill: Rgb<u8>) {
        self.body.push_str(&format!(
            r#"<circle cx="{cx:.3}" cy="{cy:.3}" r="{r:.3}" fill="{}"/>"#,
            hex_color(fill)
        ));
    }

    /// Text run; `content` is escaped.
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle<'_>) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let baseline = match style.baseline {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Central => "central",
        };
        self.body.push_str(&format!(
            r#"<text x="{x:.3}" y="{y:.3}" font-family="{}" font-size="{}" fill="{}" text-anchor="{anchor}" dominant-baseline="{baseline}">{}</text>"#,
            escape_xml(style.font_family),
            style.font_size,
            hex_color(style.fill),
            escape_xml(content)
        ));
    }

    /// Number of drawn elements of a given tag, e.g. `circle`.
    pub fn count_elements(&self, tag: &str) -> usize {
        self.body.matches(&format!("<{tag} ")).count()
    }

    /// Complete SVG source.
    pub fn finish(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// `#rrggbb` for a colour.
pub fn hex_color(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Escape text for use in SVG character data and attribute values.
///
/// Control characters other than tab and newlines are not valid XML and are dropped.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c)
}

/// XML 1.0 `Char`, with C1 controls dropped as well.
fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => !c.is_control(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle<'static> {
        TextStyle {
            font_family: "DejaVu Sans",
            font_size: 26.0,
            fill: Rgb([160, 180, 220]),
            anchor: TextAnchor::Middle,
            baseline: Baseline::Central,
        }
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(Rgb([6, 10, 20])), "#060a14");
        assert_eq!(hex_color(Rgb([255, 255, 255])), "#ffffff");
    }

    #[test]
    fn test_escape_xml() {
        assert!(matches!(escape_xml("plain title ✨"), Cow::Borrowed(_)));
        assert_eq!(
            escape_xml(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &apos;Jerry&apos;&lt;/b&gt;"
        );
        assert_eq!(escape_xml("bell\u{7}ring"), "bellring");
    }

    #[test]
    fn test_non_characters_are_dropped() {
        assert_eq!(escape_xml("night\u{FFFE} sky\u{FFFF}"), "night sky");
        assert_eq!(escape_xml("tab\tkept\u{85}"), "tab\tkept");
        assert_eq!(escape_xml("\u{FFFD}\u{10000}"), "\u{FFFD}\u{10000}");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = SvgDocument::new(10, 10);
        doc.text(1.0, 2.0, "</text><script>", &style());
        let svg = doc.finish();
        assert!(svg.contains("&lt;/text&gt;&lt;script&gt;"));
        assert!(!svg.contains("<script>"));
        assert_eq!(doc.count_elements("text"), 1);
    }

    #[test]
    fn test_document_parses_with_usvg() {
        let mut doc = SvgDocument::new(100, 50);
        doc.circle_outline(50.0, 25.0, 20.0, Rgb([26, 40, 80]), 3.0);
        doc.circle_filled(50.0, 25.0, 4.0, Rgb([200, 220, 255]));
        doc.text(50.0, 10.0, "N & S", &style());

        let tree = usvg::Tree::from_str(&doc.finish(), &usvg::Options::default()).unwrap();
        assert_eq!(tree.size().width(), 100.0);
        assert_eq!(tree.size().height(), 50.0);
        assert_eq!(doc.count_elements("circle"), 2);
    }
}
