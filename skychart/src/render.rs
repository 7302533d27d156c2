//! Star chart renderer.
//!
//! Paint order, later on top:
//! 1. background fill
//! 2. title
//! 3. horizon ring
//! 4. altitude rings at 15° steps
//! 5. cardinal labels outside the horizon ring
//! 6. star dots with name labels
//! 7. footer with date, time and location
//! 8. optional caption under the title

use ephemeris::Resolution;
use image::{Rgb, RgbImage};
use tiny_skia::{Color, Pixmap, Transform};

use crate::encode::encode_png;
use crate::fonts::FontBook;
use crate::geometry::{
    ChartGeometry, ChartPalette, TypeScale, ALTITUDE_RINGS_DEG, CARDINALS, CARDINAL_OFFSET_PX,
    STAR_DOT_RADIUS_PX, STAR_LABEL_OFFSET_PX,
};
use crate::projection::{PolarProjection, ProjectedStar};
use crate::svg::{Baseline, SvgDocument, TextAnchor, TextStyle};
use crate::{ChartError, Result};

/// Longest title drawn, in characters
pub const MAX_TITLE_CHARS: usize = 80;

/// Longest caption drawn, in characters
pub const MAX_CAPTION_CHARS: usize = 160;

const HORIZON_STROKE_PX: f64 = 3.0;
const ALTITUDE_STROKE_PX: f64 = 1.0;

/// Everything drawn on one chart besides the fixed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub title: String,
    pub caption: Option<String>,
    pub footer: String,
    pub stars: Vec<ProjectedStar>,
}

impl ChartRequest {
    /// Build a request, clipping title and caption and dropping a blank caption.
    pub fn new(
        title: &str,
        caption: Option<&str>,
        footer: impl Into<String>,
        stars: Vec<ProjectedStar>,
    ) -> Self {
        let caption = caption
            .map(|c| truncate_chars(c, MAX_CAPTION_CHARS))
            .filter(|c| !c.trim().is_empty());
        Self {
            title: truncate_chars(title, MAX_TITLE_CHARS),
            caption,
            footer: footer.into(),
            stars,
        }
    }
}

/// Footer line: `"{date} {time}  •  lat {lat:.4}, lon {lon:.4}"`.
pub fn footer_text(date: &str, time: &str, latitude_deg: f64, longitude_deg: f64) -> String {
    format!("{date} {time}  •  lat {latitude_deg:.4}, lon {longitude_deg:.4}")
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Draws star charts with a fixed layout, palette and font book.
///
/// Holds only immutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct StarChartRenderer {
    geometry: ChartGeometry,
    palette: ChartPalette,
    type_scale: TypeScale,
    fonts: FontBook,
}

impl StarChartRenderer {
    pub fn new(geometry: ChartGeometry, palette: ChartPalette, fonts: FontBook) -> Self {
        Self {
            geometry,
            palette,
            type_scale: TypeScale::default(),
            fonts,
        }
    }

    /// Default layout and palette with a specific font book.
    pub fn with_fonts(fonts: FontBook) -> Self {
        Self::new(ChartGeometry::default(), ChartPalette::default(), fonts)
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn palette(&self) -> &ChartPalette {
        &self.palette
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn projection(&self) -> PolarProjection {
        PolarProjection::from_geometry(&self.geometry)
    }

    /// Build a request from a star resolution; degraded resolutions draw no stars.
    pub fn request_for(
        &self,
        resolution: &Resolution,
        title: &str,
        caption: Option<&str>,
        footer: impl Into<String>,
    ) -> ChartRequest {
        let stars = self.projection().project_all(resolution.stars());
        ChartRequest::new(title, caption, footer, stars)
    }

    /// SVG source for the chart overlay (everything except the background fill).
    pub fn compose_svg(&self, chart: &ChartRequest) -> SvgDocument {
        let g = &self.geometry;
        let p = &self.palette;
        let family = self.fonts.family();
        let projection = self.projection();

        let mut doc = SvgDocument::new(g.width, g.height);
        let centered = |size: f64, fill: Rgb<u8>| TextStyle {
            font_family: family,
            font_size: size,
            fill,
            anchor: TextAnchor::Middle,
            baseline: Baseline::Central,
        };

        doc.text(
            g.center_x,
            g.title_y,
            &chart.title,
            &centered(self.type_scale.title, p.title),
        );

        doc.circle_outline(
            g.center_x,
            g.center_y,
            g.radius,
            p.horizon_ring,
            HORIZON_STROKE_PX,
        );
        for altitude in ALTITUDE_RINGS_DEG {
            doc.circle_outline(
                g.center_x,
                g.center_y,
                projection.radius_for_altitude(altitude),
                p.altitude_ring,
                ALTITUDE_STROKE_PX,
            );
        }

        let cardinal_style = centered(self.type_scale.caption, p.cardinal);
        for (label, azimuth) in CARDINALS {
            let at = projection.at_distance(g.radius + CARDINAL_OFFSET_PX, azimuth);
            doc.text(at.x, at.y, label, &cardinal_style);
        }

        let label_style = TextStyle {
            font_family: family,
            font_size: self.type_scale.label,
            fill: p.star_label,
            anchor: TextAnchor::Start,
            baseline: Baseline::Alphabetic,
        };
        let (dx, dy) = STAR_LABEL_OFFSET_PX;
        for star in &chart.stars {
            let at = star.position;
            doc.circle_filled(at.x, at.y, STAR_DOT_RADIUS_PX, p.star_dot);
            doc.text(at.x + dx, at.y + dy, &star.name, &label_style);
        }

        doc.text(
            g.center_x,
            g.footer_y,
            &chart.footer,
            &centered(self.type_scale.caption, p.footer),
        );

        if let Some(caption) = &chart.caption {
            doc.text(
                g.center_x,
                g.caption_y,
                caption,
                &centered(self.type_scale.caption, p.caption),
            );
        }

        doc
    }

    /// Draw the chart onto a fresh canvas.
    pub fn render(&self, chart: &ChartRequest) -> Result<RgbImage> {
        let svg = self.compose_svg(chart).finish();
        let tree = usvg::Tree::from_str(&svg, &self.fonts.svg_options())
            .map_err(|e| ChartError::Svg(e.to_string()))?;

        let (width, height) = (self.geometry.width, self.geometry.height);
        let mut pixmap = Pixmap::new(width, height).ok_or(ChartError::Canvas { width, height })?;

        let [r, g, b] = self.palette.background.0;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        log::debug!(
            "Rendered {}x{} chart with {} stars",
            width,
            height,
            chart.stars.len()
        );

        Ok(pixmap_to_rgb(&pixmap))
    }

    /// Draw and encode the chart as PNG bytes.
    pub fn render_png(&self, chart: &ChartRequest) -> Result<Vec<u8>> {
        let canvas = self.render(chart)?;
        encode_png(&canvas)
    }

    /// Project a resolution and render it straight to PNG bytes.
    pub fn render_sky(
        &self,
        resolution: &Resolution,
        title: &str,
        caption: Option<&str>,
        footer: impl Into<String>,
    ) -> Result<Vec<u8>> {
        let chart = self.request_for(resolution, title, caption, footer);
        self.render_png(&chart)
    }
}

impl Default for StarChartRenderer {
    fn default() -> Self {
        Self::with_fonts(FontBook::default())
    }
}

fn pixmap_to_rgb(pixmap: &Pixmap) -> RgbImage {
    let mut img = RgbImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgb([c.red(), c.green(), c.blue()]);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PixelPoint;
    use ephemeris::{EphemerisError, VisibleStar};

    fn renderer() -> StarChartRenderer {
        StarChartRenderer::with_fonts(FontBook::system())
    }

    fn star(name: &str, x: f64, y: f64) -> ProjectedStar {
        ProjectedStar {
            name: name.to_string(),
            position: PixelPoint { x, y },
        }
    }

    #[test]
    fn test_footer_format() {
        assert_eq!(
            footer_text("2023-07-14", "21:30", 32.0853, 34.7818),
            "2023-07-14 21:30  •  lat 32.0853, lon 34.7818"
        );
        assert_eq!(
            footer_text("2000-01-01", "0:00", -33.9, 151.21),
            "2000-01-01 0:00  •  lat -33.9000, lon 151.2100"
        );
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("✨✨✨", 2), "✨✨");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_request_clips_title_and_caption() {
        let long = "x".repeat(300);
        let req = ChartRequest::new(&long, Some(long.as_str()), "f", Vec::new());
        assert_eq!(req.title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(req.caption.unwrap().chars().count(), MAX_CAPTION_CHARS);
    }

    #[test]
    fn test_blank_caption_dropped() {
        assert_eq!(ChartRequest::new("t", Some("   "), "f", vec![]).caption, None);
        assert_eq!(ChartRequest::new("t", None, "f", vec![]).caption, None);
    }

    #[test]
    fn test_frame_elements_present() {
        let req = ChartRequest::new("The sky when we met", None, "footer", vec![]);
        let doc = renderer().compose_svg(&req);

        // horizon + five altitude rings
        assert_eq!(doc.count_elements("circle"), 6);
        // title + four cardinals + footer
        assert_eq!(doc.count_elements("text"), 6);

        let svg = doc.finish();
        for label in [">N<", ">E<", ">S<", ">W<"] {
            assert!(svg.contains(label), "missing cardinal {label}");
        }
    }

    #[test]
    fn test_stars_and_caption_add_elements() {
        let stars = vec![star("Vega", 600.0, 700.0), star("Deneb", 650.0, 650.0)];
        let req = ChartRequest::new("t", Some("Under this sky"), "f", stars);
        let doc = renderer().compose_svg(&req);

        assert_eq!(doc.count_elements("circle"), 6 + 2);
        assert_eq!(doc.count_elements("text"), 6 + 2 + 1);

        let svg = doc.finish();
        assert!(svg.contains(">Vega<") && svg.contains(">Deneb<"));
        assert!(svg.contains(">Under this sky<"));
    }

    #[test]
    fn test_caption_drawn_last() {
        let req = ChartRequest::new("t", Some("CAPTION"), "FOOTER", vec![star("A", 1.0, 1.0)]);
        let svg = renderer().compose_svg(&req).finish();
        let footer_at = svg.find(">FOOTER<").unwrap();
        let caption_at = svg.find(">CAPTION<").unwrap();
        let star_at = svg.find(">A<").unwrap();
        assert!(star_at < footer_at && footer_at < caption_at);
    }

    #[test]
    fn test_degraded_resolution_draws_no_stars() {
        let degraded = Resolution::Degraded(EphemerisError::LatitudeOutOfRange(200.0));
        let req = renderer().request_for(&degraded, "t", None, "f");
        assert!(req.stars.is_empty());
    }

    #[test]
    fn test_request_for_projects_resolved_stars() {
        let resolved = Resolution::Resolved(vec![VisibleStar {
            name: "Zenith".to_string(),
            altitude_deg: 90.0,
            azimuth_deg: 12.0,
        }]);
        let r = renderer();
        let req = r.request_for(&resolved, "t", None, "f");
        assert_eq!(req.stars.len(), 1);
        assert_eq!(req.stars[0].position.x, r.geometry().center_x);
        assert_eq!(req.stars[0].position.y, r.geometry().center_y);
    }

    #[test]
    fn test_render_canvas_size_and_background() {
        let r = renderer();
        let img = r
            .render(&ChartRequest::new("t", None, "f", vec![]))
            .unwrap();
        assert_eq!(img.dimensions(), (1200, 1600));
        assert_eq!(*img.get_pixel(2, 2), r.palette().background);
        assert_eq!(*img.get_pixel(1197, 1597), r.palette().background);
    }

    #[test]
    fn test_star_dot_painted_at_projection() {
        let r = renderer();
        let p = r.projection().project(45.0, 135.0);
        let img = r
            .render(&ChartRequest::new("t", None, "f", vec![star("X", p.x, p.y)]))
            .unwrap();
        let pixel = img.get_pixel(p.x.floor() as u32, p.y.floor() as u32);
        assert_eq!(*pixel, r.palette().star_dot);
    }

    #[test]
    fn test_star_name_sits_right_of_and_above_dot() {
        let r = renderer();
        let chart = ChartRequest::new("t", None, "f", vec![star("Vega", 600.0, 800.0)]);
        let svg = r.compose_svg(&chart).finish();
        assert!(svg.contains(r#"<text x="610.000" y="798.000""#), "{svg}");
    }
}
