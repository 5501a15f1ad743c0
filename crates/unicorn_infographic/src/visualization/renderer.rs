use crate::error::{InfographicError, Result};
use crate::visualization::colors::Colors;

use ab_glyph::{FontVec, PxScale};
use font_kit::{
    family_name::FamilyName,
    properties::{Properties, Weight},
    source::SystemSource,
};
use image::{Rgba, RgbaImage, imageops};
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut,
        draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size,
    },
    geometric_transformations::{Interpolation, rotate_about_center},
    point::Point,
    rect::Rect,
};
use itertools::Itertools;
use log::{debug, warn};
use std::path::Path;

/// Horizontal anchor of a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

impl HAlign {
    fn factor(self) -> f64 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => 0.5,
            HAlign::Right => 1.0,
        }
    }
}

/// Vertical anchor of a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

impl VAlign {
    fn factor(self) -> f64 {
        match self {
            VAlign::Top => 0.0,
            VAlign::Center => 0.5,
            VAlign::Bottom => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f64,
    pub color: Rgba<u8>,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size_pt: f64, color: Rgba<u8>) -> Self {
        Self {
            size_pt,
            color,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Regular and bold faces. Either may be missing.
#[derive(Default)]
pub struct FontSet {
    regular: Option<FontVec>,
    bold: Option<FontVec>,
}

impl FontSet {
    /// No fonts; text calls become no-ops
    pub fn none() -> Self {
        Self::default()
    }

    /// Load fonts from an explicit file, or from the system when no file is given
    pub fn load(font_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = font_path {
            let bytes = std::fs::read(path).map_err(|e| {
                InfographicError::Font(format!("Failed to read font '{}': {}", path.display(), e))
            })?;
            let font = FontVec::try_from_vec(bytes).map_err(|e| {
                InfographicError::Font(format!("Invalid font '{}': {}", path.display(), e))
            })?;
            return Ok(Self {
                regular: Some(font),
                bold: None,
            });
        }

        let regular = load_system_font(Weight::NORMAL);
        let bold = load_system_font(Weight::BOLD);
        if regular.is_none() {
            warn!("No usable system font found; text will be left out of the image");
        }
        Ok(Self { regular, bold })
    }

    fn get(&self, bold: bool) -> Option<&FontVec> {
        if bold {
            self.bold.as_ref().or(self.regular.as_ref())
        } else {
            self.regular.as_ref()
        }
    }
}

/// Look up a sans-serif system font with the given weight
fn load_system_font(weight: Weight) -> Option<FontVec> {
    let source = SystemSource::new();
    let mut properties = Properties::new();
    properties.weight(weight);

    let font_families = [
        FamilyName::Title("DejaVu Sans".to_string()),
        FamilyName::Title("Arial".to_string()),
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::SansSerif,
    ];

    for family in font_families {
        if let Ok(handle) = source.select_best_match(&[family], &properties)
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            debug!("Loaded system font {}", font_kit_font.full_name());
            return Some(font);
        }
    }
    None
}

/// Figure canvas. Coordinates are pixels with the origin at the top-left.
pub struct Renderer {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
    px_per_pt: f64,
    fonts: FontSet,
}

impl Renderer {
    /// White canvas of the given size
    pub fn new(width: u32, height: u32, px_per_pt: f64, fonts: FontSet) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Colors::WHITE),
            width,
            height,
            px_per_pt,
            fonts,
        }
    }

    /// Typographic points to pixels
    pub fn pt(&self, points: f64) -> f64 {
        points * self.px_per_pt
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
        let rect = Rect::at(x.round() as i32, y.round() as i32)
            .of_size(width.round().max(1.0) as u32, height.round().max(1.0) as u32);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    pub fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba<u8>,
        line_width: f64,
    ) {
        if line_width <= 1.5 {
            let rect = Rect::at(x.round() as i32, y.round() as i32)
                .of_size(width.round().max(1.0) as u32, height.round().max(1.0) as u32);
            draw_hollow_rect_mut(&mut self.image, rect, color);
            return;
        }
        let half = line_width / 2.0;
        self.fill_rect(x - half, y - half, width + line_width, line_width, color);
        self.fill_rect(x - half, y + height - half, width + line_width, line_width, color);
        self.fill_rect(x - half, y - half, line_width, height + line_width, color);
        self.fill_rect(x + width - half, y - half, line_width, height + line_width, color);
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba<u8>, line_width: f64) {
        if line_width <= 1.5 {
            draw_line_segment_mut(
                &mut self.image,
                (from.0 as f32, from.1 as f32),
                (to.0 as f32, to.1 as f32),
                color,
            );
            return;
        }

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = dx.hypot(dy);
        if len < f64::EPSILON {
            self.fill_circle(from, line_width / 2.0, color);
            return;
        }
        // normal offset of half the stroke width
        let nx = -dy / len * line_width / 2.0;
        let ny = dx / len * line_width / 2.0;
        self.fill_polygon(
            &[
                (from.0 + nx, from.1 + ny),
                (to.0 + nx, to.1 + ny),
                (to.0 - nx, to.1 - ny),
                (from.0 - nx, from.1 - ny),
            ],
            color,
        );
    }

    /// Connected line through `points` with round joins
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Rgba<u8>, line_width: f64) {
        for (a, b) in points.iter().tuple_windows() {
            self.line(*a, *b, color, line_width);
        }
        if line_width > 1.5 {
            for p in points.iter().skip(1).take(points.len().saturating_sub(2)) {
                self.fill_circle(*p, line_width / 2.0, color);
            }
        }
    }

    pub fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba<u8>) {
        draw_filled_circle_mut(
            &mut self.image,
            (center.0.round() as i32, center.1.round() as i32),
            radius.round().max(0.0) as i32,
            color,
        );
    }

    /// Circle marker with an outline of `edge_width` pixels
    pub fn marker(
        &mut self,
        center: (f64, f64),
        radius: f64,
        fill: Rgba<u8>,
        edge: Rgba<u8>,
        edge_width: f64,
    ) {
        self.fill_circle(center, radius + edge_width / 2.0, edge);
        self.fill_circle(center, (radius - edge_width / 2.0).max(0.0), fill);
    }

    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgba<u8>) {
        let mut poly: Vec<Point<i32>> = points
            .iter()
            .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
            .dedup()
            .collect();
        // imageproc rejects explicitly closed polygons
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }

        match poly.len() {
            0 => {}
            1 | 2 => {
                let a = poly[0];
                let b = poly[poly.len() - 1];
                draw_line_segment_mut(
                    &mut self.image,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    color,
                );
            }
            _ => draw_polygon_mut(&mut self.image, &poly, color),
        }
    }

    fn scale(&self, style: &TextStyle) -> PxScale {
        PxScale::from(self.pt(style.size_pt).max(1.0) as f32)
    }

    /// Size of the rendered text in pixels. Estimated when no font is loaded.
    pub fn text_size(&self, text: &str, style: &TextStyle) -> (f64, f64) {
        match self.fonts.get(style.bold) {
            Some(font) => {
                let (w, h) = text_size(self.scale(style), font, text);
                (w as f64, h as f64)
            }
            None => {
                let px = self.pt(style.size_pt);
                (px * 0.55 * text.chars().count() as f64, px)
            }
        }
    }

    /// Draw text anchored at (x, y)
    pub fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        halign: HAlign,
        valign: VAlign,
    ) {
        if text.is_empty() {
            return;
        }
        let (w, h) = self.text_size(text, style);
        let scale = self.scale(style);
        let Some(font) = self.fonts.get(style.bold) else {
            return;
        };

        let left = x - w * halign.factor();
        let top = y - h * valign.factor();
        draw_text_mut(
            &mut self.image,
            style.color,
            left.round() as i32,
            top.round() as i32,
            scale,
            font,
            text,
        );
    }

    /// Draw text rotated counter-clockwise by `angle_deg`.
    ///
    /// The anchor refers to the bounding box of the rotated text.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_rotated(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        angle_deg: f64,
        halign: HAlign,
        valign: VAlign,
    ) {
        if text.is_empty() {
            return;
        }
        let (tw, th) = self.text_size(text, style);
        let scale = self.scale(style);
        let Some(font) = self.fonts.get(style.bold) else {
            return;
        };
        if tw < 1.0 || th < 1.0 {
            return;
        }

        let side = (tw.hypot(th).ceil() as u32) + 2;
        let [r, g, b, _] = style.color.0;
        let clear = Rgba([r, g, b, 0]);
        let mut layer = RgbaImage::from_pixel(side, side, clear);
        draw_text_mut(
            &mut layer,
            style.color,
            ((side as f64 - tw) / 2.0).round() as i32,
            ((side as f64 - th) / 2.0).round() as i32,
            scale,
            font,
            text,
        );

        let theta = angle_deg.to_radians();
        // imageproc rotates clockwise
        let rotated = rotate_about_center(&layer, -theta as f32, Interpolation::Bilinear, clear);

        let (sin, cos) = theta.sin_cos();
        let box_w = tw * cos.abs() + th * sin.abs();
        let box_h = tw * sin.abs() + th * cos.abs();
        let left = x - box_w * halign.factor() - (side as f64 - box_w) / 2.0;
        let top = y - box_h * valign.factor() - (side as f64 - box_h) / 2.0;

        imageops::overlay(
            &mut self.image,
            &rotated,
            left.round() as i64,
            top.round() as i64,
        );
    }

    /// Text centered on (x, y) over a filled box
    pub fn draw_text_boxed(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        fill: Rgba<u8>,
        padding: f64,
    ) {
        let (w, h) = self.text_size(text, style);
        self.fill_rect(
            x - w / 2.0 - padding,
            y - h / 2.0 - padding,
            w + padding * 2.0,
            h + padding * 2.0,
            fill,
        );
        self.draw_text(x, y, text, style, HAlign::Center, VAlign::Center);
    }

    /// Greedy word wrap to `max_width` pixels
    pub fn wrap_text(&self, text: &str, style: &TextStyle, max_width: f64) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if current.is_empty() || self.text_size(&candidate, style).0 <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Write the canvas to disk; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save(path)
            .map_err(|source| InfographicError::WriteImage {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> Renderer {
        Renderer::new(width, height, 1.0, FontSet::none())
    }

    #[test]
    fn test_new_canvas_is_white() {
        let renderer = blank(20, 10);
        assert_eq!(renderer.image.dimensions(), (20, 10));
        assert_eq!(renderer.pixel(0, 0), Colors::WHITE);
        assert_eq!(renderer.pixel(19, 9), Colors::WHITE);
    }

    #[test]
    fn test_fill_rect_and_clipping() {
        let mut renderer = blank(20, 20);
        renderer.fill_rect(5.0, 5.0, 4.0, 4.0, Colors::RED);
        assert_eq!(renderer.pixel(6, 6), Colors::RED);
        assert_eq!(renderer.pixel(10, 10), Colors::WHITE);

        // partly and fully outside the canvas
        renderer.fill_rect(-5.0, -5.0, 8.0, 8.0, Colors::BLUE);
        renderer.fill_rect(100.0, 100.0, 8.0, 8.0, Colors::BLUE);
        assert_eq!(renderer.pixel(0, 0), Colors::BLUE);
    }

    #[test]
    fn test_thick_line_covers_its_width() {
        let mut renderer = blank(40, 40);
        renderer.line((5.0, 20.0), (35.0, 20.0), Colors::BLACK, 6.0);
        assert_eq!(renderer.pixel(20, 18), Colors::BLACK);
        assert_eq!(renderer.pixel(20, 22), Colors::BLACK);
        assert_eq!(renderer.pixel(20, 27), Colors::WHITE);
    }

    #[test]
    fn test_degenerate_polygons_do_not_panic() {
        let mut renderer = blank(10, 10);
        renderer.fill_polygon(&[], Colors::BLACK);
        renderer.fill_polygon(&[(1.0, 1.0)], Colors::BLACK);
        renderer.fill_polygon(&[(1.0, 1.0), (1.2, 1.1), (1.0, 1.0)], Colors::BLACK);
        renderer.fill_polygon(&[(1.0, 1.0), (8.0, 1.0), (8.0, 8.0), (1.0, 1.0)], Colors::BLACK);
        assert_eq!(renderer.pixel(7, 3), Colors::BLACK);
    }

    #[test]
    fn test_marker_has_edge_and_fill() {
        let mut renderer = blank(40, 40);
        renderer.marker((20.0, 20.0), 8.0, Colors::SALMON, Colors::BLACK, 2.0);
        assert_eq!(renderer.pixel(20, 20), Colors::SALMON);
        assert_eq!(renderer.pixel(28, 20), Colors::BLACK);
        assert_eq!(renderer.pixel(35, 20), Colors::WHITE);
    }

    #[test]
    fn test_text_without_font_is_estimated_and_skipped() {
        let mut renderer = blank(50, 50);
        let style = TextStyle::new(10.0, Colors::BLACK);
        let (w, h) = renderer.text_size("abcd", &style);
        assert!((w - 22.0).abs() < 1e-9);
        assert_eq!(h, 10.0);

        renderer.draw_text(25.0, 25.0, "abcd", &style, HAlign::Center, VAlign::Center);
        renderer.draw_text_rotated(25.0, 25.0, "abcd", &style, 45.0, HAlign::Right, VAlign::Top);
        assert!(renderer.image.pixels().all(|p| *p == Colors::WHITE));
    }

    #[test]
    fn test_wrap_text() {
        let renderer = blank(10, 10);
        let style = TextStyle::new(10.0, Colors::BLACK);
        // 5.5 px per char without a font
        let lines = renderer.wrap_text("aaaa bbbb cccc", &style, 60.0);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
        assert!(renderer.wrap_text("", &style, 60.0).is_empty());
        // an over-long word still gets its own line
        assert_eq!(renderer.wrap_text("abcdefghijklmnop", &style, 20.0).len(), 1);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("canvas.png");
        let renderer = blank(8, 8);
        renderer.save(&path).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.width(), 8);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("canvas.png");
        let result = blank(8, 8).save(&path);
        assert!(matches!(result, Err(InfographicError::WriteImage { .. })));
    }

    #[test]
    fn test_explicit_font_path_errors() {
        let result = FontSet::load(Some(Path::new("nonexistent/font.ttf")));
        assert!(matches!(result, Err(InfographicError::Font(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not a font").unwrap();
        let result = FontSet::load(Some(file.path()));
        assert!(matches!(result, Err(InfographicError::Font(_))));
    }
}
