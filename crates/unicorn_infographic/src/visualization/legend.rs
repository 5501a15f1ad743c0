use super::colors::Colors;
use super::renderer::{HAlign, Renderer, TextStyle, VAlign};

use image::Rgba;

/// One swatch + label row
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba<u8>,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: Rgba<u8>) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Boxed legend. Entries fill each column top to bottom before moving right.
#[derive(Debug, Clone)]
pub struct Legend {
    pub title: Option<String>,
    pub entries: Vec<LegendEntry>,
    pub columns: usize,
    pub style: TextStyle,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>, style: TextStyle) -> Self {
        Self {
            title: None,
            entries,
            columns: 1,
            style,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    fn rows(&self) -> usize {
        self.entries.len().div_ceil(self.columns)
    }

    fn row_height(&self, renderer: &Renderer) -> f64 {
        renderer.pt(self.style.size_pt) * 1.4
    }

    fn swatch(&self, renderer: &Renderer) -> f64 {
        renderer.pt(self.style.size_pt) * 1.4
    }

    fn padding(&self, renderer: &Renderer) -> f64 {
        renderer.pt(self.style.size_pt) * 0.5
    }

    fn column_width(&self, renderer: &Renderer) -> f64 {
        let widest = self
            .entries
            .iter()
            .map(|e| renderer.text_size(&e.label, &self.style).0)
            .fold(0.0, f64::max);
        self.swatch(renderer) + self.padding(renderer) + widest
    }

    /// Outer size in pixels
    pub fn measure(&self, renderer: &Renderer) -> (f64, f64) {
        let pad = self.padding(renderer);
        let row_h = self.row_height(renderer);
        let cols = self.columns.min(self.entries.len()).max(1);

        let mut width = cols as f64 * self.column_width(renderer) + (cols - 1) as f64 * pad * 2.0;
        let mut height = self.rows() as f64 * row_h;

        if let Some(title) = &self.title {
            let (tw, _) = renderer.text_size(title, &self.style);
            width = width.max(tw);
            height += row_h;
        }
        (width + pad * 2.0, height + pad * 2.0)
    }

    /// Draw with the top-left corner at (x, y)
    pub fn draw(&self, renderer: &mut Renderer, x: f64, y: f64) {
        if self.entries.is_empty() && self.title.is_none() {
            return;
        }

        let (w, h) = self.measure(renderer);
        let pad = self.padding(renderer);
        let row_h = self.row_height(renderer);
        let swatch = self.swatch(renderer);
        let col_w = self.column_width(renderer);
        let rows = self.rows();
        let edge = renderer.pt(0.8).max(1.0);

        renderer.fill_rect(x, y, w, h, Colors::WHITE);
        renderer.stroke_rect(x, y, w, h, Colors::LEGEND_EDGE, edge);

        let mut top = y + pad;
        if let Some(title) = &self.title {
            renderer.draw_text(
                x + w / 2.0,
                top + row_h / 2.0,
                title,
                &self.style,
                HAlign::Center,
                VAlign::Center,
            );
            top += row_h;
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let col = i / rows;
            let row = i % rows;
            let cell_x = x + pad + col as f64 * (col_w + pad * 2.0);
            let cell_y = top + row as f64 * row_h;
            let swatch_h = swatch * 0.7;

            renderer.fill_rect(
                cell_x,
                cell_y + (row_h - swatch_h) / 2.0,
                swatch,
                swatch_h,
                entry.color,
            );
            renderer.draw_text(
                cell_x + swatch + pad,
                cell_y + row_h / 2.0,
                &entry.label,
                &self.style,
                HAlign::Left,
                VAlign::Center,
            );
        }
    }
}
