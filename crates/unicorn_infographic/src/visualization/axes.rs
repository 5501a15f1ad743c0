use super::panel::{LinearScale, Panel, format_tick};
use super::renderer::{HAlign, Renderer, TextStyle, VAlign};

use image::Rgba;

/// Gap between an axis line and its tick labels (pt)
const TICK_PAD_PT: f64 = 6.0;

pub fn draw_frame(renderer: &mut Renderer, area: &Panel, color: Rgba<u8>) {
    let width = renderer.pt(0.8).max(1.0);
    renderer.stroke_rect(area.x, area.y, area.width, area.height, color, width);
}

/// Numeric y axis on the left edge of `area`, with optional horizontal grid lines
pub fn draw_y_ticks(
    renderer: &mut Renderer,
    area: &Panel,
    scale: &LinearScale,
    ticks: &[f64],
    style: &TextStyle,
    grid: Option<Rgba<u8>>,
) {
    let step = tick_step(ticks);
    let pad = renderer.pt(TICK_PAD_PT);
    let grid_width = renderer.pt(0.8).max(1.0);

    for &tick in ticks {
        let y = scale.map(tick);
        if y < area.y - 0.5 || y > area.bottom() + 0.5 {
            continue;
        }
        if let Some(color) = grid {
            renderer.line((area.x, y), (area.right(), y), color, grid_width);
        }
        renderer.draw_text(
            area.x - pad,
            y,
            &format_tick(tick, step),
            style,
            HAlign::Right,
            VAlign::Center,
        );
    }
}

/// Numeric x axis along the bottom edge of `area`, with optional vertical grid lines
pub fn draw_x_ticks(
    renderer: &mut Renderer,
    area: &Panel,
    scale: &LinearScale,
    ticks: &[f64],
    style: &TextStyle,
    grid: Option<Rgba<u8>>,
) {
    let step = tick_step(ticks);
    let pad = renderer.pt(TICK_PAD_PT);
    let grid_width = renderer.pt(0.8).max(1.0);

    for &tick in ticks {
        let x = scale.map(tick);
        if x < area.x - 0.5 || x > area.right() + 0.5 {
            continue;
        }
        if let Some(color) = grid {
            renderer.line((x, area.y), (x, area.bottom()), color, grid_width);
        }
        renderer.draw_text(
            x,
            area.bottom() + pad,
            &format_tick(tick, step),
            style,
            HAlign::Center,
            VAlign::Top,
        );
    }
}

/// Axis title centered under `area`, `offset` pixels below its bottom edge
pub fn draw_x_label(renderer: &mut Renderer, area: &Panel, text: &str, style: &TextStyle, offset: f64) {
    renderer.draw_text(
        area.x + area.width / 2.0,
        area.bottom() + offset,
        text,
        style,
        HAlign::Center,
        VAlign::Top,
    );
}

/// Axis title rotated 90°, centered left of `area`, `offset` pixels from its left edge
pub fn draw_y_label(renderer: &mut Renderer, area: &Panel, text: &str, style: &TextStyle, offset: f64) {
    renderer.draw_text_rotated(
        area.x - offset,
        area.y + area.height / 2.0,
        text,
        style,
        90.0,
        HAlign::Right,
        VAlign::Center,
    );
}

/// Marker for charts with nothing to plot
pub fn draw_placeholder(renderer: &mut Renderer, area: &Panel, style: &TextStyle) {
    let (cx, cy) = area.center();
    renderer.draw_text(cx, cy, "No data", style, HAlign::Center, VAlign::Center);
}

/// Widest tick label in pixels
pub fn max_label_width(renderer: &Renderer, labels: &[String], style: &TextStyle) -> f64 {
    labels
        .iter()
        .map(|l| renderer.text_size(l, style).0)
        .fold(0.0, f64::max)
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::colors::Colors;
    use crate::visualization::renderer::FontSet;

    #[test]
    fn test_grid_lines_follow_ticks() {
        let mut renderer = Renderer::new(100, 100, 1.0, FontSet::none());
        let area = Panel::new(20.0, 10.0, 70.0, 80.0);
        let scale = LinearScale::new((0.0, 10.0), (area.bottom(), area.y));
        let style = TextStyle::new(8.0, Colors::BLACK);

        draw_y_ticks(&mut renderer, &area, &scale, &[0.0, 5.0, 10.0, 20.0], &style, Some(Colors::GRID));
        // tick 5 sits halfway up
        assert_eq!(renderer.pixel(50, 50), Colors::GRID);
        assert_eq!(renderer.pixel(50, 45), Colors::WHITE);
    }

    #[test]
    fn test_frame() {
        let mut renderer = Renderer::new(50, 50, 1.0, FontSet::none());
        let area = Panel::new(10.0, 10.0, 30.0, 30.0);
        draw_frame(&mut renderer, &area, Colors::BLACK);
        assert_eq!(renderer.pixel(10, 20), Colors::BLACK);
        assert_eq!(renderer.pixel(25, 25), Colors::WHITE);
    }
}
