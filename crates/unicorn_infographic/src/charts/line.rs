use crate::constants::{AXIS_LABEL_PT, LINE_TICK_LABEL_PT, TICK_LABEL_PT};
use crate::csv_reader::CompanyRecord;
use crate::error::Result;
use crate::visualization::{
    Colors, HAlign, LinearScale, Panel, Renderer, TextStyle, VAlign,
    axes::{self, max_label_width},
    nice_ticks,
    panel::format_tick,
};

use log::debug;
use serde::Serialize;

/// One point of the valuation line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationPoint {
    pub company: String,
    pub valuation_billions: f64,
}

/// The first `rows` companies of the list, sorted ascending by valuation.
///
/// The cap is positional: a huge valuation further down the list is not
/// picked up. The sort is stable, so equal valuations keep list order.
pub fn valuation_series(companies: &[CompanyRecord], rows: usize) -> Vec<ValuationPoint> {
    let mut points: Vec<ValuationPoint> = companies
        .iter()
        .take(rows)
        .map(|c| ValuationPoint {
            company: c.company.clone(),
            valuation_billions: c.valuation_billions,
        })
        .collect();
    points.sort_by(|a, b| a.valuation_billions.total_cmp(&b.valuation_billions));
    points
}

/// Company names on the vertical axis, valuation along the horizontal one
pub fn render_valuation_line_chart(
    renderer: &mut Renderer,
    panel: &Panel,
    companies: &[CompanyRecord],
    rows: usize,
) -> Result<()> {
    let series = valuation_series(companies, rows);

    let name_style = TextStyle::new(LINE_TICK_LABEL_PT, Colors::BLACK);
    let tick_style = TextStyle::new(TICK_LABEL_PT, Colors::BLACK);
    let xlabel_style = TextStyle::new(AXIS_LABEL_PT, Colors::RED);
    let ylabel_style = TextStyle::new(AXIS_LABEL_PT, Colors::RED).bold();
    let pad = renderer.pt(8.0);

    let (lo, hi) = series
        .iter()
        .map(|p| p.valuation_billions)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0));
    let margin = ((hi - lo) * 0.05).max(0.5);
    let domain = (lo - margin, hi + margin);
    let ticks = nice_ticks(domain.0, domain.1, 8);
    let step = ticks.get(1).zip(ticks.first()).map_or(1.0, |(b, a)| b - a);

    let names: Vec<String> = series.iter().map(|p| p.company.clone()).collect();
    let (_, tick_h) = renderer.text_size("0", &tick_style);
    let (_, xlabel_h) = renderer.text_size("Valuation (in billions)", &xlabel_style);
    let (_, ylabel_h) = renderer.text_size("Companies", &ylabel_style);
    let names_w = max_label_width(renderer, &names, &name_style);

    let left = names_w + ylabel_h + pad * 3.0;
    let bottom = tick_h + xlabel_h + pad * 3.0;
    let area = panel.inset(left, pad, pad * 2.0, bottom);

    renderer.fill_rect(area.x, area.y, area.width, area.height, Colors::LINE_BG);
    let x_scale = LinearScale::new(domain, (area.x, area.right()));
    axes::draw_x_ticks(renderer, &area, &x_scale, &ticks, &tick_style, None);
    axes::draw_x_label(renderer, &area, "Valuation (in billions)", &xlabel_style, tick_h + pad * 2.0);
    axes::draw_y_label(renderer, &area, "Companies", &ylabel_style, names_w + pad * 2.0);

    if series.is_empty() {
        axes::draw_frame(renderer, &area, Colors::BLACK);
        axes::draw_placeholder(renderer, &area, &tick_style);
        return Ok(());
    }

    // one category row per point, first row at the bottom
    let slot = area.height / series.len() as f64;
    let row_y = |i: usize| area.bottom() - slot * (i as f64 + 0.5);

    let baseline_width = renderer.pt(0.5).max(1.0);
    renderer.line((area.x, row_y(0)), (area.right(), row_y(0)), Colors::BLACK, baseline_width);

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (x_scale.map(p.valuation_billions), row_y(i)))
        .collect();
    let line_width = renderer.pt(2.0).max(1.0);
    renderer.polyline(&points, Colors::BLUE, line_width);

    let radius = renderer.pt(4.0);
    for &point in &points {
        renderer.fill_circle(point, radius, Colors::BLUE);
    }

    let label_x = area.x - renderer.pt(6.0);
    for (i, name) in names.iter().enumerate() {
        renderer.draw_text(label_x, row_y(i), name, &name_style, HAlign::Right, VAlign::Center);
    }
    axes::draw_frame(renderer, &area, Colors::BLACK);

    debug!(
        "Valuation line: {} points from {} to {}",
        series.len(),
        format_tick(lo, step),
        format_tick(hi, step)
    );
    Ok(())
}
