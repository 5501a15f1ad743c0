use crate::charts::{
    ChartKind, render_city_map, render_country_pie_chart, render_industry_bar_chart,
    render_valuation_line_chart,
};
use crate::config::Config;
use crate::constants::{AUTHOR_CAPTION_POS, CAPTION_BAND, CAPTION_PT, PANEL_TITLE_PT, TITLE_CAPTION_POS};
use crate::csv_reader::CompanyRecord;
use crate::error::Result;
use crate::resolver::CityResolution;
use crate::visualization::{Colors, FontSet, HAlign, Panel, Renderer, TextStyle, VAlign};
use crate::world::WorldBoundaries;

use log::{debug, info};
use strum::IntoEnumIterator;

/// Everything the four charts draw from
#[derive(Debug, Clone, Copy)]
pub struct ChartData<'a> {
    pub companies: &'a [CompanyRecord],
    pub resolution: &'a CityResolution,
    pub world: Option<&'a WorldBoundaries>,
}

/// Pixel rectangles of the figure: a caption band on top and a 2x2 chart grid below
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub caption_band: Panel,
    cells: [Panel; 4],
}

impl FigureLayout {
    pub fn new(width: u32, height: u32, gap: f64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let band = h * CAPTION_BAND;
        let cell_w = w / 2.0;
        let cell_h = (h - band) / 2.0;

        let cells = [(0, 0), (0, 1), (1, 0), (1, 1)].map(|(row, col): (usize, usize)| {
            Panel::new(
                col as f64 * cell_w + gap,
                band + row as f64 * cell_h + gap,
                cell_w - gap * 2.0,
                cell_h - gap * 2.0,
            )
        });

        Self {
            caption_band: Panel::new(0.0, 0.0, w, band),
            cells,
        }
    }

    pub fn cell(&self, kind: ChartKind) -> Panel {
        let (row, col) = kind.grid_cell();
        self.cells[row * 2 + col]
    }
}

/// Lays the four charts and the captions out on one canvas
pub struct Composer<'a> {
    config: &'a Config,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Draw the full infographic into a new canvas
    pub fn render(&self, data: &ChartData<'_>, fonts: FontSet) -> Result<Renderer> {
        self.config.validate()?;
        let output = &self.config.output;
        let (width, height) = output.pixel_size();
        info!(
            "Rendering {}x{} px canvas ({}x{} in at {} dpi)",
            width, height, output.width_in, output.height_in, output.dpi
        );

        let mut renderer = Renderer::new(width, height, output.px_per_pt(), fonts);
        let layout = FigureLayout::new(width, height, renderer.pt(20.0));

        for kind in ChartKind::iter() {
            let cell = layout.cell(kind);
            let panel = self.draw_panel_title(&mut renderer, &cell, self.panel_title(kind));
            debug!("Drawing {} into {:?}", kind, panel);

            match kind {
                ChartKind::IndustryBar => render_industry_bar_chart(&mut renderer, &panel, data.companies)?,
                ChartKind::CityMap => {
                    render_city_map(&mut renderer, &panel, &data.resolution.resolved, data.world)?
                }
                ChartKind::ValuationLine => render_valuation_line_chart(
                    &mut renderer,
                    &panel,
                    data.companies,
                    self.config.charts.line_rows,
                )?,
                ChartKind::CountryPie => render_country_pie_chart(
                    &mut renderer,
                    &panel,
                    data.companies,
                    self.config.charts.pie_rows,
                )?,
            }
        }

        self.draw_captions(&mut renderer);
        Ok(renderer)
    }

    fn panel_title(&self, kind: ChartKind) -> &str {
        let text = &self.config.text;
        match kind {
            ChartKind::IndustryBar => text.industry_bar_title.as_str(),
            ChartKind::CityMap => text.city_map_title.as_str(),
            ChartKind::ValuationLine => text.valuation_line_title.as_str(),
            ChartKind::CountryPie => text.country_pie_title.as_str(),
        }
    }

    /// Draws the wrapped title at the top of `cell` and returns the space left below it
    fn draw_panel_title(&self, renderer: &mut Renderer, cell: &Panel, title: &str) -> Panel {
        let style = TextStyle::new(PANEL_TITLE_PT, Colors::BLUE).bold();
        let line_height = renderer.pt(PANEL_TITLE_PT) * 1.25;

        let lines = renderer.wrap_text(title, &style, cell.width);
        let (cx, _) = cell.center();
        for (i, line) in lines.iter().enumerate() {
            renderer.draw_text(
                cx,
                cell.y + i as f64 * line_height,
                line,
                &style,
                HAlign::Center,
                VAlign::Top,
            );
        }

        let used = lines.len() as f64 * line_height + renderer.pt(10.0);
        cell.inset(0.0, used, 0.0, 0.0)
    }

    fn draw_captions(&self, renderer: &mut Renderer) {
        let style = TextStyle::new(CAPTION_PT, Colors::WHITE).bold();
        let padding = renderer.pt(12.0);
        let (w, h) = (renderer.width as f64, renderer.height as f64);

        for (text, (fx, fy)) in [
            (&self.config.text.author, AUTHOR_CAPTION_POS),
            (&self.config.text.title, TITLE_CAPTION_POS),
        ] {
            if text.is_empty() {
                continue;
            }
            // figure fractions grow upwards
            renderer.draw_text_boxed(fx * w, (1.0 - fy) * h, text, &style, Colors::RED, padding);
        }
    }
}
