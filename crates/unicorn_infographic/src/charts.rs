pub mod bar;
pub mod line;
pub mod map;
pub mod pie;

pub use bar::{IndustryShare, industry_shares, render_industry_bar_chart};
pub use line::{ValuationPoint, render_valuation_line_chart, valuation_series};
pub use map::render_city_map;
pub use pie::{CountryShare, country_shares, render_country_pie_chart};

use strum_macros::{Display, EnumIter};

/// The four charts of the infographic, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ChartKind {
    IndustryBar,
    CityMap,
    ValuationLine,
    CountryPie,
}

impl ChartKind {
    /// (row, column) of the chart in the 2x2 grid
    pub fn grid_cell(self) -> (usize, usize) {
        match self {
            ChartKind::IndustryBar => (0, 0),
            ChartKind::CityMap => (0, 1),
            ChartKind::ValuationLine => (1, 0),
            ChartKind::CountryPie => (1, 1),
        }
    }
}
