use crate::{
    constants::{
        DEFAULT_CITIES_CSV, DEFAULT_COMPANIES_CSV, DEFAULT_DPI, DEFAULT_OUTPUT, FIGURE_HEIGHT_IN,
        FIGURE_WIDTH_IN, LINE_CHART_ROWS, MAX_CANVAS_PIXELS, MAX_DPI, PIE_CHART_ROWS, POINTS_PER_INCH,
    },
    error::{InfographicError, Result},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub charts: ChartsConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub companies_csv: PathBuf,
    pub cities_csv: PathBuf,
    /// GeoJSON with country boundaries. A graticule is drawn when unset.
    pub world_boundaries: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            companies_csv: PathBuf::from(DEFAULT_COMPANIES_CSV),
            cities_csv: PathBuf::from(DEFAULT_CITIES_CSV),
            world_boundaries: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
    /// Optional JSON summary of the charted numbers
    pub summary: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            dpi: DEFAULT_DPI,
            width_in: FIGURE_WIDTH_IN,
            height_in: FIGURE_HEIGHT_IN,
            summary: None,
        }
    }
}

impl OutputConfig {
    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Pixels per typographic point
    pub fn px_per_pt(&self) -> f64 {
        self.dpi as f64 / POINTS_PER_INCH
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Rows taken from the head of the company list for the valuation line chart
    pub line_rows: usize,
    /// Rows taken from the head of the company list for the country pie chart
    pub pie_rows: usize,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            line_rows: LINE_CHART_ROWS,
            pie_rows: PIE_CHART_ROWS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    /// Explicit TTF/OTF file; system fonts are searched when unset
    pub font_path: Option<PathBuf>,
    pub author: String,
    pub title: String,
    pub industry_bar_title: String,
    pub city_map_title: String,
    pub valuation_line_title: String,
    pub country_pie_title: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            author: "Prepared with unicorn-infographic".to_string(),
            title: "Infographics of Top Unicorn Companies Analysis".to_string(),
            industry_bar_title: "Bar chart showing top unicorn companies percentage in various industries".to_string(),
            city_map_title: "Map graph showing geographical city distribution of top unicorn companies".to_string(),
            valuation_line_title: "Line graph showing valuations of the top unicorn companies in billions".to_string(),
            country_pie_title: "Pie graph showing country-wise distribution of top unicorn companies".to_string(),
        }
    }
}

impl Config {
    /// Load and validate a TOML configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            InfographicError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let output = &self.output;
        if output.dpi == 0 || output.dpi > MAX_DPI {
            return Err(InfographicError::Config(format!(
                "dpi must be between 1 and {}, got {}",
                MAX_DPI, output.dpi
            )));
        }

        if !(output.width_in.is_finite()
            && output.height_in.is_finite()
            && output.width_in > 0.0
            && output.height_in > 0.0)
        {
            return Err(InfographicError::Config(format!(
                "figure size must be positive, got {}x{} in",
                output.width_in, output.height_in
            )));
        }

        let dpi = output.dpi as f64;
        let pixels = (output.width_in * dpi).round() * (output.height_in * dpi).round();
        if pixels > MAX_CANVAS_PIXELS as f64 {
            return Err(InfographicError::Config(format!(
                "figure of {}x{} in at {} dpi exceeds {} pixels",
                output.width_in, output.height_in, output.dpi, MAX_CANVAS_PIXELS
            )));
        }

        let (w, h) = output.pixel_size();
        if w < 4 || h < 4 {
            return Err(InfographicError::Config(format!(
                "figure is too small to draw: {}x{} px",
                w, h
            )));
        }

        if self.charts.line_rows == 0 || self.charts.pie_rows == 0 {
            return Err(InfographicError::Config(
                "line_rows and pie_rows must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
