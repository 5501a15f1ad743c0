/// Company list headers
pub const COMPANY_HEADER: &str = "Company";
pub const VALUATION_HEADER: &str = "Valuation ($B)";
pub const COUNTRY_HEADER: &str = "Country";
pub const CITY_HEADER: &str = "City";
pub const INDUSTRY_HEADER: &str = "Industry";
pub const COMPANY_HEADERS: [&str; 5] = [
    COMPANY_HEADER,
    VALUATION_HEADER,
    COUNTRY_HEADER,
    CITY_HEADER,
    INDUSTRY_HEADER,
];

/// City coordinate headers
pub const CITY_COORD_HEADERS: [&str; 4] = ["city", "country", "lat", "lng"];

/// Default input/output locations
pub const DEFAULT_COMPANIES_CSV: &str = "World_Wide-Unicorn-Company-List.csv";
pub const DEFAULT_CITIES_CSV: &str = "worldcities.csv";
pub const DEFAULT_OUTPUT: &str = "infographic.png";

/// Head-of-table row caps (positional, not top-N by value)
pub const LINE_CHART_ROWS: usize = 30;
pub const PIE_CHART_ROWS: usize = 100;

/// Pie chart
pub const PIE_EXPLODE_THRESHOLD: f64 = 0.01; // fraction of total count
pub const PIE_EXPLODE_OFFSET: f64 = 0.1; // fraction of radius
pub const PIE_LABEL_MIN_PERCENT: f64 = 2.0;
pub const PIE_START_ANGLE_DEG: f64 = 140.0;
pub const PIE_LABEL_RADIUS: f64 = 0.6;

/// Figure (inch, dpi)
pub const FIGURE_WIDTH_IN: f64 = 40.0;
pub const FIGURE_HEIGHT_IN: f64 = 30.0;
pub const DEFAULT_DPI: u32 = 300;
pub const MAX_DPI: u32 = 1200;
/// RGBA canvas ceiling (pixels, about 800 MB)
pub const MAX_CANVAS_PIXELS: u64 = 200_000_000;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Caption anchors in normalized figure coordinates (y measured from the bottom)
pub const AUTHOR_CAPTION_POS: (f64, f64) = (0.75, 0.98);
pub const TITLE_CAPTION_POS: (f64, f64) = (0.75, 0.95);
/// Share of the figure height kept free for the captions
pub const CAPTION_BAND: f64 = 0.08;

/// Font sizes (pt)
pub const PANEL_TITLE_PT: f64 = 24.0;
pub const AXIS_LABEL_PT: f64 = 30.0;
pub const TICK_LABEL_PT: f64 = 24.0;
pub const LINE_TICK_LABEL_PT: f64 = 22.0;
pub const BAR_ANNOTATION_PT: f64 = 24.0;
pub const MAP_LEGEND_PT: f64 = 22.0;
pub const PIE_TEXT_PT: f64 = 30.0;
pub const CAPTION_PT: f64 = 50.0;

/// Map
pub const MAP_MARKER_AREA_PT2: f64 = 250.0;
pub const MAP_LEGEND_COLUMNS: usize = 3;
pub const GRATICULE_STEP_DEG: f64 = 30.0;
