pub mod charts;
pub mod compose;
pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod stats;
pub mod summary;
pub mod visualization;
pub mod world;

pub use charts::ChartKind;
pub use compose::{ChartData, Composer, FigureLayout};
pub use config::Config;
pub use constants::{COMPANY_HEADERS, CITY_COORD_HEADERS, LINE_CHART_ROWS, PIE_CHART_ROWS};
pub use csv_reader::{CityCoordinate, CompanyRecord, Datasets, load_datasets, parse_valuation};
pub use error::{InfographicError, Result};
pub use pipeline::{RunReport, run, run_with_fonts};
pub use resolver::{CityKey, CityResolution, ResolvedCompanyLocation, resolve_locations};
pub use summary::InfographicSummary;
pub use world::WorldBoundaries;
