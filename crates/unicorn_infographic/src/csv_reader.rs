use crate::config::InputConfig;
use crate::constants::{CITY_COORD_HEADERS, COMPANY_HEADERS};
use crate::error::{InfographicError, Result};

use csv::{ReaderBuilder, Trim};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COMPANY_TABLE: &str = "company list";
const CITY_TABLE: &str = "city coordinates";

/// One unicorn company from the company list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    pub company: String,
    /// Valuation in billions, parsed from e.g. "$140B"
    pub valuation_billions: f64,
    pub country: String,
    pub city: String,
    pub industry: String,
}

/// Row of the company list as written in the file
#[derive(Debug, Deserialize)]
struct CompanyRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Valuation ($B)")]
    valuation: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Industry")]
    industry: String,
}

/// One row of the world city lookup table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CityCoordinate {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

/// Both input tables, as loaded
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub companies: Vec<CompanyRecord>,
    pub cities: Vec<CityCoordinate>,
}

/// Parses a valuation such as "$140B", "$1,200" or "12.5" into billions.
///
/// Returns `None` for anything that is not a finite number once the currency
/// symbol, thousands separators and unit suffix are removed.
pub fn parse_valuation(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    let cleaned = cleaned.trim().trim_end_matches(['B', 'b']).trim_end();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Loads both tables named in the input configuration
pub fn load_datasets(input: &InputConfig) -> Result<Datasets> {
    let companies = read_companies(&input.companies_csv)?;
    info!(
        "Loaded {} companies from {}",
        companies.len(),
        input.companies_csv.display()
    );

    let cities = read_cities(&input.cities_csv)?;
    info!(
        "Loaded {} city coordinates from {}",
        cities.len(),
        input.cities_csv.display()
    );

    Ok(Datasets { companies, cities })
}

/// Reads the company list from a CSV file
pub fn read_companies<P: AsRef<Path>>(path: P) -> Result<Vec<CompanyRecord>> {
    let file = open_input(path.as_ref())?;
    read_companies_from_reader(file)
}

/// Reads the city coordinate table from a CSV file
pub fn read_cities<P: AsRef<Path>>(path: P) -> Result<Vec<CityCoordinate>> {
    let file = open_input(path.as_ref())?;
    read_cities_from_reader(file)
}

/// Read the company list. Extra columns are ignored; a valuation that does not
/// parse aborts the whole load.
pub fn read_companies_from_reader<R: Read>(reader: R) -> Result<Vec<CompanyRecord>> {
    let mut rdr = csv_reader(reader);
    validate_csv_headers(&mut rdr, COMPANY_TABLE, &COMPANY_HEADERS)?;

    let headers = rdr.headers()?.clone();
    let mut companies = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // quoted fields may span lines, so report where the record starts in the file
        let line = record
            .position()
            .map_or(i as u64 + 2, |pos| pos.line()) as usize;
        let row: CompanyRow = record.deserialize(Some(&headers))?;

        let valuation_billions =
            parse_valuation(&row.valuation).ok_or_else(|| InfographicError::ValuationParse {
                line,
                value: row.valuation.clone(),
            })?;

        companies.push(CompanyRecord {
            company: row.company,
            valuation_billions,
            country: row.country,
            city: row.city,
            industry: row.industry,
        });
    }

    Ok(companies)
}

/// Read the `city,country,lat,lng` lookup table
pub fn read_cities_from_reader<R: Read>(reader: R) -> Result<Vec<CityCoordinate>> {
    let mut rdr = csv_reader(reader);
    validate_csv_headers(&mut rdr, CITY_TABLE, &CITY_COORD_HEADERS)?;

    rdr.deserialize::<CityCoordinate>()
        .map(|result| result.map_err(InfographicError::from))
        .collect()
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // allow additional columns
        .from_reader(reader)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| InfographicError::OpenInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks that every required column is present
fn validate_csv_headers<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    table: &'static str,
    required: &[&str],
) -> Result<()> {
    let headers = csv_reader.headers()?;

    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(InfographicError::MissingColumn {
                table,
                column: column.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COMPANIES: &str = "\
Company,Valuation ($B),Date Joined,Country,City,Industry,Select Investors
Bytedance,$140,4/7/2017,China,Beijing,Artificial intelligence,Sequoia
SpaceX,$100.3,12/1/2012,United States,Hawthorne,Other,Founders Fund
Stripe,\"$1,095B\",1/23/2014,United States,San Francisco,Fintech,Khosla
";

    #[test]
    fn test_parse_valuation() {
        assert_eq!(parse_valuation("$140B"), Some(140.0));
        assert_eq!(parse_valuation("$140"), Some(140.0));
        assert_eq!(parse_valuation(" $1,200.5 "), Some(1200.5));
        assert_eq!(parse_valuation("12.5"), Some(12.5));
        assert_eq!(parse_valuation("$1.2b"), Some(1.2));
    }

    #[test]
    fn test_parse_valuation_rejects_malformed() {
        assert_eq!(parse_valuation(""), None);
        assert_eq!(parse_valuation("$"), None);
        assert_eq!(parse_valuation("unknown"), None);
        assert_eq!(parse_valuation("$NaN"), None);
        assert_eq!(parse_valuation("140 million"), None);
    }

    #[test]
    fn test_read_companies_from_reader() {
        let companies = read_companies_from_reader(COMPANIES.as_bytes()).unwrap();
        assert_eq!(companies.len(), 3);

        assert_eq!(companies[0].company, "Bytedance");
        assert_eq!(companies[0].valuation_billions, 140.0);
        assert_eq!(companies[0].country, "China");
        assert_eq!(companies[0].city, "Beijing");
        assert_eq!(companies[0].industry, "Artificial intelligence");

        assert_eq!(companies[1].valuation_billions, 100.3);
        assert_eq!(companies[2].valuation_billions, 1095.0);
    }

    #[test]
    fn test_read_companies_header_only() {
        let data = "Company,Valuation ($B),Country,City,Industry\n";
        let companies = read_companies_from_reader(data.as_bytes()).unwrap();
        assert!(companies.is_empty());
    }

    #[test]
    fn test_read_companies_missing_column() {
        let data = "Company,Valuation ($B),Country,Industry\nA,$1,China,Fintech\n";
        let err = read_companies_from_reader(data.as_bytes()).unwrap_err();
        match err {
            InfographicError::MissingColumn { table, column } => {
                assert_eq!(table, COMPANY_TABLE);
                assert_eq!(column, "City");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_companies_bad_valuation_reports_row() {
        let data = "\
Company,Valuation ($B),Country,City,Industry
A,$1,China,Beijing,Fintech
B,n/a,China,Beijing,Fintech
";
        let err = read_companies_from_reader(data.as_bytes()).unwrap_err();
        match err {
            InfographicError::ValuationParse { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_valuation_line_after_multiline_field() {
        let data = "\
Company,Valuation ($B),Country,City,Industry
\"Acme
Holdings\",$1,China,Beijing,Fintech
B,n/a,China,Beijing,Fintech
";
        let err = read_companies_from_reader(data.as_bytes()).unwrap_err();
        match err {
            InfographicError::ValuationParse { line, value } => {
                assert_eq!(line, 4);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multiline_company_name_is_kept() {
        let data = "\
Company,Valuation ($B),Country,City,Industry
\"Acme
Holdings\",$1,China,Beijing,Fintech
";
        let companies = read_companies_from_reader(data.as_bytes()).unwrap();
        assert_eq!(companies[0].company, "Acme\nHoldings");
    }

    #[test]
    fn test_read_cities_from_reader() {
        let data = "\
city,city_ascii,lat,lng,country,iso2
Tokyo,Tokyo,35.6897,139.6922,Japan,JP
Beijing,Beijing,39.9050,116.3914,China,CN
";
        let cities = read_cities_from_reader(data.as_bytes()).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].city, "Beijing");
        assert_eq!(cities[1].country, "China");
        assert!((cities[1].lat - 39.905).abs() < 1e-9);
        assert!((cities[1].lng - 116.3914).abs() < 1e-9);
    }

    #[test]
    fn test_read_cities_bad_latitude() {
        let data = "city,country,lat,lng\nTokyo,Japan,north,139.6\n";
        let result = read_cities_from_reader(data.as_bytes());
        assert!(matches!(result, Err(InfographicError::Csv(_))));
    }

    #[test]
    fn test_read_companies_nonexistent_file() {
        let result = read_companies("nonexistent_directory/companies.csv");
        match result {
            Err(InfographicError::OpenInput { path, .. }) => {
                assert!(path.ends_with("companies.csv"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_datasets_from_files() {
        let mut companies = NamedTempFile::new().unwrap();
        write!(companies, "{COMPANIES}").unwrap();
        let mut cities = NamedTempFile::new().unwrap();
        write!(cities, "city,country,lat,lng\nBeijing,China,39.9,116.4\n").unwrap();

        let input = InputConfig {
            companies_csv: companies.path().to_path_buf(),
            cities_csv: cities.path().to_path_buf(),
            world_boundaries: None,
        };

        let datasets = load_datasets(&input).unwrap();
        assert_eq!(datasets.companies.len(), 3);
        assert_eq!(datasets.cities.len(), 1);
    }
}
