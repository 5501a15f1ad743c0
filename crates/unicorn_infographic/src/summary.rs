use crate::charts::{CountryShare, IndustryShare, ValuationPoint, country_shares, industry_shares, valuation_series};
use crate::config::ChartsConfig;
use crate::csv_reader::CompanyRecord;
use crate::error::Result;
use crate::resolver::{CityKey, CityResolution, CountryCount, companies_per_country};

use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The numbers behind each chart, written next to the image
#[derive(Debug, Clone, Serialize)]
pub struct InfographicSummary {
    pub generated_at: String,
    pub output: PathBuf,
    pub companies: usize,
    pub resolved_cities: usize,
    pub unmatched: Vec<CityKey>,
    pub industries: Vec<IndustryShare>,
    pub valuations: Vec<ValuationPoint>,
    pub countries: Vec<CountryShare>,
    pub city_markers_by_country: Vec<CountryCount>,
}

impl InfographicSummary {
    pub fn new(
        output: &Path,
        companies: &[CompanyRecord],
        resolution: &CityResolution,
        charts: &ChartsConfig,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            output: output.to_path_buf(),
            companies: companies.len(),
            resolved_cities: resolution.resolved.len(),
            unmatched: resolution.unmatched.clone(),
            industries: industry_shares(companies),
            valuations: valuation_series(companies, charts.line_rows),
            countries: country_shares(companies, charts.pie_rows),
            city_markers_by_country: companies_per_country(&resolution.resolved),
        }
    }

    /// Write as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvedCompanyLocation;
    use tempfile::TempDir;

    fn company(name: &str, valuation: f64, city: &str, country: &str) -> CompanyRecord {
        CompanyRecord {
            company: name.to_string(),
            valuation_billions: valuation,
            country: country.to_string(),
            city: city.to_string(),
            industry: "Fintech".to_string(),
        }
    }

    #[test]
    fn test_summary_written_as_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        let companies = vec![
            company("Stripe", 95.0, "San Francisco", "United States"),
            company("Klarna", 45.6, "Stockholm", "Sweden"),
        ];
        let resolution = CityResolution {
            resolved: vec![ResolvedCompanyLocation {
                company: companies[0].clone(),
                lat: 37.7562,
                lng: -122.443,
            }],
            unmatched: vec![CityKey::new("Stockholm", "Sweden")],
        };

        let summary = InfographicSummary::new(
            Path::new("infographic.png"),
            &companies,
            &resolution,
            &ChartsConfig::default(),
        );
        summary.save(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["companies"], 2);
        assert_eq!(json["resolved_cities"], 1);
        assert_eq!(json["unmatched"][0]["city"], "Stockholm");
        assert_eq!(json["industries"][0]["count"], 2);
        assert_eq!(json["valuations"][0]["company"], "Klarna");
        assert_eq!(json["city_markers_by_country"][0]["country"], "United States");
        assert!(chrono::DateTime::parse_from_rfc3339(json["generated_at"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let summary = InfographicSummary::new(
            Path::new("infographic.png"),
            &[],
            &CityResolution::default(),
            &ChartsConfig::default(),
        );
        assert!(summary.save(dir.path().join("missing").join("summary.json")).is_err());
    }
}
