use crate::csv_reader::{CityCoordinate, CompanyRecord};
use crate::stats::value_counts;

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Join key between the company list and the coordinate table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CityKey {
    pub city: String,
    pub country: String,
}

impl CityKey {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    pub fn of_company(company: &CompanyRecord) -> Self {
        Self::new(company.city.as_str(), company.country.as_str())
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// A company placed on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCompanyLocation {
    pub company: CompanyRecord,
    pub lat: f64,
    pub lng: f64,
}

/// Per-country marker count shown in the map legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub companies: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityResolution {
    /// One entry per distinct (city, country) pair that has coordinates
    pub resolved: Vec<ResolvedCompanyLocation>,
    /// Pairs with no coordinates, in first-appearance order
    pub unmatched: Vec<CityKey>,
}

/// Matches companies to coordinates on the exact (city, country) pair.
///
/// Only the first company of each pair is kept, so the map gets one marker per
/// city. Pairs without coordinates are left out of `resolved` and listed in
/// `unmatched` instead of failing.
pub fn resolve_locations(
    companies: &[CompanyRecord],
    cities: &[CityCoordinate],
) -> CityResolution {
    let mut lookup: HashMap<CityKey, (f64, f64)> = HashMap::with_capacity(cities.len());
    for coord in cities {
        if !(coord.lat.is_finite() && coord.lng.is_finite()) {
            continue;
        }
        lookup
            .entry(CityKey::new(coord.city.as_str(), coord.country.as_str()))
            .or_insert((coord.lat, coord.lng));
    }

    let mut seen: HashSet<CityKey> = HashSet::new();
    let mut resolution = CityResolution::default();

    for company in companies {
        let key = CityKey::of_company(company);
        if seen.contains(&key) {
            continue;
        }

        match lookup.get(&key) {
            Some(&(lat, lng)) => resolution.resolved.push(ResolvedCompanyLocation {
                company: company.clone(),
                lat,
                lng,
            }),
            None => resolution.unmatched.push(key.clone()),
        }
        seen.insert(key);
    }

    resolution
}

/// Counts the deduplicated (one per city) locations per country
pub fn companies_per_country(resolved: &[ResolvedCompanyLocation]) -> Vec<CountryCount> {
    value_counts(resolved.iter().map(|loc| loc.company.country.as_str()))
        .into_iter()
        .map(|(country, companies)| CountryCount { country, companies })
        .collect()
}
