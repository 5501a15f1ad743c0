use crate::error::{InfographicError, Result};

use geojson::{GeoJson, Geometry, Value};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Country outlines as (longitude, latitude) rings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldBoundaries {
    rings: Vec<Vec<(f64, f64)>>,
}

impl WorldBoundaries {
    /// Reads a GeoJSON file such as Natural Earth's admin-0 countries
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InfographicError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        let boundaries = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} boundary rings from {}",
            boundaries.rings.len(),
            path.display()
        );
        Ok(boundaries)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let geojson = GeoJson::from_reader(reader)?;
        Ok(Self::from_geojson(&geojson))
    }

    pub fn from_geojson(geojson: &GeoJson) -> Self {
        let mut rings = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(collection) => {
                for feature in &collection.features {
                    if let Some(geometry) = &feature.geometry {
                        collect_rings(geometry, &mut rings);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    collect_rings(geometry, &mut rings);
                }
            }
            GeoJson::Geometry(geometry) => collect_rings(geometry, &mut rings),
        }
        Self { rings }
    }

    pub fn rings(&self) -> &[Vec<(f64, f64)>] {
        &self.rings
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

fn collect_rings(geometry: &Geometry, rings: &mut Vec<Vec<(f64, f64)>>) {
    match &geometry.value {
        Value::LineString(line) => rings.push(to_ring(line)),
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            rings.extend(lines.iter().map(|line| to_ring(line)));
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                rings.extend(polygon.iter().map(|line| to_ring(line)));
            }
        }
        Value::GeometryCollection(geometries) => {
            for inner in geometries {
                collect_rings(inner, rings);
            }
        }
        Value::Point(_) | Value::MultiPoint(_) => {}
    }
}

fn to_ring(positions: &[Vec<f64>]) -> Vec<(f64, f64)> {
    positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (p[0], p[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"NAME": "Square"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"NAME": "Islands"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[20, 20], [21, 20], [21, 21], [20, 20]]],
                        [[[30, 30], [31, 30], [31, 31], [30, 30]], [[30.2, 30.2], [30.5, 30.2], [30.5, 30.5], [30.2, 30.2]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {"NAME": "Capital"},
                "geometry": {"type": "Point", "coordinates": [5, 5]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_feature_collection_rings() {
        let world = WorldBoundaries::from_reader(COUNTRIES.as_bytes()).unwrap();
        // 1 polygon ring + 1 + 2 multipolygon rings, point ignored
        assert_eq!(world.rings().len(), 4);
        assert_eq!(world.rings()[0].len(), 5);
        assert_eq!(world.rings()[0][1], (10.0, 0.0));
        assert!(!world.is_empty());
    }

    #[test]
    fn test_bare_geometry() {
        let data = r#"{"type": "LineString", "coordinates": [[-180, 0], [180, 0]]}"#;
        let world = WorldBoundaries::from_reader(data.as_bytes()).unwrap();
        assert_eq!(world.rings(), &[vec![(-180.0, 0.0), (180.0, 0.0)]]);
    }

    #[test]
    fn test_invalid_geojson() {
        let result = WorldBoundaries::from_reader("{\"type\": \"Nope\"}".as_bytes());
        assert!(matches!(result, Err(InfographicError::GeoJson(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = WorldBoundaries::from_path("nonexistent/countries.geojson");
        assert!(matches!(result, Err(InfographicError::OpenInput { .. })));
    }
}
