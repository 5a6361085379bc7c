use phf::phf_map;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo::GeoPoint;

use crate::{ExampleData, GeoLocated};

/// Approximate city centers for resolving place names in the trip planner.
/// Lookups are exact-key only. This is a convenience table, not a geocoder.
pub static SWISS_CITY_COORDS: phf::Map<&'static str, (f64, f64)> = phf_map! {
    "Zürich" => (47.3769, 8.5417),
    "Bern" => (46.948, 7.4474),
    "Basel" => (47.5596, 7.5886),
    "Genf" => (46.2044, 6.1432),
    "Lausanne" => (46.5197, 6.6323),
    "Luzern" => (47.0502, 8.3093),
    "St. Gallen" => (47.4245, 9.3767),
    "Lugano" => (46.0037, 8.9511),
    "Winterthur" => (47.4988, 8.7237),
    "Biel" => (47.1368, 7.2467),
    "Thun" => (46.758, 7.628),
    "Chur" => (46.8508, 9.532),
    "Fribourg" => (46.8065, 7.1619),
    "Neuchâtel" => (46.9896, 6.9293),
    "Schaffhausen" => (47.6973, 8.6349),
    "Interlaken" => (46.6863, 7.8632),
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocated for City {
    fn latitude(&self) -> Option<f64> {
        Some(self.latitude)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.longitude)
    }
}

impl ExampleData for City {
    fn example_data() -> Self {
        City {
            name: "Bern".to_owned(),
            latitude: 46.948,
            longitude: 7.4474,
        }
    }
}

pub fn city_coordinates(name: &str) -> Option<GeoPoint> {
    SWISS_CITY_COORDS.get(name).copied().map(GeoPoint::from)
}

pub fn city(name: &str) -> Option<City> {
    SWISS_CITY_COORDS
        .get_entry(name)
        .map(|(name, (latitude, longitude))| City {
            name: (*name).to_owned(),
            latitude: *latitude,
            longitude: *longitude,
        })
}

/// All known cities, sorted by name.
pub fn cities() -> Vec<City> {
    let mut cities = SWISS_CITY_COORDS
        .entries()
        .map(|(name, (latitude, longitude))| City {
            name: (*name).to_owned(),
            latitude: *latitude,
            longitude: *longitude,
        })
        .collect::<Vec<_>>();
    cities.sort_by(|a, b| a.name.cmp(&b.name));
    cities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_cities() {
        assert_eq!(city_coordinates("Zürich"), Some(GeoPoint::new(47.3769, 8.5417)));
        assert_eq!(city_coordinates("Genf"), Some(GeoPoint::new(46.2044, 6.1432)));
        assert_eq!(city("St. Gallen").map(|c| c.name), Some("St. Gallen".to_owned()));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(city_coordinates("Zurich"), None);
        assert_eq!(city_coordinates("zürich"), None);
        assert_eq!(city_coordinates(" Bern"), None);
        assert_eq!(city_coordinates("Geneva"), None);
        assert!(city("").is_none());
    }

    #[test]
    fn lists_all_cities_sorted() {
        let cities = cities();
        assert_eq!(cities.len(), SWISS_CITY_COORDS.len());
        assert!(cities.windows(2).all(|pair| pair[0].name < pair[1].name));
        assert_eq!(cities[0].name, "Basel");
    }

    #[test]
    fn coordinates_are_inside_switzerland() {
        for city in cities() {
            assert!((45.8..=47.9).contains(&city.latitude), "{}", city.name);
            assert!((5.9..=10.5).contains(&city.longitude), "{}", city.name);
        }
    }
}
