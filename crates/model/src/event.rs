use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{ExampleData, GeoLocated};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub venue_name: Option<String>,
    pub address: Option<String>,
    /// City or place name as shown to the user, not used for geocoding.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub buzz_score: Option<f64>,
    pub external_url: Option<String>,
}

impl Event {
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            tags: vec![],
            venue_name: None,
            address: None,
            location: None,
            latitude: None,
            longitude: None,
            start_date: None,
            end_date: None,
            buzz_score: None,
            external_url: None,
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

impl HasId for Event {
    type IdType = String;
}

impl GeoLocated for Event {
    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }
}

impl ExampleData for Event {
    fn example_data() -> Self {
        Event {
            description: Some("Open-air market along the Limmat.".to_owned()),
            category: Some("Märkte".to_owned()),
            tags: vec!["outdoor".to_owned(), "family".to_owned()],
            location: Some("Zürich".to_owned()),
            start_date: NaiveDate::from_ymd_opt(2025, 12, 6),
            buzz_score: Some(72.5),
            ..Event::titled("Bürkliplatz Flohmarkt").at(47.3667, 8.5410)
        }
    }
}
