use schemars::JsonSchema;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
pub use serde_with;
use utility::{
    geo::GeoPoint,
    id::{HasId, Id},
};

pub mod city;
pub mod event;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// Anything that may carry a position. Only the two coordinates are needed by
/// the trip planner, so records keep the rest of their schema to themselves.
pub trait GeoLocated {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;

    fn has_coordinates(&self) -> bool {
        self.latitude().is_some() && self.longitude().is_some()
    }

    /// Position with missing values replaced by `0`.
    ///
    /// Note that `(0, 0)` is a real point in the Gulf of Guinea: a record
    /// without coordinates pulls centroids and corridor distances towards it.
    fn coordinates(&self) -> GeoPoint {
        GeoPoint::new(
            self.latitude().unwrap_or(0.0),
            self.longitude().unwrap_or(0.0),
        )
    }
}

impl GeoLocated for GeoPoint {
    fn latitude(&self) -> Option<f64> {
        Some(self.latitude)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.longitude)
    }
}

impl<T: GeoLocated + ?Sized> GeoLocated for &T {
    fn latitude(&self) -> Option<f64> {
        (**self).latitude()
    }

    fn longitude(&self) -> Option<f64> {
        (**self).longitude()
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithDistance<T> {
    pub distance_km: f64,
    #[serde(flatten)]
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_km: f64, content: T) -> Self {
        Self {
            distance_km,
            content,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> WithDistance<U> {
        WithDistance::new(self.distance_km, f(self.content))
    }
}

impl<T: GeoLocated> GeoLocated for WithDistance<T> {
    fn latitude(&self) -> Option<f64> {
        self.content.latitude()
    }

    fn longitude(&self) -> Option<f64> {
        self.content.longitude()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(bound(deserialize = "V: Deserialize<'de>, V::IdType: Deserialize<'de>"))]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> GeoLocated for WithId<V>
where
    V: HasId + GeoLocated,
    V::IdType: Serialize + Debug + Clone,
{
    fn latitude(&self) -> Option<f64> {
        self.content.latitude()
    }

    fn longitude(&self) -> Option<f64> {
        self.content.longitude()
    }
}
