use std::error::Error;
use std::fmt;

pub mod cluster;
pub mod corridor;
pub mod planner;

pub use cluster::{centroid, find_nearby_events, find_nearby_events_with_distance};
pub use corridor::{events_along_route, DEFAULT_CORRIDOR_KM};
pub use planner::{
    MissingCoordinates, PlanMode, TripPlan, TripPlanner, TripRequest, Waypoint,
    DEFAULT_EVENT_COUNT,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    UnknownCity(String),
    /// Only one of start and end was given.
    IncompleteRoute,
    InvalidCount(usize),
    InvalidCorridor(f64),
}

impl Error for PlanError {}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlanError::UnknownCity(name) => write!(f, "Unknown city: {}", name),
            PlanError::IncompleteRoute => {
                write!(f, "A route needs both a start and an end.")
            }
            PlanError::InvalidCount(count) => {
                write!(f, "Event count must be positive, got {}.", count)
            }
            PlanError::InvalidCorridor(width) => write!(
                f,
                "Corridor width must be a non-negative number of kilometers, got {}.",
                width
            ),
        }
    }
}

pub type PlanResult<O> = Result<O, PlanError>;
