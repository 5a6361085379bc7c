use itertools::Itertools;
use model::{GeoLocated, WithDistance};
use utility::geo::GeoPoint;

/// Arithmetic mean of latitudes and longitudes, `None` for no records.
/// Missing coordinates count as `0`.
pub fn centroid<T: GeoLocated>(records: &[T]) -> Option<GeoPoint> {
    if records.is_empty() {
        return None;
    }
    let (latitude_sum, longitude_sum) =
        records.iter().fold((0.0, 0.0), |(latitude, longitude), record| {
            let point = record.coordinates();
            (latitude + point.latitude, longitude + point.longitude)
        });
    let count = records.len() as f64;
    Some(GeoPoint::new(latitude_sum / count, longitude_sum / count))
}

/// The `count` records closest to the centroid of all `events`.
///
/// Lists no longer than `count` are returned as they are, in input order.
/// Otherwise the records are ordered by distance to the centroid; equal
/// distances keep their input order.
pub fn find_nearby_events<T: GeoLocated>(events: &[T], count: usize) -> Vec<&T> {
    if events.len() <= count {
        return events.iter().collect();
    }
    find_nearby_events_with_distance(events, count)
        .into_iter()
        .map(|event| event.content)
        .collect()
}

/// Like [`find_nearby_events`], additionally reporting each record's distance
/// to the centroid.
pub fn find_nearby_events_with_distance<T: GeoLocated>(
    events: &[T],
    count: usize,
) -> Vec<WithDistance<&T>> {
    let Some(center) = centroid(events) else {
        return vec![];
    };
    let with_distance = events
        .iter()
        .map(|event| WithDistance::new(center.distance_to(&event.coordinates()), event));

    if events.len() <= count {
        return with_distance.collect();
    }

    // `sorted_by` is a stable sort
    with_distance
        .sorted_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use model::event::Event;

    use super::*;

    fn event(title: &str, latitude: f64, longitude: f64) -> Event {
        Event::titled(title).at(latitude, longitude)
    }

    fn titles(events: &[&Event]) -> Vec<String> {
        events.iter().map(|event| event.title.clone()).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let events: Vec<Event> = vec![];
        assert!(find_nearby_events(&events, 0).is_empty());
        assert!(find_nearby_events(&events, 5).is_empty());
        assert!(find_nearby_events_with_distance(&events, 5).is_empty());
        assert_eq!(centroid(&events), None);
    }

    #[test]
    fn short_lists_pass_through_unchanged() {
        // far apart on purpose: sorting would reorder them
        let events = vec![
            event("Lugano", 46.0037, 8.9511),
            event("Basel", 47.5596, 7.5886),
            event("Luzern", 47.0502, 8.3093),
        ];
        for count in [3, 4, 100] {
            let nearby = find_nearby_events(&events, count);
            assert_eq!(nearby.len(), events.len());
            for (picked, original) in nearby.iter().zip(events.iter()) {
                assert!(ptr::eq(*picked, original));
            }
        }
    }

    #[test]
    fn picks_the_closest_to_the_centroid() {
        let events = vec![
            event("far west", 46.9, 6.0),
            event("center", 47.0, 7.5),
            event("far east", 47.1, 9.5),
            event("near center", 47.05, 7.6),
            event("north", 47.6, 7.6),
        ];
        let nearby = find_nearby_events(&events, 2);
        assert_eq!(titles(&nearby), vec!["near center", "center"]);

        let with_distance = find_nearby_events_with_distance(&events, 4);
        assert_eq!(with_distance.len(), 4);
        assert!(with_distance
            .windows(2)
            .all(|pair| pair[0].distance_km <= pair[1].distance_km));
        let center = centroid(&events).unwrap();
        for picked in &with_distance {
            let expected = center.distance_to(&picked.content.coordinates());
            assert!((picked.distance_km - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn result_has_no_duplicates() {
        let events = (0..20)
            .map(|i| event(&format!("event {}", i), 46.0 + i as f64 * 0.1, 7.0))
            .collect::<Vec<_>>();
        let nearby = find_nearby_events(&events, 7);
        assert_eq!(nearby.len(), 7);
        let unique = nearby.iter().map(|e| e.title.as_str()).unique().count();
        assert_eq!(unique, 7);
        assert!(nearby.iter().all(|e| events.iter().any(|o| ptr::eq(*e, o))));
    }

    #[test]
    fn ties_keep_input_order() {
        // identical positions tie on distance
        let events = vec![
            event("a", 47.0, 8.0),
            event("outlier", 45.0, 6.0),
            event("b", 47.0, 8.0),
            event("c", 47.0, 8.0),
            event("d", 47.0, 8.0),
        ];
        let nearby = find_nearby_events(&events, 3);
        assert_eq!(titles(&nearby), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_coordinates_pull_the_centroid_to_zero() {
        let events = vec![
            event("Bern", 46.948, 7.4474),
            Event::titled("unknown venue"),
        ];
        let center = centroid(&events).unwrap();
        assert!((center.latitude - 23.474).abs() < 1e-9);
        assert!((center.longitude - 3.7237).abs() < 1e-9);
    }

    #[test]
    fn does_not_modify_input() {
        let events = vec![
            event("x", 47.5, 9.0),
            event("y", 46.0, 6.0),
            event("z", 47.0, 7.5),
        ];
        let before = events.clone();
        let _ = find_nearby_events(&events, 1);
        assert_eq!(events, before);
    }
}
