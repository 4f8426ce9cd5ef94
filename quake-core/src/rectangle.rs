use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::event::Event;
use crate::geo::LatLng;

/// Axis-aligned latitude/longitude box, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Box spanned by two opposite corners, in any order.
    pub fn from_corners(a: LatLng, b: LatLng) -> Result<Self, SelectionError> {
        for corner in [a, b] {
            if !corner.is_valid() {
                return Err(SelectionError::InvalidCoordinate {
                    lat: corner.lat,
                    lng: corner.lng,
                });
            }
        }
        Ok(BoundingBox {
            south: a.lat.min(b.lat),
            north: a.lat.max(b.lat),
            west: a.lng.min(b.lng),
            east: a.lng.max(b.lng),
        })
    }

    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}

/// Events whose position lies inside the box spanned by two corners.
pub fn select_rectangle(
    events: &[Event],
    corner_a: LatLng,
    corner_b: LatLng,
) -> Result<Vec<&Event>, SelectionError> {
    let bounds = BoundingBox::from_corners(corner_a, corner_b)?;
    Ok(events
        .iter()
        .filter(|event| {
            event
                .geometry_position()
                .is_some_and(|position| bounds.contains(position))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FeedSource;

    fn event_at(id: &str, lat: f64, lng: f64) -> Event {
        Event::new(id, FeedSource::Usgs, LatLng::new(lat, lng))
    }

    #[test]
    fn test_corner_order_does_not_matter() {
        let a = LatLng::new(36.0, -98.0);
        let b = LatLng::new(35.0, -97.0);
        assert_eq!(BoundingBox::from_corners(a, b), BoundingBox::from_corners(b, a));
        let bounds = BoundingBox::from_corners(a, b).unwrap();
        assert_eq!(bounds.south, 35.0);
        assert_eq!(bounds.west, -98.0);
    }

    #[test]
    fn test_select_rectangle_inclusive() {
        let events = vec![
            event_at("inside", 35.5, -97.5),
            event_at("corner", 35.0, -98.0),
            event_at("north", 36.1, -97.5),
            event_at("east", 35.5, -96.9),
            event_at("nan", f64::NAN, -97.5),
        ];
        let selected =
            select_rectangle(&events, LatLng::new(36.0, -97.0), LatLng::new(35.0, -98.0)).unwrap();
        let ids: Vec<_> = selected.iter().map(|e| e.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["inside", "corner"]);
    }

    #[test]
    fn test_empty_selection() {
        let events = vec![event_at("far", 10.0, 10.0)];
        assert!(select_rectangle(&events, LatLng::new(36.0, -97.0), LatLng::new(35.0, -98.0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_corner_is_rejected() {
        let events = vec![event_at("inside", 35.5, -97.5)];
        let result = select_rectangle(&events, LatLng::new(f64::NAN, -97.0), LatLng::new(35.0, -98.0));
        assert!(matches!(result, Err(SelectionError::InvalidCoordinate { .. })));
        assert!(BoundingBox::from_corners(LatLng::new(36.0, -97.0), LatLng::new(35.0, 200.0)).is_err());
    }
}
