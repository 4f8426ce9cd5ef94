//! Corridor selection: events within a buffered segment, ordered by their
//! distance along it. This is what a cross-section is extracted from.

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::event::Event;
use crate::geo::{LatLng, LocalFrame, LocalXY};

/// Width used when none is given.
pub const DEFAULT_WIDTH_KM: f64 = 20.0;

/// An oriented rectangle: the segment `start -> end` buffered by half of
/// `width_km` on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub start: LatLng,
    pub end: LatLng,
    pub width_km: f64,
}

/// Where a local point falls relative to a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Unclamped position along the segment, 0 at the start and 1 at the end
    pub t: f64,
    /// Distance to the foot of the perpendicular on the infinite line
    pub perpendicular_km: f64,
    /// `t` times the segment length
    pub along_km: f64,
}

impl SegmentProjection {
    /// Between the endpoints and strictly closer than half the width.
    pub fn is_within(&self, width_km: f64) -> bool {
        (0.0..=1.0).contains(&self.t) && self.perpendicular_km < width_km / 2.0
    }
}

/// Project `p` onto the segment `a -> b`, all on the same local plane.
pub fn project_onto_segment(
    p: LocalXY,
    a: LocalXY,
    b: LocalXY,
) -> Result<SegmentProjection, SelectionError> {
    let direction = b - a;
    let length_sq = direction.dot(direction);
    if length_sq == 0.0 {
        return Err(SelectionError::DegenerateCorridor);
    }
    let t = (p - a).dot(direction) / length_sq;
    let foot = a + direction * t;
    Ok(SegmentProjection {
        t,
        perpendicular_km: (p - foot).norm(),
        along_km: t * length_sq.sqrt(),
    })
}

/// An event that fell inside a corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorHit<'a> {
    pub event: &'a Event,
    /// Kilometers from the corridor start, the cross-section x axis
    pub distance_along_km: f64,
    pub perpendicular_km: f64,
}

/// Validated local geometry of a corridor.
struct Segment {
    frame: LocalFrame,
    a: LocalXY,
    b: LocalXY,
}

impl Corridor {
    pub fn new(start: LatLng, end: LatLng, width_km: f64) -> Self {
        Corridor {
            start,
            end,
            width_km,
        }
    }

    fn segment(&self) -> Result<Segment, SelectionError> {
        for point in [self.start, self.end] {
            if !point.is_valid() {
                return Err(SelectionError::InvalidCoordinate {
                    lat: point.lat,
                    lng: point.lng,
                });
            }
        }
        if !(self.width_km.is_finite() && self.width_km > 0.0) {
            return Err(SelectionError::InvalidWidth(self.width_km));
        }
        let frame = LocalFrame::between(self.start, self.end);
        let a = frame.project(self.start);
        let b = frame.project(self.end);
        if a == b {
            return Err(SelectionError::DegenerateCorridor);
        }
        Ok(Segment { frame, a, b })
    }

    /// Segment length on the local plane.
    pub fn length_km(&self) -> Result<f64, SelectionError> {
        let segment = self.segment()?;
        Ok((segment.b - segment.a).norm())
    }

    /// Project one position into this corridor's frame.
    pub fn project(&self, point: LatLng) -> Result<SegmentProjection, SelectionError> {
        let segment = self.segment()?;
        project_onto_segment(segment.frame.project(point), segment.a, segment.b)
    }

    /// Corners of the buffered rectangle, for drawing it back on a map.
    ///
    /// Order: start left, start right, end right, end left.
    pub fn outline(&self) -> Result<[LatLng; 4], SelectionError> {
        let Segment { frame, a, b } = self.segment()?;
        let direction = b - a;
        let normal = LocalXY::new(-direction.y_km, direction.x_km) * (1.0 / direction.norm());
        let offset = normal * (self.width_km / 2.0);
        Ok([
            frame.unproject(a + offset),
            frame.unproject(a - offset),
            frame.unproject(b - offset),
            frame.unproject(b + offset),
        ])
    }
}

/// Events inside `corridor`, ascending by distance along it.
///
/// Events without a usable position are skipped. Ties keep their input
/// order.
pub fn select_corridor<'a>(
    events: &'a [Event],
    corridor: &Corridor,
) -> Result<Vec<CorridorHit<'a>>, SelectionError> {
    let Segment { frame, a, b } = corridor.segment()?;
    let mut hits = Vec::new();
    for event in events {
        let Some(position) = event.geometry_position() else {
            continue;
        };
        let projection = project_onto_segment(frame.project(position), a, b)?;
        if projection.is_within(corridor.width_km) {
            hits.push(CorridorHit {
                event,
                distance_along_km: projection.along_km,
                perpendicular_km: projection.perpendicular_km,
            });
        }
    }
    hits.sort_by(|x, y| x.distance_along_km.total_cmp(&y.distance_along_km));
    log::debug!(
        "corridor of {:.1} km width selected {} of {} events",
        corridor.width_km,
        hits.len(),
        events.len()
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FeedSource;

    fn north_corridor(width_km: f64) -> Corridor {
        Corridor::new(LatLng::new(0.0, 0.0), LatLng::new(0.1, 0.0), width_km)
    }

    fn event_at(id: &str, lat: f64, lng: f64) -> Event {
        Event::new(id, FeedSource::Ogs, LatLng::new(lat, lng))
    }

    #[test]
    fn test_membership_is_bounded_by_the_segment() {
        let a = LocalXY::new(0.0, 0.0);
        let b = LocalXY::new(0.0, 10.0);

        let beside = project_onto_segment(LocalXY::new(1.0, 5.0), a, b).unwrap();
        assert_eq!(beside.t, 0.5);
        assert_eq!(beside.perpendicular_km, 1.0);
        assert_eq!(beside.along_km, 5.0);
        assert!(beside.is_within(4.0));

        let beyond = project_onto_segment(LocalXY::new(1.0, 15.0), a, b).unwrap();
        assert_eq!(beyond.t, 1.5);
        assert_eq!(beyond.perpendicular_km, 1.0);
        assert!(!beyond.is_within(4.0));

        let behind = project_onto_segment(LocalXY::new(0.0, -0.5), a, b).unwrap();
        assert!(!behind.is_within(4.0));
    }

    #[test]
    fn test_boundary_distance_is_excluded() {
        let a = LocalXY::new(0.0, 0.0);
        let b = LocalXY::new(0.0, 10.0);
        let edge = project_onto_segment(LocalXY::new(2.0, 5.0), a, b).unwrap();
        assert_eq!(edge.perpendicular_km, 2.0);
        assert!(!edge.is_within(4.0));
        assert!(edge.is_within(4.000001));
    }

    #[test]
    fn test_endpoints_are_members() {
        let a = LocalXY::new(0.0, 0.0);
        let b = LocalXY::new(0.0, 10.0);
        assert!(project_onto_segment(a, a, b).unwrap().is_within(4.0));
        assert!(project_onto_segment(b, a, b).unwrap().is_within(4.0));
    }

    #[test]
    fn test_results_sorted_by_distance_along() {
        let events = vec![
            event_at("c8", 0.08, 0.0),
            event_at("c2", 0.02, 0.0),
            event_at("c5", 0.05, 0.0),
        ];
        let hits = select_corridor(&events, &north_corridor(4.0)).unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.event.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["c2", "c5", "c8"]);
        assert!(hits
            .windows(2)
            .all(|w| w[0].distance_along_km <= w[1].distance_along_km));
        // 0.02 degrees of latitude
        assert!((hits[0].distance_along_km - 2.224).abs() < 0.001);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let events = vec![
            event_at("first", 0.05, 0.001),
            event_at("second", 0.05, -0.001),
            event_at("earlier", 0.01, 0.0),
        ];
        let hits = select_corridor(&events, &north_corridor(4.0)).unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.event.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn test_filters_by_width_and_span() {
        let mut no_position = event_at("none", 0.0, 0.0);
        no_position.position = None;
        let events = vec![
            event_at("near", 0.05, 0.005),
            event_at("far", 0.05, 0.05),
            event_at("past_end", 0.2, 0.0),
            event_at("before_start", -0.01, 0.0),
            event_at("garbage", f64::NAN, 0.0),
            no_position,
        ];
        let hits = select_corridor(&events, &north_corridor(4.0)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event.id.as_deref(), Some("near"));
        assert!(hits[0].perpendicular_km < 2.0);
    }

    #[test]
    fn test_degenerate_corridor_is_rejected() {
        let point = LatLng::new(35.5, -97.5);
        let corridor = Corridor::new(point, point, 20.0);
        let events = vec![event_at("x", 35.5, -97.5)];
        assert_eq!(
            select_corridor(&events, &corridor),
            Err(SelectionError::DegenerateCorridor)
        );
        assert_eq!(
            select_corridor(&[], &corridor),
            Err(SelectionError::DegenerateCorridor)
        );
        assert_eq!(
            project_onto_segment(LocalXY::new(1.0, 1.0), LocalXY::default(), LocalXY::default()),
            Err(SelectionError::DegenerateCorridor)
        );
    }

    #[test]
    fn test_invalid_width_and_endpoints() {
        let mut corridor = north_corridor(0.0);
        assert_eq!(
            select_corridor(&[], &corridor),
            Err(SelectionError::InvalidWidth(0.0))
        );
        corridor.width_km = 10.0;
        corridor.end = LatLng::new(f64::NAN, 0.0);
        assert!(matches!(
            select_corridor(&[], &corridor),
            Err(SelectionError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_outline_corners_sit_on_the_buffer_edge() {
        let corridor = Corridor::new(LatLng::new(35.0, -98.0), LatLng::new(36.0, -97.0), 20.0);
        let corners = corridor.outline().unwrap();
        let expected_t = [0.0, 0.0, 1.0, 1.0];
        for (corner, t) in corners.iter().zip(expected_t) {
            let projection = corridor.project(*corner).unwrap();
            assert!((projection.t - t).abs() < 1e-9);
            assert!((projection.perpendicular_km - 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_length() {
        let length = north_corridor(4.0).length_km().unwrap();
        assert!((length - 11.119).abs() < 0.001);
    }
}
