//! Even-odd point-in-polygon test and the source-precedence split built on it.

use crate::event::Event;
use crate::geo::LatLng;

/// Added to the crossing denominator so horizontal edges never divide by zero.
const EPSILON: f64 = 1e-12;

/// State outline where the OGS catalog supersedes USGS coverage.
///
/// Closed ring (first vertex repeated last), as `lat, lng` pairs.
pub const OKLAHOMA_BOUNDARY: [LatLng; 20] = [
    LatLng::new(37.0001, -103.0027),
    LatLng::new(36.9989, -94.6180),
    LatLng::new(36.4994, -94.6179),
    LatLng::new(35.3925, -94.4307),
    LatLng::new(33.6379, -94.4858),
    LatLng::new(33.8399, -94.9510),
    LatLng::new(33.9053, -95.1830),
    LatLng::new(33.9231, -95.4328),
    LatLng::new(33.8756, -95.8433),
    LatLng::new(33.8220, -96.3668),
    LatLng::new(33.8161, -96.8902),
    LatLng::new(33.8756, -97.5327),
    LatLng::new(33.9648, -97.9669),
    LatLng::new(34.1076, -98.4666),
    LatLng::new(34.2801, -99.1507),
    LatLng::new(34.4109, -99.5433),
    LatLng::new(34.5606, -100.0008),
    LatLng::new(36.4997, -100.0008),
    LatLng::new(36.5004, -103.0029),
    LatLng::new(37.0001, -103.0027),
];

/// Ray-casting containment test over a single simple ring.
///
/// Longitude is the x axis and latitude the y axis. The ring may be closed
/// or implicitly closed. Points exactly on an edge resolve either way, but
/// always the same way for the same input.
pub fn contains(point: LatLng, ring: &[LatLng]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);
        let crosses = (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi + EPSILON) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Events of one feed split by a region of interest.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegionSplit {
    /// Shown directly
    pub outside: Vec<Event>,
    /// Suppressed, another source covers the region
    pub inside: Vec<Event>,
}

/// Bipartition `events` by `ring`. Events without a usable position are
/// dropped from both halves.
pub fn partition_by_region(events: Vec<Event>, ring: &[LatLng]) -> RegionSplit {
    let mut split = RegionSplit::default();
    for event in events {
        match event.geometry_position() {
            Some(position) if contains(position, ring) => split.inside.push(event),
            Some(_) => split.outside.push(event),
            None => {}
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FeedSource;

    /// (lng, lat) pairs of the unit square
    fn unit_square() -> Vec<LatLng> {
        [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
            .iter()
            .map(|&(x, y)| LatLng::new(y, x))
            .collect()
    }

    #[test]
    fn test_unit_square() {
        let square = unit_square();
        assert!(contains(LatLng::new(0.5, 0.5), &square));
        assert!(!contains(LatLng::new(2.0, 2.0), &square));
        assert!(!contains(LatLng::new(0.5, -0.5), &square));
    }

    #[test]
    fn test_edge_points_are_deterministic() {
        let square = unit_square();
        for point in [LatLng::new(0.0, 0.5), LatLng::new(0.5, 1.0), LatLng::new(1.0, 1.0)] {
            let first = contains(point, &square);
            for _ in 0..10 {
                assert_eq!(contains(point, &square), first);
            }
        }
    }

    #[test]
    fn test_explicitly_closed_ring_matches_open_ring() {
        let open = unit_square();
        let mut closed = open.clone();
        closed.push(open[0]);
        for point in [LatLng::new(0.25, 0.75), LatLng::new(1.5, 0.5)] {
            assert_eq!(contains(point, &open), contains(point, &closed));
        }
    }

    #[test]
    fn test_degenerate_ring() {
        let line = [LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert!(!contains(LatLng::new(0.5, 0.5), &line));
    }

    #[test]
    fn test_oklahoma_boundary() {
        // Oklahoma City, Tulsa, Boise City (panhandle)
        assert!(contains(LatLng::new(35.47, -97.52), &OKLAHOMA_BOUNDARY));
        assert!(contains(LatLng::new(36.15, -95.99), &OKLAHOMA_BOUNDARY));
        assert!(contains(LatLng::new(36.73, -102.51), &OKLAHOMA_BOUNDARY));
        // Dallas, Wichita, Amarillo
        assert!(!contains(LatLng::new(32.78, -96.80), &OKLAHOMA_BOUNDARY));
        assert!(!contains(LatLng::new(37.69, -97.34), &OKLAHOMA_BOUNDARY));
        assert!(!contains(LatLng::new(35.22, -101.83), &OKLAHOMA_BOUNDARY));
    }

    #[test]
    fn test_partition_by_region() {
        let okc = Event::new("us1", FeedSource::Usgs, LatLng::new(35.47, -97.52));
        let dallas = Event::new("us2", FeedSource::Usgs, LatLng::new(32.78, -96.80));
        let mut nowhere = Event::new("us3", FeedSource::Usgs, LatLng::new(0.0, 0.0));
        nowhere.position = None;

        let split = partition_by_region(vec![okc, dallas, nowhere], &OKLAHOMA_BOUNDARY);
        assert_eq!(split.inside.len(), 1);
        assert_eq!(split.inside[0].id.as_deref(), Some("us1"));
        assert_eq!(split.outside.len(), 1);
        assert_eq!(split.outside[0].id.as_deref(), Some("us2"));
    }
}
