//! Catalog and presentation of normalized seismic events.
//!
//! This crate holds fetched events in memory and turns selections into
//! forms suitable for charting, export and summaries.

pub mod catalog;
pub mod export;
pub mod plot;

/// Magnitude statistics for a set of events
pub mod summary {
    use quake_core::event::Event;
    use serde::Serialize;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct MagnitudeSummary {
        /// Number of events, with or without a magnitude
        pub count: usize,
        pub average_magnitude: Option<f64>,
        pub max_magnitude: Option<f64>,
    }

    /// Summarize `events`. Events without a magnitude count towards `count`
    /// only; they are never averaged in as zero.
    pub fn summarize<'a, I>(events: I) -> MagnitudeSummary
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut count = 0;
        let mut magnitudes = Vec::new();
        for event in events {
            count += 1;
            if let Some(magnitude) = event.magnitude {
                magnitudes.push(magnitude);
            }
        }
        let average_magnitude = if magnitudes.is_empty() {
            None
        } else {
            Some(magnitudes.iter().sum::<f64>() / magnitudes.len() as f64)
        };
        let max_magnitude = magnitudes.iter().copied().max_by(|a, b| a.total_cmp(b));
        MagnitudeSummary {
            count,
            average_magnitude,
            max_magnitude,
        }
    }

    /// Events with a known magnitude of at least `min_magnitude`.
    pub fn filter_by_magnitude<'a, I>(events: I, min_magnitude: f64) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events
            .into_iter()
            .filter(|event| event.magnitude.is_some_and(|m| m >= min_magnitude))
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use quake_core::event::FeedSource;
        use quake_core::geo::LatLng;

        fn events(magnitudes: &[Option<f64>]) -> Vec<Event> {
            magnitudes
                .iter()
                .enumerate()
                .map(|(i, magnitude)| {
                    let mut event =
                        Event::new(format!("ok{i}"), FeedSource::Ogs, LatLng::new(35.0, -97.0));
                    event.magnitude = *magnitude;
                    event
                })
                .collect()
        }

        #[test]
        fn test_summarize_ignores_missing_magnitudes() {
            let events = events(&[Some(2.0), None, Some(3.0), Some(4.0)]);
            let summary = summarize(&events);
            assert_eq!(summary.count, 4);
            assert_eq!(summary.average_magnitude, Some(3.0));
            assert_eq!(summary.max_magnitude, Some(4.0));
        }

        #[test]
        fn test_summarize_empty() {
            let none: Vec<Event> = Vec::new();
            let summary = summarize(&none);
            assert_eq!(summary.count, 0);
            assert_eq!(summary.average_magnitude, None);
            assert_eq!(summary.max_magnitude, None);
        }

        #[test]
        fn test_filter_by_magnitude() {
            let events = events(&[Some(1.0), None, Some(2.5), Some(2.4)]);
            let selected = filter_by_magnitude(&events, 2.4);
            let ids: Vec<_> = selected.iter().map(|e| e.id.as_deref().unwrap()).collect();
            assert_eq!(ids, vec!["ok2", "ok3"]);
        }
    }
}
