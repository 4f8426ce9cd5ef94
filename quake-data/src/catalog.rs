//! In-memory event catalog keyed by event id.
//!
//! Events keep insertion order. A full refresh of one feed replaces that
//! feed's events, while polling only ever adds ids that are not yet known.

use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{BTreeMap, HashMap};

use quake_core::event::{Event, FeedSource};
use quake_core::feed::ogs::normalize_event_id;
use quake_core::recency::{classify_age, RecencyBucket};

#[derive(Debug, Default, Clone)]
pub struct EventCatalog {
    events: Vec<Event>,
    index: HashMap<String, usize>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Look up an event by id. Raw `ogs…` ids resolve to their normalized
    /// `ok…` form.
    pub fn get(&self, id: &str) -> Option<&Event> {
        self.index
            .get(id)
            .or_else(|| self.index.get(&normalize_event_id(id)))
            .map(|&position| &self.events[position])
    }

    /// Replace every event from `source` with `events`.
    ///
    /// Within the batch the first occurrence of an id wins; id-less events
    /// are skipped. An id already held by the other feed is left alone.
    pub fn replace_source(&mut self, source: FeedSource, events: Vec<Event>) {
        let before = self.events.len();
        self.events.retain(|event| event.source != source);
        let removed = before - self.events.len();
        self.reindex();
        let added = self.insert_unseen(events);
        debug!(
            "Catalog refresh for {}: removed {}, added {}, total {}",
            source,
            removed,
            added,
            self.events.len()
        );
    }

    /// Add only events whose id is not yet in the catalog. Returns how many
    /// were added.
    pub fn merge_new(&mut self, events: Vec<Event>) -> usize {
        let added = self.insert_unseen(events);
        debug!("Catalog merge: added {}, total {}", added, self.events.len());
        added
    }

    /// Group events by age at `now`. Events without a time are `Older`.
    pub fn by_recency(&self, now: DateTime<Utc>) -> BTreeMap<RecencyBucket, Vec<&Event>> {
        let mut buckets: BTreeMap<RecencyBucket, Vec<&Event>> = RecencyBucket::ALL
            .iter()
            .map(|bucket| (*bucket, Vec::new()))
            .collect();
        for event in &self.events {
            let bucket = event
                .time
                .map_or(RecencyBucket::Older, |time| classify_age(time, now));
            buckets.entry(bucket).or_default().push(event);
        }
        buckets
    }

    /// Events by descending time; events without a time come last.
    pub fn newest_first(&self) -> Vec<&Event> {
        let mut ordered: Vec<&Event> = self.events.iter().collect();
        ordered.sort_by(|a, b| b.time.cmp(&a.time));
        ordered
    }

    fn insert_unseen(&mut self, events: Vec<Event>) -> usize {
        let mut added = 0;
        for event in events {
            let Some(id) = event.id.clone().filter(|id| !id.is_empty()) else {
                continue;
            };
            if self.index.contains_key(&id) {
                continue;
            }
            self.index.insert(id, self.events.len());
            self.events.push(event);
            added += 1;
        }
        added
    }

    fn reindex(&mut self) {
        self.index = self
            .events
            .iter()
            .enumerate()
            .filter_map(|(position, event)| event.id.clone().map(|id| (id, position)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use quake_core::geo::LatLng;

    fn event(id: &str, source: FeedSource) -> Event {
        Event::new(id, source, LatLng::new(35.5, -97.5))
    }

    fn timed(id: &str, time: DateTime<Utc>) -> Event {
        let mut event = event(id, FeedSource::Ogs);
        event.time = Some(time);
        event
    }

    #[test]
    fn test_merge_existing_id_keeps_size() {
        let mut catalog = EventCatalog::new();
        catalog.replace_source(
            FeedSource::Ogs,
            vec![event("ok2025a", FeedSource::Ogs), event("ok2025b", FeedSource::Ogs)],
        );
        assert_eq!(catalog.len(), 2);

        let mut repeat = event("ok2025a", FeedSource::Ogs);
        repeat.magnitude = Some(4.0);
        assert_eq!(catalog.merge_new(vec![repeat]), 0);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("ok2025a").unwrap().magnitude, None);

        assert_eq!(catalog.merge_new(vec![event("ok2025c", FeedSource::Ogs)]), 1);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_replace_source_only_touches_that_feed() {
        let mut catalog = EventCatalog::new();
        catalog.replace_source(FeedSource::Usgs, vec![event("us1", FeedSource::Usgs)]);
        catalog.replace_source(
            FeedSource::Ogs,
            vec![event("ok1", FeedSource::Ogs), event("ok2", FeedSource::Ogs)],
        );
        catalog.replace_source(FeedSource::Ogs, vec![event("ok3", FeedSource::Ogs)]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("us1"));
        assert!(catalog.contains("ok3"));
        assert!(!catalog.contains("ok1"));
        // index survives the removal
        assert_eq!(catalog.get("ok3").unwrap().id.as_deref(), Some("ok3"));
    }

    #[test]
    fn test_duplicate_and_idless_events_in_batch() {
        let mut catalog = EventCatalog::new();
        let mut first = event("ok1", FeedSource::Ogs);
        first.magnitude = Some(1.0);
        let mut second = event("ok1", FeedSource::Ogs);
        second.magnitude = Some(2.0);
        let mut anonymous = event("", FeedSource::Ogs);
        anonymous.id = None;

        catalog.replace_source(FeedSource::Ogs, vec![first, second, anonymous]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("ok1").unwrap().magnitude, Some(1.0));
    }

    #[test]
    fn test_get_accepts_raw_ogs_id() {
        let mut catalog = EventCatalog::new();
        catalog.merge_new(vec![event("ok2025xyz", FeedSource::Ogs)]);
        assert!(catalog.get("ogs2025xyz").is_some());
        assert!(catalog.get("ok2025xyz").is_some());
        assert!(catalog.get("ogs2025nope").is_none());
    }

    #[test]
    fn test_by_recency() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let mut catalog = EventCatalog::new();
        let mut untimed = event("ok4", FeedSource::Ogs);
        untimed.time = None;
        catalog.merge_new(vec![
            timed("ok1", now - TimeDelta::hours(2)),
            timed("ok2", now - TimeDelta::hours(24)),
            timed("ok3", now - TimeDelta::days(30)),
            untimed,
        ]);

        let buckets = catalog.by_recency(now);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[&RecencyBucket::Recent24h].len(), 1);
        assert_eq!(buckets[&RecencyBucket::Recent7d][0].id.as_deref(), Some("ok2"));
        assert_eq!(buckets[&RecencyBucket::Older].len(), 2);
    }

    #[test]
    fn test_newest_first() {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut catalog = EventCatalog::new();
        let mut untimed = event("ok0", FeedSource::Ogs);
        untimed.time = None;
        catalog.merge_new(vec![
            untimed,
            timed("ok1", base),
            timed("ok3", base + TimeDelta::days(2)),
            timed("ok2", base + TimeDelta::days(1)),
        ]);
        let ids: Vec<_> = catalog
            .newest_first()
            .iter()
            .map(|e| e.id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["ok3", "ok2", "ok1", "ok0"]);
    }
}
