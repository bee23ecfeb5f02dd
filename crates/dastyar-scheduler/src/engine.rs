//! Trigger engine — the once-a-minute decision loop.
//!
//! The decision is pure (`due_slots`); the engine wraps it with the store
//! round-trip, and `spawn_trigger_loop` drives it from a tokio interval.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use crate::pipeline::ExecutionPipeline;
use crate::schedule::Schedule;
use crate::store::ScheduleStore;

/// One decided firing: the topic and the slot that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Firing {
    pub topic: String,
    pub slot: String,
}

/// Which slots should fire at `now`.
///
/// A slot is due iff it equals `now` formatted as `HH:MM` and its `last_run`
/// entry, read in `now`'s zone, is absent or falls on an earlier calendar
/// date. Keying the guard on the date (not elapsed time) means a slot fires
/// at most once per day even if the clock loops back over the same minute.
/// Malformed slot strings never equal the formatted clock, so they never fire.
pub fn due_slots<Tz>(schedule: &Schedule, now: &DateTime<Tz>) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let current = now.format("%H:%M").to_string();
    let today = now.date_naive();
    schedule
        .times
        .iter()
        .filter(|slot| **slot == current)
        .filter(|slot| {
            match schedule.last_run.get(*slot) {
                Some(&ms) => now
                    .timezone()
                    .timestamp_millis_opt(ms)
                    .earliest()
                    .is_none_or(|last| last.date_naive() != today),
                None => true,
            }
        })
        .cloned()
        .collect()
}

/// Loads, decides, and records firings. Stateless across ticks apart from
/// what it re-reads from the store.
pub struct TriggerEngine {
    store: ScheduleStore,
}

impl TriggerEngine {
    pub fn new(store: ScheduleStore) -> Self {
        Self { store }
    }

    /// One tick at an explicit clock reading.
    ///
    /// For every due slot, `last_run[slot]` is written and the schedule is
    /// persisted BEFORE the firing is handed to the caller. The generation
    /// call has not started yet, so an overlapping tick already sees the
    /// slot as fired today; this also means a failed generation is not
    /// retried until the next day.
    ///
    /// A store failure (load or save) skips this tick entirely; the next
    /// tick retries from a fresh load.
    pub fn tick_at<Tz>(&self, now: &DateTime<Tz>) -> Vec<Firing>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut schedule = match self.store.load() {
            Ok(Some(schedule)) => schedule,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("⚠️ Schedule unreadable, skipping tick: {e}");
                return Vec::new();
            }
        };
        if schedule.times.is_empty() {
            return Vec::new();
        }

        let due = due_slots(&schedule, now);
        if due.is_empty() {
            return Vec::new();
        }

        let now_ms = now.timestamp_millis();
        for slot in &due {
            schedule.last_run.insert(slot.clone(), now_ms);
        }
        if let Err(e) = self.store.save(&schedule) {
            tracing::warn!("⚠️ Could not persist last_run, skipping firings: {e}");
            return Vec::new();
        }

        due.into_iter()
            .map(|slot| {
                tracing::info!("🔔 Slot {slot} due for topic '{}'", schedule.topic);
                Firing {
                    topic: schedule.topic.clone(),
                    slot,
                }
            })
            .collect()
    }
}

/// Spawn the trigger loop as a background tokio task.
///
/// Each firing runs on its own spawned task, so an in-flight generation
/// never delays the next tick. Abort the returned handle on teardown;
/// firings already in flight run to completion best-effort.
pub fn spawn_trigger_loop(
    engine: TriggerEngine,
    pipeline: Arc<ExecutionPipeline>,
    tick_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("⏰ Trigger loop started (check every {tick_secs}s)");
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(tick_secs));
        loop {
            interval.tick().await;
            for firing in engine.tick_at(&Local::now()) {
                let pipeline = Arc::clone(&pipeline);
                tokio::spawn(async move {
                    pipeline.fire(&firing.topic, &firing.slot).await;
                });
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn schedule(times: &[&str]) -> Schedule {
        Schedule::new("قهوه", times.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_due_requires_exact_match() {
        let s = schedule(&["09:00", "18:30"]);
        assert_eq!(due_slots(&s, &at(2026, 8, 29, 9, 0, 15)), vec!["09:00"]);
        assert!(due_slots(&s, &at(2026, 8, 29, 9, 1, 0)).is_empty());
    }

    #[test]
    fn test_malformed_slot_never_matches() {
        let s = schedule(&["9:00", "09:00:00", "morning"]);
        assert!(due_slots(&s, &at(2026, 8, 29, 9, 0, 0)).is_empty());
    }

    #[test]
    fn test_same_day_last_run_suppresses() {
        let mut s = schedule(&["09:00"]);
        s.last_run
            .insert("09:00".into(), at(2026, 8, 29, 9, 0, 0).timestamp_millis());
        // Clock back over the same minute later the same day
        assert!(due_slots(&s, &at(2026, 8, 29, 9, 0, 45)).is_empty());
    }

    #[test]
    fn test_previous_day_last_run_fires() {
        let mut s = schedule(&["09:00"]);
        s.last_run
            .insert("09:00".into(), at(2026, 8, 28, 9, 0, 0).timestamp_millis());
        assert_eq!(due_slots(&s, &at(2026, 8, 29, 9, 0, 0)), vec!["09:00"]);
    }

    fn temp_engine(name: &str) -> (PathBuf, TriggerEngine, ScheduleStore) {
        let dir = std::env::temp_dir().join(format!("dastyar-test-{name}"));
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("schedule.json");
        (
            dir,
            TriggerEngine::new(ScheduleStore::new(&path)),
            ScheduleStore::new(&path),
        )
    }

    #[test]
    fn test_tick_fires_once_and_persists_before_returning() {
        let (dir, engine, store) = temp_engine("engine-fire");
        store.save(&schedule(&["09:00"])).unwrap();

        let now = at(2026, 8, 29, 9, 0, 0);
        let firings = engine.tick_at(&now);
        assert_eq!(
            firings,
            vec![Firing {
                topic: "قهوه".into(),
                slot: "09:00".into()
            }]
        );

        // last_run is already on disk, before any generation has run
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.last_run["09:00"], now.timestamp_millis());

        // Second tick the same day: suppressed
        assert!(engine.tick_at(&at(2026, 8, 29, 9, 0, 30)).is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_next_day_fires_again() {
        let (dir, engine, store) = temp_engine("engine-next-day");
        store.save(&schedule(&["09:00"])).unwrap();

        assert_eq!(engine.tick_at(&at(2026, 8, 29, 9, 0, 0)).len(), 1);
        let next_day = at(2026, 8, 30, 9, 0, 0);
        assert_eq!(engine.tick_at(&next_day).len(), 1);
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.last_run["09:00"], next_day.timestamp_millis());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_absent_or_empty_schedule_is_noop() {
        let (dir, engine, store) = temp_engine("engine-empty");
        assert!(engine.tick_at(&at(2026, 8, 29, 9, 0, 0)).is_empty());

        store.save(&schedule(&[])).unwrap();
        assert!(engine.tick_at(&at(2026, 8, 29, 9, 0, 0)).is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unreadable_schedule_skips_tick() {
        let (dir, engine, store) = temp_engine("engine-corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{broken").unwrap();
        // Must not panic, must not fire
        assert!(engine.tick_at(&at(2026, 8, 29, 9, 0, 0)).is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_last_run_stands_even_without_generation() {
        // tick_at records the firing before any pipeline work happens, so a
        // later failure downstream cannot reopen the slot for today.
        let (dir, engine, store) = temp_engine("engine-used-up");
        store.save(&schedule(&["09:00"])).unwrap();

        let firings = engine.tick_at(&at(2026, 8, 29, 9, 0, 0));
        assert_eq!(firings.len(), 1);
        drop(firings); // pretend generation failed; nothing rolls back

        assert!(engine.tick_at(&at(2026, 8, 29, 9, 0, 59)).is_empty());
        let saved = store.load().unwrap().unwrap();
        assert!(saved.last_run.contains_key("09:00"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
