//! # Dastyar Scheduler
//!
//! Recurring post-scheduling trigger engine: once a minute, compare the
//! wall clock against the configured `HH:MM` slots and fire content
//! generation for every slot that has not already fired today.
//!
//! ## Architecture
//! ```text
//! Trigger loop (tokio interval, 60s)
//!   ├── ScheduleStore: load schedule.json each tick
//!   ├── due_slots(schedule, now): pure decision, date-keyed idempotency
//!   ├── last_run[slot] = now → save  (written BEFORE the await)
//!   └── per due slot → tokio::spawn ExecutionPipeline::fire
//!         ├── ContentGenerator (async, fallible)
//!         ├── HistorySink::append  (on success)
//!         └── Notifier::send      (on success, best-effort)
//! ```
//!
//! A slot fires at most once per calendar day. The `last_run` timestamp is
//! persisted before the generation call starts, so an overlapping tick or a
//! failed call can never produce a second firing the same day.

pub mod engine;
pub mod history;
pub mod notify;
pub mod pipeline;
pub mod schedule;
pub mod store;

pub use engine::{Firing, TriggerEngine, due_slots, spawn_trigger_loop};
pub use history::{HistoryFile, HistoryItem, HistorySink, MemoryHistory, PromptRecord};
pub use notify::{LogNotifier, Notification, Notifier, WebhookNotifier};
pub use pipeline::ExecutionPipeline;
pub use schedule::Schedule;
pub use store::ScheduleStore;
