//! Event domain: the store of seen events, their display projection, and
//! the reconciler that merges each snapshot into both.

mod reconcile;
mod row;
mod store;

pub use reconcile::Reconciler;
pub use row::{format_event_time, local_zone, DisplayRow, Severity, COLUMN_COUNT, COLUMN_TITLES, TIME_FORMAT};
pub use store::{EventRecord, EventStore, Upserted};
