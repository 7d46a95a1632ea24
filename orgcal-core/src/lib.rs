//! Core of orgcal: turns calendar events into an org-mode agenda.
//!
//! - `event`: provider-neutral calendar and event records
//! - `org`: the outline document and the per-event renderer
//! - `aggregate`: walks the approved calendars and drives rendering
//! - `service`: the seam a calendar backend implements

pub mod aggregate;
pub mod date_range;
pub mod error;
pub mod event;
pub mod org;
pub mod service;

pub use aggregate::CalendarAggregator;
pub use date_range::FetchWindow;
pub use error::{OrgCalError, OrgCalResult};
pub use event::*;
pub use org::{EventRenderer, OrgDocument};
pub use service::{CalendarService, EventPage};
