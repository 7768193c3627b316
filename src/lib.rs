//! Personal time tracker: log hours per category per day and review them
//! as KPIs, charts and an editable table.

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod query;
pub mod record;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;

pub use record::{ActivityRecord, Category};
pub use session::Session;
pub use stats::Summary;
pub use store::{CsvStore, Loaded};
