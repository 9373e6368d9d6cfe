//! Data transfer objects for command input

mod requests;

pub use requests::{PurgeRequest, DEFAULT_PURGE_AMOUNT, MAX_PURGE_AMOUNT};
