//! Durable [`PreferenceStore`](lotlist_core::PreferenceStore) backends.

mod json_file;

pub use json_file::JsonFilePreferences;
pub use lotlist_core::MemoryPreferences;
