pub mod document;
pub mod entry;
pub mod record;
pub mod settings;

pub use document::{ListDocument, MOVIES_CONFIG_KEY, MOVIES_KEY};
pub use entry::Entry;
pub use record::{Record, RecordDetails, SearchHit};
pub use settings::ListSettings;
