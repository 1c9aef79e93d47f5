pub mod form;
pub mod store;

pub use form::FormFields;
pub use store::{JsonLinesStore, RecordStore};
