pub mod store;
pub mod view;

pub use store::{RecordBook, RecordStore};
pub use view::{RecordFilter, RecordOrder};
