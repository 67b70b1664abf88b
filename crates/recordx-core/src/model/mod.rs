pub mod fields;
pub mod patch;
pub mod record;

pub use fields::{Address, Birthday, Email, Name, Nickname, Notes, Phone, Relationship, Tag};
pub use patch::{FieldPatch, RecordPatch, TagsPatch};
pub use record::Record;
