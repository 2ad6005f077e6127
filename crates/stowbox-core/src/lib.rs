pub mod file;
pub mod filetype;
pub mod format;
pub mod usage;
pub mod user;

pub use file::{FileCategory, FileRecord};
pub use filetype::file_type;
pub use usage::TotalSpace;
pub use user::UserRecord;
