#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod device;
pub mod session_file;
pub mod sqlite;

pub use device::Device;
pub use session_file::SessionFile;
pub use sqlite::SQLite;
