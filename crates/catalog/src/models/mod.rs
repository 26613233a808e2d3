//! Firmware catalog data model, as returned by the vendor API.

mod checksum;
mod compile_time;
mod entry;
mod stage;

pub use self::checksum::Checksum;
pub use self::compile_time::CompileTime;
pub use self::entry::{DownloadVariant, FirmwareEntry};
pub use self::stage::Stage;
