pub mod adoptium;
pub mod download;
pub mod http_client;
pub mod platform;

pub use adoptium::{AdoptiumClient, ReleaseSource, RuntimeDescriptor};
pub use download::{ArchiveFormat, ProgressCallback, ProgressFn};
pub use http_client::HttpClient;
pub use platform::Platform;
