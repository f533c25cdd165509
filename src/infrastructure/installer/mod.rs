pub mod utils;

pub use utils::{create_progress_bar, extract_archive, PROGRESS_SCALE};
