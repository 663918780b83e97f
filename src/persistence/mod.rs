pub mod files;
pub mod settings;
pub mod store;

pub use files::{ensure_focus_dir, init_local_focus, log_file};
pub use settings::{load_settings, save_settings, Settings};
pub use store::{keys, KvStore};
