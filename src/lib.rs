pub mod cli;
pub mod clock;
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod tui;
pub mod utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use models::{Note, Reminder, Task};
pub use store::Store;
pub use utils::Profile;
