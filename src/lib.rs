pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod paths;
pub mod store;
pub mod streak;
pub mod tui;
pub mod validate;
pub mod watch;

pub use error::{Error, Result, ValidationError};
pub use model::Task;
pub use store::TaskStore;
pub use streak::{StreakRecord, StreakTracker};
