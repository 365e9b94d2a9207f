pub mod etl;
pub mod export;
pub mod pipeline;
pub mod source;

pub use crate::domain::model::{CookieRecord, MaintenanceRun};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
