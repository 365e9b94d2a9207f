pub mod alerts;
pub mod changes;
pub mod validator;

pub use alerts::generate_alerts;
pub use changes::detect_changes;
pub use validator::{validate, Validator};
