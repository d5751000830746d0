//! Error handling for Vigil.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod classify_error;
pub mod config_error;
pub mod detect_error;
pub mod receipt_error;
pub mod remediation_error;

pub use classify_error::ClassifyError;
pub use config_error::ConfigError;
pub use detect_error::DetectError;
pub use receipt_error::ReceiptError;
pub use remediation_error::RemediationError;
