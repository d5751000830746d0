//! Configuration system for Vigil.
//! TOML-based, layered resolution: env > project file > defaults.

mod audit_config;
mod detector_config;
mod remediation_config;
mod vigil_config;

pub use audit_config::AuditConfig;
pub use detector_config::DetectorConfig;
pub use remediation_config::RemediationConfig;
pub use vigil_config::VigilConfig;
