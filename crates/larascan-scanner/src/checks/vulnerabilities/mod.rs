//! Misconfigurations and exposures.

mod csrf;
mod debug_mode;
mod sensitive_files;
mod tools;

pub use csrf::CsrfToken;
pub use debug_mode::DebugMode;
pub use sensitive_files::{SensitiveFiles, SENSITIVE_PATHS};
pub use tools::{ToolsDetection, TOOL_PATHS};
