//! Application-wide constants.

/// Name of the configuration directory under the platform config root.
pub const CONFIG_DIR_NAME: &str = "kle-layout";

/// Default drawing units per layout unit (a 19 mm key pitch).
pub const DEFAULT_SPACING: f64 = 19.0;
