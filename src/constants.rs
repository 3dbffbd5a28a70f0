//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed parts of the Hyper-key
//! contract with Karabiner-Elements.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Hyperlayer";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "hyperlayer";

/// Physical key promoted into the virtual Hyper modifier.
pub const HYPER_KEY: &str = "caps_lock";

/// Key emitted when the Hyper key is tapped alone.
pub const HYPER_ALONE_KEY: &str = "escape";

/// Engine variable that tracks whether the Hyper key is held.
pub const HYPER_VARIABLE: &str = "hyper";

/// Prefix for compiler-allocated sublayer state variables.
pub const SUBLAYER_VARIABLE_PREFIX: &str = "hyper_sublayer_";

/// Profile name used when the configuration does not override it.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Location of the Karabiner-Elements configuration, relative to the home
/// directory. Fixed by the engine, not by this tool.
pub const KARABINER_CONFIG_RELATIVE: &str = ".config/karabiner/karabiner.json";
