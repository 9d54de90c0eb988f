//! Configuration for frame-codec.
//!
//! The only runtime knobs are the tolerances the equality oracle uses.
//! Use [`ConfigBuilder`] at application startup to change them.

use std::sync::OnceLock;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Default relative tolerance.
pub const DEFAULT_RTOL: f64 = 1e-10;
/// Default absolute tolerance, in SI base units.
pub const DEFAULT_ATOL: f64 = 1e-12;
/// Default epoch tolerance, in seconds.
pub const DEFAULT_EPOCH_TOLERANCE_S: f64 = 1e-6;

/// Runtime configuration for frame-codec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Relative tolerance for numeric comparison.
    pub rtol: f64,
    /// Absolute tolerance for numeric comparison, in SI base units.
    pub atol: f64,
    /// Largest difference, in seconds, at which two epochs are the same instant.
    pub epoch_tolerance_s: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
            epoch_tolerance_s: DEFAULT_EPOCH_TOLERANCE_S,
        }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    rtol: Option<f64>,
    atol: Option<f64>,
    epoch_tolerance_s: Option<f64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relative tolerance.
    ///
    /// Default: `1e-10`
    pub fn rtol(mut self, rtol: f64) -> Self {
        self.rtol = Some(rtol);
        self
    }

    /// Set the absolute tolerance, in SI base units.
    ///
    /// Default: `1e-12`
    pub fn atol(mut self, atol: f64) -> Self {
        self.atol = Some(atol);
        self
    }

    /// Set the epoch tolerance in seconds.
    ///
    /// Default: `1e-6`
    ///
    /// # Example
    ///
    /// ```
    /// use frame_codec::config::ConfigBuilder;
    ///
    /// ConfigBuilder::new()
    ///     .epoch_tolerance(1e-3)
    ///     .init();
    /// ```
    pub fn epoch_tolerance(mut self, seconds: f64) -> Self {
        self.epoch_tolerance_s = Some(seconds);
        self
    }

    /// Build the configuration without installing it.
    pub fn build(self) -> Config {
        let default = Config::default();
        Config {
            rtol: self.rtol.unwrap_or(default.rtol),
            atol: self.atol.unwrap_or(default.atol),
            epoch_tolerance_s: self.epoch_tolerance_s.unwrap_or(default.epoch_tolerance_s),
        }
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once. Subsequent calls are ignored.
    /// Returns `true` if configuration was set, `false` if already initialized.
    pub fn init(self) -> bool {
        CONFIG.set(self.build()).is_ok()
    }
}

/// Initialize frame-codec with default configuration.
///
/// This is equivalent to `ConfigBuilder::new().init()`.
pub fn init_default() -> bool {
    ConfigBuilder::new().init()
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
