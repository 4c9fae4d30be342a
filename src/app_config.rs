use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Output page width for a single half, in PDF points (A4 by default)
    #[serde(default = "default_page_width")]
    pub page_width: f32,

    /// Output page height in PDF points (A4 by default)
    #[serde(default = "default_page_height")]
    pub page_height: f32,

    /// Rendering config
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Headless-browser rendering configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RenderConfig {
    /// Fixed delay after navigation, in milliseconds, so deferred math
    /// typesetting can finish before the PDF is captured
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Page margins passed to the browser print call, in inches
    #[serde(default = "default_margin_inches")]
    pub margin_inches: f64,

    /// Per-call browser operation timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            margin_inches: default_margin_inches(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            render: RenderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if !(self.page_width > 0.0) || !(self.page_height > 0.0) {
            return Err(anyhow!(
                "Invalid page size: {}x{}",
                self.page_width,
                self.page_height
            ));
        }

        if self.render.margin_inches < 0.0 {
            return Err(anyhow!(
                "Invalid margin: {}",
                self.render.margin_inches
            ));
        }

        if self.render.timeout_secs == 0 {
            return Err(anyhow!("Render timeout must be at least 1 second"));
        }

        // An overly long settle delay stalls every page render
        if self.render.settle_delay_ms > 60_000 {
            return Err(anyhow!(
                "Settle delay too large: {} ms",
                self.render.settle_delay_ms
            ));
        }

        Ok(())
    }
}

// A4 in PDF points
fn default_page_width() -> f32 {
    595.28
}

fn default_page_height() -> f32 {
    841.89
}

fn default_settle_delay_ms() -> u64 {
    1500
}

fn default_margin_inches() -> f64 {
    0.4
}

fn default_timeout_secs() -> u64 {
    60
}
