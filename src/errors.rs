/*!
 * Error types for the dualdoc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while rendering markdown to PDF
#[derive(Error, Debug)]
pub enum RenderError {
    /// Error launching or talking to the headless browser
    #[error("Browser error: {0}")]
    Browser(String),

    /// Error navigating to the temporary HTML page
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Error capturing the PDF from the rendered page
    #[error("PDF capture failed: {0}")]
    Capture(String),

    /// Error writing the temporary HTML file
    #[error("Temp file error: {0}")]
    TempFile(#[from] std::io::Error),
}

/// Errors that can occur while composing the spread document
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Error loading a PDF document
    #[error("Failed to load PDF: {0}")]
    Load(String),

    /// A page object was missing or malformed
    #[error("Malformed page {page}: {reason}")]
    MalformedPage {
        /// 1-indexed page number
        page: u32,
        /// What was wrong with it
        reason: String,
    },

    /// Error saving the output document
    #[error("Failed to save PDF: {0}")]
    Save(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from rendering
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from spread composition
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
