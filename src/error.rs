//! Error types for the mineral_scan library

use thiserror::Error;

/// Result type alias for mineral_scan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for specimen analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image bytes could not be decoded as a supported raster format
    #[error("Invalid image at index {index}: {message}")]
    InvalidImage {
        index: usize,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Zero images supplied (caller contract violation)
    #[error("No images supplied for analysis")]
    EmptyInput,

    /// More images supplied than the request bound allows
    #[error("Too many images: {count} supplied (maximum {max})")]
    TooManyImages { count: usize, max: usize },

    /// Reference catalog collaborator failed; analysis degrades rather than aborts
    #[error("Reference catalog unavailable: {message}")]
    CatalogUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Narrative generation collaborator failed
    #[error("Narrative generator unavailable: {message}")]
    NarrativeUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an invalid image error with decode context
    pub fn invalid_image<E>(index: usize, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidImage {
            index,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a catalog unavailability error with context
    pub fn catalog<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CatalogUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a narrative generator error with context
    pub fn narrative<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::NarrativeUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error permits a degraded result instead of aborting
    /// the request (characteristics returned, candidate list empty)
    pub fn is_degradable(&self) -> bool {
        matches!(self, AnalysisError::CatalogUnavailable { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InvalidImage { .. } => {
                "One of the uploaded images could not be read. Please check the file format and try again.".to_string()
            }
            AnalysisError::EmptyInput => {
                "At least one image is required.".to_string()
            }
            AnalysisError::TooManyImages { max, .. } => {
                format!("Too many images uploaded. Please submit at most {} images.", max)
            }
            AnalysisError::CatalogUnavailable { .. } => {
                "The mineral reference catalog is temporarily unavailable. Please try again later.".to_string()
            }
            AnalysisError::NarrativeUnavailable { .. } => {
                "Guidance generation is temporarily unavailable. Please try again later.".to_string()
            }
        }
    }
}
