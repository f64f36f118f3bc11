//! Report export configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Report export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Path to the Pandoc executable; searched on PATH when unset
    pub pandoc_path: Option<String>,

    /// PDF conversion timeout in seconds
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 300 {
            return Err(ValidationError::InvalidPdfTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_pdf_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let config = ExportConfig::default();
        assert!(config.pandoc_path.is_none());
        assert_eq!(config.pdf_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = ExportConfig {
            pdf_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPdfTimeout));
    }
}
