//! Document upload limits

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl UploadsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_is_ten_mebibytes() {
        assert_eq!(UploadsConfig::default().max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_zero_limit_fails() {
        let config = UploadsConfig { max_upload_bytes: 0 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUploadLimit));
    }
}
