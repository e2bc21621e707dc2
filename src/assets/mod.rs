//! Local file assets: the card logo and the SPA shell.
//!
//! Both are checked at startup so a broken deployment fails before serving.

use std::path::Path;

use base64::Engine;

use crate::errors::AppError;

/// PNG logo embedded into every card as a `data:` URI.
#[derive(Debug, Clone)]
pub struct Logo {
    data_uri: String,
}

impl Logo {
    /// Read the logo from disk. A missing or empty file is a configuration error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::Configuration(format!("Failed to read logo {}: {}", path.display(), e))
        })?;

        if bytes.is_empty() {
            return Err(AppError::Configuration(format!(
                "Logo {} is empty",
                path.display()
            )));
        }

        Ok(Self::from_png_bytes(&bytes))
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data_uri: format!("data:image/png;base64,{}", encoded),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}

/// Fail unless the SPA shell exists as a regular file.
pub fn verify_shell(path: &Path) -> Result<(), AppError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AppError::Configuration(format!(
            "SPA shell {} not found",
            path.display()
        )))
    }
}

/// Read the SPA shell for one request.
pub async fn load_shell(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Configuration(format!("Failed to read SPA shell {}: {}", path.display(), e))
    })
}
