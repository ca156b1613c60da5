//! Configuration structures for the extraction service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::statement::Layout;

/// Main configuration for extrato.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtratoConfig {
    /// Web server configuration.
    pub server: ServerConfig,

    /// Statement processing configuration.
    pub processing: ProcessingConfig,

    /// Spreadsheet export configuration.
    pub export: ExportConfig,
}

/// Web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,

    /// Port to listen on.
    pub port: u16,

    /// Maximum accepted size of a single uploaded file, in bytes.
    pub max_file_size: usize,

    /// Maximum accepted size of a whole upload request, in bytes.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            max_file_size: 20 * 1024 * 1024,
            max_request_size: 100 * 1024 * 1024,
        }
    }
}

/// Statement processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Layout preselected in the upload form and used by the CLI by default.
    pub default_layout: Layout,

    /// Reuse results for files already processed in this session.
    pub cache_enabled: bool,

    /// Maximum number of cached records.
    pub cache_capacity: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_layout: Layout::Caixa,
            cache_enabled: true,
            cache_capacity: 256,
        }
    }
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the single worksheet.
    pub sheet_name: String,

    /// Download file name prefix; the layout slug and extension are appended.
    pub file_name_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Dados".to_string(),
            file_name_prefix: "extratos_processados".to_string(),
        }
    }
}

impl ExportConfig {
    /// Download file name for a batch processed with `layout`.
    pub fn file_name(&self, layout: Layout) -> String {
        format!("{}_{}.xlsx", self.file_name_prefix, layout.slug())
    }
}

impl ExtratoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Load from `path` when given, otherwise from the default location if a
    /// file exists there, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Default configuration file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("extrato")
            .join("config.json")
    }
}
