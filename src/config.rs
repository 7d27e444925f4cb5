// src/config.rs
//
// User-facing port configuration.
//
// Parameters are kept as text exactly as the user wrote them and only turned
// into indices by `resolve`, which goes through the prefix-matching codec so
// "9600", "9600baud" and friends are accepted the same way everywhere.
//
// Example (TOML):
//   device = "/dev/ttyUSB0"
//   baud = "115200"
//   parity = "even"

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{Error, Result};
use crate::port::{LineSettings, PortDescriptor};
use crate::tlog;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PortConfig {
    pub device: String,
    #[serde(default = "default_baud")]
    pub baud: String,
    #[serde(default = "default_data_bits")]
    pub data_bits: String,
    #[serde(default = "default_parity")]
    pub parity: String,
    #[serde(default = "default_stop_bits")]
    pub stop_bits: String,
    #[serde(default = "default_flow_control")]
    pub flow_control: String,
    #[serde(default = "default_line_off")]
    pub dtr: String,
    #[serde(default = "default_line_off")]
    pub rts: String,
}

fn default_baud() -> String {
    "9600".to_string()
}
fn default_data_bits() -> String {
    "8".to_string()
}
fn default_parity() -> String {
    "none".to_string()
}
fn default_stop_bits() -> String {
    "1".to_string()
}
fn default_flow_control() -> String {
    "off".to_string()
}
fn default_line_off() -> String {
    "off".to_string()
}

impl PortConfig {
    /// Config for `device` with every parameter at its default.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            baud: default_baud(),
            data_bits: default_data_bits(),
            parity: default_parity(),
            stop_bits: default_stop_bits(),
            flow_control: default_flow_control(),
            dtr: default_line_off(),
            rts: default_line_off(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse JSON: {}", e)))
    }

    /// Load from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };

        tlog!("[config] Loaded port config for {} from {}", config.device, path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?,
            _ => toml::to_string_pretty(self)
                .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Parse every parameter. Fails on the first unrecognized value.
    pub fn resolve(&self) -> Result<LineSettings> {
        Ok(LineSettings {
            baud: self.baud.parse()?,
            data: self.data_bits.parse()?,
            parity: self.parity.parse()?,
            stop: self.stop_bits.parse()?,
            flow: self.flow_control.parse()?,
            dtr: self.dtr.parse()?,
            rts: self.rts.parse()?,
        })
    }

    /// A closed descriptor ready to hand to a backend.
    pub fn into_descriptor(self) -> Result<PortDescriptor> {
        let settings = self.resolve()?;
        Ok(PortDescriptor::new(self.device, &settings))
    }
}

impl From<&PortDescriptor> for PortConfig {
    /// Out-of-range descriptor fields come back as empty strings, which
    /// `resolve` rejects.
    fn from(port: &PortDescriptor) -> Self {
        let text = |s: Option<&'static str>| s.unwrap_or_default().to_string();
        Self {
            device: port.device.clone(),
            baud: text(codec::baud_str(port.baud)),
            data_bits: text(codec::data_str(port.data)),
            parity: text(codec::parity_str(port.parity)),
            stop_bits: text(codec::stop_str(port.stop)),
            flow_control: text(codec::flow_str(port.flow)),
            dtr: text(codec::dtr_str(port.dtr)),
            rts: text(codec::rts_str(port.rts)),
        }
    }
}

/// `<config dir>/rs232/port.toml`, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rs232")
        .join("port.toml")
}

// ============================================================================
// Tests
// ============================================================================
