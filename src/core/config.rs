use crate::core::error::ConfigError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// レコードペイロードの既定の上限 (バイト)
pub const DEFAULT_MAX_PAYLOAD: usize = 2048;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_payload_size: usize,
    pub byte_order: ByteOrder,
    pub on_record_error: RecordErrorPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

/// コンテナのカウント/長さフィールドのバイトオーダー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Native,
    Little,
    Big,
}

impl ByteOrder {
    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Native => u32::from_ne_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }

    pub fn u32_to_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Native => value.to_ne_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordErrorPolicy {
    Skip,
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            input: InputConfig {
                max_payload_size: DEFAULT_MAX_PAYLOAD,
                byte_order: ByteOrder::Native,
                on_record_error: RecordErrorPolicy::Skip,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
            logging: LoggingConfig {
                level: LevelFilter::Warn,
                file: None,
            },
        }
    }
}

impl Configuration {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Configuration::default();

        if let Some(value) = lookup("DISSECT_MAX_PAYLOAD") {
            let size = value
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid("DISSECT_MAX_PAYLOAD", &value, e.to_string()))?;
            if size == 0 {
                return Err(invalid("DISSECT_MAX_PAYLOAD", &value, "must be at least 1".to_string()));
            }
            config.input.max_payload_size = size;
        }

        if let Some(value) = lookup("DISSECT_BYTE_ORDER") {
            config.input.byte_order = match value.trim().to_ascii_lowercase().as_str() {
                "native" => ByteOrder::Native,
                "little" | "le" => ByteOrder::Little,
                "big" | "be" => ByteOrder::Big,
                _ => return Err(invalid("DISSECT_BYTE_ORDER", &value, "expected native, little or big".to_string())),
            };
        }

        if let Some(value) = lookup("DISSECT_ON_RECORD_ERROR") {
            config.input.on_record_error = match value.trim().to_ascii_lowercase().as_str() {
                "skip" => RecordErrorPolicy::Skip,
                "abort" => RecordErrorPolicy::Abort,
                _ => return Err(invalid("DISSECT_ON_RECORD_ERROR", &value, "expected skip or abort".to_string())),
            };
        }

        if let Some(value) = lookup("DISSECT_OUTPUT_FORMAT") {
            config.output.format = match value.trim().to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => return Err(invalid("DISSECT_OUTPUT_FORMAT", &value, "expected text or json".to_string())),
            };
        }

        if let Some(value) = lookup("DISSECT_LOG_LEVEL") {
            config.logging.level = value
                .trim()
                .parse::<LevelFilter>()
                .map_err(|e| invalid("DISSECT_LOG_LEVEL", &value, e.to_string()))?;
        }

        config.logging.file = lookup("DISSECT_LOG_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Configuration::from_lookup(|_| None).unwrap();
        assert_eq!(config.input.max_payload_size, 2048);
        assert_eq!(config.input.byte_order, ByteOrder::Native);
        assert_eq!(config.input.on_record_error, RecordErrorPolicy::Skip);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.logging.level, LevelFilter::Warn);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("DISSECT_MAX_PAYLOAD", "65535"),
            ("DISSECT_BYTE_ORDER", "BIG"),
            ("DISSECT_ON_RECORD_ERROR", "abort"),
            ("DISSECT_OUTPUT_FORMAT", "json"),
            ("DISSECT_LOG_LEVEL", "debug"),
            ("DISSECT_LOG_FILE", "dissect.log"),
        ]))
        .unwrap();

        assert_eq!(config.input.max_payload_size, 65535);
        assert_eq!(config.input.byte_order, ByteOrder::Big);
        assert_eq!(config.input.on_record_error, RecordErrorPolicy::Abort);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.level, LevelFilter::Debug);
        assert_eq!(config.logging.file, Some(PathBuf::from("dissect.log")));
    }

    #[test]
    fn test_log_level_is_stored_as_level_filter() {
        let config = Configuration::from_lookup(lookup_from(&[("DISSECT_LOG_LEVEL", "  TRACE ")])).unwrap();
        assert_eq!(config.logging.level, LevelFilter::Trace);

        let config = Configuration::from_lookup(lookup_from(&[("DISSECT_LOG_LEVEL", "off")])).unwrap();
        assert_eq!(config.logging.level, LevelFilter::Off);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Configuration::from_lookup(lookup_from(&[("DISSECT_MAX_PAYLOAD", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DISSECT_MAX_PAYLOAD", .. }));

        let err = Configuration::from_lookup(lookup_from(&[("DISSECT_MAX_PAYLOAD", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DISSECT_MAX_PAYLOAD", .. }));

        let err = Configuration::from_lookup(lookup_from(&[("DISSECT_ON_RECORD_ERROR", "retry")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DISSECT_ON_RECORD_ERROR", .. }));

        let err = Configuration::from_lookup(lookup_from(&[("DISSECT_LOG_LEVEL", "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DISSECT_LOG_LEVEL", .. }));
    }

    #[test]
    fn test_byte_order_round_trip() {
        assert_eq!(ByteOrder::Big.u32_from_bytes([0, 0, 0, 7]), 7);
        assert_eq!(ByteOrder::Little.u32_from_bytes([7, 0, 0, 0]), 7);
        assert_eq!(ByteOrder::Native.u32_from_bytes(ByteOrder::Native.u32_to_bytes(42)), 42);
    }
}
