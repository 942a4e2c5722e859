//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults apply when none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema
            .delivery
            .validate()
            .map_err(|e| Error::config_validation(e.to_string()).with_source(e))?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        "shopfusion.toml",
        ".shopfusion.toml",
        ".config/shopfusion.toml",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.logging.level, "info");
        assert_eq!(config.schema.delivery.free_shipping_threshold, 500_000);
        assert_eq!(config.schema.delivery.locations.len(), 5);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/shopfusion.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            [logging]
            level = "debug"

            [delivery]
            free_shipping_threshold = 750000
            "#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.logging.level, "debug");
        assert!(!config.schema.logging.json);
        assert_eq!(config.schema.delivery.free_shipping_threshold, 750_000);
        assert_eq!(config.schema.delivery.region_name, "jakarta");
        assert_eq!(config.schema.delivery.tiers.len(), 5);
    }

    #[test]
    fn test_custom_tiers_and_stores() {
        let file = write_config(
            r#"
            [delivery]
            region_name = "bandung"

            [delivery.service_area]
            north = -6.8
            south = -7.0
            east = 107.7
            west = 107.5

            [[delivery.tiers]]
            max_distance_km = 3.0
            cost = 10000
            method = "Kurir Motor"
            estimated_time = "1 jam"

            [[delivery.tiers]]
            cost = 20000
            method = "Kurir Mobil"
            estimated_time = "3 jam"

            [[delivery.locations]]
            id = "bdg-1"
            name = "ShopFusion Bandung"
            address = "Jl. Braga No. 1, Bandung"
            phone = "022-1234567"
            coordinate = { latitude = -6.9175, longitude = 107.6091 }
            "#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        let delivery = &config.schema.delivery;
        assert_eq!(delivery.tiers.len(), 2);
        assert_eq!(delivery.tiers[1].max_distance_km, None);
        assert_eq!(delivery.locations[0].id, "bdg-1");

        let policy = delivery.shipping_policy().unwrap();
        assert_eq!(policy.quote(3.0, 0).method, "Kurir Motor");
        assert_eq!(policy.quote(3.01, 0).cost, 20_000);
    }

    #[test]
    fn test_invalid_tiers_rejected() {
        let file = write_config(
            r#"
            [[delivery.tiers]]
            max_distance_km = 5.0
            cost = 10000
            method = "Express"
            estimated_time = "1 jam"
            "#,
        );

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[delivery\nregion_name = ");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }
}
