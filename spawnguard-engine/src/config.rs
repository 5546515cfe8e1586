//! Module configuration: the blacklists and flags the rule set is built from.
//!
//! The on-disk format is a TOML file with an `[entity-create]` section:
//!
//! ```toml
//! [entity-create]
//! ban-network-owner = true
//! check-peds-for-weapons = true
//! illegal-models = ["khanjali", "0xB779A091", -1216765807]
//! blacklisted-weapons = ["WEAPON_RAILGUN"]
//! ```

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use spawnguard_types::ModelRef;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raw configuration values for the entity-creation module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub illegal_models: Vec<ModelRef>,
    #[serde(default)]
    pub blacklisted_weapons: Vec<ModelRef>,
    #[serde(default)]
    pub ban_network_owner: bool,
    #[serde(default)]
    pub check_peds_for_weapons: bool,
}

impl GuardConfig {
    /// Parses the `[entity-create]` section of a TOML document.
    /// A document without the section yields the default config.
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.into_config())
    }

    /// Reads and parses a TOML config file.
    pub fn load_from(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            path = ?path,
            illegal_models = config.illegal_models.len(),
            blacklisted_weapons = config.blacklisted_weapons.len(),
            "Loaded entity-create config"
        );
        Ok(config)
    }
}

/// Supplies the module configuration at load time.
pub trait ConfigProvider {
    fn guard_config(&self) -> Result<GuardConfig, EngineError>;
}

/// A fixed, in-memory configuration.
impl ConfigProvider for GuardConfig {
    fn guard_config(&self) -> Result<GuardConfig, EngineError> {
        Ok(self.clone())
    }
}

/// Reads the config file on every load, so a reload picks up edits.
#[derive(Debug, Clone)]
pub struct TomlConfigFile {
    path: PathBuf,
}

impl TomlConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for TomlConfigFile {
    fn guard_config(&self) -> Result<GuardConfig, EngineError> {
        debug!(path = ?self.path, "Reading entity-create config");
        GuardConfig::load_from(&self.path)
    }
}

/// Raw TOML structure matching the config file format.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "entity-create")]
    entity_create: EntityCreateSection,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct EntityCreateSection {
    #[serde(default)]
    ban_network_owner: bool,
    #[serde(default)]
    check_peds_for_weapons: bool,
    #[serde(default)]
    illegal_models: Vec<ModelRef>,
    #[serde(default)]
    blacklisted_weapons: Vec<ModelRef>,
}

impl ConfigFile {
    fn into_config(self) -> GuardConfig {
        let section = self.entity_create;
        GuardConfig {
            illegal_models: section.illegal_models,
            blacklisted_weapons: section.blacklisted_weapons,
            ban_network_owner: section.ban_network_owner,
            check_peds_for_weapons: section.check_peds_for_weapons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_full_section() {
        let config = GuardConfig::from_toml_str(
            r#"
[entity-create]
ban-network-owner = true
check-peds-for-weapons = true
illegal-models = ["khanjali", "0xB779A091", -1216765807]
blacklisted-weapons = ["WEAPON_RAILGUN"]
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            GuardConfig {
                illegal_models: vec![
                    ModelRef::Name("khanjali".into()),
                    ModelRef::Name("0xB779A091".into()),
                    ModelRef::Hash(-1_216_765_807),
                ],
                blacklisted_weapons: vec![ModelRef::Name("WEAPON_RAILGUN".into())],
                ban_network_owner: true,
                check_peds_for_weapons: true,
            }
        );
    }

    #[test]
    fn missing_keys_default_to_disabled() {
        let config = GuardConfig::from_toml_str(
            r#"
[entity-create]
illegal-models = ["adder"]
"#,
        )
        .unwrap();

        assert_eq!(config.illegal_models.len(), 1);
        assert!(config.blacklisted_weapons.is_empty());
        assert!(!config.ban_network_owner);
        assert!(!config.check_peds_for_weapons);
    }

    #[test]
    fn missing_section_is_default() {
        let config = GuardConfig::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = GuardConfig::from_toml_str("[entity-create\nban-network-owner = ").unwrap_err();
        assert!(matches!(err, EngineError::TomlParse(_)));
    }

    #[test]
    fn wrong_value_type_is_an_error() {
        let err = GuardConfig::from_toml_str(
            r#"
[entity-create]
ban-network-owner = "yes"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::TomlParse(_)));
    }

    /// Helper: write TOML content to a temp file and return the provider.
    fn provider_for(contents: &str) -> (tempfile::TempDir, TomlConfigFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spawnguard.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, TomlConfigFile::new(path))
    }

    #[test]
    fn file_provider_reads_config() {
        let (_dir, provider) = provider_for(
            r#"
[entity-create]
ban-network-owner = true
illegal-models = ["adder", "khanjali"]
"#,
        );

        let config = provider.guard_config().unwrap();
        assert!(config.ban_network_owner);
        assert_eq!(config.illegal_models.len(), 2);
    }

    #[test]
    fn file_provider_rereads_after_edit() {
        let (_dir, provider) = provider_for("[entity-create]\nban-network-owner = false\n");
        assert!(!provider.guard_config().unwrap().ban_network_owner);

        std::fs::write(provider.path(), "[entity-create]\nban-network-owner = true\n").unwrap();
        assert!(provider.guard_config().unwrap().ban_network_owner);
    }

    #[test]
    fn file_provider_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = TomlConfigFile::new(dir.path().join("nonexistent.toml"));

        let err = provider.guard_config().unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn static_provider_returns_copy() {
        let config = GuardConfig {
            ban_network_owner: true,
            ..Default::default()
        };
        assert_eq!(config.guard_config().unwrap(), config);
    }
}
