use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use studio_catalog::ContentCatalog;
use studio_navigation::NavigationConfig;

pub const CONFIG_ENV: &str = "STUDIO_CONFIG";

/// `studio.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    pub navigation: NavigationConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Replaces the compiled-in content; relative to the config file
    pub path: Option<PathBuf>,
}

impl StudioConfig {
    /// `--config`, then `$STUDIO_CONFIG`, then defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(catalog_path) = config.catalog.path.take() {
            let resolved = if catalog_path.is_relative() {
                path.parent()
                    .map_or_else(|| catalog_path.clone(), |dir| dir.join(&catalog_path))
            } else {
                catalog_path
            };
            config.catalog.path = Some(resolved);
        }

        config
            .navigation
            .validate()
            .with_context(|| format!("Invalid [navigation] in {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn load_catalog(&self) -> Result<ContentCatalog> {
        match &self.catalog.path {
            Some(path) => ContentCatalog::from_file(path)
                .with_context(|| format!("Invalid catalog {}", path.display())),
            None => Ok(ContentCatalog::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.toml");
        fs::write(&path, "").unwrap();

        let config = StudioConfig::from_file(&path).unwrap();
        assert_eq!(config.navigation, NavigationConfig::default());
        assert!(config.catalog.path.is_none());
        assert_eq!(config.load_catalog().unwrap().services().len(), 6);
    }

    #[test]
    fn relative_catalog_path_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.toml");
        fs::write(
            &path,
            "[navigation]\nhighlight_ms = 50\n\n[catalog]\npath = \"content.json\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("content.json"),
            r#"{"page": [{"id": "services"}, {"id": "portfolio"}]}"#,
        )
        .unwrap();

        let config = StudioConfig::from_file(&path).unwrap();
        assert_eq!(config.navigation.highlight_ms, 50);
        assert_eq!(config.catalog.path, Some(dir.path().join("content.json")));
        assert!(config.load_catalog().unwrap().services().is_empty());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.toml");

        fs::write(&path, "[navigaton]\n").unwrap();
        assert!(StudioConfig::from_file(&path).is_err());

        fs::write(&path, "[navigation]\nhighlight_ms = 0\n").unwrap();
        let err = StudioConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("highlight_ms"), "{err:#}");
    }
}
