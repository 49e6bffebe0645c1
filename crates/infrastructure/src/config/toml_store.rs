use async_trait::async_trait;
use dnsbox_application::ports::ConfigStore;
use dnsbox_domain::{Config, ConfigError, DomainError, MutableSections, MutableSnapshot};
use std::path::PathBuf;
use tokio::sync::Mutex;
use toml_edit::{value, Array, DocumentMut, Item, Table};
use tracing::debug;

/// Persists mutable sections into the TOML config file.
///
/// The file on disk is edited in place: only `rules.domains`,
/// `rules.suffixes` and `blocklist.urls` are replaced; every other key,
/// comment and formatting choice is preserved. When the file does not exist
/// yet it is written from the startup configuration.
///
/// Saves are serialized; the snapshot is taken under the save lock.
pub struct TomlConfigStore {
    path: PathBuf,
    base: Config,
    save_lock: Mutex<()>,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>, base: Config) -> Self {
        Self {
            path: path.into(),
            base,
            save_lock: Mutex::new(()),
        }
    }

    async fn render(&self, sections: &MutableSnapshot) -> Result<String, ConfigError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => merge_sections(&content, sections),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut config = self.base.clone();
                config.rules.domains = sections.domains.clone();
                config.rules.suffixes = sections.suffixes.clone();
                config.blocklist.urls = sections.blocklist_urls.clone();
                toml::to_string_pretty(&config).map_err(|e| ConfigError::Write(e.to_string()))
            }
            Err(e) => Err(ConfigError::Read(format!("{}: {}", self.path.display(), e))),
        }
    }

    async fn write(&self, content: String) -> Result<(), ConfigError> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| ConfigError::Write(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| ConfigError::Write(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl ConfigStore for TomlConfigStore {
    async fn save(&self, sections: &MutableSections) -> Result<(), DomainError> {
        let _guard = self.save_lock.lock().await;
        let snapshot = sections.snapshot();

        let content = self
            .render(&snapshot)
            .await
            .map_err(|e| DomainError::Config(e.to_string()))?;
        self.write(content)
            .await
            .map_err(|e| DomainError::Config(e.to_string()))?;

        debug!(path = %self.path.display(), "Configuration persisted");
        Ok(())
    }
}

/// Replaces the mutable keys of `content`, leaving the rest untouched.
pub fn merge_sections(content: &str, sections: &MutableSnapshot) -> Result<String, ConfigError> {
    let mut doc: DocumentMut = content
        .parse()
        .map_err(|e: toml_edit::TomlError| ConfigError::Parse(e.to_string()))?;

    set_string_array(&mut doc, "rules", "domains", &sections.domains)?;
    set_string_array(&mut doc, "rules", "suffixes", &sections.suffixes)?;
    set_string_array(&mut doc, "blocklist", "urls", &sections.blocklist_urls)?;

    Ok(doc.to_string())
}

fn set_string_array(
    doc: &mut DocumentMut,
    table: &str,
    key: &str,
    values: &[String],
) -> Result<(), ConfigError> {
    let item = doc.entry(table).or_insert(Item::Table(Table::new()));
    let table_like = item
        .as_table_like_mut()
        .ok_or_else(|| ConfigError::Edit(format!("'{}' is not a table", table)))?;

    let array: Array = values.iter().map(String::as_str).collect();
    table_like.insert(key, value(array));
    Ok(())
}
