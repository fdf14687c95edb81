use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use gymlog_domain as domain;
use gymlog_web_app::{Settings, SettingsRepository, log};

const KEY_SETTINGS: &str = "settings";
const KEY_TOKEN: &str = "token";
const KEY_LOG: &str = "log";

/// Browser local storage for client settings, the bearer token and the log.
#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

fn read<T: serde::de::DeserializeOwned>(key: &str) -> Result<Option<T>, String> {
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => Ok(Some(value)),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => Err(err.to_string()),
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        Ok(read(KEY_SETTINGS)?.unwrap_or_default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

impl domain::TokenRepository for LocalStorage {
    async fn read_token(&self) -> Result<Option<domain::Token>, String> {
        Ok(read::<String>(KEY_TOKEN)?
            .filter(|token| !token.is_empty())
            .map(domain::Token::new))
    }

    async fn write_token(&self, token: &domain::Token) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_TOKEN, token.as_str()).map_err(|err| err.to_string())
    }

    async fn delete_token(&self) -> Result<(), String> {
        gloo_storage::LocalStorage::delete(KEY_TOKEN);
        Ok(())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        Ok(read(KEY_LOG).map_err(log::Error::Unknown)?.unwrap_or_default())
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
