//! 로컬 키/값 설정 저장소. 현재는 선택 통화 하나만 기억한다.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::currency::{CurrencyCode, CurrencyConfig};

/// 선택 통화 저장 키.
pub const CURRENCY_KEY: &str = "finanzas_currency";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 문자열 키/값 저장소.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// 평평한 TOML 테이블 파일 하나에 저장한다. 쓰기마다 파일 전체를 다시 쓴다.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let table: toml::Table = toml::from_str(&content)?;
        Ok(table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect())
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // 깨진 파일은 덮어쓴다.
        let mut all = self.read_all().unwrap_or_default();
        all.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, toml::to_string(&all)?)?;
        Ok(())
    }
}

/// 메모리 저장소. 테스트와 저장을 끈 실행에 쓴다.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 저장된 통화를 읽는다. 없거나 알 수 없는 값, 읽기 실패는 모두 기본 통화(INTL)로 처리한다.
pub fn load_currency<S>(store: &S) -> &'static CurrencyConfig
where
    S: PreferenceStore + ?Sized,
{
    match store.get(CURRENCY_KEY) {
        Ok(Some(raw)) => match raw.parse::<CurrencyCode>() {
            Ok(code) => {
                tracing::debug!(currency = %code, "restored saved currency");
                code.config()
            }
            Err(err) => {
                tracing::debug!(error = %err, "ignoring saved currency");
                CurrencyCode::DEFAULT.config()
            }
        },
        Ok(None) => CurrencyCode::DEFAULT.config(),
        Err(err) => {
            tracing::debug!(error = %err, "preference store unreadable, using default currency");
            CurrencyCode::DEFAULT.config()
        }
    }
}

pub fn save_currency<S>(store: &S, code: CurrencyCode) -> Result<(), PreferenceError>
where
    S: PreferenceStore + ?Sized,
{
    store.set(CURRENCY_KEY, code.as_str())?;
    tracing::debug!(currency = %code, "saved currency preference");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_defaults_then_remembers() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(load_currency(&store).code, CurrencyCode::Intl);
        save_currency(&store, CurrencyCode::Eur).unwrap();
        assert_eq!(load_currency(&store).code, CurrencyCode::Eur);
        save_currency(&store, CurrencyCode::Ars).unwrap();
        assert_eq!(load_currency(&store).code, CurrencyCode::Ars);
    }

    #[test]
    fn unknown_code_falls_back() {
        let store = MemoryPreferenceStore::new();
        store.set(CURRENCY_KEY, "XYZ").unwrap();
        assert_eq!(load_currency(&store).code, CurrencyCode::Intl);
    }
}
