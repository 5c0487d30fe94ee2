use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::loan::ANNUAL_RATE;
use crate::submission::{
    ChatDispatch, SimulatedSubmission, DEFAULT_CHAT_LINK_DELAY_MS, DEFAULT_CHAT_NUMBER,
    DEFAULT_SUBMISSION_DELAY_MS,
};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드(`auto`, `en`, `fr`, `es`)
    pub language: String,
    /// 번역 덮어쓰기 팩 디렉터리
    pub locale_pack_dir: Option<String>,
    /// 통화 선택을 저장하는 파일
    pub preferences_path: PathBuf,
    /// 상담 채팅 번호(국가번호 포함, 기호 없음)
    pub chat_number: String,
    /// 신청 제출 대기 시간 [ms]
    pub submission_delay_ms: u64,
    /// 확인 후 채팅 링크까지 대기 시간 [ms]
    pub chat_link_delay_ms: u64,
    /// tracing 필터 수준(`error`..`trace`)
    pub log_level: String,
    /// 명목 연이율(소수)
    pub annual_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            locale_pack_dir: None,
            preferences_path: PathBuf::from("preferences.toml"),
            chat_number: DEFAULT_CHAT_NUMBER.to_string(),
            submission_delay_ms: DEFAULT_SUBMISSION_DELAY_MS,
            chat_link_delay_ms: DEFAULT_CHAT_LINK_DELAY_MS,
            log_level: "info".to_string(),
            annual_rate: ANNUAL_RATE,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// 설정 파일을 로드하거나 없으면 기본 설정으로 새로 만든다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let cfg: Config = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(cfg)
        } else {
            let cfg = Config::default();
            cfg.save(path)?;
            tracing::info!(path = %path.display(), "default config written");
            Ok(cfg)
        }
    }

    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// `auto`이면 `None`.
    pub fn language_override(&self) -> Option<&str> {
        let lang = self.language.trim();
        if lang.is_empty() || lang.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(lang)
        }
    }

    pub fn submission_gateway(&self) -> SimulatedSubmission {
        SimulatedSubmission::new(Duration::from_millis(self.submission_delay_ms))
    }

    pub fn chat_dispatch(&self) -> ChatDispatch {
        ChatDispatch {
            number: self.chat_number.clone(),
            delay: Duration::from_millis(self.chat_link_delay_ms),
        }
    }
}
