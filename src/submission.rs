//! 신청 제출과 채팅 링크 열기 경계.
//!
//! 백엔드는 없다. 기본 게이트웨이는 일정 시간 기다렸다가 성공을 돌려줄 뿐이며,
//! 테스트나 다른 화면은 트레이트를 구현해 대체한다.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

use crate::i18n::Translator;
use crate::message::{self, MessageFields};
use crate::wizard::{Application, Confirmation};

/// 기본 제출 대기 시간 [ms]
pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 1500;
/// 확인 화면 진입 후 채팅 링크를 열기까지의 대기 시간 [ms]
pub const DEFAULT_CHAT_LINK_DELAY_MS: u64 = 3000;
/// 기본 상담 번호(국가번호 포함, 기호 없음).
pub const DEFAULT_CHAT_NUMBER: &str = "15550123456";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("could not open link {url}: {reason}")]
    LinkOpen { url: String, reason: String },
    #[error("chat number is empty")]
    EmptyChatNumber,
}

/// 신청서를 받아 처리하는 쪽.
pub trait SubmissionGateway {
    fn submit(
        &self,
        application: &Application,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

/// 정해진 시간만큼 기다린 뒤 항상 성공하는 게이트웨이.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedSubmission {
    pub delay: Duration,
}

impl SimulatedSubmission {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmission {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUBMISSION_DELAY_MS))
    }
}

impl SubmissionGateway for SimulatedSubmission {
    async fn submit(&self, application: &Application) -> Result<(), SubmissionError> {
        tracing::debug!(
            delay_ms = self.delay.as_millis() as u64,
            currency = %application.simulation.currency().code,
            "simulating submission"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// 외부 링크(브라우저/채팅 앱)를 여는 쪽.
pub trait LinkOpener {
    fn open(&self, url: &str) -> Result<(), SubmissionError>;
}

/// 링크를 표준 출력에 찍기만 한다. 터미널 모드용.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOpener;

impl LinkOpener for StdoutOpener {
    fn open(&self, url: &str) -> Result<(), SubmissionError> {
        println!("{url}");
        Ok(())
    }
}

/// 열린 링크를 기록만 한다.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        match self.opened.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), SubmissionError> {
        let mut guard = match self.opened.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(url.to_string());
        Ok(())
    }
}

/// 확인된 신청에서 채팅 메시지와 딥링크를 만든다.
pub fn confirmation_message(confirmation: &Confirmation, tr: &Translator) -> String {
    let app = &confirmation.application;
    let fields = MessageFields::new(&app.quote, &app.applicant, confirmation.currency(), tr);
    message::render_message(&fields, tr)
}

pub fn confirmation_link(
    confirmation: &Confirmation,
    tr: &Translator,
    number: &str,
) -> Result<String, SubmissionError> {
    if number.trim().is_empty() {
        return Err(SubmissionError::EmptyChatNumber);
    }
    Ok(message::chat_link(number, &confirmation_message(confirmation, tr)))
}

/// 확인 화면의 지연 채팅 연결 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDispatch {
    pub number: String,
    pub delay: Duration,
}

impl Default for ChatDispatch {
    fn default() -> Self {
        Self {
            number: DEFAULT_CHAT_NUMBER.to_string(),
            delay: Duration::from_millis(DEFAULT_CHAT_LINK_DELAY_MS),
        }
    }
}

impl ChatDispatch {
    /// 지연 후 링크를 한 번 연다. 연 URL을 돌려준다.
    pub async fn dispatch<O>(
        &self,
        confirmation: &Confirmation,
        tr: &Translator,
        opener: &O,
    ) -> Result<String, SubmissionError>
    where
        O: LinkOpener + ?Sized,
    {
        let url = confirmation_link(confirmation, tr, &self.number)?;
        tokio::time::sleep(self.delay).await;
        opener.open(&url)?;
        tracing::info!(lang = tr.language_code(), "chat link opened");
        Ok(url)
    }
}
