//! 3단계 시뮬레이션 흐름: 시뮬레이션 → 신청 정보 입력 → 확인(종료).
//!
//! 상태는 데이터를 품은 합 타입이다. 단계별 구조체가 허용된 전이만 메서드로 갖고,
//! `Wizard`는 UI가 호출하는 진입점으로서 잘못된 전이를 오류로 돌려준다.

use thiserror::Error;

use crate::currency::{CurrencyConfig, Nudge};
use crate::i18n::keys;
use crate::loan::{self, LoanError, LoanQuote};
use crate::slider;
use crate::submission::{SubmissionError, SubmissionGateway};

/// 단계 식별자. 진행 표시와 오류 메시지에 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StepKind {
    Simulate,
    CollectInfo,
    Confirmed,
}

impl StepKind {
    pub const ALL: [StepKind; 3] = [StepKind::Simulate, StepKind::CollectInfo, StepKind::Confirmed];

    /// 1부터 시작하는 단계 번호.
    pub fn number(&self) -> u8 {
        match self {
            StepKind::Simulate => 1,
            StepKind::CollectInfo => 2,
            StepKind::Confirmed => 3,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            StepKind::Simulate => keys::STEP_SIMULATION,
            StepKind::CollectInfo => keys::STEP_INFORMATION,
            StepKind::Confirmed => keys::STEP_VALIDATION,
        }
    }
}

/// 전이 후 화면이 처리할 부수 효과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScrollToTop,
}

/// 요청된 동작 종류(전이 거부 사유 표시용).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EditSimulation,
    ChangeCurrency,
    Continue,
    Back,
    EditApplicant,
    Submit,
}

/// 흐름 제어 오류.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{action:?} is not allowed in step {from:?}")]
    InvalidTransition { from: StepKind, action: Action },
    #[error("a submission is already in progress")]
    SubmissionInProgress,
    #[error("form is incomplete: {0}")]
    Validation(#[from] ValidationError),
    #[error("loan calculation failed: {0}")]
    Loan(#[from] LoanError),
    #[error("submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

/// 고용 상태 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentStatus {
    Employed,
    PartTime,
    SelfEmployed,
    Retired,
    Other,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 5] = [
        EmploymentStatus::Employed,
        EmploymentStatus::PartTime,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Retired,
        EmploymentStatus::Other,
    ];

    pub fn label_key(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => keys::EMP_FULL,
            EmploymentStatus::PartTime => keys::EMP_PART,
            EmploymentStatus::SelfEmployed => keys::EMP_SELF,
            EmploymentStatus::Retired => keys::EMP_RETIRED,
            EmploymentStatus::Other => keys::EMP_OTHER,
        }
    }

    /// 메뉴 번호(1~5)로 선택한다.
    pub fn from_choice(n: u32) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }
}

/// 신청 폼 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    EmploymentStatus,
}

impl Field {
    pub fn label_key(&self) -> &'static str {
        match self {
            Field::FirstName => keys::SIM_FIRST_NAME,
            Field::LastName => keys::SIM_LAST_NAME,
            Field::Email => keys::SIM_EMAIL,
            Field::Phone => keys::SIM_PHONE,
            Field::EmploymentStatus => keys::SIM_EMPLOYMENT,
        }
    }
}

/// 폼 검증 오류. 제출 버튼 비활성 사유이기도 하다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field missing: {0:?}")]
    Missing(Field),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("robot check is not confirmed")]
    RobotCheckRequired,
}

impl ValidationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::Missing(_) => keys::ERR_REQUIRED,
            ValidationError::InvalidEmail => keys::ERR_EMAIL,
            ValidationError::RobotCheckRequired => keys::ERR_ROBOT,
        }
    }
}

/// 신청자 입력. 메모리에만 있고 저장하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub employment_status: Option<EmploymentStatus>,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// 필수 항목과 이메일 형식을 검사한다. 첫 번째 문제만 보고한다.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::Email, &self.email),
            (Field::Phone, &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::Missing(field));
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.employment_status.is_none() {
            return Err(ValidationError::Missing(Field::EmploymentStatus));
        }
        Ok(())
    }
}

/// 브라우저 email 입력 수준의 기본 형식 검사.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// 금액/기간/통화 선택값. 금액은 항상 통화 범위 안에 있다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    currency: &'static CurrencyConfig,
    amount: f64,
    months: u32,
    annual_rate: f64,
}

impl Simulation {
    /// 통화 최소 금액, 120개월로 시작한다.
    pub fn new(currency: &'static CurrencyConfig, annual_rate: f64) -> Result<Self, LoanError> {
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            return Err(LoanError::InvalidRate(annual_rate));
        }
        Ok(Self {
            currency,
            amount: currency.min_amount,
            months: slider::DEFAULT_MONTHS,
            annual_rate,
        })
    }

    pub fn currency(&self) -> &'static CurrencyConfig {
        self.currency
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// 직접 입력한 금액. 스냅 없이 범위로만 제한한다.
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = self.currency.clamp(amount);
    }

    /// 로그 슬라이더 위치로 금액을 정한다.
    pub fn set_slider_position(&mut self, position: f64) {
        self.amount = slider::amount_from_slider(position, self.currency);
    }

    pub fn slider_position(&self) -> f64 {
        slider::position_for_amount(self.amount, self.currency)
    }

    pub fn nudge(&mut self, direction: Nudge) {
        self.amount = self.currency.nudge(self.amount, direction);
    }

    pub fn set_months(&mut self, months: u32) {
        self.months = slider::snap_months(months);
    }

    /// 통화를 바꾸고 현재 금액을 새 범위로 다시 제한한다. 환율 변환은 없다.
    pub fn set_currency(&mut self, currency: &'static CurrencyConfig) {
        self.currency = currency;
        self.amount = currency.clamp(self.amount);
    }

    pub fn quote(&self) -> Result<LoanQuote, LoanError> {
        loan::quote(self.amount, self.months, self.annual_rate)
    }
}

/// 1단계.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateStep {
    pub simulation: Simulation,
}

impl SimulateStep {
    pub fn proceed(self) -> CollectInfoStep {
        CollectInfoStep {
            simulation: self.simulation,
            applicant: Applicant::default(),
            robot_checked: false,
            processing: false,
        }
    }
}

/// 2단계. 로봇 확인 체크박스는 화면용일 뿐 실제 봇 탐지는 하지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectInfoStep {
    pub simulation: Simulation,
    pub applicant: Applicant,
    pub robot_checked: bool,
    processing: bool,
}

impl CollectInfoStep {
    /// 입력한 신청자 정보는 버린다.
    pub fn back(self) -> SimulateStep {
        SimulateStep {
            simulation: self.simulation,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        if !self.robot_checked {
            return Err(ValidationError::RobotCheckRequired);
        }
        self.applicant.validate()
    }

    /// 검증을 통과하면 제출할 신청서를 만든다.
    pub fn application(&self) -> Result<Application, WizardError> {
        self.check()?;
        Ok(Application {
            simulation: self.simulation,
            applicant: self.applicant.clone(),
            quote: self.simulation.quote()?,
        })
    }

    /// 검증 후 단계를 소비해 신청서로 바꾼다.
    pub fn into_application(self) -> Result<Application, WizardError> {
        self.check()?;
        let quote = self.simulation.quote()?;
        Ok(Application {
            simulation: self.simulation,
            applicant: self.applicant,
            quote,
        })
    }
}

/// 제출 단위: 시뮬레이션 + 신청자 + 견적.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub simulation: Simulation,
    pub applicant: Applicant,
    pub quote: LoanQuote,
}

/// 3단계(종료). 전이 메서드가 없으므로 다른 단계로 돌아갈 수 없다.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub application: Application,
}

impl Confirmation {
    pub fn currency(&self) -> &'static CurrencyConfig {
        self.application.simulation.currency()
    }
}

/// 현재 단계와 그 데이터.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    Simulate(SimulateStep),
    CollectInfo(CollectInfoStep),
    Confirmed(Confirmation),
}

impl WizardState {
    pub fn kind(&self) -> StepKind {
        match self {
            WizardState::Simulate(_) => StepKind::Simulate,
            WizardState::CollectInfo(_) => StepKind::CollectInfo,
            WizardState::Confirmed(_) => StepKind::Confirmed,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        match self {
            WizardState::Simulate(s) => &s.simulation,
            WizardState::CollectInfo(s) => &s.simulation,
            WizardState::Confirmed(c) => &c.application.simulation,
        }
    }
}

/// UI가 사용하는 흐름 제어기.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    state: WizardState,
}

impl Wizard {
    pub fn new(currency: &'static CurrencyConfig, annual_rate: f64) -> Result<Self, LoanError> {
        Ok(Self {
            state: WizardState::Simulate(SimulateStep {
                simulation: Simulation::new(currency, annual_rate)?,
            }),
        })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> StepKind {
        self.state.kind()
    }

    pub fn simulation(&self) -> &Simulation {
        self.state.simulation()
    }

    pub fn quote(&self) -> Result<LoanQuote, LoanError> {
        self.simulation().quote()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.state {
            WizardState::Confirmed(c) => Some(c),
            _ => None,
        }
    }

    pub fn collect_info(&self) -> Option<&CollectInfoStep> {
        match &self.state {
            WizardState::CollectInfo(step) => Some(step),
            _ => None,
        }
    }

    fn reject(&self, action: Action) -> WizardError {
        WizardError::InvalidTransition {
            from: self.step(),
            action,
        }
    }

    /// 1단계의 시뮬레이션 값을 수정한다.
    pub fn edit_simulation<F>(&mut self, edit: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut Simulation),
    {
        match &mut self.state {
            WizardState::Simulate(step) => {
                edit(&mut step.simulation);
                Ok(())
            }
            _ => Err(self.reject(Action::EditSimulation)),
        }
    }

    /// 통화 변경. 1, 2단계에서 허용하며 금액을 새 범위로 다시 제한한다.
    pub fn set_currency(&mut self, currency: &'static CurrencyConfig) -> Result<(), WizardError> {
        let simulation = match &mut self.state {
            WizardState::Simulate(step) => &mut step.simulation,
            WizardState::CollectInfo(step) if !step.processing => &mut step.simulation,
            WizardState::CollectInfo(_) => return Err(WizardError::SubmissionInProgress),
            WizardState::Confirmed(_) => return Err(self.reject(Action::ChangeCurrency)),
        };
        let before = simulation.amount();
        simulation.set_currency(currency);
        tracing::info!(
            currency = %currency.code,
            amount_before = before,
            amount_after = simulation.amount(),
            "currency changed"
        );
        Ok(())
    }

    /// 1 → 2단계.
    pub fn proceed(&mut self) -> Result<Effect, WizardError> {
        let WizardState::Simulate(step) = &self.state else {
            return Err(self.reject(Action::Continue));
        };
        let next = step.clone().proceed();
        tracing::info!(
            amount = next.simulation.amount(),
            months = next.simulation.months(),
            "simulation accepted, collecting applicant info"
        );
        self.state = WizardState::CollectInfo(next);
        Ok(Effect::ScrollToTop)
    }

    /// 2 → 1단계. 처리 중에는 되돌릴 수 없다.
    pub fn back(&mut self) -> Result<(), WizardError> {
        let WizardState::CollectInfo(step) = &self.state else {
            return Err(self.reject(Action::Back));
        };
        if step.processing {
            return Err(WizardError::SubmissionInProgress);
        }
        let prev = step.clone().back();
        tracing::debug!("returned to simulation step");
        self.state = WizardState::Simulate(prev);
        Ok(())
    }

    /// 2단계 신청자 입력을 수정한다.
    pub fn edit_applicant<F>(&mut self, edit: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut Applicant),
    {
        match &mut self.state {
            WizardState::CollectInfo(step) if !step.processing => {
                edit(&mut step.applicant);
                Ok(())
            }
            WizardState::CollectInfo(_) => Err(WizardError::SubmissionInProgress),
            _ => Err(self.reject(Action::EditApplicant)),
        }
    }

    pub fn set_robot_checked(&mut self, checked: bool) -> Result<(), WizardError> {
        match &mut self.state {
            WizardState::CollectInfo(step) if !step.processing => {
                step.robot_checked = checked;
                Ok(())
            }
            WizardState::CollectInfo(_) => Err(WizardError::SubmissionInProgress),
            _ => Err(self.reject(Action::EditApplicant)),
        }
    }

    /// 제출 버튼 활성 여부.
    pub fn can_submit(&self) -> bool {
        self.collect_info()
            .is_some_and(|step| !step.processing && step.check().is_ok())
    }

    pub fn is_processing(&self) -> bool {
        self.collect_info().is_some_and(CollectInfoStep::is_processing)
    }

    /// 제출 시작: 검증 후 처리 중 표시를 켜고 신청서를 돌려준다.
    ///
    /// 처리 중에는 편집/뒤로가기/재제출이 모두 거부된다.
    pub fn begin_submission(&mut self) -> Result<Application, WizardError> {
        let step = match &mut self.state {
            WizardState::CollectInfo(step) => step,
            _ => return Err(self.reject(Action::Submit)),
        };
        if step.processing {
            return Err(WizardError::SubmissionInProgress);
        }
        let application = step.application()?;
        step.processing = true;
        tracing::info!(
            amount = application.quote.principal,
            months = application.quote.term_months,
            "submission started"
        );
        Ok(application)
    }

    /// 제출 결과 반영. 성공하면 3단계로, 실패하면 2단계 입력 상태로 돌아간다.
    pub fn complete_submission(
        &mut self,
        outcome: Result<(), SubmissionError>,
    ) -> Result<Effect, WizardError> {
        let step = match &mut self.state {
            WizardState::CollectInfo(step) if step.processing => step,
            _ => return Err(self.reject(Action::Submit)),
        };
        if let Err(err) = outcome {
            step.processing = false;
            tracing::warn!(error = %err, "submission failed");
            return Err(err.into());
        }
        let application = step.application()?;
        tracing::info!("submission confirmed");
        self.state = WizardState::Confirmed(Confirmation { application });
        Ok(Effect::ScrollToTop)
    }

    /// 제출 전체를 한 번에 수행한다: 검증 → 게이트웨이 대기 → 3단계.
    ///
    /// 대기 중에 future가 버려지면 처리 중 표시를 풀고 2단계 입력 상태로 남긴다.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Effect, WizardError>
    where
        G: SubmissionGateway,
    {
        let application = self.begin_submission()?;
        let mut guard = PendingSubmission {
            wizard: self,
            armed: true,
        };
        let outcome = gateway.submit(&application).await;
        guard.armed = false;
        guard.wizard.complete_submission(outcome)
    }
}

/// 진행 중인 제출. 결과를 받기 전에 해제되면 처리 중 표시를 되돌린다.
struct PendingSubmission<'a> {
    wizard: &'a mut Wizard,
    armed: bool,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let WizardState::CollectInfo(step) = &mut self.wizard.state {
            step.processing = false;
            tracing::warn!("submission cancelled before completion");
        }
    }
}
