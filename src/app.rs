use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::currency::CurrencyConfig;
use crate::i18n::{keys, Translator};
use crate::loan::{self, LoanError};
use crate::preferences::{self, PreferenceError, PreferenceStore};
use crate::slider;
use crate::submission::{LinkOpener, SubmissionError};
use crate::ui_cli::{self, AmountInput, FormChoice, SimulateChoice};
use crate::wizard::{StepKind, Wizard, WizardError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/터미널 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 설정 저장소 오류
    #[error("환경설정 저장 오류: {0}")]
    Preference(#[from] PreferenceError),
    /// 대출 계산 오류
    #[error("대출 계산 오류: {0}")]
    Loan(#[from] LoanError),
    /// 흐름 제어 오류
    #[error("진행 오류: {0}")]
    Wizard(#[from] WizardError),
    /// 제출/링크 오류
    #[error("제출 오류: {0}")]
    Submission(#[from] SubmissionError),
    /// 표준 입력이 닫힘
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

/// 대화 없이 견적 한 건을 출력한다. 금액은 통화 범위로, 기간은 12개월 단위로 맞춘다.
pub fn print_quote_once(
    config: &Config,
    tr: &Translator,
    currency: &CurrencyConfig,
    amount: f64,
    months: u32,
) -> Result<(), AppError> {
    let principal = currency.clamp(amount);
    let term = slider::snap_months(months);
    let quote = loan::quote(principal, term, config.annual_rate)?;
    ui_cli::print_quote(tr, currency, &quote);
    Ok(())
}

/// CLI 마법사의 메인 루프를 실행한다.
pub async fn run<S, O>(
    config: &Config,
    tr: &Translator,
    store: &S,
    opener: &O,
) -> Result<(), AppError>
where
    S: PreferenceStore + ?Sized,
    O: LinkOpener + ?Sized,
{
    let mut wizard = Wizard::new(preferences::load_currency(store), config.annual_rate)?;
    let gateway = config.submission_gateway();

    loop {
        ui_cli::print_header(tr, wizard.step());
        match wizard.step() {
            StepKind::Simulate => {
                let sim = *wizard.simulation();
                ui_cli::print_quote(tr, sim.currency(), &sim.quote()?);
                match ui_cli::simulate_menu(tr)? {
                    SimulateChoice::Amount => {
                        let input = ui_cli::read_amount(tr)?;
                        wizard.edit_simulation(|s| match input {
                            AmountInput::Value(v) => s.set_amount(v),
                            AmountInput::Step(direction) => s.nudge(direction),
                        })?;
                    }
                    SimulateChoice::Duration => {
                        let months = ui_cli::read_months(tr)?;
                        wizard.edit_simulation(|s| s.set_months(months))?;
                    }
                    SimulateChoice::Currency => {
                        ui_cli::print_currency_list(tr);
                        if let Some(code) = ui_cli::read_currency(tr)? {
                            wizard.set_currency(code.config())?;
                            if let Err(err) = preferences::save_currency(store, code) {
                                tracing::warn!(error = %err, "could not persist currency");
                            }
                        }
                    }
                    SimulateChoice::Continue => {
                        wizard.proceed()?;
                    }
                    SimulateChoice::Exit => break,
                }
            }
            StepKind::CollectInfo => {
                let sim = *wizard.simulation();
                println!("{}", tr.t(keys::FORM_RECAP));
                ui_cli::print_quote(tr, sim.currency(), &sim.quote()?);
                match ui_cli::form_menu(tr)? {
                    FormChoice::Fill => {
                        let mut applicant = wizard
                            .collect_info()
                            .map(|step| step.applicant.clone())
                            .unwrap_or_default();
                        ui_cli::fill_applicant(tr, &mut applicant)?;
                        let robot = ui_cli::read_robot_check(tr)?;
                        wizard.edit_applicant(|a| *a = applicant)?;
                        wizard.set_robot_checked(robot)?;

                        if let Some(Err(err)) = wizard.collect_info().map(|step| step.check()) {
                            println!("{}", ui_cli::validation_message(tr, &err));
                            continue;
                        }
                        println!("{}", tr.t(keys::FORM_PROCESSING));
                        wizard.submit(&gateway).await?;
                    }
                    FormChoice::Back => wizard.back()?,
                    FormChoice::Exit => break,
                }
            }
            StepKind::Confirmed => {
                let Some(confirmation) = wizard.confirmation() else {
                    break;
                };
                ui_cli::print_confirmation(tr, confirmation, &config.chat_number);
                println!("\n{}", tr.t(keys::SUCCESS_OPENING));
                println!("{}", tr.t(keys::CLI_LINK_READY));
                config
                    .chat_dispatch()
                    .dispatch(confirmation, tr, opener)
                    .await?;
                break;
            }
        }
    }
    println!("{}", tr.t(keys::CLI_EXIT));
    Ok(())
}
