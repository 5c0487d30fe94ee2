use std::time::Duration;

use loan_simulator::currency::{CurrencyCode, Nudge};
use loan_simulator::i18n::{Language, Translator};
use loan_simulator::loan::ANNUAL_RATE;
use loan_simulator::submission::{
    ChatDispatch, RecordingOpener, SimulatedSubmission, SubmissionError, SubmissionGateway,
};
use loan_simulator::wizard::{
    is_valid_email, Action, Application, Effect, EmploymentStatus, Field, StepKind,
    ValidationError, Wizard, WizardError,
};

fn fresh() -> Wizard {
    Wizard::new(CurrencyCode::Intl.config(), ANNUAL_RATE).expect("wizard")
}

fn quick_gateway() -> SimulatedSubmission {
    SimulatedSubmission::new(Duration::from_millis(5))
}

fn fill_valid(w: &mut Wizard) {
    w.edit_applicant(|a| {
        a.first_name = "Ana".into();
        a.last_name = "Ruiz".into();
        a.email = "ana.ruiz@example.com".into();
        a.phone = "+34 600 000 000".into();
        a.employment_status = Some(EmploymentStatus::SelfEmployed);
    })
    .expect("editable");
    w.set_robot_checked(true).expect("editable");
}

struct Refusing;

impl SubmissionGateway for Refusing {
    async fn submit(&self, _application: &Application) -> Result<(), SubmissionError> {
        Err(SubmissionError::Rejected("backend down".into()))
    }
}

struct Hanging;

impl SubmissionGateway for Hanging {
    async fn submit(&self, _application: &Application) -> Result<(), SubmissionError> {
        std::future::pending().await
    }
}

#[test]
fn starts_at_simulation_with_currency_minimum() {
    let w = fresh();
    assert_eq!(w.step(), StepKind::Simulate);
    assert_eq!(w.simulation().amount(), 5_000.0);
    assert_eq!(w.simulation().months(), 120);
    let q = w.quote().expect("quote");
    assert!((q.monthly_payment - 46.007).abs() < 1e-2);
}

#[test]
fn edits_are_clamped_and_snapped() {
    let mut w = fresh();
    w.edit_simulation(|s| s.set_amount(1.0)).expect("edit");
    assert_eq!(w.simulation().amount(), 5_000.0);
    w.edit_simulation(|s| s.set_amount(9e12)).expect("edit");
    assert_eq!(w.simulation().amount(), 15_000_000.0);
    w.edit_simulation(|s| s.nudge(Nudge::Up)).expect("edit");
    assert_eq!(w.simulation().amount(), 15_000_000.0);
    w.edit_simulation(|s| s.set_slider_position(50.0)).expect("edit");
    assert_eq!(w.simulation().amount(), 274_000.0);
    w.edit_simulation(|s| s.set_months(131)).expect("edit");
    assert_eq!(w.simulation().months(), 132);
}

#[test]
fn continue_advances_exactly_one_step() {
    let mut w = fresh();
    assert_eq!(w.proceed().expect("continue"), Effect::ScrollToTop);
    assert_eq!(w.step(), StepKind::CollectInfo);
    let err = w.proceed().expect_err("second continue");
    assert!(matches!(
        err,
        WizardError::InvalidTransition {
            from: StepKind::CollectInfo,
            action: Action::Continue
        }
    ));
    assert_eq!(w.step(), StepKind::CollectInfo);
}

#[test]
fn back_keeps_simulation_values() {
    let mut w = fresh();
    w.edit_simulation(|s| {
        s.set_amount(80_000.0);
        s.set_months(240);
    })
    .expect("edit");
    w.proceed().expect("continue");
    assert!(w.edit_simulation(|s| s.set_amount(1.0)).is_err());
    w.back().expect("back");
    assert_eq!(w.step(), StepKind::Simulate);
    assert_eq!(w.simulation().amount(), 80_000.0);
    assert_eq!(w.simulation().months(), 240);
    assert!(w.back().is_err());
}

#[test]
fn currency_switch_reclamps_without_conversion() {
    let mut w = fresh();
    w.set_currency(CurrencyCode::Ars.config()).expect("switch");
    assert_eq!(w.simulation().amount(), 500_000.0);
    w.set_currency(CurrencyCode::Eur.config()).expect("switch");
    assert_eq!(w.simulation().amount(), 500_000.0);

    w.proceed().expect("continue");
    w.set_currency(CurrencyCode::Clp.config()).expect("switch in form step");
    assert_eq!(w.simulation().amount(), 4_000_000.0);
}

#[test]
fn incomplete_form_cannot_submit() {
    let mut w = fresh();
    w.proceed().expect("continue");
    assert!(!w.can_submit());
    assert!(matches!(
        w.begin_submission(),
        Err(WizardError::Validation(ValidationError::RobotCheckRequired))
    ));

    w.set_robot_checked(true).expect("toggle");
    assert!(matches!(
        w.begin_submission(),
        Err(WizardError::Validation(ValidationError::Missing(Field::FirstName)))
    ));

    fill_valid(&mut w);
    w.edit_applicant(|a| a.email = "ana@localhost".into()).expect("edit");
    assert!(matches!(
        w.begin_submission(),
        Err(WizardError::Validation(ValidationError::InvalidEmail))
    ));
    assert_eq!(w.step(), StepKind::CollectInfo);
    assert!(!w.is_processing());
}

#[test]
fn missing_status_is_reported_last() {
    let mut w = fresh();
    w.proceed().expect("continue");
    fill_valid(&mut w);
    w.edit_applicant(|a| a.employment_status = None).expect("edit");
    assert!(matches!(
        w.collect_info().map(|s| s.check()),
        Some(Err(ValidationError::Missing(Field::EmploymentStatus)))
    ));
}

#[test]
fn processing_locks_the_form() {
    let mut w = fresh();
    w.proceed().expect("continue");
    fill_valid(&mut w);
    let app = w.begin_submission().expect("valid");
    assert_eq!(app.applicant.full_name(), "Ana Ruiz");
    assert!(w.is_processing());
    assert!(!w.can_submit());
    assert!(matches!(w.begin_submission(), Err(WizardError::SubmissionInProgress)));
    assert!(matches!(w.back(), Err(WizardError::SubmissionInProgress)));
    assert!(matches!(
        w.edit_applicant(|a| a.phone.clear()),
        Err(WizardError::SubmissionInProgress)
    ));
    assert_eq!(w.complete_submission(Ok(())).expect("confirm"), Effect::ScrollToTop);
    assert_eq!(w.step(), StepKind::Confirmed);
}

#[tokio::test]
async fn successful_submission_reaches_terminal_step() {
    let mut w = fresh();
    w.edit_simulation(|s| s.set_amount(5_000.0)).expect("edit");
    w.proceed().expect("continue");
    fill_valid(&mut w);
    assert!(w.can_submit());

    let effect = w.submit(&quick_gateway()).await.expect("submitted");
    assert_eq!(effect, Effect::ScrollToTop);
    assert_eq!(w.step(), StepKind::Confirmed);

    let confirmation = w.confirmation().expect("confirmed");
    assert_eq!(confirmation.application.quote.principal, 5_000.0);
    assert_eq!(confirmation.application.applicant.first_name, "Ana");

    assert!(matches!(w.proceed(), Err(WizardError::InvalidTransition { .. })));
    assert!(matches!(w.back(), Err(WizardError::InvalidTransition { .. })));
    assert!(matches!(
        w.set_currency(CurrencyCode::Eur.config()),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        w.edit_simulation(|s| s.set_months(12)),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        w.edit_applicant(|a| a.first_name.clear()),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        w.submit(&quick_gateway()).await,
        Err(WizardError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn failed_submission_returns_to_form() {
    let mut w = fresh();
    w.proceed().expect("continue");
    fill_valid(&mut w);
    let err = w.submit(&Refusing).await.expect_err("refused");
    assert!(matches!(err, WizardError::Submission(SubmissionError::Rejected(_))));
    assert_eq!(w.step(), StepKind::CollectInfo);
    assert!(!w.is_processing());
    assert!(w.can_submit());
}

#[tokio::test]
async fn abandoned_submission_unlocks_the_form() {
    let mut w = fresh();
    w.proceed().expect("continue");
    fill_valid(&mut w);
    let res = tokio::time::timeout(Duration::from_millis(20), w.submit(&Hanging)).await;
    assert!(res.is_err(), "gateway never answers");
    assert_eq!(w.step(), StepKind::CollectInfo);
    assert!(!w.is_processing());
    assert!(w.can_submit());
    w.edit_applicant(|a| a.phone = "+34 611 111 111".into()).expect("editable again");
    assert_eq!(w.submit(&quick_gateway()).await.expect("retry"), Effect::ScrollToTop);
}

#[tokio::test]
async fn chat_link_opens_once_with_localized_message() {
    let mut w = fresh();
    w.proceed().expect("continue");
    fill_valid(&mut w);
    w.submit(&quick_gateway()).await.expect("submitted");
    let confirmation = w.confirmation().expect("confirmed");

    let tr = Translator::new(Language::Es);
    let opener = RecordingOpener::new();
    let dispatch = ChatDispatch {
        number: "15550123456".into(),
        delay: Duration::from_millis(5),
    };
    let url = dispatch
        .dispatch(confirmation, &tr, &opener)
        .await
        .expect("opened");

    assert_eq!(opener.opened(), vec![url.clone()]);
    assert!(url.starts_with("https://wa.me/15550123456?text=Hola%20equipo%20Finanzas"));
    assert!(url.contains("Ana%20Ruiz"));
    assert!(url.contains("ana.ruiz%40example.com"));
    assert!(!url.contains('{'));
}

#[tokio::test]
async fn empty_chat_number_is_rejected() {
    let mut w = fresh();
    w.proceed().expect("continue");
    fill_valid(&mut w);
    w.submit(&quick_gateway()).await.expect("submitted");
    let dispatch = ChatDispatch {
        number: "  ".into(),
        delay: Duration::ZERO,
    };
    let opener = RecordingOpener::new();
    let res = dispatch
        .dispatch(w.confirmation().expect("confirmed"), &Translator::new(Language::En), &opener)
        .await;
    assert!(matches!(res, Err(SubmissionError::EmptyChatNumber)));
    assert!(opener.opened().is_empty());
}

#[test]
fn email_shape_rules() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("  first.last+tag@mail.example.org "));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a@.co"));
    assert!(!is_valid_email("a@b.co."));
    assert!(!is_valid_email("a@@b.co"));
    assert!(!is_valid_email("a b@c.co"));
}

#[test]
fn status_menu_numbers() {
    assert_eq!(EmploymentStatus::from_choice(1), Some(EmploymentStatus::Employed));
    assert_eq!(EmploymentStatus::from_choice(5), Some(EmploymentStatus::Other));
    assert_eq!(EmploymentStatus::from_choice(0), None);
    assert_eq!(EmploymentStatus::from_choice(6), None);
}
