use std::io::{self, Write};

use crate::app::AppError;
use crate::currency::{self, CurrencyCode, CurrencyConfig, Nudge};
use crate::i18n::{keys, Translator};
use crate::loan::LoanQuote;
use crate::message;
use crate::wizard::{Applicant, Confirmation, EmploymentStatus, StepKind, ValidationError};

/// 1단계 메뉴 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulateChoice {
    Amount,
    Duration,
    Currency,
    Continue,
    Exit,
}

/// 2단계 메뉴 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormChoice {
    Fill,
    Back,
    Exit,
}

/// 금액 입력: 직접 값 또는 한 스텝 증감.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput {
    Value(f64),
    Step(Nudge),
}

/// 금액 입력 문자열을 해석한다. 공백, 작은따옴표 등은 무시한다.
///
/// `.`과 `,`는 뒤에 숫자가 정확히 세 자리 오면 천 단위 구분자, 아니면 소수점으로 본다.
/// 그래서 "5.000", "5,000", "5 000"은 모두 5000이고 "12.5"는 12.5다.
pub fn parse_amount_input(raw: &str) -> Option<AmountInput> {
    match raw.trim() {
        "+" => return Some(AmountInput::Step(Nudge::Up)),
        "-" => return Some(AmountInput::Step(Nudge::Down)),
        _ => {}
    }
    let chars: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .collect();
    let mut number = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let following = chars[i + 1..].iter().take_while(|d| d.is_ascii_digit()).count();
        if following != 3 {
            number.push('.');
        }
    }
    number.parse::<f64>().ok().map(AmountInput::Value)
}

/// y/o/s(예/oui/sí)로 시작하면 동의로 본다.
pub fn parse_yes(raw: &str) -> bool {
    matches!(
        raw.trim().chars().next().map(|c| c.to_ascii_lowercase()),
        Some('y' | 'o' | 's')
    )
}

/// 단계 표시줄: 현재 단계를 대괄호로 감싼다.
pub fn step_indicator(tr: &Translator, current: StepKind) -> String {
    StepKind::ALL
        .iter()
        .map(|step| {
            let label = format!("{}. {}", step.number(), tr.t(step.label_key()));
            if *step == current {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ›  ")
}

/// 검증 오류를 현재 언어 문장으로 만든다.
pub fn validation_message(tr: &Translator, err: &ValidationError) -> String {
    let text = tr.t(err.message_key());
    match err {
        ValidationError::Missing(field) => text.replace("{field}", tr.t(field.label_key())),
        _ => text.to_string(),
    }
}

pub fn print_header(tr: &Translator, step: StepKind) {
    println!("\n{}", tr.t(keys::CLI_TITLE));
    println!("{}", step_indicator(tr, step));
}

/// 견적 카드 출력.
pub fn print_quote(tr: &Translator, currency: &CurrencyConfig, quote: &LoanQuote) {
    println!(
        "{}: {}",
        tr.t(keys::SIM_BORROW_LABEL),
        currency.display_money(quote.principal)
    );
    println!(
        "{}: {} {}",
        tr.t(keys::SIM_DURATION_LABEL),
        quote.term_months,
        tr.t(keys::SIM_MONTHS)
    );
    println!(
        "{}: {}",
        tr.t(keys::SIM_MONTHLY_PAYMENT),
        currency.display_money(quote.monthly_payment)
    );
    println!(
        "{}: {}",
        tr.t(keys::SIM_TOTAL_COST),
        currency.display_money(quote.total_cost())
    );
    println!("{}: {:.2}%", tr.t(keys::SIM_APR), quote.annual_rate_percent());
    println!("{}", tr.t(keys::SIM_DISCLAIMER));
}

/// 카탈로그 전체를 표로 출력한다.
pub fn print_currency_list(tr: &Translator) {
    println!("{}", tr.t(keys::SIM_SELECT_CURRENCY));
    for c in currency::catalog() {
        println!(
            "  {:<5} {:<4} {:<16} {} – {}",
            c.code.as_str(),
            c.symbol,
            c.display_name,
            c.display_money(c.min_amount),
            c.display_money(c.max_amount)
        );
    }
}

pub fn print_confirmation(tr: &Translator, confirmation: &Confirmation, chat_number: &str) {
    let app = &confirmation.application;
    let currency = confirmation.currency();
    println!("\n{}", tr.t(keys::SUCCESS_TITLE));
    println!(
        "{}",
        tr.t(keys::SUCCESS_THANKS)
            .replace("{name}", app.applicant.first_name.trim())
    );
    println!("\n{}", tr.t(keys::FORM_RECAP));
    print_quote(tr, currency, &app.quote);
    println!("\n{}", tr.t(keys::SUCCESS_DELAY_TITLE));
    println!("{}", tr.t(keys::SUCCESS_DELAY_TEXT));
    println!(
        "{}: {}",
        tr.t(keys::SUCCESS_SUPPORT),
        message::support_link(chat_number)
    );
}

pub fn simulate_menu(tr: &Translator) -> Result<SimulateChoice, AppError> {
    println!("{}", tr.t(keys::CLI_MENU));
    loop {
        let sel = read_line(tr.t(keys::CLI_SELECT))?;
        match sel.trim() {
            "1" => return Ok(SimulateChoice::Amount),
            "2" => return Ok(SimulateChoice::Duration),
            "3" => return Ok(SimulateChoice::Currency),
            "4" => return Ok(SimulateChoice::Continue),
            "0" => return Ok(SimulateChoice::Exit),
            _ => println!("{}", tr.t(keys::CLI_INVALID_SELECTION)),
        }
    }
}

pub fn form_menu(tr: &Translator) -> Result<FormChoice, AppError> {
    println!("{}", tr.t(keys::CLI_FORM_MENU));
    loop {
        let sel = read_line(tr.t(keys::CLI_SELECT))?;
        match sel.trim() {
            "1" => return Ok(FormChoice::Fill),
            "2" => return Ok(FormChoice::Back),
            "0" => return Ok(FormChoice::Exit),
            _ => println!("{}", tr.t(keys::CLI_INVALID_SELECTION)),
        }
    }
}

pub fn read_amount(tr: &Translator) -> Result<AmountInput, AppError> {
    loop {
        let s = read_line(tr.t(keys::CLI_AMOUNT_PROMPT))?;
        match parse_amount_input(&s) {
            Some(input) => return Ok(input),
            None => println!("{}", tr.t(keys::CLI_INVALID_NUMBER)),
        }
    }
}

pub fn read_months(tr: &Translator) -> Result<u32, AppError> {
    loop {
        let s = read_line(tr.t(keys::CLI_MONTHS_PROMPT))?;
        match s.trim().parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::CLI_INVALID_NUMBER)),
        }
    }
}

/// 통화 코드를 입력받는다. 빈 입력은 취소.
pub fn read_currency(tr: &Translator) -> Result<Option<CurrencyCode>, AppError> {
    loop {
        let s = read_line(tr.t(keys::CLI_CURRENCY_PROMPT))?;
        if s.trim().is_empty() {
            return Ok(None);
        }
        match s.parse::<CurrencyCode>() {
            Ok(code) => return Ok(Some(code)),
            Err(_) => println!("{}", tr.t(keys::CLI_UNKNOWN_CURRENCY)),
        }
    }
}

fn read_field(tr: &Translator, key: &str, current: &str) -> Result<String, AppError> {
    let prompt = if current.is_empty() {
        format!("{}: ", tr.t(key))
    } else {
        format!("{} [{current}]: ", tr.t(key))
    };
    let s = read_line(&prompt)?;
    let s = s.trim();
    Ok(if s.is_empty() { current.to_string() } else { s.to_string() })
}

fn read_status(tr: &Translator) -> Result<EmploymentStatus, AppError> {
    loop {
        let s = read_line(tr.t(keys::CLI_STATUS_PROMPT))?;
        let choice = s.trim().parse::<u32>().ok().and_then(EmploymentStatus::from_choice);
        match choice {
            Some(status) => return Ok(status),
            None => println!("{}", tr.t(keys::CLI_INVALID_SELECTION)),
        }
    }
}

/// 신청 폼 전체를 입력받는다. 빈 입력은 기존 값을 유지한다.
pub fn fill_applicant(tr: &Translator, applicant: &mut Applicant) -> Result<(), AppError> {
    println!("\n{}  ({})", tr.t(keys::SIM_FORM_TITLE), tr.t(keys::SIM_FORM_SUBTITLE));
    applicant.first_name = read_field(tr, keys::SIM_FIRST_NAME, &applicant.first_name)?;
    applicant.last_name = read_field(tr, keys::SIM_LAST_NAME, &applicant.last_name)?;
    applicant.email = read_field(tr, keys::SIM_EMAIL, &applicant.email)?;
    applicant.phone = read_field(tr, keys::SIM_PHONE, &applicant.phone)?;
    applicant.employment_status = Some(read_status(tr)?);
    Ok(())
}

pub fn read_robot_check(tr: &Translator) -> Result<bool, AppError> {
    let s = read_line(tr.t(keys::CLI_ROBOT_PROMPT))?;
    Ok(parse_yes(&s))
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 닫히면 `AppError::InputClosed`.
pub fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}
