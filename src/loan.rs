use thiserror::Error;

/// 고정 명목 연이율(2.00%).
pub const ANNUAL_RATE: f64 = 0.02;

/// 원리금 균등상환 견적. 입력이 바뀔 때마다 다시 계산하며 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    /// 원금
    pub principal: f64,
    /// 상환 기간 [개월]
    pub term_months: u32,
    /// 명목 연이율(소수, 0.02 = 2%)
    pub annual_rate: f64,
    /// 월 상환액(반올림 전)
    pub monthly_payment: f64,
    /// 총 이자
    pub total_interest: f64,
    /// 총 상환액
    pub total_payable: f64,
}

impl LoanQuote {
    /// 화면의 "Total Cost" 항목. 총 이자와 같다.
    pub fn total_cost(&self) -> f64 {
        self.total_interest
    }

    /// 연이율 퍼센트 값(2.0 = 2.00%).
    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate * 100.0
    }
}

/// 대출 계산 입력 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    #[error("principal must be a positive finite amount (got {0})")]
    InvalidPrincipal(f64),
    #[error("term must be at least one month")]
    ZeroTerm,
    #[error("annual rate must be a non-negative finite number (got {0})")]
    InvalidRate(f64),
}

/// 월 상환액 M = P·r / (1 - (1+r)^-n), r = 연이율/12.
///
/// 이율이 0이면 분모가 0이 되므로 M = P/n 으로 계산한다. 내부 반올림은 없다.
pub fn monthly_payment(principal: f64, term_months: u32, annual_rate: f64) -> Result<f64, LoanError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanError::InvalidPrincipal(principal));
    }
    if term_months == 0 {
        return Err(LoanError::ZeroTerm);
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(LoanError::InvalidRate(annual_rate));
    }
    let n = term_months as f64;
    let r = annual_rate / 12.0;
    if r == 0.0 {
        return Ok(principal / n);
    }
    Ok(principal * r / (1.0 - (1.0 + r).powf(-n)))
}

/// 원금/기간/연이율로 견적 전체를 계산한다.
pub fn quote(principal: f64, term_months: u32, annual_rate: f64) -> Result<LoanQuote, LoanError> {
    let m = monthly_payment(principal, term_months, annual_rate)?;
    let total_payable = m * term_months as f64;
    Ok(LoanQuote {
        principal,
        term_months,
        annual_rate,
        monthly_payment: m,
        total_interest: total_payable - principal,
        total_payable,
    })
}
