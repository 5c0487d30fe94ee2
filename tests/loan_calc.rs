use loan_simulator::loan::{self, LoanError, ANNUAL_RATE};

fn closed_form(p: f64, n: u32, annual: f64) -> f64 {
    let r = annual / 12.0;
    p * r / (1.0 - (1.0 + r).powi(-(n as i32)))
}

#[test]
fn reference_quote_matches_closed_form() {
    let q = loan::quote(5_000.0, 120, ANNUAL_RATE).expect("valid quote");
    let expected = closed_form(5_000.0, 120, 0.02);
    assert!((q.monthly_payment - expected).abs() < 1e-9);
    assert!((q.monthly_payment - 46.007).abs() < 1e-2, "M={}", q.monthly_payment);
    assert!((q.total_payable - q.monthly_payment * 120.0).abs() < 1e-9);
    assert!((q.total_interest - (q.total_payable - 5_000.0)).abs() < 1e-9);
    assert!((q.total_interest - 520.8).abs() < 0.5, "interest={}", q.total_interest);
}

#[test]
fn zero_rate_divides_principal_evenly() {
    let m = loan::monthly_payment(12_000.0, 24, 0.0).expect("zero rate is allowed");
    assert_eq!(m, 500.0);
    let q = loan::quote(12_000.0, 24, 0.0).expect("zero rate quote");
    assert!(q.total_interest.abs() < 1e-9);
}

#[test]
fn longer_terms_lower_the_payment_but_raise_interest() {
    let short = loan::quote(100_000.0, 12, ANNUAL_RATE).expect("short");
    let long = loan::quote(100_000.0, 360, ANNUAL_RATE).expect("long");
    assert!(long.monthly_payment < short.monthly_payment);
    assert!(long.total_interest > short.total_interest);
}

#[test]
fn payment_scales_linearly_with_principal() {
    let a = loan::monthly_payment(5_000.0, 120, ANNUAL_RATE).expect("a");
    let b = loan::monthly_payment(10_000.0, 120, ANNUAL_RATE).expect("b");
    assert!((b - 2.0 * a).abs() < 1e-9);
}

#[test]
fn rejects_invalid_inputs() {
    assert_eq!(
        loan::monthly_payment(0.0, 120, ANNUAL_RATE),
        Err(LoanError::InvalidPrincipal(0.0))
    );
    assert!(matches!(
        loan::monthly_payment(f64::NAN, 120, ANNUAL_RATE),
        Err(LoanError::InvalidPrincipal(_))
    ));
    assert_eq!(loan::monthly_payment(5_000.0, 0, ANNUAL_RATE), Err(LoanError::ZeroTerm));
    assert_eq!(
        loan::monthly_payment(5_000.0, 120, -0.01),
        Err(LoanError::InvalidRate(-0.01))
    );
}
