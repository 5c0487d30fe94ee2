use loan_simulator::currency::{self, CurrencyCode};
use loan_simulator::slider::{self, clean_step_for};

#[test]
fn endpoints_map_to_bounds() {
    let intl = CurrencyCode::Intl.config();
    assert_eq!(slider::position_for_amount(5_000.0, intl), 0.0);
    assert!((slider::position_for_amount(15_000_000.0, intl) - 100.0).abs() < 1e-9);
    assert_eq!(slider::amount_from_slider(0.0, intl), 5_000.0);
    assert_eq!(slider::amount_from_slider(100.0, intl), 15_000_000.0);
}

#[test]
fn midpoint_is_geometric_mean_snapped() {
    let intl = CurrencyCode::Intl.config();
    // sqrt(5e3 * 15e6) ≈ 273 861 → 1 000 단위
    assert_eq!(slider::amount_from_slider(50.0, intl), 274_000.0);
}

#[test]
fn out_of_range_positions_are_clamped() {
    let eur = CurrencyCode::Eur.config();
    assert_eq!(slider::amount_from_slider(-20.0, eur), eur.min_amount);
    assert_eq!(slider::amount_from_slider(250.0, eur), eur.max_amount);
    assert_eq!(slider::position_for_amount(1.0, eur), 0.0);
    assert_eq!(slider::position_for_amount(1e12, eur), 100.0);
}

#[test]
fn degenerate_ranges_give_position_zero() {
    assert_eq!(slider::slider_from_amount(100.0, 100.0, 100.0), 0.0);
    assert_eq!(slider::slider_from_amount(0.5, 0.0, 1.0), 0.0);
    assert_eq!(slider::slider_from_amount(0.0, 0.0, 100.0), 0.0);
}

#[test]
fn snapping_rounds_then_clamps() {
    // 4 960 → 5 000 (100 단위), 범위 [4 000, 4 980]이면 최대값으로 잘린다.
    assert_eq!(slider::snap_amount(4_960.0, 4_000.0, 4_980.0), 4_980.0);
    assert_eq!(slider::snap_amount(12_260.0, 5_000.0, 1e9), 12_500.0);
    assert_eq!(slider::snap_amount(149_400.0, 5_000.0, 1e9), 149_000.0);
    assert_eq!(slider::snap_amount(1_234_567.0, 5_000.0, 1e9), 1_230_000.0);
}

#[test]
fn snapped_amounts_stay_in_range_for_every_currency() {
    for c in currency::catalog() {
        for step in 0..=40 {
            let pos = step as f64 * 2.5;
            let a = slider::amount_from_slider(pos, c);
            assert!(
                a >= c.min_amount && a <= c.max_amount,
                "{} at {pos}: {a}",
                c.code
            );
        }
    }
}

#[test]
fn inverse_mapping_is_monotonic() {
    for c in currency::catalog() {
        let mut prev = f64::MIN;
        for s in 0..=100 {
            let a = slider::amount_from_slider(s as f64, c);
            assert!(a >= prev, "{} at {s}: {a} < {prev}", c.code);
            prev = a;
        }
    }
}

/// 통화 범위에서 고른 표본: 양 끝, 로그 등간격 점, 스텝 경계 양쪽.
fn sample_amounts(min: f64, max: f64) -> Vec<f64> {
    let mut out = vec![min, max];
    let (lo, hi) = (min.ln(), max.ln());
    for i in 1..20 {
        out.push((lo + (hi - lo) * i as f64 / 20.0).exp().round());
    }
    for threshold in [10_000.0, 100_000.0, 1_000_000.0] {
        for delta in [-51.0, -1.0, 0.0, 1.0, 251.0] {
            out.push(threshold + delta);
        }
    }
    out.retain(|a| *a >= min && *a <= max);
    out
}

#[test]
fn round_trip_lands_within_half_a_step() {
    for c in currency::catalog() {
        for a in sample_amounts(c.min_amount, c.max_amount) {
            let pos = slider::position_for_amount(a, c);
            let back = slider::amount_from_slider(pos, c);
            assert!(
                (back - a).abs() <= clean_step_for(a) / 2.0 + a * 1e-9,
                "{}: {a} -> {pos} -> {back}",
                c.code
            );
        }
    }
}

#[test]
fn duration_defaults_and_bounds() {
    assert_eq!(slider::DEFAULT_MONTHS, 120);
    assert_eq!(slider::snap_months(slider::DEFAULT_MONTHS), 120);
    assert_eq!(slider::snap_months(6), slider::MIN_MONTHS);
    assert_eq!(slider::snap_months(400), slider::MAX_MONTHS);
}
