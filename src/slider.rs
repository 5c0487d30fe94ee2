//! 슬라이더 위치 ↔ 금액/기간 변환.
//!
//! 금액 범위가 5,000 ~ 15,000,000 처럼 넓어서 선형 슬라이더로는 작은 금액을 고르기 어렵다.
//! 그래서 금액은 0~100 로그 스케일 위치로, 기간은 12개월 단위 선형 스케일로 다룬다.

use crate::currency::CurrencyConfig;

/// 슬라이더 위치 범위 상한.
pub const SLIDER_MAX: f64 = 100.0;

/// 최소 상환 기간 [개월]
pub const MIN_MONTHS: u32 = 12;
/// 최대 상환 기간 [개월] (30년)
pub const MAX_MONTHS: u32 = 360;
/// 기간 슬라이더 스텝 [개월]
pub const MONTHS_STEP: u32 = 12;
/// 시뮬레이션 시작 기간 [개월] (10년)
pub const DEFAULT_MONTHS: u32 = 120;

fn log_bounds(min: f64, max: f64) -> (f64, f64) {
    (min.max(1.0).ln(), max.max(1.0).ln())
}

/// 금액 → 슬라이더 위치(0~100).
///
/// 하한이 1 이하이면 ln(0)을 피하려고 1로 올린다. 범위가 한 점(min == max)이면 항상 0.
pub fn slider_from_amount(amount: f64, min: f64, max: f64) -> f64 {
    let (minv, maxv) = log_bounds(min, max);
    if maxv == minv {
        return 0.0;
    }
    let scale = (maxv - minv) / SLIDER_MAX;
    let pos = (amount.max(1.0).ln() - minv) / scale;
    if pos.is_nan() {
        return 0.0;
    }
    pos.clamp(0.0, SLIDER_MAX)
}

/// 슬라이더 위치 → 금액(스냅 전 원시값).
pub fn raw_amount_from_slider(position: f64, min: f64, max: f64) -> f64 {
    let (minv, maxv) = log_bounds(min, max);
    let scale = (maxv - minv) / SLIDER_MAX;
    let pos = if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, SLIDER_MAX)
    };
    (minv + scale * pos).exp()
}

/// 금액 크기에 따른 "깔끔한" 반올림 단위.
pub fn clean_step_for(amount: f64) -> f64 {
    if amount >= 1_000_000.0 {
        10_000.0
    } else if amount >= 100_000.0 {
        1_000.0
    } else if amount >= 10_000.0 {
        500.0
    } else {
        100.0
    }
}

/// 가장 가까운 `step` 배수로 반올림한다.
pub fn round_to_step(amount: f64, step: f64) -> f64 {
    (amount / step).round() * step
}

/// 반올림 후 [min, max]로 제한한다. 반올림이 범위를 벗어나게 만들 수 있어 제한은 항상 마지막에 한다.
pub fn snap_amount(amount: f64, min: f64, max: f64) -> f64 {
    let rounded = round_to_step(amount, clean_step_for(amount));
    rounded.clamp(min, max)
}

/// 슬라이더 위치 → 통화 범위 안의 깔끔한 금액.
pub fn amount_from_slider(position: f64, currency: &CurrencyConfig) -> f64 {
    let raw = raw_amount_from_slider(position, currency.min_amount, currency.max_amount);
    snap_amount(raw, currency.min_amount, currency.max_amount)
}

/// 통화 범위 기준 금액의 슬라이더 위치.
pub fn position_for_amount(amount: f64, currency: &CurrencyConfig) -> f64 {
    slider_from_amount(amount, currency.min_amount, currency.max_amount)
}

/// 개월 수를 12개월 단위로 반올림하고 [12, 360]으로 제한한다. 덧셈 넘침을 막으려고 상한을 먼저 적용한다.
pub fn snap_months(months: u32) -> u32 {
    let m = months.min(MAX_MONTHS);
    let steps = (m + MONTHS_STEP / 2) / MONTHS_STEP;
    (steps * MONTHS_STEP).clamp(MIN_MONTHS, MAX_MONTHS)
}

/// 기간 슬라이더 진행률(0~100).
pub fn months_progress(months: u32) -> f64 {
    let m = months.clamp(MIN_MONTHS, MAX_MONTHS);
    (m - MIN_MONTHS) as f64 / (MAX_MONTHS - MIN_MONTHS) as f64 * SLIDER_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_step_thresholds() {
        assert_eq!(clean_step_for(9_999.0), 100.0);
        assert_eq!(clean_step_for(10_000.0), 500.0);
        assert_eq!(clean_step_for(100_000.0), 1_000.0);
        assert_eq!(clean_step_for(1_000_000.0), 10_000.0);
    }

    #[test]
    fn snap_months_rounds_to_year() {
        assert_eq!(snap_months(0), 12);
        assert_eq!(snap_months(17), 12);
        assert_eq!(snap_months(18), 24);
        assert_eq!(snap_months(125), 120);
        assert_eq!(snap_months(1_000), 360);
        assert_eq!(snap_months(u32::MAX), 360);
        assert_eq!(snap_months(u32::MAX - 5), 360);
    }

    #[test]
    fn months_progress_is_linear() {
        assert_eq!(months_progress(12), 0.0);
        assert_eq!(months_progress(360), 100.0);
        assert!((months_progress(186) - 50.0).abs() < 1e-9);
    }
}
