//! 통화 카탈로그. 통화별 표시 기호, 로케일, 대출 가능 범위와 슬라이더 스텝을 정의한다.
//!
//! 환율 변환은 하지 않는다. 통화를 바꾸면 범위/스텝/표기만 바뀐다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::format;

/// 지원 통화 코드. 선언 순서가 곧 화면 표시 순서이며 카탈로그 인덱스다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Intl,
    Eur,
    Usd,
    Ars,
    Bob,
    Brl,
    Clp,
    Cop,
    Pyg,
    Pen,
    Uyu,
    Ves,
    Mxn,
    Gtq,
    Hnl,
    Nio,
    Crc,
    Pab,
    Cup,
    Dop,
    Gbp,
    Chf,
    Dkk,
    Nok,
    Sek,
    Isk,
    Pln,
    Huf,
    Czk,
    Ron,
    Bgn,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 31] = [
        CurrencyCode::Intl,
        CurrencyCode::Eur,
        CurrencyCode::Usd,
        CurrencyCode::Ars,
        CurrencyCode::Bob,
        CurrencyCode::Brl,
        CurrencyCode::Clp,
        CurrencyCode::Cop,
        CurrencyCode::Pyg,
        CurrencyCode::Pen,
        CurrencyCode::Uyu,
        CurrencyCode::Ves,
        CurrencyCode::Mxn,
        CurrencyCode::Gtq,
        CurrencyCode::Hnl,
        CurrencyCode::Nio,
        CurrencyCode::Crc,
        CurrencyCode::Pab,
        CurrencyCode::Cup,
        CurrencyCode::Dop,
        CurrencyCode::Gbp,
        CurrencyCode::Chf,
        CurrencyCode::Dkk,
        CurrencyCode::Nok,
        CurrencyCode::Sek,
        CurrencyCode::Isk,
        CurrencyCode::Pln,
        CurrencyCode::Huf,
        CurrencyCode::Czk,
        CurrencyCode::Ron,
        CurrencyCode::Bgn,
    ];

    /// 저장값이 없거나 잘못됐을 때 쓰는 기본 통화.
    pub const DEFAULT: CurrencyCode = CurrencyCode::Intl;

    pub fn as_str(&self) -> &'static str {
        self.config().code_str
    }

    pub fn config(&self) -> &'static CurrencyConfig {
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 통화 코드.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CATALOG
            .iter()
            .find(|c| c.code_str.eq_ignore_ascii_case(wanted))
            .map(|c| c.code)
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

/// 통화별 표시/범위 설정. 불변이며 프로세스 전역 테이블로만 존재한다.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyConfig {
    pub code: CurrencyCode,
    code_str: &'static str,
    pub symbol: &'static str,
    pub display_name: &'static str,
    pub min_amount: f64,
    pub max_amount: f64,
    /// 수동 증감(+/- 버튼) 단위
    pub step: f64,
    /// 금액 표기용 로케일 태그
    pub locale: &'static str,
}

/// 수동 증감 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
}

impl CurrencyConfig {
    /// 금액을 [min, max] 범위로 제한한다. NaN은 최소값으로 본다.
    pub fn clamp(&self, amount: f64) -> f64 {
        if amount.is_nan() {
            return self.min_amount;
        }
        amount.clamp(self.min_amount, self.max_amount)
    }

    /// 로케일 구분자로 정수 표기한다(기호 없음).
    pub fn format_money(&self, amount: f64) -> String {
        format::format_amount(amount, self.locale)
    }

    /// 기호를 앞에 붙인 표기. INTL처럼 기호가 없으면 숫자만 나온다.
    pub fn display_money(&self, amount: f64) -> String {
        format!("{}{}", self.symbol, self.format_money(amount))
    }

    /// `step` 단위로 한 칸 움직인 뒤 범위로 제한한다.
    pub fn nudge(&self, amount: f64, direction: Nudge) -> f64 {
        let moved = match direction {
            Nudge::Up => amount + self.step,
            Nudge::Down => amount - self.step,
        };
        self.clamp(moved)
    }

    /// 메시지 템플릿의 `{currency}` 자리에 들어갈 표기. INTL은 비워 둔다.
    pub fn message_label(&self) -> &'static str {
        match self.code {
            CurrencyCode::Intl => "",
            _ => self.code_str,
        }
    }
}

macro_rules! currency {
    ($code:ident, $s:literal, $sym:literal, $name:literal, $min:literal, $max:literal, $step:literal, $loc:literal) => {
        CurrencyConfig {
            code: CurrencyCode::$code,
            code_str: $s,
            symbol: $sym,
            display_name: $name,
            min_amount: $min,
            max_amount: $max,
            step: $step,
            locale: $loc,
        }
    };
}

static CATALOG: [CurrencyConfig; 31] = [
    currency!(Intl, "INTL", "", "Global", 5_000.0, 15_000_000.0, 1_000.0, "en-US"),
    currency!(Eur, "EUR", "€", "Euro", 5_000.0, 15_000_000.0, 5_000.0, "fr-FR"),
    currency!(Usd, "USD", "$", "US Dollar", 5_000.0, 15_000_000.0, 5_000.0, "en-US"),
    currency!(Ars, "ARS", "$", "Peso Arg.", 500_000.0, 15_000_000_000.0, 100_000.0, "es-AR"),
    currency!(Bob, "BOB", "Bs.", "Boliviano", 35_000.0, 100_000_000.0, 5_000.0, "es-BO"),
    currency!(Brl, "BRL", "R$", "Real", 25_000.0, 75_000_000.0, 5_000.0, "pt-BR"),
    currency!(Clp, "CLP", "$", "Peso Chil.", 4_000_000.0, 14_000_000_000.0, 1_000_000.0, "es-CL"),
    currency!(Cop, "COP", "$", "Peso Col.", 20_000_000.0, 60_000_000_000.0, 5_000_000.0, "es-CO"),
    currency!(Pyg, "PYG", "₲", "Guaraní", 35_000_000.0, 110_000_000_000.0, 5_000_000.0, "es-PY"),
    currency!(Pen, "PEN", "S/", "Sol", 20_000.0, 60_000_000.0, 5_000.0, "es-PE"),
    currency!(Uyu, "UYU", "$U", "Peso Uru.", 200_000.0, 600_000_000.0, 50_000.0, "es-UY"),
    currency!(Ves, "VES", "Bs.", "Bolívar", 200_000.0, 600_000_000.0, 50_000.0, "es-VE"),
    currency!(Mxn, "MXN", "$", "Peso Mex.", 100_000.0, 300_000_000.0, 50_000.0, "es-MX"),
    currency!(Gtq, "GTQ", "Q", "Quetzal", 40_000.0, 120_000_000.0, 5_000.0, "es-GT"),
    currency!(Hnl, "HNL", "L", "Lempira", 125_000.0, 375_000_000.0, 25_000.0, "es-HN"),
    currency!(Nio, "NIO", "C$", "Córdoba", 180_000.0, 550_000_000.0, 20_000.0, "es-NI"),
    currency!(Crc, "CRC", "₡", "Colón", 2_500_000.0, 7_500_000_000.0, 500_000.0, "es-CR"),
    currency!(Pab, "PAB", "B/.", "Balboa", 5_000.0, 15_000_000.0, 5_000.0, "es-PA"),
    currency!(Cup, "CUP", "$", "Peso Cub.", 125_000.0, 375_000_000.0, 25_000.0, "es-CU"),
    currency!(Dop, "DOP", "RD$", "Peso Dom.", 300_000.0, 900_000_000.0, 50_000.0, "es-DO"),
    currency!(Gbp, "GBP", "£", "British Pound", 5_000.0, 15_000_000.0, 5_000.0, "en-GB"),
    currency!(Chf, "CHF", "CHF", "Swiss Franc", 5_000.0, 15_000_000.0, 5_000.0, "de-CH"),
    currency!(Dkk, "DKK", "kr.", "Danish Kr.", 35_000.0, 100_000_000.0, 5_000.0, "da-DK"),
    currency!(Nok, "NOK", "kr", "Norw. Kr.", 55_000.0, 160_000_000.0, 5_000.0, "nb-NO"),
    currency!(Sek, "SEK", "kr", "Swed. Kr.", 55_000.0, 160_000_000.0, 5_000.0, "sv-SE"),
    currency!(Isk, "ISK", "kr", "Ice. Kr.", 700_000.0, 2_000_000_000.0, 100_000.0, "is-IS"),
    currency!(Pln, "PLN", "zł", "Złoty", 20_000.0, 60_000_000.0, 5_000.0, "pl-PL"),
    currency!(Huf, "HUF", "Ft", "Forint", 2_000_000.0, 6_000_000_000.0, 500_000.0, "hu-HU"),
    currency!(Czk, "CZK", "Kč", "Czech Kr.", 120_000.0, 350_000_000.0, 20_000.0, "cs-CZ"),
    currency!(Ron, "RON", "lei", "Leu", 25_000.0, 75_000_000.0, 5_000.0, "ro-RO"),
    currency!(Bgn, "BGN", "лв", "Lev", 10_000.0, 30_000_000.0, 2_500.0, "bg-BG"),
];

/// 표시 순서대로 정렬된 전체 카탈로그.
pub fn catalog() -> &'static [CurrencyConfig] {
    &CATALOG
}

/// 코드 문자열로 설정을 찾는다. 잘못된 값은 기본 통화로 폴백한다.
pub fn lookup_or_default(code: Option<&str>) -> &'static CurrencyConfig {
    code.and_then(|c| c.parse::<CurrencyCode>().ok())
        .unwrap_or(CurrencyCode::DEFAULT)
        .config()
}
