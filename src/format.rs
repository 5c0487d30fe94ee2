//! 로케일별 정수 금액 표기. 소수점 없이 반올림한 뒤 천 단위 구분자를 넣는다.

/// 로케일 태그별 자릿수 구분 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouping {
    pub tag: &'static str,
    pub separator: &'static str,
    /// 이 자릿수 이상부터 구분자를 넣는다(1이면 1,000부터, 2이면 10 000부터).
    pub min_grouping_digits: usize,
}

const NBSP: &str = "\u{00A0}";
const NNBSP: &str = "\u{202F}";

static GROUPINGS: &[Grouping] = &[
    Grouping { tag: "en-US", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "en-GB", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "fr-FR", separator: NNBSP, min_grouping_digits: 1 },
    Grouping { tag: "es-AR", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-BO", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-CL", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-CO", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-PY", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-PE", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-UY", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-VE", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "es-MX", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-GT", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-HN", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-NI", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-CR", separator: NBSP, min_grouping_digits: 1 },
    Grouping { tag: "es-PA", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-CU", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "es-DO", separator: ",", min_grouping_digits: 1 },
    Grouping { tag: "pt-BR", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "de-CH", separator: "\u{2019}", min_grouping_digits: 1 },
    Grouping { tag: "da-DK", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "nb-NO", separator: NBSP, min_grouping_digits: 1 },
    Grouping { tag: "sv-SE", separator: NBSP, min_grouping_digits: 1 },
    Grouping { tag: "is-IS", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "pl-PL", separator: NBSP, min_grouping_digits: 2 },
    Grouping { tag: "hu-HU", separator: NBSP, min_grouping_digits: 2 },
    Grouping { tag: "cs-CZ", separator: NBSP, min_grouping_digits: 1 },
    Grouping { tag: "ro-RO", separator: ".", min_grouping_digits: 1 },
    Grouping { tag: "bg-BG", separator: NBSP, min_grouping_digits: 2 },
];

/// 로케일 태그에 맞는 구분 규칙을 찾는다.
///
/// 정확히 일치하는 태그가 없으면 같은 언어의 첫 항목, 그것도 없으면 en-US를 쓴다.
pub fn grouping_for(locale: &str) -> &'static Grouping {
    let wanted = locale.trim().replace('_', "-");
    if let Some(g) = GROUPINGS.iter().find(|g| g.tag.eq_ignore_ascii_case(&wanted)) {
        return g;
    }
    let lang = wanted.split('-').next().unwrap_or_default();
    GROUPINGS
        .iter()
        .find(|g| {
            g.tag
                .split('-')
                .next()
                .is_some_and(|l| l.eq_ignore_ascii_case(lang))
        })
        .unwrap_or(&GROUPINGS[0])
}

/// 금액을 소수점 없이 로케일 구분자로 포맷한다. 반올림은 0에서 먼 쪽(half away from zero).
pub fn format_amount(value: f64, locale: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits, grouping_for(locale));
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(digits: &str, grouping: &Grouping) -> String {
    let len = digits.len();
    if len < 3 + grouping.min_grouping_digits {
        return digits.to_string();
    }
    let mut out = String::with_capacity(len + len / 3 * grouping.separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(grouping.separator);
        }
        out.push(ch);
    }
    out
}
