//! 채팅 메시지 템플릿 치환과 WhatsApp 딥링크 생성.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::currency::CurrencyConfig;
use crate::i18n::{keys, Translator};
use crate::loan::LoanQuote;
use crate::wizard::Applicant;

/// 모든 언어 템플릿이 공유하는 치환 자리표시자.
pub const PLACEHOLDERS: [&str; 7] = [
    "{amount}", "{months}", "{payment}", "{name}", "{email}", "{phone}", "{status}",
];

/// 템플릿에 함께 들어 있는 통화 표기 자리표시자.
pub const CURRENCY_PLACEHOLDER: &str = "{currency}";

/// 딥링크 기본 호스트.
pub const CHAT_BASE_URL: &str = "https://wa.me";

/// JavaScript `encodeURIComponent`가 남겨두는 문자: 영숫자와 `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 템플릿에 넣을 값 묶음. 모두 표시용 문자열로 미리 포맷된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFields {
    pub amount: String,
    pub months: String,
    pub payment: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub currency: String,
}

impl MessageFields {
    /// 견적/신청자/통화/번역기로 표시 값을 만든다. 월 상환액은 정수로 반올림해 표기한다.
    pub fn new(
        quote: &LoanQuote,
        applicant: &Applicant,
        currency: &CurrencyConfig,
        tr: &Translator,
    ) -> Self {
        Self {
            amount: currency.display_money(quote.principal),
            months: quote.term_months.to_string(),
            payment: currency.display_money(quote.monthly_payment.round()),
            name: applicant.full_name(),
            email: applicant.email.trim().to_string(),
            phone: applicant.phone.trim().to_string(),
            status: applicant
                .employment_status
                .map(|s| tr.t(s.label_key()).to_string())
                .unwrap_or_default(),
            currency: currency.message_label().to_string(),
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 8] {
        [
            ("{amount}", self.amount.as_str()),
            ("{months}", self.months.as_str()),
            ("{payment}", self.payment.as_str()),
            ("{name}", self.name.as_str()),
            ("{email}", self.email.as_str()),
            ("{phone}", self.phone.as_str()),
            ("{status}", self.status.as_str()),
            (CURRENCY_PLACEHOLDER, self.currency.as_str()),
        ]
    }
}

/// 템플릿의 자리표시자를 모두 치환한다.
///
/// 한 번의 왼쪽→오른쪽 스캔으로 처리하므로 치환된 값 안에 `{name}` 같은 문자열이 있어도
/// 다시 치환되지 않는다.
pub fn fill_template(template: &str, fields: &MessageFields) -> String {
    let pairs = fields.pairs();
    let mut out = String::with_capacity(template.len() + 128);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match pairs.iter().find(|(ph, _)| tail.starts_with(ph)) {
            Some((ph, value)) => {
                out.push_str(value);
                rest = &tail[ph.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// 현재 언어의 템플릿으로 메시지를 만든다.
pub fn render_message(fields: &MessageFields, tr: &Translator) -> String {
    fill_template(tr.t(keys::SIM_WHATSAPP_MESSAGE), fields)
}

/// `encodeURIComponent`와 같은 규칙으로 퍼센트 인코딩한다.
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// 메시지가 채워진 채팅 딥링크.
pub fn chat_link(number: &str, message: &str) -> String {
    format!(
        "{CHAT_BASE_URL}/{}?text={}",
        number.trim(),
        encode_uri_component(message)
    )
}

/// 메시지 없는 상담 연결 링크(완료 화면의 지원 버튼).
pub fn support_link(number: &str) -> String {
    format!("{CHAT_BASE_URL}/{}", number.trim())
}
