use loan_simulator::currency::CurrencyCode;
use loan_simulator::i18n::{keys, Language, Translator};
use loan_simulator::loan::{self, ANNUAL_RATE};
use loan_simulator::message::{self, MessageFields, CURRENCY_PLACEHOLDER, PLACEHOLDERS};
use loan_simulator::wizard::{Applicant, EmploymentStatus};

fn applicant() -> Applicant {
    Applicant {
        first_name: "Jean".into(),
        last_name: "Dupont".into(),
        email: "jean@example.fr".into(),
        phone: "+33 6 12 34 56 78".into(),
        employment_status: Some(EmploymentStatus::Retired),
    }
}

#[test]
fn every_language_template_carries_the_same_placeholders() {
    for lang in Language::ALL {
        let tr = Translator::new(lang);
        let template = tr.t(keys::SIM_WHATSAPP_MESSAGE);
        for ph in PLACEHOLDERS.iter().chain([&CURRENCY_PLACEHOLDER]) {
            assert!(template.contains(ph), "{lang:?} template lacks {ph}");
        }
    }
}

#[test]
fn no_placeholder_survives_rendering() {
    let quote = loan::quote(5_000.0, 120, ANNUAL_RATE).expect("quote");
    for lang in Language::ALL {
        let tr = Translator::new(lang);
        for code in [CurrencyCode::Intl, CurrencyCode::Eur, CurrencyCode::Ars] {
            let fields = MessageFields::new(&quote, &applicant(), code.config(), &tr);
            let text = message::render_message(&fields, &tr);
            for ph in PLACEHOLDERS.iter().chain([&CURRENCY_PLACEHOLDER]) {
                assert!(!text.contains(ph), "{lang:?}/{code}: {ph} left in {text}");
            }
        }
    }
}

#[test]
fn values_are_formatted_for_the_currency() {
    let quote = loan::quote(5_000.0, 120, ANNUAL_RATE).expect("quote");
    let tr = Translator::new(Language::Fr);
    let fields = MessageFields::new(&quote, &applicant(), CurrencyCode::Eur.config(), &tr);
    assert_eq!(fields.amount, "€5\u{202F}000");
    assert_eq!(fields.payment, "€46");
    assert_eq!(fields.months, "120");
    assert_eq!(fields.name, "Jean Dupont");
    assert_eq!(fields.status, tr.t(keys::EMP_RETIRED));
    assert_eq!(fields.currency, "EUR");

    let text = message::render_message(&fields, &tr);
    assert!(text.contains("- Montant : €5\u{202F}000 EUR"));
    assert!(text.contains("- Nom : Jean Dupont"));
}

#[test]
fn intl_has_no_symbol_or_code() {
    let quote = loan::quote(5_000.0, 120, ANNUAL_RATE).expect("quote");
    let tr = Translator::new(Language::En);
    let fields = MessageFields::new(&quote, &applicant(), CurrencyCode::Intl.config(), &tr);
    assert_eq!(fields.amount, "5,000");
    assert_eq!(fields.currency, "");
    let text = message::render_message(&fields, &tr);
    assert!(text.contains("- Amount: 5,000 \n"));
    assert!(text.contains("- Status: Retired"));
}

#[test]
fn deep_link_is_fully_escaped() {
    let url = message::chat_link("15550123456", "Línea 1\nA&B = 50%");
    assert_eq!(
        url,
        "https://wa.me/15550123456?text=L%C3%ADnea%201%0AA%26B%20%3D%2050%25"
    );
}
