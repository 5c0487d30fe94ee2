use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const STEP_SIMULATION: &str = "steps.simulation";
    pub const STEP_INFORMATION: &str = "steps.information";
    pub const STEP_VALIDATION: &str = "steps.validation";

    pub const SIM_TITLE: &str = "simulator.title";
    pub const SIM_SUBTITLE: &str = "simulator.subtitle";
    pub const SIM_CARD_TITLE: &str = "simulator.cardTitle";
    pub const SIM_BORROW_LABEL: &str = "simulator.borrowLabel";
    pub const SIM_DURATION_LABEL: &str = "simulator.durationLabel";
    pub const SIM_MONTHS: &str = "simulator.months";
    pub const SIM_MONTHLY_PAYMENT: &str = "simulator.monthlyPayment";
    pub const SIM_TOTAL_COST: &str = "simulator.totalCost";
    pub const SIM_APR: &str = "simulator.apr";
    pub const SIM_DISCLAIMER: &str = "simulator.disclaimer";
    pub const SIM_FORM_TITLE: &str = "simulator.formTitle";
    pub const SIM_FORM_SUBTITLE: &str = "simulator.formSubtitle";
    pub const SIM_FIRST_NAME: &str = "simulator.firstName";
    pub const SIM_LAST_NAME: &str = "simulator.lastName";
    pub const SIM_EMAIL: &str = "simulator.email";
    pub const SIM_PHONE: &str = "simulator.phone";
    pub const SIM_EMPLOYMENT: &str = "simulator.employment";
    pub const SIM_SUBMIT: &str = "simulator.submit";
    pub const SIM_CONTINUE: &str = "simulator.continue";
    pub const SIM_BACK: &str = "simulator.back";
    pub const SIM_WHATSAPP_MESSAGE: &str = "simulator.whatsappMessage";
    pub const SIM_INCLUSION_TITLE: &str = "simulator.inclusionTitle";
    pub const SIM_INCLUSION_TEXT: &str = "simulator.inclusionText";
    pub const SIM_SELECT_CURRENCY: &str = "simulator.selectCurrency";
    pub const SIM_LEGAL: &str = "simulator.legal";
    pub const SIM_TERMS: &str = "simulator.terms";
    pub const SIM_PRIVACY: &str = "simulator.privacy";

    pub const EMP_PLACEHOLDER: &str = "simulator.empOptions.placeholder";
    pub const EMP_FULL: &str = "simulator.empOptions.full";
    pub const EMP_PART: &str = "simulator.empOptions.part";
    pub const EMP_SELF: &str = "simulator.empOptions.self";
    pub const EMP_RETIRED: &str = "simulator.empOptions.retired";
    pub const EMP_OTHER: &str = "simulator.empOptions.other";

    pub const FORM_ROBOT: &str = "form.robot";
    pub const FORM_PROCESSING: &str = "form.processing";
    pub const FORM_SECURED: &str = "form.secured";
    pub const FORM_RECAP: &str = "form.recap";

    pub const SUCCESS_TITLE: &str = "success.title";
    pub const SUCCESS_THANKS: &str = "success.thanks";
    pub const SUCCESS_DELAY_TITLE: &str = "success.delayTitle";
    pub const SUCCESS_DELAY_TEXT: &str = "success.delayText";
    pub const SUCCESS_SUPPORT: &str = "success.support";
    pub const SUCCESS_OPENING: &str = "success.opening";

    pub const ERR_REQUIRED: &str = "errors.required";
    pub const ERR_EMAIL: &str = "errors.email";
    pub const ERR_ROBOT: &str = "errors.robot";

    pub const CLI_TITLE: &str = "cli.title";
    pub const CLI_MENU: &str = "cli.menu";
    pub const CLI_FORM_MENU: &str = "cli.formMenu";
    pub const CLI_SELECT: &str = "cli.select";
    pub const CLI_AMOUNT_PROMPT: &str = "cli.amountPrompt";
    pub const CLI_MONTHS_PROMPT: &str = "cli.monthsPrompt";
    pub const CLI_CURRENCY_PROMPT: &str = "cli.currencyPrompt";
    pub const CLI_STATUS_PROMPT: &str = "cli.statusPrompt";
    pub const CLI_ROBOT_PROMPT: &str = "cli.robotPrompt";
    pub const CLI_INVALID_NUMBER: &str = "cli.invalidNumber";
    pub const CLI_INVALID_SELECTION: &str = "cli.invalidSelection";
    pub const CLI_UNKNOWN_CURRENCY: &str = "cli.unknownCurrency";
    pub const CLI_LINK_READY: &str = "cli.linkReady";
    pub const CLI_EXIT: &str = "cli.exit";
}

/// 지원 언어. 알 수 없는 코드는 영어로 폴백한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Fr,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Fr, Language::Es];

    pub fn from_code(code: &str) -> Self {
        normalize_lang(code).unwrap_or(Language::En)
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }

    /// 언어 선택 위젯에 표시할 이름.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
            Language::Es => "Español",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
///
/// 영어 내장 카탈로그 위에 선택 언어의 내장 카탈로그, 그 위에 언어팩 디렉터리의
/// 덮어쓰기 파일을 차례로 얹는다. 따라서 어떤 키든 최소한 영어 문자열은 존재한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
}

impl Translator {
    /// 내장 카탈로그만 사용하는 번역기를 만든다.
    pub fn new(lang: Language) -> Self {
        Self::new_with_pack(lang, None)
    }

    /// 언어 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang: Language, pack_dir: Option<&str>) -> Self {
        let mut strings = built_in_pack(Language::En);
        if lang != Language::En {
            strings.extend(built_in_pack(lang));
        }
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang))
            .or_else(|| load_overrides("locales", lang));
        if let Some(map) = overrides {
            tracing::debug!(lang = lang.as_code(), keys = map.len(), "locale pack overrides loaded");
            strings.extend(map);
        }
        Self { lang, strings }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 카탈로그에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// 번역을 가져온다. 없는 키는 키 자체를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> Language {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or(Language::En)
}

fn normalize_lang(code: &str) -> Option<Language> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("en") => Some(Language::En),
        other if other.starts_with("fr") => Some(Language::Fr),
        other if other.starts_with("es") => Some(Language::Es),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<Language> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "en" => Some(Language::En),
        "fr" => Some(Language::Fr),
        "es" => Some(Language::Es),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<Language> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(lang) = normalize_locale_string(&value) {
                return Some(lang);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: 중첩 테이블 또는 key = "value" 플랫 맵.
fn load_overrides(dir: &str, lang: Language) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{}.toml", lang.as_code()));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

pub(crate) fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> HashMap<String, String> {
    let src = match lang {
        Language::En => include_str!("../locales/en.toml"),
        Language::Fr => include_str!("../locales/fr.toml"),
        Language::Es => include_str!("../locales/es.toml"),
    };
    parse_toml_to_map(src).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_share_the_english_key_set() {
        let en = built_in_pack(Language::En);
        for lang in [Language::Fr, Language::Es] {
            let pack = built_in_pack(lang);
            for key in en.keys() {
                assert!(pack.contains_key(key), "{} missing {key}", lang.as_code());
            }
        }
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let tr = Translator::new(Language::Fr);
        assert_eq!(tr.t(keys::EMP_RETIRED), "Retraité");
        assert_eq!(tr.t(keys::SIM_MONTHS), "mois");
        assert_eq!(tr.t(keys::SIM_CARD_TITLE), "Simulateur de Crédit");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let tr = Translator::new(Language::Es);
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert!(tr.lookup("no.such.key").is_none());
    }

    #[test]
    fn language_resolution_prefers_cli_then_config() {
        assert_eq!(resolve_language("fr-CA", Some("es")), Language::Fr);
        assert_eq!(resolve_language("auto", Some("es-MX")), Language::Es);
        assert_eq!(Language::from_code("de"), Language::En);
    }

    #[test]
    fn locale_strings_are_normalized() {
        assert_eq!(normalize_locale_string("fr_FR.UTF-8"), Some(Language::Fr));
        assert_eq!(normalize_locale_string("es-AR"), Some(Language::Es));
        assert_eq!(normalize_locale_string("ko_KR.UTF-8"), None);
    }
}
