use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use loan_simulator::app::{self, AppError};
use loan_simulator::config::{Config, DEFAULT_CONFIG_PATH};
use loan_simulator::currency::CurrencyCode;
use loan_simulator::i18n::{self, Translator};
use loan_simulator::preferences::{self, TomlPreferenceStore};
use loan_simulator::submission::StdoutOpener;
use loan_simulator::{logging, slider, ui_cli};

/// 터미널 대출 시뮬레이터.
#[derive(Debug, Parser)]
#[command(name = "loan_simulator_cli", version, about)]
struct Cli {
    /// UI 언어 (auto, en, fr, es)
    #[arg(long, default_value = "auto")]
    lang: String,
    /// 사용할 통화 코드. 저장된 선택을 덮어쓴다.
    #[arg(long)]
    currency: Option<String>,
    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 대화 없이 견적만 출력
    #[arg(long)]
    quote: bool,
    /// --quote 금액
    #[arg(long)]
    amount: Option<f64>,
    /// --quote 기간 [개월]
    #[arg(long, default_value_t = slider::DEFAULT_MONTHS)]
    months: u32,
    /// 통화 목록 출력
    #[arg(long)]
    list_currencies: bool,
    /// debug 로그 출력
    #[arg(short, long)]
    verbose: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 마법사를 실행한다.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli).await {
        Ok(()) | Err(AppError::InputClosed) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = Config::load_or_default(&cli.config)?;
    logging::init(if cli.verbose { "debug" } else { cfg.log_level.as_str() });

    let lang = i18n::resolve_language(&cli.lang, cfg.language_override());
    let tr = Translator::new_with_pack(lang, cfg.locale_pack_dir.as_deref());
    let store = TomlPreferenceStore::new(&cfg.preferences_path);

    if let Some(raw) = cli.currency.as_deref() {
        match raw.parse::<CurrencyCode>() {
            Ok(code) => preferences::save_currency(&store, code)?,
            Err(err) => tracing::warn!(error = %err, "ignoring --currency"),
        }
    }

    if cli.list_currencies {
        ui_cli::print_currency_list(&tr);
        return Ok(());
    }

    if cli.quote {
        let currency = preferences::load_currency(&store);
        let amount = cli.amount.unwrap_or(currency.min_amount);
        return app::print_quote_once(&cfg, &tr, currency, amount, cli.months);
    }

    app::run(&cfg, &tr, &store, &StdoutOpener).await
}
