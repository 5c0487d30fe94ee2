#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use loan_simulator::{
    config::{Config, DEFAULT_CONFIG_PATH},
    currency::{self, CurrencyConfig, Nudge},
    i18n::{self, keys, Language, Translator},
    logging, message,
    preferences::{self, TomlPreferenceStore},
    slider,
    submission::{ChatDispatch, LinkOpener, SubmissionError, SubmissionGateway},
    ui_cli,
    wizard::{Applicant, Confirmation, Effect, EmploymentStatus, StepKind, Wizard, WizardError},
};
use std::env;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/fr/es)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let app_cfg = match Config::load_or_default(DEFAULT_CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            Config::default()
        }
    };
    logging::init(&app_cfg.log_level);
    let lang = i18n::resolve_language(cli_lang.as_deref().unwrap_or("auto"), app_cfg.language_override());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 780.0])
            .with_min_inner_size([380.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Finanzas Credit Simulator",
        options,
        Box::new(move |_cc| match GuiApp::new(app_cfg, lang) {
            Ok(app) => Box::new(app) as Box<dyn App>,
            Err(err) => Box::new(FatalApp(err.to_string())),
        }),
    )
}

/// 시작 실패 시 오류만 보여주는 화면.
struct FatalApp(String);

impl App for FatalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.colored_label(ui.visuals().error_fg_color, self.0.as_str());
        });
    }
}

/// egui 컨텍스트를 통해 브라우저/채팅 앱으로 링크를 연다.
struct EguiOpener(egui::Context);

impl LinkOpener for EguiOpener {
    fn open(&self, url: &str) -> Result<(), SubmissionError> {
        self.0.open_url(egui::OpenUrl::new_tab(url));
        Ok(())
    }
}

struct GuiApp {
    config: Config,
    tr: Translator,
    store: TomlPreferenceStore,
    wizard: Wizard,
    /// 양식 편집용 사본. 바뀔 때마다 마법사에 반영한다.
    draft: Applicant,
    robot_checked: bool,
    form_error: Option<String>,
    status: Option<String>,
    scroll_to_top: bool,
    pending_submit: Option<Receiver<Result<(), SubmissionError>>>,
    pending_chat: Option<Receiver<Result<String, SubmissionError>>>,
    chat_started: bool,
}

impl GuiApp {
    fn new(config: Config, lang: Language) -> Result<Self, WizardError> {
        let tr = Translator::new_with_pack(lang, config.locale_pack_dir.as_deref());
        let store = TomlPreferenceStore::new(&config.preferences_path);
        let wizard = Wizard::new(preferences::load_currency(&store), config.annual_rate)?;
        Ok(Self {
            config,
            tr,
            store,
            wizard,
            draft: Applicant::default(),
            robot_checked: false,
            form_error: None,
            status: None,
            scroll_to_top: false,
            pending_submit: None,
            pending_chat: None,
            chat_started: false,
        })
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScrollToTop => self.scroll_to_top = true,
        }
    }

    fn report(&mut self, err: WizardError) {
        tracing::warn!(error = %err, "action rejected");
        self.status = Some(err.to_string());
    }

    fn switch_language(&mut self, lang: Language) {
        if lang == self.tr.language() {
            return;
        }
        self.tr = Translator::new_with_pack(lang, self.config.locale_pack_dir.as_deref());
        self.config.language = lang.as_code().to_string();
        if let Err(err) = self.config.save(DEFAULT_CONFIG_PATH) {
            tracing::warn!(error = %err, "could not save language");
        }
    }

    fn switch_currency(&mut self, currency: &'static CurrencyConfig) {
        if let Err(err) = self.wizard.set_currency(currency) {
            self.report(err);
            return;
        }
        if let Err(err) = preferences::save_currency(&self.store, currency.code) {
            tracing::warn!(error = %err, "could not persist currency");
        }
    }

    /// 제출을 백그라운드 스레드의 단일 스레드 런타임에서 돌린다.
    fn start_submission(&mut self, ctx: &egui::Context) {
        let application = match self.wizard.begin_submission() {
            Ok(app) => app,
            Err(err) => {
                self.form_error = match &err {
                    WizardError::Validation(v) => Some(ui_cli::validation_message(&self.tr, v)),
                    _ => None,
                };
                self.report(err);
                return;
            }
        };
        self.form_error = None;
        let gateway = self.config.submission_gateway();
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
                Ok(rt) => rt.block_on(gateway.submit(&application)),
                Err(err) => Err(SubmissionError::Rejected(err.to_string())),
            };
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
        self.pending_submit = Some(rx);
    }

    /// 확인 화면 진입 후 한 번만 지연 채팅 링크를 예약한다.
    fn start_chat_dispatch(&mut self, ctx: &egui::Context, confirmation: Confirmation) {
        let dispatch: ChatDispatch = self.config.chat_dispatch();
        let tr = self.tr.clone();
        let opener = EguiOpener(ctx.clone());
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
                Ok(rt) => rt.block_on(dispatch.dispatch(&confirmation, &tr, &opener)),
                Err(err) => Err(SubmissionError::LinkOpen {
                    url: String::new(),
                    reason: err.to_string(),
                }),
            };
            let _ = tx.send(outcome);
            opener.0.request_repaint();
        });
        self.pending_chat = Some(rx);
        self.chat_started = true;
    }

    fn poll_background(&mut self, ctx: &egui::Context) {
        if let Some(rx) = &self.pending_submit {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.pending_submit = None;
                    match self.wizard.complete_submission(outcome) {
                        Ok(effect) => self.apply_effect(effect),
                        Err(err) => self.report(err),
                    }
                }
                Err(TryRecvError::Empty) => ctx.request_repaint_after(Duration::from_millis(100)),
                Err(TryRecvError::Disconnected) => {
                    self.pending_submit = None;
                    let lost = Err(SubmissionError::Rejected("worker stopped".into()));
                    if let Err(err) = self.wizard.complete_submission(lost) {
                        self.report(err);
                    }
                }
            }
        }
        if let Some(rx) = &self.pending_chat {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.pending_chat = None;
                    if let Err(err) = outcome {
                        tracing::warn!(error = %err, "chat link failed");
                        self.status = Some(err.to_string());
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => self.pending_chat = None,
            }
        }
        if !self.chat_started {
            if let Some(confirmation) = self.wizard.confirmation().cloned() {
                self.start_chat_dispatch(ctx, confirmation);
            }
        }
    }

    fn ui_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Finanzas Investment");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut lang = self.tr.language();
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(lang.native_name())
                    .show_ui(ui, |ui| {
                        for l in Language::ALL {
                            ui.selectable_value(&mut lang, l, l.native_name());
                        }
                    });
                self.switch_language(lang);
            });
        });
    }

    fn ui_steps(&self, ui: &mut egui::Ui) {
        let current = self.wizard.step();
        ui.horizontal(|ui| {
            for step in StepKind::ALL {
                let text = format!("{}  {}", step.number(), self.tr.t(step.label_key()));
                let rich = if step == current {
                    egui::RichText::new(text).strong().color(ui.visuals().selection.bg_fill)
                } else if step < current {
                    egui::RichText::new(text)
                } else {
                    egui::RichText::new(text).weak()
                };
                ui.label(rich);
                if step != StepKind::Confirmed {
                    ui.label("›");
                }
            }
        });
    }

    fn ui_quote_card(&self, ui: &mut egui::Ui) {
        let sim = *self.wizard.simulation();
        let currency = sim.currency();
        let tr = &self.tr;
        let quote = match sim.quote() {
            Ok(q) => q,
            Err(err) => {
                ui.colored_label(ui.visuals().error_fg_color, err.to_string());
                return;
            }
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.heading(tr.t(keys::SIM_CARD_TITLE));
            ui.label(tr.t(keys::SIM_MONTHLY_PAYMENT));
            ui.label(
                egui::RichText::new(currency.display_money(quote.monthly_payment))
                    .size(30.0)
                    .strong(),
            );
            ui.separator();
            egui::Grid::new("quote_grid").num_columns(2).show(ui, |ui| {
                ui.label(tr.t(keys::SIM_TOTAL_COST));
                ui.label(currency.display_money(quote.total_cost()));
                ui.end_row();
                ui.label(tr.t(keys::SIM_APR));
                ui.label(format!("{:.2}%", quote.annual_rate_percent()));
                ui.end_row();
            });
            ui.label(egui::RichText::new(tr.t(keys::SIM_DISCLAIMER)).small().weak());
        });
    }

    fn ui_currency_picker(&mut self, ui: &mut egui::Ui) {
        let current = self.wizard.simulation().currency();
        let mut chosen = current.code;
        ui.horizontal(|ui| {
            ui.label(self.tr.t(keys::SIM_SELECT_CURRENCY));
            egui::ComboBox::from_id_source("currency_choice")
                .selected_text(format!("{} {}", current.code.as_str(), current.symbol))
                .show_ui(ui, |ui| {
                    for c in currency::catalog() {
                        let label = format!("{} {} · {}", c.code.as_str(), c.symbol, c.display_name);
                        ui.selectable_value(&mut chosen, c.code, label);
                    }
                });
        });
        if chosen != current.code {
            self.switch_currency(chosen.config());
        }
    }

    fn ui_simulate(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new(self.tr.t(keys::SIM_TITLE)).heading());
        ui.label(self.tr.t(keys::SIM_SUBTITLE));
        ui.add_space(8.0);
        self.ui_currency_picker(ui);
        ui.add_space(8.0);

        let sim = *self.wizard.simulation();
        let currency = sim.currency();

        ui.label(self.tr.t(keys::SIM_BORROW_LABEL));
        ui.label(egui::RichText::new(currency.display_money(sim.amount())).size(24.0).strong());
        let mut position = sim.slider_position();
        let mut amount = sim.amount();
        let mut nudge = None;
        ui.horizontal(|ui| {
            if ui.button("−").clicked() {
                nudge = Some(Nudge::Down);
            }
            let slider = egui::Slider::new(&mut position, 0.0..=slider::SLIDER_MAX).show_value(false);
            if ui.add(slider).changed() {
                amount = slider::amount_from_slider(position, currency);
            }
            if ui.button("+").clicked() {
                nudge = Some(Nudge::Up);
            }
        });
        ui.horizontal(|ui| {
            ui.add(
                egui::DragValue::new(&mut amount)
                    .speed(currency.step)
                    .clamp_range(currency.min_amount..=currency.max_amount),
            );
            ui.label(currency.code.as_str());
        });
        if let Err(err) = self.wizard.edit_simulation(|s| match nudge {
            Some(direction) => s.nudge(direction),
            None if amount != s.amount() => s.set_amount(amount),
            None => {}
        }) {
            self.report(err);
        }

        ui.add_space(8.0);
        let mut months = sim.months();
        ui.label(format!(
            "{}: {} {}",
            self.tr.t(keys::SIM_DURATION_LABEL),
            months,
            self.tr.t(keys::SIM_MONTHS)
        ));
        let months_slider = egui::Slider::new(&mut months, slider::MIN_MONTHS..=slider::MAX_MONTHS)
            .step_by(f64::from(slider::MONTHS_STEP))
            .show_value(false);
        if ui.add(months_slider).changed() {
            if let Err(err) = self.wizard.edit_simulation(|s| s.set_months(months)) {
                self.report(err);
            }
        }

        ui.add_space(12.0);
        self.ui_quote_card(ui);
        ui.add_space(12.0);
        if ui
            .add_sized([ui.available_width(), 36.0], egui::Button::new(self.tr.t(keys::SIM_CONTINUE)))
            .clicked()
        {
            match self.wizard.proceed() {
                Ok(effect) => {
                    self.draft = Applicant::default();
                    self.robot_checked = false;
                    self.form_error = None;
                    self.apply_effect(effect);
                }
                Err(err) => self.report(err),
            }
        }
        ui.add_space(16.0);
        ui.label(egui::RichText::new(self.tr.t(keys::SIM_INCLUSION_TITLE)).strong());
        ui.label(self.tr.t(keys::SIM_INCLUSION_TEXT));
    }

    fn ui_collect_info(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let processing = self.wizard.is_processing() || self.pending_submit.is_some();
        let tr = self.tr.clone();

        ui.label(egui::RichText::new(tr.t(keys::SIM_FORM_TITLE)).heading());
        ui.label(egui::RichText::new(tr.t(keys::SIM_FORM_SUBTITLE)).weak());
        ui.add_space(6.0);
        let sim = *self.wizard.simulation();
        if let Ok(q) = sim.quote() {
            ui.label(format!(
                "{}: {} · {} {} · {}/{}",
                tr.t(keys::FORM_RECAP),
                sim.currency().display_money(q.principal),
                q.term_months,
                tr.t(keys::SIM_MONTHS),
                sim.currency().display_money(q.monthly_payment),
                tr.t(keys::SIM_MONTHS)
            ));
        }
        ui.add_space(8.0);

        let mut changed = false;
        ui.add_enabled_ui(!processing, |ui| {
            egui::Grid::new("applicant_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                for (key, value) in [
                    (keys::SIM_FIRST_NAME, &mut self.draft.first_name),
                    (keys::SIM_LAST_NAME, &mut self.draft.last_name),
                    (keys::SIM_EMAIL, &mut self.draft.email),
                    (keys::SIM_PHONE, &mut self.draft.phone),
                ] {
                    ui.label(tr.t(key));
                    changed |= ui.text_edit_singleline(value).changed();
                    ui.end_row();
                }
                ui.label(tr.t(keys::SIM_EMPLOYMENT));
                let selected = self
                    .draft
                    .employment_status
                    .map_or(tr.t(keys::EMP_PLACEHOLDER), |s| tr.t(s.label_key()));
                egui::ComboBox::from_id_source("employment_choice")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for status in EmploymentStatus::ALL {
                            changed |= ui
                                .selectable_value(&mut self.draft.employment_status, Some(status), tr.t(status.label_key()))
                                .changed();
                        }
                    });
                ui.end_row();
            });
            ui.add_space(8.0);
            if ui.checkbox(&mut self.robot_checked, tr.t(keys::FORM_ROBOT)).changed() {
                changed = true;
            }
        });

        if changed {
            let draft = self.draft.clone();
            let robot = self.robot_checked;
            let result = self
                .wizard
                .edit_applicant(|a| *a = draft)
                .and_then(|_| self.wizard.set_robot_checked(robot));
            if let Err(err) = result {
                self.report(err);
            }
            self.form_error = None;
        }

        if let Some(msg) = &self.form_error {
            ui.colored_label(ui.visuals().error_fg_color, msg.as_str());
        }
        ui.add_space(10.0);

        if processing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(tr.t(keys::FORM_PROCESSING));
            });
        } else {
            let submit = egui::Button::new(tr.t(keys::SIM_SUBMIT));
            let resp = ui.add_enabled_ui(self.wizard.can_submit(), |ui| {
                ui.add_sized([ui.available_width(), 36.0], submit)
            });
            if resp.inner.clicked() {
                self.start_submission(ctx);
            }
            if let Some(Err(err)) = self.wizard.collect_info().map(|step| step.check()) {
                ui.label(egui::RichText::new(ui_cli::validation_message(&tr, &err)).small().weak());
            }
            ui.add_space(4.0);
            if ui.button(format!("← {}", tr.t(keys::SIM_BACK))).clicked() {
                if let Err(err) = self.wizard.back() {
                    self.report(err);
                }
            }
        }
        ui.add_space(8.0);
        ui.label(egui::RichText::new(tr.t(keys::FORM_SECURED)).small().weak());
        ui.label(
            egui::RichText::new(format!(
                "{} {} & {}",
                tr.t(keys::SIM_LEGAL),
                tr.t(keys::SIM_TERMS),
                tr.t(keys::SIM_PRIVACY)
            ))
            .small()
            .weak(),
        );
    }

    fn ui_confirmed(&mut self, ui: &mut egui::Ui) {
        let Some(confirmation) = self.wizard.confirmation() else {
            return;
        };
        let tr = &self.tr;
        let app = &confirmation.application;
        let currency = confirmation.currency();
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("✔").size(40.0));
            ui.label(egui::RichText::new(tr.t(keys::SUCCESS_TITLE)).heading());
            ui.label(tr.t(keys::SUCCESS_THANKS).replace("{name}", app.applicant.first_name.trim()));
        });
        ui.add_space(10.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new(tr.t(keys::FORM_RECAP)).strong());
            egui::Grid::new("recap_grid").num_columns(2).show(ui, |ui| {
                ui.label(tr.t(keys::SIM_BORROW_LABEL));
                ui.label(currency.display_money(app.quote.principal));
                ui.end_row();
                ui.label(tr.t(keys::SIM_DURATION_LABEL));
                ui.label(format!("{} {}", app.quote.term_months, tr.t(keys::SIM_MONTHS)));
                ui.end_row();
                ui.label(tr.t(keys::SIM_MONTHLY_PAYMENT));
                ui.label(currency.display_money(app.quote.monthly_payment));
                ui.end_row();
            });
        });
        ui.add_space(10.0);
        ui.label(egui::RichText::new(tr.t(keys::SUCCESS_DELAY_TITLE)).strong());
        ui.label(tr.t(keys::SUCCESS_DELAY_TEXT));
        ui.add_space(10.0);
        if self.pending_chat.is_some() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(tr.t(keys::SUCCESS_OPENING));
            });
        }
        if ui.button(tr.t(keys::SUCCESS_SUPPORT)).clicked() {
            ui.ctx()
                .open_url(egui::OpenUrl::new_tab(message::support_link(&self.config.chat_number)));
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_background(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_top_bar(ui);
            self.ui_steps(ui);
        });

        if let Some(msg) = self.status.clone() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(msg).small());
                    if ui.small_button("✕").clicked() {
                        self.status = None;
                    }
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut area = egui::ScrollArea::vertical().auto_shrink([false; 2]);
            if std::mem::take(&mut self.scroll_to_top) {
                area = area.vertical_scroll_offset(0.0);
            }
            area.show(ui, |ui| match self.wizard.step() {
                StepKind::Simulate => self.ui_simulate(ui),
                StepKind::CollectInfo => self.ui_collect_info(ctx, ui),
                StepKind::Confirmed => self.ui_confirmed(ui),
            });
        });
    }
}
