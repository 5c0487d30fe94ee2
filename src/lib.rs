//! 계산/흐름 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코드를 쓰도록 한다.

pub mod app;
pub mod config;
pub mod currency;
pub mod format;
pub mod i18n;
pub mod loan;
pub mod logging;
pub mod message;
pub mod preferences;
pub mod slider;
pub mod submission;
pub mod ui_cli;
pub mod wizard;
