use std::str::FromStr;

use tracing::Level;

/// 문자열 수준을 해석한다. 알 수 없는 값은 `info`.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// stderr로 쓰는 fmt 구독자를 설치한다. 이미 설치돼 있으면 아무것도 하지 않는다.
pub fn init(level: &str) {
    let max_level = parse_level(level);
    let installed = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_ok() {
        tracing::debug!(level = %max_level, "logging initialized");
    }
}
