//! tracing 구독자 초기화.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "rice_noodle_roll_calculator=info";
const VERBOSE_DIRECTIVE: &str = "rice_noodle_roll_calculator=debug";

/// stderr로 로그를 내보낸다. `RUST_LOG`가 있으면 그쪽을 우선한다.
///
/// 이미 전역 구독자가 있으면(테스트 등) 조용히 넘어간다.
pub fn init(verbose: bool) {
    let directive = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
