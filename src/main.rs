use std::process::ExitCode;

use clap::Parser;
use rice_noodle_roll_calculator::{app, logging, ui_cli::Cli};

/// 프로그램의 엔트리 포인트. 로깅을 켠 뒤 CLI 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
