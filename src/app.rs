use std::io;

use thiserror::Error;
use tracing::info;

use crate::config::{self, ConfigError};
use crate::conversion::{ConversionEngine, ConversionError};
use crate::quantity::QuantityError;
use crate::report::NOT_SUPPORTED_MESSAGE;
use crate::ui_cli::{self, Cli, Command, Prompter};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Quantity(#[from] QuantityError),
    #[error("unknown reference size `{0}` (see `presets`)")]
    UnknownPreset(String),
    #[error("no container given")]
    MissingContainer,
    /// 대화식 입력 스트림이 닫힘
    #[error("input closed")]
    InputClosed,
}

/// CLI 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(cli.config.as_deref())?;
    let engine = ConversionEngine::new(cfg.tables.clone());

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Calc(args) => {
            let report = ui_cli::handle_calc(&engine, &cfg.display, &args).map_err(|e| {
                if let AppError::Quantity(QuantityError::UnsupportedMethod(_)) = e {
                    println!("{NOT_SUPPORTED_MESSAGE}");
                }
                e
            })?;
            println!("{report}");
        }
        Command::Convert(args) => {
            let value = ui_cli::handle_convert(&engine, &args)?;
            println!("{value} {}", args.to.trim());
        }
        Command::Presets => ui_cli::print_presets(&mut io::stdout())?,
        Command::Tables => print!("{}", cfg.to_toml_string()?),
        Command::Interactive => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            ui_cli::run_interactive(&mut prompter, &engine, &cfg.display)?;
            info!("interactive session ended");
        }
    }
    Ok(())
}
