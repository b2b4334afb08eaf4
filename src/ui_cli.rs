use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::app::AppError;
use crate::config::DisplayUnits;
use crate::container::{find_preset, ContainerShape, PRESETS};
use crate::conversion::{round, ConversionEngine};
use crate::quantity::{CookingMethod, Measure, QuantityError};
use crate::report::{CalculatorInput, Report, NOT_SUPPORTED_MESSAGE};
use crate::units::{LengthUnit, MassUnit, Unit, VolumeUnit};

/// 쌀국수 롤(창펀) 피 크기로 필요한 전분과 물의 양을 계산한다.
#[derive(Debug, Parser)]
#[command(name = "rice_noodle_roll_calculator_cli", version, about)]
pub struct Cli {
    /// config.toml 대신 읽을 설정 파일
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 용기와 두께로 전분/물 양 계산
    Calc(CalcArgs),
    /// 단위 변환 (예: `convert 6 inch mm`)
    Convert(ConvertArgs),
    /// 참고용 용기 크기 목록
    Presets,
    /// 현재 설정을 TOML로 출력
    Tables,
    /// 번호 메뉴로 대화식 실행 (기본값)
    Interactive,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("container")
        .required(true)
        .args(["plate", "bento", "preset"])
))]
pub struct CalcArgs {
    /// 접시 지름
    #[arg(long, value_name = "DIAMETER", allow_negative_numbers = true)]
    pub plate: Option<f64>,
    /// 도시락통 가로, 세로
    #[arg(
        long,
        num_args = 2,
        value_names = ["WIDTH", "LENGTH"],
        allow_negative_numbers = true
    )]
    pub bento: Option<Vec<f64>>,
    /// 참고 크기 (small-plate, large-plate, small-bento, large-bento)
    #[arg(long)]
    pub preset: Option<String>,
    /// 용기 치수 단위 (mm, cm, inch)
    #[arg(long)]
    pub unit: Option<LengthUnit>,
    /// 피 두께
    #[arg(long, default_value_t = 7.0, allow_negative_numbers = true)]
    pub thickness: f64,
    #[arg(long)]
    pub thickness_unit: Option<LengthUnit>,
    #[arg(long, value_enum, default_value_t = CookingMethod::Steam)]
    pub method: CookingMethod,
    #[arg(long, value_enum, default_value_t = Measure::Volume)]
    pub measure: Measure,
    /// 체적 결과 단위 (mL, tsp, tbsp, cup)
    #[arg(long)]
    pub volume_unit: Option<VolumeUnit>,
    /// 질량 결과 단위 (g, oz)
    #[arg(long)]
    pub mass_unit: Option<MassUnit>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
    pub from: String,
    pub to: String,
}

/// `calc` 인자를 엔진 입력과 표시 단위로 바꾼다.
pub fn calc_input(
    engine: &ConversionEngine,
    display: &DisplayUnits,
    args: &CalcArgs,
) -> Result<(CalculatorInput, DisplayUnits), AppError> {
    let container = if let Some(key) = &args.preset {
        find_preset(key)
            .ok_or_else(|| AppError::UnknownPreset(key.clone()))?
            .shape
    } else if let Some(diameter) = args.plate {
        let unit = args.unit.unwrap_or(display.diameter);
        ContainerShape::Plate {
            diameter_mm: engine.convert(diameter, unit, LengthUnit::Millimeter),
        }
    } else {
        match args.bento.as_deref() {
            Some([width, length]) => {
                let unit = args.unit.unwrap_or(display.width);
                ContainerShape::BentoBox {
                    width_mm: engine.convert(*width, unit, LengthUnit::Millimeter),
                    length_mm: engine.convert(*length, unit, LengthUnit::Millimeter),
                }
            }
            _ => return Err(AppError::MissingContainer),
        }
    };
    let thickness_unit = args.thickness_unit.unwrap_or(display.thickness);
    let input = CalculatorInput {
        container,
        thickness_mm: engine.convert(args.thickness, thickness_unit, LengthUnit::Millimeter),
        method: args.method,
        measure: args.measure,
    };
    let display = DisplayUnits {
        volume: args.volume_unit.unwrap_or(display.volume),
        mass: args.mass_unit.unwrap_or(display.mass),
        ..*display
    };
    Ok((input, display))
}

/// `calc` 서브커맨드를 처리한다.
pub fn handle_calc(
    engine: &ConversionEngine,
    display: &DisplayUnits,
    args: &CalcArgs,
) -> Result<Report, AppError> {
    let (input, display) = calc_input(engine, display, args)?;
    Ok(engine.evaluate(&input, &display)?)
}

/// `convert` 서브커맨드를 처리한다. 결과는 표시용으로 반올림한다.
pub fn handle_convert(engine: &ConversionEngine, args: &ConvertArgs) -> Result<f64, AppError> {
    let value = engine.convert_symbols(args.value, &args.from, &args.to)?;
    Ok(round(value))
}

/// 참고 크기 목록을 출력한다.
pub fn print_presets<W: Write>(out: &mut W) -> Result<(), AppError> {
    writeln!(out, "Reference Sizes")?;
    for preset in &PRESETS {
        writeln!(out, "  {:<12} {}: {}", preset.slug, preset.name, preset.size)?;
    }
    Ok(())
}

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    UnitConversion,
    ReferenceSizes,
    Exit,
}

/// 대화식 입출력. 테스트에서는 메모리 버퍼를 넣는다.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    fn read_f64(&mut self, prompt: &str) -> Result<f64, AppError> {
        loop {
            let s = self.read_line(prompt)?;
            match s.parse::<f64>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say("Please enter a number.")?,
            }
        }
    }

    /// 단위를 묻는다. 빈 입력이면 기본 단위를 쓴다.
    fn read_unit<U: Unit>(&mut self, prompt: &str, default: U) -> Result<U, AppError> {
        let options = U::ALL
            .iter()
            .map(|u| u.symbol())
            .collect::<Vec<_>>()
            .join("/");
        loop {
            let s = self.read_line(&format!("{prompt} ({options}) [{default}]: "))?;
            if s.is_empty() {
                return Ok(default);
            }
            match s.parse::<U>() {
                Ok(u) => return Ok(u),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<MenuChoice, AppError> {
    p.say("\n=== Rice Noodle Roll Calculator ===")?;
    p.say("1) Calculate starch & water")?;
    p.say("2) Unit conversion")?;
    p.say("3) Reference sizes")?;
    p.say("0) Exit")?;
    loop {
        match p.read_line("Select menu: ")?.as_str() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::UnitConversion),
            "3" => return Ok(MenuChoice::ReferenceSizes),
            "0" => return Ok(MenuChoice::Exit),
            _ => p.say("Invalid input. Please try again.")?,
        }
    }
}

fn read_container<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    engine: &ConversionEngine,
    display: &DisplayUnits,
) -> Result<ContainerShape, AppError> {
    p.say("Container: 1) Plate  2) Bento Box  3) Reference size")?;
    loop {
        match p.read_line("Select: ")?.as_str() {
            "1" => {
                let d = p.read_f64("Diameter: ")?;
                let unit = p.read_unit("Unit", display.diameter)?;
                return Ok(ContainerShape::Plate {
                    diameter_mm: engine.convert(d, unit, LengthUnit::Millimeter),
                });
            }
            "2" => {
                let w = p.read_f64("Width: ")?;
                let w_unit = p.read_unit("Unit", display.width)?;
                let l = p.read_f64("Length: ")?;
                let l_unit = p.read_unit("Unit", display.length)?;
                return Ok(ContainerShape::BentoBox {
                    width_mm: engine.convert(w, w_unit, LengthUnit::Millimeter),
                    length_mm: engine.convert(l, l_unit, LengthUnit::Millimeter),
                });
            }
            "3" => {
                for (i, preset) in PRESETS.iter().enumerate() {
                    p.say(&format!("{}) {}: {}", i + 1, preset.name, preset.size))?;
                }
                let sel = p.read_line("Select size: ")?;
                match sel.parse::<usize>().ok().and_then(|n| PRESETS.get(n.wrapping_sub(1))) {
                    Some(preset) => return Ok(preset.shape),
                    None => p.say("Unsupported selection.")?,
                }
            }
            _ => p.say("Invalid input. Please try again.")?,
        }
    }
}

/// 계산 메뉴를 처리한다. 계산 오류는 출력만 하고 메뉴로 돌아간다.
pub fn handle_calculate<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    engine: &ConversionEngine,
    display: &DisplayUnits,
) -> Result<(), AppError> {
    p.say("\n-- Calculate --")?;
    let container = read_container(p, engine, display)?;
    let thickness = p.read_f64("Desired thickness: ")?;
    let thickness_unit = p.read_unit("Unit", display.thickness)?;
    let method = match p.read_line("Cooking method: 1) Steam  2) Microwave [1]: ")?.as_str() {
        "2" => CookingMethod::Microwave,
        _ => CookingMethod::Steam,
    };
    let measure = match p.read_line("Measure: 1) Volume  2) Mass [1]: ")?.as_str() {
        "2" => Measure::Mass,
        _ => Measure::Volume,
    };
    let mut display = *display;
    match measure {
        Measure::Volume => display.volume = p.read_unit("Result unit", display.volume)?,
        Measure::Mass => display.mass = p.read_unit("Result unit", display.mass)?,
    }

    let input = CalculatorInput {
        container,
        thickness_mm: engine.convert(thickness, thickness_unit, LengthUnit::Millimeter),
        method,
        measure,
    };
    match engine.evaluate(&input, &display) {
        Ok(report) => p.say(&report.to_string())?,
        Err(QuantityError::UnsupportedMethod(_)) => p.say(NOT_SUPPORTED_MESSAGE)?,
        Err(e) => p.say(&format!("Error: {e}"))?,
    }
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    engine: &ConversionEngine,
) -> Result<(), AppError> {
    p.say("\n-- Unit Conversion --")?;
    p.say("Units: mm cm inch | g oz | mL tsp tbsp cup mm3")?;
    let args = ConvertArgs {
        value: p.read_f64("Value: ")?,
        from: p.read_line("From unit: ")?,
        to: p.read_line("To unit: ")?,
    };
    match handle_convert(engine, &args) {
        Ok(v) => p.say(&format!("Result: {v} {}", args.to))?,
        Err(e) => p.say(&format!("Error: {e}"))?,
    }
    Ok(())
}

fn menu_loop<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    engine: &ConversionEngine,
    display: &DisplayUnits,
) -> Result<(), AppError> {
    loop {
        match main_menu(p)? {
            MenuChoice::Calculate => handle_calculate(p, engine, display)?,
            MenuChoice::UnitConversion => handle_unit_conversion(p, engine)?,
            MenuChoice::ReferenceSizes => print_presets(&mut p.output)?,
            MenuChoice::Exit => return Ok(()),
        }
    }
}

/// 대화식 메인 루프. 입력이 끝나면(EOF) 종료로 간주한다.
pub fn run_interactive<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    engine: &ConversionEngine,
    display: &DisplayUnits,
) -> Result<(), AppError> {
    match menu_loop(p, engine, display) {
        Err(AppError::InputClosed) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let engine = ConversionEngine::default();
        let mut p = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        run_interactive(&mut p, &engine, &DisplayUnits::default()).expect("interactive run");
        String::from_utf8(p.into_output()).expect("utf8 output")
    }

    #[test]
    fn interactive_plate_calculation_with_defaults() {
        // 접시, 지름 6 (기본 inch), 두께 7 (기본 mm), 찜, 체적, 기본 tbsp, 종료
        let out = run_script("1\n1\n6\n\n7\n\n1\n1\n\n0\n");
        assert!(out.contains("Starch Volume: 6.641 tbsp"), "{out}");
    }

    #[test]
    fn interactive_microwave_is_not_supported() {
        let out = run_script("1\n3\n1\n7\n\n2\n1\n\n0\n");
        assert!(out.contains(NOT_SUPPORTED_MESSAGE), "{out}");
    }

    #[test]
    fn interactive_conversion_and_retry_on_bad_number() {
        let out = run_script("2\nabc\n6\ninch\nmm\n");
        assert!(out.contains("Please enter a number."), "{out}");
        assert!(out.contains("Result: 152.4 mm"), "{out}");
    }

    #[test]
    fn cli_parses_bento_with_unit() {
        let cli = Cli::try_parse_from([
            "rnr", "calc", "--bento", "12.5", "18.5", "--unit", "cm", "--measure", "mass",
        ])
        .expect("valid args");
        let Some(Command::Calc(args)) = cli.command else {
            panic!("expected calc");
        };
        let engine = ConversionEngine::default();
        let (input, _) = calc_input(&engine, &DisplayUnits::default(), &args).unwrap();
        assert_eq!(
            input.container,
            ContainerShape::BentoBox {
                width_mm: 125.0,
                length_mm: 185.0
            }
        );
        assert_eq!(input.measure, Measure::Mass);
    }

    #[test]
    fn cli_requires_a_container() {
        assert!(Cli::try_parse_from(["rnr", "calc", "--thickness", "3"]).is_err());
    }

    #[test]
    fn negative_thickness_reaches_the_engine() {
        let cli = Cli::try_parse_from(["rnr", "calc", "--preset", "small-plate", "--thickness", "-1"])
            .expect("negative numbers are accepted by the parser");
        let Some(Command::Calc(args)) = cli.command else {
            panic!("expected calc");
        };
        let err = handle_calc(&ConversionEngine::default(), &DisplayUnits::default(), &args)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Quantity(QuantityError::InvalidInput { field: "thickness", .. })
        ));
    }
}
