#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use rice_noodle_roll_calculator::{
    config::{self, Config, DisplayUnits},
    container::{ContainerShape, PRESETS},
    conversion::{round, ConversionEngine},
    logging,
    quantity::{CookingMethod, Measure, QuantityError},
    report::{CalculatorInput, NOT_SUPPORTED_MESSAGE},
    units::{LengthUnit, MassUnit, Unit, VolumeUnit},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "rice_noodle_roll_calculator", version)]
struct GuiArgs {
    /// config.toml 대신 읽을 설정 파일
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    logging::init(args.verbose);

    let (cfg, status) = match config::load_or_default(args.config.as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            warn!(error = %e, "falling back to built-in config");
            (Config::default(), Some(format!("Config error: {e}")))
        }
    };

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([560.0, 680.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Rice Noodle Roll Calculator",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(cfg, status))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Plate,
    BentoBox,
}

struct GuiApp {
    engine: ConversionEngine,
    display: DisplayUnits,
    container: ContainerKind,
    // 치수는 모두 mm로 보관하고 표시할 때만 변환한다
    diameter_mm: f64,
    width_mm: f64,
    length_mm: f64,
    thickness_mm: f64,
    method: CookingMethod,
    measure: Measure,
    // 결과 칸마다 단위를 따로 고른다
    starch_volume_unit: VolumeUnit,
    water_volume_unit: VolumeUnit,
    starch_mass_unit: MassUnit,
    water_mass_unit: MassUnit,
    status: Option<String>,
}

impl GuiApp {
    fn new(cfg: Config, status: Option<String>) -> Self {
        let engine = ConversionEngine::new(cfg.tables);
        let display = cfg.display;
        let diameter_mm = engine.convert(6.0, LengthUnit::Inch, LengthUnit::Millimeter);
        Self {
            engine,
            display,
            container: ContainerKind::Plate,
            diameter_mm,
            width_mm: 125.0,
            length_mm: 185.0,
            thickness_mm: 7.0,
            method: CookingMethod::Steam,
            measure: Measure::Volume,
            starch_volume_unit: display.volume,
            water_volume_unit: display.volume,
            starch_mass_unit: display.mass,
            water_mass_unit: display.mass,
            status,
        }
    }

    fn input(&self) -> CalculatorInput {
        let container = match self.container {
            ContainerKind::Plate => ContainerShape::Plate {
                diameter_mm: self.diameter_mm,
            },
            ContainerKind::BentoBox => ContainerShape::BentoBox {
                width_mm: self.width_mm,
                length_mm: self.length_mm,
            },
        };
        CalculatorInput {
            container,
            thickness_mm: self.thickness_mm,
            method: self.method,
            measure: self.measure,
        }
    }

    fn apply_preset(&mut self, shape: ContainerShape) {
        match shape {
            ContainerShape::Plate { diameter_mm } => {
                self.container = ContainerKind::Plate;
                self.diameter_mm = diameter_mm;
            }
            ContainerShape::BentoBox {
                width_mm,
                length_mm,
            } => {
                self.container = ContainerKind::BentoBox;
                self.width_mm = width_mm;
                self.length_mm = length_mm;
            }
        }
    }

    /// 설정 파일의 테이블과 표시 단위로 교체한다. 실패하면 기존 값을 유지한다.
    fn load_config(&mut self, path: &Path) {
        match config::load_from_path(path) {
            Ok(cfg) => {
                let status = Some(format!("Loaded {}", path.display()));
                let next = Self::new(cfg, status).with_inputs_from(self);
                *self = next;
            }
            Err(e) => {
                warn!(error = %e, "failed to load config");
                self.status = Some(format!("Config error: {e}"));
            }
        }
    }

    /// 새 설정을 적용하면서 사용자가 입력한 치수/선택은 그대로 가져온다.
    fn with_inputs_from(mut self, prev: &GuiApp) -> Self {
        self.container = prev.container;
        self.diameter_mm = prev.diameter_mm;
        self.width_mm = prev.width_mm;
        self.length_mm = prev.length_mm;
        self.thickness_mm = prev.thickness_mm;
        self.method = prev.method;
        self.measure = prev.measure;
        self
    }

    fn ui_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Load tables…").clicked() {
                if let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() {
                    self.load_config(&path);
                }
            }
            if ui.button("Reset tables").clicked() {
                self.engine = ConversionEngine::default();
                self.status = Some("Using built-in tables".to_string());
            }
        });
    }

    fn ui_reference_sizes(&mut self, ui: &mut egui::Ui) {
        ui.heading("Reference Sizes");
        for preset in &PRESETS {
            ui.horizontal(|ui| {
                ui.label(format!("{}: {}", preset.name, preset.size));
                if ui.small_button("Use").clicked() {
                    self.apply_preset(preset.shape);
                }
            });
        }
    }

    fn ui_configuration(&mut self, ui: &mut egui::Ui) {
        ui.heading("Configuration");
        ui.horizontal(|ui| {
            ui.label("Container Type");
            ui.selectable_value(&mut self.container, ContainerKind::Plate, "Plate");
            ui.selectable_value(&mut self.container, ContainerKind::BentoBox, "Bento Box");
        });
        egui::Grid::new("config_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                match self.container {
                    ContainerKind::Plate => {
                        ui.label("Diameter");
                        length_input(
                            ui,
                            &self.engine,
                            "diameter_unit",
                            &mut self.diameter_mm,
                            &mut self.display.diameter,
                        );
                        ui.end_row();
                    }
                    ContainerKind::BentoBox => {
                        ui.label("Width");
                        length_input(
                            ui,
                            &self.engine,
                            "width_unit",
                            &mut self.width_mm,
                            &mut self.display.width,
                        );
                        ui.end_row();
                        ui.label("Length");
                        length_input(
                            ui,
                            &self.engine,
                            "length_unit",
                            &mut self.length_mm,
                            &mut self.display.length,
                        );
                        ui.end_row();
                    }
                }
                ui.label("Desired Thickness");
                length_input(
                    ui,
                    &self.engine,
                    "thickness_unit",
                    &mut self.thickness_mm,
                    &mut self.display.thickness,
                );
                ui.end_row();
            });
    }

    fn ui_amount(&mut self, ui: &mut egui::Ui) {
        ui.heading("Amount");
        ui.horizontal(|ui| {
            ui.label("Measure");
            for m in [Measure::Volume, Measure::Mass] {
                ui.selectable_value(&mut self.measure, m, m.label());
            }
            ui.separator();
            ui.label("Cooking Method");
            for m in CookingMethod::ALL {
                ui.selectable_value(&mut self.method, *m, m.label());
            }
        });
        ui.add_space(6.0);

        let report = match self.engine.evaluate(&self.input(), &self.display) {
            Ok(report) => report,
            Err(QuantityError::UnsupportedMethod(_)) => {
                ui.strong(NOT_SUPPORTED_MESSAGE);
                return;
            }
            Err(e) => {
                ui.colored_label(egui::Color32::RED, e.to_string());
                return;
            }
        };

        let q = report.quantities;
        let tables = self.engine.tables();
        egui::Grid::new("amount_grid")
            .num_columns(3)
            .spacing([12.0, 8.0])
            .show(ui, |ui| match self.measure {
                Measure::Volume => {
                    amount_row(
                        ui,
                        &self.engine,
                        "Starch Volume",
                        "starch_volume_unit",
                        q.starch_volume_ml,
                        &mut self.starch_volume_unit,
                        VolumeUnit::KITCHEN,
                    );
                    amount_row(
                        ui,
                        &self.engine,
                        "Water Volume",
                        "water_volume_unit",
                        q.water_volume_ml,
                        &mut self.water_volume_unit,
                        VolumeUnit::KITCHEN,
                    );
                }
                Measure::Mass => {
                    amount_row(
                        ui,
                        &self.engine,
                        "Starch Mass",
                        "starch_mass_unit",
                        q.starch_mass_g(tables),
                        &mut self.starch_mass_unit,
                        MassUnit::ALL,
                    );
                    amount_row(
                        ui,
                        &self.engine,
                        "Water Mass",
                        "water_mass_unit",
                        q.water_mass_g(tables),
                        &mut self.water_mass_unit,
                        MassUnit::ALL,
                    );
                }
            });
        ui.add_space(4.0);
        ui.small(format!("Container area: {} mm²", report.area_mm2));
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Rice Noodle Roll Calculator");
                ui.separator();
                self.ui_toolbar(ui);
            });
        });
        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.label(status);
            });
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.ui_reference_sizes(ui);
                ui.separator();
                self.ui_configuration(ui);
                ui.separator();
                self.ui_amount(ui);
            });
        });
    }
}

/// mm로 보관된 값을 선택한 단위로 보여주고, 편집 결과를 다시 mm로 되돌린다.
fn length_input(
    ui: &mut egui::Ui,
    engine: &ConversionEngine,
    id: &str,
    value_mm: &mut f64,
    unit: &mut LengthUnit,
) {
    ui.horizontal(|ui| {
        let mut shown = round(engine.convert(*value_mm, LengthUnit::BASE, *unit));
        let resp = ui.add(
            egui::DragValue::new(&mut shown)
                .speed(0.1)
                .clamp_range(0.0..=f64::MAX)
                .max_decimals(3),
        );
        if resp.changed() {
            *value_mm = engine.convert(shown, *unit, LengthUnit::BASE);
        }
        unit_combo(ui, id, unit, LengthUnit::ALL);
    });
}

/// 읽기 전용 결과 칸: 값 + 단위 선택.
fn amount_row<U: Unit>(
    ui: &mut egui::Ui,
    engine: &ConversionEngine,
    label: &str,
    id: &str,
    base_value: f64,
    unit: &mut U,
    options: &[U],
) {
    ui.label(label);
    ui.monospace(round(engine.convert(base_value, U::BASE, *unit)).to_string());
    unit_combo(ui, id, unit, options);
    ui.end_row();
}

fn unit_combo<U: Unit>(ui: &mut egui::Ui, id: &str, unit: &mut U, options: &[U]) {
    egui::ComboBox::from_id_source(id)
        .selected_text(unit.symbol())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(unit, *option, option.symbol());
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_matches_six_inch_plate() {
        let app = GuiApp::new(Config::default(), None);
        let report = app
            .engine
            .evaluate(&app.input(), &app.display)
            .expect("steam is supported");
        assert_eq!(report.starch.value, 6.641);
        assert_eq!(app.starch_volume_unit, VolumeUnit::Tablespoon);
    }

    #[test]
    fn preset_switches_container_kind() {
        let mut app = GuiApp::new(Config::default(), None);
        app.apply_preset(PRESETS[3].shape);
        assert_eq!(app.container, ContainerKind::BentoBox);
        assert_eq!(app.width_mm, 125.0);
        assert_eq!(app.length_mm, 185.0);
    }

    #[test]
    fn failed_config_load_keeps_inputs_and_reports_status() {
        let mut app = GuiApp::new(Config::default(), None);
        app.thickness_mm = 3.0;
        app.load_config(Path::new("does/not/exist.toml"));
        assert_eq!(app.thickness_mm, 3.0);
        let status = app.status.unwrap_or_default();
        assert!(status.contains("not found"), "{status}");
    }

    #[test]
    fn loaded_config_replaces_tables_but_keeps_inputs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[display]\nvolume = \"cup\"\n").expect("write config");

        let mut app = GuiApp::new(Config::default(), None);
        app.thickness_mm = 3.0;
        app.load_config(&path);
        assert_eq!(app.thickness_mm, 3.0);
        assert_eq!(app.display.volume, VolumeUnit::Cup);
        assert_eq!(app.starch_volume_unit, VolumeUnit::Cup);
    }
}
