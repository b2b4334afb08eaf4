//! 쌀국수 롤(창펀) 피 계산기 핵심 로직.
//!
//! 단위 변환과 전분/물 수량 계산을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod container;
pub mod conversion;
pub mod logging;
pub mod quantity;
pub mod report;
pub mod tables;
pub mod ui_cli;
pub mod units;
