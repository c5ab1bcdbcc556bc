//! CLI integration tests for the command orchestration.
//!
//! Tests cover:
//! - Config parsing (build_strategy_config, build_risk_params, resolve_*)
//! - Validation of INI files on disk
//! - The evaluation pipeline with MockDataPort and with real CSV files
//! - Correlation assessment from seeded and CSV matrices

mod common;

use common::*;
use sigtrader::adapters::csv_adapter::CsvAdapter;
use sigtrader::adapters::file_config_adapter::FileConfigAdapter;
use sigtrader::adapters::override_config_adapter::OverrideConfigAdapter;
use sigtrader::cli;
use sigtrader::domain::correlation::RiskSignal;
use sigtrader::domain::error::SignalError;
use sigtrader::domain::ohlcv::default_offset;
use sigtrader::domain::position::Direction;
use sigtrader::domain::strategy::{StrategyConfig, StrategyKind};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn assert_exit(actual: ExitCode, expected: ExitCode) {
    assert_eq!(format!("{actual:?}"), format!("{expected:?}"));
}

fn config(content: &str) -> FileConfigAdapter {
    FileConfigAdapter::from_string(content).unwrap()
}

const VALID_INI: &str = r#"
[data]
csv_path = minute_data.csv
symbols = btcusdt, ethusdt
utc_offset_minutes = 0
limit = 500

[strategy]
name = Ryu
direction = short
stochastic_period = 10
window = 40

[correlation]
assets = 6
threshold = 0.8
target_clique_size = 3
target_independent_size = 5
seed = 7

[logging]
level = warn
json = true
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_strategy_config_full() {
        let template = cli::build_strategy_config(&config(VALID_INI)).unwrap();
        assert_eq!(template.strategy, StrategyKind::Ryu);
        assert_eq!(template.direction, Direction::Short);
        assert_eq!(template.params.stochastic_period, 10);
        assert_eq!(template.params.window, Some(40));
    }

    #[test]
    fn build_strategy_config_defaults() {
        let template = cli::build_strategy_config(&config("[strategy]\nname = zen\n")).unwrap();
        assert_eq!(
            template,
            StrategyConfig::new("", StrategyKind::Zen, Direction::Long)
        );
    }

    #[test]
    fn build_strategy_config_unknown_name() {
        let err = cli::build_strategy_config(&config("[strategy]\nname = oni\n")).unwrap_err();
        assert!(matches!(err, SignalError::UnknownStrategy { .. }));
    }

    #[test]
    fn overrides_replace_config_values() {
        let base = config(VALID_INI);
        let overridden = OverrideConfigAdapter::new(&base)
            .with("strategy", "name", Some("tenshi".into()))
            .with("strategy", "direction", Some("LONG".into()));
        let template = cli::build_strategy_config(&overridden).unwrap();
        assert_eq!(template.strategy, StrategyKind::Tenshi);
        assert_eq!(template.direction, Direction::Long);
        assert_eq!(template.params.window, Some(40));
    }

    #[test]
    fn build_risk_params_full_and_default() {
        let params = cli::build_risk_params(&config(VALID_INI)).unwrap();
        assert_eq!(params.threshold, 0.8);
        assert_eq!(params.target_clique_size, 3);
        assert_eq!(params.target_independent_size, 5);

        let defaults = cli::build_risk_params(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(defaults.threshold, 0.7);
        assert_eq!(defaults.target_clique_size, 4);
        assert_eq!(defaults.target_independent_size, 4);
    }

    #[test]
    fn resolve_offset_and_limit() {
        let c = config(VALID_INI);
        assert_eq!(cli::resolve_offset(&c).unwrap().local_minus_utc(), 0);
        assert_eq!(cli::resolve_limit(&c).unwrap(), Some(500));

        let empty = FileConfigAdapter::empty();
        assert_eq!(cli::resolve_offset(&empty).unwrap(), default_offset());
        assert_eq!(cli::resolve_limit(&empty).unwrap(), None);
        assert_eq!(cli::resolve_limit(&config("[data]\nlimit = 0\n")).unwrap(), None);
    }

    #[test]
    fn resolve_symbols_from_config() {
        let mock = MockDataPort::new();
        let symbols = cli::resolve_symbols(&config(VALID_INI), &mock).unwrap();
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT"]);
    }

    #[test]
    fn resolve_symbols_falls_back_to_data_source() {
        let mock = MockDataPort::new()
            .with_bars("SOL", flat_bars(3, 1.0))
            .with_bars("ADA", flat_bars(3, 1.0));
        let symbols = cli::resolve_symbols(&FileConfigAdapter::empty(), &mock).unwrap();
        assert_eq!(symbols, vec!["ADA", "SOL"]);
    }

    #[test]
    fn resolve_symbols_none_available() {
        let err = cli::resolve_symbols(&FileConfigAdapter::empty(), &MockDataPort::new())
            .unwrap_err();
        assert!(matches!(err, SignalError::ConfigMissing { key, .. } if key == "symbols"));
    }

    #[test]
    fn log_settings_from_config() {
        let settings = cli::log_settings(&config(VALID_INI));
        assert_eq!(settings.level, "warn");
        assert!(settings.json);
        assert_eq!(cli::log_settings(&FileConfigAdapter::empty()).level, "info");
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn valid_config_succeeds() {
        let file = write_temp_ini(VALID_INI);
        assert_exit(cli::run_validate(file.path(), false), ExitCode::SUCCESS);
        assert_exit(cli::run_validate(file.path(), true), ExitCode::SUCCESS);
    }

    #[test]
    fn missing_file_fails() {
        let path = PathBuf::from("/nonexistent/sigtrader.ini");
        assert_exit(cli::run_validate(&path, false), ExitCode::from(2));
    }

    #[test]
    fn invalid_threshold_fails() {
        let file = write_temp_ini("[correlation]\nthreshold = 2\n");
        assert_exit(cli::run_validate(file.path(), true), ExitCode::from(2));
    }

    #[test]
    fn overflowing_window_fails_as_config_error() {
        let file = write_temp_ini(
            "[data]\ncsv_path = x.csv\n[strategy]\nname = RYU\nwindow = 18446744073709551615\n",
        );
        assert_exit(cli::run_validate(file.path(), false), ExitCode::from(2));
    }

    #[test]
    fn unknown_strategy_fails_with_strategy_code() {
        let file = write_temp_ini("[data]\ncsv_path = x.csv\n[strategy]\nname = oni\n");
        assert_exit(cli::run_validate(file.path(), false), ExitCode::from(4));
    }
}

mod pipeline_mock {
    use super::*;

    #[test]
    fn pipeline_writes_trade_report() {
        let mock = MockDataPort::new()
            .with_bars("AAA", zigzag_bars(3))
            .with_bars("BBB", zigzag_bars(2));
        let template = StrategyConfig::new("", StrategyKind::Tenshi, Direction::Long);
        let symbols = vec!["AAA".to_string(), "BBB".to_string()];

        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("trades.csv");

        let exit_code =
            cli::run_evaluation_pipeline(&mock, &template, &symbols, None, Some(&output));
        assert_exit(exit_code, ExitCode::SUCCESS);

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // header + 3 + 2 trades
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("strategy,symbol,direction"));
        assert!(lines[1].starts_with("TENSHI,AAA,long,"));
        assert!(lines[5].starts_with("TENSHI,BBB,long,"));
    }

    #[test]
    fn pipeline_without_output_succeeds() {
        let mock = MockDataPort::new().with_bars("AAA", flat_bars(30, 5.0));
        let template = StrategyConfig::new("", StrategyKind::Kitsune, Direction::Short);
        let exit_code =
            cli::run_evaluation_pipeline(&mock, &template, &["AAA".to_string()], None, None);
        assert_exit(exit_code, ExitCode::SUCCESS);
    }

    #[test]
    fn pipeline_no_usable_symbols_returns_insufficient_data() {
        let mock = MockDataPort::new().with_bars("FEW", flat_bars(5, 1.0));
        let template = StrategyConfig::new("", StrategyKind::Ryu, Direction::Long);
        let exit_code =
            cli::run_evaluation_pipeline(&mock, &template, &["FEW".to_string()], None, None);
        assert_exit(exit_code, ExitCode::from(5));
    }

    #[test]
    fn pipeline_partial_universe_continues() {
        let mock = MockDataPort::new()
            .with_bars("GOOD", zigzag_bars(2))
            .with_error("DOWN", "timeout");
        let template = StrategyConfig::new("", StrategyKind::Tenshi, Direction::Long);
        let symbols = vec!["DOWN".to_string(), "GOOD".to_string()];
        let exit_code = cli::run_evaluation_pipeline(&mock, &template, &symbols, None, None);
        assert_exit(exit_code, ExitCode::SUCCESS);
    }
}

mod pipeline_csv {
    use super::*;

    #[test]
    fn csv_directory_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("ZIG.csv"), bars_to_csv(&zigzag_bars(3))).unwrap();

        let adapter = CsvAdapter::new(dir.path().to_path_buf(), default_offset());
        let symbols = cli::resolve_symbols(&FileConfigAdapter::empty(), &adapter).unwrap();
        assert_eq!(symbols, vec!["ZIG"]);

        let output = dir.path().join("out.csv");
        let template = StrategyConfig::new("", StrategyKind::Tenshi, Direction::Short);
        let exit_code =
            cli::run_evaluation_pipeline(&adapter, &template, &symbols, Some(20), Some(&output));
        assert_exit(exit_code, ExitCode::SUCCESS);

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.lines().skip(1).all(|l| l.starts_with("TENSHI,ZIG,short,")));
    }
}

mod correlation_command {
    use super::*;

    #[test]
    fn seeded_assessment_is_reproducible() {
        let c = config(VALID_INI);
        let a = cli::assess_correlation(&c).unwrap();
        let b = cli::assess_correlation(&c).unwrap();
        assert_eq!(a.matrix.size(), 6);
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(a.signal, b.signal);
    }

    #[test]
    fn matrix_file_overrides_generation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("m.csv");
        std::fs::write(
            &path,
            "1,0.9,0.9,0.9\n0.9,1,0.9,0.9\n0.9,0.9,1,0.9\n0.9,0.9,0.9,1\n",
        )
        .unwrap();

        let base = FileConfigAdapter::empty();
        let c = OverrideConfigAdapter::new(&base).with(
            "correlation",
            "matrix_path",
            Some(path.display().to_string()),
        );
        let assessment = cli::assess_correlation(&c).unwrap();
        assert_eq!(assessment.max_clique_size(), 4);
        assert_eq!(assessment.signal, RiskSignal::HighSystemicRisk);
    }

    #[test]
    fn invalid_matrix_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "1,0.9\n0.1,1\n").unwrap();

        let base = FileConfigAdapter::empty();
        let c = OverrideConfigAdapter::new(&base).with(
            "correlation",
            "matrix_path",
            Some(path.display().to_string()),
        );
        assert!(matches!(
            cli::assess_correlation(&c),
            Err(SignalError::InvalidMatrix { .. })
        ));
    }

    #[test]
    fn unseeded_generation_uses_default_size() {
        let assessment = cli::assess_correlation(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(assessment.matrix.size(), 10);
    }
}
