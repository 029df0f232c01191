use listing_stats::error::AnalysisError;
use listing_stats::loader::load_table;
use listing_stats::output::render_report;
use listing_stats::pipeline::{RunConfig, analyze, render_charts, run};
use listing_stats::plots::{CATEGORICAL_PLOT, PlotConfig, RELATIONAL_PLOT, STATISTICAL_PLOT};
use listing_stats::preprocess::{Column, preprocess};
use std::io::Write;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/job_listings.csv")
}

fn config_for(input: PathBuf) -> RunConfig {
    RunConfig {
        input,
        plots: None,
        ..RunConfig::default()
    }
}

#[test]
fn test_full_pipeline() {
    let report = run(&config_for(fixture())).expect("Failed to analyze fixture");

    assert_eq!(report.rows_total, 12);
    assert_eq!(report.rows_retained, 8);
    assert!(report.plots.is_empty());

    let text = render_report(&report.moments, report.column);
    assert_eq!(
        text,
        "For the attribute revenue:\n\
         Mean = 11260437500.00, Standard Deviation = 29806007641.60, Skewness = 2.82, and Excess Kurtosis = 7.98.\n\
         The data was right skewed and leptokurtic.\n"
    );
}

#[test]
fn test_company_size_column() {
    let config = RunConfig {
        column: Column::CompanySize,
        ..config_for(fixture())
    };
    let report = run(&config).unwrap();
    let text = render_report(&report.moments, report.column);

    assert!(text.starts_with("For the attribute company_size:\nMean = 17561.25,"));
}

#[test]
fn test_repeated_runs_print_identical_statistics() {
    let config = config_for(fixture());
    let first = run(&config).unwrap();
    let second = run(&config).unwrap();

    assert_eq!(
        render_report(&first.moments, first.column),
        render_report(&second.moments, second.column)
    );
}

#[test]
fn test_five_rows_two_unparseable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "company_size,revenue,seniority_level\n\
         100,€2.3B,Senior\n\
         200,not disclosed,Mid\n\
         300,€45M,Junior\n\
         400,€€,Mid\n\
         500,€310M,Senior\n"
    )
    .unwrap();
    file.flush().unwrap();

    let raw = load_table(file.path(), b',').unwrap();
    let cleaned = preprocess(&raw, 1).unwrap();
    assert_eq!(cleaned.len(), 3);

    let report = run(&config_for(file.path().to_path_buf())).unwrap();
    let expected_mean = (2.3e9 + 45e6 + 310e6) / 3.0;
    let text = render_report(&report.moments, report.column);
    assert!(text.contains(&format!("Mean = {expected_mean:.2},")));
}

#[test]
fn test_all_rows_dropped_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "company_size,revenue,seniority_level\nmany,lots,Senior\n,,\n"
    )
    .unwrap();
    file.flush().unwrap();

    let err = run(&config_for(file.path().to_path_buf())).unwrap_err();
    let analysis = err.downcast_ref::<AnalysisError>().unwrap();
    assert!(matches!(
        analysis,
        AnalysisError::InsufficientData {
            retained: 0,
            total: 2,
            ..
        }
    ));
}

#[test]
fn test_missing_input_file_is_fatal() {
    let result = run(&config_for(PathBuf::from("tests/fixtures/does_not_exist.csv")));
    assert!(result.is_err());
}

#[test]
fn test_report_survives_chart_failure() {
    // An existing file where the chart directory should go makes every chart fail.
    let blocker = tempfile::NamedTempFile::new().unwrap();
    let config = RunConfig {
        output_dir: blocker.path().to_path_buf(),
        plots: Some(PlotConfig::default()),
        ..config_for(fixture())
    };

    let analysis = analyze(&config).expect("Analysis must not depend on charts");
    let text = render_report(&analysis.report.moments, analysis.report.column);
    assert!(text.starts_with("For the attribute revenue:\nMean = 11260437500.00,"));
    assert!(analysis.report.plots.is_empty());

    assert!(render_charts(&analysis.cleaned, &config).is_err());
    assert!(run(&config).is_err());
}

#[test]
fn test_disabled_charts_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        output_dir: dir.path().join("charts"),
        ..config_for(fixture())
    };

    let analysis = analyze(&config).unwrap();
    assert!(render_charts(&analysis.cleaned, &config).unwrap().is_empty());
    assert!(!dir.path().join("charts").exists());
}

#[test]
#[ignore = "needs system fonts for chart text"]
fn test_charts_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        output_dir: dir.path().join("charts"),
        plots: Some(PlotConfig {
            width: 640,
            height: 480,
        }),
        ..config_for(fixture())
    };

    let report = run(&config).unwrap();

    assert_eq!(report.plots.len(), 3);
    for name in [RELATIONAL_PLOT, STATISTICAL_PLOT, CATEGORICAL_PLOT] {
        let path = dir.path().join("charts").join(name);
        assert!(path.exists(), "{} was not written", path.display());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
