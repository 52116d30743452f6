use chrono::{DateTime, TimeZone, Utc};
use pairs_analytics::{
    AnalysisConfig, AnalysisRequest, CorrelationOutcome, PairAnalyzer, ReadinessTier, Signal,
    TimeSeries,
    correlation::score_pair,
    series::{CLOSE, Candle},
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

fn day(n: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200 + n * 86_400, 0).unwrap()
}

fn series(symbol: &str, points: impl IntoIterator<Item = (i64, f64)>) -> TimeSeries {
    let candles = points
        .into_iter()
        .map(|(n, close)| Candle::flat(day(n), close))
        .collect::<Vec<_>>();
    TimeSeries::from_candles(symbol, &candles).unwrap()
}

/// Mirror-image legs around 100: A = 100 + x, B = 100 - x.
fn anti_correlated_pair() -> (TimeSeries, TimeSeries) {
    let moves = [0.0, 1.0, 2.0, 1.0, 2.0, 1.0, 6.0, 1.0, 0.0, 1.0];
    let a = series("AAA", moves.iter().enumerate().map(|(n, x)| (n as i64, 100.0 + x)));
    let b = series("BBB", moves.iter().enumerate().map(|(n, x)| (n as i64, 100.0 - x)));
    (a, b)
}

fn config() -> AnalysisConfig {
    AnalysisConfig::default()
        .with_lookback_window(3)
        .with_z_score_threshold(1.0)
}

#[test]
fn test_anti_correlated_pair_end_to_end() {
    init_logging();
    let (a, b) = anti_correlated_pair();

    let report = PairAnalyzer::new(config()).unwrap().run(&a, &b).unwrap();

    match &report.correlation {
        CorrelationOutcome::Success {
            correlation,
            assessment,
            ..
        } => {
            assert!((correlation + 1.0).abs() < 1e-9);
            assert_eq!(*assessment, ReadinessTier::High);
        }
        other => panic!("expected success, got {other:?}"),
    }

    // 10 rows: row 0 has no return, rows 1..=2 fill the window, rows 3..=9 are usable
    assert_eq!(report.records.len(), 7);
    assert_eq!(report.records[0].spread.time, day(3));

    let signals = report.records.iter().map(|r| r.signal).collect::<Vec<_>>();
    assert_eq!(
        signals,
        vec![
            Signal::LongAShortB,
            Signal::Hold,
            Signal::Hold,
            Signal::ShortALongB,
            Signal::Hold,
            Signal::Hold,
            Signal::Hold,
        ]
    );

    // Spread drops on day 3 then jumps on day 6
    assert!(report.records[0].z_score() < -1.0);
    assert!(report.records[3].z_score() > 1.0);
    assert_eq!(report.records[3].spread.time, day(6));

    let changed = report.records.iter().map(|r| r.signal_changed).collect::<Vec<_>>();
    assert_eq!(changed, vec![true, true, false, true, true, false, false]);

    assert_eq!(report.metrics.total_trades, 2);
    assert_eq!(report.metrics.evaluated_trades, 2);
    assert_eq!(report.metrics.success_rate, 1.0);
    assert!(report.metrics.avg_probability > 0.0 && report.metrics.avg_probability < 0.5);

    for record in report.records.iter().filter(|r| r.signal == Signal::Hold) {
        assert_eq!(record.probability, 0.0);
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let (a, b) = anti_correlated_pair();
    let request = AnalysisRequest {
        series_a: a,
        series_b: b,
        config: config(),
    };

    let first = PairAnalyzer::analyze(&request).unwrap();
    let second = PairAnalyzer::analyze(&request).unwrap();

    assert_eq!(first.records.len(), second.records.len());
    for (x, y) in first.records.iter().zip(&second.records) {
        assert_eq!(x.signal, y.signal);
        assert_eq!(x.signal_changed, y.signal_changed);
        assert_eq!(x.z_score().to_bits(), y.z_score().to_bits());
        assert_eq!(x.probability.to_bits(), y.probability.to_bits());
        assert_eq!(x.prob_mean_reversion.to_bits(), y.prob_mean_reversion.to_bits());
    }
    assert_eq!(first, second);
}

#[test]
fn test_misaligned_calendars_use_shared_days_only() {
    // B trades every day, A skips days 2 and 5
    let a = series(
        "AAA",
        [0, 1, 3, 4, 6, 7, 8, 9, 10, 11]
            .into_iter()
            .map(|n| (n, 50.0 + ((n * 7) % 5) as f64)),
    );
    let b = series("BBB", (0..12).map(|n| (n, 80.0 + ((n * 3) % 4) as f64)));

    let report = PairAnalyzer::new(config()).unwrap().run(&a, &b).unwrap();

    assert_eq!(report.aligned_rows, 10);
    assert!(
        report
            .records
            .iter()
            .all(|r| r.spread.time != day(2) && r.spread.time != day(5))
    );
}

#[test]
fn test_constant_prices_have_no_usable_records() {
    let a = series("AAA", (0..10).map(|n| (n, 42.0)));
    let b = series("BBB", (0..10).map(|n| (n, 7.0)));

    let error = PairAnalyzer::new(config()).unwrap().run(&a, &b).unwrap_err();
    assert_eq!(error.kind(), "insufficient_data");

    // Correlation of flat prices is undefined, reported as a value rather than raised
    let outcome = score_pair(&a, &b, CLOSE);
    assert!(!outcome.is_success());
}

#[test]
fn test_report_serializes_signal_names() {
    let (a, b) = anti_correlated_pair();
    let report = PairAnalyzer::new(config()).unwrap().run(&a, &b).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["records"][0]["signal"], "Long_A_Short_B");
    assert_eq!(json["records"][3]["signal"], "Short_A_Long_B");
    assert_eq!(json["correlation"]["status"], "success");
    assert!(json["records"][0]["z_score"].is_number());
}

#[test]
fn test_single_shock_in_long_window_keeps_nonzero_probability() {
    init_logging();

    // 101 quiet spreads then a 50% jump in A on the final bar
    let a = series(
        "AAA",
        (0..102).map(|n| {
            let quiet = 100.0 * (1.0 + 0.001 * (n as f64 * 0.7).sin());
            (n, if n == 101 { quiet * 1.5 } else { quiet })
        }),
    );
    let b = series("BBB", (0..102).map(|n| (n, 50.0 + 0.02 * (n as f64 * 1.3).cos())));

    let config = AnalysisConfig::default().with_lookback_window(100);
    let report = PairAnalyzer::new(config).unwrap().run(&a, &b).unwrap();

    assert_eq!(report.records.len(), 2);
    let last = report.records.last().unwrap();
    assert_eq!(last.signal, Signal::ShortALongB);
    assert!(last.z_score() > 9.0, "z = {}", last.z_score());
    assert!(last.probability > 0.0);
    assert!(last.prob_mean_reversion > 0.0);
    assert_eq!(last.probability, last.prob_mean_reversion);
}
