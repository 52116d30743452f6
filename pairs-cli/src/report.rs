//! Plain-text rendering of an [`AnalysisReport`].

use pairs_analytics::{
    AnalysisConfig, AnalysisReport, CorrelationOutcome, recommendation::Action,
};
use std::fmt::Write;

const RULE: &str = "════════════════════════════════════════════════════════════";

pub fn render_header(symbol_a: &str, symbol_b: &str, period: &str, config: &AnalysisConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "📊 PAIR TRADING REPORT: {symbol_a} / {symbol_b}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Period: {period}   Column: {}   Lookback: {}   Z-Score Threshold: {}",
        config.price_column, config.lookback_window, config.z_score_threshold
    );
    out
}

pub fn render_correlation(outcome: &CorrelationOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n🔗 Correlation Analysis");
    match outcome {
        CorrelationOutcome::Success {
            correlation,
            assessment,
            recommendation,
        } => {
            let _ = writeln!(out, "   Correlation:    {correlation:.2}");
            let _ = writeln!(out, "   Assessment:     {assessment}");
            let _ = writeln!(out, "   Recommendation: {recommendation}");
        }
        CorrelationOutcome::Error { message, .. } => {
            let _ = writeln!(out, "   ⚠ {message}");
        }
    }
    out
}

pub fn render_analysis(report: &AnalysisReport, recent: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n💰 Normalized Prices (base 100)");
    let last_a = report.normalized_a.last().copied().unwrap_or(100.0);
    let last_b = report.normalized_b.last().copied().unwrap_or(100.0);
    let _ = writeln!(out, "   {:<8} {last_a:>8.2}", report.symbol_a);
    let _ = writeln!(out, "   {:<8} {last_b:>8.2}", report.symbol_b);
    let _ = writeln!(
        out,
        "   {} aligned rows, {} usable after burn-in",
        report.aligned_rows,
        report.records.len()
    );

    if let Some(bands) = &report.bands {
        let _ = writeln!(out, "\n📈 Spread Analysis");
        let _ = writeln!(out, "   Mean rolling std: {:.5}", bands.mean_spread_std);
        let _ = writeln!(
            out,
            "   Thresholds (Z=±{}): {:+.5} / {:+.5}",
            report.config.z_score_threshold, bands.upper, bands.lower
        );
    }

    if let Some(recommendation) = &report.recommendation {
        let _ = writeln!(out, "\n🎯 Latest Signal");
        let _ = writeln!(out, "   Action:      {}", recommendation.action);
        let _ = writeln!(out, "   Z-Score:     {:+.3}", recommendation.z_score);
        if let Action::Enter(_) = recommendation.action {
            let _ = writeln!(out, "   Probability: {:.1}%", recommendation.probability * 100.0);
        }
        if let Some(reversion) = recommendation.prob_mean_reversion {
            let _ = writeln!(out, "   Mean reversion tail: {:.1}%", reversion * 100.0);
        }
    }

    let metrics = &report.metrics;
    let _ = writeln!(out, "\n📊 Strategy Performance");
    let _ = writeln!(out, "   Total Trades:      {}", metrics.total_trades);
    let _ = writeln!(
        out,
        "   Success Rate:      {:.1}% ({} of {} evaluated)",
        metrics.success_rate * 100.0,
        metrics.successful_trades,
        metrics.evaluated_trades
    );
    let _ = writeln!(out, "   Avg Probability:   {:.1}%", metrics.avg_probability * 100.0);
    let _ = writeln!(out, "   Z-Score Threshold: {}", report.config.z_score_threshold);

    let changes = report.signal_changes().collect::<Vec<_>>();
    if !changes.is_empty() && recent > 0 {
        let _ = writeln!(out, "\n🔁 Recent Signal Changes");
        for record in &changes[changes.len().saturating_sub(recent)..] {
            let _ = writeln!(
                out,
                "   {}  {:<15} z={:+.3}  p={:.3}",
                record.spread.time.format("%Y-%m-%d"),
                record.signal,
                record.z_score(),
                record.probability
            );
        }
    }

    out
}
