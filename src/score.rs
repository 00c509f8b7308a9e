use crate::metrics::AggregateMetrics;

/// Single 0-100 health heuristic. Deductions: latency tiers (-10/-20), error
/// tiers (-15/-30), throughput shortfall against the expected rate (-20), and
/// -5 per per-component bottleneck finding.
pub(crate) fn performance_score(
    metrics: &AggregateMetrics,
    duration_secs: u64,
    bottleneck_count: usize,
) -> u32 {
    let mut score: i64 = 100;

    if metrics.average_latency_ms > 500.0 {
        score -= 20;
    } else if metrics.average_latency_ms > 200.0 {
        score -= 10;
    }

    if metrics.average_error_rate > 0.1 {
        score -= 30;
    } else if metrics.average_error_rate > 0.05 {
        score -= 15;
    }

    if duration_secs > 0 {
        let expected_rps = metrics.total_requests as f64 / duration_secs as f64;
        if metrics.average_throughput_rps < 0.8 * expected_rps {
            score -= 20;
        }
    }

    score -= 5 * bottleneck_count as i64;

    score.clamp(0, 100) as u32
}
