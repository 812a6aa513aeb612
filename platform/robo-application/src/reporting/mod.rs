use crate::advise::Advice;
use chrono::NaiveDateTime;
use std::fmt::Write;

const SEPARATOR: &str = "------------------------------------------";
const LABEL_WIDTH: usize = 27;

/// `1234.5` → `$1,234.50`, `-1234.5` → `-$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        cents
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Shown before the blocking fetch so an interactive user sees progress.
pub fn request_notice(symbol: &str) -> String {
    format!("ISSUING A REQUEST FOR {symbol}...")
}

fn line(label: &str, value: &str) -> String {
    format!("{label:.<LABEL_WIDTH$} {value}")
}

/// Plain-text report printed after a successful run.
pub fn render_report(advice: &Advice, run_time: NaiveDateTime) -> String {
    let report = &advice.report;
    let recommendation = report.recommendation();

    let mut out = String::new();
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "Displaying results for {}", advice.symbol);
    let _ = writeln!(out, "Current from {}", advice.last_refreshed);
    let _ = writeln!(out, "Report run time {}", run_time.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(
        out,
        "{}",
        line("Latest closing price", &format_usd(report.latest_close))
    );
    let _ = writeln!(
        out,
        "{}",
        line("52 week average high", &format_usd(report.avg_52w_high()))
    );
    let _ = writeln!(
        out,
        "{}",
        line("52 week average low", &format_usd(report.avg_52w_low()))
    );
    let _ = writeln!(out, "{SEPARATOR}");
    for aggregate in &report.trailing {
        let label = format!(
            "{} week average close",
            aggregate.label.trim_end_matches('w')
        );
        let _ = writeln!(out, "{}", line(&label, &format_usd(aggregate.mean_close)));
    }
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "{}", line("Recommendation", &recommendation.rationale));
    out
}
