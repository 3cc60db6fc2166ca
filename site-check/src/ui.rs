//! Display logic for the site-check CLI.
//!
//! This module handles human-facing output: colored result rows, the live
//! `[N/M]` progress counter, headers, and summaries. The counter writes to
//! stderr so stdout stays clean for piped/structured output. Uses only the
//! `console` crate.

use console::{pad_str, style, Alignment, Term};
use site_check_lib::{ProbeResult, Progress};
use std::time::Duration;

// ── Progress counter ─────────────────────────────────────────────────────────

/// Redraws a `[N/M] checked` line on stderr as probes complete.
pub struct ProgressCounter {
    term: Term,
    enabled: bool,
}

impl ProgressCounter {
    /// Create a counter. Disabled when stderr is not a terminal so logs and
    /// CI output are not littered with redraw sequences.
    pub fn new() -> Self {
        let term = Term::stderr();
        let enabled = term.is_term();
        Self { term, enabled }
    }

    /// Redraw the counter for the given progress state.
    pub fn update(&self, progress: Progress) {
        if !self.enabled {
            return;
        }
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!(
            "{} {} of {} checked",
            style(format!("[{}/{}]", progress.completed, progress.total)).cyan(),
            progress.completed,
            progress.total,
        ));
    }

    /// Clear the counter line once the run is finished.
    pub fn finish(&self) {
        if self.enabled {
            let _ = self.term.clear_line();
        }
    }
}

impl Default for ProgressCounter {
    fn default() -> Self {
        Self::new()
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a run.
pub fn print_header(target_count: usize, concurrency: usize, timeout: Duration) {
    println!(
        "{} {} {}",
        style("site-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "checking {} URL{}",
            target_count,
            if target_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!(
        "{}",
        style(format!(
            "Concurrency: {} | Timeout: {}s",
            concurrency,
            timeout.as_secs()
        ))
        .dim()
    );
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Format and print a single probe result with colors and alignment.
pub fn print_result(result: &ProbeResult) {
    let url_width = 44;
    let shown_url = if result.final_url.is_empty() {
        &result.url
    } else {
        &result.final_url
    };
    let padded_url = pad_str(shown_url, url_width, Alignment::Left, Some(".."));

    let marker = if result.ok {
        style("OK  ").green().bold()
    } else {
        style("FAIL").red().bold()
    };

    let status = match result.status {
        Some(code) => code.to_string(),
        None => "-".to_string(),
    };

    let latency = format!("{:>6}ms", result.latency_ms);

    let detail = if result.error.is_empty() {
        String::new()
    } else {
        // Truncate by characters, not bytes: error text carries OS messages
        // and URLs that may be non-ASCII.
        let error: String = result.error.chars().take(80).collect();
        format!("  {}", style(error).dim())
    };

    println!(
        "  {}  {}  {}  {}{}",
        marker,
        style(format!("{:>4}", status)).cyan(),
        style(latency).dim(),
        padded_url,
        detail,
    );
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the end-of-run summary line.
pub fn print_summary(results: &[ProbeResult], duration: Duration) {
    let ok = results.iter().filter(|r| r.ok).count();
    let failed = results.len() - ok;

    let ok_part = style(format!("{} ok", ok)).green();
    let failed_part = if failed > 0 {
        format!(", {}", style(format!("{} failed", failed)).red())
    } else {
        String::new()
    };

    println!(
        "{} {}{} {}",
        style("Summary:").bold(),
        ok_part,
        failed_part,
        style(format!("in {:.2}s", duration.as_secs_f64())).dim(),
    );
}
