//! Panic hook printing a structured crash report.
//!
//! The report names the version, platform, time, the panic message and
//! location, and the pipeline stage and file in progress.

use super::context::{get_current_context, PipelineContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

/// Install the crash-report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!();
        eprint!("{}", crash_report(info, &get_current_context()));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>, context: &PipelineContext) -> String {
    let mut lines = vec![
        boxed_line(&format!("Version: {VERSION}")),
        boxed_line(&format!("Platform: {}", std::env::consts::OS)),
        boxed_line(&format!(
            "Time: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )),
        separator(),
        boxed_line(&format!("PANIC: {}", panic_message(info))),
    ];
    if let Some(location) = info.location() {
        lines.push(boxed_line(&format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        )));
    }
    lines.push(separator());
    lines.extend(context_lines(context));
    lines.push(separator());
    if std::env::var("RUST_BACKTRACE").is_ok() {
        lines.push(boxed_line("STACK TRACE:"));
        lines.push(bottom());
        lines.push(std::backtrace::Backtrace::capture().to_string());
    } else {
        lines.push(boxed_line("Run with RUST_BACKTRACE=1 for stack trace"));
        lines.push(bottom());
    }

    let mut report = format!(
        "{}\n{}\n{}\n",
        top(),
        boxed_line("AI-MATURITY CRASH REPORT"),
        separator()
    );
    for line in lines {
        report.push_str(&line);
        report.push('\n');
    }
    report
}

fn context_lines(context: &PipelineContext) -> Vec<String> {
    let mut lines = vec![boxed_line("PIPELINE CONTEXT:")];
    match context.stage {
        Some(stage) => lines.push(boxed_line(&format!("  Stage: {stage}"))),
        None => lines.push(boxed_line("  Stage: (not set, crash before any stage started)")),
    }
    if let Some(file) = &context.current_file {
        lines.push(boxed_line(&format!("  File: {}", file.display())));
    }
    lines
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn top() -> String {
    format!("╔{}╗", "═".repeat(WIDTH))
}

fn separator() -> String {
    format!("╠{}╣", "═".repeat(WIDTH))
}

fn bottom() -> String {
    format!("╚{}╝", "═".repeat(WIDTH))
}

fn boxed_line(text: &str) -> String {
    let inner = WIDTH - 4;
    format!("║  {:<inner$}  ║", truncate(text, inner))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
