//! Diagnostic and error reporting for Glow.
//! Glow 的诊断和错误报告。
//!
//! This crate provides readable error messages using ariadne.
//! 本 crate 使用 ariadne 库提供易读的错误信息。

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label, Severity};

use ariadne::{ColorGenerator, Config, Label as AriadneLabel, Report, ReportKind, Source};

/// Build the ariadne report for a diagnostic.
/// 为诊断信息构建 ariadne 报告。
fn build_report<'a>(
    filename: &'a str,
    diagnostic: &Diagnostic,
    color: bool,
) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Note => ReportKind::Advice,
    };

    let mut colors = ColorGenerator::new();
    let mut report = Report::build(kind, filename, diagnostic.span.start.0 as usize)
        .with_config(Config::default().with_color(color))
        .with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    for label in &diagnostic.labels {
        let mut ariadne_label =
            AriadneLabel::new((filename, label.span.range())).with_message(&label.message);
        if color {
            ariadne_label = ariadne_label.with_color(colors.next());
        }
        report = report.with_label(ariadne_label);
    }

    for note in &diagnostic.notes {
        report = report.with_note(note);
    }

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    report.finish()
}

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(source: &str, filename: &str, diagnostic: &Diagnostic) {
    let report = build_report(filename, diagnostic, true);
    if let Err(err) = report.eprint((filename, Source::from(source))) {
        eprintln!("error: failed to render diagnostic: {err}");
        eprintln!("{}: {}", filename, diagnostic.message);
    }
}

/// Render a diagnostic to a plain string without colors.
/// 将诊断信息渲染为不带颜色的纯文本字符串。
pub fn render(source: &str, filename: &str, diagnostic: &Diagnostic) -> String {
    let report = build_report(filename, diagnostic, false);
    let mut out = Vec::new();
    if report
        .write((filename, Source::from(source)), &mut out)
        .is_err()
    {
        return format!("{}: {}", filename, diagnostic.message);
    }
    String::from_utf8_lossy(&out).into_owned()
}
