use anyhow::Result;
use colored::*;
use fieldcheck_core::ValidationReport;
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.violations.is_empty() {
        println!("\n{}", "Violations:".red().bold());
        for violation in &report.violations {
            println!("  {}", violation.to_string().red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    for (rule, count) in report.counts() {
        println!("  {}: {}", rule, count);
    }
    println!("  Total violations: {}", report.violations.len());
    println!("  Total warnings:   {}", report.warnings.len());
    println!("  Rows validated:   {}", report.stats.rows_validated);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "violations": report.violations,
        "warnings": report.warnings,
        "alignment": report.alignment,
        "summary": {
            "counts": report.counts(),
            "violation_count": report.violations.len(),
            "warning_count": report.warnings.len(),
            "stats": report.stats,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
