//! Console presentation of check and probe results.

use colored::Colorize;

use crate::checker::ProbeResult;
use crate::models::{CheckReport, Fields, ZoneReport};

/// Prints per-zone group results followed by the run summary.
pub fn print_report(report: &CheckReport) {
    for zone in &report.zones {
        print_zone(zone);
    }
    print_summary(report);
}

fn print_zone(zone: &ZoneReport) {
    println!();
    println!("{}", format!("Checking \"{}\"", zone.zone).bold());
    for group in &zone.groups {
        if group.passed() {
            println!("  {} {}", "✓".green(), group.name);
        } else {
            println!("  {} {}", "✗".red(), group.name);
            print_fragments("Missing:", &group.diff.missing);
            print_fragments("Unknown:", &group.diff.unknown);
        }
    }
}

fn print_fragments(title: &str, fragments: &[Fields]) {
    if fragments.is_empty() {
        return;
    }
    println!("    {title}");
    for fragment in fragments {
        println!("      {}", render_fields(fragment));
    }
}

fn print_summary(report: &CheckReport) {
    println!();
    if !report.passed.is_empty() {
        println!("{} {}", "Passed:".green().bold(), report.passed.join(", "));
    }
    if !report.failed.is_empty() {
        println!("{} {}", "Failed:".red().bold(), report.failed.join(", "));
    }
}

/// Prints raw probe answers, one block per query.
pub fn print_probe(results: &[ProbeResult]) {
    for result in results {
        println!();
        println!(
            "{}",
            format!("{} {}", result.kind, result.hostname).bold()
        );
        match &result.outcome {
            Ok(records) if records.is_empty() => println!("  (no records)"),
            Ok(records) => {
                for record in records {
                    println!("  {}", render_fields(record));
                }
            }
            Err(e) => println!("  {} {e}", "lookup failed:".red()),
        }
    }
}

fn render_fields(fields: &Fields) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
