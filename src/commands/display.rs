//! Human-readable output for `init` and `repair`.

use std::path::Path;
use ttnconf::ini::{Deduplication, RepairReport};
use ttnconf::startup::StartupReport;

/// Print what a repair and deduplication pass changed.
pub fn print_cleanup(repair: &RepairReport, deduplication: &Deduplication) {
    if repair.fixes.is_empty() && deduplication.is_empty() {
        println!("Config is healthy. No repairs needed.");
        return;
    }

    if !repair.fixes.is_empty() {
        println!("Lines repaired ({}):", repair.fixes.len());
        for fix in &repair.fixes {
            let section = fix.section.as_deref().unwrap_or("-");
            match &fix.replacement {
                Some(replacement) => println!(
                    "  line {} [{}]: '{}' -> '{}'",
                    fix.line, section, fix.original, replacement
                ),
                None => println!(
                    "  line {} [{}]: removed '{}' (empty key)",
                    fix.line, section, fix.original
                ),
            }
        }
        println!();
    }

    for name in &deduplication.merged_sections {
        println!("Merged repeated section [{}]", name);
    }
    if !deduplication.removed.is_empty() {
        println!("Duplicate options removed ({}):", deduplication.removed.len());
        for removed in &deduplication.removed {
            println!(
                "  [{}] {} = {}",
                removed.section, removed.key, removed.value
            );
        }
        println!();
    }
}

/// Print the startup sequence outcome followed by the resolved toggles.
pub fn print_startup_report(path: &Path, report: &StartupReport) {
    println!("Config: {}", path.display());
    println!();

    print_cleanup(&report.repair, &report.deduplication);

    if report.versions_recorded > 0 {
        println!("Recorded {} node version(s).", report.versions_recorded);
    }
    if !report.defaults_applied.is_empty() {
        println!("Defaults applied ({}):", report.defaults_applied.len());
        for entry in &report.defaults_applied {
            println!("  [{}] {} = {}", entry.section, entry.option, entry.value);
        }
        println!();
    }

    println!("Features:");
    for (name, enabled) in report.flags.iter() {
        println!("  {:<28} {}", name, if enabled { "on" } else { "off" });
    }
}
