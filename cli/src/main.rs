use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

use switch_catalogue_core::Catalogue;
use switch_catalogue_extract::report::RunReport;
use switch_catalogue_extract::{GroffRenderer, ScanConfig, scan_man_pages, scrape_help, shell};
use switch_catalogue_sqlite::SwitchStore;

#[derive(Debug, Parser)]
#[command(name = "switch-scan")]
#[command(about = "Build a catalogue of command-line switches from manual pages")]
struct Cli {
    /// Operating system name the catalogue entries are filed under.
    #[arg(long)]
    os_name: String,
    /// Operating system version, appended to the name.
    #[arg(long, default_value = "")]
    os_version: String,
    /// SQLite database file path.
    #[arg(long, default_value = "switch.sqlite3")]
    db: PathBuf,
    /// Root of the manual tree to scan.
    #[arg(long, default_value = "/usr/share/man")]
    man_root: PathBuf,
    /// Comma-separated manual sections to scan.
    #[arg(long, default_value = "1,8")]
    sections: String,
    /// Probe `--help` for commands without a manual page.
    #[arg(long)]
    from_help: bool,
    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run_scan(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_scan(cli: Cli) -> Result<(), String> {
    let sections = parse_sections(&cli.sections)?;
    let system_name = format!("{}{}", cli.os_name, cli.os_version);

    let mut store = SwitchStore::open(&cli.db)
        .map_err(|err| format!("Failed to open database '{}': {err}", cli.db.display()))?;
    let system = store
        .resolve_system(&system_name)
        .map_err(|err| format!("Failed to resolve system '{system_name}': {err}"))?;

    let builtins = shell::shell_builtins()
        .map_err(|err| format!("Failed to enumerate shell builtins: {err}"))?;

    let config = ScanConfig {
        man_root: cli.man_root.clone(),
        sections,
        shell_builtins: builtins.into_iter().collect(),
    };

    let mut report = RunReport::begin(&system_name);
    let documented = scan_man_pages(&config, &GroffRenderer, &mut store, system, &mut report)
        .map_err(|err| format!("Scan failed: {err}"))?;

    println!(
        "Scanned {} page(s) under '{}': {} command(s) recorded, {} skipped.",
        report.pages_seen,
        cli.man_root.display(),
        report.commands_recorded,
        report.failures.len()
    );

    let installed = shell::installed_commands()
        .map_err(|err| format!("Failed to enumerate installed commands: {err}"))?;
    let undocumented: BTreeSet<String> = installed
        .difference(&documented)
        .cloned()
        .collect();

    if cli.from_help {
        let stored = scrape_help(&mut store, system, &undocumented, &mut report)
            .map_err(|err| format!("Help scraping failed: {err}"))?;
        println!(
            "Probed --help for {} undocumented command(s): {stored} yielded switches.",
            undocumented.len()
        );
    }

    let known = store
        .known_commands(system)
        .map_err(|err| format!("Failed to list known commands: {err}"))?;
    let bare: BTreeSet<String> = undocumented.difference(&known).cloned().collect();
    let seeded = store
        .record_bare_command_names(system, &bare)
        .map_err(|err| format!("Failed to seed bare commands: {err}"))?;
    report.bare_commands_seeded = seeded;
    println!("Seeded {seeded} command(s) with no documentation.");

    report.finish();
    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .map_err(|err| format!("Failed to write report '{}': {err}", path.display()))?;
        println!("Report written to '{}'.", path.display());
    }

    Ok(())
}

fn parse_sections(raw: &str) -> Result<Vec<u8>, String> {
    let sections: Vec<u8> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .map_err(|_| format!("Invalid manual section '{part}'"))
        })
        .collect::<Result<_, _>>()?;
    if sections.is_empty() {
        return Err("No manual sections given".to_string());
    }
    Ok(sections)
}
