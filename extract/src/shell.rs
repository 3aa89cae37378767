//! Shell introspection: installed command names and builtin names.
//!
//! Both listings come from `bash -c "compgen ..."`. Output lines that do
//! not start with an ASCII letter (completion artifacts like `[` or `!`)
//! are dropped.

use std::collections::BTreeSet;
use std::process::Command;

use tracing::debug;

use crate::error::Result;

/// Names of every command invocable from the shell, per `compgen -c`.
pub fn installed_commands() -> Result<BTreeSet<String>> {
    let names = compgen("-c")?;
    debug!(count = names.len(), "enumerated installed commands");
    Ok(names)
}

/// Names of the shell's builtin commands, per `compgen -b`.
pub fn shell_builtins() -> Result<BTreeSet<String>> {
    let names = compgen("-b")?;
    debug!(count = names.len(), "enumerated shell builtins");
    Ok(names)
}

fn compgen(flag: &str) -> Result<BTreeSet<String>> {
    let output = Command::new("bash")
        .arg("-c")
        .arg(format!("compgen {flag}"))
        .output()?;

    let names = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic()))
        .map(str::to_string)
        .collect();
    Ok(names)
}
