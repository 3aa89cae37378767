//! Time-bounded `--help` probing of installed commands.
//!
//! Some programs ignore `--help` and block on stdin or run forever; every
//! probe therefore runs in its own process group under a hard timeout, and
//! the whole group is killed on expiry. Killing only the direct child is
//! not enough: a grandchild inheriting the output pipes would keep the
//! drain threads blocked for its own lifetime. Whatever output was
//! captured before the kill is still usable.

use std::io::Read;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::Result;

/// Hard ceiling on a single `--help` invocation.
pub const HELP_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs `<command> --help` and returns combined stdout and stderr.
///
/// Programs disagree about which stream help text belongs on, so both are
/// captured. A probe that exceeds [`HELP_TIMEOUT`] has its process group
/// killed; the partial output captured up to that point is returned, not
/// treated as an error. A command that cannot be spawned at all yields an
/// empty string.
pub fn probe_help(command: &str) -> Result<String> {
    let mut child = match Command::new(command)
        .arg("--help")
        .process_group(0)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            debug!(command, error = %err, "help probe could not spawn");
            return Ok(String::new());
        }
    };

    // Drain both pipes concurrently so neither fills and blocks the child.
    let stdout_reader = spawn_drain(child.stdout.take());
    let stderr_reader = spawn_drain(child.stderr.take());

    match child.wait_timeout(HELP_TIMEOUT)? {
        Some(status) => {
            debug!(command, exit = ?status.code(), "help probe finished");
        }
        None => {
            warn!(command, timeout = ?HELP_TIMEOUT, "help probe timed out, killing");
            kill_group(child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    let mut combined = join_drain(stdout_reader);
    combined.push_str(&join_drain(stderr_reader));
    Ok(combined)
}

/// Kills the probe's entire process group so any grandchildren holding the
/// output pipes die too and the drain threads see EOF.
fn kill_group(pid: u32) {
    let _ = Command::new("kill")
        .args(["-9", "--", &format!("-{pid}")])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

fn spawn_drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut reader| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_drain(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
