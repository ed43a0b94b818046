// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Hand the history to an external picker (think `fzf`) and use the line it prints.

use std::{io::{self, BufRead, BufReader, Write},
          process::{Child, Command, Stdio},
          time::Duration};

use wait_timeout::ChildExt;

/// Pick a line out of the history. [None] means "nothing picked", whatever the reason.
pub trait HistorySearch {
    fn search(&mut self, entries_oldest_first: &[String]) -> Option<String>;
}

/// Runs `program args..`, writes the history to its stdin one entry per line (oldest
/// first), waits for it to exit, and reads the first line of its stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHistorySearch {
    pub program: String,
    pub args: Vec<String>,
    /// The child is killed if it runs longer than this.
    pub timeout: Duration,
}

impl ProcessHistorySearch {
    /// Build from a whitespace separated command line. Returns [None] for a blank one.
    #[must_use]
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
            timeout,
        })
    }

    fn try_search(&self, entries_oldest_first: &[String]) -> io::Result<Option<String>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        // Feed stdin from another thread so a child that never reads it can't block
        // us past the timeout.
        if let Some(mut stdin) = child.stdin.take() {
            let payload: String = entries_oldest_first
                .iter()
                .map(|line| format!("{line}\n"))
                .collect();
            std::thread::spawn(move || {
                // A child that exits early closes the pipe; that's fine.
                stdin.write_all(payload.as_bytes()).ok();
            });
        }

        let Some(status) = child.wait_timeout(self.timeout)? else {
            tracing::warn!(
                message = "history search timed out",
                program = %self.program,
                timeout_ms = self.timeout.as_millis()
            );
            kill_and_reap(&mut child);
            return Ok(None);
        };

        if !status.success() {
            tracing::debug!(message = "history search picked nothing", status = %status);
            return Ok(None);
        }

        let Some(stdout) = child.stdout.take() else {
            return Ok(None);
        };
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line)?;
        let line = line.trim_end_matches(['\r', '\n']);
        Ok((!line.is_empty()).then(|| line.to_string()))
    }
}

fn kill_and_reap(child: &mut Child) {
    child.kill().ok();
    child.wait().ok();
}

impl HistorySearch for ProcessHistorySearch {
    fn search(&mut self, entries_oldest_first: &[String]) -> Option<String> {
        match self.try_search(entries_oldest_first) {
            Ok(it) => it,
            Err(error) => {
                tracing::warn!(
                    message = "history search unavailable",
                    program = %self.program,
                    error = %error
                );
                None
            }
        }
    }
}
