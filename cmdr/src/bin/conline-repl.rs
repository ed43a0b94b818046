// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive prompt over the real terminal. Run with `--help` for the options.

use clap::Parser;
use conline::{CommonResult, CrosstermSurface, TracingConfig, ok,
              try_initialize_logging_global};
use conline_cmdr::{CLIArg, ReplSettings, build_context, run_repl, ui_str};

fn main() -> CommonResult<()> {
    let cli_arg = CLIArg::parse();

    let should_log = cli_arg.global_options.enable_logging;

    should_log.then(|| {
        // Stdout is the surface being edited, so the log goes to a file.
        try_initialize_logging_global(TracingConfig::new_file(
            cli_arg.global_options.log_file.as_str(),
        ))
        .ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    });

    let mut context = build_context(&cli_arg)?;
    let settings = ReplSettings::from(&cli_arg);
    let mut surface = CrosstermSurface::default();

    match run_repl(&mut surface, &mut context, &settings) {
        Ok(summary) => {
            tracing::debug!(message = "Stop logging...", summary = ?summary);
        }
        Err(report) => {
            tracing::error!(message = "conline-repl stopped", error = ?report);
            eprintln!("{}", ui_str::unrecoverable_error_msg(&report));
        }
    }

    ok!()
}
