// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use conline::{AliasTable, CommonResult, EditMode, LineEnding, ReadControl, ReadlineConfig,
              ReadlineContext, TerminalSurface, WakeMask, ok};
use crossterm::style::Stylize;
use miette::IntoDiagnostic;

use crate::{CLIArg, ui_str};

/// Matches the fixed size line buffer hosts typically hand to a console read.
pub const DEFAULT_CAPACITY: usize = 128;

/// Which reader the next line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderChoice {
    /// [`ReadlineContext::read_line`].
    #[default]
    Edited,
    /// The surface's own line input, for comparison.
    Plain,
}

impl ReaderChoice {
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            ReaderChoice::Edited => ui_str::EDITED_PROMPT,
            ReaderChoice::Plain => ui_str::PLAIN_PROMPT,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ReaderChoice::Edited => ReaderChoice::Plain,
            ReaderChoice::Plain => ReaderChoice::Edited,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Switch,
    Echo,
}

impl ReplCommand {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "exit" => ReplCommand::Exit,
            "switch" => ReplCommand::Switch,
            _ => ReplCommand::Echo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplSettings {
    pub capacity: usize,
    pub wake_mask: WakeMask,
    /// Echo in red, as an escape sequence. Off for surfaces that can't show color.
    pub colored_echo: bool,
}

impl From<&CLIArg> for ReplSettings {
    fn from(cli_arg: &CLIArg) -> Self {
        Self {
            capacity: cli_arg.capacity,
            wake_mask: if cli_arg.wake_tab {
                WakeMask::NONE.with_unit('\t')
            } else {
                WakeMask::NONE
            },
            colored_echo: true,
        }
    }
}

/// Build the readline context from the environment and the command line.
///
/// # Errors
///
/// Returns an error if an `--alias` definition is malformed.
pub fn build_context(cli_arg: &CLIArg) -> CommonResult<ReadlineContext> {
    let mut config = ReadlineConfig::from_env();
    if cli_arg.insert {
        config = config.with_initial_edit_mode(EditMode::Insert);
    }

    let mut aliases = AliasTable::new();
    for definition in &cli_arg.alias {
        aliases.insert_definition(config.program_name.as_str(), definition)?;
    }
    tracing::debug!(message = "aliases loaded", count = aliases.len());

    Ok(ReadlineContext::new(config).with_aliases(Box::new(aliases)))
}

/// What happened over one run of [`run_repl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplSummary {
    pub lines_echoed: usize,
    pub early_returns: usize,
}

/// Prompt, read, and echo until `exit` or end of input.
///
/// # Errors
///
/// Returns an error if the surface can't be written to or read from.
pub fn run_repl(
    surface: &mut dyn TerminalSurface,
    context: &mut ReadlineContext,
    settings: &ReplSettings,
) -> CommonResult<ReplSummary> {
    let mut choice = ReaderChoice::default();
    let mut summary = ReplSummary::default();
    let control = ReadControl {
        wake_mask: settings.wake_mask,
        ..ReadControl::default()
    };

    loop {
        surface.write_cells(choice.prompt()).into_diagnostic()?;

        let (line, ending) = match choice {
            ReaderChoice::Edited => {
                let output = context.read_line(surface, settings.capacity, Some(&control))?;
                if output.len == 0 && output.ending == LineEnding::Submitted {
                    break;
                }
                (output.line().to_string(), output.ending)
            }
            ReaderChoice::Plain => {
                let raw = surface.read_raw_line().into_diagnostic()?;
                if raw.is_empty() {
                    break;
                }
                let line = raw.trim_end_matches(['\r', '\n']).to_string();
                (line, LineEnding::Submitted)
            }
        };

        tracing::debug!(message = "line read", line = ?line, ending = %ending);

        if ending == LineEnding::EarlyReturn {
            summary.early_returns += 1;
            let msg = ui_str::early_return_msg(&line);
            surface.write_cells(&format!("\r\n{msg}\r\n")).into_diagnostic()?;
            continue;
        }

        match ReplCommand::parse(&line) {
            ReplCommand::Exit => break,
            ReplCommand::Switch => {
                choice = choice.toggled();
                tracing::debug!(message = "reader switched", choice = ?choice);
            }
            ReplCommand::Echo => {
                summary.lines_echoed += 1;
                let echo = if settings.colored_echo {
                    line.as_str().red().to_string()
                } else {
                    line
                };
                surface.write_cells(&format!("{echo}\r\n")).into_diagnostic()?;
            }
        }
    }

    surface.write_cells("\r\n").into_diagnostic()?;
    ok!(summary)
}

#[cfg(test)]
mod tests {
    use conline::{AliasLookup, InputEvent, SpecialKey, SurfaceMock, TerminalMode, TestClipboard,
                  assert_eq2, keypress, type_text};
    use test_case::test_case;

    use super::*;

    fn enter() -> InputEvent { InputEvent::from(keypress! { @special SpecialKey::Enter }) }

    fn typed_line(text: &str) -> impl Iterator<Item = InputEvent> {
        type_text(text).chain([enter()])
    }

    fn settings(wake_mask: WakeMask) -> ReplSettings {
        ReplSettings {
            capacity: DEFAULT_CAPACITY,
            wake_mask,
            colored_echo: false,
        }
    }

    fn context() -> ReadlineContext {
        ReadlineContext::new(ReadlineConfig::default().with_program_name("repl"))
            .with_clipboard(Box::new(TestClipboard::default()))
    }

    #[test_case("exit", ReplCommand::Exit)]
    #[test_case("  switch ", ReplCommand::Switch)]
    #[test_case("exit now", ReplCommand::Echo)]
    #[test_case("", ReplCommand::Echo)]
    fn test_parse_command(line: &str, expected: ReplCommand) {
        assert_eq2!(ReplCommand::parse(line), expected);
    }

    #[test]
    fn test_echo_then_exit() {
        let mut mock = SurfaceMock::new(30, 8)
            .with_input(typed_line("hello").chain(typed_line("exit")));
        let mut context = context();

        let summary = run_repl(&mut mock, &mut context, &settings(WakeMask::NONE)).unwrap();
        assert_eq2!(summary.lines_echoed, 1);
        assert_eq2!(mock.row_text(0), "R> hello");
        assert_eq2!(mock.row_text(1), "hello");
        assert_eq2!(mock.row_text(2), "R> exit");
    }

    #[test]
    fn test_switch_to_plain_reader_and_back() {
        let mut mock = SurfaceMock::new(30, 8).with_input(typed_line("switch"));
        mock.raw_lines.push_back("typed plainly\n".to_string());
        mock.raw_lines.push_back("switch\n".to_string());
        mock.push_input(typed_line("exit"));
        let mut context = context();

        let summary = run_repl(&mut mock, &mut context, &settings(WakeMask::NONE)).unwrap();
        assert_eq2!(summary.lines_echoed, 1);
        assert_eq2!(mock.row_text(0), "R> switch");
        assert_eq2!(mock.row_text(1), "W> typed plainly");
        // The mock doesn't echo raw lines, so the prompt and echo share a row.
        assert_eq2!(mock.row_text(2), "W> R> exit");
    }

    #[test]
    fn test_wake_tab_reports_early_return() {
        let mut mock = SurfaceMock::new(40, 8)
            .with_input(type_text("ls"))
            .with_input([InputEvent::from(keypress! { @special SpecialKey::Tab })])
            .with_input(typed_line("exit"));
        let mut context = context();

        let summary = run_repl(
            &mut mock,
            &mut context,
            &settings(WakeMask::NONE.with_unit('\t')),
        )
        .unwrap();
        assert_eq2!(summary.early_returns, 1);
        assert_eq2!(mock.row_text(1), "[early return] \"ls\\t\"");
    }

    #[test]
    fn test_end_of_input_stops_plain_reader() {
        let mut mock = SurfaceMock::new(30, 8).with_input(typed_line("switch"));
        mock.raw_lines.push_back(String::new());
        let mut context = context();

        let summary = run_repl(&mut mock, &mut context, &settings(WakeMask::NONE)).unwrap();
        assert_eq2!(summary, ReplSummary::default());
        assert_eq2!(mock.mode, TerminalMode::COOKED);
    }

    #[test]
    fn test_build_context_loads_aliases() {
        use clap::Parser;

        let cli_arg = CLIArg::parse_from(["conline-repl", "--alias", "go=cd $1", "--insert"]);
        let context = build_context(&cli_arg).unwrap();
        assert_eq2!(context.config.initial_edit_mode, EditMode::Insert);
        let program = context.config.program_name.clone();
        assert_eq2!(
            context.aliases.lookup("go", &program),
            Some("cd $1".to_string())
        );

        let bad = CLIArg::parse_from(["conline-repl", "--alias", "nope"]);
        assert!(build_context(&bad).is_err());
    }
}
