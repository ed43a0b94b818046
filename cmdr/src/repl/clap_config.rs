// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser};

use crate::DEFAULT_CAPACITY;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "conline-repl")]
#[command(about = "Read lines with the conline editor and echo them back")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version}\n\nType `switch` to toggle the editor and the terminal's line reader, `exit` to quit.\nUSAGE:\n  conline-repl [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(
        long,
        value_name = "NAME=TEMPLATE",
        help = "Define an alias, e.g. `--alias 'go=cd $1'`. `$1`..`$9` are arguments, `$*` is all of them. Repeatable."
    )]
    pub alias: Vec<String>,

    #[arg(
        long,
        default_value_t = DEFAULT_CAPACITY,
        help = "Maximum number of characters in a line, counting the line terminator."
    )]
    pub capacity: usize,

    #[arg(long, help = "Start in insert mode instead of overwrite mode.")]
    pub insert: bool,

    #[arg(long, help = "End a read early when Tab is pressed.")]
    pub wake_tab: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file for debugging (see `--log-file`)."
    )]
    pub enable_logging: bool,

    #[arg(
        global = true,
        long,
        value_name = "PATH",
        default_value = conline::DEFAULT_LOG_FILE_NAME,
        help = "Where to write the log when logging is enabled."
    )]
    pub log_file: String,
}
