// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Alias (macro) expansion, applied once to a submitted line.
//!
//! The first space separated token of the line is looked up as a command. If an alias
//! exists its template replaces the line, with these placeholders filled in:
//!
//! | Placeholder   | Becomes                                   |
//! |---------------|-------------------------------------------|
//! | `$1` .. `$9`  | that argument, or nothing if missing      |
//! | `$*`          | all arguments after the command, joined   |
//! | `$G` `$L`     | `>` `<`                                   |
//! | `$B` `$T`     | `\|` `&`                                  |
//!
//! Letters match in either case. A `$` followed by anything else is kept as is.
//! Substituted text is never rescanned. Lines that are empty or start with a space are
//! left alone.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::{CapacityExceeded, LineBuffer};

/// Introduces a placeholder in an alias template.
pub const ALIAS_ESCAPE: char = '$';

/// Arguments of a command line. Most lines have only a handful.
pub type ArgVec<'a> = SmallVec<[&'a str; 8]>;

/// Where aliases come from. Lookups are scoped by the name of the host program.
pub trait AliasLookup {
    fn lookup(&self, command: &str, program: &str) -> Option<String>;
}

/// In memory [`AliasLookup`], keyed by program and command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<(String, String), String>,
}

impl AliasTable {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn insert(
        &mut self,
        program: impl Into<String>,
        command: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.entries
            .insert((program.into(), command.into()), template.into());
    }

    #[must_use]
    pub fn with_alias(
        mut self,
        program: impl Into<String>,
        command: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(program, command, template);
        self
    }

    /// Add an alias written as `command=template`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no `=` or the command is empty.
    pub fn insert_definition(
        &mut self,
        program: impl Into<String>,
        definition: &str,
    ) -> miette::Result<()> {
        let Some((command, template)) = definition.split_once('=') else {
            miette::bail!("alias `{definition}` should look like name=template");
        };
        let command = command.trim();
        if command.is_empty() || command.contains(' ') {
            miette::bail!("alias `{definition}` needs a single word name");
        }
        self.insert(program, command, template);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl AliasLookup for AliasTable {
    fn lookup(&self, command: &str, program: &str) -> Option<String> {
        self.entries
            .get(&(program.to_string(), command.to_string()))
            .cloned()
    }
}

/// Split on single spaces, skipping the empty tokens runs of spaces produce.
#[must_use]
pub fn tokenize(line: &str) -> ArgVec<'_> {
    line.split(' ').filter(|token| !token.is_empty()).collect()
}

/// Expand the alias (if any) for the command at the start of `buffer`. On success the
/// buffer holds the expansion with the cursor at its end, and `true` is returned.
///
/// # Errors
///
/// Returns [`CapacityExceeded`] if the expansion doesn't fit. The buffer is untouched
/// in that case.
pub fn expand_aliases(
    buffer: &mut LineBuffer,
    lookup: &dyn AliasLookup,
    program: &str,
) -> Result<bool, CapacityExceeded> {
    let line = buffer.to_string();
    if line.is_empty() || line.starts_with(' ') {
        return Ok(false);
    }

    let args = tokenize(&line);
    let Some(command) = args.first() else {
        return Ok(false);
    };
    let Some(template) = lookup.lookup(command, program) else {
        return Ok(false);
    };

    let mut scratch =
        LineBuffer::new(buffer.capacity()).with_reserved_tail(buffer.reserved_tail());
    scratch.replace_all(&template)?;
    substitute_placeholders(&mut scratch, &args)?;
    scratch.set_cursor(scratch.len());

    tracing::debug!(message = "alias expanded", command = %command, expansion = %scratch);
    *buffer = scratch;
    Ok(true)
}

fn substitute_placeholders(
    scratch: &mut LineBuffer,
    args: &[&str],
) -> Result<(), CapacityExceeded> {
    let mut index = 0;
    while index + 1 < scratch.len() {
        if scratch.chars()[index] != ALIAS_ESCAPE {
            index += 1;
            continue;
        }
        let Some(replacement) = placeholder_value(scratch.chars()[index + 1], args)
        else {
            // Not a placeholder, keep the escape.
            index += 1;
            continue;
        };
        let replacement: Vec<char> = replacement.chars().collect();
        scratch.erase(index, 2);
        scratch.insert(index, &replacement)?;
        index += replacement.len();
    }
    Ok(())
}

fn placeholder_value(selector: char, args: &[&str]) -> Option<String> {
    let fixed = match selector.to_ascii_uppercase() {
        'G' => ">",
        'L' => "<",
        'B' => "|",
        'T' => "&",
        '*' => return Some(args.get(1..).unwrap_or_default().join(" ")),
        digit @ '1'..='9' => {
            let position = digit.to_digit(10).and_then(|it| usize::try_from(it).ok())?;
            return Some(args.get(position).copied().unwrap_or_default().to_string());
        }
        _ => return None,
    };
    Some(fixed.to_string())
}
