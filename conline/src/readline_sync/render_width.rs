// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! How buffer units map onto terminal cells. Control codes `0x01` ..= `0x1a` (other
//! than CR and LF) are shown as a caret escape like `^A` and take two cells. Every
//! other unit takes one cell.

/// Number of cells `unit` occupies on screen.
#[must_use]
pub fn cell_width(unit: char) -> usize {
    if caret_letter(unit).is_some() { 2 } else { 1 }
}

/// Sum of [`cell_width`] over `chars[begin..end]`.
///
/// # Panics
///
/// Panics if the range is out of bounds.
#[must_use]
pub fn span_width(chars: &[char], begin: usize, end: usize) -> usize {
    chars[begin..end].iter().copied().map(cell_width).sum()
}

/// Signed cell distance from offset `from` to offset `to`.
#[must_use]
pub fn signed_span_width(chars: &[char], from: usize, to: usize) -> isize {
    if to >= from {
        crate::signed(span_width(chars, from, to))
    } else {
        -crate::signed(span_width(chars, to, from))
    }
}

/// Push the on-screen form of `unit` onto `acc`, one [`char`] per cell.
pub fn render_unit(unit: char, acc: &mut String) {
    if let Some(letter) = caret_letter(unit) {
        acc.push('^');
        acc.push(letter);
    } else if unit.is_control() {
        // Anything else the terminal would act on instead of print.
        acc.push(' ');
    } else {
        acc.push(unit);
    }
}

/// The on-screen form of `chars[begin..end]`.
#[must_use]
pub fn render_span(chars: &[char], begin: usize, end: usize) -> String {
    let mut acc = String::with_capacity(span_width(chars, begin, end));
    chars[begin..end]
        .iter()
        .for_each(|&unit| render_unit(unit, &mut acc));
    acc
}

/// The letter after `^` for units shown in caret notation, [None] for the rest.
fn caret_letter(unit: char) -> Option<char> {
    match unit {
        '\r' | '\n' => None,
        '\u{1}'..='\u{1a}' => u8::try_from(unit).ok().map(|code| char::from(b'@' + code)),
        _ => None,
    }
}
