// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editing state machine behind [`crate::ReadlineContext::read_line`].
//!
//! | Module           | Responsibility                                            |
//! |------------------|-----------------------------------------------------------|
//! | `core`           | [`EditDispatcher`] state, [`EditMode`], [`WakeMask`]      |
//! | `event_handlers` | One handler per key, each editing the buffer and screen   |
//!
//! Every handler mutates the [`crate::LineBuffer`] only through
//! [`crate::ScreenSync`], so the cells on the surface always match the buffer.

// Private modules organized by functional responsibility.
mod core;
mod event_handlers;

// Public re-exports (expose stable API).
pub use core::*;
