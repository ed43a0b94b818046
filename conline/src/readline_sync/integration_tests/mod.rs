// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end checks of [`crate::ReadlineContext::read_line`] and the dispatcher
//! against [`crate::SurfaceMock`]: the worked scenarios, wrapping and scrolling, and a
//! seeded random replay that checks the screen after every event.
//!
//! Unit tests for individual handlers live next to the handlers.

#[cfg(test)]
pub mod scenario_test;
