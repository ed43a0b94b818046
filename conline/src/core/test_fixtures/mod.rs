// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for exercising the editor without a real terminal. These are public so
//! that integration tests (and hosts writing their own tests) can use them.

// Attach.
pub mod surface_mock;
pub mod temp_dir;

// Re-export.
pub use surface_mock::*;
pub use temp_dir::*;
