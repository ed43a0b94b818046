// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod common_result_and_error;

// Re-export.
pub use common_result_and_error::*;
