// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod crossterm_surface;
pub mod input_event;
pub mod keypress;
pub mod modifier_keys_mask;
pub mod terminal_surface;

// Re-export.
pub use crossterm_surface::*;
pub use input_event::*;
pub use keypress::*;
pub use modifier_keys_mask::*;
pub use terminal_surface::*;
