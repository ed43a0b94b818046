// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Create a file appender that never rolls over, writing to `path_str`.
///
/// Note that if you wrap this up in a non blocking writer, the guard has to outlive the
/// subscriber, which the global install path can't guarantee.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access parent folder of {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::try_create_temp_dir;

    #[test]
    fn test_try_create_in_temp_dir() {
        let dir = try_create_temp_dir().unwrap();
        let file_path = dir.join("appender.log");
        let appender = try_create(file_path.to_str().unwrap());
        assert!(appender.is_ok());
    }

    #[test]
    fn test_try_create_rejects_root() {
        assert!(try_create("/").is_err());
    }
}
