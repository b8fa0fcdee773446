// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where file I/O operations occur,
//! keeping the rest of the codebase pure and testable.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Delivers the output plan, performing all I/O operations.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::new();

    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                });
            }
            Err(e) => {
                log::error!("Writing to {} failed: {}", operation, e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    log::debug!(
        "Output plan complete: {} succeeded, {} failed, {} bytes",
        report.completed.len(),
        report.failed.len(),
        report.bytes_written
    );

    report
}

/// Executes a single output operation.
fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

/// Writes content to a file.
fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    // Create parent directories if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

/// Prints content to stdout.
fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", content)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_files_and_reports_bytes() {
        let dir = std::env::temp_dir().join(format!("notion_book_ingest_{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("out.json");

        let report = deliver(OutputPlan::for_destination(
            Some(path.clone()),
            "{\"ok\":true}".to_string(),
        ));

        assert!(report.is_success());
        assert_eq!(report.bytes_written, 11);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"ok\":true}");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failures_are_collected() {
        let dir = std::env::temp_dir().join(format!("notion_book_ingest_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        // The target is an existing directory, so the write fails.
        let report = deliver(OutputPlan::for_destination(Some(dir.clone()), "x".into()));

        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        fs::remove_dir_all(dir).unwrap();
    }
}
