use super::*;

use dts_orchestrator::BuildReport;
use dts_store::WrittenFile;

#[test]
fn report_success_handles_incremental_no_op() {
    let report = BuildReport {
        incremental_no_op: true,
        ..Default::default()
    };
    report_success(&report);
}

#[test]
fn report_success_handles_cancelled() {
    let report = BuildReport {
        cancelled: true,
        ..Default::default()
    };
    report_success(&report);
}

#[test]
fn report_success_lists_written_files() {
    let report = BuildReport {
        written_files: vec![WrittenFile {
            relative_path: "dist/index.d.ts".to_string(),
            size_bytes: 42,
        }],
        ..Default::default()
    };
    report_success(&report);
}
