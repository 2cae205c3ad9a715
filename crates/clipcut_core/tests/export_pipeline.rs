//! End-to-end export pipeline tests against a scripted ffmpeg stand-in.
//!
//! Each fake binary writes its final argument (the output path) so the
//! pipeline's artifact checks pass without a real encoder.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use clipcut_core::config::EncodingSettings;
use clipcut_core::export::{ExportError, ExportOrchestrator};
use clipcut_core::timecode::Timebase;
use clipcut_core::timeline::TimelineState;
use tempfile::{tempdir, TempDir};

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// Touches the last argument, like a successful ffmpeg run.
fn touching_script(dir: &Path) -> PathBuf {
    write_script(dir, "for last; do :; done\n: > \"$last\"")
}

struct Fixture {
    _root: TempDir,
    timeline: TimelineState,
    orchestrator: ExportOrchestrator,
    temp_dir: PathBuf,
    source: PathBuf,
}

fn fixture(script_body: Option<&str>) -> Fixture {
    let root = tempdir().unwrap();
    let dir = root.path();

    let program = match script_body {
        Some(body) => write_script(dir, body),
        None => touching_script(dir),
    };

    let source = dir.join("movie.mkv");
    fs::write(&source, "video data").unwrap();

    let mut timeline = TimelineState::new();
    timeline.load_source(source.clone(), Timebase::new(30.0, 18000));

    let temp_dir = dir.join("work");
    fs::create_dir_all(&temp_dir).unwrap();

    let orchestrator = ExportOrchestrator::new()
        .with_program(program)
        .with_temp_dir(&temp_dir)
        .with_log_dir(dir.join("logs"));

    Fixture {
        _root: root,
        timeline,
        orchestrator,
        temp_dir,
        source,
    }
}

fn add_segment(timeline: &mut TimelineState, start: f64, end: f64) {
    timeline.mark_start(start).unwrap();
    timeline.mark_end(end).unwrap();
    timeline.add_segment().unwrap();
}

#[test]
fn multi_segment_export_produces_output_and_cleans_temp() {
    let mut fx = fixture(None);
    add_segment(&mut fx.timeline, 1.0, 5.0);
    add_segment(&mut fx.timeline, 10.0, 12.5);

    let handle = fx
        .orchestrator
        .submit(&fx.timeline, &EncodingSettings::default(), None, false, None)
        .unwrap();
    let outcome = handle.wait();

    assert!(outcome.success, "outcome: {:?}", outcome);
    let output = outcome.output_path.unwrap();
    assert_eq!(output, fx.source.with_file_name("movie_cut.mkv"));
    assert!(output.exists());

    // Every temp artifact is gone after the job
    let leftovers: Vec<_> = fs::read_dir(&fx.temp_dir).unwrap().collect();
    assert!(leftovers.is_empty(), "temp files left: {:?}", leftovers);
    assert!(!fx.orchestrator.is_busy());
}

#[test]
fn failed_extraction_reports_exit_code_and_produces_no_output() {
    let mut fx = fixture(Some("echo 'Invalid data found' >&2\nexit 1"));
    add_segment(&mut fx.timeline, 1.0, 5.0);
    add_segment(&mut fx.timeline, 10.0, 12.5);

    let handle = fx
        .orchestrator
        .submit(&fx.timeline, &EncodingSettings::default(), None, false, None)
        .unwrap();
    let output = handle.output_path().clone();
    let outcome = handle.wait();

    assert!(!outcome.success);
    let error = outcome.error.unwrap();
    assert!(error.contains("Extract"), "error: {}", error);
    assert!(error.contains("exit code 1"), "error: {}", error);
    assert!(!output.exists());
    assert!(!fx.orchestrator.is_busy());
}

#[test]
fn single_segment_copies_without_a_concat_invocation() {
    // Log every invocation, then behave like a successful run
    let mut fx = fixture(Some(
        "echo \"$@\" >> \"$(dirname \"$0\")/calls.log\"\nfor last; do :; done\n: > \"$last\"",
    ));
    add_segment(&mut fx.timeline, 1.0, 5.0);

    let handle = fx
        .orchestrator
        .submit(&fx.timeline, &EncodingSettings::default(), None, false, None)
        .unwrap();
    let outcome = handle.wait();

    assert!(outcome.success, "outcome: {:?}", outcome);
    assert!(outcome.output_path.unwrap().exists());

    let calls = fs::read_to_string(fx._root.path().join("calls.log")).unwrap();
    let lines: Vec<_> = calls.lines().collect();
    assert_eq!(lines.len(), 1, "expected one extraction only: {:?}", lines);
    assert!(!lines[0].contains("concat"));
}

#[test]
fn second_submission_while_running_is_rejected() {
    let mut fx = fixture(Some("sleep 1\nfor last; do :; done\n: > \"$last\""));
    add_segment(&mut fx.timeline, 1.0, 5.0);
    add_segment(&mut fx.timeline, 6.0, 8.0);

    let handle = fx
        .orchestrator
        .submit(&fx.timeline, &EncodingSettings::default(), None, false, None)
        .unwrap();

    let err = fx
        .orchestrator
        .submit(&fx.timeline, &EncodingSettings::default(), None, false, None)
        .unwrap_err();
    assert!(matches!(err, ExportError::JobActive));

    // The running job is unaffected by the rejection
    let outcome = handle.wait();
    assert!(outcome.success, "outcome: {:?}", outcome);
    assert!(!fx.orchestrator.is_busy());
}

#[test]
fn edits_after_submission_do_not_affect_the_running_job() {
    let mut fx = fixture(Some(
        "echo \"$@\" >> \"$(dirname \"$0\")/calls.log\"\nsleep 1\nfor last; do :; done\n: > \"$last\"",
    ));
    add_segment(&mut fx.timeline, 1.0, 5.0);

    let handle = fx
        .orchestrator
        .submit(&fx.timeline, &EncodingSettings::default(), None, false, None)
        .unwrap();

    fx.timeline.clear();
    add_segment(&mut fx.timeline, 50.0, 60.0);

    let outcome = handle.wait();
    assert!(outcome.success, "outcome: {:?}", outcome);

    let calls = fs::read_to_string(fx._root.path().join("calls.log")).unwrap();
    assert!(calls.contains("-ss 1 "), "calls: {}", calls);
    assert!(!calls.contains("-ss 50 "), "calls: {}", calls);
}
