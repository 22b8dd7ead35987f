//! CLI integration tests for the `pxp draw` and `pxp frame` commands.
//!
//! Tests the full command-line interface for coordinate-based frame
//! editing: project creation, draw operations, mirroring, picking, frame
//! sequence operations, and error handling.

use std::path::{Path, PathBuf};
use std::process::Command;

use pixelpad::payload::Payload;

/// Get the path to the pxp binary.
fn pxp_binary() -> PathBuf {
    let release = Path::new("target/release/pxp");
    if release.exists() {
        return release.to_path_buf();
    }
    let debug = Path::new("target/debug/pxp");
    if debug.exists() {
        return debug.to_path_buf();
    }
    panic!("pxp binary not found. Run 'cargo build' first.");
}

/// Run pxp with the given arguments and return (stdout, stderr, success).
fn run(args: &[&str]) -> (String, String, bool) {
    let output =
        Command::new(pxp_binary()).args(args).output().expect("Failed to execute pxp");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Create a 4x4 single-frame project file and return its path.
fn create_project(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("test.json");
    let path_str = path.to_str().unwrap();
    let (_, _, ok) = run(&["new", path_str, "--width", "4", "--height", "4"]);
    assert!(ok, "project creation failed");
    path
}

/// Parse a project file back into a payload.
fn read_payload(path: &Path) -> Payload {
    let content = std::fs::read_to_string(path).unwrap();
    Payload::from_json(&content).unwrap()
}

#[test]
fn test_new_creates_blank_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);

    let payload = read_payload(&path);
    assert_eq!((payload.w, payload.h), (4, 4));
    assert_eq!(payload.frames.len(), 1);
    assert!(payload.frames[0].iter().all(|c| c == "#00000000"));
}

#[test]
fn test_new_clamps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.json");
    let (_, _, ok) =
        run(&["new", path.to_str().unwrap(), "--width", "9999", "--height", "0"]);
    assert!(ok);

    let payload = read_payload(&path);
    assert_eq!((payload.w, payload.h), (256, 1));
}

#[test]
fn test_draw_set_writes_pixel() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    let (_, stderr, ok) =
        run(&["draw", path_str, "--color", "#ff0000", "--set", "1,2"]);
    assert!(ok, "draw failed: {}", stderr);

    let payload = read_payload(&path);
    assert_eq!(payload.frames[0][2 * 4 + 1], "#ff0000ff");
}

#[test]
fn test_draw_set_with_xy_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    let (_, _, ok) =
        run(&["draw", path_str, "--color", "#ff0000", "--mirror", "xy", "--set", "0,0"]);
    assert!(ok);

    let payload = read_payload(&path);
    for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
        assert_eq!(payload.frames[0][y * 4 + x], "#ff0000ff", "({}, {})", x, y);
    }
    assert_eq!(payload.frames[0][1], "#00000000");
}

#[test]
fn test_draw_rect_and_outline() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    let (_, _, ok) =
        run(&["draw", path_str, "--color", "#00ff00", "--outline", "0,0,3,3"]);
    assert!(ok);

    let payload = read_payload(&path);
    assert_eq!(payload.frames[0][0], "#00ff00ff"); // corner
    assert_eq!(payload.frames[0][1 * 4 + 1], "#00000000"); // interior
}

#[test]
fn test_draw_flood_fills_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    let (_, _, ok) = run(&["draw", path_str, "--color", "#1e90ff", "--flood", "2,2"]);
    assert!(ok);

    let payload = read_payload(&path);
    assert!(payload.frames[0].iter().all(|c| c == "#1e90ffff"));
}

#[test]
fn test_draw_pick_prints_color() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    run(&["draw", path_str, "--color", "#ffdd59", "--set", "1,1"]);
    let (stdout, _, ok) = run(&["draw", path_str, "--pick", "1,1", "--pick", "0,0"]);
    assert!(ok);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["#ffdd59ff", "#00000000"]);
}

#[test]
fn test_draw_erase() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    run(&["draw", path_str, "--color", "#ff0000", "--rect", "0,0,3,3"]);
    let (_, _, ok) = run(&["draw", path_str, "--erase", "--set", "1,1"]);
    assert!(ok);

    let payload = read_payload(&path);
    assert_eq!(payload.frames[0][1 * 4 + 1], "#00000000");
    assert_eq!(payload.frames[0][0], "#ff0000ff");
}

#[test]
fn test_draw_out_of_bounds_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    let (_, stderr, ok) = run(&["draw", path_str, "--set", "9,9"]);
    assert!(!ok);
    assert!(stderr.contains("out of bounds"), "stderr: {}", stderr);
}

#[test]
fn test_draw_bad_color_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);

    let (_, stderr, ok) =
        run(&["draw", path.to_str().unwrap(), "--color", "#nope", "--set", "0,0"]);
    assert!(!ok);
    assert!(stderr.contains("--color"), "stderr: {}", stderr);
}

#[test]
fn test_draw_output_redirect_keeps_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let out = dir.path().join("edited.json");

    let (_, _, ok) = run(&[
        "draw",
        path.to_str().unwrap(),
        "--color",
        "#ff0000",
        "--set",
        "0,0",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(ok);

    assert_eq!(read_payload(&path).frames[0][0], "#00000000");
    assert_eq!(read_payload(&out).frames[0][0], "#ff0000ff");
}

#[test]
fn test_draw_missing_file_fails() {
    let (_, stderr, ok) = run(&["draw", "does-not-exist.json", "--set", "0,0"]);
    assert!(!ok);
    assert!(stderr.contains("cannot load"), "stderr: {}", stderr);
}

#[test]
fn test_frame_add_duplicates_current() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    run(&["draw", path_str, "--color", "#ff0000", "--set", "0,0"]);
    let (_, _, ok) = run(&["frame", path_str, "add"]);
    assert!(ok);

    let payload = read_payload(&path);
    assert_eq!(payload.frames.len(), 2);
    assert_eq!(payload.frames[1][0], "#ff0000ff");
}

#[test]
fn test_frame_add_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    run(&["draw", path_str, "--color", "#ff0000", "--set", "0,0"]);
    run(&["frame", path_str, "add", "--empty"]);

    let payload = read_payload(&path);
    assert!(payload.frames[1].iter().all(|c| c == "#00000000"));
}

#[test]
fn test_frame_delete_last_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    let (_, stderr, ok) = run(&["frame", path_str, "delete"]);
    assert!(ok, "no-op delete should still succeed");
    assert!(stderr.contains("No-op"), "stderr: {}", stderr);
    assert_eq!(read_payload(&path).frames.len(), 1);
}

#[test]
fn test_frame_delete_removes_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    run(&["frame", path_str, "add"]);
    run(&["frame", path_str, "add"]);
    let (_, _, ok) = run(&["frame", path_str, "delete", "--at", "1"]);
    assert!(ok);
    assert_eq!(read_payload(&path).frames.len(), 2);
}

#[test]
fn test_frame_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    run(&["draw", path_str, "--color", "#ff0000", "--rect", "0,0,3,3"]);
    run(&["frame", path_str, "clear"]);

    let payload = read_payload(&path);
    assert!(payload.frames[0].iter().all(|c| c == "#00000000"));
}

#[test]
fn test_import_pastes_payload_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();

    // Build a matching 4x4 payload with one yellow cell.
    let mut cells = vec!["#00000000".to_string(); 16];
    cells[5] = "#ffdd59ff".to_string();
    let donor = Payload { w: 4, h: 4, frames: vec![cells] };
    let donor_path = dir.path().join("donor.json");
    std::fs::write(&donor_path, donor.to_json()).unwrap();

    let (_, _, ok) =
        run(&["import", path_str, "--from", donor_path.to_str().unwrap()]);
    assert!(ok);
    assert_eq!(read_payload(&path).frames[0][5], "#ffdd59ff");
}

#[test]
fn test_import_rejects_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);

    let donor = Payload { w: 2, h: 2, frames: vec![vec!["#00000000".to_string(); 4]] };
    let donor_path = dir.path().join("donor.json");
    std::fs::write(&donor_path, donor.to_json()).unwrap();

    let (_, stderr, ok) =
        run(&["import", path.to_str().unwrap(), "--from", donor_path.to_str().unwrap()]);
    assert!(!ok);
    assert!(stderr.contains("rejected"), "stderr: {}", stderr);
    // Project untouched.
    assert!(read_payload(&path).frames[0].iter().all(|c| c == "#00000000"));
}

#[test]
fn test_info_reports_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_project(&dir);
    let path_str = path.to_str().unwrap();
    run(&["frame", path_str, "add"]);

    let (stdout, _, ok) = run(&["info", path_str]);
    assert!(ok);
    assert!(stdout.contains("4x4"), "stdout: {}", stdout);
    assert!(stdout.contains("2 frame"), "stdout: {}", stdout);
}

#[test]
fn test_info_rejects_corrupt_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.json");
    std::fs::write(&path, r##"{"w":2,"h":2,"frames":[["#00000000"]]}"##).unwrap();

    let (_, stderr, ok) = run(&["info", path.to_str().unwrap()]);
    assert!(!ok);
    assert!(stderr.contains("cells"), "stderr: {}", stderr);
}
