use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn fontbands() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fontbands"))
}

#[test]
fn classify_rejects_missing_batch_file() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("fonts.csv");

    let status = fontbands()
        .arg("classify")
        .arg("--store")
        .arg(&store)
        .arg("--batch")
        .arg(dir.path().join("missing.txt"))
        .status()
        .expect("run fontbands");

    assert!(!status.success());
    assert!(!store.exists());
}

#[test]
fn classify_fails_when_batch_directories_hold_no_fonts() {
    let dir = tempdir().expect("tempdir");
    let fonts = dir.path().join("fonts");
    fs::create_dir(&fonts).expect("mkdir");
    fs::write(fonts.join("README.txt"), "not a font").expect("write");
    let batch = dir.path().join("batch.txt");
    fs::write(&batch, format!("# families\n{}\n", fonts.display())).expect("write batch");
    let store = dir.path().join("fonts.csv");

    let output = fontbands()
        .arg("classify")
        .arg("-s")
        .arg(&store)
        .arg("-b")
        .arg(&batch)
        .output()
        .expect("run fontbands");

    assert!(!output.status.success());
    assert!(!store.exists());
}

#[test]
fn publish_rejects_missing_store() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("published.csv");

    let status = fontbands()
        .arg("publish")
        .arg("--store")
        .arg(dir.path().join("fonts.csv"))
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run fontbands");

    assert!(!status.success());
    assert!(!output.exists());
}
