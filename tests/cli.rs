use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

/// A fresh directory per test, files are passed by relative name.
fn workdir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("compute-lows-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn compute_lows(dir: &Path, files: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compute-lows"))
        .current_dir(dir)
        .args(files)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn one_line_per_file() {
    let dir = workdir("ok");
    fs::write(
        dir.join("a.csv"),
        "Year,Day,Temperature\n2018,0,-3.5\n2018,0,2\n2018,1,4.25\n",
    )
    .unwrap();
    fs::write(
        dir.join("b.csv"),
        "Station,Year,Day,Temperature\nWLO,2019,0,1\nWLO,2019,1,-1\n",
    )
    .unwrap();

    let output = compute_lows(&dir, &["a.csv", "b.csv"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "2018,-3.500000,4.250000,[]\n2019,-1.000000,1.000000,[]\n"
    );
}

#[test]
fn bad_row_aborts_the_run() {
    let dir = workdir("bad");
    fs::write(dir.join("a.csv"), "Year,Day,Temperature\n2018,0,-3.5\n").unwrap();
    fs::write(
        dir.join("x.csv"),
        "year,month,day,temperature\n2019,1,1,3.0\n2019,1,1,4.0\n2019,1,2,abc\n",
    )
    .unwrap();

    let output = compute_lows(&dir, &["a.csv", "x.csv"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Bad temperature in x.csv on line 3"), "{stderr}");
}

#[test]
fn no_arguments() {
    let dir = workdir("usage");
    let output = compute_lows(&dir, &[]);
    assert!(!output.status.success());
}
