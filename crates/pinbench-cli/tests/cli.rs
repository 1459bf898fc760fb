use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pinbench-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn pinbench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pinbench"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn pinbench")
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[test]
fn small_sweep_writes_one_reproducible_file() {
    let dir = scratch_dir("small");
    let dir_arg = format!("D={}", dir.display());
    let out = pinbench(&["4", "2", "2", "1", "S=42", &dir_arg]);
    assert!(out.status.success(), "stdout: {}", String::from_utf8_lossy(&out.stdout));
    assert_eq!(file_names(&dir), vec!["bench_n4_m2_k1.xml"]);

    let first = fs::read_to_string(dir.join("bench_n4_m2_k1.xml")).unwrap();
    let lines: Vec<_> = first.lines().collect();
    assert_eq!(lines.first(), Some(&"<net grid_size=\"4\" pin_count=\"2\">"));
    assert_eq!(lines.last(), Some(&"</net>"));
    let points: Vec<_> = lines.iter().filter(|l| l.contains("<point ")).collect();
    assert_eq!(points.len(), 2);
    for line in points {
        let coord = |attr: &str| -> usize {
            let start = line.find(&format!("{attr}=\"")).unwrap() + attr.len() + 2;
            let end = start + line[start..].find('"').unwrap();
            line[start..end].parse().unwrap()
        };
        assert!(coord("x") < 4 && coord("y") < 4);
    }

    let out = pinbench(&["4", "2", "2", "1", "S=42", &dir_arg]);
    assert!(out.status.success());
    let second = fs::read_to_string(dir.join("bench_n4_m2_k1.xml")).unwrap();
    assert_eq!(first, second);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn min_above_max_fails_with_usage_and_no_files() {
    let dir = scratch_dir("invalid");
    let dir_arg = format!("D={}", dir.display());
    let out = pinbench(&["10", "5", "3", "1", &dir_arg]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("!!! ERROR !!!"));
    assert!(stdout.contains("Wrong parameter M_max = \"3\""));
    assert!(stdout.contains("Use:  PROG N M_min M_max K"));
    assert!(!dir.exists(), "no output directory for a rejected call");
}

#[test]
fn missing_arguments_report_argument_count() {
    let out = pinbench(&["10", "5"]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Wrong amount of arguments: 2"));
}

#[test]
fn print_flag_writes_images_and_logs_progress() {
    let dir = scratch_dir("print");
    let dir_arg = format!("D={}/", dir.display());
    let out = pinbench(&["3", "1", "2", "2", "S=7", "P=1", &dir_arg]);
    assert!(out.status.success());
    assert_eq!(
        file_names(&dir),
        vec![
            "bench_n3_m1_k1.xml",
            "bench_n3_m1_k2.xml",
            "bench_n3_m2_k1.xml",
            "bench_n3_m2_k2.xml",
            "img_n3_m1_k1.txt",
            "img_n3_m1_k2.txt",
            "img_n3_m2_k1.txt",
            "img_n3_m2_k2.txt",
        ]
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Running with: N=3 M_min=1 M_max=2 K=2 S=7 P=true"));
    assert_eq!(stdout.matches("Created \"").count(), 4);
    assert!(stdout.contains("\"schema_version\":1"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn duplicate_option_is_rejected() {
    let out = pinbench(&["3", "1", "1", "1", "S=1", "S=2"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Multiple parameters (S): \"S=2\""));
}

#[test]
fn flag_like_option_is_reported_as_wrong_parameter() {
    let out = pinbench(&["4", "2", "2", "1", "--x"]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Wrong parameter: \"--x\""), "stdout: {stdout}");
    assert!(!stdout.contains("Wrong amount of arguments"));
}

#[test]
fn unopenable_bench_file_fails_with_its_path() {
    let dir = scratch_dir("unopenable");
    let blocked = dir.join("bench_n2_m1_k1.xml");
    fs::create_dir_all(&blocked).unwrap();
    let dir_arg = format!("D={}", dir.display());
    let out = pinbench(&["2", "1", "1", "1", "S=3", &dir_arg]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let expected = format!("Couldn't create benchmark file \"{}\"", blocked.display());
    assert!(stdout.contains(&expected), "stdout: {stdout}");
    assert!(stdout.contains("Use:  PROG N M_min M_max K"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn print_flag_output_survives_restrictive_rust_log() {
    let dir = scratch_dir("rust-log");
    let dir_arg = format!("D={}", dir.display());
    let out = Command::new(env!("CARGO_BIN_EXE_pinbench"))
        .args(["3", "1", "1", "1", "S=5", "P=1", dir_arg.as_str()])
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to spawn pinbench");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Running with: N=3 M_min=1 M_max=1 K=1 S=5 P=true"));
    assert_eq!(stdout.matches("Created \"").count(), 1);
    fs::remove_dir_all(&dir).unwrap();
}
