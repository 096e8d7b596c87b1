// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use {crate::ExitCode, std::fs};

const IMAGE: &[u8] = b"UF2\n\x57\x51\x5d\x9e\0\0\0\0firmware payload";

/// Copy into a destination whose parent directories do not exist yet.
#[test]
fn copy_creates_nested_destination_dir() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("build/app.uf2");
    fs::create_dir_all(src.parent().unwrap()).unwrap();
    fs::write(&src, IMAGE).unwrap();
    let dst = dir.path().join("package/uf2/fw/app.uf2");

    let output = test([
        "--nvs_src_file",
        src.to_str().unwrap(),
        "--nvs_dst_file",
        dst.to_str().unwrap(),
    ]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert_eq!(fs::read(&dst).unwrap(), IMAGE);
    assert!(output.stdout.contains("File copied from"));
    assert!(output.stdout.contains(dst.to_str().unwrap()));
    assert!(output.stderr.is_empty());
}

/// The `-d1`/`-d2` spellings used by the firmware build scripts.
#[test]
fn copy_with_legacy_flags() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("nvs.bin");
    fs::write(&src, IMAGE).unwrap();
    let dst = dir.path().join("out/nvs.bin");

    let output = test(["-d1", src.to_str().unwrap(), "-d2", dst.to_str().unwrap()]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert_eq!(fs::read(&dst).unwrap(), IMAGE);
}

#[test]
fn copy_with_legacy_flags_and_equals() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("nvs.bin");
    fs::write(&src, IMAGE).unwrap();
    let dst = dir.path().join("out/nvs.bin");

    let src_arg = format!("-d1={}", src.display());
    let dst_arg = format!("-d2={}", dst.display());
    let output = test([src_arg.as_str(), dst_arg.as_str()]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert_eq!(fs::read(&dst).unwrap(), IMAGE);
}

/// An existing destination is replaced, not appended to.
#[test]
fn copy_overwrites_destination() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("app.uf2");
    fs::write(&src, IMAGE).unwrap();
    let dst = dir.path().join("app_copy.uf2");
    fs::write(&dst, b"an older and much longer image that must disappear").unwrap();

    let output = test(["-d1", src.to_str().unwrap(), "-d2", dst.to_str().unwrap()]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert_eq!(fs::read(&dst).unwrap(), IMAGE);
}

/// Copying a file onto itself must not truncate it.
#[test]
fn same_source_and_destination_fails_without_data_loss() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("app.uf2");
    fs::write(&src, IMAGE).unwrap();
    let dotted = dir.path().join(".").join("app.uf2");

    for dst in [&src, &dotted] {
        let output = test(["-d1", src.to_str().unwrap(), "-d2", dst.to_str().unwrap()]);
        assert_eq!(output.exit_code, ExitCode(1));
        assert!(output.stderr.contains("is both source and destination"));
        assert!(output.stdout.is_empty());
        assert_eq!(fs::read(&src).unwrap(), IMAGE);
    }
}

/// A missing source is silently ignored and nothing is created.
#[test]
fn missing_source_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("not-built.uf2");
    let dst = dir.path().join("package/app.uf2");

    let output = test(["-d1", src.to_str().unwrap(), "-d2", dst.to_str().unwrap()]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
    assert!(!dst.parent().unwrap().exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn no_arguments_is_a_noop() {
    let output = test([]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

/// A source without a destination is an error, and nothing is written.
#[test]
fn source_without_destination_fails() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("app.uf2");
    fs::write(&src, IMAGE).unwrap();

    let output = test(["-d1", src.to_str().unwrap()]);
    assert_eq!(output.exit_code, ExitCode(1));
    assert!(output.stderr.contains("no destination file given"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn directory_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("out/app.uf2");

    let output = test([
        "-d1",
        dir.path().to_str().unwrap(),
        "-d2",
        dst.to_str().unwrap(),
    ]);
    assert_eq!(output.exit_code, ExitCode(1));
    assert!(output.stderr.contains("failed to copy"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = test(["--bogus"]);
    assert_eq!(output.exit_code, ExitCode(1));
    assert!(output.stderr.contains("--bogus"));
    assert!(output.stdout.is_empty());
}

#[test]
fn help_goes_to_stdout() {
    let output = test(["--help"]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stdout.contains("--nvs_src_file"));
    assert!(output.stdout.contains("--nvs_dst_file"));
    assert!(output.stderr.is_empty());
}

fn test<const N: usize>(args: [&str; N]) -> Output {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = crate::main_args(
        std::iter::once("uf2-copy").chain(args),
        &mut stdout,
        &mut stderr,
    );
    println!("* args: {:?}", args);
    println!("* exit_code: {:?}", exit_code);
    println!("* stdout:\n{}", String::from_utf8_lossy(&stdout));
    println!("* stderr:\n{}", String::from_utf8_lossy(&stderr));
    Output {
        exit_code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

#[derive(Debug)]
struct Output {
    exit_code: ExitCode,
    stdout: String,
    stderr: String,
}
