//! Generate UniFFI bindings for emojidex
//!
//! Run: cargo run --bin generate-bindings -- [swift|kotlin|python] [out-dir]
//!
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ Inputs:                                                                     │
//! │   target/release/libemojidex.{dylib,so}   ← Built library for bindgen       │
//! │                                                                             │
//! │ Outputs (default out-dir: emojidex/generated):                              │
//! │   emojidex.swift / emojidex.kt / emojidex.py  ← Language bindings           │
//! │   emojidexFFI.h + module.modulemap            ← Swift only                  │
//! └─────────────────────────────────────────────────────────────────────────────┘

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let mut args = env::args().skip(1);
    let language = args.next().unwrap_or_else(|| "swift".to_string());
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| crate_dir.join("generated"));
    let workspace_root = crate_dir.parent().expect("No parent directory");

    println!("Building Rust library...");
    run_cmd("cargo", &["build", "--release", "-p", "emojidex"], workspace_root);

    let library = workspace_root
        .join("target/release")
        .join(library_file_name());

    println!("Generating {language} bindings...");
    run_cmd(
        "cargo",
        &[
            "run",
            "-p",
            "emojidex",
            "--bin",
            "uniffi-bindgen",
            "generate",
            "--library",
            &library.to_string_lossy(),
            "--language",
            &language,
            "--out-dir",
            &out_dir.to_string_lossy(),
        ],
        workspace_root,
    );

    if language == "swift" {
        println!("Writing modulemap...");
        fs::write(
            out_dir.join("module.modulemap"),
            "module emojidexFFI {\n    header \"emojidexFFI.h\"\n    export *\n}\n",
        )
        .expect("Write modulemap");
    }

    println!("Done! Bindings written to {}", out_dir.display());
}

fn library_file_name() -> &'static str {
    if cfg!(target_os = "macos") {
        "libemojidex.dylib"
    } else if cfg!(target_os = "windows") {
        "emojidex.dll"
    } else {
        "libemojidex.so"
    }
}

fn run_cmd(program: &str, args: &[&str], dir: &Path) {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap_or_else(|e| panic!("Failed to run {}: {}", program, e));

    if !status.success() {
        panic!("{} failed with status: {}", program, status);
    }
}
