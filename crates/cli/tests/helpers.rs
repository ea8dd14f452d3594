#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Manifest with a small project importing two standard packages.
pub const MANIFEST_JSON: &str = r#"{
  "packages": [
    {"id": "example.com/app", "imports": ["example.com/app/db", "fmt", "example.com/app/log"]},
    {"id": "example.com/app/db", "imports": ["database/sql", "example.com/app/log"]},
    {"id": "example.com/app/log", "imports": ["fmt"]},
    {"id": "database/sql", "imports": ["context"]},
    {"id": "fmt"}
  ]
}"#;

pub const NM_OUTPUT: &str = "\
  401000       1200 T main.main
  402000        300 T example.com/app/db.Open
  403000        500 T example.com/app/db.(*Conn).Query
  404000         64 T go.itab.*os.File,io.Writer
  405000       4000 T fmt.Fprintf
  406000         10 T example.com/app/log.Printf
  407000         32 R type..eq.main.T
         4294967296 U os.Getenv
";

pub fn write_manifest(dir: &Path) -> PathBuf {
    let path = dir.join("packages.json");
    std::fs::write(&path, MANIFEST_JSON).expect("write manifest");
    path
}

/// Returns (binary, fake nm output) paths.
pub fn write_fake_binary(dir: &Path) -> (PathBuf, PathBuf) {
    let binary = dir.join("app");
    std::fs::write(&binary, b"\x7fELF fake").expect("write binary");
    let nm = dir.join("nm.txt");
    std::fs::write(&nm, NM_OUTPUT).expect("write nm output");
    (binary, nm)
}
