use std::sync::Mutex;

use depweight_core::config::NmConfig;
use depweight_core::services::{NmError, NmTool, FAKE_NM_ENV, NM_BIN_ENV};
use depweight_core::symbols::SymbolError;

// Tests in this file touch process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const TABLE: &str = "  401000 100 T main.main\n  402000 64 T go.itab.*os.File,io.Writer\n  403000 40 T fmt.Println\n";

#[test]
fn errors_for_missing_binary() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let err = NmTool::default().symbols(std::path::Path::new("does_not_exist.bin")).unwrap_err();
    assert!(matches!(err, NmError::MissingBinary(_)));
}

#[test]
fn parses_fake_output_without_toolchain_installed() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let temp = tempfile::tempdir().unwrap();
    let bin = temp.path().join("app");
    std::fs::write(&bin, b"bin").unwrap();
    let fake = temp.path().join("nm.txt");
    std::fs::write(&fake, TABLE).unwrap();

    std::env::set_var(FAKE_NM_ENV, &fake);
    let result = NmTool::default().symbols(&bin);
    std::env::remove_var(FAKE_NM_ENV);

    let symbols = result.expect("fake nm");
    let names: Vec<&str> = symbols.iter().map(|s| s.qualified_name.as_str()).collect();
    assert_eq!(names, vec!["main.main", "fmt.Println"]);
}

#[test]
fn env_overrides_configured_program() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(NM_BIN_ENV, "/opt/go/bin/go");
    let tool = NmTool::from_config(&NmConfig::default());
    std::env::remove_var(NM_BIN_ENV);

    assert_eq!(tool.program, "/opt/go/bin/go");
    assert_eq!(tool.args, vec!["tool", "nm", "-size"]);

    assert_eq!(NmTool::from_config(&NmConfig::default()).program, "go");
}

#[test]
fn spawn_failure_is_reported() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let temp = tempfile::tempdir().unwrap();
    let bin = temp.path().join("app");
    std::fs::write(&bin, b"bin").unwrap();

    let tool = NmTool { program: "/nonexistent/depweight-nm".into(), args: vec![] };
    let err = tool.symbols(&bin).unwrap_err();
    assert!(matches!(err, NmError::Spawn { .. }), "{err:?}");
}

#[cfg(unix)]
mod subprocess {
    use super::*;

    // `sh -c '...' <binary>` sees the binary path as $0.
    fn shell(script: &str) -> NmTool {
        NmTool { program: "sh".into(), args: vec!["-c".into(), script.into()] }
    }

    #[test]
    fn streams_tool_stdout() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = tempfile::tempdir().unwrap();
        let bin = temp.path().join("table.txt");
        std::fs::write(&bin, TABLE).unwrap();

        let symbols = shell("cat \"$0\"").symbols(&bin).expect("run sh");
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[1].path, vec!["fmt"]);
        assert_eq!(symbols[1].name, "Println");
    }

    #[test]
    fn non_zero_exit_is_a_failure() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = tempfile::tempdir().unwrap();
        let bin = temp.path().join("app");
        std::fs::write(&bin, b"bin").unwrap();

        let err = shell("exit 3").symbols(&bin).unwrap_err();
        match err {
            NmError::ToolFailed { program, status } => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_output_aborts() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = tempfile::tempdir().unwrap();
        let bin = temp.path().join("app");
        std::fs::write(&bin, b"bin").unwrap();

        let err = shell("echo 'not a symbol line'").symbols(&bin).unwrap_err();
        assert!(matches!(err, NmError::Symbols(SymbolError::MalformedLine { line_number: 1, .. })));
    }
}
