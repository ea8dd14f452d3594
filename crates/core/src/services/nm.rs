use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NmConfig;
use crate::symbols::{parse_symbols, Symbol, SymbolError};

/// Overrides the configured tool program.
pub const NM_BIN_ENV: &str = "DEPWEIGHT_NM_BIN";

/// Names a file whose contents are parsed instead of running the tool. Lets
/// tests run without a Go toolchain installed.
pub const FAKE_NM_ENV: &str = "DEPWEIGHT_FAKE_NM";

#[derive(Debug, Error)]
pub enum NmError {
    #[error("Binary not found at {0}")]
    MissingBinary(PathBuf),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} produced no stdout handle")]
    MissingStdout { program: String },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    ToolFailed { program: String, status: ExitStatus },
    #[error("failed to read {}: {source}", .path.display())]
    FakeOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Symbols(#[from] SymbolError),
}

/// Symbol dump tool invoked as `program args... <binary>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmTool {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for NmTool {
    fn default() -> Self {
        Self::from_config(&NmConfig::default())
    }
}

impl NmTool {
    /// Build from config, letting [`NM_BIN_ENV`] override the program.
    pub fn from_config(config: &NmConfig) -> Self {
        let program = std::env::var(NM_BIN_ENV).unwrap_or_else(|_| config.program.clone());
        Self { program, args: config.args.clone() }
    }

    /// Run the tool on `binary` and parse its complete symbol table.
    pub fn symbols(&self, binary: &Path) -> Result<Vec<Symbol>, NmError> {
        if !binary.is_file() {
            return Err(NmError::MissingBinary(binary.to_path_buf()));
        }

        if let Some(fake) = std::env::var_os(FAKE_NM_ENV) {
            let path = PathBuf::from(fake);
            debug!(path = %path.display(), "reading symbol table from fake nm output");
            let file =
                File::open(&path).map_err(|source| NmError::FakeOutput { path: path.clone(), source })?;
            return Ok(parse_symbols(BufReader::new(file))?);
        }

        debug!(program = %self.program, args = ?self.args, binary = %binary.display(), "running nm");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(binary)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| NmError::Spawn { program: self.program.clone(), source })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| NmError::MissingStdout { program: self.program.clone() })?;

        let symbols = match parse_symbols(BufReader::new(stdout)) {
            Ok(symbols) => symbols,
            Err(err) => {
                // The child may still be writing; do not leave it behind.
                let _ = child.kill();
                let _ = child.wait();
                return Err(err.into());
            }
        };

        let status = child
            .wait()
            .map_err(|source| NmError::Wait { program: self.program.clone(), source })?;
        if !status.success() {
            warn!(program = %self.program, %status, "nm exited unsuccessfully");
            return Err(NmError::ToolFailed { program: self.program.clone(), status });
        }

        Ok(symbols)
    }
}
