use std::io::BufRead;

use tracing::{debug, trace};

use super::{parse_line, Symbol, SymbolError};

/// Name prefixes of compiler-generated bookkeeping symbols: interface method
/// tables and reflection type descriptors. They are not charged to any
/// package.
pub const SYNTHETIC_PREFIXES: [&str; 2] = ["go.itab.", "type.."];

/// Whether a symbol belongs to one of the synthetic families.
///
/// The first path segment is always a prefix of the qualified name, so
/// matching on the qualified name also catches names that carry no `/`.
pub fn is_synthetic(symbol: &Symbol) -> bool {
    SYNTHETIC_PREFIXES.iter().any(|prefix| symbol.qualified_name.starts_with(prefix))
}

/// Parse a full symbol table, one symbol per line.
///
/// Symbols without a name and synthetic symbols are dropped. Bytes that are
/// not valid UTF-8 are replaced before parsing. The first bad line or read
/// error aborts the batch.
pub fn parse_symbols<R: BufRead>(mut reader: R) -> Result<Vec<Symbol>, SymbolError> {
    let mut symbols = Vec::new();
    let mut unnamed = 0usize;
    let mut synthetic = 0usize;

    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        let symbol = parse_line(&line)
            .map_err(|source| SymbolError::MalformedLine { line_number, source })?;

        if symbol.qualified_name.is_empty() {
            unnamed += 1;
            continue;
        }
        if is_synthetic(&symbol) {
            trace!(symbol = %symbol.qualified_name, "skipping synthetic symbol");
            synthetic += 1;
            continue;
        }

        symbols.push(symbol);
    }

    debug!(kept = symbols.len(), unnamed, synthetic, "parsed symbol table");
    Ok(symbols)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
