//! Symbol attribution: parsing `nm -size` output and charging each symbol to
//! the package that produced it.
//!
//! A line is first classified into one of the two column layouts the tool
//! emits, then its fields are extracted generically from the position of the
//! type token. The qualified name is split into a package path and a local
//! name by [`split_qualified_name`], which is pure string analysis.

mod batch;
mod error;

pub use batch::{is_synthetic, parse_symbols, SYNTHETIC_PREFIXES};
pub use error::{ParseError, SymbolError};

use serde::{Deserialize, Serialize};

/// Size reported for symbols whose size the linker does not know (externals).
///
/// The value is the overflow of a 32-bit unsigned field; it is normalized to 0.
pub const UNKNOWN_SIZE: i64 = 4_294_967_296;

/// One entry of a binary's symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Symbol {
    /// Virtual address; 0 when the tool omitted the address column.
    pub address: u64,
    pub size: i64,
    /// nm type code (T for text, D for data, and so on).
    pub code: char,
    pub qualified_name: String,
    /// Free-form trailing annotation, such as `file:line`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    /// Segments of the owning package path; empty for unqualified symbols.
    #[serde(default)]
    pub path: Vec<String>,
    /// Name with the package qualifier removed.
    pub name: String,
}

impl Symbol {
    /// Package import path (`path` joined with `/`), empty for bare symbols.
    pub fn package(&self) -> String {
        self.path.join("/")
    }
}

/// Column layout of a symbol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `size type [name [info...]]`, printed when the address is omitted.
    NoAddress,
    /// `address size type [name [info...]]`.
    WithAddress,
}

impl Layout {
    /// Locate the type token, checking index 1 before index 2.
    pub fn classify(tokens: &[&str]) -> Option<Self> {
        if tokens.get(1).is_some_and(|t| is_type_token(t)) {
            Some(Layout::NoAddress)
        } else if tokens.get(2).is_some_and(|t| is_type_token(t)) {
            Some(Layout::WithAddress)
        } else {
            None
        }
    }

    /// Index of the type token for this layout.
    pub fn type_index(self) -> usize {
        match self {
            Layout::NoAddress => 1,
            Layout::WithAddress => 2,
        }
    }

    fn fields<'a>(self, tokens: &'a [&'a str]) -> Fields<'a> {
        let at = self.type_index();
        Fields {
            address: (self == Layout::WithAddress).then(|| tokens[0]),
            size: tokens[at - 1],
            code: tokens[at],
            name: tokens.get(at + 1).copied().unwrap_or_default(),
            info: tokens.get(at + 2..).unwrap_or_default(),
        }
    }
}

struct Fields<'a> {
    address: Option<&'a str>,
    size: &'a str,
    code: &'a str,
    name: &'a str,
    info: &'a [&'a str],
}

fn is_type_token(token: &str) -> bool {
    token.len() == 1 && token.as_bytes()[0].is_ascii_alphabetic()
}

/// Parse one line of `nm -size` output.
///
/// A line with an empty name is returned as-is without decomposition; the
/// batch parser drops those.
pub fn parse_line(line: &str) -> Result<Symbol, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ParseError::MalformedLine { line: line.to_string() });
    }

    let layout = Layout::classify(&tokens)
        .ok_or_else(|| ParseError::UnrecognizedLayout { line: line.to_string() })?;
    let fields = layout.fields(&tokens);

    let address = match fields.address {
        Some(field) => u64::from_str_radix(field, 16).map_err(|source| {
            ParseError::InvalidAddress { field: field.to_string(), line: line.to_string(), source }
        })?,
        None => 0,
    };

    let size = match fields.size.parse::<i64>() {
        Ok(UNKNOWN_SIZE) => 0,
        Ok(size) if size < 0 => {
            return Err(ParseError::NegativeSize {
                field: fields.size.to_string(),
                line: line.to_string(),
            })
        }
        Ok(size) => size,
        Err(source) => {
            return Err(ParseError::InvalidSize {
                field: fields.size.to_string(),
                line: line.to_string(),
                source,
            })
        }
    };

    let mut symbol = Symbol {
        address,
        size,
        code: fields.code.chars().next().unwrap_or_default(),
        qualified_name: fields.name.to_string(),
        info: fields.info.join(" "),
        ..Symbol::default()
    };

    if symbol.qualified_name.is_empty() {
        return Ok(symbol);
    }

    let (path, name) = split_qualified_name(&symbol.qualified_name);
    symbol.path = path;
    symbol.name = name;
    Ok(symbol)
}

/// Split a qualified symbol name into its package path and local name.
///
/// The split point is the first `.` after the last `/`, both searched only
/// before the first `(` so argument signatures do not move it. Names without
/// a package qualifier yield an empty path and the full name.
///
/// A trailing call signature is stripped from the local name, so
/// `pkg.Func(int)` yields `Func` and `pkg.(*T).M(int)` yields `(*T).M`. A
/// leading receiver group such as `(*T)` is never treated as a signature.
pub fn split_qualified_name(qualified: &str) -> (Vec<String>, String) {
    let brace = qualified.find('(').unwrap_or(qualified.len());
    let slash = qualified[..brace].rfind('/').unwrap_or(0);
    let dot = qualified[slash..brace].find('.').unwrap_or(0);

    let split = slash + dot;
    if split == 0 {
        return (Vec::new(), qualified.to_string());
    }

    let path = qualified[..split].split('/').map(str::to_string).collect();
    let name = strip_signature(&qualified[split + 1..]);
    (path, name.to_string())
}

/// Drop a parenthesized group closing the name, unless it opens the name.
fn strip_signature(name: &str) -> &str {
    if !name.ends_with(')') {
        return name;
    }
    let mut depth = 0usize;
    for (index, c) in name.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return if index == 0 { name } else { &name[..index] };
                }
            }
            _ => {}
        }
    }
    name
}
