//! CSV decoding into lists of records.
//!
//! The dialect is fixed: `,` separates fields, a line starting with `#` is a
//! comment, leading whitespace in every field is trimmed and lines that are
//! blank after trimming are skipped. The first remaining row names the
//! columns; every following row becomes one record mapping column name to
//! cell.
//!
//! # Typed mode
//!
//! Decoding is untyped unless [`CsvMode::Typed`] is requested. In typed
//! mode a second header row of type hints is recognised when
//! every non-empty cell in it is a known hint:
//!
//! | Hint | Cell becomes |
//! |------|--------------|
//! | `string`, `str`, `text` | string |
//! | `bool`, `boolean` | `true`/`false` (case-insensitive) |
//! | `int`, `integer`, `int64` | integer |
//! | `float`, `float64`, `double` | floating point number |
//! | `number`, `numeric` | integer if possible, else floating point |
//!
//! A column with an empty hint stays a string column. Empty cells in bool
//! and number columns become `null`. Without a hint row the input decodes
//! exactly like [`CsvMode::Untyped`].
//!
//! # Strictness
//!
//! Decoding fails on invalid UTF-8, rows whose field count differs from the
//! header, duplicate or quote-bearing column names, a column without a name
//! that carries data, and cells that cannot be coerced to their hinted type.
//! Columns whose name and cells are all empty (trailing commas) are dropped.
//! With [`CsvOptions::lenient`] every such failure yields an empty list and a
//! warning instead.

use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::constants::{CSV_COMMENT, CSV_DELIMITER};
use crate::core::TmplxError;

/// Whether type-hint rows are honoured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvMode {
    /// Every cell is a string; the second row is always data.
    #[default]
    Untyped,
    /// A recognised type-hint row coerces the cells of its columns.
    Typed,
}

/// Options controlling CSV decoding for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvOptions {
    /// Untyped or typed decoding
    pub mode: CsvMode,
    /// Turn decode failures into an empty record list
    pub lenient: bool,
}

/// Column type declared by a hint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    String,
    Bool,
    Int,
    Float,
    Number,
}

impl ColumnType {
    fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "" | "string" | "str" | "text" => Some(Self::String),
            "bool" | "boolean" => Some(Self::Bool),
            "int" | "integer" | "int64" => Some(Self::Int),
            "float" | "float64" | "double" => Some(Self::Float),
            "number" | "numeric" => Some(Self::Number),
            _ => None,
        }
    }

    fn coerce(self, cell: &str) -> Result<Value, String> {
        if self != Self::String && cell.trim().is_empty() {
            return Ok(Value::Null);
        }
        let trimmed = cell.trim();
        match self {
            Self::String => Ok(Value::String(cell.to_string())),
            Self::Bool => {
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(format!("'{cell}' is not a boolean (expected TRUE or FALSE)"))
                }
            }
            Self::Int => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("'{cell}' is not an integer")),
            Self::Float => parse_float(trimmed).ok_or_else(|| format!("'{cell}' is not a number")),
            Self::Number => trimmed
                .parse::<i64>()
                .map(Value::from)
                .ok()
                .or_else(|| parse_float(trimmed))
                .ok_or_else(|| format!("'{cell}' is not a number")),
        }
    }
}

fn parse_float(s: &str) -> Option<Value> {
    s.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

/// One non-blank row with the line it started on.
struct Row {
    line: u64,
    cells: Vec<String>,
}

/// Decode CSV bytes into a JSON array of record objects.
///
/// Empty and header-only input decode to an empty array.
///
/// # Errors
///
/// Returns [`TmplxError::CsvDecode`] when the input violates the rules in
/// the module documentation, unless `options.lenient` is set.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tmplx_cli::binding::formats::csv::{decode, CsvOptions};
///
/// let rows = decode(b"key,value\nfoo,bar", &CsvOptions::default()).unwrap();
/// assert_eq!(rows, json!([{"key": "foo", "value": "bar"}]));
/// ```
pub fn decode(bytes: &[u8], options: &CsvOptions) -> Result<Value, TmplxError> {
    match decode_records(bytes, options.mode) {
        Ok(records) => {
            debug!("Decoded {} CSV record(s)", records.len());
            Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
        }
        Err(reason) if options.lenient => {
            warn!("Ignoring undecodable CSV input in lenient mode: {}", reason);
            Ok(Value::Array(Vec::new()))
        }
        Err(reason) => Err(TmplxError::CsvDecode {
            reason,
        }),
    }
}

fn decode_records(bytes: &[u8], mode: CsvMode) -> Result<Vec<Map<String, Value>>, String> {
    let mut rows = read_rows(bytes)?.into_iter();

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let mut data: Vec<Row> = rows.collect();

    for row in &data {
        if row.cells.len() != header.cells.len() {
            return Err(format!(
                "line {}: expected {} fields as in the header, found {}",
                row.line,
                header.cells.len(),
                row.cells.len()
            ));
        }
    }

    let columns = select_columns(&header, &data)?;

    let hints = match mode {
        CsvMode::Typed => data.first().and_then(|row| hint_row(row, &columns)),
        CsvMode::Untyped => None,
    };
    let types = match hints {
        Some(types) => {
            debug!("Using type hints {:?}", types);
            data.remove(0);
            types
        }
        None => vec![ColumnType::String; columns.len()],
    };

    let mut records = Vec::with_capacity(data.len());
    for row in &data {
        let mut record = Map::new();
        for ((index, name), column_type) in columns.iter().zip(&types) {
            let value = column_type
                .coerce(&row.cells[*index])
                .map_err(|e| format!("line {}, column '{}': {}", row.line, name, e))?;
            record.insert(name.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}

fn read_rows(bytes: &[u8]) -> Result<Vec<Row>, String> {
    let trimmed = trim_leading_space(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(CSV_DELIMITER)
        .comment(Some(CSV_COMMENT))
        .flexible(true)
        .from_reader(trimmed.as_slice());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(Row {
            line,
            cells,
        });
    }
    Ok(rows)
}

/// Where [`trim_leading_space`] is within the current field.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldState {
    LineStart,
    Start,
    Comment,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Drop whitespace at the start of every field that is outside quotes.
///
/// Runs before the reader splits fields, so `a, "b, c"` still sees the
/// second field as quoted. Comment lines pass through untouched. Line
/// breaks are kept and line numbers stay accurate.
fn trim_leading_space(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = FieldState::LineStart;
    for &byte in bytes {
        let ends_line = byte == b'\n' || byte == b'\r';
        let ends_field = ends_line || byte == CSV_DELIMITER;
        state = match state {
            FieldState::LineStart | FieldState::Start if byte == b' ' || byte == b'\t' => continue,
            FieldState::LineStart if byte == CSV_COMMENT => FieldState::Comment,
            FieldState::Comment if ends_line => FieldState::LineStart,
            FieldState::Comment => FieldState::Comment,
            FieldState::LineStart | FieldState::Start if byte == b'"' => FieldState::Quoted,
            FieldState::Quoted if byte == b'"' => FieldState::QuoteInQuoted,
            FieldState::Quoted => FieldState::Quoted,
            FieldState::QuoteInQuoted if byte == b'"' => FieldState::Quoted,
            _ if ends_line => FieldState::LineStart,
            _ if ends_field => FieldState::Start,
            _ => FieldState::Unquoted,
        };
        out.push(byte);
    }
    out
}

/// Pick the `(index, name)` pairs of columns to keep.
fn select_columns(header: &Row, data: &[Row]) -> Result<Vec<(usize, String)>, String> {
    let mut columns: Vec<(usize, String)> = Vec::with_capacity(header.cells.len());
    for (index, name) in header.cells.iter().enumerate() {
        if name.is_empty() {
            if data.iter().all(|row| row.cells[index].is_empty()) {
                continue;
            }
            return Err(format!("column {} carries data but has no name", index + 1));
        }
        if name.contains('"') {
            return Err(format!("malformed column name {name}"));
        }
        if columns.iter().any(|(_, existing)| existing == name) {
            return Err(format!("duplicate column name '{name}'"));
        }
        columns.push((index, name.clone()));
    }
    Ok(columns)
}

/// Interpret `row` as a type-hint row, if every non-empty cell is a hint.
fn hint_row(row: &Row, columns: &[(usize, String)]) -> Option<Vec<ColumnType>> {
    let cells: Vec<&str> = columns.iter().map(|(index, _)| row.cells[*index].as_str()).collect();
    if cells.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }
    cells.into_iter().map(ColumnType::from_hint).collect()
}
