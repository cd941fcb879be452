//! Streaming JSON writer that rejects malformed call sequences.

use crate::json::json_error::JsonError;
use std::borrow::Cow;
use std::io::Write;

/// Kind of the most recently written token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Token {
    None,
    Opening,
    Key,
    Value,
    Closing,
}

// =#========================================================================#=
// JSON WRITER
// =#========================================================================#=
/// A stateful, bracket-balanced JSON emitter writing to a byte sink.
///
/// Tokens are written incrementally; the writer tracks open brackets and
/// the previous token, inserts separators, and returns a [JsonError] for any
/// call that would produce malformed output:
/// - a key outside an object, or directly after another key
/// - a value or opening bracket inside an object without a preceding key
/// - a closing bracket that does not match the innermost open one
/// - any token after the outermost value is complete
///
/// # Example
/// ```
/// use tolsplit::json::JsonWriter;
///
/// let mut json = JsonWriter::in_memory();
/// json.begin('{')?.key("a")?.value(1)?.end('}')?;
/// assert_eq!(json.to_json_string(), r#"{"a":1}"#);
/// # Ok::<(), tolsplit::json::JsonError>(())
/// ```
pub struct JsonWriter<W: Write> {
    sink: W,
    brackets: Vec<char>,
    last_token: Token,
    bytes_written: usize,
}

impl JsonWriter<Vec<u8>> {
    /// Creates a writer accumulating its output in memory.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    /// The text written so far.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sink)
    }

    /// The text written so far, as an owned string.
    pub fn to_json_string(&self) -> String {
        self.as_text().into_owned()
    }
}

impl<W: Write> JsonWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            brackets: Vec::new(),
            last_token: Token::None,
            bytes_written: 0,
        }
    }

    /// Opens an object (`{`) or array (`[`).
    pub fn begin(&mut self, opening_bracket: char) -> Result<&mut Self, JsonError> {
        let closing_bracket = match opening_bracket {
            '{' => '}',
            '[' => ']',
            other => return Err(JsonError::InvalidBracket(other)),
        };
        self.begin_token(Token::Opening)?;
        self.brackets.push(closing_bracket);
        self.emit(if closing_bracket == '}' { b"{" } else { b"[" })?;
        Ok(self)
    }

    /// Closes the innermost open object (`}`) or array (`]`).
    pub fn end(&mut self, closing_bracket: char) -> Result<&mut Self, JsonError> {
        if closing_bracket != '}' && closing_bracket != ']' {
            return Err(JsonError::InvalidBracket(closing_bracket));
        }
        if let Some(&expected) = self.brackets.last()
            && expected != closing_bracket
        {
            return Err(JsonError::UnmatchedBracket {
                expected,
                found: closing_bracket,
            });
        }
        // Fails without brackets open, so the pop below always succeeds.
        self.begin_token(Token::Closing)?;
        self.brackets.pop();
        self.emit(if closing_bracket == '}' { b"}" } else { b"]" })?;
        // A closed container counts as a complete value for its parent.
        self.last_token = Token::Value;
        Ok(self)
    }

    /// Writes an object key; must be directly inside an object.
    pub fn key(&mut self, key: &str) -> Result<&mut Self, JsonError> {
        self.begin_token(Token::Key)?;
        self.write_string(key)?;
        self.emit(b":")?;
        Ok(self)
    }

    /// Writes a value through its [ToJson] implementation.
    ///
    /// Scalars (strings, integers, floats, booleans) are written directly,
    /// other types may write whole containers.
    pub fn value<T: ToJson>(&mut self, value: T) -> Result<&mut Self, JsonError> {
        value.write_json(self)?;
        Ok(self)
    }

    /// Writes `null`.
    pub fn null_value(&mut self) -> Result<&mut Self, JsonError> {
        self.scalar_value("null")
    }

    /// Writes a string scalar with standard escaping.
    pub fn string_value(&mut self, value: &str) -> Result<&mut Self, JsonError> {
        self.begin_token(Token::Value)?;
        self.write_string(value)?;
        Ok(self)
    }

    /// Writes a scalar given in its canonical textual form, unquoted.
    fn scalar_value(&mut self, text: &str) -> Result<&mut Self, JsonError> {
        self.begin_token(Token::Value)?;
        self.emit(text.as_bytes())?;
        Ok(self)
    }

    /// Number of bytes written to the sink so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Whether the outermost value has been written completely.
    pub fn is_complete(&self) -> bool {
        self.brackets.is_empty() && self.last_token != Token::None
    }

    /// Flushes the sink and returns it.
    ///
    /// # Errors
    /// Returns [JsonError::IncompleteDocument] if brackets are still open or
    /// nothing was written, or an IO error if flushing fails.
    pub fn finish(mut self) -> Result<W, JsonError> {
        if !self.is_complete() {
            return Err(JsonError::IncompleteDocument);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    // ------------------------------------------------------------------------
    // Token protocol
    // ------------------------------------------------------------------------
    /// Validates that `token` may follow the previous one and emits the
    /// separating comma where needed.
    fn begin_token(&mut self, token: Token) -> Result<(), JsonError> {
        let Some(&innermost) = self.brackets.last() else {
            if self.last_token != Token::None {
                return Err(JsonError::DocumentComplete);
            }
            return match token {
                Token::Opening | Token::Value => {
                    self.last_token = token;
                    Ok(())
                }
                Token::Closing => Err(JsonError::BracketNotOpen),
                _ => Err(JsonError::UnexpectedToken),
            };
        };

        match token {
            Token::Key => {
                if innermost != '}' || self.last_token == Token::Key {
                    return Err(JsonError::UnexpectedKey);
                }
            }
            Token::Closing => {
                if self.last_token == Token::Key {
                    return Err(JsonError::UnexpectedToken);
                }
            }
            _ => {
                if innermost == '}' && self.last_token != Token::Key {
                    return Err(JsonError::ExpectedKey);
                }
            }
        }

        if token != Token::Closing
            && self.last_token != Token::Opening
            && self.last_token != Token::Key
        {
            self.emit(b",")?;
        }
        self.last_token = token;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> Result<(), JsonError> {
        self.sink.write_all(bytes)?;
        self.bytes_written += bytes.len();
        Ok(())
    }

    /// Writes `s` quoted, escaping quote, backslash, slash and control characters.
    ///
    /// The slash is escaped so that `</script>` never appears in output.
    fn write_string(&mut self, s: &str) -> Result<(), JsonError> {
        self.emit(b"\"")?;

        let bytes = s.as_bytes();
        let mut run_start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escaped: Cow<'static, str> = match b {
                b'"' => "\\\"".into(),
                b'\\' => "\\\\".into(),
                b'/' => "\\/".into(),
                b'\n' => "\\n".into(),
                b'\r' => "\\r".into(),
                b'\t' => "\\t".into(),
                0x0c => "\\f".into(),
                0x00..=0x1f => format!("\\u{:04x}", b).into(),
                _ => continue,
            };
            self.emit(&bytes[run_start..i])?;
            self.emit(escaped.as_bytes())?;
            run_start = i + 1;
        }
        self.emit(&bytes[run_start..])?;

        self.emit(b"\"")
    }
}

// =#========================================================================#=
// TO JSON (Trait)
// =#========================================================================#=
/// Types that can write themselves as one JSON value.
///
/// Implementations must write exactly one complete value (a scalar or a
/// balanced container) through the given writer.
pub trait ToJson {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError>;
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        (**self).write_json(json)
    }
}

impl ToJson for str {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        json.string_value(self).map(|_| ())
    }
}

impl ToJson for String {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        json.string_value(self).map(|_| ())
    }
}

impl ToJson for bool {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        json.scalar_value(if *self { "true" } else { "false" }).map(|_| ())
    }
}

impl ToJson for f64 {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        if !self.is_finite() {
            return Err(JsonError::NonFiniteNumber);
        }
        json.scalar_value(&self.to_string()).map(|_| ())
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        match self {
            Some(value) => value.write_json(json),
            None => json.null_value().map(|_| ()),
        }
    }
}

macro_rules! impl_to_json_for_integers {
    ($($t:ty),*) => {
        $(
            impl ToJson for $t {
                fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
                    json.scalar_value(&self.to_string()).map(|_| ())
                }
            }
        )*
    };
}

impl_to_json_for_integers!(i32, i64, u32, u64, usize);
