//! YAML emission.
//!
//! This module writes a canonical [`Value`] tree as a block-style YAML
//! document, matching byte for byte what the conventional Go YAML encoder
//! produces for the same tree.
//!
//! ## Layout
//!
//! - Mappings are written one key per line, keys in [`key_order`](crate::key_order)
//! - Nested mappings are indented by [`EncodeOptions::indent`]
//! - Sequences under a key start at the key's column (`key:\n- a`)
//! - Mappings and sequences inside a sequence item start on the dash line
//! - Empty containers are written in flow form, `{}` and `[]`
//! - Keys spanning lines or longer than 128 bytes are written as explicit
//!   `? key` entries, with the value on a following `: value` line
//! - The document ends with a newline
//!
//! ## Scalars
//!
//! Strings stay plain whenever the plain text reads back as the same string.
//! Text that would resolve to another type (`true`, `null`, `0x1F`,
//! `2001-12-14`, `yes`, ...) is double-quoted. Text that is not valid as a
//! plain scalar (leading indicators, `: `, ` #`, surrounding spaces) is
//! single-quoted. Multi-line text uses a literal block.
//!
//! ```rust
//! use helm_values::{to_yaml_string, EncodeOptions, Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("enabled".to_string(), Value::from("true"));
//! map.insert("script".to_string(), Value::from("set -e\nmake\n"));
//! map.insert("comment".to_string(), Value::from("# not a comment"));
//!
//! let yaml = to_yaml_string(&Value::Mapping(map), &EncodeOptions::default()).unwrap();
//! assert_eq!(
//!     yaml,
//!     "comment: '# not a comment'\nenabled: \"true\"\nscript: |\n  set -e\n  make\n"
//! );
//! ```

use crate::path::{Path, PathSegment};
use crate::{EncodeOptions, Error, Mapping, Number, Result, Value};

/// Longest mapping key, in bytes, written as an implicit `key: value` entry.
/// Longer keys use the explicit `? key` form.
const MAX_SIMPLE_KEY_LENGTH: usize = 128;

/// Streams a [`Value`] into YAML text.
///
/// Most callers should use [`to_yaml_string`]; the emitter is exposed for
/// writing several documents with the same options.
pub struct Emitter<'o> {
    output: String,
    options: &'o EncodeOptions,
    step: usize,
    path: Vec<PathSegment>,
    open_ended: bool,
}

impl<'o> Emitter<'o> {
    pub fn new(options: &'o EncodeOptions) -> Self {
        Emitter {
            output: String::with_capacity(256),
            options,
            step: options.effective_indent(),
            path: Vec::new(),
            open_ended: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends one document for `value` to the output.
    pub fn emit(&mut self, value: &Value) -> Result<()> {
        self.path.clear();
        self.open_ended = false;

        match value {
            Value::Mapping(map) if !map.is_empty() => self.write_mapping(map, 0, false, 0)?,
            Value::List(items) if !items.is_empty() => self.write_sequence(items, 0, false, 0)?,
            other => {
                self.write_inline(other, 0);
                self.finish_line();
            }
        }

        if self.open_ended {
            // a kept trailing line break needs an explicit document end
            self.output.push_str("...\n");
            self.open_ended = false;
        }
        Ok(())
    }

    fn current_path(&self) -> Path {
        Path::from(self.path.as_slice())
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.options.max_depth {
            return Err(Error::too_deep(self.options.max_depth, self.current_path()));
        }
        Ok(())
    }

    #[inline]
    fn write_indent(&mut self, column: usize) {
        self.output.extend(std::iter::repeat(' ').take(column));
    }

    #[inline]
    fn finish_line(&mut self) {
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    /// Writes a block mapping whose keys sit at `indent`. With `inline_first`
    /// the caller has already positioned the cursor for the first key.
    fn write_mapping(
        &mut self,
        map: &Mapping,
        indent: usize,
        inline_first: bool,
        depth: usize,
    ) -> Result<()> {
        self.enter(depth)?;

        for (i, (key, value)) in map.sorted_entries().into_iter().enumerate() {
            self.path.push(PathSegment::Key(key.clone()));
            if i > 0 || !inline_first {
                self.write_indent(indent);
            }
            if is_simple_key(key) {
                self.write_string(key, indent);
                self.output.push(':');
                self.write_simple_value(value, indent, depth)?;
            } else {
                self.output.push_str("? ");
                self.write_string(key, indent);
                self.finish_line();
                self.write_indent(indent);
                self.output.push(':');
                self.write_explicit_value(value, indent, depth)?;
            }
            self.path.pop();
        }
        Ok(())
    }

    /// Writes the value of a `key:` entry; the cursor is right after the colon.
    fn write_simple_value(&mut self, value: &Value, indent: usize, depth: usize) -> Result<()> {
        match value {
            Value::Mapping(inner) if !inner.is_empty() => {
                self.output.push('\n');
                self.write_mapping(inner, indent + self.step, false, depth + 1)
            }
            Value::List(items) if !items.is_empty() => {
                self.output.push('\n');
                self.write_sequence(items, indent, false, depth + 1)
            }
            other => {
                self.output.push(' ');
                self.write_inline(other, indent);
                self.finish_line();
                Ok(())
            }
        }
    }

    /// Writes the value of a `? key` entry; the cursor is right after the
    /// `:` line's colon. Containers start on the colon line like sequence items.
    fn write_explicit_value(&mut self, value: &Value, indent: usize, depth: usize) -> Result<()> {
        match value {
            Value::Mapping(inner) if !inner.is_empty() => {
                self.write_indent(self.step - 1);
                self.write_mapping(inner, indent + self.step, true, depth + 1)
            }
            Value::List(items) if !items.is_empty() => {
                self.write_indent(self.step - 1);
                self.write_sequence(items, indent + self.step, true, depth + 1)
            }
            other => {
                self.output.push(' ');
                self.write_inline(other, indent);
                self.finish_line();
                Ok(())
            }
        }
    }

    /// Writes a block sequence whose dashes sit at `indent`.
    fn write_sequence(
        &mut self,
        items: &[Value],
        indent: usize,
        inline_first: bool,
        depth: usize,
    ) -> Result<()> {
        self.enter(depth)?;

        for (i, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(i));
            if i > 0 || !inline_first {
                self.write_indent(indent);
            }
            self.output.push('-');

            match item {
                Value::Mapping(inner) if !inner.is_empty() => {
                    self.write_indent(self.step - 1);
                    self.write_mapping(inner, indent + self.step, true, depth + 1)?;
                }
                Value::List(inner) if !inner.is_empty() => {
                    self.write_indent(self.step - 1);
                    self.write_sequence(inner, indent + self.step, true, depth + 1)?;
                }
                other => {
                    self.output.push(' ');
                    self.write_inline(other, indent);
                    self.finish_line();
                }
            }
            self.path.pop();
        }
        Ok(())
    }

    /// Writes a scalar or an empty container at the cursor. `indent` is the
    /// column of the enclosing node; literal block content goes one step
    /// further in.
    fn write_inline(&mut self, value: &Value, indent: usize) {
        self.open_ended = false;
        match value {
            Value::Absent => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_number(n),
            Value::String(s) => self.write_string(s, indent),
            Value::List(_) => self.output.push_str("[]"),
            Value::Mapping(_) => self.output.push_str("{}"),
        }
    }

    fn write_number(&mut self, number: &Number) {
        match number {
            Number::Integer(i) => self.output.push_str(&i.to_string()),
            Number::Float(f) => self.output.push_str(&format_float(*f)),
            Number::Big(d) => self.output.push_str(&d.to_string()),
        }
    }

    fn write_string(&mut self, s: &str, indent: usize) {
        match select_style(s) {
            ScalarStyle::Plain => self.output.push_str(s),
            ScalarStyle::SingleQuoted => write_single_quoted(&mut self.output, s),
            ScalarStyle::DoubleQuoted => write_double_quoted(&mut self.output, s),
            ScalarStyle::Literal => self.write_literal(s, indent + self.step),
        }
    }

    fn write_literal(&mut self, s: &str, content_indent: usize) {
        self.output.push('|');
        if s.starts_with(' ') || s.starts_with('\n') {
            self.output.push_str(&self.step.to_string());
        }
        match chomping(s) {
            Chomping::Strip => self.output.push('-'),
            Chomping::Clip => {}
            Chomping::Keep => {
                self.output.push('+');
                self.open_ended = true;
            }
        }
        self.output.push('\n');

        let mut at_line_start = true;
        for c in s.chars() {
            if c == '\n' {
                self.output.push('\n');
                at_line_start = true;
            } else {
                if at_line_start {
                    self.write_indent(content_indent);
                    at_line_start = false;
                }
                self.output.push(c);
            }
        }
    }
}

/// Renders `value` as a YAML document.
///
/// The tree is written as given; callers wanting absent values removed
/// should [`prune`](crate::prune) first. An [`Value::Absent`] root is written
/// as `null`.
///
/// # Errors
///
/// [`Error::TooDeep`] when containers nest deeper than
/// [`EncodeOptions::max_depth`].
pub fn to_yaml_string(value: &Value, options: &EncodeOptions) -> Result<String> {
    let mut emitter = Emitter::new(options);
    emitter.emit(value)?;
    Ok(emitter.into_inner())
}

/// Formats a float the way Go's `strconv.FormatFloat(f, 'g', -1, 64)` does,
/// with YAML spellings for the non-finite values.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return ".nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }

    // `{:e}` gives the shortest round-trip digits, e.g. "1.234567e6"
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if f.is_sign_negative() {
        out.push('-');
    }

    if exponent < -4 || exponent >= 6 {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exponent.unsigned_abs()));
    } else if exponent < 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-exponent - 1) as usize));
        out.push_str(&digits);
    } else {
        let integer_len = exponent as usize + 1;
        if digits.len() <= integer_len {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(integer_len - digits.len()));
        } else {
            out.push_str(&digits[..integer_len]);
            out.push('.');
            out.push_str(&digits[integer_len..]);
        }
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Chomping {
    Strip,
    Clip,
    Keep,
}

fn chomping(s: &str) -> Chomping {
    let mut rev = s.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('\n'), None) => Chomping::Keep,
        (Some('\n'), Some('\n')) => Chomping::Keep,
        (Some('\n'), Some(_)) => Chomping::Clip,
        _ => Chomping::Strip,
    }
}

/// Keys that fit on one short line are written as `key: value`.
fn is_simple_key(key: &str) -> bool {
    key.len() <= MAX_SIMPLE_KEY_LENGTH && !key.chars().any(is_break)
}

fn select_style(s: &str) -> ScalarStyle {
    if resolves_to_non_string(s) {
        return ScalarStyle::DoubleQuoted;
    }

    let analysis = analyze(s);
    if s.contains('\n') {
        if !analysis.block_allowed {
            ScalarStyle::DoubleQuoted
        } else {
            ScalarStyle::Literal
        }
    } else if analysis.plain_allowed {
        ScalarStyle::Plain
    } else if analysis.single_quoted_allowed {
        ScalarStyle::SingleQuoted
    } else {
        ScalarStyle::DoubleQuoted
    }
}

/// Which scalar styles can represent a string in block context.
struct Analysis {
    plain_allowed: bool,
    single_quoted_allowed: bool,
    block_allowed: bool,
}

#[inline]
fn is_printable(c: char) -> bool {
    matches!(c,
        '\n'
        | '\u{20}'..='\u{7E}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}')
        && c != '\u{FEFF}'
}

#[inline]
fn is_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

#[inline]
fn is_blank_or_break(c: char) -> bool {
    c == ' ' || c == '\t' || is_break(c)
}

fn analyze(s: &str) -> Analysis {
    if s.is_empty() {
        return Analysis {
            plain_allowed: false,
            single_quoted_allowed: true,
            block_allowed: false,
        };
    }

    let chars: Vec<char> = s.chars().collect();
    let last = chars.len() - 1;

    let mut indicators = s.starts_with("---") || s.starts_with("...");
    let mut special = false;
    let mut line_breaks = false;
    let mut leading_space = false;
    let mut leading_break = false;
    let mut trailing_space = false;
    let mut trailing_break = false;
    let mut break_space = false;
    let mut space_break = false;
    let mut previous_space = false;
    let mut previous_break = false;
    let mut preceded_by_whitespace = true;

    for (i, &c) in chars.iter().enumerate() {
        let followed_by_whitespace = chars.get(i + 1).map_or(true, |&n| is_blank_or_break(n));

        if i == 0 {
            match c {
                '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"'
                | '%' | '@' | '`' => indicators = true,
                '?' | ':' | '-' if followed_by_whitespace => indicators = true,
                _ => {}
            }
        } else {
            match c {
                ':' if followed_by_whitespace => indicators = true,
                '#' if preceded_by_whitespace => indicators = true,
                _ => {}
            }
        }

        // line separators other than '\n' only survive double quoting
        if !is_printable(c) || matches!(c, '\u{2028}' | '\u{2029}') {
            special = true;
        }

        if c == ' ' {
            leading_space |= i == 0;
            trailing_space |= i == last;
            break_space |= previous_break;
            previous_space = true;
            previous_break = false;
        } else if is_break(c) {
            line_breaks = true;
            leading_break |= i == 0;
            trailing_break |= i == last;
            space_break |= previous_space;
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        preceded_by_whitespace = is_blank_or_break(c);
    }

    let mut plain_allowed = true;
    let mut single_quoted_allowed = true;
    let mut block_allowed = true;

    if leading_space || leading_break || trailing_space || trailing_break {
        plain_allowed = false;
    }
    if trailing_space {
        block_allowed = false;
    }
    if break_space {
        plain_allowed = false;
        single_quoted_allowed = false;
    }
    if space_break || special {
        plain_allowed = false;
        single_quoted_allowed = false;
        block_allowed = false;
    }
    if line_breaks || indicators {
        plain_allowed = false;
    }

    Analysis {
        plain_allowed,
        single_quoted_allowed,
        block_allowed,
    }
}

fn write_single_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
}

fn write_double_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if is_printable(c) && !is_break(c) && c != '"' && c != '\\' {
            out.push(c);
            continue;
        }
        out.push('\\');
        match c {
            '\0' => out.push('0'),
            '\u{07}' => out.push('a'),
            '\u{08}' => out.push('b'),
            '\t' => out.push('t'),
            '\n' => out.push('n'),
            '\u{0B}' => out.push('v'),
            '\u{0C}' => out.push('f'),
            '\r' => out.push('r'),
            '\u{1B}' => out.push('e'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '\u{85}' => out.push('N'),
            '\u{2028}' => out.push('L'),
            '\u{2029}' => out.push('P'),
            c if (c as u32) <= 0xFF => out.push_str(&format!("x{:02X}", c as u32)),
            c if (c as u32) <= 0xFFFF => out.push_str(&format!("u{:04X}", c as u32)),
            c => out.push_str(&format!("U{:08X}", c as u32)),
        }
    }
    out.push('"');
}

/// Returns `true` when `s` written plain would be read back as something
/// other than a string.
fn resolves_to_non_string(s: &str) -> bool {
    if matches!(
        s,
        "" | "~"
            | "null"
            | "Null"
            | "NULL"
            | "true"
            | "True"
            | "TRUE"
            | "false"
            | "False"
            | "FALSE"
            | ".nan"
            | ".NaN"
            | ".NAN"
            | ".inf"
            | ".Inf"
            | ".INF"
            | "+.inf"
            | "+.Inf"
            | "+.INF"
            | "-.inf"
            | "-.Inf"
            | "-.INF"
            | "<<"
    ) {
        return true;
    }
    if is_legacy_bool(s) || is_base60(s) {
        return true;
    }

    match s.chars().next() {
        Some('.') => is_float(s),
        Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => {
            if is_timestamp(s) {
                return true;
            }
            let plain: String = s.chars().filter(|&c| c != '_').collect();
            is_integer(&plain) || is_float(&plain)
        }
        _ => false,
    }
}

/// YAML 1.1 booleans, still read as booleans by many parsers.
fn is_legacy_bool(s: &str) -> bool {
    matches!(
        s,
        "y" | "Y"
            | "yes"
            | "Yes"
            | "YES"
            | "on"
            | "On"
            | "ON"
            | "n"
            | "N"
            | "no"
            | "No"
            | "NO"
            | "off"
            | "Off"
            | "OFF"
    )
}

fn split_sign(s: &str) -> (Option<char>, &str) {
    match s.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), &s[1..]),
        _ => (None, s),
    }
}

/// Integer syntax with optional `0x`, `0o`, `0b` or leading-zero octal
/// prefixes, in range for a 64-bit integer.
fn is_integer(s: &str) -> bool {
    let (sign, body) = split_sign(s);
    let (radix, digits) = if let Some(rest) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, rest)
    } else if let Some(rest) = body
        .strip_prefix("0b")
        .or_else(|| body.strip_prefix("0B"))
    {
        (2, rest)
    } else if let Some(rest) = body
        .strip_prefix("0o")
        .or_else(|| body.strip_prefix("0O"))
    {
        (8, rest)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return false;
    }
    let Ok(magnitude) = u64::from_str_radix(digits, radix) else {
        return false;
    };
    match sign {
        None => true,
        Some('-') => magnitude <= 1u64 << 63,
        Some(_) => magnitude <= i64::MAX as u64,
    }
}

/// `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?` with a finite value.
fn is_float(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    if bytes.get(i) == Some(&b'.') {
        let n = count_digits(i + 1);
        if n == 0 {
            return false;
        }
        i += 1 + n;
    } else {
        let n = count_digits(i);
        if n == 0 {
            return false;
        }
        i += n;
        if bytes.get(i) == Some(&b'.') {
            i += 1 + count_digits(i + 1);
        }
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = count_digits(i);
        if n == 0 {
            return false;
        }
        i += n;
    }

    i == bytes.len() && s.parse::<f64>().map_or(false, f64::is_finite)
}

/// Sexagesimal numbers such as `1:20` or `-190:20:30.15`.
fn is_base60(s: &str) -> bool {
    let (_, body) = split_sign(s);
    let (head, fraction) = match body.split_once('.') {
        Some((head, fraction)) => (head, Some(fraction)),
        None => (body, None),
    };
    if let Some(fraction) = fraction {
        if !fraction.chars().all(|c| c.is_ascii_digit() || c == '_') {
            return false;
        }
    }

    let mut parts = head.split(':');
    let first = parts.next().unwrap_or("");
    if !first.starts_with(|c: char| c.is_ascii_digit())
        || !first.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return false;
    }

    let mut sexagesimal = 0;
    for part in parts {
        let valid = match part.as_bytes() {
            [d] => d.is_ascii_digit(),
            [t, d] => (b'0'..=b'5').contains(t) && d.is_ascii_digit(),
            _ => false,
        };
        if !valid {
            return false;
        }
        sexagesimal += 1;
    }
    sexagesimal > 0
}

/// Dates `YYYY-M-D`, optionally followed by a time: `T`/`t` with a zone, or
/// a space without one.
fn is_timestamp(s: &str) -> bool {
    let Some(rest) = parse_date(s) else {
        return false;
    };
    match rest.chars().next() {
        None => true,
        Some('T' | 't') => parse_time(&rest[1..]).map_or(false, is_zone),
        Some(' ') => parse_time(&rest[1..]).map_or(false, str::is_empty),
        Some(_) => false,
    }
}

fn take_digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let n = s.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if n < min {
        return None;
    }
    let value = s[..n].parse().ok()?;
    Some((value, &s[n..]))
}

/// Parses `YYYY-M-D` with a valid calendar day, returning what follows.
fn parse_date(s: &str) -> Option<&str> {
    let (year, rest) = take_digits(s, 4, 4)?;
    let rest = rest.strip_prefix('-')?;
    let (month, rest) = take_digits(rest, 1, 2)?;
    let rest = rest.strip_prefix('-')?;
    let (day, rest) = take_digits(rest, 1, 2)?;

    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return None,
    };
    if day == 0 || day > days {
        return None;
    }
    Some(rest)
}

/// Parses `H:M:S[.fraction]`, returning what follows.
fn parse_time(s: &str) -> Option<&str> {
    let (hour, rest) = take_digits(s, 1, 2)?;
    let rest = rest.strip_prefix(':')?;
    let (minute, rest) = take_digits(rest, 1, 2)?;
    let rest = rest.strip_prefix(':')?;
    let (second, mut rest) = take_digits(rest, 1, 2)?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    if let Some(fraction) = rest.strip_prefix('.') {
        let n = fraction.bytes().take_while(u8::is_ascii_digit).count();
        if n > 0 {
            rest = &fraction[n..];
        }
    }
    Some(rest)
}

fn is_zone(s: &str) -> bool {
    if s == "Z" {
        return true;
    }
    let Some(offset) = s.strip_prefix('+').or_else(|| s.strip_prefix('-')) else {
        return false;
    };
    let b = offset.as_bytes();
    b.len() == 5 && b[2] == b':' && [b[0], b[1], b[3], b[4]].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decimal;

    fn yaml(value: &Value) -> String {
        to_yaml_string(value, &EncodeOptions::default()).unwrap()
    }

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn scalar(s: &str) -> String {
        yaml(&Value::from(s))
    }

    #[test]
    fn test_flat_mapping_sorted() {
        let value = map(vec![
            ("name", Value::from("test")),
            ("enabled", Value::from(true)),
            ("count", Value::from(3)),
        ]);
        assert_eq!(yaml(&value), "count: 3\nenabled: true\nname: test\n");
    }

    #[test]
    fn test_nested_mapping_indent() {
        let value = map(vec![(
            "service",
            map(vec![("type", Value::from("ClusterIP")), ("port", Value::from(80))]),
        )]);
        assert_eq!(yaml(&value), "service:\n  port: 80\n  type: ClusterIP\n");

        let options = EncodeOptions::new().with_indent(4);
        assert_eq!(
            to_yaml_string(&value, &options).unwrap(),
            "service:\n    port: 80\n    type: ClusterIP\n"
        );
    }

    #[test]
    fn test_sequence_under_key_is_not_indented() {
        let value = map(vec![(
            "items",
            Value::List(vec![Value::from("item1"), Value::from("item2")]),
        )]);
        assert_eq!(yaml(&value), "items:\n- item1\n- item2\n");
    }

    #[test]
    fn test_mappings_inside_sequences() {
        let value = map(vec![(
            "ports",
            Value::List(vec![
                map(vec![("name", Value::from("http")), ("port", Value::from(80))]),
                map(vec![("name", Value::from("https")), ("port", Value::from(443))]),
            ]),
        )]);
        assert_eq!(
            yaml(&value),
            "ports:\n- name: http\n  port: 80\n- name: https\n  port: 443\n"
        );
    }

    #[test]
    fn test_sequences_inside_sequences() {
        let value = Value::List(vec![
            Value::List(vec![Value::from(1), Value::from(2)]),
            Value::from(3),
        ]);
        assert_eq!(yaml(&value), "- - 1\n  - 2\n- 3\n");
    }

    #[test]
    fn test_wider_indent_pads_after_dash() {
        let value = Value::List(vec![map(vec![
            ("a", Value::from(1)),
            ("b", map(vec![("c", Value::from(2))])),
        ])]);
        let options = EncodeOptions::new().with_indent(4);
        assert_eq!(
            to_yaml_string(&value, &options).unwrap(),
            "-   a: 1\n    b:\n        c: 2\n"
        );
    }

    #[test]
    fn test_empty_containers_use_flow_form() {
        let value = map(vec![
            ("a", Value::List(vec![])),
            ("b", Value::Mapping(Mapping::new())),
        ]);
        assert_eq!(yaml(&value), "a: []\nb: {}\n");
        assert_eq!(yaml(&Value::List(vec![])), "[]\n");
        assert_eq!(yaml(&Value::Absent), "null\n");
    }

    #[test]
    fn test_top_level_scalars() {
        assert_eq!(yaml(&Value::from(42)), "42\n");
        assert_eq!(yaml(&Value::from("hello")), "hello\n");
        assert_eq!(yaml(&Value::from(false)), "false\n");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-2.25), "-2.25");
        assert_eq!(format_float(123456.5), "123456.5");
        assert_eq!(format_float(1234567.0), "1.234567e+06");
        assert_eq!(format_float(1e21), "1e+21");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(1e100), "1e+100");
        assert_eq!(format_float(f64::INFINITY), ".inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-.inf");
        assert_eq!(format_float(f64::NAN), ".nan");
    }

    #[test]
    fn test_big_decimals_are_plain_numbers() {
        let d: Decimal = "0.1".parse().unwrap();
        assert_eq!(yaml(&Value::Number(Number::Big(d))), "0.1\n");
        let d: Decimal = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            yaml(&Value::Number(Number::Big(d))),
            "123456789012345678901234567890\n"
        );
    }

    #[test]
    fn test_strings_resolving_to_other_types_are_double_quoted() {
        for s in [
            "", "~", "null", "true", "False", "yes", "No", "on", "OFF", "y", "n", "123",
            "-42", "+7", "1_000", "0x1F", "0o17", "0b101", "0755", "3.14", ".5", "1e10",
            ".inf", "-.Inf", ".nan", "<<", "1:20", "2001-12-14", "2001-12-14 21:59:43.10",
            "2001-12-14t21:59:43.10-05:00",
        ] {
            assert_eq!(scalar(s), format!("\"{}\"\n", s), "input {:?}", s);
        }
    }

    #[test]
    fn test_strings_that_stay_plain() {
        for s in [
            "hello world", "ClusterIP", "nginx:1.25", "a-b", "-a", "a#b", "1.2.3",
            "12abc", "0x", "1e400", "2001-13-01", "2001-02-30", "2001-12-14T21:59:43",
            "foo:bar", "http://example.com", "don't", "a,b",
            "1:60", "é", "_1",
        ] {
            assert_eq!(scalar(s), format!("{}\n", s), "input {:?}", s);
        }
    }

    #[test]
    fn test_syntactically_unsafe_strings_are_single_quoted() {
        assert_eq!(scalar("# comment"), "'# comment'\n");
        assert_eq!(scalar("key: value"), "'key: value'\n");
        assert_eq!(scalar("trailing:"), "'trailing:'\n");
        assert_eq!(scalar("a #b"), "'a #b'\n");
        assert_eq!(scalar(" leading"), "' leading'\n");
        assert_eq!(scalar("trailing "), "'trailing '\n");
        assert_eq!(scalar("- item"), "'- item'\n");
        assert_eq!(scalar("-"), "'-'\n");
        assert_eq!(scalar("*alias"), "'*alias'\n");
        assert_eq!(scalar("{x}"), "'{x}'\n");
        assert_eq!(scalar("---"), "'---'\n");
        assert_eq!(scalar("...x"), "'...x'\n");
        assert_eq!(scalar("'quoted'"), "'''quoted'''\n");
        assert_eq!(scalar("\"dq\""), "'\"dq\"'\n");
        assert_eq!(scalar("@home"), "'@home'\n");
    }

    #[test]
    fn test_non_printable_strings_are_escaped() {
        assert_eq!(scalar("a\tb"), "\"a\\tb\"\n");
        assert_eq!(scalar("bell\u{07}"), "\"bell\\a\"\n");
        assert_eq!(scalar("nul\0"), "\"nul\\0\"\n");
        assert_eq!(scalar("\u{1F}"), "\"\\x1F\"\n");
        assert_eq!(scalar("line\u{2028}sep"), "\"line\\Lsep\"\n");
        assert_eq!(scalar("\u{FEFF}bom"), "\"\\uFEFFbom\"\n");
        assert_eq!(scalar("smile \u{1F600}"), "\"smile \\U0001F600\"\n");
        assert_eq!(scalar("a\r\nb"), "\"a\\r\\nb\"\n");
    }

    #[test]
    fn test_multi_line_strings_use_literal_blocks() {
        let value = map(vec![("script", Value::from("echo a\necho b"))]);
        assert_eq!(yaml(&value), "script: |-\n  echo a\n  echo b\n");

        let value = map(vec![("script", Value::from("echo a\n"))]);
        assert_eq!(yaml(&value), "script: |\n  echo a\n");

        let value = map(vec![("script", Value::from("a\n\nb\n"))]);
        assert_eq!(yaml(&value), "script: |\n  a\n\n  b\n");

        let value = map(vec![("script", Value::from("  indented\nnext"))]);
        assert_eq!(yaml(&value), "script: |2-\n    indented\n  next\n");
    }

    #[test]
    fn test_literal_keep_chomping_ends_document() {
        let value = map(vec![("a", Value::from("x\n\n"))]);
        assert_eq!(yaml(&value), "a: |+\n  x\n\n...\n");

        let value = map(vec![("a", Value::from("x\n\n")), ("b", Value::from(1))]);
        assert_eq!(yaml(&value), "a: |+\n  x\n\nb: 1\n");
    }

    #[test]
    fn test_literal_inside_sequences_and_nested_mappings() {
        let value = map(vec![(
            "outer",
            map(vec![(
                "cmds",
                Value::List(vec![Value::from("one\ntwo"), Value::from("three")]),
            )]),
        )]);
        assert_eq!(
            yaml(&value),
            "outer:\n  cmds:\n  - |-\n    one\n    two\n  - three\n"
        );
    }

    #[test]
    fn test_multi_line_strings_literal_cannot_hold_are_double_quoted() {
        assert_eq!(scalar("trailing \nspace"), "\"trailing \\nspace\"\n");
        assert_eq!(scalar("ends with space\nx "), "\"ends with space\\nx \"\n");
        assert_eq!(scalar("tab\n\there"), "\"tab\\n\\there\"\n");
    }

    #[test]
    fn test_key_quoting() {
        let value = map(vec![
            ("true", Value::from(1)),
            ("a: b", Value::from(3)),
            ("app.kubernetes.io/name", Value::from(4)),
            ("y", Value::from(5)),
        ]);
        assert_eq!(
            yaml(&value),
            "'a: b': 3\napp.kubernetes.io/name: 4\n\"true\": 1\n\"y\": 5\n"
        );
    }

    #[test]
    fn test_multi_line_keys_are_explicit() {
        let value = map(vec![("two\nlines", Value::from(2))]);
        assert_eq!(yaml(&value), "? |-\n  two\n  lines\n: 2\n");

        let value = map(vec![("x\n", map(vec![("a", Value::from(1)), ("b", Value::from(2))]))]);
        assert_eq!(yaml(&value), "? |\n  x\n: a: 1\n  b: 2\n");

        let value = map(vec![("trailing \nspace", Value::List(vec![Value::from(1), Value::from(2)]))]);
        assert_eq!(yaml(&value), "? \"trailing \\nspace\"\n: - 1\n  - 2\n");
    }

    #[test]
    fn test_long_keys_are_explicit() {
        let long = "k".repeat(129);
        let value = map(vec![(long.as_str(), Value::from(1))]);
        assert_eq!(yaml(&value), format!("? {}\n: 1\n", long));

        let limit = "k".repeat(128);
        let value = map(vec![(limit.as_str(), Value::from(1))]);
        assert_eq!(yaml(&value), format!("{}: 1\n", limit));

        // counted in bytes
        let wide = "é".repeat(65);
        let value = map(vec![(wide.as_str(), Value::from(1))]);
        assert_eq!(yaml(&value), format!("? {}\n: 1\n", wide));
    }

    #[test]
    fn test_explicit_keys_inside_sequences_and_nested_mappings() {
        let value = Value::List(vec![map(vec![
            ("a\nb", Value::from("v")),
            ("c", Value::from(1)),
        ])]);
        assert_eq!(yaml(&value), "- ? |-\n    a\n    b\n  : v\n  c: 1\n");

        let value = map(vec![("outer", map(vec![("k\nk", Value::from(true))]))]);
        assert_eq!(yaml(&value), "outer:\n  ? |-\n    k\n    k\n  : true\n");
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::from(1);
        for _ in 0..3 {
            value = Value::List(vec![value]);
        }
        let options = EncodeOptions::new().with_max_depth(2);
        assert!(matches!(
            to_yaml_string(&value, &options),
            Err(Error::TooDeep { limit: 2, .. })
        ));
        let options = EncodeOptions::new().with_max_depth(3);
        assert_eq!(to_yaml_string(&value, &options).unwrap(), "- - - 1\n");
    }

    #[test]
    fn test_chomping() {
        assert_eq!(chomping("a"), Chomping::Strip);
        assert_eq!(chomping("a\n"), Chomping::Clip);
        assert_eq!(chomping("a\n\n"), Chomping::Keep);
        assert_eq!(chomping("\n"), Chomping::Keep);
    }

    #[test]
    fn test_integer_ranges() {
        assert!(is_integer("18446744073709551615"));
        assert!(!is_integer("18446744073709551616"));
        assert!(is_integer("-9223372036854775808"));
        assert!(!is_integer("+9223372036854775808"));
        assert!(!is_integer("0x"));
        assert!(!is_integer("0x+1"));
        assert!(!is_integer("089"));
    }
}
