use crate::foundation::error::{RemnantError, RemnantResult};

/// A numeric token and the byte offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumberToken {
    pub(crate) value: f64,
    pub(crate) offset: usize,
}

/// One command letter followed by its numeric payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sequence {
    /// Uppercased command letter.
    pub(crate) code: char,
    pub(crate) offset: usize,
    pub(crate) numbers: Vec<NumberToken>,
}

/// Split a path-command string into command sequences.
///
/// Whitespace and commas separate numbers. A sign or a second decimal point also starts a new
/// number (`10-5` is two numbers, `1.5.5` is `1.5` and `.5`).
pub(crate) fn lex(input: &str) -> RemnantResult<Vec<Sequence>> {
    let mut out: Vec<Sequence> = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let code = c.to_ascii_uppercase();
            if !matches!(code, 'M' | 'L' | 'H' | 'V' | 'C' | 'Z') {
                return Err(RemnantError::path_syntax(
                    i,
                    format!("unsupported command '{c}'"),
                ));
            }
            out.push(Sequence {
                code,
                offset: i,
                numbers: Vec::new(),
            });
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') {
            let start = i;
            let end = scan_number(bytes, i)?;
            let text = &input[start..end];
            let value: f64 = text
                .parse()
                .map_err(|_| RemnantError::path_syntax(start, format!("invalid number '{text}'")))?;
            if !value.is_finite() {
                return Err(RemnantError::path_syntax(
                    start,
                    format!("number out of range '{text}'"),
                ));
            }
            let Some(seq) = out.last_mut() else {
                return Err(RemnantError::path_syntax(
                    start,
                    "expected a command before the first number",
                ));
            };
            seq.numbers.push(NumberToken {
                value,
                offset: start,
            });
            i = end;
            continue;
        }

        return Err(RemnantError::path_syntax(
            i,
            format!("unexpected character '{c}'"),
        ));
    }

    Ok(out)
}

// [+-]? (digits (.digits?)? | .digits) ([eE][+-]?digits)?
fn scan_number(bytes: &[u8], start: usize) -> RemnantResult<usize> {
    let digit_at = |j: usize| j < bytes.len() && bytes[j].is_ascii_digit();
    let mut i = start;
    if matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }

    let int_start = i;
    while digit_at(i) {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while digit_at(i) {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return Err(RemnantError::path_syntax(start, "expected digits"));
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let e_pos = i;
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while digit_at(j) {
            j += 1;
        }
        if exp_start == j {
            return Err(RemnantError::path_syntax(
                e_pos,
                "invalid number exponent (expected digits)",
            ));
        }
        i = j;
    }

    Ok(i)
}

#[cfg(test)]
#[path = "../../tests/unit/path/lexer.rs"]
mod tests;
