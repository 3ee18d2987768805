use crate::{
    foundation::core::Point,
    foundation::error::{RemnantError, RemnantResult},
    path::{
        command::{Command, PathOutline},
        lexer::{NumberToken, Sequence, lex},
    },
};

/// Parse a path-command string (`M`, `L`, `H`, `V`, `C`, `Z`; absolute coordinates, letters
/// case-insensitive) into a [`PathOutline`].
///
/// Coordinates are truncated toward zero. A command may carry several argument groups, which
/// repeat it (extra pairs after `M` are lines, as in SVG). `Z` becomes a line back to the
/// start of the current subpath.
pub fn parse_outline(d: &str) -> RemnantResult<PathOutline> {
    let sequences = lex(d)?;
    if sequences.is_empty() {
        return Err(RemnantError::path_syntax(0, "path has no commands"));
    }

    let mut commands = Vec::with_capacity(sequences.len());
    let mut raw: Vec<i32> = Vec::new();
    let mut cursor = Point::default();
    let mut first = Point::default();

    for seq in &sequences {
        let arity = arity(seq.code);
        check_arity(seq, arity)?;

        if seq.code == 'Z' {
            commands.push(Command::Line { d: first });
            raw.extend([first.x, first.y]);
            cursor = first;
            continue;
        }

        for (group_i, group) in seq.numbers.chunks(arity).enumerate() {
            let n: Vec<i32> = group.iter().map(truncate).collect();
            raw.extend_from_slice(&n);

            let cmd = match seq.code {
                'M' if group_i == 0 => {
                    let d = Point::new(n[0], n[1]);
                    first = d;
                    Command::Move { d }
                }
                'M' | 'L' => Command::Line {
                    d: Point::new(n[0], n[1]),
                },
                'H' => Command::HLine {
                    d: Point::new(n[0], cursor.y),
                },
                'V' => Command::VLine {
                    d: Point::new(cursor.x, n[0]),
                },
                'C' => Command::Curve {
                    d1: Point::new(n[0], n[1]),
                    d2: Point::new(n[2], n[3]),
                    d: Point::new(n[4], n[5]),
                },
                other => {
                    return Err(RemnantError::path_syntax(
                        seq.offset,
                        format!("unsupported command '{other}'"),
                    ));
                }
            };
            cursor = cmd.destination();
            commands.push(cmd);
        }
    }

    Ok(PathOutline {
        commands,
        is_closed: endpoints_coincide(&raw),
    })
}

fn arity(code: char) -> usize {
    match code {
        'H' | 'V' => 1,
        'M' | 'L' => 2,
        'C' => 6,
        _ => 0,
    }
}

fn check_arity(seq: &Sequence, arity: usize) -> RemnantResult<()> {
    let count = seq.numbers.len();
    if arity == 0 {
        if let Some(extra) = seq.numbers.first() {
            return Err(RemnantError::path_syntax(
                extra.offset,
                format!("'{}' takes no numbers", seq.code),
            ));
        }
        return Ok(());
    }
    if count == 0 || count % arity != 0 {
        return Err(RemnantError::path_syntax(
            seq.offset,
            format!(
                "'{}' expects a multiple of {arity} numbers, got {count}",
                seq.code
            ),
        ));
    }
    Ok(())
}

fn truncate(tok: &NumberToken) -> i32 {
    // Saturating float-to-int cast; the lexer already rejected non-finite values.
    tok.value.trunc() as i32
}

/// Compares the first and last coordinate pairs of the raw number stream.
fn endpoints_coincide(raw: &[i32]) -> bool {
    match (raw, raw.len()) {
        ([x0, y0, ..], n) if n >= 4 => *x0 == raw[n - 2] && *y0 == raw[n - 1],
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/parser.rs"]
mod tests;
