//! Line-oriented batch interpreter.
//!
//! Reads a command stream: one creation command `B width height players
//! areas`, then per-line commands driving a single [`Board`]. Blank lines
//! and lines starting with `#` are ignored; anything malformed is reported
//! as `ERROR <line>` on the diagnostic stream, with lines counted from 1.
//!
//! Commands after creation:
//! - `m player x y` - ordinary move, prints `1` or `0`
//! - `g player x y` - golden move, prints `1` or `0`
//! - `b player` - number of cells the player occupies
//! - `f player` - number of cells the player could still take
//! - `q player` - whether a golden move is still possible, `1` or `0`
//! - `p` - print the rendered board

use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::game::{Board, Coord};

/// Output format for interpreter replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Bare values, one per line, as in the classic protocol.
    Text,
    /// One JSON object per executed command.
    Json,
}

/// A single interpreter reply in JSON mode.
#[derive(Debug, Serialize)]
struct Reply<'a> {
    /// 1-based input line the reply answers.
    line: u64,
    /// Command letter.
    command: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<&'a str>,
}

impl<'a> Reply<'a> {
    const fn flag(line: u64, command: char, ok: bool) -> Self {
        Self {
            line,
            command,
            ok: Some(ok),
            count: None,
            board: None,
        }
    }

    const fn count(line: u64, command: char, count: u64) -> Self {
        Self {
            line,
            command,
            ok: None,
            count: Some(count),
            board: None,
        }
    }

    const fn board(line: u64, command: char, board: &'a str) -> Self {
        Self {
            line,
            command,
            ok: None,
            count: None,
            board: Some(board),
        }
    }
}

/// Result of tokenizing one input line.
#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    /// Blank line or comment; consumes a line number but produces nothing.
    Skip,
    /// Malformed in any way.
    Invalid,
    /// A command letter with its numeric parameters.
    Command {
        /// Command letter (first byte of the line).
        op: u8,
        /// Whitespace-separated base-10 parameters, each fitting a `u32`.
        args: Vec<u32>,
    },
}

/// Whitespace bytes separating parameters (space, tab, VT, FF, CR).
const fn is_blank(byte: u8) -> bool {
    byte == b' ' || (byte >= b'\t' && byte <= b'\r')
}

/// Tokenize one line (without its terminating newline).
///
/// `terminated` is false for a final line cut off by end of input, which
/// the protocol rejects for commands but tolerates for comments.
fn parse_line(line: &[u8], terminated: bool) -> Parsed {
    let Some(&op) = line.first() else {
        return Parsed::Skip;
    };
    if op == b'#' {
        return Parsed::Skip;
    }
    if !terminated {
        return Parsed::Invalid;
    }

    let rest = &line[1..];
    // The command letter must be followed by whitespace, never glued to
    // its first parameter.
    if let Some(&next) = rest.first()
        && !is_blank(next)
    {
        return Parsed::Invalid;
    }

    let mut args = Vec::new();
    for token in rest.split(|b| is_blank(*b)).filter(|t| !t.is_empty()) {
        let mut value = 0u64;
        for &byte in token {
            if !byte.is_ascii_digit() {
                return Parsed::Invalid;
            }
            value = value * 10 + u64::from(byte - b'0');
            if value > u64::from(u32::MAX) {
                return Parsed::Invalid;
            }
        }
        let Ok(small) = u32::try_from(value) else {
            return Parsed::Invalid;
        };
        args.push(small);
    }
    Parsed::Command { op, args }
}

/// Run the interpreter over `input`, writing replies to `out` and
/// `ERROR <line>` diagnostics to `err`.
///
/// Returns once the input is exhausted; a stream in which no creation
/// command ever succeeds simply diagnoses every effective line.
///
/// # Errors
///
/// Returns an error when reading the input or writing either output fails.
pub fn run<R, W, E>(mut input: R, mut out: W, mut err: E, format: Format) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut board: Option<Board> = None;
    let mut line_no: u64 = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return out.flush();
        }
        line_no += 1;
        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
        }

        match parse_line(&buf, terminated) {
            Parsed::Skip => {}
            Parsed::Invalid => writeln!(err, "ERROR {line_no}")?,
            Parsed::Command { op, args } => {
                let handled = match &mut board {
                    None => create(&mut board, op, &args, line_no, &mut out, format)?,
                    Some(current) => command(current, op, &args, line_no, &mut out, format)?,
                };
                if !handled {
                    writeln!(err, "ERROR {line_no}")?;
                }
            }
        }
    }
}

/// Handle a line in the creation phase. Returns whether it was accepted.
fn create<W: Write>(
    board: &mut Option<Board>,
    op: u8,
    args: &[u32],
    line_no: u64,
    out: &mut W,
    format: Format,
) -> io::Result<bool> {
    if op != b'B' || args.len() != 4 {
        return Ok(false);
    }
    let Some(created) = Board::new(args[0], args[1], args[2], args[3]) else {
        return Ok(false);
    };
    *board = Some(created);
    match format {
        Format::Text => writeln!(out, "OK {line_no}")?,
        Format::Json => write_reply(out, &Reply::flag(line_no, 'B', true))?,
    }
    Ok(true)
}

/// Handle a line in the command phase. Returns whether it was well-formed.
fn command<W: Write>(
    board: &mut Board,
    op: u8,
    args: &[u32],
    line_no: u64,
    out: &mut W,
    format: Format,
) -> io::Result<bool> {
    match (op, args) {
        (b'm', &[player, x, y]) => {
            let ok = board.place(player, Coord::new(x, y));
            write_flag(out, line_no, 'm', ok, format)
        }
        (b'g', &[player, x, y]) => {
            let ok = board.golden_move(player, Coord::new(x, y));
            write_flag(out, line_no, 'g', ok, format)
        }
        (b'b', &[player]) => write_count(out, line_no, 'b', board.occupied_fields(player), format),
        (b'f', &[player]) => write_count(out, line_no, 'f', board.free_fields(player), format),
        (b'q', &[player]) => write_flag(out, line_no, 'q', board.golden_possible(player), format),
        (b'p', &[]) => {
            let rendered = board.render();
            match format {
                Format::Text => write!(out, "{rendered}")?,
                Format::Json => write_reply(out, &Reply::board(line_no, 'p', &rendered))?,
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn write_flag<W: Write>(
    out: &mut W,
    line_no: u64,
    command: char,
    ok: bool,
    format: Format,
) -> io::Result<bool> {
    match format {
        Format::Text => writeln!(out, "{}", u8::from(ok))?,
        Format::Json => write_reply(out, &Reply::flag(line_no, command, ok))?,
    }
    Ok(true)
}

fn write_count<W: Write>(
    out: &mut W,
    line_no: u64,
    command: char,
    count: u64,
    format: Format,
) -> io::Result<bool> {
    match format {
        Format::Text => writeln!(out, "{count}")?,
        Format::Json => write_reply(out, &Reply::count(line_no, command, count))?,
    }
    Ok(true)
}

fn write_reply<W: Write>(out: &mut W, reply: &Reply<'_>) -> io::Result<()> {
    let json = serde_json::to_string(reply).map_err(io::Error::other)?;
    writeln!(out, "{json}")
}
