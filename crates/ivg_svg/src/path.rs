//! SVG path data interpretation
//!
//! Walks the `d` attribute of one path and drives an [`EncoderSink`] with
//! the normalized commands. A command letter stays in effect for following
//! argument groups until the next letter, so `L1 2 3 4` draws two lines.

use ivg_encoder::{EncoderSink, Point, Position, Segment};

use crate::error::SvgError;
use crate::geometry::{Axes, Normalizer};

/// Supported path commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    MoveTo,
    LineTo,
    SmoothQuadTo,
    QuadTo,
    SmoothCubicTo,
    CubicTo,
    HorizontalLineTo,
    VerticalLineTo,
    ClosePath,
}

impl Command {
    fn from_letter(letter: u8) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            b'M' => Command::MoveTo,
            b'L' => Command::LineTo,
            b'T' => Command::SmoothQuadTo,
            b'Q' => Command::QuadTo,
            b'S' => Command::SmoothCubicTo,
            b'C' => Command::CubicTo,
            b'H' => Command::HorizontalLineTo,
            b'V' => Command::VerticalLineTo,
            b'Z' => Command::ClosePath,
            _ => return None,
        })
    }

    fn arg_count(self) -> usize {
        match self {
            Command::ClosePath => 0,
            Command::HorizontalLineTo | Command::VerticalLineTo => 1,
            Command::MoveTo | Command::LineTo | Command::SmoothQuadTo => 2,
            Command::QuadTo | Command::SmoothCubicTo => 4,
            Command::CubicTo => 6,
        }
    }

    fn axes(self) -> Axes {
        match self {
            Command::HorizontalLineTo => Axes::X,
            Command::VerticalLineTo => Axes::Y,
            _ => Axes::Alternating,
        }
    }
}

/// The command currently in effect
#[derive(Clone, Copy, Debug)]
struct Cursor {
    command: Command,
    relative: bool,
}

/// Byte scanner over path data
struct Scanner<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a str) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace() || b == b',') {
            self.pos += 1;
        }
    }

    /// The character at the current position
    fn current_char(&self) -> char {
        self.data[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Consume the longest prefix matching
    /// `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?`
    fn number_token(&mut self) -> (&'a str, usize) {
        let bytes = self.data.as_bytes();
        let digits_from = |mut i: usize| {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            i
        };

        let start = self.pos;
        let mut i = start;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        i = digits_from(i);
        if bytes.get(i) == Some(&b'.') {
            i = digits_from(i + 1);
        }
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(bytes.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            if bytes.get(j).is_some_and(u8::is_ascii_digit) {
                i = digits_from(j);
            }
        }

        self.pos = i;
        (&self.data[start..i], start)
    }
}

/// Interpret one path's data, emitting its operations into `sink`
///
/// The first absolute move opens the path with fill adjustment `adj`;
/// later absolute moves close the current subpath and start another.
/// Relative moves always close the current subpath, even when nothing has
/// been opened yet, in which case the sink rejects them.
pub(crate) fn interpret<S: EncoderSink + ?Sized>(
    sink: &mut S,
    data: &str,
    adj: u8,
    normalizer: &Normalizer,
    path: usize,
) -> Result<(), SvgError> {
    let data = data.trim_end();
    let data = data
        .strip_suffix(|c: char| c == 'z' || c == 'Z')
        .unwrap_or(data);

    let mut scanner = Scanner::new(data);
    let mut cursor: Option<Cursor> = None;
    let mut started = false;
    let mut args = [0f32; 6];

    loop {
        scanner.skip_separators();
        let Some(byte) = scanner.peek() else {
            break;
        };

        if byte.is_ascii_alphabetic() {
            let command = Command::from_letter(byte).ok_or_else(|| SvgError::UnknownOpcode {
                path,
                opcode: byte as char,
                offset: scanner.pos,
            })?;
            scanner.pos += 1;
            cursor = Some(Cursor {
                command,
                relative: byte.is_ascii_lowercase(),
            });
            if command == Command::ClosePath {
                continue;
            }
        }

        let Some(Cursor { command, relative }) = cursor else {
            return Err(SvgError::UnknownOpcode {
                path,
                opcode: scanner.current_char(),
                offset: scanner.pos,
            });
        };

        let n = command.arg_count();
        if n == 0 {
            // Numbers after a close command have nothing to belong to
            let (token, offset) = scanner.number_token();
            let token = if token.is_empty() {
                scanner.current_char().to_string()
            } else {
                token.to_string()
            };
            return Err(SvgError::MalformedNumber {
                path,
                token,
                offset,
                source: None,
            });
        }

        for arg in &mut args[..n] {
            scanner.skip_separators();
            let (token, offset) = scanner.number_token();
            *arg = token.parse().map_err(|e| SvgError::MalformedNumber {
                path,
                token: token.to_string(),
                offset,
                source: Some(e),
            })?;
        }
        normalizer.normalize(&mut args[..n], command.axes(), relative);

        let position = if relative {
            Position::Relative
        } else {
            Position::Absolute
        };
        let point = |i: usize| Point::new(args[i], args[i + 1]);
        let result = match command {
            Command::MoveTo if relative => {
                sink.close_path_move_to(Position::Relative, args[0], args[1])
            }
            Command::MoveTo if !started => {
                started = true;
                sink.start_path(adj, args[0], args[1])
            }
            Command::MoveTo => sink.close_path_move_to(Position::Absolute, args[0], args[1]),
            Command::LineTo => sink.draw(position, Segment::LineTo(point(0))),
            Command::SmoothQuadTo => sink.draw(position, Segment::SmoothQuadTo(point(0))),
            Command::QuadTo => sink.draw(
                position,
                Segment::QuadTo {
                    control: point(0),
                    end: point(2),
                },
            ),
            Command::SmoothCubicTo => sink.draw(
                position,
                Segment::SmoothCubeTo {
                    control2: point(0),
                    end: point(2),
                },
            ),
            Command::CubicTo => sink.draw(
                position,
                Segment::CubeTo {
                    control1: point(0),
                    control2: point(2),
                    end: point(4),
                },
            ),
            Command::HorizontalLineTo => sink.draw(position, Segment::HLineTo(args[0])),
            Command::VerticalLineTo => sink.draw(position, Segment::VLineTo(args[0])),
            Command::ClosePath => Ok(()),
        };
        result.map_err(|source| SvgError::PathEncode { path, source })?;
    }

    Ok(())
}
