//! Typed SVG path commands.
//!
//! A [`Command`] is one of the ten SVG path command kinds, an absolute/relative
//! flag and the fixed number of arguments that kind expects. The arity is checked
//! once, when the command is constructed, so that the approximator can index the
//! arguments without further validation.

use crate::geom::ArcFlags;
use arrayvec::ArrayVec;
use core::fmt;
use thiserror::Error;

/// Largest number of arguments a command can have (`ArcTo`).
pub const MAX_ARITY: usize = 7;

/// The argument storage of a command.
pub type Arguments = ArrayVec<f64, MAX_ARITY>;

/// The ten kinds of SVG path commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CubicCurveTo,
    SmoothCubicCurveTo,
    QuadraticCurveTo,
    SmoothQuadraticCurveTo,
    ArcTo,
    ClosePath,
}

impl CommandKind {
    pub const ALL: [CommandKind; 10] = [
        CommandKind::MoveTo,
        CommandKind::LineTo,
        CommandKind::HorizontalLineTo,
        CommandKind::VerticalLineTo,
        CommandKind::CubicCurveTo,
        CommandKind::SmoothCubicCurveTo,
        CommandKind::QuadraticCurveTo,
        CommandKind::SmoothQuadraticCurveTo,
        CommandKind::ArcTo,
        CommandKind::ClosePath,
    ];

    /// Looks up a command letter. Returns the kind and whether the letter is the
    /// relative (lower case) variant.
    pub fn from_letter(letter: char) -> Option<(CommandKind, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalLineTo,
            'V' => CommandKind::VerticalLineTo,
            'C' => CommandKind::CubicCurveTo,
            'S' => CommandKind::SmoothCubicCurveTo,
            'Q' => CommandKind::QuadraticCurveTo,
            'T' => CommandKind::SmoothQuadraticCurveTo,
            'A' => CommandKind::ArcTo,
            'Z' => CommandKind::ClosePath,
            _ => {
                return None;
            }
        };

        Some((kind, letter.is_ascii_lowercase()))
    }

    /// The SVG letter of this command kind.
    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HorizontalLineTo => 'H',
            CommandKind::VerticalLineTo => 'V',
            CommandKind::CubicCurveTo => 'C',
            CommandKind::SmoothCubicCurveTo => 'S',
            CommandKind::QuadraticCurveTo => 'Q',
            CommandKind::SmoothQuadraticCurveTo => 'T',
            CommandKind::ArcTo => 'A',
            CommandKind::ClosePath => 'Z',
        };

        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }

    /// Number of arguments of one occurrence of the command.
    pub const fn arity(self) -> usize {
        match self {
            CommandKind::MoveTo => 2,
            CommandKind::LineTo => 2,
            CommandKind::HorizontalLineTo => 1,
            CommandKind::VerticalLineTo => 1,
            CommandKind::CubicCurveTo => 6,
            CommandKind::SmoothCubicCurveTo => 4,
            CommandKind::QuadraticCurveTo => 4,
            CommandKind::SmoothQuadraticCurveTo => 2,
            CommandKind::ArcTo => 7,
            CommandKind::ClosePath => 0,
        }
    }

    /// `C` and `S`.
    pub fn is_cubic(self) -> bool {
        matches!(
            self,
            CommandKind::CubicCurveTo | CommandKind::SmoothCubicCurveTo
        )
    }

    /// `Q` and `T`.
    pub fn is_quadratic(self) -> bool {
        matches!(
            self,
            CommandKind::QuadraticCurveTo | CommandKind::SmoothQuadraticCurveTo
        )
    }
}

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CommandError {
    #[error("{kind:?} expects {expected} arguments, got {found}.")]
    Arity {
        kind: CommandKind,
        expected: usize,
        found: usize,
    },
}

/// A single path command with its arguments.
///
/// Arguments are stored in SVG order. For `ArcTo` they are
/// `rx, ry, x-axis-rotation (degrees), large-arc-flag, sweep-flag, x, y`, flags being
/// `0.0` or `1.0`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Command {
    kind: CommandKind,
    relative: bool,
    implicit: bool,
    args: Arguments,
}

impl Command {
    /// Creates a command, checking that the number of arguments matches the kind.
    pub fn new(kind: CommandKind, relative: bool, args: &[f64]) -> Result<Self, CommandError> {
        let arity_error = CommandError::Arity {
            kind,
            expected: kind.arity(),
            found: args.len(),
        };

        if args.len() != kind.arity() {
            return Err(arity_error);
        }

        let mut values = Arguments::new();
        values
            .try_extend_from_slice(args)
            .map_err(|_| arity_error)?;

        Ok(Command {
            kind,
            relative,
            implicit: false,
            args: values,
        })
    }

    fn absolute<const N: usize>(kind: CommandKind, args: [f64; N]) -> Self {
        debug_assert_eq!(N, kind.arity());
        Command {
            kind,
            relative: false,
            implicit: false,
            args: args.iter().copied().collect(),
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Command::absolute(CommandKind::MoveTo, [x, y])
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Command::absolute(CommandKind::LineTo, [x, y])
    }

    pub fn horizontal_line_to(x: f64) -> Self {
        Command::absolute(CommandKind::HorizontalLineTo, [x])
    }

    pub fn vertical_line_to(y: f64) -> Self {
        Command::absolute(CommandKind::VerticalLineTo, [y])
    }

    pub fn cubic_curve_to(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Command::absolute(CommandKind::CubicCurveTo, [x1, y1, x2, y2, x, y])
    }

    pub fn smooth_cubic_curve_to(x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Command::absolute(CommandKind::SmoothCubicCurveTo, [x2, y2, x, y])
    }

    pub fn quadratic_curve_to(x1: f64, y1: f64, x: f64, y: f64) -> Self {
        Command::absolute(CommandKind::QuadraticCurveTo, [x1, y1, x, y])
    }

    pub fn smooth_quadratic_curve_to(x: f64, y: f64) -> Self {
        Command::absolute(CommandKind::SmoothQuadraticCurveTo, [x, y])
    }

    /// `x_rotation` is in degrees, as in SVG path data.
    pub fn arc_to(rx: f64, ry: f64, x_rotation: f64, flags: ArcFlags, x: f64, y: f64) -> Self {
        let large_arc = if flags.large_arc { 1.0 } else { 0.0 };
        let sweep = if flags.sweep { 1.0 } else { 0.0 };
        Command::absolute(
            CommandKind::ArcTo,
            [rx, ry, x_rotation, large_arc, sweep, x, y],
        )
    }

    pub fn close() -> Self {
        Command::absolute(CommandKind::ClosePath, [])
    }

    /// Turns the command into its relative variant.
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    /// Marks the command as an implicit repetition of the previous command letter.
    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    #[inline]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Whether the command was written without its letter, repeating the previous one.
    ///
    /// This matters for `MoveTo`: a repeated move-to continues the subpath like a
    /// line-to would.
    #[inline]
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    #[inline]
    pub fn args(&self) -> &[f64] {
        &self.args
    }

    /// The SVG letter of the command.
    pub fn letter(&self) -> char {
        self.kind.letter(self.relative)
    }

    /// The flags of an `ArcTo` command, `None` for other kinds.
    pub fn arc_flags(&self) -> Option<ArcFlags> {
        match self.kind {
            CommandKind::ArcTo => Some(ArcFlags {
                large_arc: self.args[3] != 0.0,
                sweep: self.args[4] != 0.0,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }

        Ok(())
    }
}

#[test]
fn arity_is_checked() {
    assert!(Command::new(CommandKind::LineTo, false, &[1.0, 2.0]).is_ok());
    assert_eq!(
        Command::new(CommandKind::ArcTo, true, &[1.0, 2.0, 3.0]),
        Err(CommandError::Arity {
            kind: CommandKind::ArcTo,
            expected: 7,
            found: 3,
        })
    );
    assert!(Command::new(CommandKind::ClosePath, false, &[1.0]).is_err());
    assert!(Command::new(CommandKind::ClosePath, false, &[]).is_ok());
}

#[test]
fn letters() {
    for kind in &CommandKind::ALL {
        for &relative in &[false, true] {
            let letter = kind.letter(relative);
            assert_eq!(CommandKind::from_letter(letter), Some((*kind, relative)));
        }
    }

    assert_eq!(CommandKind::from_letter('x'), None);
    assert_eq!(CommandKind::from_letter('B'), None);
}

#[test]
fn constructors_match_arity() {
    let commands = [
        Command::move_to(0.0, 0.0),
        Command::line_to(0.0, 0.0),
        Command::horizontal_line_to(0.0),
        Command::vertical_line_to(0.0),
        Command::cubic_curve_to(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        Command::smooth_cubic_curve_to(0.0, 0.0, 0.0, 0.0),
        Command::quadratic_curve_to(0.0, 0.0, 0.0, 0.0),
        Command::smooth_quadratic_curve_to(0.0, 0.0),
        Command::arc_to(1.0, 1.0, 0.0, ArcFlags::default(), 0.0, 0.0),
        Command::close(),
    ];

    for cmd in &commands {
        assert_eq!(cmd.args().len(), cmd.kind().arity());
    }
}

#[test]
fn display() {
    assert_eq!(Command::line_to(10.0, 20.5).to_string(), "L 10 20.5");
    assert_eq!(Command::close().relative().to_string(), "z");
    let arc = Command::arc_to(
        5.0,
        5.0,
        30.0,
        ArcFlags {
            large_arc: true,
            sweep: false,
        },
        1.0,
        2.0,
    );
    assert_eq!(arc.to_string(), "A 5 5 30 1 0 1 2");
    assert_eq!(
        arc.arc_flags(),
        Some(ArcFlags {
            large_arc: true,
            sweep: false
        })
    );
}
