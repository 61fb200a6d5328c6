//! SVG path data parser.
//!
//! The parser is forgiving in the way SVG renderers are: it stops at the first
//! error and keeps everything that was read before it, including the complete
//! argument groups of the command that failed.

use crate::path::{Command, CommandError, CommandKind};
use crate::source::{NumberError, Source};
use arrayvec::ArrayVec;
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Expected flag (0/1), got {src:?}.")]
    Flag { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Invalid command {command:?}.")]
    Command {
        command: char,
        line: i32,
        column: i32,
    },
    #[error(transparent)]
    Arguments(#[from] CommandError),
}

fn number_error(e: NumberError) -> ParseError {
    ParseError::Number {
        src: e.src,
        line: e.line,
        column: e.column,
    }
}

/// Parses path data, returning the commands read before the first error.
///
/// ```
/// use scanvas_svg::parse;
/// use scanvas_svg::path::CommandKind;
///
/// let commands = parse("M10,10 L30,30 C 5 z");
/// assert_eq!(commands.len(), 2);
/// assert_eq!(commands[1].kind(), CommandKind::LineTo);
/// ```
pub fn parse(d: &str) -> Vec<Command> {
    parse_with_error(d).0
}

/// Same as [`parse`], also reporting why parsing stopped early, if it did.
pub fn parse_with_error(d: &str) -> (Vec<Command>, Option<ParseError>) {
    let mut commands = Vec::new();
    let mut parser = PathParser::new(d);
    let error = parser.parse(&mut commands).err();

    if let Some(error) = &error {
        log::debug!(
            "path data truncated after {} commands: {}",
            commands.len(),
            error
        );
    }

    (commands, error)
}

struct PathParser<'l> {
    src: Source<'l>,
    float_buffer: String,
    args: ArrayVec<f64, 7>,
}

impl<'l> PathParser<'l> {
    fn new(d: &'l str) -> Self {
        PathParser {
            src: Source::new(d),
            float_buffer: String::new(),
            args: ArrayVec::new(),
        }
    }

    fn parse(&mut self, output: &mut Vec<Command>) -> Result<(), ParseError> {
        self.src.skip_whitespace();

        while let Some(letter) = self.src.current() {
            let (line, column) = self.src.position();
            let (kind, relative) =
                CommandKind::from_letter(letter).ok_or(ParseError::Command {
                    command: letter,
                    line,
                    column,
                })?;
            self.src.advance();

            if kind.arity() == 0 {
                output.push(Command::new(kind, relative, &[])?);
                self.src.skip_whitespace();
                continue;
            }

            // The letter is followed by one or more argument groups, each producing
            // a command.
            let mut implicit = false;
            loop {
                self.parse_arguments(kind)?;

                let mut cmd = Command::new(kind, relative, &self.args)?;
                if implicit {
                    cmd = cmd.implicit();
                }
                output.push(cmd);
                implicit = true;

                self.src.skip_whitespace();
                if !self.src.at_number_start() {
                    break;
                }
            }
        }

        Ok(())
    }

    fn parse_arguments(&mut self, kind: CommandKind) -> Result<(), ParseError> {
        self.args.clear();
        for i in 0..kind.arity() {
            let is_flag = kind == CommandKind::ArcTo && (i == 3 || i == 4);
            let value = if is_flag {
                self.parse_flag()?
            } else {
                self.src
                    .number(&mut self.float_buffer)
                    .map_err(number_error)?
            };
            self.args.push(value);
        }

        Ok(())
    }

    // Flags are a single character, `a1 1 0 0110 10` is valid.
    fn parse_flag(&mut self) -> Result<f64, ParseError> {
        self.src.skip_whitespace();
        let value = match self.src.current() {
            Some('0') => 0.0,
            Some('1') => 1.0,
            other => {
                let (line, column) = self.src.position();
                return Err(ParseError::Flag {
                    src: other.map(String::from).unwrap_or_default(),
                    line,
                    column,
                });
            }
        };
        self.src.advance();

        Ok(value)
    }
}

#[cfg(test)]
fn kinds_and_args(commands: &[Command]) -> Vec<(char, Vec<f64>)> {
    commands
        .iter()
        .map(|cmd| (cmd.letter(), cmd.args().to_vec()))
        .collect()
}

#[test]
fn empty() {
    assert_eq!(parse_with_error(""), (Vec::new(), None));
    assert_eq!(parse_with_error("  \n\t"), (Vec::new(), None));
}

#[test]
fn simple_square() {
    let (commands, error) = parse_with_error("M 0 0 L 1 0 L 1 1 L 0 1 Z");
    assert_eq!(error, None);
    assert_eq!(
        kinds_and_args(&commands),
        vec![
            ('M', vec![0.0, 0.0]),
            ('L', vec![1.0, 0.0]),
            ('L', vec![1.0, 1.0]),
            ('L', vec![0.0, 1.0]),
            ('Z', vec![]),
        ]
    );
}

#[test]
fn truncated_at_malformed_command() {
    let (commands, error) = parse_with_error("M10,10 L30,30 C 5 z");
    assert_eq!(
        commands,
        vec![Command::move_to(10.0, 10.0), Command::line_to(30.0, 30.0)]
    );
    assert_eq!(
        error,
        Some(ParseError::Number {
            src: "z".to_string(),
            line: 1,
            column: 19,
        })
    );
}

#[test]
fn implicit_repeat() {
    let commands = parse("L10,10 20,20");
    assert_eq!(
        kinds_and_args(&commands),
        vec![('L', vec![10.0, 10.0]), ('L', vec![20.0, 20.0])]
    );
    assert!(!commands[0].is_implicit());
    assert!(commands[1].is_implicit());
}

#[test]
fn implicit_move_to() {
    let commands = parse("m 1 2 3 4 5 6");
    assert_eq!(
        kinds_and_args(&commands),
        vec![
            ('m', vec![1.0, 2.0]),
            ('m', vec![3.0, 4.0]),
            ('m', vec![5.0, 6.0]),
        ]
    );
    assert!(commands[1].is_implicit() && commands[2].is_implicit());
}

#[test]
fn complete_groups_are_kept() {
    let (commands, error) = parse_with_error("M 0 0 L 1 1 2 2 3");
    assert_eq!(
        kinds_and_args(&commands),
        vec![
            ('M', vec![0.0, 0.0]),
            ('L', vec![1.0, 1.0]),
            ('L', vec![2.0, 2.0]),
        ]
    );
    assert!(matches!(error, Some(ParseError::Number { .. })));
}

#[test]
fn command_without_arguments() {
    let (commands, error) = parse_with_error("M 0 0 L Z");
    assert_eq!(commands, vec![Command::move_to(0.0, 0.0)]);
    assert!(matches!(error, Some(ParseError::Number { .. })));
}

#[test]
fn invalid_command() {
    let (commands, error) = parse_with_error("M 0 0 X 1 1");
    assert_eq!(commands.len(), 1);
    assert_eq!(
        error,
        Some(ParseError::Command {
            command: 'X',
            line: 1,
            column: 7,
        })
    );

    // Path data must start with a command letter.
    let (commands, error) = parse_with_error("10 10");
    assert!(commands.is_empty());
    assert!(matches!(error, Some(ParseError::Command { command: '1', .. })));

    // Close-path takes no argument, numbers after it have no command.
    let (commands, error) = parse_with_error("M 0 0 L 1 0 z 5 5");
    assert_eq!(commands.len(), 3);
    assert!(matches!(error, Some(ParseError::Command { command: '5', .. })));
}

#[test]
fn compact_numbers() {
    let commands = parse("M0.6.5-1-.5L+1e1,2E-1");
    assert_eq!(
        kinds_and_args(&commands),
        vec![
            ('M', vec![0.6, 0.5]),
            ('M', vec![-1.0, -0.5]),
            ('L', vec![10.0, 0.2]),
        ]
    );
}

#[test]
fn arc_flags_without_separators() {
    let (commands, error) = parse_with_error("M0 0 a1 1 0 0110 10");
    assert_eq!(error, None);
    assert_eq!(
        kinds_and_args(&commands),
        vec![
            ('M', vec![0.0, 0.0]),
            ('a', vec![1.0, 1.0, 0.0, 0.0, 1.0, 10.0, 10.0]),
        ]
    );
}

#[test]
fn invalid_flag() {
    let (commands, error) = parse_with_error("M0 0 A 1 1 0 2 0 10 10");
    assert_eq!(commands.len(), 1);
    assert_eq!(
        error,
        Some(ParseError::Flag {
            src: "2".to_string(),
            line: 1,
            column: 14,
        })
    );
}

#[test]
fn all_commands() {
    let (commands, error) = parse_with_error(
        "M 1 2 L 3 4 H 5 V 6 C 1 2 3 4 5 6 S 1 2 3 4 Q 1 2 3 4 T 1 2 A 1 1 0 1 0 1 2 Z
         m 1 2 l 3 4 h 5 v 6 c 1 2 3 4 5 6 s 1 2 3 4 q 1 2 3 4 t 1 2 a 1 1 0 1 0 1 2 z",
    );
    assert_eq!(error, None);

    let letters: String = commands.iter().map(|cmd| cmd.letter()).collect();
    assert_eq!(letters, "MLHVCSQTAZmlhvcsqtaz");
    for cmd in &commands {
        assert_eq!(cmd.args().len(), cmd.kind().arity());
        assert!(!cmd.is_implicit());
    }
}

#[test]
fn error_position_on_second_line() {
    let (_, error) = parse_with_error("M 0 0\n  L 1 ?");
    assert_eq!(
        error,
        Some(ParseError::Number {
            src: "?".to_string(),
            line: 2,
            column: 7,
        })
    );
}
