use core::str::Chars;

/// A character cursor over attribute text keeping track of line and column.
///
/// Lines and columns start at 1.
pub(crate) struct Source<'l> {
    chars: Chars<'l>,
    current: Option<char>,
    line: i32,
    column: i32,
}

/// A number could not be read. `src` holds the text that was consumed, or the
/// offending character when nothing was.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NumberError {
    pub src: String,
    pub line: i32,
    pub column: i32,
}

impl<'l> Source<'l> {
    pub fn new(text: &'l str) -> Self {
        let mut chars = text.chars();
        let current = chars.next();
        Source {
            chars,
            current,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.line, self.column)
    }

    // Looks `n` characters past the current one.
    fn peek(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n)
    }

    pub fn advance(&mut self) {
        match self.current {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => {
                self.column += 1;
            }
            None => {
                return;
            }
        }
        self.current = self.chars.next();
    }

    /// Skips whitespace and commas.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.current {
            if !(c.is_whitespace() || c == ',') {
                break;
            }
            self.advance();
        }
    }

    /// Skips whitespace only.
    pub fn skip_spaces(&mut self) {
        while let Some(c) = self.current {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Whether the current character can start a number.
    pub fn at_number_start(&self) -> bool {
        match self.current {
            Some(c) => c.is_ascii_digit() || c == '.' || c == '-' || c == '+',
            None => false,
        }
    }

    /// Reads a run of ASCII letters.
    pub fn identifier(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.current {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            self.advance();
        }

        name
    }

    /// Reads a number with the SVG grammar: an optional sign, digits with an optional
    /// fraction and an optional exponent.
    ///
    /// A second dot ends the number, so `0.6.5` reads as `0.6` followed by `.5`.
    pub fn number(&mut self, buffer: &mut String) -> Result<f64, NumberError> {
        buffer.clear();
        self.skip_whitespace();

        let (line, column) = self.position();
        let mut has_digits = false;

        if let Some(sign @ '-') | Some(sign @ '+') = self.current {
            buffer.push(sign);
            self.advance();
        }

        has_digits |= self.digits(buffer);

        if self.current == Some('.') {
            buffer.push('.');
            self.advance();
            has_digits |= self.digits(buffer);
        }

        if !has_digits {
            if buffer.is_empty() {
                if let Some(c) = self.current {
                    buffer.push(c);
                }
            }
            return Err(NumberError {
                src: core::mem::take(buffer),
                line,
                column,
            });
        }

        if let Some('e') | Some('E') = self.current {
            let exponent_digit = match self.peek(0) {
                Some('-') | Some('+') => self.peek(1),
                c => c,
            };

            // A dangling `e` is left for the caller to report.
            if exponent_digit.map_or(false, |c| c.is_ascii_digit()) {
                buffer.push('e');
                self.advance();
                if let Some(sign @ '-') | Some(sign @ '+') = self.current {
                    buffer.push(sign);
                    self.advance();
                }
                self.digits(buffer);
            }
        }

        buffer.parse::<f64>().map_err(|_| NumberError {
            src: core::mem::take(buffer),
            line,
            column,
        })
    }

    fn digits(&mut self, buffer: &mut String) -> bool {
        let mut found = false;
        while let Some(c) = self.current {
            if !c.is_ascii_digit() {
                break;
            }
            buffer.push(c);
            found = true;
            self.advance();
        }

        found
    }
}

#[cfg(test)]
fn numbers(text: &str) -> Vec<f64> {
    let mut src = Source::new(text);
    let mut buffer = String::new();
    let mut values = Vec::new();
    loop {
        src.skip_whitespace();
        if src.is_finished() {
            return values;
        }
        match src.number(&mut buffer) {
            Ok(value) => values.push(value),
            Err(_) => return values,
        }
    }
}

#[test]
fn number_grammar() {
    assert_eq!(numbers("1 -2 +3 .5 -.5 6."), vec![1.0, -2.0, 3.0, 0.5, -0.5, 6.0]);
    assert_eq!(numbers("0.6.5"), vec![0.6, 0.5]);
    assert_eq!(numbers("1e2 1.5E-1 2e+1"), vec![100.0, 0.15, 20.0]);
    assert_eq!(numbers("10-20"), vec![10.0, -20.0]);
    assert_eq!(numbers("1,2,,3"), vec![1.0, 2.0, 3.0]);
}

#[test]
fn number_errors() {
    let mut buffer = String::new();

    let mut src = Source::new("  x");
    assert_eq!(
        src.number(&mut buffer),
        Err(NumberError {
            src: "x".to_string(),
            line: 1,
            column: 3
        })
    );

    let mut src = Source::new("\n-.");
    assert_eq!(
        src.number(&mut buffer),
        Err(NumberError {
            src: "-.".to_string(),
            line: 2,
            column: 1
        })
    );

    let mut src = Source::new("");
    assert!(src.number(&mut buffer).is_err());
}

#[test]
fn dangling_exponent() {
    let mut src = Source::new("3e");
    let mut buffer = String::new();
    assert_eq!(src.number(&mut buffer), Ok(3.0));
    assert_eq!(src.current(), Some('e'));
}
