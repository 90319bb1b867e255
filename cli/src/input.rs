use mineclear_core::Coord2;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Mark(Coord2),
    /// Pixel click, `x`/`y` as the window reports them.
    Click { x: i32, y: i32, button: MouseButton },
    Pause,
    NewRound,
    Quit,
    Help,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid number `{0}`")]
    Number(String),
}

pub const HELP: &str = "\
Commands:
  r ROW COL            reveal a cell
  m ROW COL            mark or unmark a cell
  click X Y [right]    click at a pixel position
  p                    pause or resume
  n (or space)         start a new round
  q                    quit
  ?                    show this help";

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        // the spacebar starts a new round
        if !line.is_empty() && line.trim().is_empty() && line.contains(' ') {
            return Ok(Self::NewRound);
        }

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" | "open" => Self::Reveal(parse_coords(&args, "r ROW COL")?),
            "m" | "mark" | "flag" => Self::Mark(parse_coords(&args, "m ROW COL")?),
            "click" => parse_click(&args)?,
            "p" | "pause" => no_args(&args, "p", Self::Pause)?,
            "n" | "new" => no_args(&args, "n", Self::NewRound)?,
            "q" | "quit" | "exit" => no_args(&args, "q", Self::Quit)?,
            "?" | "h" | "help" => Self::Help,
            _ => return Err(ParseError::Unknown(name.to_owned())),
        };
        Ok(command)
    }
}

fn no_args(args: &[&str], usage: &'static str, command: Command) -> Result<Command, ParseError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::Usage(usage))
    }
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::Number(word.to_owned()))
}

fn parse_coords(args: &[&str], usage: &'static str) -> Result<Coord2, ParseError> {
    match args {
        [row, col] => Ok((parse_number(row)?, parse_number(col)?)),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn parse_click(args: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "click X Y [left|right]";

    let (x, y, button) = match args {
        [x, y] => (x, y, MouseButton::Left),
        [x, y, button] => {
            let button = match button.to_ascii_lowercase().as_str() {
                "left" | "l" | "1" => MouseButton::Left,
                "right" | "r" | "3" => MouseButton::Right,
                _ => return Err(ParseError::Usage(USAGE)),
            };
            (x, y, button)
        }
        _ => return Err(ParseError::Usage(USAGE)),
    };
    Ok(Command::Click {
        x: parse_number(x)?,
        y: parse_number(y)?,
        button,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!(Command::parse("r 1 2"), Ok(Command::Reveal((1, 2))));
        assert_eq!(Command::parse("  open 0 8 "), Ok(Command::Reveal((0, 8))));
        assert_eq!(Command::parse("m 3 4"), Ok(Command::Mark((3, 4))));
        assert_eq!(Command::parse("FLAG 3 4"), Ok(Command::Mark((3, 4))));
    }

    #[test]
    fn parses_clicks() {
        assert_eq!(
            Command::parse("click 10 40"),
            Ok(Command::Click {
                x: 10,
                y: 40,
                button: MouseButton::Left
            })
        );
        assert_eq!(
            Command::parse("click -3 40 right"),
            Ok(Command::Click {
                x: -3,
                y: 40,
                button: MouseButton::Right
            })
        );
        assert_eq!(
            Command::parse("click 1 2 middle"),
            Err(ParseError::Usage("click X Y [left|right]"))
        );
    }

    #[test]
    fn parses_round_commands() {
        assert_eq!(Command::parse("p"), Ok(Command::Pause));
        assert_eq!(Command::parse("n"), Ok(Command::NewRound));
        assert_eq!(Command::parse(" "), Ok(Command::NewRound));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("?"), Ok(Command::Help));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Command::parse(""), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("dig 1 1"),
            Err(ParseError::Unknown("dig".into()))
        );
        assert_eq!(Command::parse("r 1"), Err(ParseError::Usage("r ROW COL")));
        assert_eq!(Command::parse("r 1 2 3"), Err(ParseError::Usage("r ROW COL")));
        assert_eq!(Command::parse("m a 2"), Err(ParseError::Number("a".into())));
        assert_eq!(Command::parse("r -1 2"), Err(ParseError::Number("-1".into())));
        assert_eq!(Command::parse("r 300 2"), Err(ParseError::Number("300".into())));
        assert_eq!(Command::parse("p now"), Err(ParseError::Usage("p")));
    }
}
