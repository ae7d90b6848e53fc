use crate::error::{Error, Result};
use std::{
    io::{BufRead, Write},
    str::FromStr,
};

/// What the user wants done with a broken desktop entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Delete,
    Edit,
    Skip,
    /// Stop processing the remaining entries
    Quit,
}

impl FromStr for Choice {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_lowercase().as_str() {
            "d" | "delete" => Self::Delete,
            "e" | "edit" => Self::Edit,
            "s" | "skip" | "i" | "ignore" => Self::Skip,
            "q" | "quit" => Self::Quit,
            other => return Err(Error::BadChoice(other.to_owned())),
        })
    }
}

/// Ask the user what to do until a recognized answer is given
///
/// Running out of input counts as quitting.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Choice> {
    loop {
        write!(output, "╰─ [d]elete, [e]dit, [s]kip or [q]uit: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(Choice::Quit);
        }

        match line.parse() {
            Ok(choice) => return Ok(choice),
            Err(e) => writeln!(output, "   {e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask_with(input: &str) -> Result<(Choice, String)> {
        let mut output = Vec::new();
        let choice = ask(&mut input.as_bytes(), &mut output)?;
        Ok((choice, String::from_utf8(output)?))
    }

    #[test]
    fn answers() -> Result<()> {
        assert_eq!(ask_with("d\n")?.0, Choice::Delete);
        assert_eq!(ask_with("  Edit \n")?.0, Choice::Edit);
        assert_eq!(ask_with("I\n")?.0, Choice::Skip);
        assert_eq!(ask_with("skip\n")?.0, Choice::Skip);
        assert_eq!(ask_with("q")?.0, Choice::Quit);
        Ok(())
    }

    #[test]
    fn invalid_answers_prompt_again() -> Result<()> {
        let (choice, output) = ask_with("x\n\nyes\ns\n")?;
        assert_eq!(choice, Choice::Skip);
        assert_eq!(output.matches("[d]elete, [e]dit, [s]kip or [q]uit: ").count(), 4);
        assert!(output.contains("'x' is not one of"));
        assert!(output.contains("'yes' is not one of"));
        Ok(())
    }

    #[test]
    fn end_of_input_quits() -> Result<()> {
        assert_eq!(ask_with("")?.0, Choice::Quit);
        assert_eq!(ask_with("nope\n")?.0, Choice::Quit);
        Ok(())
    }
}
