//! Interactive prompt plumbing
//!
//! Lifecycle operations never touch stdin/stdout directly; they go through
//! a `PromptIo` that separates three streams: the input being read, the
//! output where results land, and the prompt stream where questions are
//! shown. Tests drive operations with in-memory buffers.
//!
//! Every read is single-shot. A wrong answer is a terminal failure for the
//! invocation; nothing here loops.

use std::io::{BufRead, Write};

use crate::error::{KeyError, Result};

/// Minimum passphrase length for interactive entry
pub const MIN_PASS_LENGTH: usize = 8;

/// Three-stream prompt handle for one invocation
pub struct PromptIo<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    prompt: &'a mut dyn Write,
    /// When set, passphrase entry goes through the terminal without echo
    terminal: bool,
}

impl<'a> PromptIo<'a> {
    pub fn new(
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        prompt: &'a mut dyn Write,
    ) -> Self {
        Self {
            input,
            output,
            prompt,
            terminal: false,
        }
    }

    /// Mark the input as an interactive terminal (enables hidden entry)
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Write a line to the result output stream
    pub fn println(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Write a line to the prompt stream
    pub fn prompt_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.prompt, "{}", line)?;
        self.prompt.flush()?;
        Ok(())
    }

    /// Show a prompt and read one line of free-form text
    ///
    /// End-of-input before any line was supplied is a terminal error.
    pub fn get_string(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.prompt, "{}", prompt)?;
        self.prompt.flush()?;
        self.read_line()
    }

    /// Show a prompt and read a passphrase
    ///
    /// On a terminal the entry is hidden; otherwise one line is read from
    /// the input stream. Entries shorter than [`MIN_PASS_LENGTH`] are
    /// rejected.
    pub fn get_password(&mut self, prompt: &str) -> Result<String> {
        let pass = if self.terminal {
            rpassword::prompt_password(prompt)?
        } else {
            writeln!(self.prompt, "{}", prompt)?;
            self.prompt.flush()?;
            self.read_line()?
        };
        if pass.len() < MIN_PASS_LENGTH {
            return Err(KeyError::PasswordTooShort(MIN_PASS_LENGTH));
        }
        Ok(pass)
    }

    /// Read a passphrase twice; the entries must match
    pub fn get_check_password(&mut self, prompt: &str, repeat_prompt: &str) -> Result<String> {
        let first = self.get_password(prompt)?;
        let second = self.get_password(repeat_prompt)?;
        if first != second {
            return Err(KeyError::PassphraseMismatch);
        }
        Ok(first)
    }

    /// Ask a yes/no question, single-shot
    ///
    /// `y`/`yes` answers true, `n`/`no` answers false (case-insensitive);
    /// anything else, including end-of-input, fails.
    pub fn get_confirmation(&mut self, prompt: &str) -> Result<bool> {
        writeln!(self.prompt, "{} [y/n]:", prompt)?;
        self.prompt.flush()?;
        let answer = self.read_line()?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(KeyError::UnrecognizedResponse(other.to_string())),
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Err(KeyError::EndOfInput);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run<F, T>(input: &str, f: F) -> (Result<T>, String, String)
    where
        F: FnOnce(&mut PromptIo<'_>) -> Result<T>,
    {
        let mut input = Cursor::new(input.to_string());
        let mut output = Vec::new();
        let mut prompt = Vec::new();
        let mut io = PromptIo::new(&mut input, &mut output, &mut prompt);
        let result = f(&mut io);
        (
            result,
            String::from_utf8(output).unwrap(),
            String::from_utf8(prompt).unwrap(),
        )
    }

    #[test]
    fn test_get_string_reads_one_line() {
        let (result, _, prompt) = run("hello world\nrest\n", |io| io.get_string("enter:"));
        assert_eq!(result.unwrap(), "hello world");
        assert!(prompt.contains("enter:"));
    }

    #[test]
    fn test_get_string_eof() {
        let (result, _, _) = run("", |io| io.get_string("enter:"));
        assert_eq!(result.unwrap_err().to_string(), "EOF");
    }

    #[test]
    fn test_get_check_password_match() {
        let (result, _, _) = run("test1234\ntest1234\n", |io| {
            io.get_check_password("Enter:", "Repeat:")
        });
        assert_eq!(result.unwrap(), "test1234");
    }

    #[test]
    fn test_get_check_password_mismatch() {
        let (result, _, _) = run("test1234\nother5678\n", |io| {
            io.get_check_password("Enter:", "Repeat:")
        });
        assert_eq!(result.unwrap_err().to_string(), "passphrases do not match");
    }

    #[test]
    fn test_get_password_too_short() {
        let (result, _, _) = run("short\n", |io| io.get_password("Enter:"));
        assert_eq!(
            result.unwrap_err().to_string(),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_confirmation_answers() {
        for (answer, want) in [("y", true), ("Y", true), ("yes", true), ("n", false), ("no", false)]
        {
            let (result, _, _) = run(&format!("{}\n", answer), |io| io.get_confirmation("ok?"));
            assert_eq!(result.unwrap(), want, "answer {}", answer);
        }
    }

    #[test]
    fn test_confirmation_invalid_answer_is_terminal() {
        let (result, _, _) = run("maybe\n", |io| io.get_confirmation("ok?"));
        assert!(matches!(
            result.unwrap_err(),
            KeyError::UnrecognizedResponse(_)
        ));
    }

    #[test]
    fn test_confirmation_eof_fails() {
        let (result, _, _) = run("", |io| io.get_confirmation("ok?"));
        assert_eq!(result.unwrap_err().to_string(), "EOF");
    }
}
