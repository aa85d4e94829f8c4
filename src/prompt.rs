use std::io::{self, BufRead, Write};

/// Interactive input used to gather credentials and challenge answers.
///
/// The session only ever prompts at the points the login flow documents;
/// substituting a scripted implementation makes those points observable in
/// tests.
pub trait Prompt: Send + Sync {
    /// Read a line of visible input, shown after `prompt`.
    fn read_line(&self, prompt: &str) -> io::Result<String>;

    /// Read a line of input with terminal echo disabled.
    fn read_secret(&self, prompt: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal, masking secret input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}
