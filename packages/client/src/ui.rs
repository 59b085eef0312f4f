//! Terminal interaction helpers.

use std::io::Write;

use hiroba_server::domain::DisplayName;
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::error::ClientError;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(name: &DisplayName) {
    print!("{}> ", name);
    std::io::stdout().flush().ok();
}

/// Ask for a display name until a valid one is entered.
pub fn prompt_display_name() -> Result<DisplayName, ClientError> {
    let mut rl = DefaultEditor::new().map_err(|e| ClientError::Readline(e.to_string()))?;

    loop {
        match rl.readline("Display name: ") {
            Ok(line) => match DisplayName::new(line) {
                Ok(name) => return Ok(name),
                Err(e) => println!("{}", e),
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                return Err(ClientError::Readline("no display name entered".to_string()));
            }
            Err(e) => return Err(ClientError::Readline(e.to_string())),
        }
    }
}
