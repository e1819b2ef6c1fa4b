// Confirmation adapters - Operator prompt before touching the filesystem

use std::io::{BufRead, Write};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Interpret a typed answer. Only `y`/`yes` proceed; anything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Asks on stderr, reads one line from stdin
pub struct StdinConfirmAdapter;

impl StdinConfirmAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinConfirmAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `prompt`, read one answer line. EOF declines.
pub fn ask(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> Result<bool, DomainError> {
    write!(output, "{} [y/N] ", prompt)
        .and_then(|_| output.flush())
        .map_err(|e| prompt_failure("write prompt", e))?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .map_err(|e| prompt_failure("read answer", e))?;

    Ok(read > 0 && is_affirmative(&answer))
}

/// Prompt errors fail the filesystem change they gate
fn prompt_failure(action: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::FilesystemOperationFailure(format!(
        "Confirmation prompt failed to {}: {}",
        action, error
    ))
}

#[async_trait]
impl ConfirmPort for StdinConfirmAdapter {
    async fn confirm(&self, prompt: &str) -> Result<bool, DomainError> {
        let prompt = prompt.to_string();

        tokio::task::spawn_blocking(move || {
            ask(&prompt, std::io::stdin().lock(), std::io::stderr())
        })
        .await
        .map_err(|e| prompt_failure("complete", e))?
    }
}

/// Confirms everything without asking (`--yes`)
pub struct AssumeYesAdapter;

#[async_trait]
impl ConfirmPort for AssumeYesAdapter {
    async fn confirm(&self, prompt: &str) -> Result<bool, DomainError> {
        tracing::debug!("Auto-confirmed: {}", prompt);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        for answer in ["y", "Y", "yes", "YES\n", "  y  "] {
            assert!(is_affirmative(answer), "{:?}", answer);
        }
        for answer in ["", "n", "no", "yep", "\n"] {
            assert!(!is_affirmative(answer), "{:?}", answer);
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ask_reads_answer() {
        let mut shown = Vec::new();
        assert!(ask("Move file?", "yes\n".as_bytes(), &mut shown).unwrap());
        assert_eq!(String::from_utf8(shown).unwrap(), "Move file? [y/N] ");

        assert!(!ask("Move file?", "n\n".as_bytes(), Vec::new()).unwrap());
        assert!(!ask("Move file?", "".as_bytes(), Vec::new()).unwrap());
    }

    #[test]
    fn test_prompt_io_failure_is_filesystem_failure() {
        let err = ask("Move file?", "y\n".as_bytes(), BrokenPipe).unwrap_err();
        match err {
            DomainError::FilesystemOperationFailure(message) => {
                assert!(message.contains("write prompt"))
            }
            other => panic!("expected FilesystemOperationFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_assume_yes() {
        assert!(AssumeYesAdapter.confirm("Move file?").await.unwrap());
    }
}
