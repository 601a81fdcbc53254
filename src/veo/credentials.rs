//! Credential providers for the Gemini API key.
//!
//! The client never reads the environment itself. `main` picks one provider
//! at start-up: a static key (config file or `GEMINI_API_KEY`) or an
//! interactive terminal prompt.

use std::fmt;
use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Password};

use super::client::GenerationError;

/// Source of the API key passed to the video backend.
pub trait CredentialProvider: Send + Sync {
    /// The key, if one has been configured or selected.
    fn token(&self) -> Option<&str>;

    fn has_credential(&self) -> bool {
        self.token().is_some()
    }

    /// Let the user pick or enter a key.
    fn select_credential(&mut self) -> Result<(), GenerationError>;
}

/// A key fixed at start-up.
#[derive(Clone, Default)]
pub struct StaticCredential {
    token: Option<String>,
}

impl StaticCredential {
    /// Empty or whitespace-only keys count as no key.
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { token }
    }
}

impl CredentialProvider for StaticCredential {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn select_credential(&mut self) -> Result<(), GenerationError> {
        // A configured key bypasses selection.
        if self.token.is_some() {
            Ok(())
        } else {
            Err(GenerationError::Credential)
        }
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredential")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Prompts for the key on the terminal with masked input.
#[derive(Clone, Default)]
pub struct InteractiveCredential {
    token: Option<String>,
}

impl InteractiveCredential {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialProvider for InteractiveCredential {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn select_credential(&mut self) -> Result<(), GenerationError> {
        let key = match Password::new().with_prompt("Gemini API key").interact() {
            Ok(key) => key,
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => {
                return Err(GenerationError::Credential)
            }
            Err(err) => {
                return Err(GenerationError::Io(std::io::Error::other(format!(
                    "Failed to read API key: {}",
                    err
                ))))
            }
        };

        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(GenerationError::Credential);
        }
        self.token = Some(key);
        Ok(())
    }
}

impl fmt::Debug for InteractiveCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveCredential")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
