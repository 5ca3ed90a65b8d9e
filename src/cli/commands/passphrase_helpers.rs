use std::io::{self, IsTerminal};

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::passphrase::Passphrase;

/// Turn the command-line/env passphrase into a `Passphrase`, prompting on
/// the terminal when none was given.
///
/// With `confirm`, the prompt asks twice and both entries must match.
pub fn resolve(given: Option<String>, confirm: bool) -> Result<Passphrase> {
    if let Some(value) = given {
        return Passphrase::new(value);
    }

    if !io::stdin().is_terminal() {
        return Err(GpgBatchError::PassphraseUnavailable {
            detail: "none given and stdin is not a terminal".into(),
        });
    }

    let first = prompt("Passphrase: ")?;
    if confirm {
        let second = prompt("Repeat passphrase: ")?;
        if first.expose() != second.expose() {
            return Err(GpgBatchError::PassphraseUnavailable {
                detail: "the passphrases do not match".into(),
            });
        }
    }
    Ok(first)
}

fn prompt(label: &str) -> Result<Passphrase> {
    let value = rpassword::prompt_password(label).map_err(|e| {
        GpgBatchError::PassphraseUnavailable {
            detail: format!("failure reading passphrase: {e}"),
        }
    })?;
    Passphrase::new(value)
}
