//! Operator helper: hash a password for seeding `alumnos.password`.

use crate::session::password::hash_password;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

/// Read one line from stdin and print its Argon2id PHC string.
/// # Errors
/// Returns an error if stdin is empty, the password is blank or hashing fails.
pub fn execute() -> Result<()> {
    let stdin = std::io::stdin();
    let hash = hash_line(&mut stdin.lock())?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{hash}").context("failed to write hash to stdout")?;

    Ok(())
}

fn hash_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.trim().is_empty() {
        bail!("password must not be blank");
    }

    hash_password(password).context("failed to hash password")
}
