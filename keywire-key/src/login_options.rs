//! `authorized_keys` login options.

use crate::{Error, Result};
use core::{fmt, ops::Deref, str::FromStr};
use std::collections::{BTreeMap, BTreeSet};

/// Value recorded for options given without `=value`.
const FLAG_VALUE: &str = "true";

/// Per-key directives preceding the key type in an `authorized_keys` line,
/// e.g. `no-pty,command="/usr/bin/backup"`.
///
/// Names are case-insensitive and stored lowercase. Options without a value
/// map to `"true"` and are remembered as flags, so they are written back
/// bare. Surrounding double quotes are stripped from values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoginOptions {
    values: BTreeMap<String, String>,
    flags: BTreeSet<String>,
}

impl LoginOptions {
    /// Create an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an option.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Was the option given without a value?
    pub fn is_flag(&self, name: &str) -> bool {
        self.flags.contains(&name.to_ascii_lowercase())
    }

    /// Add an option with a value.
    ///
    /// # Returns
    /// - `Err(Error::DuplicateOption)` if the option is already present.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let name = name.to_ascii_lowercase();

        if self.values.contains_key(&name) {
            return Err(Error::DuplicateOption { name });
        }

        self.values.insert(name, value.into());
        Ok(())
    }

    /// Add an option which takes no value, such as `no-pty`.
    ///
    /// # Returns
    /// - `Err(Error::DuplicateOption)` if the option is already present.
    pub fn insert_flag(&mut self, name: &str) -> Result<()> {
        self.insert(name, FLAG_VALUE)?;
        self.flags.insert(name.to_ascii_lowercase());
        Ok(())
    }
}

impl Deref for LoginOptions {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl FromStr for LoginOptions {
    type Err = Error;

    fn from_str(options: &str) -> Result<Self> {
        let mut ret = Self::new();

        for item in split_unquoted(options, ',') {
            let item = item.trim();

            if item.is_empty() {
                continue;
            }

            match item.split_once('=') {
                Some((name, value)) => ret.insert(name.trim(), strip_quotes(value.trim()))?,
                None => ret.insert_flag(item)?,
            }
        }

        Ok(ret)
    }
}

impl fmt::Display for LoginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }

            if self.flags.contains(name) {
                f.write_str(name)?;
            } else {
                write!(f, "{name}=\"{value}\"")?;
            }
        }

        Ok(())
    }
}

/// Split `s` on `delimiter`, ignoring delimiters inside double quotes.
fn split_unquoted(s: &str, delimiter: char) -> impl Iterator<Item = &str> {
    let mut in_quotes = false;

    s.split(move |c: char| {
        if c == '"' {
            in_quotes = !in_quotes;
        }

        c == delimiter && !in_quotes
    })
}

/// Find the first occurrence of `delimiter` outside double quotes.
pub(crate) fn find_unquoted(s: &str, delimiter: char) -> Option<usize> {
    let mut in_quotes = false;

    s.char_indices().find_map(|(i, c)| {
        if c == '"' {
            in_quotes = !in_quotes;
        }

        (c == delimiter && !in_quotes).then_some(i)
    })
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::{find_unquoted, LoginOptions};
    use crate::Error;

    #[test]
    fn flags_and_values() {
        let options: LoginOptions = r#"no-touch-required,command="/bin/true""#.parse().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options.get("no-touch-required"), Some("true"));
        assert_eq!(options.get("COMMAND"), Some("/bin/true"));
    }

    #[test]
    fn quoted_commas() {
        let options: LoginOptions = r#"from="10.0.0.1,10.0.0.2",no-pty"#.parse().unwrap();
        assert_eq!(options.get("from"), Some("10.0.0.1,10.0.0.2"));
        assert_eq!(options.get("no-pty"), Some("true"));
    }

    #[test]
    fn blank_items_skipped() {
        let options: LoginOptions = " no-pty , ,".parse().unwrap();
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn reject_duplicates() {
        assert_eq!(
            "no-pty,NO-PTY".parse::<LoginOptions>().err(),
            Some(Error::DuplicateOption {
                name: "no-pty".into()
            })
        );
    }

    #[test]
    fn display() {
        let options: LoginOptions = r#"No-Pty,command="/bin/true""#.parse().unwrap();
        assert_eq!(options.to_string(), r#"command="/bin/true",no-pty"#);
    }

    #[test]
    fn quoted_true_is_not_a_flag() {
        let options: LoginOptions = r#"environment="true",restrict"#.parse().unwrap();
        assert_eq!(options.get("environment"), Some("true"));
        assert!(!options.is_flag("environment"));
        assert!(options.is_flag("RESTRICT"));
        assert_eq!(options.to_string(), r#"environment="true",restrict"#);

        let mut options = LoginOptions::new();
        options.insert("permitopen", "true").unwrap();
        options.insert_flag("no-pty").unwrap();
        assert_eq!(options.to_string(), r#"no-pty,permitopen="true""#);
        assert_eq!(
            options.insert_flag("No-Pty"),
            Err(Error::DuplicateOption {
                name: "no-pty".into()
            })
        );
    }

    #[test]
    fn unquoted_search() {
        assert_eq!(find_unquoted(r#"command="a b" ssh-rsa"#, ' '), Some(13));
        assert_eq!(find_unquoted("nospace", ' '), None);
    }
}
