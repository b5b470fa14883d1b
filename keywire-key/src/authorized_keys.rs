//! Parser for OpenSSH `authorized_keys` files.

use crate::{
    entry::PublicKeyEntry,
    login_options::{find_unquoted, LoginOptions},
    public::KeyData,
    DecoderRegistry, Error, Result, COMMENT_CHAR,
};
use core::{
    fmt,
    hash::{Hash, Hasher},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Directory holding per-user SSH files, relative to the home directory.
const DOT_SSH_DIR: &str = ".ssh";

/// Standard OpenSSH authorized keys file name.
const AUTHORIZED_KEYS_FILE: &str = "authorized_keys";

/// Single entry of an `authorized_keys` file:
///
/// ```text
/// [<login-options> ]<key-type> <base64-key-blob>[ <comment>]
/// ```
///
/// Equality and hashing ignore the login options and comment.
#[derive(Clone, Debug)]
pub struct AuthorizedKeyEntry {
    entry: PublicKeyEntry,
    login_options: LoginOptions,
    comment: Option<String>,
}

impl AuthorizedKeyEntry {
    /// Parse one line of an `authorized_keys` file.
    ///
    /// Returns `Ok(None)` for empty lines and lines starting with `#`.
    ///
    /// A first token which isn't a key type known to `registry` is taken to
    /// be the login options, and the rest of the line must then hold a key
    /// entry with a known key type.
    pub fn parse_line(line: &str, registry: &DecoderRegistry) -> Result<Option<Self>> {
        if line.is_empty() || line.starts_with(COMMENT_CHAR) {
            return Ok(None);
        }

        let start = match find_unquoted(line, ' ') {
            Some(start) if start > 0 => start,
            _ => return Err(Error::bad_format("no key data delimiter", line)),
        };

        let first = &line[..start];

        if registry.is_supported(first) {
            return Self::parse_key_entry(line).map(Some);
        }

        let rest = line[(start + 1)..].trim();

        if rest.is_empty() || rest.starts_with(COMMENT_CHAR) {
            return Err(Error::bad_format("no key data after login options", line));
        }

        match rest.split_once(' ') {
            Some((key_type, _)) if registry.is_supported(key_type) => (),
            _ => return Err(Error::bad_format("unrecognized key type", line)),
        }

        let mut entry = Self::parse_key_entry(rest)?;
        entry.login_options = first.parse()?;
        Ok(Some(entry))
    }

    /// Parse `<key-type> <base64>[ <comment>]`.
    fn parse_key_entry(line: &str) -> Result<Self> {
        let (entry, trailer) = PublicKeyEntry::parse_with_trailer(line)?;
        let comment = trailer
            .map(str::trim)
            .filter(|comment| !comment.is_empty())
            .map(String::from);

        Ok(Self {
            entry,
            login_options: LoginOptions::new(),
            comment,
        })
    }

    /// Wrap a public key entry with options and a comment.
    pub fn new(entry: PublicKeyEntry, login_options: LoginOptions, comment: Option<String>) -> Self {
        Self {
            entry,
            login_options,
            comment,
        }
    }

    /// The underlying public key entry.
    pub fn public_key_entry(&self) -> &PublicKeyEntry {
        &self.entry
    }

    /// Key-type identifier.
    pub fn key_type(&self) -> &str {
        self.entry.key_type()
    }

    /// Decoded key blob.
    pub fn key_data(&self) -> &[u8] {
        self.entry.key_data()
    }

    /// Login options given before the key type.
    pub fn login_options(&self) -> &LoginOptions {
        &self.login_options
    }

    /// Free-text comment following the key data.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Decode the key data with the decoder registered for its key type.
    pub fn resolve_public_key(&self, registry: &DecoderRegistry) -> Result<KeyData> {
        self.entry.resolve_public_key(registry)
    }
}

impl Eq for AuthorizedKeyEntry {}

impl PartialEq for AuthorizedKeyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
    }
}

impl Hash for AuthorizedKeyEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entry.hash(state);
    }
}

impl fmt::Display for AuthorizedKeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.login_options.is_empty() {
            write!(f, "{} ", self.login_options)?;
        }

        write!(f, "{}", self.entry)?;

        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }

        Ok(())
    }
}

/// Read every entry of an `authorized_keys` stream, in order.
///
/// Lines are trimmed; blank lines and comments are skipped. The first
/// malformed line aborts the whole read.
pub fn read_authorized_keys(
    reader: impl BufRead,
    registry: &DecoderRegistry,
) -> Result<Vec<AuthorizedKeyEntry>> {
    let mut entries = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;

        match AuthorizedKeyEntry::parse_line(line.trim(), registry) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => (),
            Err(err) => {
                warn!(line = index + 1, error = %err, "malformed authorized_keys entry");
                return Err(err);
            }
        }
    }

    Ok(entries)
}

/// Read an `authorized_keys` file.
pub fn read_authorized_keys_file(
    path: impl AsRef<Path>,
    registry: &DecoderRegistry,
) -> Result<Vec<AuthorizedKeyEntry>> {
    let path = path.as_ref();
    let entries = read_authorized_keys(BufReader::new(File::open(path)?), registry)?;
    debug!(path = %path.display(), entries = entries.len(), "read authorized_keys");
    Ok(entries)
}

/// Location of the current user's `~/.ssh/authorized_keys`, if the home
/// directory can be determined. The file may not exist.
pub fn default_authorized_keys_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(DOT_SSH_DIR).join(AUTHORIZED_KEYS_FILE))
}

/// Read the current user's `~/.ssh/authorized_keys`.
///
/// Yields no entries if the home directory or the file doesn't exist.
pub fn read_default_authorized_keys(registry: &DecoderRegistry) -> Result<Vec<AuthorizedKeyEntry>> {
    match default_authorized_keys_path() {
        Some(path) if path.exists() => read_authorized_keys_file(path, registry),
        _ => Ok(Vec::new()),
    }
}

/// Decode the keys of every entry, failing on the first which can't be
/// resolved.
pub fn resolve_authorized_keys<'a>(
    entries: impl IntoIterator<Item = &'a AuthorizedKeyEntry>,
    registry: &DecoderRegistry,
) -> Result<Vec<KeyData>> {
    entries
        .into_iter()
        .map(|entry| entry.resolve_public_key(registry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::AuthorizedKeyEntry;
    use crate::{DecoderRegistry, Error};

    const ENTRY: &str = "ecdsa-sha2-nistp256 AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBPKk6oKr3pR8mn3FAyO2K2vSScFsawmKeDG1Ps24u5EDTcaCgELAhyK7sPV8FrYEALoCFMlexjDh8VR0QszckmA=";

    #[test]
    fn comments_and_blanks() {
        let registry = DecoderRegistry::new();
        assert_eq!(AuthorizedKeyEntry::parse_line("", &registry).unwrap(), None);
        assert_eq!(
            AuthorizedKeyEntry::parse_line("# ssh-rsa AAAA", &registry).unwrap(),
            None
        );
    }

    #[test]
    fn quoted_option_with_space() {
        let registry = DecoderRegistry::new();
        let line = format!(r#"command="echo hi",no-pty {ENTRY} my key"#);
        let entry = AuthorizedKeyEntry::parse_line(&line, &registry)
            .unwrap()
            .unwrap();

        assert_eq!(entry.login_options().get("command"), Some("echo hi"));
        assert_eq!(entry.login_options().get("no-pty"), Some("true"));
        assert_eq!(entry.comment(), Some("my key"));
        assert_eq!(entry.key_type(), "ecdsa-sha2-nistp256");
    }

    #[test]
    fn equality_ignores_options_and_comment() {
        let registry = DecoderRegistry::new();
        let plain = AuthorizedKeyEntry::parse_line(ENTRY, &registry).unwrap();
        let decorated =
            AuthorizedKeyEntry::parse_line(&format!("no-pty {ENTRY} laptop"), &registry).unwrap();

        assert!(plain.is_some());
        assert_eq!(plain, decorated);
    }

    #[test]
    fn display_round_trip() {
        let registry = DecoderRegistry::new();
        let line = format!(r#"command="/bin/true",no-pty {ENTRY} laptop"#);
        let entry = AuthorizedKeyEntry::parse_line(&line, &registry)
            .unwrap()
            .unwrap();

        assert_eq!(entry.to_string(), line);
    }

    #[test]
    fn reject_options_without_key() {
        let registry = DecoderRegistry::new();
        assert!(matches!(
            AuthorizedKeyEntry::parse_line("no-pty", &registry),
            Err(Error::BadFormat {
                reason: "no key data delimiter",
                ..
            })
        ));
        assert!(matches!(
            AuthorizedKeyEntry::parse_line("no-pty  # nothing", &registry),
            Err(Error::BadFormat {
                reason: "no key data after login options",
                ..
            })
        ));
        assert!(matches!(
            AuthorizedKeyEntry::parse_line("no-pty ssh-unknown AAAA", &registry),
            Err(Error::BadFormat {
                reason: "unrecognized key type",
                ..
            })
        ));
    }

    #[test]
    fn reject_duplicate_options() {
        let registry = DecoderRegistry::new();
        assert_eq!(
            AuthorizedKeyEntry::parse_line(&format!("no-pty,No-Pty {ENTRY}"), &registry).err(),
            Some(Error::DuplicateOption {
                name: "no-pty".into()
            })
        );
    }
}
