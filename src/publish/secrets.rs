//! Upload credential lookup in a `.env`-style secrets file.

use regex::Regex;
use std::fmt;

/// Upload token. Never printed; use [`Credential::expose`] to pass it on.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// Find `key = value` in `content` and return the trimmed value.
///
/// One layer of matching surrounding quotes is stripped. An empty value
/// counts as not found.
pub fn find_credential(content: &str, key: &str) -> Option<Credential> {
    let pattern = format!(r"(?m)^[ \t]*{}[ \t]*=[ \t]*(.+)$", regex::escape(key));
    let re = Regex::new(&pattern).ok()?;
    let raw = re.captures(content)?.get(1)?.as_str().trim();
    let value = unquote(raw).trim();
    (!value.is_empty()).then(|| Credential(value.to_string()))
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_credential() {
        let env = "# PyPI\nOTHER=1\napiToken = pypi-AgEIcHlwaS5vcmc  \n";
        let cred = find_credential(env, "apiToken").unwrap();
        assert_eq!(cred.expose(), "pypi-AgEIcHlwaS5vcmc");
    }

    #[test]
    fn test_find_credential_without_spaces_and_crlf() {
        let cred = find_credential("apiToken=abc123\r\n", "apiToken").unwrap();
        assert_eq!(cred.expose(), "abc123");
    }

    #[test]
    fn test_find_credential_strips_quotes() {
        let cred = find_credential("apiToken = \"pypi-xyz\"\n", "apiToken").unwrap();
        assert_eq!(cred.expose(), "pypi-xyz");
        let cred = find_credential("apiToken = 'pypi-xyz'\n", "apiToken").unwrap();
        assert_eq!(cred.expose(), "pypi-xyz");
    }

    #[test]
    fn test_missing_or_empty_key() {
        assert!(find_credential("token = abc\n", "apiToken").is_none());
        assert!(find_credential("apiToken =   \n", "apiToken").is_none());
        assert!(find_credential("apiToken = \"\"\n", "apiToken").is_none());
    }

    #[test]
    fn test_key_is_literal() {
        assert!(find_credential("apiXToken = abc\n", "api.Token").is_none());
    }

    #[test]
    fn test_credential_never_displayed() {
        let cred = find_credential("apiToken = supersecret\n", "apiToken").unwrap();
        assert!(!format!("{cred:?}").contains("supersecret"));
        assert!(!format!("{cred}").contains("supersecret"));
    }
}
