use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static AUTHORIZATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btoken\s+[A-Za-z0-9_\-\.]+").expect("valid regex"));

static GITHUB_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:gh[pousr]_[A-Za-z0-9]{20,}|github_pat_[A-Za-z0-9_]{20,})\b")
        .expect("valid regex")
});

static TOKEN_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(IOBBOT_GITHUB_TOKEN|github_token)(["']?\s*[:=]\s*["']?)[^"'\s,}]+"#)
        .expect("valid regex")
});

/// Redacts GitHub credentials from strings before they are logged
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a new scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = TOKEN_FIELD.replace_all(message, "${1}${2}[REDACTED]");
        let scrubbed = AUTHORIZATION_TOKEN.replace_all(&scrubbed, "token [TOKEN_REDACTED]");
        GITHUB_TOKEN
            .replace_all(&scrubbed, "[TOKEN_REDACTED]")
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
