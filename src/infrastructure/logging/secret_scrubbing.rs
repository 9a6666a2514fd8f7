use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

struct Patterns {
    jwt: Regex,
    token: Regex,
    bearer: Regex,
    password: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        // Three base64url segments, header starting with `eyJ`
        jwt: Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*")
            .expect("jwt pattern is valid"),
        token: Regex::new(
            r#"["']?(?:token|resetCode|reset_code|secret)["']?\s*[:=]\s*["']?[A-Za-z0-9\-_.]{6,}["']?"#,
        )
        .expect("token pattern is valid"),
        bearer: Regex::new(r"Bearer\s+[A-Za-z0-9\-_.]+").expect("bearer pattern is valid"),
        password: Regex::new(
            r#"["']?(?:password|newPassword|new_password)["']?\s*[:=]\s*["']?[^"'\s,}]+["']?"#,
        )
        .expect("password pattern is valid"),
    })
}

/// Redacts credentials from text before it is logged or shown.
///
/// Backend error bodies sometimes echo the request, so anything that came
/// off the wire goes through here first.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let p = patterns();
        let scrubbed = p.bearer.replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = p.jwt.replace_all(&scrubbed, "[JWT_REDACTED]");
        let scrubbed = p.token.replace_all(&scrubbed, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.find([':', '=']) {
                Some(pos) => format!("{}{}[REDACTED]", &full_match[..pos], &full_match[pos..=pos]),
                None => "[REDACTED]".to_string(),
            }
        });
        p.password
            .replace_all(&scrubbed, "password=[REDACTED]")
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
