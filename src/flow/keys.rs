//! Identity keys for verify mutations, handed to the runner for logging and
//! de-duplication.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MutationKey {
    segments: Vec<String>,
}

impl MutationKey {
    /// Key for the verify action. The flag selects the flat legacy key form
    /// used by hosts that still index their cache on single-segment keys.
    pub fn verify(prefer_legacy: bool) -> Self {
        if prefer_legacy {
            Self {
                segments: vec!["auth:verify".to_string()],
            }
        } else {
            Self {
                segments: vec!["auth".to_string(), "verify".to_string()],
            }
        }
    }

    /// Scopes the key to the legacy provider binding.
    pub fn legacy_scoped(mut self) -> Self {
        self.segments.push("legacy".to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for MutationKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.segments.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_key_forms() {
        assert_eq!(MutationKey::verify(false).segments(), ["auth", "verify"]);
        assert_eq!(MutationKey::verify(true).segments(), ["auth:verify"]);
    }

    #[test]
    fn legacy_scope_appends_segment() {
        let key = MutationKey::verify(false).legacy_scoped();
        assert_eq!(key.segments(), ["auth", "verify", "legacy"]);
        assert_eq!(key.to_string(), "auth:verify:legacy");
    }
}
