//! Recipient digests for the hashed tracking variant.

use sha2::{Digest, Sha256};

/// SHA-256 of the recipient identifier, lowercase hex.
///
/// Deterministic, so membership in the persisted completed set answers
/// "already delivered today" without keeping the raw identifier at rest.
pub fn recipient_digest(recipient: &str) -> String {
    let digest = Sha256::digest(recipient.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(recipient_digest("123456"), recipient_digest("123456"));
    }

    #[test]
    fn distinct_recipients_get_distinct_digests() {
        let ids = ["123", "456", "-1001234567890", "@channel", ""];
        let digests: std::collections::HashSet<_> =
            ids.iter().map(|id| recipient_digest(id)).collect();
        assert_eq!(digests.len(), ids.len());
    }

    #[test]
    fn digest_is_64_hex_chars() {
        let d = recipient_digest("42");
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn known_vector() {
        // sha256("abc")
        assert_eq!(
            recipient_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
