//! Shared-credential gate
//!
//! Only the SHA-256 digest of the secret is kept in memory or on disk.

use crate::error::{Result, SearchError};
use sha2::{Digest, Sha256};

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    digest: [u8; 32],
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

impl Credential {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    /// Credential from a hex SHA-256 digest (as stored in the config file)
    pub fn from_hex_digest(hex_digest: &str) -> Result<Self> {
        let bytes = hex::decode(hex_digest.trim())
            .map_err(|e| SearchError::Config(format!("admin_password_sha256: {}", e)))?;
        let digest: [u8; 32] = bytes.try_into().map_err(|_| {
            SearchError::Config("admin_password_sha256: oczekiwano 64 znaków hex".into())
        })?;
        Ok(Self { digest })
    }

    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest)
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let candidate: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        // compare every byte so timing does not depend on the mismatch position
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_secret() {
        let credential = Credential::from_secret("tajne-haslo");
        assert!(credential.verify("tajne-haslo"));
        assert!(!credential.verify("tajne-haslo "));
        assert!(!credential.verify(""));
    }

    #[test]
    fn test_hex_digest_round_trip() {
        let credential = Credential::from_secret("abc");
        assert_eq!(
            credential.hex_digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let restored = Credential::from_hex_digest(&credential.hex_digest()).unwrap();
        assert!(restored.verify("abc"));
    }

    #[test]
    fn test_invalid_hex_digest() {
        assert!(matches!(
            Credential::from_hex_digest("zz"),
            Err(SearchError::Config(_))
        ));
        assert!(matches!(
            Credential::from_hex_digest("abcd"),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_digest() {
        let credential = Credential::from_secret("abc");
        assert_eq!(format!("{:?}", credential), "Credential(..)");
    }
}
