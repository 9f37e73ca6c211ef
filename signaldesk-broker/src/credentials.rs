//! API credential formats.
//!
//! Validation is purely syntactic: key lengths and a numeric account id.
//! Nothing here proves the credentials would work against a real broker.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length for API and secret keys.
const MIN_KEY_LEN: usize = 10;

/// Credential format violations. These are caller errors, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("invalid API key format (need at least {MIN_KEY_LEN} characters)")]
    InvalidApiKey,
    #[error("invalid secret key format (need at least {MIN_KEY_LEN} characters)")]
    InvalidSecretKey,
    #[error("invalid account id format (must be numeric)")]
    InvalidAccountId,
}

/// API credentials as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
    pub account_id: String,
}

impl Credentials {
    pub fn new(api_key: &str, secret_key: &str, account_id: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            secret_key: secret_key.to_string(),
            account_id: account_id.to_string(),
        }
    }

    /// Check the credential format. First violation wins: api key, then
    /// secret key, then account id.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.api_key.len() < MIN_KEY_LEN {
            return Err(CredentialError::InvalidApiKey);
        }
        if self.secret_key.len() < MIN_KEY_LEN {
            return Err(CredentialError::InvalidSecretKey);
        }
        if self.account_id.is_empty() || !self.account_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CredentialError::InvalidAccountId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Credentials {
        Credentials::new("key-1234567890", "secret-1234567890", "123456")
    }

    #[test]
    fn well_formed_credentials_pass() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn short_api_key_rejected_first() {
        let mut creds = valid();
        creds.api_key = "short".into();
        creds.secret_key = "short".into(); // api key error takes priority
        assert_eq!(creds.validate(), Err(CredentialError::InvalidApiKey));
    }

    #[test]
    fn short_secret_key_rejected() {
        let mut creds = valid();
        creds.secret_key = "short".into();
        assert_eq!(creds.validate(), Err(CredentialError::InvalidSecretKey));
    }

    #[test]
    fn account_id_must_be_all_digits() {
        for bad in ["", "12a45", "12 45", "-12345"] {
            let mut creds = valid();
            creds.account_id = bad.into();
            assert_eq!(creds.validate(), Err(CredentialError::InvalidAccountId));
        }
    }

    #[test]
    fn boundary_key_length_is_accepted() {
        let creds = Credentials::new("0123456789", "0123456789", "1");
        assert_eq!(creds.validate(), Ok(()));
    }
}
