//! bcrypt implementation of the [`PasswordHasher`] port.
//!
//! bcrypt is deliberately slow, so both operations run on the blocking
//! thread pool. Plain-text copies handed to the worker are wiped on drop.

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashes passwords with bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with `cost`, clamped to the range bcrypt accepts.
    pub fn new(cost: u32) -> Self {
        let clamped = cost.clamp(4, 31);
        if clamped != cost {
            warn!(requested = cost, applied = clamped, "bcrypt cost out of range");
        }
        Self { cost: clamped }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

async fn off_executor<T, F>(work: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
        .map_err(|err| PasswordHashError::hashing(err.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        off_executor(move || bcrypt::hash(password.as_bytes(), cost)).await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        off_executor(move || bcrypt::verify(password.as_bytes(), &hash)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fast_hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_against_the_original_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct horse").await.expect("hash");

        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("battery staple", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted() {
        let hasher = fast_hasher();
        let first = hasher.hash("same password").await.expect("hash");
        let second = hasher.hash("same password").await.expect("hash");

        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let err = fast_hasher()
            .verify("password", "not-a-bcrypt-hash")
            .await
            .expect_err("malformed hash");

        assert!(matches!(err, PasswordHashError::Hashing { .. }));
    }

    #[rstest]
    #[case(0, 4)]
    #[case(12, 12)]
    #[case(40, 31)]
    fn cost_is_clamped(#[case] requested: u32, #[case] applied: u32) {
        assert_eq!(BcryptPasswordHasher::new(requested).cost(), applied);
    }
}
