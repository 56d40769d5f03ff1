use argon2::password_hash::rand_core::CryptoRngCore;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters used when deriving new digests.
///
/// Verification never reads these: it uses the parameters embedded in the stored digest,
/// so digests produced under older settings stay verifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Number of passes
    pub time_cost: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashingParams {
    /// Length of the derived key in bytes.
    pub const OUTPUT_LEN: usize = 32;
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_cost: 19 * 1024,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// Password hashing implementation.
///
/// Produces self-describing PHC strings of the form
/// `$argon2id$v=19$m=<memory>,t=<time>,p=<lanes>$<salt>$<digest>` with a fresh 16-byte salt
/// drawn from the operating system CSPRNG on every call.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    // Leading empty segment, algorithm, version, parameters, salt, digest.
    const DIGEST_SEGMENTS: usize = 6;

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside the ranges Argon2 accepts
    pub fn new(params: HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_cost,
            params.time_cost,
            params.parallelism,
            Some(HashingParams::OUTPUT_LEN),
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self { params })
    }

    /// Hash a plaintext password.
    ///
    /// Two calls with the same password return different strings because the salt differs.
    ///
    /// # Errors
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hash_with_rng(password, &mut OsRng)
    }

    fn hash_with_rng<R: CryptoRngCore>(
        &self,
        password: &str,
        rng: &mut R,
    ) -> Result<String, PasswordError> {
        let salt = SaltString::generate(rng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// The digest is re-derived with the algorithm, version and costs parsed from `hash`,
    /// and compared in constant time.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidFormat` - Digest cannot be parsed (segment count, encoding, parameters)
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let segments = hash.split('$').count();
        if segments != Self::DIGEST_SEGMENTS {
            return Err(PasswordError::InvalidFormat(format!(
                "expected {} segments, got {}",
                Self::DIGEST_SEGMENTS,
                segments
            )));
        }

        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidFormat(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::InvalidFormat(e.to_string())),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }
}
