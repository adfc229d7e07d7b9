//! Argon2id password hashing for the in-memory user service.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

pub const SALT_SIZE: usize = 16;

pub const HASH_SIZE: usize = 32;

/// Salted Argon2id digest of an account password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    salt: [u8; SALT_SIZE],
    hash: [u8; HASH_SIZE],
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

impl PasswordHash {
    pub fn create(password: &str) -> Result<Self, String> {
        let salt = generate_salt();
        let hash = argon2id_hash(password, &salt)?;
        Ok(Self { salt, hash })
    }

    pub fn verify(&self, password: &str) -> Result<bool, String> {
        let computed = argon2id_hash(password, &self.salt)?;
        Ok(computed.ct_eq(&self.hash).into())
    }
}

// OWASP minimum for Argon2id: 19 MiB, 2 passes, 1 lane.
fn argon_params() -> Result<Params, String> {
    Params::new(19 * 1024, 2, 1, Some(HASH_SIZE)).map_err(|e| format!("argon2 params: {e}"))
}

fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut salt);
    salt
}

fn argon2id_hash(password: &str, salt: &[u8; SALT_SIZE]) -> Result<[u8; HASH_SIZE], String> {
    let mut output = [0u8; HASH_SIZE];
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params()?);
    argon
        .hash_password_into(password.as_bytes(), salt, &mut output)
        .map_err(|e| format!("Argon2id hashing failed: {e}"))?;
    Ok(output)
}
