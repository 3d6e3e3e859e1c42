use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;

/// Argon2id cost parameters. Written into every backup header so older
/// backups stay readable if the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Reject parameters a crafted header could use to exhaust resources.
    pub fn check(&self) -> Result<(), CoreError> {
        let in_range = (8..=1_048_576).contains(&self.memory_cost)
            && (1..=20).contains(&self.time_cost)
            && (1..=16).contains(&self.parallelism);
        if in_range {
            Ok(())
        } else {
            Err(CoreError::InvalidFileFormat(format!(
                "KDF parameters out of range: memory={} KiB, time={}, parallelism={}",
                self.memory_cost, self.time_cost, self.parallelism
            )))
        }
    }
}

/// AES-256-GCM keyed from a password.
pub struct BackupCipher {
    cipher: Aes256Gcm,
}

impl BackupCipher {
    /// Derive the key with Argon2id from `password` and `salt`.
    pub fn derive(password: &str, salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<Self, CoreError> {
        if password.is_empty() {
            return Err(CoreError::ValidationError("Backup password must not be empty".into()));
        }
        params.check()?;

        let argon2_params = Params::new(params.memory_cost, params.time_cost, params.parallelism, Some(32))
            .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;
        let mut key = [0u8; 32];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params)
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| CoreError::Encryption(format!("Key derivation failed: {e}")))?;

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;
        Ok(Self { cipher })
    }

    /// Encrypt; the 16-byte authentication tag is appended to the output.
    pub fn seal(&self, plaintext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        self.cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))
    }

    /// Decrypt and verify. A wrong password and a tampered backup look the same.
    pub fn open(&self, ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        Ok(self.cipher.decrypt(Nonce::from_slice(nonce), ciphertext)?)
    }
}

/// Fresh random bytes for salts and nonces.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("Failed to gather randomness: {e}")))?;
    Ok(buf)
}
