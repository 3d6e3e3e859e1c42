use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN};
use crate::errors::CoreError;

/// Magic bytes identifying an encrypted budget backup.
pub const MAGIC: &[u8; 4] = b"BDGT";

pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + ciphertext_len(8)
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Everything in front of the ciphertext.
///
/// ```text
/// [BDGT][version u16 LE][memory u32 LE][time u32 LE][parallelism u32 LE]
/// [salt 16B][nonce 12B][ciphertext_len u64 LE][ciphertext...]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl BackupHeader {
    /// Header followed by `ciphertext`, ready to write out.
    pub fn encode(&self, ciphertext: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.version.to_le_bytes());
        for value in [
            self.kdf_params.memory_cost,
            self.kdf_params.time_cost,
            self.kdf_params.parallelism,
        ] {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
        buf.extend_from_slice(ciphertext);
        buf
    }

    /// Split raw backup bytes into the header and the ciphertext.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8]), CoreError> {
        if data.len() < HEADER_LEN {
            return Err(CoreError::InvalidFileFormat(format!(
                "backup is {} bytes, shorter than the {HEADER_LEN}-byte header",
                data.len()
            )));
        }

        let mut reader = Reader { data, pos: 0 };
        if reader.take::<4>() != *MAGIC {
            return Err(CoreError::InvalidFileFormat("not a budget backup (bad magic)".into()));
        }

        let version = u16::from_le_bytes(reader.take());
        if version == 0 || version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let kdf_params = KdfParams {
            memory_cost: u32::from_le_bytes(reader.take()),
            time_cost: u32::from_le_bytes(reader.take()),
            parallelism: u32::from_le_bytes(reader.take()),
        };
        kdf_params.check()?;

        let salt = reader.take();
        let nonce = reader.take();
        let ciphertext_len = u64::from_le_bytes(reader.take());

        let rest = &data[reader.pos..];
        let ciphertext = usize::try_from(ciphertext_len)
            .ok()
            .and_then(|len| rest.get(..len))
            .ok_or_else(|| {
                CoreError::InvalidFileFormat(format!(
                    "backup truncated: header promises {ciphertext_len} bytes, {} present",
                    rest.len()
                ))
            })?;

        Ok((
            Self {
                version,
                kdf_params,
                salt,
                nonce,
            },
            ciphertext,
        ))
    }
}

/// Fixed-size reads over a buffer already checked to hold the full header.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        out
    }
}
