use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::budget_data::{BudgetData, ExportDocument, ImportDocument};

use super::encryption::{self, BackupCipher, KdfParams, NONCE_LEN, SALT_LEN};
use super::format::{BackupHeader, CURRENT_VERSION};
use super::store::KeyValueStore;

/// High-level persistence: the stored document, JSON export/import, and
/// encrypted backups.
pub struct StorageManager;

impl StorageManager {
    /// Read the document stored under `key`. Nothing stored yet means an empty budget.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<BudgetData, CoreError> {
        match store.get(key)? {
            Some(json) => {
                let data: BudgetData = serde_json::from_str(&json).map_err(|e| {
                    CoreError::Deserialization(format!("Stored document under '{key}' is unreadable: {e}"))
                })?;
                info!(
                    store = store.name(),
                    key,
                    transactions = data.transactions.len(),
                    subscriptions = data.subscriptions.len(),
                    bills = data.bills.len(),
                    "loaded budget document"
                );
                Ok(data)
            }
            None => {
                info!(store = store.name(), key, "no stored budget document, starting empty");
                Ok(BudgetData::default())
            }
        }
    }

    /// Overwrite the document under `key` with `data`.
    pub fn save(store: &mut dyn KeyValueStore, key: &str, data: &BudgetData) -> Result<(), CoreError> {
        let json = serde_json::to_string(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize budget document: {e}")))?;
        store.set(key, &json)?;
        debug!(store = store.name(), key, bytes = json.len(), "saved budget document");
        Ok(())
    }

    /// Pretty-printed export: the full document plus `exportDate`.
    pub fn export_json(data: &BudgetData, exported_at: DateTime<Utc>) -> Result<String, CoreError> {
        let document = ExportDocument {
            data,
            export_date: exported_at,
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize export: {e}")))
    }

    /// Parse a user-supplied import file without touching any state.
    pub fn parse_import(json: &str) -> Result<ImportDocument, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::Import(e.to_string()))
    }

    /// Export sealed with a password, using the default key-derivation cost.
    pub fn export_encrypted(
        data: &BudgetData,
        exported_at: DateTime<Utc>,
        password: &str,
    ) -> Result<Vec<u8>, CoreError> {
        Self::export_encrypted_with(data, exported_at, password, &KdfParams::default())
    }

    /// Export sealed with a password and explicit key-derivation cost.
    ///
    /// Flow: export JSON → AES-256-GCM(Argon2id(password, fresh salt)) → BDGT container
    pub fn export_encrypted_with(
        data: &BudgetData,
        exported_at: DateTime<Utc>,
        password: &str,
        kdf_params: &KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let json = Self::export_json(data, exported_at)?;

        let salt = encryption::random_bytes::<SALT_LEN>()?;
        let nonce = encryption::random_bytes::<NONCE_LEN>()?;
        let cipher = BackupCipher::derive(password, &salt, kdf_params)?;
        let ciphertext = cipher.seal(json.as_bytes(), &nonce)?;

        let header = BackupHeader {
            version: CURRENT_VERSION,
            kdf_params: *kdf_params,
            salt,
            nonce,
        };
        Ok(header.encode(&ciphertext))
    }

    /// Open an encrypted backup and parse it as an import document.
    pub fn import_encrypted(bytes: &[u8], password: &str) -> Result<ImportDocument, CoreError> {
        let (header, ciphertext) = BackupHeader::decode(bytes)?;
        let cipher = BackupCipher::derive(password, &header.salt, &header.kdf_params)?;
        let plaintext = cipher.open(ciphertext, &header.nonce)?;
        let json = std::str::from_utf8(&plaintext)
            .map_err(|e| CoreError::Import(format!("Backup is not valid UTF-8: {e}")))?;
        Self::parse_import(json)
    }
}
