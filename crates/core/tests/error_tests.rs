// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use budget_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("Amount is required".into());
        assert_eq!(err.to_string(), "Validation failed: Amount is required");
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound {
            kind: "Bill",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "Bill not found: 42");
    }

    #[test]
    fn import() {
        let err = CoreError::Import("expected value at line 1 column 1".into());
        assert_eq!(
            err.to_string(),
            "Import failed: expected value at line 1 column 1"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("boom".into());
        assert_eq!(err.to_string(), "Serialization error: boom");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("bad json".into());
        assert_eq!(err.to_string(), "Deserialization error: bad json");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage {
            key: "budgetData".into(),
            message: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "Storage error (budgetData): quota exceeded");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("disk full".into());
        assert_eq!(err.to_string(), "File I/O error: disk full");
    }

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("bad magic".into());
        assert_eq!(err.to_string(), "Invalid backup format: bad magic");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(7);
        assert_eq!(err.to_string(), "Unsupported backup version: 7");
    }

    #[test]
    fn encryption() {
        let err = CoreError::Encryption("no entropy".into());
        assert_eq!(err.to_string(), "Encryption failed: no entropy");
    }

    #[test]
    fn decryption() {
        assert_eq!(
            CoreError::Decryption.to_string(),
            "Decryption failed — wrong password or corrupted backup"
        );
    }
}

// ── From conversions ────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("read-only")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_aead_error() {
        let err: CoreError = aes_gcm::Error.into();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn question_mark_converts_io() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here/budget.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }
}

// ── Trait bounds ────────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Decryption);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn debug_names_variant() {
        let debug = format!("{:?}", CoreError::UnsupportedVersion(3));
        assert!(debug.contains("UnsupportedVersion"));
    }
}
