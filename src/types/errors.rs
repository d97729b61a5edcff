use std::fmt;

// === VaultError ===

/// Errors raised by the note vault backing the bookmark tables.
#[derive(Debug)]
pub enum VaultError {
    /// No file exists at the given vault path.
    NotFound(String),
    /// Reading, writing or listing the vault failed.
    Io(String),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::NotFound(path) => write!(f, "Vault file not found: {}", path),
            VaultError::Io(msg) => write!(f, "Vault I/O error: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

// === ImportError ===

/// Errors related to importing a bookmarks export.
#[derive(Debug)]
pub enum ImportError {
    /// The export contains no anchor elements at all.
    EmptyInput,
    /// Anchors exist, but none carries an http(s) link.
    NoValidLinks,
    /// The vault rejected a read or write.
    Vault(VaultError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::EmptyInput => write!(f, "No bookmarks found in the export file"),
            ImportError::NoValidLinks => {
                write!(f, "The export file contains no http(s) bookmarks")
            }
            ImportError::Vault(err) => write!(f, "Import failed: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Vault(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VaultError> for ImportError {
    fn from(err: VaultError) -> Self {
        ImportError::Vault(err)
    }
}

// === FetchError ===

/// Errors related to fetching a bookmarked page.
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    Network(String),
    /// The server answered with a non-success status code.
    HttpStatus(u16),
    /// The response could not be interpreted as a page.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::HttpStatus(code) => write!(f, "HTTP status {}", code),
            FetchError::Parse(msg) => write!(f, "Page parse error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// === CheckError ===

/// Errors that stop an accessibility pass before it starts or while it runs.
#[derive(Debug)]
pub enum CheckError {
    /// Accessibility checking is switched off in the settings.
    Disabled,
    /// The selected documents contain no bookmark rows.
    NoBookmarks,
    /// The vault rejected a read or write.
    Vault(VaultError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Disabled => write!(
                f,
                "Bookmark accessibility checking is disabled. Enable it in settings first."
            ),
            CheckError::NoBookmarks => write!(f, "No bookmarks found to check"),
            CheckError::Vault(err) => write!(f, "Accessibility check failed: {}", err),
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Vault(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VaultError> for CheckError {
    fn from(err: VaultError) -> Self {
        CheckError::Vault(err)
    }
}

// === CleanupError ===

/// Errors related to the duplicate cleanup pass.
#[derive(Debug)]
pub enum CleanupError {
    /// The selected documents contain no bookmark rows.
    NoBookmarks,
    /// The vault rejected a read or write.
    Vault(VaultError),
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupError::NoBookmarks => write!(f, "No bookmarks found to deduplicate"),
            CleanupError::Vault(err) => write!(f, "Duplicate cleanup failed: {}", err),
        }
    }
}

impl std::error::Error for CleanupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CleanupError::Vault(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VaultError> for CleanupError {
    fn from(err: VaultError) -> Self {
        CleanupError::Vault(err)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
