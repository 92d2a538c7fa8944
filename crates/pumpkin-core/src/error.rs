use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes surfaced by the library and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InputNotFound,
    MalformedInput,
    RootNotFound,
    IdMapMismatch,
    InvalidEnumValue,
    UnsupportedConfiguration,
    MissingInformationContent,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InputNotFound => "E1002",
            Self::MalformedInput => "E1003",
            Self::RootNotFound => "E2001",
            Self::IdMapMismatch => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::UnsupportedConfiguration => "E3001",
            Self::MissingInformationContent => "E3002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InputNotFound => "Input file not found",
            Self::MalformedInput => "Malformed input row",
            Self::RootNotFound => "Root term not found",
            Self::IdMapMismatch => "IC store and graph disagree on term ids",
            Self::InvalidEnumValue => "Invalid method/namespace/backend value",
            Self::UnsupportedConfiguration => "Unsupported option combination",
            Self::MissingInformationContent => "Information content required",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in pumpkin.toml and retry."),
            Self::InputNotFound => Some("Check the closure and annotation file paths."),
            Self::MalformedInput => {
                Some("Rows need at least two tab-separated columns; comments start with '#'.")
            }
            Self::RootNotFound => {
                Some("Pick a root that has descendants in the closure file (e.g. HP:0000118).")
            }
            Self::IdMapMismatch => Some("Build the IC store from the same graph it is paired with."),
            Self::InvalidEnumValue => Some("Run `pk methods` to list the supported values."),
            Self::UnsupportedConfiguration => {
                Some("Drop either the namespace filter or normalization.")
            }
            Self::MissingInformationContent => {
                Some("Pass --annotations so information content can be computed.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading, encoding or pairing ontology data.
#[derive(Debug, thiserror::Error)]
pub enum PumpkinError {
    #[error("root term {0} has no descendants in the closure edges")]
    RootNotFound(String),

    #[error("IC store was built for id map {store}, graph uses {graph}")]
    IdMapMismatch { graph: String, store: String },

    #[error("IC store holds {actual} values for {expected} terms")]
    IcLengthMismatch { expected: usize, actual: usize },

    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("unknown graph backend: {0}")]
    UnknownBackend(String),

    #[error("malformed row at line {line}: {content:?}")]
    MalformedRow { line: usize, content: String },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl PumpkinError {
    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RootNotFound(_) => ErrorCode::RootNotFound,
            Self::IdMapMismatch { .. } | Self::IcLengthMismatch { .. } => ErrorCode::IdMapMismatch,
            Self::UnknownNamespace(_) | Self::UnknownBackend(_) => ErrorCode::InvalidEnumValue,
            Self::MalformedRow { .. } | Self::Read { .. } => ErrorCode::MalformedInput,
            Self::Io { .. } => ErrorCode::InputNotFound,
            Self::Config { .. } => ErrorCode::ConfigParseError,
        }
    }
}

pub type Result<T, E = PumpkinError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{ErrorCode, PumpkinError};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::ConfigParseError,
        ErrorCode::InputNotFound,
        ErrorCode::MalformedInput,
        ErrorCode::RootNotFound,
        ErrorCode::IdMapMismatch,
        ErrorCode::InvalidEnumValue,
        ErrorCode::UnsupportedConfiguration,
        ErrorCode::MissingInformationContent,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let raw = code.code();
            assert_eq!(raw.len(), 5);
            assert!(raw.starts_with('E'));
            assert!(raw[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn errors_map_to_codes() {
        let err = PumpkinError::MalformedRow {
            line: 3,
            content: "HP:1".into(),
        };
        assert_eq!(err.code(), ErrorCode::MalformedInput);
        assert_eq!(err.to_string(), "malformed row at line 3: \"HP:1\"");
        assert_eq!(
            PumpkinError::RootNotFound("HP:0000118".into()).code().code(),
            "E2001"
        );
    }
}
