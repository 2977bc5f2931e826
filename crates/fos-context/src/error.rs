//! Error types
//!
//! Three families of failure are kept apart so callers can tell them
//! apart programmatically:
//! - usage errors: the caller misused the public surface
//! - internal errors: the object model itself is inconsistent
//! - not implemented: the operation is declared but belongs to a layer
//!   that has not been built yet

/// Where internal consistency failures should be reported.
pub const REPORT_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

/// Result alias used by every DOM accessor
pub type DomResult<T> = Result<T, DomError>;

/// Coarse classification of a [`DomError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API was misused (TypeError-class)
    Usage,
    /// The object model is broken
    Internal,
    /// The operation is declared but not available
    NotImplemented,
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Illegal constructor")]
    IllegalConstructor,

    #[error("Illegal invocation")]
    IllegalInvocation,

    #[error("Failed to construct '{interface}': {required} argument required, but only {present} present.")]
    ArgumentCount {
        interface: &'static str,
        required: usize,
        present: usize,
    },

    #[error("Failed to construct '{interface}': parameter {index} is not of type '{expected}'.")]
    ConstructParameter {
        interface: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("Failed to execute '{method}' on '{interface}': parameter {index} is not of type '{expected}'.")]
    ExecuteParameter {
        method: &'static str,
        interface: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("{0}\n\nThis is an internal error in the fOS object model. If the issue persists, please file a bug at {url}", url = REPORT_URL)]
    Internal(#[from] InternalError),

    #[error("{0} is not yet implemented")]
    NotImplemented(&'static str),
}

impl DomError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Internal(_) => ErrorKind::Internal,
            Self::NotImplemented(_) => ErrorKind::NotImplemented,
            _ => ErrorKind::Usage,
        }
    }

    /// Whether the caller misused the API
    pub fn is_usage(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }

    /// Whether this signals a defect in the object model
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }

    /// Whether the operation is declared but not available
    pub fn is_not_implemented(&self) -> bool {
        self.kind() == ErrorKind::NotImplemented
    }
}

/// Internal consistency failure
///
/// Never caused by a caller passing bad input: either an interface forgot
/// to initialize an attribute or two layers disagree on a record's shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("internal state already exists for {interface} instance {instance}")]
    DuplicateRecord {
        interface: &'static str,
        instance: u64,
    },

    #[error("no internal state found for {interface} instance when accessing [instance].{attribute}")]
    MissingRecord {
        interface: &'static str,
        attribute: &'static str,
    },

    #[error("cannot access property \"{attribute}\" on {interface} instance context, as it does not exist; all internal context attributes must be initialized when the instance is constructed")]
    UnknownAttribute {
        interface: &'static str,
        attribute: &'static str,
    },

    #[error("internal attribute \"{attribute}\" on {interface} instance holds a value of an unexpected shape")]
    UnexpectedValue {
        interface: &'static str,
        attribute: &'static str,
    },

    #[error("unsupported node type: {0}")]
    UnsupportedNodeType(u16),
}
