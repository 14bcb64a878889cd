use thiserror::Error;

/// Result type alias using MonError
pub type Result<T> = std::result::Result<T, MonError>;

/// Canonical error kind taxonomy
///
/// Stable classification of every failure mode in a monitoring run. Each
/// kind maps to a stable error code usable for programmatic handling and
/// test assertions. Fatality is a property of the kind: everything except
/// `NotifySend` aborts the run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonErrorKind {
    // Pre-flight
    /// A required configuration option is absent (fatal, no side effects)
    #[error("missing configuration")]
    ConfigMissing,
    /// Configuration option present but unusable
    #[error("invalid configuration")]
    ConfigInvalid,

    // Platform collaborator
    /// The platform rejected the supplied username/password
    #[error("bad credentials")]
    BadCredentials,
    /// Login failed for a reason other than bad credentials
    #[error("authentication failure")]
    Auth,
    /// The monitored account could not be resolved to a profile
    #[error("profile not found")]
    ProfileNotFound,
    /// Follower/followee retrieval failed; nothing partial is used
    #[error("fetch failure")]
    Fetch,

    // Side channels
    /// Notification delivery failed (non-fatal, isolated per message)
    #[error("notification send failure")]
    NotifySend,

    // Persistence
    /// Snapshot store read or commit failed
    #[error("persistence failure")]
    Persistence,

    // Integration/IO
    #[error("serialization failure")]
    Serialization,
    #[error("external service failure")]
    ExternalService,
    #[error("I/O failure")]
    Io,

    // Internal
    #[error("internal error")]
    Internal,
}

impl MonErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            MonErrorKind::ConfigMissing => "ERR_CONFIG_MISSING",
            MonErrorKind::ConfigInvalid => "ERR_CONFIG_INVALID",
            MonErrorKind::BadCredentials => "ERR_BAD_CREDENTIALS",
            MonErrorKind::Auth => "ERR_AUTH",
            MonErrorKind::ProfileNotFound => "ERR_PROFILE_NOT_FOUND",
            MonErrorKind::Fetch => "ERR_FETCH",
            MonErrorKind::NotifySend => "ERR_NOTIFY_SEND",
            MonErrorKind::Persistence => "ERR_PERSISTENCE",
            MonErrorKind::Serialization => "ERR_SERIALIZATION",
            MonErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            MonErrorKind::Io => "ERR_IO",
            MonErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind aborts the run
    ///
    /// Only notification failures are tolerated: they are logged and the
    /// run proceeds to the next category and the commit phase.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, MonErrorKind::NotifySend)
    }
}

/// Canonical structured error type
///
/// Structured representation of a failure with classification fields for
/// programmatic handling and context for debugging: the operation that
/// failed, the monitored account involved, and a human-readable message.
#[derive(Debug, Clone)]
pub struct MonError {
    kind: MonErrorKind,
    op: Option<String>,
    account: Option<String>,
    message: String,
    source: Option<Box<MonError>>,
}

impl MonError {
    /// Create a new error with the specified kind
    pub fn new(kind: MonErrorKind) -> Self {
        Self {
            kind,
            op: None,
            account: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add monitored-account context
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: MonError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> MonErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the monitored-account context, if any
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&MonError> {
        self.source.as_deref()
    }

    /// Whether this error aborts the run (delegates to the kind)
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl std::fmt::Display for MonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(account) = &self.account {
            write!(f, " (account: {})", account)?;
        }
        Ok(())
    }
}

impl std::error::Error for MonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}
