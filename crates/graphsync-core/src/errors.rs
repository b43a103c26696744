use thiserror::Error;

use crate::patch::PatchOp;

/// Result type alias using GraphSyncError
pub type Result<T> = std::result::Result<T, GraphSyncError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and structured log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A graph description is malformed (dangling edge, duplicate id)
    Validation,
    /// A live collection rejected an add/remove/update
    Reconciliation,
    /// The container for a view could not be resolved
    Mount,
    /// A configuration value failed boundary validation
    InvalidConfiguration,
    /// The operation is not valid in the controller's current state
    InvalidState,
    /// The rendering engine reported a failure
    Engine,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::Reconciliation => "ERR_RECONCILIATION",
            ExErrorKind::Mount => "ERR_MOUNT",
            ExErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            ExErrorKind::InvalidState => "ERR_INVALID_STATE",
            ExErrorKind::Engine => "ERR_ENGINE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing operation
/// could attach (operation name, entity key, view id).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    view_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            view_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add view ID context
    pub fn with_view_id(mut self, id: impl Into<String>) -> Self {
        self.view_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(view_id) = &self.view_id {
            write!(f, " (view_id: {})", view_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for GraphSync operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphSyncError {
    // ===== Validation Errors =====
    /// Two nodes in one description share an id
    #[error("Duplicate node id in description: {node_id}")]
    DuplicateNodeId { node_id: String },

    /// Two edges in one description share an explicit id
    #[error("Duplicate edge id in description: {edge_id}")]
    DuplicateEdgeId { edge_id: String },

    /// Two id-less edges in one description are deep-equal
    #[error("Duplicate edge in description: {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    /// An edge endpoint names a node that is not in the description
    #[error("Edge {from} -> {to} references unknown node {node_id}")]
    DanglingEdge {
        from: String,
        to: String,
        node_id: String,
    },

    // ===== Reconciliation Errors =====
    /// A live collection rejected a patch operation
    #[error("Collection rejected {op} of entity {entity_key}: {reason}")]
    CollectionRejected {
        op: PatchOp,
        entity_key: String,
        reason: String,
    },

    // ===== Mount Errors =====
    /// No container could be resolved for the view identifier
    #[error("Container not found for view {view_id}")]
    ContainerNotFound { view_id: String },

    // ===== Configuration Errors =====
    #[error("Invalid configuration at '{path}': {reason}")]
    InvalidConfiguration { path: String, reason: String },

    // ===== Lifecycle Errors =====
    /// The controller is not in a state that permits the operation
    #[error("Operation '{op}' is not valid while the controller is {state}")]
    InvalidState { op: String, state: String },

    /// An update named a different view than the one mounted
    #[error("View id mismatch: mounted {mounted}, update supplied {supplied}")]
    ViewIdMismatch { mounted: String, supplied: String },

    // ===== Engine Errors =====
    #[error("Rendering engine failure: {message}")]
    Engine { message: String },

    // ===== Infrastructure =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl GraphSyncError {
    /// Whether this error means the description itself was rejected
    pub fn is_validation(&self) -> bool {
        ExError::from(self.clone()).kind() == ExErrorKind::Validation
    }
}

/// Conversion from GraphSyncError to ExError
impl From<GraphSyncError> for ExError {
    fn from(err: GraphSyncError) -> Self {
        let message = err.to_string();
        match err {
            GraphSyncError::DuplicateNodeId { node_id } => ExError::new(ExErrorKind::Validation)
                .with_op("validate_description")
                .with_entity_id(node_id)
                .with_message(message),

            GraphSyncError::DuplicateEdgeId { edge_id } => ExError::new(ExErrorKind::Validation)
                .with_op("validate_description")
                .with_entity_id(edge_id)
                .with_message(message),

            GraphSyncError::DuplicateEdge { .. } => ExError::new(ExErrorKind::Validation)
                .with_op("validate_description")
                .with_message(message),

            GraphSyncError::DanglingEdge { node_id, .. } => ExError::new(ExErrorKind::Validation)
                .with_op("validate_description")
                .with_entity_id(node_id)
                .with_message(message),

            GraphSyncError::CollectionRejected { op, entity_key, .. } => {
                ExError::new(ExErrorKind::Reconciliation)
                    .with_op(op.as_str())
                    .with_entity_id(entity_key)
                    .with_message(message)
            }

            GraphSyncError::ContainerNotFound { view_id } => ExError::new(ExErrorKind::Mount)
                .with_op("mount")
                .with_view_id(view_id)
                .with_message(message),

            GraphSyncError::InvalidConfiguration { .. } => {
                ExError::new(ExErrorKind::InvalidConfiguration).with_message(message)
            }

            GraphSyncError::InvalidState { op, .. } => ExError::new(ExErrorKind::InvalidState)
                .with_op(op)
                .with_message(message),

            GraphSyncError::ViewIdMismatch { supplied, .. } => {
                ExError::new(ExErrorKind::InvalidState)
                    .with_op("update")
                    .with_view_id(supplied)
                    .with_message(message)
            }

            GraphSyncError::Engine { .. } => ExError::new(ExErrorKind::Engine).with_message(message),

            GraphSyncError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to GraphSyncError
impl From<serde_json::Error> for GraphSyncError {
    fn from(err: serde_json::Error) -> Self {
        GraphSyncError::Serialization {
            message: err.to_string(),
        }
    }
}
