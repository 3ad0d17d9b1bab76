use thiserror::Error;

/// Failures surfaced by the session's edit API.
///
/// The history engine itself never fails; these are raised before a command
/// is built so nothing is applied or recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("layer limit of {max} reached")]
    LayerCapacityExceeded { max: usize },
    #[error("element '{0}' not found")]
    ElementNotFound(String),
    #[error("element '{0}' already exists")]
    DuplicateElement(String),
    #[error("layer '{0}' not found")]
    LayerNotFound(String),
    #[error("layer '{0}' is locked")]
    LayerLocked(String),
    #[error("no current layer to paste into")]
    NoCurrentLayer,
    #[error("cannot delete the last remaining layer")]
    LastLayer,
}
