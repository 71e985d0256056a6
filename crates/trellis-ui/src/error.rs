/// Errors returned by widget tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The handle refers to a widget that was removed.
    StaleHandle,

    /// The handle belongs to a different widget kind than the operation expects.
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The widget kind was never registered with the tree.
    UnregisteredKind(String),

    /// The parent's kind does not accept children.
    ChildrenNotAllowed { parent: &'static str },

    /// The memory budget cannot cover the allocation.
    OutOfMemory { requested: usize, available: usize },

    /// Color slot index outside the kind's color table.
    InvalidColorIndex { index: u8, count: usize },

    /// The desktop root cannot be removed.
    RootRemoval,

    /// A plugin of the same type was already added.
    DuplicatePlugin(String),
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetError::StaleHandle => write!(f, "Widget handle is stale"),
            WidgetError::KindMismatch { expected, found } => {
                write!(f, "Expected a {} widget, found {}", expected, found)
            }
            WidgetError::UnregisteredKind(name) => {
                write!(f, "Widget kind '{}' is not registered", name)
            }
            WidgetError::ChildrenNotAllowed { parent } => {
                write!(f, "{} widgets cannot have children", parent)
            }
            WidgetError::OutOfMemory {
                requested,
                available,
            } => write!(
                f,
                "Out of widget memory: requested {} bytes, {} available",
                requested, available
            ),
            WidgetError::InvalidColorIndex { index, count } => write!(
                f,
                "Color index {} out of range (kind has {} colors)",
                index, count
            ),
            WidgetError::RootRemoval => write!(f, "The desktop widget cannot be removed"),
            WidgetError::DuplicatePlugin(name) => {
                write!(f, "Plugin '{}' is already registered", name)
            }
        }
    }
}

impl std::error::Error for WidgetError {}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
