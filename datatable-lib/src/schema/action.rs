//! Table actions.

/// Where an action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPlacement {
    /// Toolbar/header action; targets the current selection.
    #[default]
    Toolbar,
    /// Per-row action; targets the row it was invoked on.
    Row,
}

/// A command the enclosing page can react to, e.g. "Export" or "Archive".
///
/// Actions are forwarded to the controller's observer together with the
/// records they target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub key: String,
    pub label: String,
    pub placement: ActionPlacement,
    /// Toolbar actions with this flag are disabled while nothing is selected.
    pub requires_selection: bool,
}

impl Action {
    /// A toolbar action.
    pub fn toolbar(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            placement: ActionPlacement::Toolbar,
            requires_selection: false,
        }
    }

    /// A per-row action.
    pub fn row(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            placement: ActionPlacement::Row,
            requires_selection: false,
        }
    }

    /// Disable the action while the selection is empty.
    pub fn requires_selection(mut self) -> Self {
        self.requires_selection = true;
        self
    }
}
