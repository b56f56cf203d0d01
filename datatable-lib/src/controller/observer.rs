//! Outbound notifications.

/// Receives what a table emits to the page that owns it.
///
/// Every method has a no-op default, so implementors only override what they
/// care about. Calls are made synchronously from inside the controller
/// operation that caused them.
pub trait TableObserver<R> {
    /// The selection changed or was re-materialised after a record refresh.
    ///
    /// `selected` is in raw-record order and may contain records that are
    /// not on the current page.
    fn selection_changed(&mut self, _selected: &[&R]) {}

    /// A row was activated (clicked or opened).
    fn row_activated(&mut self, _record: &R) {}

    /// An action was invoked on `targets`: the selection for toolbar
    /// actions, a single row for row actions.
    fn action_invoked(&mut self, _action: &str, _targets: &[&R]) {}
}

/// Adapts a closure into a selection-only observer.
pub(crate) struct SelectionCallback<F>(pub(crate) F);

impl<R, F> TableObserver<R> for SelectionCallback<F>
where
    F: FnMut(&[&R]),
{
    fn selection_changed(&mut self, selected: &[&R]) {
        (self.0)(selected)
    }
}
