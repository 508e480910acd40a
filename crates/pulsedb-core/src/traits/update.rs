use crate::patch::MergePatchError;
use std::fmt::Debug;

///
/// UpdateView
///
/// Partial update payload for a record type. Every field of the view is
/// optional; supplied fields replace the current value wholesale.
///

pub trait UpdateView {
    type UpdateViewType: Clone + Debug + Default;

    /// Merge a partial update into `self`.
    fn merge(&mut self, patch: Self::UpdateViewType) -> Result<(), MergePatchError>;
}
