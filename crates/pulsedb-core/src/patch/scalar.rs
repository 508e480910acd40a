/// Replace `value` when the patch supplies a field.
///
/// Falsy payloads (`0`, `false`, `""`, empty lists) still overwrite.
pub fn merge_field<T>(value: &mut T, patch: Option<T>) {
    if let Some(next) = patch {
        *value = next;
    }
}

/// Apply an optional-field patch.
///
/// The outer `Option` says whether the field was supplied at all; the inner
/// one distinguishes setting a value from clearing it.
pub fn merge_option<T>(value: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(next) = patch {
        *value = next;
    }
}
