///
/// Constants
///

pub const MAX_ENTITY_NAME_LEN: usize = 48;

///
/// EntityModel
///
/// Static per-type storage facts. Names are checked at compile time when the
/// model is built in a `static`/`const` context.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust path of the entity type.
    pub path: &'static str,

    /// Key-space prefix for records of this type.
    pub entity_name: &'static str,

    /// Storage name of the membership index.
    pub index_name: &'static str,
}

impl EntityModel {
    /// Build a model, panicking (at compile time in const context) on an
    /// invalid entity or index name.
    #[must_use]
    pub const fn new(
        path: &'static str,
        entity_name: &'static str,
        index_name: &'static str,
    ) -> Self {
        assert!(is_valid_name(entity_name), "invalid entity name");
        assert!(is_valid_name(index_name), "invalid index name");

        Self {
            path,
            entity_name,
            index_name,
        }
    }
}

/// Names are non-empty, bounded, and limited to `[A-Za-z0-9_-]`.
///
/// The storage key separator `:` can therefore never appear in a name.
#[must_use]
pub const fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_ENTITY_NAME_LEN {
        return false;
    }

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
            return false;
        }
        i += 1;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_style_names_are_valid() {
        for name in ["connector", "jasmin-user", "jasmin-users", "route_v2"] {
            assert!(is_valid_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn separator_and_empty_names_are_rejected() {
        for name in ["", "a:b", "with space", "slash/name"] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }

        let long = "x".repeat(MAX_ENTITY_NAME_LEN + 1);
        assert!(!is_valid_name(&long));
    }
}
