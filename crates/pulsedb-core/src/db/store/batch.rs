///
/// Precondition
///
/// State a key must be in for a batch to apply.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Precondition {
    Absent(String),
    Present(String),
    /// Exact stored bytes, or absence when `None`.
    Equals(String, Option<Vec<u8>>),
}

impl Precondition {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Absent(key) | Self::Present(key) | Self::Equals(key, _) => key,
        }
    }

    /// Check this precondition against the current stored value.
    #[must_use]
    pub fn holds(&self, current: Option<&[u8]>) -> bool {
        match self {
            Self::Absent(_) => current.is_none(),
            Self::Present(_) => current.is_some(),
            Self::Equals(_, expected) => expected.as_deref() == current,
        }
    }
}

///
/// WriteOp
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WriteOp {
    Put(String, Vec<u8>),
    Delete(String),
}

impl WriteOp {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put(key, _) | Self::Delete(key) => key,
        }
    }
}

///
/// WriteBatch
///
/// Preconditions plus ordered writes, applied all-or-nothing.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WriteBatch {
    preconditions: Vec<Precondition>,
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn expect_absent(mut self, key: impl Into<String>) -> Self {
        self.preconditions.push(Precondition::Absent(key.into()));
        self
    }

    #[must_use]
    pub fn expect_present(mut self, key: impl Into<String>) -> Self {
        self.preconditions.push(Precondition::Present(key.into()));
        self
    }

    #[must_use]
    pub fn expect_value(mut self, key: impl Into<String>, value: Option<Vec<u8>>) -> Self {
        self.preconditions
            .push(Precondition::Equals(key.into(), value));
        self
    }

    #[must_use]
    pub fn put(mut self, key: impl Into<String>, value: Vec<u8>) -> Self {
        self.ops.push(WriteOp::Put(key.into(), value));
        self
    }

    #[must_use]
    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Delete(key.into()));
        self
    }

    #[must_use]
    pub fn preconditions(&self) -> &[Precondition] {
        &self.preconditions
    }

    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Precondition>, Vec<WriteOp>) {
        (self.preconditions, self.ops)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

///
/// CommitOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommitOutcome {
    Committed,
    /// The first precondition that did not hold.
    Conflict { key: String },
}

impl CommitOutcome {
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}
