//! WITH, compound (UNION / INTERSECT) and row-lock nodes.

use super::{Identifier, Subquery};

/// `[RECURSIVE] name AS (subquery)`
///
/// The name is emitted verbatim so it may carry a column list, e.g. `t(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    recursive: bool,
    name: String,
    subquery: Subquery,
}

impl CommonTableExpression {
    pub fn new(name: impl Into<String>, subquery: impl Into<Subquery>) -> Self {
        Self {
            recursive: false,
            name: name.into(),
            subquery: subquery.into(),
        }
    }

    pub fn recursive(name: impl Into<String>, subquery: impl Into<Subquery>) -> Self {
        Self {
            recursive: true,
            ..Self::new(name, subquery)
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subquery(&self) -> &Subquery {
        &self.subquery
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
}

impl CompoundKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompoundKind::Union => "UNION",
            CompoundKind::UnionAll => "UNION ALL",
            CompoundKind::Intersect => "INTERSECT",
            CompoundKind::IntersectAll => "INTERSECT ALL",
        }
    }
}

/// ` UNION (SELECT ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundExpression {
    kind: CompoundKind,
    rhs: Subquery,
}

impl CompoundExpression {
    pub fn new(kind: CompoundKind, rhs: impl Into<Subquery>) -> Self {
        Self {
            kind,
            rhs: rhs.into(),
        }
    }

    pub fn kind(&self) -> CompoundKind {
        self.kind
    }

    pub fn rhs(&self) -> &Subquery {
        &self.rhs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

impl LockStrength {
    pub fn as_sql(&self) -> &'static str {
        match self {
            LockStrength::Update => "FOR UPDATE",
            LockStrength::NoKeyUpdate => "FOR NO KEY UPDATE",
            LockStrength::Share => "FOR SHARE",
            LockStrength::KeyShare => "FOR KEY SHARE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockWait {
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// `FOR UPDATE [OF t] [NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, PartialEq)]
pub struct Lock {
    strength: LockStrength,
    of: Vec<Identifier>,
    wait: LockWait,
}

impl Lock {
    pub fn new(strength: LockStrength) -> Self {
        Self {
            strength,
            of: Vec::new(),
            wait: LockWait::Wait,
        }
    }

    pub fn for_update() -> Self {
        Self::new(LockStrength::Update)
    }

    pub fn for_share() -> Self {
        Self::new(LockStrength::Share)
    }

    /// Returns a copy restricted to the given tables.
    pub fn of<I, T>(&self, tables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identifier>,
    {
        Self {
            of: tables.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    pub fn nowait(&self) -> Self {
        Self {
            wait: LockWait::NoWait,
            ..self.clone()
        }
    }

    pub fn skip_locked(&self) -> Self {
        Self {
            wait: LockWait::SkipLocked,
            ..self.clone()
        }
    }

    pub fn strength(&self) -> LockStrength {
        self.strength
    }

    pub fn tables(&self) -> &[Identifier] {
        &self.of
    }

    pub fn wait(&self) -> LockWait {
        self.wait
    }
}
