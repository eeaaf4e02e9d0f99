use crate::exp::ColumnList;

/// `RESTART IDENTITY` / `CONTINUE IDENTITY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruncateIdentity {
    Restart,
    Continue,
}

impl TruncateIdentity {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TruncateIdentity::Restart => "RESTART IDENTITY",
            TruncateIdentity::Continue => "CONTINUE IDENTITY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TruncateOptions {
    pub cascade: bool,
    pub restrict: bool,
    pub identity: Option<TruncateIdentity>,
}

/// Slots of a TRUNCATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TruncateClauses {
    tables: ColumnList,
    options: TruncateOptions,
}

impl TruncateClauses {
    pub fn new(tables: ColumnList) -> Self {
        Self {
            tables,
            options: TruncateOptions::default(),
        }
    }

    pub fn tables(&self) -> &ColumnList {
        &self.tables
    }

    pub fn set_tables(&self, tables: ColumnList) -> Self {
        Self {
            tables,
            ..self.clone()
        }
    }

    pub fn options(&self) -> TruncateOptions {
        self.options
    }

    pub fn set_options(&self, options: TruncateOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }
}
