//! Convenient imports for typical `sqlweave` usage.
//!
//! ```ignore
//! use sqlweave::prelude::*;
//! ```

pub use crate::exp::{self, ExprExt};
pub use crate::qb::{self, SqlQb};
pub use crate::mapper::RecordType;
pub use crate::{QueryBuilder, Record, SqlError, SqlResult, Value};
