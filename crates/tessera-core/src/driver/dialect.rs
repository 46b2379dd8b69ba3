use crate::Error;

use std::{borrow::Cow, fmt::Debug};

/// Per-database SQL conventions used by the compiler.
pub trait Dialect: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn escape_table(&self, name: &str) -> String;

    fn escape_column(&self, name: &str) -> String;

    /// A column qualified by its table alias.
    fn escape_table_column(&self, table: &str, column: &str) -> String {
        format!("{}.{}", self.escape_table(table), self.escape_column(column))
    }

    /// Equality operator that treats two NULLs as equal.
    fn null_safe_eq_operator(&self) -> &'static str;

    /// SQL template for a method call, with one `%s` per argument.
    fn method_template(&self, name: &str) -> Option<&'static str>;

    /// Returns `true` if `err` reports a unique or key constraint violation.
    fn is_conflict_error(&self, err: &Error) -> bool;

    /// Whether tuple lists on the right of `IN` must be written as
    /// `VALUES (..), (..)`.
    fn row_values_in_list(&self) -> bool {
        false
    }

    /// LIMIT to write when only an OFFSET is requested, for databases that
    /// do not accept OFFSET on its own.
    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }

    /// Rewrites `?` placeholders into the database's native syntax.
    fn bind_placeholders<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(sql)
    }
}
