use super::{Error, ErrorKind};

/// Error raised while compiling an expression or building a query plan.
///
/// These always indicate a programming error in a mapping or in the query
/// AST. They are surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The field is not mapped to a column on the model.
    UnmappedField { model: &'static str, field: String },

    /// A path segment does not name a relation on the model.
    UnknownRelation {
        model: &'static str,
        relation: String,
        path: String,
    },

    /// The relation's target type has no mapping in the catalog.
    UnmappedRelationType {
        relation: String,
        target: &'static str,
    },

    /// The method has no SQL translation.
    UnsupportedMethod { name: String },

    /// An element list has the wrong number of items.
    ArityMismatch {
        node: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A literal method argument has the wrong kind.
    MethodArgumentType {
        method: String,
        position: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// An `And`/`Or` clause has no items.
    EmptyBooleanGroup { node: &'static str },

    /// Relation filters may only reference the relation's own columns.
    NestedPath { relation: String, path: String },

    /// Two tables in one query would be selected under the same alias.
    /// Aliases are compared ignoring ASCII case, as SQLite does.
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },
}

impl std::error::Error for CompileError {}

impl core::fmt::Display for CompileError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use CompileError::*;

        match self {
            UnmappedField { model, field } => {
                write!(f, "unmapped field `{field}` on `{model}`")
            }
            UnknownRelation {
                model,
                relation,
                path,
            } => write!(
                f,
                "unknown relation `{relation}` on `{model}` (path `{path}`)"
            ),
            UnmappedRelationType { relation, target } => write!(
                f,
                "relation `{relation}` targets `{target}`, which has no mapping"
            ),
            UnsupportedMethod { name } => write!(f, "unsupported method `{name}`"),
            ArityMismatch {
                node,
                expected,
                actual,
            } => write!(
                f,
                "arity mismatch in `{node}`: expected {expected}, got {actual}"
            ),
            MethodArgumentType {
                method,
                position,
                expected,
                actual,
            } => write!(
                f,
                "argument {position} of `{method}` must be {expected}, got {actual}"
            ),
            EmptyBooleanGroup { node } => write!(f, "`{node}` requires at least one clause"),
            NestedPath { relation, path } => write!(
                f,
                "filter on relation `{relation}` cannot traverse path `{path}`"
            ),
            AliasCollision {
                alias,
                first,
                second,
            } => write!(
                f,
                "alias `{alias}` is used by both `{first}` and `{second}`"
            ),
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Error {
        Error::from(ErrorKind::Compile(err))
    }
}

impl Error {
    /// Returns `true` if this error, or any error it wraps, is a compile
    /// error.
    pub fn is_compile_error(&self) -> bool {
        self.as_compile_error().is_some()
    }

    /// Returns the compile error in the context chain, if any.
    pub fn as_compile_error(&self) -> Option<&CompileError> {
        self.find_kind(|kind| match kind {
            ErrorKind::Compile(err) => Some(err),
            _ => None,
        })
    }
}
