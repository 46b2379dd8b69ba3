use tessera_core::{schema::RelationKind, stmt::Value, CompileError, Result};

use indexmap::IndexMap;

/// Compiled SQL text, its parameters in placeholder order, and the joins it
/// depends on.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,

    /// Joins keyed by alias, in first-use order
    pub joins: IndexMap<String, Join>,
}

/// A `LEFT JOIN` clause and the parameters of its `ON` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub sql: String,
    pub params: Vec<Value>,

    /// Whether the join can match several rows per left row
    pub kind: RelationKind,

    /// The relation traversed, as `<left alias>.<relation field>`
    pub source: String,
}

impl Fragment {
    pub fn new(sql: impl Into<String>) -> Fragment {
        Fragment {
            sql: sql.into(),
            ..Fragment::default()
        }
    }

    pub(crate) fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends another fragment's SQL, parameters and joins. Joins already
    /// present keep their position.
    pub(crate) fn append(&mut self, other: Fragment) -> Result<()> {
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
        merge_joins(&mut self.joins, other.joins)
    }

    pub(crate) fn merge_joins(&mut self, joins: IndexMap<String, Join>) -> Result<()> {
        merge_joins(&mut self.joins, joins)
    }

    /// Joins the fragments with `sep`.
    pub(crate) fn join(fragments: Vec<Fragment>, sep: &str) -> Result<Fragment> {
        let mut ret = Fragment::default();

        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                ret.push_str(sep);
            }
            ret.append(fragment)?;
        }

        Ok(ret)
    }

    /// Wraps the SQL in parentheses.
    pub(crate) fn parenthesize(mut self) -> Fragment {
        self.sql.insert(0, '(');
        self.sql.push(')');
        self
    }
}

/// Adds `other` to `joins`. A join for the same relation is only kept once;
/// two different relations with the same alias are an error.
pub(crate) fn merge_joins(
    joins: &mut IndexMap<String, Join>,
    other: IndexMap<String, Join>,
) -> Result<()> {
    for (alias, join) in other {
        insert_join(joins, alias, join)?;
    }

    Ok(())
}

pub(crate) fn insert_join(
    joins: &mut IndexMap<String, Join>,
    alias: String,
    join: Join,
) -> Result<()> {
    let existing = joins
        .iter()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(&alias));

    match existing {
        Some((_, existing)) if existing.source == join.source => Ok(()),
        Some((_, existing)) => Err(CompileError::AliasCollision {
            alias,
            first: existing.source.clone(),
            second: join.source,
        }
        .into()),
        None => {
            joins.insert(alias, join);
            Ok(())
        }
    }
}

/// Fails if a join alias shadows the alias of the root table.
pub(crate) fn check_root_alias(root: &str, joins: &IndexMap<String, Join>) -> Result<()> {
    match joins
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(root))
    {
        Some((alias, join)) => Err(CompileError::AliasCollision {
            alias: alias.clone(),
            first: root.to_string(),
            second: join.source.clone(),
        }
        .into()),
        None => Ok(()),
    }
}
