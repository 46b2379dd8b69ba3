use tessera_core::{
    schema::{ColumnRef, JoinPair, Mapping, Relation, RelationKind},
    stmt::Field,
    Catalog, CompileError, Result,
};

/// Resolves field paths, simple or dotted, against a root mapping.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    catalog: &'a Catalog,
    mapping: &'a Mapping,

    /// Alias of the root table
    alias: &'a str,

    /// Prepended to every join alias the resolver creates
    alias_prefix: &'a str,
}

/// One relation traversal, emitted as a `LEFT JOIN`.
#[derive(Debug, Clone)]
pub struct JoinStep<'a> {
    pub relation: &'a Relation,

    /// Mapping of the joined table
    pub mapping: &'a Mapping,

    /// Alias of the table the join starts from
    pub left_alias: String,

    pub right_table: &'a str,

    /// Alias of the joined table: the traversed relation names joined by `_`
    pub path_alias: String,
}

/// A resolved field: the joins to reach it and its column.
#[derive(Debug, Clone)]
pub struct ResolvedField<'a> {
    pub steps: Vec<JoinStep<'a>>,
    pub mapping: &'a Mapping,
    pub column: ColumnRef,
}

impl<'a> FieldResolver<'a> {
    pub fn new(catalog: &'a Catalog, mapping: &'a Mapping, alias: &'a str) -> Self {
        Self {
            catalog,
            mapping,
            alias,
            alias_prefix: "",
        }
    }

    pub fn with_alias_prefix(mut self, alias_prefix: &'a str) -> Self {
        self.alias_prefix = alias_prefix;
        self
    }

    pub fn resolve(&self, field: &Field) -> Result<ResolvedField<'a>> {
        let (relations, name) = field.split();

        let mut steps: Vec<JoinStep<'a>> = Vec::with_capacity(relations.len());
        let mut mapping = self.mapping;

        for segment in relations {
            let (left_alias, path_alias) = match steps.last() {
                Some(prev) => (prev.path_alias.as_str(), prev.path_alias.as_str()),
                None => (self.alias, self.alias_prefix),
            };

            let step = self.step(mapping, segment, left_alias, path_alias, &field.path)?;
            mapping = step.mapping;
            steps.push(step);
        }

        let table_alias = steps.last().map_or(self.alias, |step| step.path_alias.as_str());
        let column = mapping.map_field(table_alias, "", name)?;

        Ok(ResolvedField {
            steps,
            mapping,
            column,
        })
    }

    /// Traverses the relation `name` of `mapping`, joined from `left_alias`.
    /// The new join alias is `path_alias` extended with the relation name.
    pub fn step(
        &self,
        mapping: &'a Mapping,
        name: &str,
        left_alias: &str,
        path_alias: &str,
        path: &str,
    ) -> Result<JoinStep<'a>> {
        let relation = mapping
            .relation(name)
            .ok_or_else(|| CompileError::UnknownRelation {
                model: mapping.model.name(),
                relation: name.to_string(),
                path: path.to_string(),
            })?;

        let target = self.catalog.mapping(relation.target).ok_or_else(|| {
            CompileError::UnmappedRelationType {
                relation: relation.field.clone(),
                target: relation.target.name(),
            }
        })?;

        Ok(JoinStep {
            relation,
            mapping: target,
            left_alias: left_alias.to_string(),
            right_table: &target.table,
            path_alias: join_alias(path_alias, &relation.field),
        })
    }
}

/// Alias of a relation joined below `prefix`.
pub fn join_alias(prefix: &str, relation: &str) -> String {
    if prefix.is_empty() {
        relation.to_string()
    } else {
        format!("{prefix}_{relation}")
    }
}

impl JoinStep<'_> {
    pub fn kind(&self) -> RelationKind {
        self.relation.kind
    }

    pub fn join_pairs(&self) -> &[JoinPair] {
        &self.relation.join_pairs
    }
}
