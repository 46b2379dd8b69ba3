mod fragment;
pub(crate) use fragment::{check_root_alias, insert_join, merge_joins};
pub use fragment::{Fragment, Join};

use crate::{
    method,
    resolve::{FieldResolver, JoinStep},
};

use tessera_core::{
    stmt::{
        Clause, ClauseAnd, ClauseCmp, ClauseIn, ClauseNot, ClauseOr, Element, Field, Method, Sort,
        Value, Visit,
    },
    Catalog, CompileError, Dialect, Mapping, Result,
};

/// Compiles elements, clauses and sorts against one mapping.
///
/// Compilation is a pure function of the input tree: the compiler holds no
/// scratch state, every visit returns its own [`Fragment`], and literals are
/// always bound as `?` placeholders in left-to-right order.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    catalog: &'a Catalog,
    mapping: &'a Mapping,
    dialect: &'a dyn Dialect,

    /// Alias the mapping's table is selected under
    alias: &'a str,

    /// Prefix for the aliases of joins created by dotted paths
    alias_prefix: &'a str,

    /// Set when compiling a relation's filter or sort, which may only
    /// reference the relation's own columns.
    relation: Option<&'a str>,
}

impl<'a> Compiler<'a> {
    pub fn new(catalog: &'a Catalog, mapping: &'a Mapping, dialect: &'a dyn Dialect) -> Self {
        Self {
            catalog,
            mapping,
            dialect,
            alias: &mapping.table,
            alias_prefix: "",
            relation: None,
        }
    }

    pub fn with_alias(mut self, alias: &'a str) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_alias_prefix(mut self, alias_prefix: &'a str) -> Self {
        self.alias_prefix = alias_prefix;
        self
    }

    /// Restricts field references to the columns of `mapping`, as joined for
    /// the relation `relation`.
    pub fn for_relation(mut self, relation: &'a str) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn compile_clause(&self, clause: &Clause) -> Result<Fragment> {
        clause.accept(self)
    }

    pub fn compile_element(&self, element: &Element) -> Result<Fragment> {
        element.accept(self)
    }

    pub fn compile_sort(&self, sort: &Sort) -> Result<Fragment> {
        let mut ret = sort.element.accept(self)?;
        ret.push_str(" ");
        ret.push_str(sort.direction.as_sql());
        Ok(ret)
    }

    /// Compiles an ORDER BY list, comma separated.
    pub fn compile_sorts(&self, sorts: &[Sort]) -> Result<Fragment> {
        let fragments = sorts
            .iter()
            .map(|sort| self.compile_sort(sort))
            .collect::<Result<Vec<_>>>()?;

        Fragment::join(fragments, ", ")
    }

    fn resolver(&self) -> FieldResolver<'a> {
        FieldResolver::new(self.catalog, self.mapping, self.alias)
            .with_alias_prefix(self.alias_prefix)
    }

    fn binary(&self, clause: &ClauseCmp, op: &str) -> Result<Fragment> {
        let mut ret = clause.lhs.accept(self)?;
        ret.push_str(" ");
        ret.push_str(op);
        ret.push_str(" ");
        ret.append(clause.rhs.accept(self)?)?;
        Ok(ret)
    }

    fn connective(&self, node: &'static str, operands: &[Clause], op: &str) -> Result<Fragment> {
        if operands.is_empty() {
            return Err(CompileError::EmptyBooleanGroup { node }.into());
        }

        let fragments = operands
            .iter()
            .map(|operand| operand.accept(self))
            .collect::<Result<Vec<_>>>()?;

        Ok(Fragment::join(fragments, op)?.parenthesize())
    }

    fn list(&self, elements: &[Element]) -> Result<Fragment> {
        let fragments = elements
            .iter()
            .map(|element| element.accept(self))
            .collect::<Result<Vec<_>>>()?;

        Fragment::join(fragments, ", ")
    }
}

impl Visit for Compiler<'_> {
    type Output = Result<Fragment>;

    fn visit_value(&self, value: &Value) -> Result<Fragment> {
        Ok(Fragment {
            sql: "?".to_string(),
            params: vec![value.clone()],
            ..Fragment::default()
        })
    }

    fn visit_field(&self, field: &Field) -> Result<Fragment> {
        if !field.is_dotted() {
            let column = self.mapping.map_field(self.alias, "", &field.path)?;
            return Ok(Fragment::new(
                self.dialect.escape_table_column(&column.table, &column.name),
            ));
        }

        if let Some(relation) = self.relation {
            return Err(CompileError::NestedPath {
                relation: relation.to_string(),
                path: field.path.clone(),
            }
            .into());
        }

        let resolved = self.resolver().resolve(field)?;

        let mut ret = Fragment::new(
            self.dialect
                .escape_table_column(&resolved.column.table, &resolved.column.name),
        );

        for step in &resolved.steps {
            insert_join(
                &mut ret.joins,
                step.path_alias.clone(),
                join(self.dialect, step, None),
            )?;
        }
        check_root_alias(self.alias, &ret.joins)?;

        Ok(ret)
    }

    fn visit_method(&self, method: &Method) -> Result<Fragment> {
        let signature = method::check(method)?;

        let template = self.dialect.method_template(signature.name).ok_or_else(|| {
            CompileError::UnsupportedMethod {
                name: method.name.clone(),
            }
        })?;

        let mut ret = Fragment::default();
        let mut args = Vec::with_capacity(method.params.len());

        for param in &method.params {
            let fragment = param.accept(self)?;
            args.push(fragment.sql);
            ret.params.extend(fragment.params);
            ret.merge_joins(fragment.joins)?;
        }

        ret.sql = method::expand(template, &args);
        Ok(ret)
    }

    fn visit_eq(&self, clause: &ClauseCmp) -> Result<Fragment> {
        self.binary(clause, self.dialect.null_safe_eq_operator())
    }

    fn visit_neq(&self, clause: &ClauseCmp) -> Result<Fragment> {
        let mut ret = self.visit_eq(clause)?.parenthesize();
        ret.sql.insert_str(0, "NOT ");
        Ok(ret)
    }

    fn visit_gt(&self, clause: &ClauseCmp) -> Result<Fragment> {
        self.binary(clause, ">")
    }

    fn visit_gte(&self, clause: &ClauseCmp) -> Result<Fragment> {
        self.binary(clause, ">=")
    }

    fn visit_lt(&self, clause: &ClauseCmp) -> Result<Fragment> {
        self.binary(clause, "<")
    }

    fn visit_lte(&self, clause: &ClauseCmp) -> Result<Fragment> {
        self.binary(clause, "<=")
    }

    fn visit_not(&self, clause: &ClauseNot) -> Result<Fragment> {
        let mut ret = clause.clause.accept(self)?.parenthesize();
        ret.sql.insert_str(0, "NOT ");
        Ok(ret)
    }

    fn visit_and(&self, clause: &ClauseAnd) -> Result<Fragment> {
        self.connective("and", clause, " AND ")
    }

    fn visit_or(&self, clause: &ClauseOr) -> Result<Fragment> {
        self.connective("or", clause, " OR ")
    }

    fn visit_in(&self, clause: &ClauseIn) -> Result<Fragment> {
        let arity = clause.arity();

        if arity == 0 {
            return Err(CompileError::ArityMismatch {
                node: "in",
                expected: 1,
                actual: 0,
            }
            .into());
        }

        if let Some(row) = clause.rows.iter().find(|row| row.len() != arity) {
            return Err(CompileError::ArityMismatch {
                node: "in",
                expected: arity,
                actual: row.len(),
            }
            .into());
        }

        let lhs = self.list(&clause.lhs)?;

        // Nothing can be a member of an empty list
        if clause.rows.is_empty() {
            return Ok(Fragment::new("1 = 0"));
        }

        let rows = clause
            .rows
            .iter()
            .map(|row| -> Result<Fragment> {
                let row = self.list(row)?;
                Ok(if arity > 1 { row.parenthesize() } else { row })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut ret = if arity > 1 { lhs.parenthesize() } else { lhs };

        if arity > 1 && self.dialect.row_values_in_list() {
            ret.push_str(" IN (VALUES ");
        } else {
            ret.push_str(" IN (");
        }

        ret.append(Fragment::join(rows, ", ")?)?;
        ret.push_str(")");
        Ok(ret)
    }

    fn visit_truthy(&self, element: &Element) -> Result<Fragment> {
        element.accept(self)
    }
}

/// Renders the `LEFT JOIN` for a relation step. `filter` is AND-ed into the
/// `ON` condition.
pub(crate) fn join(dialect: &dyn Dialect, step: &JoinStep<'_>, filter: Option<Fragment>) -> Join {
    let mut sql = format!(
        "LEFT JOIN {} AS {} ON ",
        dialect.escape_table(step.right_table),
        dialect.escape_table(&step.path_alias)
    );

    for (i, pair) in step.join_pairs().iter().enumerate() {
        if i > 0 {
            sql.push_str(" AND ");
        }
        sql.push_str(&dialect.escape_table_column(&step.left_alias, &pair.local));
        sql.push_str(" = ");
        sql.push_str(&dialect.escape_table_column(&step.path_alias, &pair.remote));
    }

    let mut params = vec![];

    if let Some(filter) = filter {
        sql.push_str(" AND ");
        sql.push_str(&filter.sql);
        params = filter.params;
    }

    Join {
        sql,
        params,
        kind: step.kind(),
        source: format!("{}.{}", step.left_alias, step.relation.field),
    }
}
