mod builder;
pub use builder::Builder;

mod get;

use crate::{db::Pool, materialize::Materializer, FindOptions, GetOptions};

use tessera_core::{
    err,
    schema::Record,
    stmt::{Include, Value},
    Catalog, Cx, Dialect, Mapping, Model, Result,
};
use tessera_sql::PlanBuilder;

use std::sync::Arc;

/// Shared state between all `Repository` clones.
#[derive(Debug)]
struct Shared {
    catalog: Catalog,
    pool: Pool,
}

/// Loads mapped records from a database.
///
/// Cloning is cheap: clones share the catalog and the connection pool.
#[derive(Debug, Clone)]
pub struct Repository {
    shared: Arc<Shared>,
}

impl Repository {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.shared.catalog
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.shared.pool.dialect()
    }

    /// Replaces the content of `target` with the records matching
    /// `options`, in the order the database returns them.
    ///
    /// At most `options.limit` records are loaded, defaulting to the
    /// capacity of `target`; a limit of zero returns without running a
    /// query. Included to-many relations never count against the limit.
    pub async fn find<M: Model>(
        &self,
        cx: &Cx,
        target: &mut Vec<M>,
        options: FindOptions,
    ) -> Result<()> {
        let mapping = self.shared.catalog.mapping_for::<M>()?;
        let limit = options.limit.unwrap_or(target.capacity() as u64);

        target.clear();

        if limit == 0 {
            return Ok(());
        }

        let records = self
            .load(cx, mapping, &options.include, options.offset, Some(limit))
            .await
            .map_err(|err| err.context(err!("find")))?;

        target.reserve(records.len());
        for record in records {
            target.push(record.downcast::<M>()?);
        }

        Ok(())
    }

    /// Loads the records whose primary keys are already set on `targets`
    /// and updates each target in place.
    ///
    /// Fails with [`NotFoundError`](crate::NotFoundError) unless every target
    /// is found, in which case no target is modified.
    pub async fn get<M: Model>(
        &self,
        cx: &Cx,
        targets: &mut [M],
        options: GetOptions,
    ) -> Result<()> {
        get::get(self, cx, targets, options).await
    }

    /// Runs a statement that returns no rows on a pooled connection.
    pub async fn execute(&self, cx: &Cx, sql: &str, params: &[Value]) -> Result<u64> {
        let mut connection = cx.run(self.shared.pool.get()).await?;

        tracing::debug!(db.statement = sql, params = params.len(), "executing statement");

        connection
            .execute(cx, sql, params)
            .await
            .map_err(|err| err.context(err!("execute")))
    }

    /// Builds and runs the query for `include` and folds its rows into
    /// records of `mapping`.
    async fn load(
        &self,
        cx: &Cx,
        mapping: &Mapping,
        include: &Include,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Record>> {
        let plan = PlanBuilder::new(&self.shared.catalog, self.dialect(), mapping)
            .offset(offset)
            .limit(limit)
            .build(include)?;

        let sql = plan.sql();
        let params = plan.params();

        tracing::debug!(
            db.statement = %sql,
            params = params.len(),
            model = mapping.model.name(),
            "executing query"
        );

        let mut connection = cx.run(self.shared.pool.get()).await?;
        let mut rows = connection.query(cx, &sql, &params).await?;

        let (skip, take) = plan.record_window();
        let records = Materializer::new(&plan.structure)
            .window(skip, take)
            .read(&mut rows)
            .await;
        rows.close();
        records
    }
}
