use super::{
    model::{downcast_mut, Record},
    ModelId,
};
use crate::Result;

use std::{any::Any, fmt, sync::Arc};

type Attach = Arc<dyn Fn(&mut dyn Any, Record) -> Result<()> + Send + Sync>;
type Transfer = Arc<dyn Fn(&mut dyn Any, &mut dyn Any) -> Result<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The field holds at most one related record (`Option<T>`)
    One,

    /// The field holds a list of related records (`Vec<T>`)
    Many,
}

impl RelationKind {
    pub fn is_many(self) -> bool {
        matches!(self, RelationKind::Many)
    }
}

/// Equality between a column of the owning table and a column of the
/// related table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPair {
    pub local: String,
    pub remote: String,
}

/// A field holding records of another mapped type, loaded through a join.
#[derive(Clone)]
pub struct Relation {
    /// Name of the model field, also the path segment used to traverse it
    pub field: String,

    pub kind: RelationKind,

    /// Model type of the related records
    pub target: ModelId,

    pub target_table: String,

    pub join_pairs: Vec<JoinPair>,

    attach: Attach,
    transfer: Transfer,
}

impl Relation {
    pub(super) fn one<M: 'static, U: Send + 'static>(
        field: String,
        target_table: String,
        join_pairs: Vec<JoinPair>,
        access: fn(&mut M) -> &mut Option<U>,
    ) -> Relation {
        Relation {
            field,
            kind: RelationKind::One,
            target: ModelId::of::<U>(),
            target_table,
            join_pairs,
            attach: Arc::new(move |parent: &mut dyn Any, child: Record| {
                *access(downcast_mut::<M>(parent)?) = Some(child.downcast::<U>()?);
                Ok(())
            }),
            transfer: Arc::new(move |dst: &mut dyn Any, src: &mut dyn Any| {
                let value = access(downcast_mut::<M>(src)?).take();
                *access(downcast_mut::<M>(dst)?) = value;
                Ok(())
            }),
        }
    }

    pub(super) fn many<M: 'static, U: Send + 'static>(
        field: String,
        target_table: String,
        join_pairs: Vec<JoinPair>,
        access: fn(&mut M) -> &mut Vec<U>,
    ) -> Relation {
        Relation {
            field,
            kind: RelationKind::Many,
            target: ModelId::of::<U>(),
            target_table,
            join_pairs,
            attach: Arc::new(move |parent: &mut dyn Any, child: Record| {
                access(downcast_mut::<M>(parent)?).push(child.downcast::<U>()?);
                Ok(())
            }),
            transfer: Arc::new(move |dst: &mut dyn Any, src: &mut dyn Any| {
                let value = std::mem::take(access(downcast_mut::<M>(src)?));
                *access(downcast_mut::<M>(dst)?) = value;
                Ok(())
            }),
        }
    }

    /// Stores a loaded child on the parent: sets a to-one field, appends to a
    /// to-many field.
    pub fn attach(&self, parent: &mut dyn Any, child: Record) -> Result<()> {
        (self.attach)(parent, child)
    }

    /// Moves the relation's value from `src` to `dst`, both records of the
    /// owning model.
    pub fn transfer(&self, dst: &mut dyn Any, src: &mut dyn Any) -> Result<()> {
        (self.transfer)(dst, src)
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("target_table", &self.target_table)
            .field("join_pairs", &self.join_pairs)
            .finish()
    }
}
