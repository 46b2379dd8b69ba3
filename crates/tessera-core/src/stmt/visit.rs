use super::{ClauseAnd, ClauseCmp, ClauseIn, ClauseNot, ClauseOr, Element, Field, Method, Value};

/// One method per node kind of the `Element` and `Clause` families.
///
/// There are no default implementations: adding a node kind fails to compile
/// until every visitor handles it. Visitors receive `&self` and return their
/// result, so a single visitor may be shared across threads.
pub trait Visit {
    type Output;

    fn visit_value(&self, value: &Value) -> Self::Output;

    fn visit_field(&self, field: &Field) -> Self::Output;

    fn visit_method(&self, method: &Method) -> Self::Output;

    fn visit_eq(&self, clause: &ClauseCmp) -> Self::Output;

    fn visit_neq(&self, clause: &ClauseCmp) -> Self::Output;

    fn visit_gt(&self, clause: &ClauseCmp) -> Self::Output;

    fn visit_gte(&self, clause: &ClauseCmp) -> Self::Output;

    fn visit_lt(&self, clause: &ClauseCmp) -> Self::Output;

    fn visit_lte(&self, clause: &ClauseCmp) -> Self::Output;

    fn visit_not(&self, clause: &ClauseNot) -> Self::Output;

    fn visit_and(&self, clause: &ClauseAnd) -> Self::Output;

    fn visit_or(&self, clause: &ClauseOr) -> Self::Output;

    fn visit_in(&self, clause: &ClauseIn) -> Self::Output;

    fn visit_truthy(&self, element: &Element) -> Self::Output;
}
