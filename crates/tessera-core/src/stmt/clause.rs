use super::{ClauseAnd, ClauseCmp, ClauseIn, ClauseNot, ClauseOr, Element, Visit};

/// A boolean expression over elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Null-safe equality
    Eq(ClauseCmp),

    /// Negated null-safe equality
    Neq(ClauseCmp),

    Gt(ClauseCmp),
    Gte(ClauseCmp),
    Lt(ClauseCmp),
    Lte(ClauseCmp),

    Not(ClauseNot),
    And(ClauseAnd),
    Or(ClauseOr),

    /// Membership of a tuple of elements in a list of tuples
    In(ClauseIn),

    /// An element that is already boolean valued, such as a method call
    Truthy(Element),
}

impl Clause {
    pub fn eq(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self::Eq(ClauseCmp::new(lhs, rhs))
    }

    pub fn neq(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self::Neq(ClauseCmp::new(lhs, rhs))
    }

    pub fn gt(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self::Gt(ClauseCmp::new(lhs, rhs))
    }

    pub fn gte(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self::Gte(ClauseCmp::new(lhs, rhs))
    }

    pub fn lt(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self::Lt(ClauseCmp::new(lhs, rhs))
    }

    pub fn lte(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self::Lte(ClauseCmp::new(lhs, rhs))
    }

    pub fn truthy(element: impl Into<Element>) -> Self {
        Self::Truthy(element.into())
    }

    pub fn accept<V: Visit + ?Sized>(&self, visitor: &V) -> V::Output {
        match self {
            Self::Eq(clause) => visitor.visit_eq(clause),
            Self::Neq(clause) => visitor.visit_neq(clause),
            Self::Gt(clause) => visitor.visit_gt(clause),
            Self::Gte(clause) => visitor.visit_gte(clause),
            Self::Lt(clause) => visitor.visit_lt(clause),
            Self::Lte(clause) => visitor.visit_lte(clause),
            Self::Not(clause) => visitor.visit_not(clause),
            Self::And(clause) => visitor.visit_and(clause),
            Self::Or(clause) => visitor.visit_or(clause),
            Self::In(clause) => visitor.visit_in(clause),
            Self::Truthy(element) => visitor.visit_truthy(element),
        }
    }
}
