use super::Element;

/// Operands of a binary comparison. The operator is the `Clause` variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseCmp {
    pub lhs: Element,
    pub rhs: Element,
}

impl ClauseCmp {
    pub fn new(lhs: impl Into<Element>, rhs: impl Into<Element>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
}
