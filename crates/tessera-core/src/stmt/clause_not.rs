use super::Clause;

/// Negates a clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseNot {
    pub clause: Box<Clause>,
}

impl Clause {
    pub fn not(clause: impl Into<Self>) -> Self {
        ClauseNot {
            clause: Box::new(clause.into()),
        }
        .into()
    }

    pub fn is_not(&self) -> bool {
        matches!(self, Self::Not(_))
    }
}

impl From<ClauseNot> for Clause {
    fn from(value: ClauseNot) -> Self {
        Self::Not(value)
    }
}
