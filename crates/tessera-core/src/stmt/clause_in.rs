use super::{Clause, Element};

/// Tuple membership: `(lhs...) IN ((row...), ...)`.
///
/// Every row must have as many elements as `lhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseIn {
    pub lhs: Vec<Element>,
    pub rows: Vec<Vec<Element>>,
}

impl Clause {
    /// `lhs IN (items...)` for a single element.
    pub fn in_list(
        lhs: impl Into<Element>,
        items: impl IntoIterator<Item = impl Into<Element>>,
    ) -> Self {
        ClauseIn {
            lhs: vec![lhs.into()],
            rows: items.into_iter().map(|item| vec![item.into()]).collect(),
        }
        .into()
    }

    /// `(lhs...) IN ((row...), ...)` for a tuple of elements.
    pub fn in_tuples(
        lhs: impl IntoIterator<Item = Element>,
        rows: impl IntoIterator<Item = Vec<Element>>,
    ) -> Self {
        ClauseIn {
            lhs: lhs.into_iter().collect(),
            rows: rows.into_iter().collect(),
        }
        .into()
    }
}

impl ClauseIn {
    pub fn arity(&self) -> usize {
        self.lhs.len()
    }
}

impl From<ClauseIn> for Clause {
    fn from(value: ClauseIn) -> Self {
        Self::In(value)
    }
}
