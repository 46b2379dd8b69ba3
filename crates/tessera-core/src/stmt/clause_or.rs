use super::Clause;

use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseOr {
    pub operands: Vec<Clause>,
}

impl Clause {
    pub fn or(operands: impl IntoIterator<Item = Clause>) -> Self {
        ClauseOr {
            operands: operands.into_iter().collect(),
        }
        .into()
    }
}

impl ops::Deref for ClauseOr {
    type Target = [Clause];

    fn deref(&self) -> &Self::Target {
        self.operands.deref()
    }
}

impl<'a> IntoIterator for &'a ClauseOr {
    type IntoIter = std::slice::Iter<'a, Clause>;
    type Item = &'a Clause;

    fn into_iter(self) -> Self::IntoIter {
        self.operands.iter()
    }
}

impl From<ClauseOr> for Clause {
    fn from(value: ClauseOr) -> Self {
        Self::Or(value)
    }
}
