use super::Clause;

use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseAnd {
    pub operands: Vec<Clause>,
}

impl Clause {
    pub fn and(operands: impl IntoIterator<Item = Clause>) -> Self {
        ClauseAnd {
            operands: operands.into_iter().collect(),
        }
        .into()
    }

    /// Conjunction of two optional clauses, flattening nested `And`s.
    pub fn and_opt(lhs: Option<Clause>, rhs: Option<Clause>) -> Option<Self> {
        match (lhs, rhs) {
            (None, None) => None,
            (Some(clause), None) | (None, Some(clause)) => Some(clause),
            (Some(Self::And(mut lhs)), Some(Self::And(rhs))) => {
                lhs.operands.extend(rhs.operands);
                Some(lhs.into())
            }
            (Some(Self::And(mut lhs)), Some(rhs)) => {
                lhs.operands.push(rhs);
                Some(lhs.into())
            }
            (Some(lhs), Some(rhs)) => Some(Self::and([lhs, rhs])),
        }
    }
}

impl ops::Deref for ClauseAnd {
    type Target = [Clause];

    fn deref(&self) -> &Self::Target {
        self.operands.deref()
    }
}

impl<'a> IntoIterator for &'a ClauseAnd {
    type IntoIter = std::slice::Iter<'a, Clause>;
    type Item = &'a Clause;

    fn into_iter(self) -> Self::IntoIter {
        self.operands.iter()
    }
}

impl From<ClauseAnd> for Clause {
    fn from(value: ClauseAnd) -> Self {
        Self::And(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_opt_flattens() {
        let a = Clause::eq(crate::stmt::Element::field("A"), crate::stmt::Element::value(1));
        let b = Clause::eq(crate::stmt::Element::field("B"), crate::stmt::Element::value(2));
        let c = Clause::eq(crate::stmt::Element::field("C"), crate::stmt::Element::value(3));

        let ab = Clause::and_opt(Some(a.clone()), Some(b.clone()));
        assert_eq!(ab, Some(Clause::and([a.clone(), b.clone()])));

        let abc = Clause::and_opt(ab, Some(c.clone()));
        assert_eq!(abc, Some(Clause::and([a.clone(), b, c])));

        assert_eq!(Clause::and_opt(None, Some(a.clone())), Some(a));
        assert_eq!(Clause::and_opt(None, None), None);
    }
}
