use super::{Direction, Element};

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub element: Element,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(element: impl Into<Element>) -> Self {
        Self {
            element: element.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(element: impl Into<Element>) -> Self {
        Self {
            element: element.into(),
            direction: Direction::Desc,
        }
    }
}
