use super::Element;

/// A named function call, such as `contains` or `lower`. The SQL it compiles
/// to is chosen by the dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub params: Vec<Element>,
}

impl Method {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = Element>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }
}
