use super::{Field, Method, Value, Visit};

/// The smallest unit of an expression: a literal, a field reference or a
/// method call.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A literal value, bound as a parameter
    Value(Value),

    /// A field on the root model, or a dotted path through its relations
    Field(Field),

    /// A named function applied to other elements
    Method(Method),
}

impl Element {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn field(path: impl Into<String>) -> Self {
        Self::Field(Field::new(path))
    }

    pub fn method(name: impl Into<String>, params: impl IntoIterator<Item = Element>) -> Self {
        Self::Method(Method::new(name, params))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn accept<V: Visit + ?Sized>(&self, visitor: &V) -> V::Output {
        match self {
            Self::Value(value) => visitor.visit_value(value),
            Self::Field(field) => visitor.visit_field(field),
            Self::Method(method) => visitor.visit_method(method),
        }
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Field> for Element {
    fn from(value: Field) -> Self {
        Self::Field(value)
    }
}

impl From<Method> for Element {
    fn from(value: Method) -> Self {
        Self::Method(value)
    }
}
