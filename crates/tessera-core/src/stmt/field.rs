/// Reference to a mapped field.
///
/// The path may contain `.` separators, in which case every segment but the
/// last names a relation to traverse, and the last names a column field on
/// the mapping reached by the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub path: String,
}

impl Field {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `true` when the path traverses at least one relation.
    pub fn is_dotted(&self) -> bool {
        self.path.contains('.')
    }

    /// Splits the path into the relations to traverse and the terminal field
    /// name.
    pub fn split(&self) -> (Vec<&str>, &str) {
        match self.path.rsplit_once('.') {
            Some((relations, field)) => (relations.split('.').collect(), field),
            None => (vec![], &self.path),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_dotted_path() {
        let field = Field::new("Users.Address.State");
        assert!(field.is_dotted());
        assert_eq!(field.split(), (vec!["Users", "Address"], "State"));
    }

    #[test]
    fn split_simple_path() {
        let field = Field::new("Company");
        assert!(!field.is_dotted());
        assert_eq!(field.split(), (vec![], "Company"));
    }
}
