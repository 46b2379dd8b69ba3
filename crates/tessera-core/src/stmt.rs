mod clause;
pub use clause::Clause;

mod clause_and;
pub use clause_and::ClauseAnd;

mod clause_cmp;
pub use clause_cmp::ClauseCmp;

mod clause_in;
pub use clause_in::ClauseIn;

mod clause_not;
pub use clause_not::ClauseNot;

mod clause_or;
pub use clause_or::ClauseOr;

mod direction;
pub use direction::Direction;

mod element;
pub use element::Element;

mod field;
pub use field::Field;

mod include;
pub use include::Include;

mod method;
pub use method::Method;

mod primitive;
pub use primitive::Primitive;

mod sort;
pub use sort::Sort;

mod value;
pub use value::Value;

pub mod visit;
pub use visit::Visit;
