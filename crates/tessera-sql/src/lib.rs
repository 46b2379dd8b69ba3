mod fmt;

pub mod compile;
pub use compile::{Compiler, Fragment, Join};

mod flavor;
pub use flavor::Flavor;

pub mod method;

pub mod plan;
pub use plan::{Paging, PlanBuilder, SelectQueryPlan, Structure};

pub mod resolve;
pub use resolve::{FieldResolver, JoinStep, ResolvedField};
