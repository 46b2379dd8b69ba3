mod common;

use common::{catalog, Account};

use pretty_assertions::assert_eq;
use tessera_core::{schema::RelationKind, stmt::Field, CompileError};
use tessera_sql::FieldResolver;

#[test]
fn simple_field() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let resolved = FieldResolver::new(&catalog, mapping, "a")
        .resolve(&Field::new("Company"))
        .unwrap();

    assert!(resolved.steps.is_empty());
    assert_eq!(resolved.column.table, "a");
    assert_eq!(resolved.column.name, "company");
    assert_eq!(resolved.column.alias, None);
}

#[test]
fn dotted_path() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let resolved = FieldResolver::new(&catalog, mapping, "accounts")
        .resolve(&Field::new("Users.Address.State"))
        .unwrap();

    assert_eq!(resolved.column.table, "Users_Address");
    assert_eq!(resolved.column.name, "state");
    assert_eq!(resolved.mapping.table, "addresses");

    let steps = resolved
        .steps
        .iter()
        .map(|step| {
            (
                step.left_alias.as_str(),
                step.right_table,
                step.path_alias.as_str(),
                step.kind(),
            )
        })
        .collect::<Vec<_>>();

    assert_eq!(
        steps,
        [
            ("accounts", "users", "Users", RelationKind::Many),
            ("Users", "addresses", "Users_Address", RelationKind::One),
        ]
    );
}

#[test]
fn alias_prefix() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let resolved = FieldResolver::new(&catalog, mapping, "t")
        .with_alias_prefix("sub")
        .resolve(&Field::new("Users.Name"))
        .unwrap();

    assert_eq!(resolved.steps[0].path_alias, "sub_Users");
    assert_eq!(resolved.column.table, "sub_Users");
}

#[test]
fn missing_relation() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let err = FieldResolver::new(&catalog, mapping, "accounts")
        .resolve(&Field::new("Missing.Field"))
        .unwrap_err();

    assert_eq!(
        err.as_compile_error(),
        Some(&CompileError::UnknownRelation {
            model: "Account",
            relation: "Missing".into(),
            path: "Missing.Field".into(),
        })
    );
}

#[test]
fn missing_field_at_end_of_path() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let err = FieldResolver::new(&catalog, mapping, "accounts")
        .resolve(&Field::new("Users.Email"))
        .unwrap_err();

    assert_eq!(
        err.as_compile_error(),
        Some(&CompileError::UnmappedField {
            model: "User",
            field: "Email".into(),
        })
    );
}

#[test]
fn relation_to_unregistered_model() {
    let catalog = tessera_core::Catalog::builder()
        .register::<Account>()
        .build()
        .unwrap();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let err = FieldResolver::new(&catalog, mapping, "accounts")
        .resolve(&Field::new("Users.Name"))
        .unwrap_err();

    assert_eq!(
        err.as_compile_error(),
        Some(&CompileError::UnmappedRelationType {
            relation: "Users".into(),
            target: "User",
        })
    );
}
