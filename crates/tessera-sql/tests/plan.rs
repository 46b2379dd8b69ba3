mod common;

use common::{catalog, Account, User};

use pretty_assertions::assert_eq;
use tessera_core::{
    stmt::{Clause, Element, Include, Sort, Value},
    CompileError,
};
use tessera_sql::{Flavor, Paging, PlanBuilder};

#[test]
fn select_all_fields() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let plan = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .limit(Some(2))
        .build(&Include::new())
        .unwrap();

    assert_eq!(
        plan.sql(),
        r#"SELECT "accounts"."id" AS "_0", "accounts"."id", "accounts"."company" FROM "accounts" AS "accounts" LIMIT 2"#
    );
    assert!(plan.params().is_empty());
    assert_eq!(plan.width(), 3);
    assert_eq!(plan.structure.key_range(), 0..1);
    assert_eq!(plan.structure.field_range(), 1..3);
}

#[test]
fn where_order_limit_offset() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let include = Include::new()
        .filter(Clause::eq(Element::field("Company"), Element::value("Acme")))
        .sort(Sort::desc(Element::field("Company")));

    let plan = PlanBuilder::new(&catalog, &Flavor::Postgresql, mapping)
        .limit(Some(10))
        .offset(5)
        .build(&include)
        .unwrap();

    assert_eq!(
        plan.sql(),
        r#"SELECT "accounts"."id" AS "_0", "accounts"."id", "accounts"."company" FROM "accounts" AS "accounts" WHERE "accounts"."company" IS NOT DISTINCT FROM ? ORDER BY "accounts"."company" DESC LIMIT 10 OFFSET 5"#
    );
    assert_eq!(plan.params(), [Value::from("Acme")]);
}

#[test]
fn offset_without_limit() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();
    let include = Include::new().field("Company");

    let tail = |flavor: &'static Flavor| {
        let plan = PlanBuilder::new(&catalog, flavor, mapping)
            .offset(3)
            .build(&include)
            .unwrap();

        let sql = plan.sql();
        let from = sql.find(" FROM").unwrap();
        sql[from..].to_string()
    };

    assert_eq!(
        tail(&Flavor::Sqlite),
        r#" FROM "accounts" AS "accounts" LIMIT -1 OFFSET 3"#
    );
    assert_eq!(
        tail(&Flavor::Postgresql),
        r#" FROM "accounts" AS "accounts" OFFSET 3"#
    );
    assert_eq!(
        tail(&Flavor::Mysql),
        " FROM `accounts` AS `accounts` LIMIT 18446744073709551615 OFFSET 3"
    );
}

#[test]
fn custom_alias() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let plan = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .alias("a")
        .build(&Include::new().field("Company"))
        .unwrap();

    assert_eq!(
        plan.sql(),
        r#"SELECT "a"."id" AS "_0", "a"."company" FROM "accounts" AS "a""#
    );
}

#[test]
fn included_relation() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let include = Include::new()
        .field("Company")
        .filter(Clause::eq(Element::field("Company"), Element::value("Acme")))
        .relation(
            "Users",
            Include::new()
                .field("Name")
                .filter(Clause::eq(Element::field("Name"), Element::value("Jo")))
                .sort(Sort::asc(Element::field("Name"))),
        );

    let plan = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .build(&include)
        .unwrap();

    assert_eq!(
        plan.sql(),
        concat!(
            r#"SELECT "accounts"."id" AS "_0", "accounts"."company", "Users"."id" AS "_Users_0", "Users"."name""#,
            r#" FROM "accounts" AS "accounts""#,
            r#" LEFT JOIN "users" AS "Users" ON "accounts"."id" = "Users"."account_id" AND "Users"."name" IS ?"#,
            r#" WHERE "accounts"."company" IS ?"#,
            r#" ORDER BY "accounts"."id" ASC, "Users"."name" ASC"#,
        )
    );

    // Join parameters are bound before the WHERE clause's
    assert_eq!(plan.params(), [Value::from("Jo"), Value::from("Acme")]);

    let users = &plan.structure.relations["Users"].structure;
    assert_eq!(users.offset, 2);
    assert_eq!(users.key_range(), 2..3);
    assert_eq!(users.field_range(), 3..4);
    assert!(plan.structure.has_many());
    assert_eq!(plan.structure.width(), plan.width());
}

#[test]
fn nested_includes() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let include = Include::new().field("Company").relation(
        "Users",
        Include::new()
            .field("Name")
            .relation("Address", Include::new().field("State")),
    );

    let plan = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .build(&include)
        .unwrap();

    assert_eq!(
        plan.sql(),
        concat!(
            r#"SELECT "accounts"."id" AS "_0", "accounts"."company", "Users"."id" AS "_Users_0", "Users"."name","#,
            r#" "Users_Address"."id" AS "_Users_Address_0", "Users_Address"."state""#,
            r#" FROM "accounts" AS "accounts""#,
            r#" LEFT JOIN "users" AS "Users" ON "accounts"."id" = "Users"."account_id""#,
            r#" LEFT JOIN "addresses" AS "Users_Address" ON "Users"."id" = "Users_Address"."user_id""#,
            r#" ORDER BY "accounts"."id" ASC"#,
        )
    );

    let address = &plan.structure.relations["Users"].structure.relations["Address"].structure;
    assert_eq!(address.alias, "Users_Address");
    assert_eq!(address.offset, 4);
    assert_eq!(plan.width(), 6);
}

#[test]
fn to_one_joins_need_no_tie_breaker() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<User>().unwrap();

    let include = Include::new().filter(Clause::eq(
        Element::field("Address.State"),
        Element::value("CA"),
    ));

    let plan = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .build(&include)
        .unwrap();

    assert_eq!(
        plan.sql(),
        concat!(
            r#"SELECT "users"."id" AS "_0", "users"."id", "users"."account_id", "users"."name""#,
            r#" FROM "users" AS "users""#,
            r#" LEFT JOIN "addresses" AS "Address" ON "users"."id" = "Address"."user_id""#,
            r#" WHERE "Address"."state" IS ?"#,
        )
    );
}

#[test]
fn filtering_through_to_many_orders_by_key() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let include = Include::new()
        .field("Company")
        .filter(Clause::eq(Element::field("Users.Name"), Element::value("Jo")))
        .sort(Sort::asc(Element::field("Company")));

    let plan = PlanBuilder::new(&catalog, &Flavor::Mysql, mapping)
        .build(&include)
        .unwrap();

    assert_eq!(
        plan.sql(),
        concat!(
            "SELECT `accounts`.`id` AS `_0`, `accounts`.`company`",
            " FROM `accounts` AS `accounts`",
            " LEFT JOIN `users` AS `Users` ON `accounts`.`id` = `Users`.`account_id`",
            " WHERE `Users`.`name` <=> ?",
            " ORDER BY `accounts`.`company` ASC, `accounts`.`id` ASC",
        )
    );
}

#[test]
fn unknown_include_field() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let err = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .build(&Include::new().field("Revenue"))
        .unwrap_err();

    assert_eq!(
        err.as_compile_error(),
        Some(&CompileError::UnmappedField {
            model: "Account",
            field: "Revenue".into(),
        })
    );
}

#[test]
fn unknown_include_relation() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let err = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .build(&Include::new().relation("Owners", Include::new()))
        .unwrap_err();

    assert_eq!(
        err.as_compile_error(),
        Some(&CompileError::UnknownRelation {
            model: "Account",
            relation: "Owners".into(),
            path: "Owners".into(),
        })
    );
}

#[test]
fn to_many_includes_page_by_record() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let include = Include::new()
        .field("Company")
        .relation("Users", Include::new().field("Name"));

    let plan = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .limit(Some(2))
        .offset(1)
        .build(&include)
        .unwrap();

    // Each account spans one row per user, so the statement stays unbounded
    assert_eq!(
        plan.sql(),
        concat!(
            r#"SELECT "accounts"."id" AS "_0", "accounts"."company", "Users"."id" AS "_Users_0", "Users"."name""#,
            r#" FROM "accounts" AS "accounts""#,
            r#" LEFT JOIN "users" AS "Users" ON "accounts"."id" = "Users"."account_id""#,
            r#" ORDER BY "accounts"."id" ASC"#,
        )
    );
    assert_eq!(plan.paging, Paging::Records);
    assert_eq!(plan.record_window(), (1, Some(2)));

    let plain = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .limit(Some(2))
        .offset(1)
        .build(&Include::new().field("Company"))
        .unwrap();

    assert_eq!(plain.paging, Paging::Rows);
    assert_eq!(plain.record_window(), (0, None));
    assert!(plain.sql().ends_with(" LIMIT 2 OFFSET 1"));
}

#[test]
fn included_alias_cannot_shadow_the_root_table() {
    let catalog = catalog();
    let mapping = catalog.mapping_for::<Account>().unwrap();

    let err = PlanBuilder::new(&catalog, &Flavor::Sqlite, mapping)
        .alias("users")
        .build(&Include::new().relation("Users", Include::new()))
        .unwrap_err();

    assert_eq!(
        err.as_compile_error(),
        Some(&CompileError::AliasCollision {
            alias: "Users".into(),
            first: "users".into(),
            second: "users.Users".into(),
        })
    );
}
