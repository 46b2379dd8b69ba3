#![allow(dead_code)]

use tessera_core::schema::{Catalog, Mapping, Model};

#[derive(Debug, Default)]
pub struct Account {
    pub id: String,
    pub company: String,
    pub users: Vec<User>,
}

#[derive(Debug, Default)]
pub struct User {
    pub id: i64,
    pub account_id: String,
    pub name: String,
    pub address: Option<Address>,
}

#[derive(Debug, Default)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub state: String,
}

impl Model for Account {
    fn mapping() -> Mapping {
        Mapping::builder::<Self>("accounts")
            .column("id", "ID", |a| &a.id, |a| &mut a.id)
            .column("company", "Company", |a| &a.company, |a| &mut a.company)
            .has_many("Users", "users", &[("id", "account_id")], |a| &mut a.users)
            .primary_key(["id"])
            .build()
    }
}

impl Model for User {
    fn mapping() -> Mapping {
        Mapping::builder::<Self>("users")
            .column("id", "ID", |u| &u.id, |u| &mut u.id)
            .column("account_id", "AccountID", |u| &u.account_id, |u| &mut u.account_id)
            .column("name", "Name", |u| &u.name, |u| &mut u.name)
            .has_one("Address", "addresses", &[("id", "user_id")], |u| &mut u.address)
            .primary_key(["id"])
            .build()
    }
}

impl Model for Address {
    fn mapping() -> Mapping {
        Mapping::builder::<Self>("addresses")
            .column("id", "ID", |a| &a.id, |a| &mut a.id)
            .column("user_id", "UserID", |a| &a.user_id, |a| &mut a.user_id)
            .column("state", "State", |a| &a.state, |a| &mut a.state)
            .primary_key(["id"])
            .build()
    }
}

pub fn catalog() -> Catalog {
    Catalog::builder()
        .register::<Account>()
        .register::<User>()
        .register::<Address>()
        .build()
        .unwrap()
}
