//! Interpolated queries example
//!
//! Run with: cargo run --example interpolation -p sqlfrag
//!
//! Builds a typed query with `sql!`, extends it, and prints the SQL and the
//! parameter list a driver would receive. Nothing is executed.

use sqlfrag::{FromRow, FragResult, Query, SqlValue, sql};

#[derive(Debug, FromRow)]
#[allow(dead_code)]
struct User {
    id: i64,
    email: String,
    city: Option<String>,
}

/// Search parameters - all optional
struct UserFilter {
    city: Option<String>,
    min_id: Option<i64>,
}

fn search_users(table: &str, email: &str, filter: &UserFilter) -> Query<FragResult<User>> {
    let mut query = Query::<FragResult<User>>::from_row(sql!(
        "SELECT id, email, city FROM {raw:table} WHERE email={param:email}"
    ));

    if let Some(city) = &filter.city {
        query = query.appending(&sql!(" AND city={param:city}"));
    }
    if let Some(min_id) = filter.min_id {
        query = query.appending(&sql!(" AND id >= {param:min_id}"));
    }
    query.append(sql!(" ORDER BY id"))
}

fn main() -> FragResult<()> {
    let filter = UserFilter {
        city: Some("Berlin".to_string()),
        min_id: None,
    };
    let query = search_users("users", "mail@objc.io", &filter);

    let rendered = query.render();
    println!("SQL:    {}", rendered.sql);
    println!("Params: {:?}", rendered.values);

    // What a text-protocol driver might hand back for one row.
    let row = [
        SqlValue::from("1234"),
        SqlValue::from("mail@objc.io"),
        SqlValue::from("Berlin"),
    ];
    let user = query.decode(&row)?;
    println!("Row:    {user:?}");

    Ok(())
}
