use super::*;
use crate::config::RenderConfig;
use crate::value::SqlValue;

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

// Shift every `$N` in `sql` by `offset`.
fn renumbered(sql: &str, offset: usize) -> String {
    let mut out = String::new();
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(d);
            chars.next();
        }
        let n: usize = digits.parse().unwrap();
        out.push_str(&format!("${}", n + offset));
    }
    out
}

#[test]
fn builds_placeholders_in_order() {
    let q = sql("SELECT * FROM users WHERE a = ")
        .param(1)
        .literal(" AND b = ")
        .param("x");

    let rendered = q.render();
    assert_eq!(rendered.sql, "SELECT * FROM users WHERE a = $1 AND b = $2");
    assert_eq!(rendered.values, vec![SqlValue::Int(1), text("x")]);
}

#[test]
fn placeholder_k_matches_kth_value() {
    let q: QueryPart = (1..=12_i64)
        .flat_map(|i| [literal(if i == 1 { "" } else { "," }), param(i)])
        .collect();

    let rendered = q.render();
    let expected_sql: Vec<String> = (1..=12).map(|i| format!("${i}")).collect();
    assert_eq!(rendered.sql, expected_sql.join(","));
    assert_eq!(
        rendered.values,
        (1..=12_i64).map(SqlValue::Int).collect::<Vec<_>>()
    );
}

#[test]
fn adjacent_values_stay_distinct() {
    let q = QueryPart::from_segments([param("a"), param("b"), literal("x"), literal("y")]);
    assert_eq!(q.segments().len(), 4);
    assert_eq!(q.param_count(), 2);
    assert_eq!(q.to_sql(), "$1$2xy");
}

#[test]
fn literal_only_renders_unchanged() {
    let q = sql("SELECT 1").literal(" UNION ").literal("SELECT $$2$$");
    let rendered = q.render();
    assert_eq!(rendered.sql, "SELECT 1 UNION SELECT $$2$$");
    assert!(rendered.values.is_empty());
}

#[test]
fn empty_part_renders_empty() {
    let q = QueryPart::empty();
    assert!(q.is_empty());
    let rendered = q.render();
    assert_eq!(rendered.sql, "");
    assert!(rendered.values.is_empty());
}

#[test]
fn new_with_empty_string_is_one_segment() {
    let q = QueryPart::new("");
    assert!(!q.is_empty());
    assert_eq!(q.segments(), &[Segment::Literal(String::new())]);
    assert_eq!(q.to_sql(), "");
}

#[test]
fn render_is_idempotent() {
    let q = sql("SELECT * FROM t WHERE a = ").param("x").literal(" OR b = ").param(2);
    let before = q.clone();
    let first = q.render();
    let second = q.render();
    assert_eq!(first, second);
    assert_eq!(q, before);
}

#[test]
fn appending_renumbers_right_operand() {
    let a = sql("SELECT * FROM t WHERE a = ").param("x").literal(" AND b = ").param("y");
    let b = sql(" AND c = ").param("z").literal(" AND d IN (").params([1, 2]).literal(")");

    let ra = a.render();
    let rb = b.render();
    let joined = a.appending(&b).render();

    assert_eq!(joined.sql, format!("{}{}", ra.sql, renumbered(&rb.sql, ra.values.len())));
    assert_eq!(
        joined.sql,
        "SELECT * FROM t WHERE a = $1 AND b = $2 AND c = $3 AND d IN ($4, $5)"
    );
    let mut values = ra.values.clone();
    values.extend(rb.values);
    assert_eq!(joined.values, values);
}

#[test]
fn appending_leaves_operands_untouched() {
    let a = sql("SELECT ").param(1);
    let b = sql(", ").param(2);
    let (a_before, b_before) = (a.clone(), b.clone());

    let joined = a.appending(&b);

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
    assert_eq!(joined.segments().len(), 4);
    assert_eq!(joined.to_sql(), "SELECT $1, $2");
}

#[test]
fn append_and_add_match_appending() {
    let a = sql("SELECT ").param(1);
    let b = sql(", ").param(2);

    let by_ref = &a + &b;
    let by_appending = a.appending(&b);
    let by_value = a.clone() + b.clone();
    let by_append = a.append(b);

    assert_eq!(by_ref, by_appending);
    assert_eq!(by_value, by_appending);
    assert_eq!(by_append, by_appending);
}

#[test]
fn appending_empty_is_identity() {
    let a = sql("SELECT ").param(1);
    assert_eq!(a.appending(&QueryPart::empty()), a);
    assert_eq!(QueryPart::empty().appending(&a), a);
}

#[test]
fn params_renders_commas() {
    let q = sql("SELECT * FROM users WHERE id IN (").params(vec![1, 2, 3]).literal(")");
    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id IN ($1, $2, $3)");
    assert_eq!(q.param_count(), 3);
}

#[test]
fn params_empty_is_valid_sql() {
    let q = sql("SELECT * FROM users WHERE id IN (")
        .params(Vec::<i32>::new())
        .literal(")");
    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id IN (NULL)");
    assert_eq!(q.param_count(), 0);
}

#[test]
fn ident_accepts_simple_and_dotted() {
    let q = QueryPart::empty()
        .ident("users")
        .unwrap()
        .literal(", ")
        .ident("public.users")
        .unwrap();
    assert_eq!(q.to_sql(), "users, public.users");
}

#[test]
fn ident_rejects_unsafe() {
    assert!(QueryPart::empty().ident("users; drop table users; --").is_err());
    assert!(QueryPart::empty().ident("1users").is_err());
    assert!(QueryPart::empty().ident("users..name").is_err());
    assert!(QueryPart::empty().ident("users name").is_err());
}

#[test]
fn literal_text_that_looks_like_a_placeholder_is_not_renumbered() {
    let q = sql("SELECT '$1' AS s, ").param("v");
    let rendered = q.render();
    assert_eq!(rendered.sql, "SELECT '$1' AS s, $1");
    assert_eq!(rendered.values, vec![text("v")]);
}

#[test]
fn value_text_never_reaches_sql() {
    let hostile = "'; DROP TABLE users; --";
    let rendered = sql("SELECT * FROM users WHERE name = ").param(hostile).render();
    assert!(!rendered.sql.contains("DROP"));
    assert_eq!(rendered.values, vec![text(hostile)]);
}

#[test]
fn compact_merges_literals_without_changing_output() {
    let q = QueryPart::from_segments([
        literal("SELECT "),
        literal(""),
        literal("* FROM t"),
        literal(" WHERE a = "),
        param(1),
        param(2),
        literal(""),
        literal(" x"),
    ]);
    let compacted = q.clone().compact();

    assert_eq!(
        compacted.segments(),
        &[
            Segment::Literal("SELECT * FROM t WHERE a = ".into()),
            Segment::Value(SqlValue::Int(1)),
            Segment::Value(SqlValue::Int(2)),
            Segment::Literal(" x".into()),
        ]
    );
    assert_eq!(compacted.render(), q.render());
}

#[test]
fn null_values_still_take_a_placeholder() {
    let q = sql("UPDATE t SET a = ").param(None::<String>).literal(" WHERE id = ").param(5);
    let rendered = q.render();
    assert_eq!(rendered.sql, "UPDATE t SET a = $1 WHERE id = $2");
    assert_eq!(rendered.values, vec![SqlValue::Null, SqlValue::Int(5)]);
}

#[test]
fn validate_enforces_max_params() {
    let q = sql("SELECT ").params([1, 2, 3]);
    assert!(q.validate().is_ok());

    let strict = Renderer::new(RenderConfig::new().with_max_params(2));
    let err = strict.validate(&q).unwrap_err();
    assert!(err.is_validation());
    assert!(strict.validate(&sql("SELECT ").params([1, 2])).is_ok());
}

#[test]
fn configured_renderer_renders_identically() {
    let q = sql("SELECT ").param("a").literal(", ").param("b");
    let quiet = Renderer::new(RenderConfig::new().disable_logging());
    assert_eq!(quiet.render(&q), q.render());
    assert_eq!(quiet.render_sql(&q), "SELECT $1, $2");
}

#[test]
fn into_parts_splits_sql_and_values() {
    let (sql_text, values) = sql("SELECT ").param(true).render().into_parts();
    assert_eq!(sql_text, "SELECT $1");
    assert_eq!(values, vec![SqlValue::Bool(true)]);
}

#[cfg(feature = "postgres")]
#[test]
fn params_ref_matches_values() {
    let rendered = sql("SELECT ").param(1).literal(", ").param("a").render();
    assert_eq!(rendered.params_ref().len(), 2);
}
