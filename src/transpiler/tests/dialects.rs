use crate::schema::{Column, DataType};
use crate::transpiler::{ColumnContext, Dialect, GenerateOptions};
use serde_json::json;

fn default_of(dialect: Dialect, data_type: DataType, raw: &str) -> Option<String> {
    let column = Column::new("c", "c", data_type).default_value(raw);
    dialect.generator().format_default(&column)
}

#[test]
fn test_quote_identifier_round_trip() {
    for dialect in Dialect::ALL {
        let generator = dialect.generator();
        for name in ["users", "first name", "we\"ird", "back`tick"] {
            let quoted = generator.quote_identifier(name);
            assert_eq!(
                generator.unquote_identifier(&quoted).as_deref(),
                Some(name),
                "{dialect}: {quoted}"
            );
        }
    }
}

#[test]
fn test_quote_identifier_doubles_quote_char() {
    assert_eq!(Dialect::MySql.generator().quote_identifier("a`b"), "`a``b`");
    assert_eq!(
        Dialect::Postgres.generator().quote_identifier("a\"b"),
        "\"a\"\"b\""
    );
}

#[test]
fn test_unquote_rejects_malformed() {
    let pg = Dialect::Postgres.generator();
    assert_eq!(pg.unquote_identifier("users"), None);
    assert_eq!(pg.unquote_identifier("\"a\"b\""), None);
}

#[test]
fn test_escape_identifier_only_when_needed() {
    let pg = Dialect::Postgres.generator();
    assert_eq!(pg.escape_identifier("users"), "users");
    assert_eq!(pg.escape_identifier("order"), "\"order\"");
    assert_eq!(pg.escape_identifier("users.email"), "users.email");
    assert_eq!(pg.escape_identifier("order.id"), "\"order\".id");
    assert_eq!(
        Dialect::MySql.generator().escape_identifier("first name"),
        "`first name`"
    );
}

#[test]
fn test_escape_string() {
    assert_eq!(
        Dialect::Postgres.generator().escape_string("it's"),
        "'it''s'"
    );
    assert_eq!(
        Dialect::MySql.generator().escape_string("C:\\tmp's"),
        "'C:\\\\tmp''s'"
    );
}

#[test]
fn test_bool_literals() {
    assert_eq!(Dialect::Postgres.generator().bool_literal(true), "TRUE");
    assert_eq!(Dialect::MySql.generator().bool_literal(true), "1");
    assert_eq!(Dialect::Sqlite.generator().bool_literal(false), "0");
}

#[test]
fn test_type_mapping() {
    let uuid = Column::new("c", "c", DataType::Uuid);
    assert_eq!(Dialect::MySql.generator().map_type(&uuid), "CHAR(36)");
    assert_eq!(Dialect::Postgres.generator().map_type(&uuid), "UUID");
    assert_eq!(Dialect::Sqlite.generator().map_type(&uuid), "TEXT");

    let json = Column::new("c", "c", DataType::Json);
    assert_eq!(Dialect::Postgres.generator().map_type(&json), "JSONB");
    assert_eq!(Dialect::MySql.generator().map_type(&json), "JSON");

    let double = Column::new("c", "c", DataType::Double);
    assert_eq!(
        Dialect::Postgres.generator().map_type(&double),
        "DOUBLE PRECISION"
    );

    let price = Column::new("c", "c", DataType::Decimal).precision(10, 2);
    assert_eq!(Dialect::MySql.generator().map_type(&price), "DECIMAL(10,2)");
    assert_eq!(Dialect::Sqlite.generator().map_type(&price), "NUMERIC");
}

#[test]
fn test_type_override_extension() {
    let column =
        Column::new("c", "c", DataType::Text).extension(Dialect::Postgres, "type", "CITEXT");
    assert_eq!(Dialect::Postgres.generator().map_type(&column), "CITEXT");
    assert_eq!(Dialect::MySql.generator().map_type(&column), "TEXT");
}

#[test]
fn test_sqlite_strict_numeric_is_real() {
    let mut options = GenerateOptions::default();
    options.sqlite.strict = true;
    let price = Column::new("c", "c", DataType::Numeric);
    assert_eq!(
        Dialect::Sqlite.generator_for(&options).map_type(&price),
        "REAL"
    );
}

#[test]
fn test_boolean_defaults() {
    assert_eq!(
        default_of(Dialect::MySql, DataType::Boolean, "true").as_deref(),
        Some("1")
    );
    assert_eq!(
        default_of(Dialect::Postgres, DataType::Boolean, "true").as_deref(),
        Some("TRUE")
    );
    assert_eq!(
        default_of(Dialect::Sqlite, DataType::Boolean, "false").as_deref(),
        Some("0")
    );
}

#[test]
fn test_string_and_null_defaults() {
    assert_eq!(
        default_of(Dialect::Postgres, DataType::Varchar, "'it''s'").as_deref(),
        Some("'it''s'")
    );
    assert_eq!(
        default_of(Dialect::MySql, DataType::Varchar, "active").as_deref(),
        Some("'active'")
    );
    assert_eq!(
        default_of(Dialect::Postgres, DataType::Integer, "null").as_deref(),
        Some("NULL")
    );
    assert_eq!(default_of(Dialect::Postgres, DataType::Integer, "  "), None);
}

#[test]
fn test_function_defaults() {
    assert_eq!(
        default_of(Dialect::Postgres, DataType::Timestamp, "NOW()").as_deref(),
        Some("CURRENT_TIMESTAMP")
    );
    assert_eq!(
        default_of(Dialect::Postgres, DataType::Uuid, "uuid()").as_deref(),
        Some("gen_random_uuid()")
    );
    assert_eq!(
        default_of(Dialect::MySql, DataType::Uuid, "UUID()").as_deref(),
        Some("(UUID())")
    );
    assert_eq!(
        default_of(Dialect::MySql, DataType::Date, "CURRENT_DATE").as_deref(),
        Some("(CURRENT_DATE)")
    );
    assert_eq!(
        default_of(Dialect::Sqlite, DataType::DateTime, "CURRENT_TIMESTAMP").as_deref(),
        Some("CURRENT_TIMESTAMP")
    );
}

#[test]
fn test_expression_default_is_verbatim() {
    assert_eq!(
        default_of(Dialect::Postgres, DataType::Integer, "(1 + 2)").as_deref(),
        Some("(1 + 2)")
    );
}

#[test]
fn test_format_value() {
    let pg = Dialect::Postgres.generator();
    assert_eq!(pg.format_value(&json!(null), Some(DataType::Text)), "NULL");
    assert_eq!(pg.format_value(&json!(42), Some(DataType::Integer)), "42");
    assert_eq!(pg.format_value(&json!("42"), Some(DataType::Integer)), "42");
    assert_eq!(pg.format_value(&json!("42"), Some(DataType::Varchar)), "'42'");
    assert_eq!(pg.format_value(&json!("yes"), Some(DataType::Boolean)), "TRUE");
    assert_eq!(pg.format_value(&json!(false), None), "FALSE");
    assert_eq!(
        pg.format_value(&json!({"a": 1}), Some(DataType::Jsonb)),
        "'{\"a\":1}'"
    );
}

#[test]
fn test_limit_offset() {
    assert_eq!(
        Dialect::Postgres.generator().limit_offset(Some(10), Some(5)),
        " LIMIT 10 OFFSET 5"
    );
    assert_eq!(
        Dialect::Postgres.generator().limit_offset(None, Some(5)),
        " OFFSET 5"
    );
    assert_eq!(
        Dialect::MySql.generator().limit_offset(None, Some(5)),
        " LIMIT 18446744073709551615 OFFSET 5"
    );
    assert_eq!(
        Dialect::Sqlite.generator().limit_offset(None, Some(5)),
        " LIMIT -1 OFFSET 5"
    );
    assert_eq!(Dialect::Sqlite.generator().limit_offset(None, None), "");
}

#[test]
fn test_mysql_column_extensions() {
    let column = Column::new("c", "updated_at", DataType::Timestamp)
        .not_null()
        .default_value("CURRENT_TIMESTAMP")
        .extension(Dialect::MySql, "onUpdate", "CURRENT_TIMESTAMP");
    let ctx = ColumnContext::default();
    assert_eq!(
        Dialect::MySql.generator().column_definition(&column, &ctx),
        "`updated_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
    );

    let counter = Column::new("c", "hits", DataType::BigInt)
        .extension(Dialect::MySql, "unsigned", "true")
        .default_value("0");
    assert_eq!(
        Dialect::MySql.generator().column_definition(&counter, &ctx),
        "`hits` BIGINT UNSIGNED DEFAULT 0"
    );

    let name = Column::new("c", "name", DataType::Varchar)
        .length(50)
        .extension(Dialect::MySql, "collate", "utf8mb4_bin");
    assert_eq!(
        Dialect::MySql.generator().column_definition(&name, &ctx),
        "`name` VARCHAR(50) COLLATE utf8mb4_bin"
    );
}

#[test]
fn test_check_constraints_by_dialect() {
    let column = Column::new("c", "qty", DataType::Integer).check("qty > 0");
    let ctx = ColumnContext::default();
    assert_eq!(
        Dialect::Postgres.generator().column_definition(&column, &ctx),
        "\"qty\" INTEGER CHECK (qty > 0)"
    );
    assert_eq!(
        Dialect::MySql.generator().column_definition(&column, &ctx),
        "`qty` INT"
    );
}

#[test]
fn test_sqlite_has_no_inline_unique() {
    let column = Column::new("c", "email", DataType::Text).unique();
    assert_eq!(
        Dialect::Sqlite
            .generator()
            .column_definition(&column, &ColumnContext::default()),
        "\"email\" TEXT"
    );
}
