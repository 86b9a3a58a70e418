//! Transpiler tests.

mod dialects;

use crate::schema::{Column, DataType, Index, ReferentialAction, Relationship, Table};

pub(super) fn users() -> Table {
    Table::new("t_users", "users")
        .column(
            Column::new("c1", "id", DataType::Integer)
                .primary_key()
                .auto_increment(),
        )
        .column(
            Column::new("c2", "email", DataType::Varchar)
                .length(255)
                .not_null()
                .unique(),
        )
}

pub(super) fn customers() -> Table {
    Table::new("t_customers", "customers")
        .column(Column::new("k1", "id", DataType::Integer).primary_key())
        .column(
            Column::new("k2", "name", DataType::Varchar)
                .length(100)
                .not_null(),
        )
}

pub(super) fn orders() -> Table {
    Table::new("t_orders", "orders")
        .column(Column::new("o1", "id", DataType::Integer).primary_key())
        .column(Column::new("o2", "customer_id", DataType::Integer).not_null())
        .column(
            Column::new("o3", "total", DataType::Decimal)
                .precision(10, 2)
                .default_value("0"),
        )
        .relationship(
            Relationship::new(
                "r1",
                "fk_orders_customer",
                ("t_orders", "o2"),
                ("t_customers", "k1"),
            )
            .on_delete(ReferentialAction::Cascade),
        )
        .index(Index::new("i1", "idx_orders_customer", ["o2"]))
}
