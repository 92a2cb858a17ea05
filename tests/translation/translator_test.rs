use std::sync::Arc;
use std::thread;

use mipha::model::{Comparator, Condition, Cube, JoinType, Table};
use mipha::translator::{ScopeDiagnostic, SqlTranslator, TranslateError};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

#[path = "../common/mod.rs"]
mod common;

fn demo_cube() -> Cube {
    let (voucher, account, customer) = common::offline_tables();
    Cube::builder("demoCube", &voucher)
        .left_join(
            &account,
            Condition::with_comparator(
                voucher.field("ACCOUNT_NO").unwrap(),
                account.field("ACCOUNT_NO").unwrap(),
                Comparator::Greater,
            ),
        )
        .inner_join(
            &customer,
            Condition::new(
                account.field("CUS_ID").unwrap(),
                customer.field("CUS_ID").unwrap(),
            ),
        )
        .build()
}

fn assert_parses(sql: &str) {
    let statements = Parser::parse_sql(&GenericDialect {}, sql)
        .unwrap_or_else(|e| panic!("generated SQL does not parse: {}\n{}", e, sql));
    assert_eq!(statements.len(), 1);
}

#[test]
fn test_demo_cube_sql() {
    let sql = SqlTranslator::new().translate(&demo_cube()).unwrap();

    insta::assert_snapshot!(sql, @r"
    SELECT
      t0.*
    FROM BANK_VOUCHER AS t0
    LEFT JOIN ACCOUNT AS t1 ON t0.ACCOUNT_NO > t1.ACCOUNT_NO
    INNER JOIN CUST_BASIC_INFO AS t2 ON t1.CUS_ID = t2.CUS_ID
    ");
    assert_parses(&sql);
}

#[test]
fn test_fact_only_cube() {
    let (voucher, _, _) = common::offline_tables();
    let sql = SqlTranslator::new()
        .translate(&Cube::new("facts", &voucher))
        .unwrap();

    assert_eq!(sql, "SELECT\n  t0.*\nFROM BANK_VOUCHER AS t0");
    assert_parses(&sql);
}

#[test]
fn test_translation_is_deterministic() {
    let cube = demo_cube();
    let translator = SqlTranslator::new();

    let first = translator.translate(&cube).unwrap();
    let second = translator.translate(&cube).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_translation_agrees() {
    let cube = Arc::new(demo_cube());
    let expected = SqlTranslator::new().translate(&cube).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cube = Arc::clone(&cube);
            thread::spawn(move || SqlTranslator::new().translate(&cube).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_dimension_order_changes_output() {
    let (voucher, account, customer) = common::offline_tables();
    let to_account = Condition::new(
        voucher.field("ACCOUNT_NO").unwrap(),
        account.field("ACCOUNT_NO").unwrap(),
    );
    let to_customer = Condition::new(
        account.field("CUS_ID").unwrap(),
        customer.field("CUS_ID").unwrap(),
    );

    let forward = Cube::builder("forward", &voucher)
        .left_join(&account, to_account.clone())
        .left_join(&customer, to_customer.clone())
        .build();
    let reversed = Cube::builder("reversed", &voucher)
        .left_join(&customer, to_customer)
        .left_join(&account, to_account)
        .build();

    let translator = SqlTranslator::new();
    let forward = translator.translate_with_aliases(&forward).unwrap();
    let reversed = translator.translate_with_aliases(&reversed).unwrap();

    assert_ne!(forward.sql, reversed.sql);
    assert!(forward.is_clean());
    // ACCOUNT is not joined yet when CUST_BASIC_INFO is attached
    assert!(reversed
        .sql
        .contains("LEFT JOIN CUST_BASIC_INFO AS t1 ON ACCOUNT.CUS_ID = t1.CUS_ID"));
    assert_eq!(
        reversed.diagnostics,
        vec![ScopeDiagnostic::FieldOutOfScope {
            position: 1,
            field: account.field("CUS_ID").unwrap(),
        }]
    );
}

#[test]
fn test_same_table_twice_gets_distinct_aliases() {
    let (voucher, account, _) = common::offline_tables();
    let parent = account.aliased("parent");

    let cube = Cube::builder("selfJoin", &voucher)
        .left_join(
            &account,
            Condition::new(
                voucher.field("ACCOUNT_NO").unwrap(),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .left_join(
            &parent,
            Condition::new(
                account.field("CUS_ID").unwrap(),
                parent.field("CUS_ID").unwrap(),
            ),
        )
        .build();

    let translation = SqlTranslator::new().translate_with_aliases(&cube).unwrap();
    assert_eq!(
        translation.sql,
        "SELECT\n  t0.*\nFROM BANK_VOUCHER AS t0\n\
         LEFT JOIN ACCOUNT AS t1 ON t0.ACCOUNT_NO = t1.ACCOUNT_NO\n\
         LEFT JOIN ACCOUNT AS t2 ON t1.CUS_ID = t2.CUS_ID"
    );
    assert_eq!(translation.aliases.alias_of(&account.key()), Some("t1"));
    assert_eq!(translation.aliases.alias_of(&parent.key()), Some("t2"));
    assert!(translation.is_clean());
    assert_parses(&translation.sql);
}

#[test]
fn test_field_from_differently_cased_table_resolves() {
    let (voucher, account, _) = common::offline_tables();
    let lowercase = Table::new("account");
    let cube = Cube::builder("case", &voucher)
        .left_join(
            &account,
            Condition::new(
                voucher.field("ACCOUNT_NO").unwrap(),
                lowercase.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .build();

    let translation = SqlTranslator::new().translate_with_aliases(&cube).unwrap();
    assert!(translation
        .sql
        .ends_with("LEFT JOIN ACCOUNT AS t1 ON t0.ACCOUNT_NO = t1.ACCOUNT_NO"));
    assert!(translation.is_clean());
}

#[test]
fn test_raw_expressions_are_verbatim() {
    let (voucher, account, _) = common::offline_tables();
    let cube = Cube::builder("expr", &voucher)
        .inner_join(
            &account,
            Condition::new(
                voucher.expression("t0.ACCOUNT_NO || '1'"),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .build();

    let sql = SqlTranslator::new().translate(&cube).unwrap();
    assert!(sql.ends_with("INNER JOIN ACCOUNT AS t1 ON t0.ACCOUNT_NO || '1' = t1.ACCOUNT_NO"));
    assert_parses(&sql);
}

#[test]
fn test_expression_fact_and_target() {
    let (_, account, _) = common::offline_tables();
    let anchor = Table::new("VOUCHERS_2024");
    let cube = Cube::builder("derived", anchor.expression("(SELECT * FROM BANK_VOUCHER) AS v"))
        .dimension(
            JoinType::Left,
            &account,
            Condition::new(
                anchor.expression("v.ACCOUNT_NO"),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .build();

    let translation = SqlTranslator::new().translate_with_aliases(&cube).unwrap();
    assert_eq!(
        translation.sql,
        "SELECT\n  *\nFROM (SELECT * FROM BANK_VOUCHER) AS v\n\
         LEFT JOIN ACCOUNT AS t1 ON v.ACCOUNT_NO = t1.ACCOUNT_NO"
    );
    // Expressions take a position but no alias
    assert_eq!(translation.aliases.len(), 1);
    assert_eq!(translation.aliases.alias_at(1), Some("t1"));
    assert_parses(&translation.sql);
}

#[test]
fn test_anchor_out_of_scope_is_reported() {
    let (voucher, account, customer) = common::offline_tables();
    let cube = Cube::builder("hazard", &voucher)
        .left_join(
            &account,
            Condition::new(
                customer.expression("CUST_BASIC_INFO.CUS_ID"),
                account.field("CUS_ID").unwrap(),
            ),
        )
        .build();

    let translation = SqlTranslator::new().translate_with_aliases(&cube).unwrap();
    assert!(!translation.is_clean());
    assert!(matches!(
        &translation.diagnostics[0],
        ScopeDiagnostic::AnchorOutOfScope { position: 1, anchor } if anchor == &customer.key()
    ));
}

#[test]
fn test_unsupported_comparator_names_the_dimension() {
    let (voucher, account, customer) = common::offline_tables();
    let cube = Cube::builder("bad", &voucher)
        .left_join(
            &account,
            Condition::new(
                voucher.field("ACCOUNT_NO").unwrap(),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .left_join(
            &customer,
            Condition::with_comparator(
                account.field("CUS_ID").unwrap(),
                customer.field("CUS_ID").unwrap(),
                "BETWEEN",
            ),
        )
        .build();

    let err = SqlTranslator::new().translate(&cube).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnsupportedComparator {
            comparator: "BETWEEN".into(),
            position: 2,
        }
    );
    assert_eq!(
        err.to_string(),
        "Unsupported comparator 'BETWEEN' in dimension 2"
    );
}

#[test]
fn test_every_comparator_parses() {
    let (voucher, account, _) = common::offline_tables();
    for comparator in ["=", "<>", ">", ">=", "<", "<=", "LIKE", "NOT LIKE"] {
        let cube = Cube::builder("ops", &voucher)
            .left_join(
                &account,
                Condition::with_comparator(
                    voucher.field("ACCOUNT_NO").unwrap(),
                    account.field("ACCOUNT_NO").unwrap(),
                    comparator,
                ),
            )
            .build();
        let sql = SqlTranslator::new().translate(&cube).unwrap();
        assert!(sql.contains(&format!(" {} ", comparator)), "{}", sql);
        assert_parses(&sql);
    }
}
