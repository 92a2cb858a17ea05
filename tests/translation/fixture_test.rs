//! Translated cubes executed against the shared SQLite fixture.

use mipha::execution::{ExecutionError, SqlExecutor};
use mipha::model::{Comparator, Condition, Cube, JoinType};
use mipha::translator::SqlTranslator;

#[path = "../common/mod.rs"]
mod common;

use common::Fixture;

async fn voucher_account_cube(
    fx: &Fixture,
    join_type: JoinType,
    comparator: Comparator,
) -> Cube {
    let voucher = fx.table("BANK_VOUCHER").await;
    let account = fx.table("ACCOUNT").await;
    Cube::builder("demoCube", &voucher)
        .dimension(
            join_type,
            &account,
            Condition::with_comparator(
                voucher.field("ACCOUNT_NO").unwrap(),
                account.field("ACCOUNT_NO").unwrap(),
                comparator,
            ),
        )
        .build()
}

async fn three_way_cube(fx: &Fixture, first: JoinType, second: JoinType) -> Cube {
    let (voucher, account, customer) = fx.tables().await;
    Cube::builder("threeWay", &voucher)
        .dimension(
            first,
            &account,
            Condition::new(
                voucher.field("ACCOUNT_NO").unwrap(),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .dimension(
            second,
            &customer,
            Condition::new(
                account.field("CUS_ID").unwrap(),
                customer.field("CUS_ID").unwrap(),
            ),
        )
        .build()
}

#[tokio::test]
async fn test_fact_only_returns_every_voucher() {
    let fx = Fixture::new();
    let voucher = fx.table("BANK_VOUCHER").await;
    assert_eq!(fx.count(&Cube::new("facts", &voucher)).await, 2);
}

#[tokio::test]
async fn test_left_join_equals() {
    let fx = Fixture::new();
    let cube = voucher_account_cube(&fx, JoinType::Left, Comparator::Equals).await;
    assert_eq!(fx.count(&cube).await, 2);
}

#[tokio::test]
async fn test_left_join_greater() {
    let fx = Fixture::new();
    let cube = voucher_account_cube(&fx, JoinType::Left, Comparator::Greater).await;
    assert_eq!(fx.count(&cube).await, 12);
}

#[tokio::test]
async fn test_comparator_changes_result() {
    let fx = Fixture::new();
    let equals = voucher_account_cube(&fx, JoinType::Left, Comparator::Equals).await;
    let greater = voucher_account_cube(&fx, JoinType::Left, Comparator::Greater).await;
    assert_ne!(fx.count(&equals).await, fx.count(&greater).await);
}

#[tokio::test]
async fn test_inner_join_equals() {
    let fx = Fixture::new();
    let cube = voucher_account_cube(&fx, JoinType::Inner, Comparator::Equals).await;
    assert_eq!(fx.count(&cube).await, 1);
}

#[tokio::test]
async fn test_inner_join_on_expression_matches_nothing() {
    let fx = Fixture::new();
    let voucher = fx.table("BANK_VOUCHER").await;
    let account = fx.table("ACCOUNT").await;
    let cube = Cube::builder("expr", &voucher)
        .inner_join(
            &account,
            Condition::new(
                voucher.expression("t0.ACCOUNT_NO || '1'"),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .build();

    assert_eq!(fx.count(&cube).await, 0);
}

#[tokio::test]
async fn test_expression_naming_fact_table_fails_at_database() {
    let fx = Fixture::new();
    let voucher = fx.table("BANK_VOUCHER").await;
    let account = fx.table("ACCOUNT").await;
    let cube = Cube::builder("expr", &voucher)
        .inner_join(
            &account,
            Condition::new(
                voucher.expression("concat(BANK_VOUCHER.ACCOUNT_NO,'1')"),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .build();

    // The anchor is in scope, so translation is clean; the raw text still
    // names BANK_VOUCHER, which is only visible as t0.
    let translation = SqlTranslator::new().translate_with_aliases(&cube).unwrap();
    assert!(translation.is_clean());
    assert!(translation
        .sql
        .ends_with("INNER JOIN ACCOUNT AS t1 ON concat(BANK_VOUCHER.ACCOUNT_NO,'1') = t1.ACCOUNT_NO"));

    let err = fx.executor.query(&translation.sql).await.unwrap_err();
    assert!(matches!(err, ExecutionError::Backend(_)), "{}", err);
}

#[tokio::test]
async fn test_left_join_on_unmatched_expression_keeps_facts() {
    let fx = Fixture::new();
    let voucher = fx.table("BANK_VOUCHER").await;
    let account = fx.table("ACCOUNT").await;
    let cube = Cube::builder("expr", &voucher)
        .left_join(
            &account,
            Condition::new(
                voucher.expression("t0.ACCOUNT_NO || '1'"),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .build();

    let facts = fx.count(&Cube::new("facts", &voucher)).await;
    assert!(fx.count(&cube).await >= facts);
}

#[tokio::test]
async fn test_left_left_three_way() {
    let fx = Fixture::new();
    let cube = three_way_cube(&fx, JoinType::Left, JoinType::Left).await;
    assert_eq!(fx.count(&cube).await, 2);
}

#[tokio::test]
async fn test_inner_inner_three_way() {
    let fx = Fixture::new();
    let cube = three_way_cube(&fx, JoinType::Inner, JoinType::Inner).await;
    assert_eq!(fx.count(&cube).await, 0);
}

#[tokio::test]
async fn test_mixed_join_types() {
    let fx = Fixture::new();
    let inner_left = three_way_cube(&fx, JoinType::Inner, JoinType::Left).await;
    let left_inner = three_way_cube(&fx, JoinType::Left, JoinType::Inner).await;

    assert_eq!(fx.count(&inner_left).await, 1);
    assert_eq!(fx.count(&left_inner).await, 0);
}

#[tokio::test]
async fn test_self_join_with_caller_alias() {
    let fx = Fixture::new();
    let voucher = fx.table("BANK_VOUCHER").await;
    let account = fx.table("ACCOUNT").await;
    let sibling = account.aliased("sibling");

    let cube = Cube::builder("selfJoin", &voucher)
        .left_join(
            &account,
            Condition::new(
                voucher.field("ACCOUNT_NO").unwrap(),
                account.field("ACCOUNT_NO").unwrap(),
            ),
        )
        .left_join(
            &sibling,
            Condition::new(
                account.field("CUS_ID").unwrap(),
                sibling.field("CUS_ID").unwrap(),
            ),
        )
        .build();

    assert_eq!(fx.count(&cube).await, 2);
}

#[tokio::test]
async fn test_rows_carry_fact_columns_only() {
    let fx = Fixture::new();
    let cube = three_way_cube(&fx, JoinType::Left, JoinType::Left).await;
    let sql = SqlTranslator::new().translate(&cube).unwrap();

    let result = fx.executor.query(&sql).await.unwrap();
    assert_eq!(result.columns, vec!["VOUCHER_ID", "ACCOUNT_NO", "AMOUNT"]);

    let accounts: Vec<_> = result
        .to_objects()
        .iter()
        .map(|row| row["ACCOUNT_NO"].clone())
        .collect();
    assert_eq!(accounts, vec!["6227001", "6227099"]);
}

#[tokio::test]
async fn test_out_of_scope_reference_fails_at_database() {
    let fx = Fixture::new();
    let (voucher, account, customer) = fx.tables().await;
    let cube = Cube::builder("hazard", &voucher)
        .left_join(
            &account,
            Condition::new(
                customer.field("CUS_ID").unwrap(),
                account.field("CUS_ID").unwrap(),
            ),
        )
        .left_join(
            &customer,
            Condition::new(
                account.field("CUS_ID").unwrap(),
                customer.field("CUS_ID").unwrap(),
            ),
        )
        .build();

    let translation = SqlTranslator::new().translate_with_aliases(&cube).unwrap();
    assert_eq!(translation.diagnostics.len(), 1);
    assert!(fx.executor.query(&translation.sql).await.is_err());
}
