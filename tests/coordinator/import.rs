use super::*;

/// Tests an order reported by both the character and the corporation endpoint.
///
/// Expected: the order is presented once, tagged as issued for the corporation
#[test]
fn order_in_both_scopes_is_presented_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;
    let character = &test.character;

    character
        .character_querying()
        .market_orders_monitor()
        .complete(ApiResult::success(factory::mock_market_orders(1, 2)));
    character
        .corporation_querying()
        .market_orders_monitor()
        .complete(ApiResult::success(factory::mock_market_orders(2, 2)));

    let orders = character.market_orders();
    let ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(orders[0].issued_for, IssuedFor::Character);
    assert_eq!(orders[1].issued_for, IssuedFor::Corporation);
    assert_eq!(orders[2].issued_for, IssuedFor::Corporation);
    Ok(())
}

/// Tests an import where the character scope returned an error.
///
/// Expected: only the corporation jobs are presented
#[test]
fn character_error_presents_corporation_records() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;
    let character = &test.character;

    character
        .character_querying()
        .industry_jobs_monitor()
        .complete(factory::api_error(221));
    character
        .corporation_querying()
        .industry_jobs_monitor()
        .complete(ApiResult::success(factory::mock_industry_jobs(40, 2)));

    let jobs = character.industry_jobs();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.issued_for == IssuedFor::Corporation));
    assert!(!character.character_querying().jobs_added());
    Ok(())
}

/// Tests an import replacing the previously presented records.
///
/// Expected: the second round's records replace the first round's
#[test]
fn import_replaces_presented_records() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_character_monitors_disabled()
        .build()?;
    let character = &test.character;
    let monitor = character.corporation_querying().market_orders_monitor();

    monitor.complete(ApiResult::success(factory::mock_market_orders(1, 3)));
    monitor.complete(ApiResult::success(factory::mock_market_orders(100, 1)));

    let orders = character.market_orders();
    assert_eq!(character.orders_import_count(), 2);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, 100);
    Ok(())
}
