use super::*;

/// Tests removing the only corporation key of a character also holding a character key.
///
/// Expected: both corporation monitors leave the registry, character monitors stay
#[test]
fn removing_corporation_key_removes_monitors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_credential(CredentialKind::Character)
        .build()?;
    assert!(test.corporation_monitors_registered());
    assert_eq!(test.character.monitors().len(), 4);

    test.remove_credential(1)?;

    assert!(!test.corporation_monitors_registered());
    let corporation_monitors = test.character.corporation_querying().monitors();
    assert!(!test.character.monitors().contains_any(corporation_monitors));
    assert_eq!(test.character.monitors().len(), 2);
    Ok(())
}

/// Tests adding a corporation key back after the monitors were removed.
///
/// Expected: both corporation monitors are registered again
#[test]
fn adding_corporation_key_restores_monitors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_credential(CredentialKind::Character)
        .build()?;
    test.remove_credential(1)?;

    test.add_credential(factory::mock_credential(3, CredentialKind::Corporation));

    assert!(test.corporation_monitors_registered());
    assert_eq!(test.character.monitors().len(), 4);
    Ok(())
}

/// Tests retyping the corporation key into an account key.
///
/// Expected: monitors removed, then restored when the key is retyped back
#[test]
fn retyping_key_moves_monitors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;

    test.retype_credential(1, CredentialKind::Account)?;
    assert!(!test.corporation_monitors_registered());

    test.retype_credential(1, CredentialKind::Corporation)?;
    assert!(test.corporation_monitors_registered());
    Ok(())
}

/// Tests a character key change while a corporation key is still held.
///
/// Expected: corporation monitors stay registered
#[test]
fn remaining_corporation_key_keeps_monitors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_credential(CredentialKind::Character)
        .build()?;

    test.remove_credential(2)?;
    test.add_credential(factory::mock_credential(3, CredentialKind::Account));

    assert!(test.corporation_monitors_registered());
    Ok(())
}

/// Tests a character created with only a character key.
///
/// Expected: no corporation monitor registered, one added by a later corporation key
#[test]
fn character_key_only_starts_without_monitors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Character)
        .build()?;
    assert!(!test.corporation_monitors_registered());
    assert_eq!(test.character.monitors().len(), 2);

    test.add_credential(factory::mock_credential(2, CredentialKind::Corporation));

    assert!(test.corporation_monitors_registered());
    Ok(())
}

/// Tests publishing the same changes several times.
///
/// Expected: the registry never holds a corporation monitor twice and never loses a
/// character monitor
#[test]
fn repeated_changes_are_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_credential(CredentialKind::Character)
        .build()?;
    let corporation_key = test.remove_credential(1)?;
    let removed = CredentialChange::removed(corporation_key.clone());

    test.notifier.notify(&removed);
    test.notifier.notify(&removed);
    assert_eq!(test.character.monitors().len(), 2);

    test.add_credential(corporation_key.clone());
    test.notifier.notify(&CredentialChange::added(corporation_key));
    assert_eq!(test.character.monitors().len(), 4);
    Ok(())
}

/// Tests changes to keys of another character.
///
/// Expected: no change to the registry in either direction
#[test]
fn foreign_key_changes_are_ignored() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_credential(CredentialKind::Character)
        .build()?;
    let foreign = Credential::new(9, CredentialKind::Character, vec![OTHER_CHARACTER_ID]);

    test.notifier.notify(&CredentialChange::added(foreign.clone()));
    test.notifier.notify(&CredentialChange::removed(foreign));
    assert!(test.corporation_monitors_registered());

    test.remove_credential(1)?;
    let foreign_corporation =
        Credential::new(10, CredentialKind::Corporation, vec![OTHER_CHARACTER_ID]);
    test.notifier.notify(&CredentialChange::added(foreign_corporation));
    assert!(!test.corporation_monitors_registered());
    Ok(())
}

/// Tests two characters sharing one notifier.
///
/// Expected: removing one character's corporation key leaves the other's monitors alone
#[test]
fn changes_only_affect_owning_character() -> Result<(), TestError> {
    let notifier = CredentialChangeNotifier::new();
    let first = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_notifier(notifier.clone())
        .build()?;
    let second = TestBuilder::new()
        .with_character_id(OTHER_CHARACTER_ID)
        .with_notifier(notifier.clone())
        .build()?;
    second.add_credential(Credential::new(
        5,
        CredentialKind::Corporation,
        vec![OTHER_CHARACTER_ID],
    ));
    assert_eq!(notifier.subscriber_count(), 2);
    assert!(first.corporation_monitors_registered());
    assert!(second.corporation_monitors_registered());

    first.remove_credential(1)?;

    assert!(!first.corporation_monitors_registered());
    assert!(second.corporation_monitors_registered());
    Ok(())
}

/// Tests losing corporation access with one corporation monitor already unregistered.
///
/// Expected: the remaining corporation monitor is removed too
#[test]
fn removal_clears_partially_registered_monitors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .with_credential(CredentialKind::Character)
        .build()?;
    let orders_monitor = test.character.corporation_querying().market_orders_monitor();
    test.character.monitors().remove(orders_monitor.id());
    assert!(!test.corporation_monitors_registered());
    assert!(test
        .character
        .corporation_querying()
        .is_registered(test.character.monitors()));

    test.remove_credential(1)?;

    assert!(!test
        .character
        .corporation_querying()
        .is_registered(test.character.monitors()));
    assert_eq!(test.character.monitors().len(), 2);
    Ok(())
}
