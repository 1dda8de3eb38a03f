//! Ledger-wide scenarios and property-based invariants.

use crate::*;
use proptest::prelude::*;

fn addr(n: u8) -> Address {
    Address::from_bytes([n; 20])
}

const CUDOS: u8 = 1;
const PARTNER: u8 = 2;
const ANOTHER: u8 = 3;
const OTHER_ADMIN: u8 = 4;
const OTHER_PARTNER: u8 = 5;

/// Deployment plus the role setup used throughout the scenarios.
fn setup() -> CudosToken {
    let cudos = addr(CUDOS);
    let mut token = CudosToken::new(cudos).expect("deploy");
    token
        .add_whitelist_admin(&cudos, &addr(OTHER_ADMIN))
        .expect("add admin");
    token.add_whitelisted(&cudos, &addr(PARTNER)).expect("add partner");
    token
        .add_whitelisted(&cudos, &addr(OTHER_PARTNER))
        .expect("add other partner");
    token.take_events();
    token
}

fn assert_conserved(token: &CudosToken) {
    assert_eq!(token.ledger().circulating(), Some(token.total_supply()));
    assert!(!token.ledger().touches_zero_address());
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn genesis_issues_entire_supply() {
    let cudos = addr(CUDOS);
    let mut token = CudosToken::new(cudos).expect("deploy");

    assert_eq!(
        token.total_supply(),
        Amount::from_base_units(10_000_000_000 * 10u128.pow(18))
    );
    assert_eq!(token.balance_of(&cudos), token.total_supply());

    let transfers: Vec<_> = token
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, LedgerEvent::Transfer { .. }))
        .collect();
    assert_eq!(
        transfers,
        vec![LedgerEvent::Transfer {
            from: Address::ZERO,
            to: cudos,
            value: INITIAL_SUPPLY,
        }]
    );
    assert_eq!(token.is_whitelist_admin(&cudos), Ok(true));
    assert_eq!(token.is_whitelisted(&cudos), Ok(true));
}

#[test]
fn gate_opens_for_non_whitelisted_sender() {
    let mut token = setup();
    let cudos = addr(CUDOS);
    let another = addr(ANOTHER);
    token
        .transfer(&cudos, &another, Amount::tokens(1))
        .expect("fund");
    assert_eq!(token.balance_of(&another), Amount::tokens(1));

    let err = token
        .transfer(&another, &cudos, Amount::tokens(1))
        .expect_err("gate closed");
    assert_eq!(err, TokenError::GateClosed { account: another });
    assert_eq!(token.balance_of(&another), Amount::tokens(1));

    token.enable_transfers_for_all(&cudos).expect("enable");
    token
        .transfer(&another, &cudos, Amount::tokens(1))
        .expect("gate open");
    assert_eq!(token.balance_of(&another), Amount::ZERO);
    assert_conserved(&token);
}

#[test]
fn decrease_allowance_below_zero() {
    let mut token = setup();
    let (a, b) = (addr(CUDOS), addr(PARTNER));
    token.approve(&a, &b, Amount::from_base_units(100)).expect("approve");

    let err = token
        .decrease_allowance(&a, &b, Amount::from_base_units(101))
        .expect_err("underflow");
    assert_eq!(err, TokenError::ArithmeticUnderflow);
    assert_eq!(token.allowance(&a, &b), Amount::from_base_units(100));

    token.take_events();
    token
        .decrease_allowance(&a, &b, Amount::from_base_units(100))
        .expect("decrease");
    assert_eq!(token.allowance(&a, &b), Amount::ZERO);
    assert_eq!(
        token.take_events(),
        vec![LedgerEvent::Approval {
            owner: a,
            spender: b,
            value: Amount::ZERO,
        }]
    );
}

#[test]
fn decrease_allowance_with_nothing_approved() {
    let mut token = setup();
    let err = token
        .decrease_allowance(&addr(CUDOS), &addr(PARTNER), INITIAL_SUPPLY)
        .expect_err("underflow");
    assert_eq!(err, TokenError::ArithmeticUnderflow);
}

#[test]
fn increase_allowance_beyond_balance_is_allowed() {
    let mut token = setup();
    let (owner, spender) = (addr(CUDOS), addr(PARTNER));
    let amount = INITIAL_SUPPLY.try_add(Amount::from_base_units(1)).expect("fits");

    token
        .approve(&owner, &spender, Amount::from_base_units(1))
        .expect("approve");
    token.take_events();
    token
        .increase_allowance(&owner, &spender, amount)
        .expect("increase");

    let expected = amount.try_add(Amount::from_base_units(1)).expect("fits");
    assert_eq!(token.allowance(&owner, &spender), expected);
    assert_eq!(
        token.take_events(),
        vec![LedgerEvent::Approval {
            owner,
            spender,
            value: expected,
        }]
    );
}

#[test]
fn whitelist_managed_by_admins() {
    let mut token = setup();
    let (cudos, partner) = (addr(CUDOS), addr(PARTNER));
    let c = addr(9);

    token.add_whitelisted(&cudos, &c).expect("admin adds");
    assert_eq!(token.is_whitelisted(&c), Ok(true));
    assert_eq!(
        token.take_events(),
        vec![LedgerEvent::RoleAdded {
            role: Role::Whitelisted,
            account: c,
        }]
    );

    // a whitelisted partner is not an admin
    let err = token.add_whitelisted(&partner, &addr(10)).expect_err("not admin");
    assert_eq!(err, TokenError::missing_role(partner, Role::WhitelistAdmin));

    // c cannot remove itself through the admin path, but can renounce
    let err = token.remove_whitelisted(&c, &c).expect_err("not admin");
    assert_eq!(err.code(), "Unauthorized");
    token.renounce_whitelisted(&c).expect("renounce");
    assert_eq!(token.is_whitelisted(&c), Ok(false));
    assert_eq!(
        token.take_events(),
        vec![LedgerEvent::RoleRemoved {
            role: Role::Whitelisted,
            account: c,
        }]
    );
}

#[test]
fn second_admin_manages_whitelist() {
    let mut token = setup();
    let other_admin = addr(OTHER_ADMIN);
    token
        .remove_whitelisted(&other_admin, &addr(PARTNER))
        .expect("remove");
    assert_eq!(token.is_whitelisted(&addr(PARTNER)), Ok(false));
    assert_eq!(token.is_whitelisted(&addr(OTHER_PARTNER)), Ok(true));

    let err = token
        .remove_whitelisted(&other_admin, &addr(ANOTHER))
        .expect_err("not a member");
    assert_eq!(err.code(), "NotMember");
    let err = token
        .remove_whitelisted(&other_admin, &Address::ZERO)
        .expect_err("zero");
    assert_eq!(err.code(), "InvalidAccount");
}

#[test]
fn admin_role_lifecycle() {
    let mut token = setup();
    let (cudos, other_admin) = (addr(CUDOS), addr(OTHER_ADMIN));

    let err = token.add_whitelist_admin(&cudos, &other_admin).expect_err("dup");
    assert_eq!(err.code(), "AlreadyMember");
    let err = token.add_whitelist_admin(&cudos, &Address::ZERO).expect_err("zero");
    assert_eq!(err.code(), "InvalidAccount");

    // admins cannot evict each other
    let err = token
        .remove_role(&cudos, Role::WhitelistAdmin, &other_admin)
        .expect_err("evict");
    assert_eq!(err.code(), "Unauthorized");

    token.renounce_whitelist_admin(&cudos).expect("renounce");
    assert_eq!(token.is_whitelist_admin(&cudos), Ok(false));
    assert!(token.enable_transfers_for_all(&cudos).is_err());
    token.enable_transfers_for_all(&other_admin).expect("other admin");

    let err = token.renounce_whitelist_admin(&addr(ANOTHER)).expect_err("not admin");
    assert_eq!(err.code(), "NotMember");
}

#[test]
fn transfer_from_allowance_checked_before_balance() {
    let mut token = setup();
    let (cudos, partner, another) = (addr(CUDOS), addr(PARTNER), addr(ANOTHER));
    token.transfer(&cudos, &partner, Amount::tokens(10)).expect("fund");

    token.approve(&partner, &another, Amount::tokens(5)).expect("approve");
    let err = token
        .transfer_from(&another, &partner, &cudos, Amount::tokens(6))
        .expect_err("allowance");
    assert_eq!(
        err,
        TokenError::insufficient_allowance(Amount::tokens(5), Amount::tokens(6))
    );

    token.approve(&partner, &another, Amount::tokens(50)).expect("approve");
    let err = token
        .transfer_from(&another, &partner, &cudos, Amount::tokens(11))
        .expect_err("balance");
    assert_eq!(
        err,
        TokenError::insufficient_balance(Amount::tokens(10), Amount::tokens(11))
    );
    assert_eq!(token.allowance(&partner, &another), Amount::tokens(50));

    token
        .transfer_from(&another, &partner, &cudos, Amount::tokens(10))
        .expect("spend");
    assert_eq!(token.allowance(&partner, &another), Amount::tokens(40));
    assert_conserved(&token);
}

#[test]
fn transfer_from_to_zero_rejected() {
    let mut token = setup();
    let (cudos, partner) = (addr(CUDOS), addr(PARTNER));
    token.approve(&cudos, &partner, Amount::tokens(1)).expect("approve");
    let err = token
        .transfer_from(&partner, &cudos, &Address::ZERO, Amount::tokens(1))
        .expect_err("zero");
    assert_eq!(err.code(), "InvalidAccount");
    assert_eq!(token.allowance(&cudos, &partner), Amount::tokens(1));
}

#[test]
fn non_whitelisted_owner_blocked_even_with_allowance() {
    let mut token = setup();
    let (cudos, partner, another) = (addr(CUDOS), addr(PARTNER), addr(ANOTHER));
    token.transfer(&cudos, &another, Amount::tokens(1)).expect("fund");

    let err = token
        .transfer_from(&another, &another, &cudos, Amount::tokens(1))
        .expect_err("gate");
    assert_eq!(err.code(), "GateClosed");

    // approving is not gated
    token.approve(&another, &partner, Amount::tokens(1)).expect("approve");
    assert_eq!(token.allowance(&another, &partner), Amount::tokens(1));
}

// =============================================================================
// Property-based tests with proptest
// =============================================================================

fn arb_account() -> impl Strategy<Value = Address> {
    prop_oneof![
        8 => (1u8..=6).prop_map(addr),
        1 => Just(Address::ZERO),
    ]
}

fn arb_amount() -> impl Strategy<Value = Amount> {
    prop_oneof![
        (0u64..1_000).prop_map(|n| Amount::from_base_units(u128::from(n))),
        (0u64..20_000_000_000).prop_map(Amount::tokens),
        Just(Amount::MAX),
    ]
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::WhitelistAdmin), Just(Role::Whitelisted)]
}

fn arb_call() -> impl Strategy<Value = Call> {
    prop_oneof![
        4 => (arb_account(), arb_amount()).prop_map(|(to, amount)| Call::Transfer { to, amount }),
        2 => (arb_account(), arb_amount()).prop_map(|(spender, amount)| Call::Approve { spender, amount }),
        3 => (arb_account(), arb_account(), arb_amount())
            .prop_map(|(from, to, amount)| Call::TransferFrom { from, to, amount }),
        1 => (arb_account(), arb_amount())
            .prop_map(|(spender, delta)| Call::IncreaseAllowance { spender, delta }),
        1 => (arb_account(), arb_amount())
            .prop_map(|(spender, delta)| Call::DecreaseAllowance { spender, delta }),
        1 => (arb_role(), arb_account()).prop_map(|(role, account)| Call::AddRole { role, account }),
        1 => (arb_role(), arb_account()).prop_map(|(role, account)| Call::RemoveRole { role, account }),
        1 => arb_role().prop_map(|role| Call::RenounceRole { role }),
        1 => Just(Call::EnableTransfersForAll),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_supply_conserved_and_zero_never_stored(
        steps in prop::collection::vec((arb_account(), arb_call()), 1..60)
    ) {
        let mut token = CudosToken::new(addr(1)).expect("deploy");
        token.take_events();

        for (caller, call) in &steps {
            let before = token.clone();
            let gate_was_open = token.transfers_enabled();
            match token.dispatch(caller, call) {
                Ok(()) => {
                    prop_assert!(!token.take_events().is_empty() || matches!(call, Call::EnableTransfersForAll));
                }
                Err(_) => {
                    // failures are all-or-nothing
                    prop_assert_eq!(&token, &before);
                }
            }
            prop_assert_eq!(token.ledger().circulating(), Some(token.total_supply()));
            prop_assert!(!token.ledger().touches_zero_address());
            prop_assert!(token.has_role(Role::Whitelisted, &Address::ZERO).is_err());
            prop_assert!(!gate_was_open || token.transfers_enabled());
        }
        prop_assert_eq!(token.total_supply(), INITIAL_SUPPLY);
    }

    #[test]
    fn prop_approve_then_allowance(owner in 1u8..=6, spender in 1u8..=6, n in any::<u128>()) {
        let mut token = CudosToken::new(addr(1)).expect("deploy");
        token.approve(&addr(owner), &addr(spender), Amount::from_base_units(n)).expect("approve");
        prop_assert_eq!(token.allowance(&addr(owner), &addr(spender)), Amount::from_base_units(n));
    }

    #[test]
    fn prop_increase_then_decrease_round_trips(start in any::<u64>(), delta in any::<u64>()) {
        let mut token = CudosToken::new(addr(1)).expect("deploy");
        let (owner, spender) = (addr(2), addr(3));
        let start = Amount::from_base_units(u128::from(start));
        let delta = Amount::from_base_units(u128::from(delta));

        token.approve(&owner, &spender, start).expect("approve");
        token.increase_allowance(&owner, &spender, delta).expect("increase");
        token.decrease_allowance(&owner, &spender, delta).expect("decrease");
        prop_assert_eq!(token.allowance(&owner, &spender), start);
    }

    #[test]
    fn prop_enable_transfers_idempotent(repeats in 1usize..5) {
        let mut token = CudosToken::new(addr(1)).expect("deploy");
        for _ in 0..repeats {
            prop_assert!(token.enable_transfers_for_all(&addr(1)).is_ok());
            prop_assert!(token.transfers_enabled());
        }
    }
}
