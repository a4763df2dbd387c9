//! # Platform Flow Tests
//!
//! The reference integration sequence: post two oracle prices, open a
//! project, mint-and-stake at the k-adjusted price, let blocks pass, read
//! earned, then withdraw one block later.

use pegstone_core::oracle::{estimate_price_revision, PricePair};
use pegstone_platform::{EmissionConfig, Platform, PlatformConfig, ProjectConfig};

const UNIT: u128 = 1_000_000_000_000_000_000;
const SIGMA_SQ: f64 = 1.02739726027397e-7;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn reference_config() -> PlatformConfig {
    PlatformConfig {
        sigma_sq: SIGMA_SQ,
        emission: EmissionConfig {
            // 20 / 2_400_000 / 100 units per block per 1e24 staked
            units_per_block_num: 20_000_000_000_000_000_000_000_000,
            units_per_block_den: 240_000_000,
        },
        projects: vec![ProjectConfig {
            name: "Pegstone BTC Stable".into(),
            symbol: "PBTC".into(),
            channel_id: 0,
            pair_index: 2,
            base_price: 2_000 * UNIT,
        }],
    }
}

/// Two posts one block apart: 9/10 of the 62500 base, then the base itself
fn reference_pair() -> PricePair {
    let base = 62_500 * UNIT;
    PricePair::new(base, 101, base * 9 / 10, 100).unwrap()
}

#[test]
fn mint_stake_earn_withdraw_sequence() {
    init_logging();
    let mut platform = Platform::from_config(&reference_config()).unwrap();
    let pair = reference_pair();

    // Mint two blocks after the latest post; k is already positive
    let minted = platform
        .mint_and_stake(0, "owner", &pair, 103, 100 * UNIT)
        .unwrap();

    // The minted amount matches the independent estimate at the same k
    let k = estimate_price_revision(SIGMA_SQ, &pair, 103).unwrap();
    let expected = (100.0 * 2_000.0 / (62_500.0 * (1.0 + k))) * UNIT as f64;
    let relative_error = (minted as f64 - expected).abs() / expected;
    assert!(relative_error < 1e-10, "relative error {}", relative_error);

    assert_eq!(platform.project(0).unwrap().stable_supply(), minted);
    assert_eq!(platform.project(0).unwrap().pool().total_staked(), minted);

    // The owner holds the whole pool, so 12 blocks accrue 12 * rate
    let earned = platform.earned(0, "owner", 115).unwrap();
    assert_eq!(earned, 12 * 20_000_000_000_000_000_000_000_000 / 240_000_000);

    // Withdraw one block later: 13 elapsed blocks, checkpoint re-based
    let (principal, reward) = platform.withdraw(0, "owner", 116).unwrap();
    assert_eq!(principal, minted);
    assert_eq!(reward, 13 * 20_000_000_000_000_000_000_000_000 / 240_000_000);
}

#[test]
fn burn_after_withdraw_returns_collateral() {
    init_logging();
    let mut platform = Platform::from_config(&reference_config()).unwrap();
    let pair = reference_pair();

    let minted = platform
        .mint_and_stake(0, "owner", &pair, 103, 100 * UNIT)
        .unwrap();
    let (principal, _) = platform.withdraw(0, "owner", 116).unwrap();
    assert_eq!(principal, minted);

    // Burning everything at a staler price returns less than was paid in
    let returned = platform.burn(0, &pair, 116, minted).unwrap();
    assert!(returned < 100 * UNIT);
    assert_eq!(platform.project(0).unwrap().stable_supply(), 0);
}

#[test]
fn earned_is_idempotent_between_checkpoints() {
    init_logging();
    let mut platform = Platform::from_config(&reference_config()).unwrap();
    let pair = reference_pair();
    platform
        .mint_and_stake(0, "owner", &pair, 103, 100 * UNIT)
        .unwrap();

    let first = platform.earned(0, "owner", 110).unwrap();
    let second = platform.earned(0, "owner", 110).unwrap();
    assert_eq!(first, second);
}
