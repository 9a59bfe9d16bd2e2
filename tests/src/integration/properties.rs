//! Property tests for invariants that only hold across a sequence of
//! operations, not any single one (spec §8's testable properties).

#[cfg(test)]
mod tests {
    use chain_keeper::{Config, Keeper, Msg};
    use chain_keeper::msgs::{DepositCollateralMsg, WithdrawCollateralMsg};
    use chain_store::InMemoryStore;
    use proptest::prelude::*;
    use shared_decimal::Decimal;
    use shared_types::BlockContext;

    fn ctx(height: u64) -> BlockContext {
        BlockContext::new(height, height * 5, 1)
    }

    const PARTICIPANT: &str = "infer1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5nx8kyg";

    proptest! {
        /// Deposits and withdrawals move coins between a participant's
        /// spendable balance, the collateral pool and the unbonding pool —
        /// never create or destroy them (data-model invariant 1) — no
        /// matter how many epochs pass or in what order they're issued.
        #[test]
        fn coin_conservation_holds_across_deposit_withdraw_sequences(
            ops in prop::collection::vec((any::<bool>(), 1i64..5_000i64), 1..20),
        ) {
            let mut store = InMemoryStore::new();
            let mut keeper = Keeper::new(Config::default());
            keeper.init_genesis(&mut store).unwrap();
            keeper.bank.credit(&PARTICIPANT.to_string(), 1_000_000);
            let total_before = keeper.bank.total_supply();

            let mut height = 1u64;
            let mut deposited = 0i64;
            for (is_deposit, amount) in ops {
                height += 1;
                if is_deposit || deposited == 0 {
                    if keeper
                        .apply(&mut store, &ctx(height), Msg::DepositCollateral(DepositCollateralMsg {
                            participant: PARTICIPANT.into(),
                            amount,
                        }))
                        .is_ok()
                    {
                        deposited += amount;
                    }
                } else {
                    let withdraw_amount = amount.min(deposited);
                    if withdraw_amount > 0
                        && keeper
                            .apply(&mut store, &ctx(height), Msg::WithdrawCollateral(WithdrawCollateralMsg {
                                participant: PARTICIPANT.into(),
                                amount: withdraw_amount,
                            }))
                            .is_ok()
                    {
                        deposited -= withdraw_amount;
                    }
                }
            }

            let final_epoch = height + Config::default().collateral.unbonding_period_epochs + 1;
            keeper.begin_block(&mut store, &ctx(final_epoch), Some(final_epoch)).unwrap();

            prop_assert_eq!(keeper.bank.total_supply(), total_before);
        }
    }

    proptest! {
        /// `calculate_reputation` always lands in `[0, 100]` regardless of
        /// epoch count or miss history shape (spec §4.2 invariant).
        #[test]
        fn reputation_is_always_bounded_to_0_100(
            epochs_completed in 0u64..500,
            miss_percents in prop::collection::vec(0i64..=100, 0..30),
        ) {
            let params = im_02_reputation::Params::default();
            let miss_fractions: Vec<Decimal> = miss_percents
                .iter()
                .map(|p| Decimal::ratio(*p, 100, 2).unwrap())
                .collect();

            let reputation = im_02_reputation::calculate_reputation(epochs_completed, &miss_fractions, &params);
            prop_assert!(reputation <= 100);
        }
    }

    proptest! {
        /// `calculate_invalidations` never returns more than the
        /// throttle's own ceiling and never goes negative (spec §4.3, S4).
        #[test]
        fn invalidation_throttle_is_bounded(
            inferences_processed in 0u64..200_000,
            reputation in 0u8..=100,
        ) {
            let params = im_02_reputation::Params::default();
            let weight = Decimal::one();
            let result = im_02_reputation::calculate_invalidations(inferences_processed, &weight, reputation, &params);
            prop_assert!(result >= 1);
            prop_assert!(result <= params.invalidations_limit);
        }
    }
}
