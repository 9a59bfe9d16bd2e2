//! End-to-end flows through `chain_keeper::Keeper`, each exercising more
//! than one module over a shared store and ledger — the module crates'
//! own test suites already cover each one in isolation.

#[cfg(test)]
mod tests {
    use chain_keeper::{Config, Keeper, Msg};
    use chain_keeper::msgs::{
        DepositCollateralMsg, SlashMsg, SubmitDealerPartMsg, SubmitNewParticipantMsg,
        UnjailMsg, WithdrawCollateralMsg,
    };
    use chain_store::InMemoryStore;
    use im_01_inference::{FinishInferenceMsg, FixedPriceOracle, StartInferenceMsg};
    use shared_decimal::Decimal;
    use shared_types::{BlockContext, DkgParticipant, DkgPhase, EpochBlsData, SlotRange};

    fn ctx(height: u64) -> BlockContext {
        BlockContext::new(height, height * 5, 1)
    }

    const PARTICIPANT: &str = "infer1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5nx8kyg";


    /// A served-and-settled inference feeds both C1's payment ledger and
    /// C2's attendance bookkeeping off the same `FinishInference` message.
    #[test]
    fn served_inference_updates_both_payment_and_reputation() {
        let mut store = InMemoryStore::new();
        let mut keeper = Keeper::with_oracle(Config::default(), Box::new(FixedPriceOracle(Some(1000))));
        keeper.init_genesis(&mut store).unwrap();
        keeper.bank.credit(&"requester".to_string(), 1_000_000);

        keeper
            .apply(
                &mut store,
                &ctx(1),
                Msg::SubmitNewParticipant(SubmitNewParticipantMsg {
                    address: "executor".into(),
                    validator_key: vec![1; 33],
                    worker_key: vec![2; 33],
                    inference_url: "https://executor.example".into(),
                }),
            )
            .unwrap();

        keeper
            .apply(
                &mut store,
                &ctx(2),
                Msg::StartInference(StartInferenceMsg {
                    inference_id: "inf1".into(),
                    model: "llama".into(),
                    prompt_hash: [0u8; 32],
                    prompt_tokens: 10,
                    max_tokens: 100,
                    requested_by: "requester".into(),
                    assigned_to: "executor".into(),
                    developer_signature: None,
                }),
            )
            .unwrap();

        keeper
            .apply(
                &mut store,
                &ctx(3),
                Msg::FinishInference(FinishInferenceMsg {
                    inference_id: "inf1".into(),
                    response_hash: [1u8; 32],
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    executed_by: "executor".into(),
                    executor_signature: None,
                }),
            )
            .unwrap();

        assert_eq!(keeper.bank.balance_of(&"executor".to_string()), 30_000);
        let participant = keeper.reputation().get(&store, "executor").unwrap();
        assert_eq!(participant.current_epoch_stats.requests_served, 1);
    }

    /// Slashing a jailed-threshold fraction jails the participant in C5
    /// and C2 together; `Unjail` after the wait period restores both.
    #[test]
    fn slash_then_unjail_moves_both_collateral_and_reputation_status() {
        let mut store = InMemoryStore::new();
        let mut keeper = Keeper::new(Config::default());
        keeper.init_genesis(&mut store).unwrap();
        keeper.bank.credit(&PARTICIPANT.to_string(), 1_000_000);

        keeper
            .apply(
                &mut store,
                &ctx(1),
                Msg::SubmitNewParticipant(SubmitNewParticipantMsg {
                    address: PARTICIPANT.into(),
                    validator_key: vec![1; 33],
                    worker_key: vec![2; 33],
                    inference_url: "https://bob.example".into(),
                }),
            )
            .unwrap();
        keeper
            .apply(
                &mut store,
                &ctx(1),
                Msg::DepositCollateral(DepositCollateralMsg { participant: PARTICIPANT.into(), amount: 500_000 }),
            )
            .unwrap();

        keeper
            .apply(
                &mut store,
                &ctx(2),
                Msg::Slash(SlashMsg { participant: PARTICIPANT.into(), fraction: Decimal::parse("0.9").unwrap() }),
            )
            .unwrap();

        let account = keeper.collateral_account(&store, PARTICIPANT).unwrap();
        assert!(account.jailed);
        let participant = keeper.reputation().get(&store, PARTICIPANT).unwrap();
        assert_eq!(participant.status, shared_types::ParticipantStatus::Jailed);

        let eligible = account.jail_eligible_epoch.unwrap();
        keeper
            .apply(
                &mut store,
                &ctx(eligible),
                Msg::Unjail(UnjailMsg { participant: PARTICIPANT.into() }),
            )
            .unwrap();

        let account = keeper.collateral_account(&store, PARTICIPANT).unwrap();
        assert!(!account.jailed);
        let participant = keeper.reputation().get(&store, PARTICIPANT).unwrap();
        assert_eq!(participant.status, shared_types::ParticipantStatus::Active);
    }

    /// Scenario S7 (spec §8) driven through `begin_block`'s epoch-boundary
    /// hook rather than calling the collateral keeper directly: two
    /// withdrawals at different epochs release strictly in completion
    /// order, never early.
    #[test]
    fn unbonding_entries_release_in_fifo_completion_order_across_epochs() {
        let mut store = InMemoryStore::new();
        let mut keeper = Keeper::new(Config::default());
        keeper.init_genesis(&mut store).unwrap();
        keeper.bank.credit(&PARTICIPANT.to_string(), 1_000);

        keeper
            .apply(
                &mut store,
                &ctx(1),
                Msg::DepositCollateral(DepositCollateralMsg { participant: PARTICIPANT.into(), amount: 300 }),
            )
            .unwrap();

        keeper
            .apply(
                &mut store,
                &ctx(10),
                Msg::WithdrawCollateral(WithdrawCollateralMsg { participant: PARTICIPANT.into(), amount: 100 }),
            )
            .unwrap();
        keeper
            .apply(
                &mut store,
                &ctx(11),
                Msg::WithdrawCollateral(WithdrawCollateralMsg { participant: PARTICIPANT.into(), amount: 200 }),
            )
            .unwrap();

        let unbonding_period = Config::default().collateral.unbonding_period_epochs;

        keeper.begin_block(&mut store, &ctx(10 + unbonding_period), Some(10 + unbonding_period)).unwrap();
        assert_eq!(keeper.bank.balance_of(&PARTICIPANT.to_string()), 700);

        keeper.begin_block(&mut store, &ctx(11 + unbonding_period), Some(11 + unbonding_period)).unwrap();
        assert_eq!(keeper.bank.balance_of(&PARTICIPANT.to_string()), 900);
    }

    /// Scenario S6's DEALING -> VERIFYING half (spec §8), driven through
    /// `chain-keeper`'s own `begin_block` rather than calling the DKG
    /// keeper directly: `im-06-dkg`'s own test suite already carries this
    /// all the way through to a real `G2Point`-summed group key.
    #[test]
    fn dkg_epoch_advances_to_verifying_once_the_dealing_deadline_is_reached() {
        let mut store = InMemoryStore::new();
        let mut keeper = Keeper::new(Config::default());

        let participants: Vec<DkgParticipant> = (0..4)
            .map(|i| DkgParticipant {
                address: format!("p{i}"),
                slots: SlotRange { slot_start: i * 4, slot_end: i * 4 + 3 },
            })
            .collect();

        keeper
            .start_dkg_epoch(
                &mut store,
                EpochBlsData {
                    epoch_id: 1,
                    participants,
                    t_slots_degree: 8,
                    i_total_slots: 16,
                    phase: DkgPhase::Dealing,
                    dealing_deadline: 10,
                    verifying_deadline: 20,
                    dealer_parts: vec![None; 4],
                    verification_submissions: vec![None; 4],
                    valid_dealers: Vec::new(),
                    group_public_key: None,
                },
            )
            .unwrap();

        for dealer in 0..3u32 {
            keeper
                .apply(
                    &mut store,
                    &ctx(2),
                    Msg::SubmitDealerPart(SubmitDealerPartMsg {
                        epoch_id: 1,
                        dealer_index: dealer,
                        commitments: vec![[dealer as u8 + 1; 96]],
                    }),
                )
                .unwrap();
        }

        keeper.begin_block(&mut store, &ctx(10), None).unwrap();
        let epoch = keeper.dkg_epoch(&store, 1).unwrap();
        assert_eq!(epoch.phase, DkgPhase::Verifying);
        assert_eq!(epoch.verifying_deadline, 10 + Config::default().dkg.verification_phase_duration_blocks);
    }

    /// An emergency transfer is blocked before an exemption exists, then
    /// allowed once governance creates one — and blocked again once its
    /// `usage_limit` is exhausted.
    #[test]
    fn emergency_transfer_requires_a_live_unexhausted_exemption() {
        let mut store = InMemoryStore::new();
        let mut config = Config::default();
        config.restrictions.restriction_end_block = 1_000;
        let mut keeper = Keeper::new(config);
        keeper.init_genesis(&mut store).unwrap();
        keeper.bank.credit(&"alice".to_string(), 1_000);

        let msg = || {
            Msg::ExecuteEmergencyTransfer(chain_keeper::msgs::ExecuteEmergencyTransferMsg {
                from: "alice".into(),
                to: "bob".into(),
                amount: 100,
                denom: shared_types::BASE_DENOM.0.to_string(),
            })
        };

        assert!(keeper.apply(&mut store, &ctx(1), msg()).is_err());

        keeper
            .create_exemption(
                &mut store,
                shared_types::EmergencyExemption {
                    exemption_id: "ex1".into(),
                    from_address: Some("alice".into()),
                    to_address: None,
                    max_amount: 100,
                    usage_limit: 1,
                    expiry_block: 500,
                    justification: "liquidity event".into(),
                },
            )
            .unwrap();

        keeper.apply(&mut store, &ctx(2), msg()).unwrap();
        assert_eq!(keeper.bank.balance_of(&"bob".to_string()), 100);

        let err = keeper.apply(&mut store, &ctx(3), msg()).unwrap_err();
        assert!(matches!(err, chain_keeper::AppError::Restriction(_)));
    }
}
