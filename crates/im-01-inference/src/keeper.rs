//! Orchestrates the inference state machine over the store and the bank
//! (spec §4.1). Signatures are verified by `im-07-auth` before either
//! handler below is invoked; this keeper trusts its caller.

use chain_store::TypedStore;
use shared_types::{keys, BlockContext, Inference, InferenceStatus, ModuleEvent};

use crate::bank::EscrowBank;
use crate::domain::{self, FinishInferenceMsg, StartInferenceMsg};
use crate::errors::InferenceError;
use crate::oracle::PricingOracle;
use crate::params::Params;

pub struct InferenceKeeper {
    params: Params,
    pending_events: Vec<ModuleEvent>,
}

impl InferenceKeeper {
    pub fn new(params: Params) -> Self {
        Self { params, pending_events: Vec::new() }
    }

    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn resolve_price(&self, oracle: &dyn PricingOracle, ctx: &BlockContext) -> u64 {
        oracle
            .quote_per_token_price(ctx)
            .unwrap_or(self.params.legacy_fallback_price)
    }

    pub fn handle_start(
        &mut self,
        ctx: &BlockContext,
        store: &mut impl TypedStore,
        bank: &mut impl EscrowBank,
        oracle: &dyn PricingOracle,
        msg: StartInferenceMsg,
    ) -> Result<(), InferenceError> {
        let key = keys::inference_key(&msg.inference_id);
        let existing: Option<Inference> = store.get_json(&key)?;

        let record = match existing {
            None => {
                let price = self.resolve_price(oracle, ctx);
                let escrow = domain::escrow_amount(
                    msg.max_tokens,
                    msg.prompt_tokens,
                    price,
                    self.params.max_cost,
                )
                .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;

                bank.debit_to_escrow(&msg.requested_by, escrow)?;

                if msg.prompt_tokens == 0 {
                    tracing::warn!(inference_id = %msg.inference_id, "start with zero prompt_tokens");
                }

                self.pending_events.push(ModuleEvent::InferenceStarted {
                    inference_id: msg.inference_id.clone(),
                    escrow_amount: escrow,
                    per_token_price: price,
                });

                Inference {
                    id: msg.inference_id.clone(),
                    status: InferenceStatus::Started,
                    model: msg.model,
                    prompt_hash: msg.prompt_hash,
                    prompt_tokens: msg.prompt_tokens,
                    completion_tokens: 0,
                    max_tokens: msg.max_tokens,
                    per_token_price: price,
                    escrow_amount: escrow,
                    actual_cost: 0,
                    start_block: ctx.height,
                    end_block: 0,
                    requested_by: msg.requested_by,
                    executed_by: String::new(),
                    assigned_to: msg.assigned_to,
                    transferred_by: None,
                    developer_signature: msg.developer_signature,
                    executor_signature: None,
                }
            }
            Some(rec) if rec.status == InferenceStatus::Started => {
                return Err(InferenceError::IdExists(msg.inference_id));
            }
            Some(rec) if rec.status == InferenceStatus::Finished && !rec.executed_by.is_empty() => {
                // Finish arrived first; this Start completes the pair (case 3).
                // per_token_price was already frozen when the Finish record was
                // created, including a legitimate grace-period `0` — it is never
                // re-resolved here (invariant 7).
                let price = rec.per_token_price;
                let prompt_tokens = domain::reconcile_prompt_tokens(rec.prompt_tokens, msg.prompt_tokens);

                let escrow = domain::escrow_amount(
                    msg.max_tokens,
                    prompt_tokens,
                    price,
                    self.params.max_cost,
                )
                .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;
                bank.debit_to_escrow(&msg.requested_by, escrow)?;

                let cost = domain::actual_cost(
                    prompt_tokens,
                    rec.completion_tokens,
                    price,
                    self.params.max_cost,
                )
                .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;
                let (amount_to_pay, refund) = domain::settle(escrow, cost);

                bank.pay_from_escrow(&rec.executed_by, amount_to_pay)?;
                if refund > 0 {
                    bank.refund_from_escrow(&msg.requested_by, refund)?;
                }

                self.pending_events.push(ModuleEvent::InferenceFinished {
                    inference_id: msg.inference_id.clone(),
                    actual_cost: cost,
                    paid_to_executor: amount_to_pay,
                    refund_to_requester: refund,
                });

                Inference {
                    prompt_tokens,
                    max_tokens: msg.max_tokens,
                    per_token_price: price,
                    escrow_amount: escrow,
                    actual_cost: cost,
                    start_block: ctx.height,
                    requested_by: msg.requested_by,
                    assigned_to: msg.assigned_to,
                    developer_signature: msg.developer_signature,
                    prompt_hash: msg.prompt_hash,
                    model: msg.model,
                    ..rec
                }
            }
            Some(_) => return Err(InferenceError::IdExists(msg.inference_id)),
        };

        store.put_json(&key, &record)?;
        Ok(())
    }

    pub fn handle_finish(
        &mut self,
        ctx: &BlockContext,
        store: &mut impl TypedStore,
        bank: &mut impl EscrowBank,
        oracle: &dyn PricingOracle,
        msg: FinishInferenceMsg,
    ) -> Result<(), InferenceError> {
        let key = keys::inference_key(&msg.inference_id);
        let existing: Option<Inference> = store.get_json(&key)?;

        let record = match existing {
            None => {
                // Start has not arrived yet; create the record, defer payment (case 2).
                let price = self.resolve_price(oracle, ctx);
                let cost = domain::actual_cost(
                    msg.prompt_tokens,
                    msg.completion_tokens,
                    price,
                    self.params.max_cost,
                )
                .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;

                Inference {
                    id: msg.inference_id.clone(),
                    status: InferenceStatus::Finished,
                    model: String::new(),
                    prompt_hash: msg.response_hash,
                    prompt_tokens: msg.prompt_tokens,
                    completion_tokens: msg.completion_tokens,
                    max_tokens: 0,
                    per_token_price: price,
                    escrow_amount: 0,
                    actual_cost: cost,
                    start_block: 0,
                    end_block: ctx.height,
                    requested_by: String::new(),
                    executed_by: msg.executed_by,
                    assigned_to: String::new(),
                    transferred_by: None,
                    developer_signature: None,
                    executor_signature: msg.executor_signature,
                }
            }
            Some(rec) if rec.status == InferenceStatus::Finished && !rec.executed_by.is_empty() => {
                return Err(InferenceError::AlreadyFinished(msg.inference_id));
            }
            Some(rec) if rec.status == InferenceStatus::Started => {
                // Start arrived first; this Finish completes the pair (case 3).
                let prompt_tokens = domain::reconcile_prompt_tokens(rec.prompt_tokens, msg.prompt_tokens);
                let price = rec.per_token_price; // frozen at Start (invariant 7)

                let cost = domain::actual_cost(
                    prompt_tokens,
                    msg.completion_tokens,
                    price,
                    self.params.max_cost,
                )
                .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;
                let (amount_to_pay, refund) = domain::settle(rec.escrow_amount, cost);

                bank.pay_from_escrow(&msg.executed_by, amount_to_pay)?;
                if refund > 0 {
                    bank.refund_from_escrow(&rec.requested_by, refund)?;
                }

                self.pending_events.push(ModuleEvent::InferenceFinished {
                    inference_id: msg.inference_id.clone(),
                    actual_cost: cost,
                    paid_to_executor: amount_to_pay,
                    refund_to_requester: refund,
                });

                Inference {
                    status: InferenceStatus::Finished,
                    prompt_tokens,
                    completion_tokens: msg.completion_tokens,
                    actual_cost: cost,
                    end_block: ctx.height,
                    executed_by: msg.executed_by,
                    executor_signature: msg.executor_signature,
                    ..rec
                }
            }
            Some(_) => return Err(InferenceError::AlreadyFinished(msg.inference_id)),
        };

        store.put_json(&key, &record)?;
        Ok(())
    }

    pub fn get(&self, store: &impl TypedStore, inference_id: &str) -> Result<Inference, InferenceError> {
        store
            .get_json(&keys::inference_key(inference_id))?
            .ok_or_else(|| InferenceError::NotFound(inference_id.to_string()))
    }
}
