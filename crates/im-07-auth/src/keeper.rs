//! Grantee registry and role-based signature verification (spec §4.9).
//!
//! This crate is deliberately participant-agnostic: it is handed the
//! owner's own public key by the caller (the inference/collateral keepers
//! resolve that from the `Participant` registry) and only manages the
//! *delegate* fan-out set itself.

use chain_store::TypedStore;
use shared_crypto::ecdsa::{verify_against_any, Secp256k1PublicKey};
use shared_types::{keys, Address, GranteeRegistry};

use crate::domain::{self, SignerRole};
use crate::errors::AuthError;
use crate::params::Params;

pub struct AuthKeeper {
    params: Params,
}

impl AuthKeeper {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn load_registry(&self, store: &impl TypedStore, owner: &str) -> Result<GranteeRegistry, AuthError> {
        Ok(store
            .get_json(&keys::grantee_registry_key(owner))?
            .unwrap_or_else(|| GranteeRegistry::new(owner.to_string())))
    }

    /// Registers `grantee_pubkey` as an additional valid signer for
    /// `owner`'s transfer/executor-role payloads.
    pub fn grant(
        &self,
        store: &mut impl TypedStore,
        owner: Address,
        grantee_pubkey: [u8; 33],
    ) -> Result<(), AuthError> {
        Secp256k1PublicKey::from_bytes(grantee_pubkey).map_err(|e| AuthError::InvalidPublicKey(e.to_string()))?;

        let mut registry = self.load_registry(store, &owner)?;
        if registry.grantee_pubkeys.contains(&grantee_pubkey) {
            return Err(AuthError::GranteeExists(owner));
        }
        registry.grantee_pubkeys.push(grantee_pubkey);
        store.put_json(&keys::grantee_registry_key(&owner), &registry)?;
        Ok(())
    }

    /// Revokes a previously registered grantee.
    pub fn revoke(
        &self,
        store: &mut impl TypedStore,
        owner: &str,
        grantee_pubkey: [u8; 33],
    ) -> Result<(), AuthError> {
        let mut registry = self.load_registry(store, owner)?;
        let before = registry.grantee_pubkeys.len();
        registry.grantee_pubkeys.retain(|k| k != &grantee_pubkey);
        if registry.grantee_pubkeys.len() == before {
            return Err(AuthError::GranteeNotFound(owner.to_string()));
        }
        store.put_json(&keys::grantee_registry_key(owner), &registry)?;
        Ok(())
    }

    pub fn list_grantees(&self, store: &impl TypedStore, owner: &str) -> Result<Vec<[u8; 33]>, AuthError> {
        Ok(self.load_registry(store, owner)?.grantee_pubkeys)
    }

    /// Candidate keys for a fan-out role: the owner's own key plus every
    /// registered grantee (spec §4.9: "any match succeeds").
    fn candidate_keys(
        &self,
        store: &impl TypedStore,
        owner_pubkey: &Secp256k1PublicKey,
        owner_address: &str,
    ) -> Result<Vec<Secp256k1PublicKey>, AuthError> {
        let mut candidates = vec![*owner_pubkey];
        for raw in self.list_grantees(store, owner_address)? {
            if let Ok(key) = Secp256k1PublicKey::from_bytes(raw) {
                candidates.push(key);
            }
        }
        Ok(candidates)
    }

    /// Verifies a developer-role signature: the payload is signed by the
    /// developer's own key only — no grantee fan-out (spec §4.9).
    pub fn verify_developer(
        &self,
        developer_pubkey: &Secp256k1PublicKey,
        payload: &[u8],
        timestamp: i64,
        transfer_address: &str,
        signature_b64: &str,
        current_timestamp: i64,
    ) -> Result<(), AuthError> {
        domain::check_timestamp(current_timestamp, timestamp, &self.params)?;
        let message = domain::payload_bytes_for_role(SignerRole::Developer, payload, timestamp, transfer_address, "");
        developer_pubkey
            .verify_base64(&message, signature_b64)
            .map_err(|_| AuthError::SignatureInvalid { role: SignerRole::Developer.label() })
    }

    /// Verifies a transfer-agent-role signature against the owner's key or
    /// any of its registered grantees.
    #[allow(clippy::too_many_arguments)]
    pub fn verify_transfer_agent(
        &self,
        store: &impl TypedStore,
        owner_address: &str,
        owner_pubkey: &Secp256k1PublicKey,
        payload: &[u8],
        timestamp: i64,
        transfer_address: &str,
        executor_address: &str,
        signature_b64: &str,
        current_timestamp: i64,
    ) -> Result<(), AuthError> {
        domain::check_timestamp(current_timestamp, timestamp, &self.params)?;
        let message = domain::payload_bytes_for_role(
            SignerRole::TransferAgent,
            payload,
            timestamp,
            transfer_address,
            executor_address,
        );
        let candidates = self.candidate_keys(store, owner_pubkey, owner_address)?;
        verify_against_any(&candidates, &message, signature_b64)
            .map_err(|_| AuthError::SignatureInvalid { role: SignerRole::TransferAgent.label() })
    }

    /// Verifies an executor-agent-role signature against the owner's key or
    /// any of its registered grantees.
    #[allow(clippy::too_many_arguments)]
    pub fn verify_executor_agent(
        &self,
        store: &impl TypedStore,
        owner_address: &str,
        owner_pubkey: &Secp256k1PublicKey,
        payload: &[u8],
        timestamp: i64,
        transfer_address: &str,
        executor_address: &str,
        signature_b64: &str,
        current_timestamp: i64,
    ) -> Result<(), AuthError> {
        domain::check_timestamp(current_timestamp, timestamp, &self.params)?;
        let message = domain::payload_bytes_for_role(
            SignerRole::ExecutorAgent,
            payload,
            timestamp,
            transfer_address,
            executor_address,
        );
        let candidates = self.candidate_keys(store, owner_pubkey, owner_address)?;
        verify_against_any(&candidates, &message, signature_b64)
            .map_err(|_| AuthError::SignatureInvalid { role: SignerRole::ExecutorAgent.label() })
    }
}

impl Default for AuthKeeper {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_store::InMemoryStore;
    use shared_crypto::ecdsa::Secp256k1KeyPair;

    #[test]
    fn developer_signature_round_trips() {
        let dev = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();
        let message = domain::dev_bytes(b"payload", 1_000, "transfer1");
        let sig = dev.sign_base64(&message);

        keeper
            .verify_developer(&dev.public_key(), b"payload", 1_000, "transfer1", &sig, 1_002)
            .unwrap();
    }

    #[test]
    fn developer_signature_from_wrong_key_is_rejected() {
        let dev = Secp256k1KeyPair::generate();
        let impostor = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();
        let message = domain::dev_bytes(b"payload", 1_000, "transfer1");
        let sig = impostor.sign_base64(&message);

        let err = keeper
            .verify_developer(&dev.public_key(), b"payload", 1_000, "transfer1", &sig, 1_002)
            .unwrap_err();
        assert!(matches!(err, AuthError::SignatureInvalid { .. }));
    }

    #[test]
    fn transfer_agent_signature_accepted_from_registered_grantee() {
        let mut store = InMemoryStore::new();
        let owner = Secp256k1KeyPair::generate();
        let grantee = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();

        keeper.grant(&mut store, "owner1".into(), *grantee.public_key().as_bytes()).unwrap();

        let message = domain::transfer_bytes(b"payload", 1_000, "transfer1", "executor1");
        let sig = grantee.sign_base64(&message);

        keeper
            .verify_transfer_agent(
                &store,
                "owner1",
                &owner.public_key(),
                b"payload",
                1_000,
                "transfer1",
                "executor1",
                &sig,
                1_001,
            )
            .unwrap();
    }

    #[test]
    fn transfer_agent_signature_rejected_without_grant() {
        let store = InMemoryStore::new();
        let owner = Secp256k1KeyPair::generate();
        let stranger = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();

        let message = domain::transfer_bytes(b"payload", 1_000, "transfer1", "executor1");
        let sig = stranger.sign_base64(&message);

        let err = keeper
            .verify_transfer_agent(
                &store,
                "owner1",
                &owner.public_key(),
                b"payload",
                1_000,
                "transfer1",
                "executor1",
                &sig,
                1_001,
            )
            .unwrap_err();
        assert!(matches!(err, AuthError::SignatureInvalid { .. }));
    }

    #[test]
    fn revoking_a_grantee_invalidates_future_verification() {
        let mut store = InMemoryStore::new();
        let owner = Secp256k1KeyPair::generate();
        let grantee = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();
        let grantee_bytes = *grantee.public_key().as_bytes();

        keeper.grant(&mut store, "owner1".into(), grantee_bytes).unwrap();
        keeper.revoke(&mut store, "owner1", grantee_bytes).unwrap();

        let message = domain::executor_bytes(b"payload", 1_000, "transfer1", "executor1");
        let sig = grantee.sign_base64(&message);
        let err = keeper
            .verify_executor_agent(
                &store,
                "owner1",
                &owner.public_key(),
                b"payload",
                1_000,
                "transfer1",
                "executor1",
                &sig,
                1_001,
            )
            .unwrap_err();
        assert!(matches!(err, AuthError::SignatureInvalid { .. }));
    }

    #[test]
    fn granting_the_same_key_twice_is_a_conflict() {
        let mut store = InMemoryStore::new();
        let grantee = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();
        let bytes = *grantee.public_key().as_bytes();

        keeper.grant(&mut store, "owner1".into(), bytes).unwrap();
        let err = keeper.grant(&mut store, "owner1".into(), bytes).unwrap_err();
        assert!(matches!(err, AuthError::GranteeExists(_)));
    }

    #[test]
    fn stale_timestamp_is_rejected_before_signature_check() {
        let dev = Secp256k1KeyPair::generate();
        let keeper = AuthKeeper::default();
        let message = domain::dev_bytes(b"payload", 1_000, "transfer1");
        let sig = dev.sign_base64(&message);

        let err = keeper
            .verify_developer(&dev.public_key(), b"payload", 1_000, "transfer1", &sig, 1_100)
            .unwrap_err();
        assert!(matches!(err, AuthError::TimestampTooOld { .. }));
    }
}
