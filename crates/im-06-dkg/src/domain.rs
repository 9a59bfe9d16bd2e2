//! Pure phase-transition math for the DKG state machine (§4.7): slot-weighted
//! quorum checks, dealer-validity majority voting, and which G2 commitments
//! feed the group public key.

use shared_types::EpochBlsData;

/// Total slot count owned by participants whose index is `true` in `submitted`.
fn slots_submitted(epoch: &EpochBlsData, submitted: &[bool]) -> u32 {
    epoch
        .participants
        .iter()
        .zip(submitted.iter())
        .filter(|(_, &s)| s)
        .map(|(p, _)| p.slots.slot_count())
        .sum()
}

/// Whether enough dealer parts were submitted to move DEALING -> VERIFYING
/// (spec §4.7: "Σ slots-with-dealer-parts > i_total_slots/2").
pub fn dealing_quorum_met(epoch: &EpochBlsData) -> bool {
    let submitted: Vec<bool> = epoch.dealer_parts.iter().map(Option::is_some).collect();
    slots_submitted(epoch, &submitted) * 2 > epoch.i_total_slots
}

/// Whether enough verification vectors were submitted to move VERIFYING ->
/// COMPLETED.
pub fn verifying_quorum_met(epoch: &EpochBlsData) -> bool {
    let submitted: Vec<bool> = epoch.verification_submissions.iter().map(Option::is_some).collect();
    slots_submitted(epoch, &submitted) * 2 > epoch.i_total_slots
}

/// For each dealer index, valid iff it submitted a dealer part AND strictly
/// more than half the verifiers that submitted approved it (spec §4.7).
pub fn compute_valid_dealers(epoch: &EpochBlsData) -> Vec<bool> {
    let n = epoch.dealer_parts.len();
    let verifiers: Vec<&shared_types::VerificationVector> =
        epoch.verification_submissions.iter().filter_map(|v| v.as_ref()).collect();
    let verifier_count = verifiers.len();

    (0..n)
        .map(|dealer_index| {
            if epoch.dealer_parts[dealer_index].is_none() {
                return false;
            }
            let approvals = verifiers
                .iter()
                .filter(|v| v.dealer_validity.get(dealer_index).copied().unwrap_or(false))
                .count();
            verifier_count > 0 && approvals * 2 > verifier_count
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{DealerPart, DkgParticipant, DkgPhase, SlotRange, VerificationVector};

    fn epoch_with(n_participants: u32, dealer_submitted: &[bool], verifier_votes: &[Vec<bool>]) -> EpochBlsData {
        let participants: Vec<DkgParticipant> = (0..n_participants)
            .map(|i| DkgParticipant {
                address: format!("p{i}"),
                slots: SlotRange { slot_start: i * 10, slot_end: i * 10 + 9 },
            })
            .collect();
        let dealer_parts = dealer_submitted
            .iter()
            .map(|&s| s.then(|| DealerPart { dealer_index: 0, commitments: vec![[1u8; 96]] }))
            .collect();
        let verification_submissions = verifier_votes
            .iter()
            .enumerate()
            .map(|(i, votes)| {
                Some(VerificationVector { verifier_index: i as u32, dealer_validity: votes.clone() })
            })
            .collect();

        EpochBlsData {
            epoch_id: 1,
            participants,
            t_slots_degree: 1,
            i_total_slots: n_participants * 10,
            phase: DkgPhase::Dealing,
            dealing_deadline: 100,
            verifying_deadline: 200,
            dealer_parts,
            verification_submissions,
            valid_dealers: Vec::new(),
            group_public_key: None,
        }
    }

    #[test]
    fn dealing_quorum_requires_majority_of_slots() {
        let epoch = epoch_with(4, &[true, true, false, false], &[]);
        assert!(!dealing_quorum_met(&epoch));

        let epoch = epoch_with(4, &[true, true, true, false], &[]);
        assert!(dealing_quorum_met(&epoch));
    }

    #[test]
    fn exactly_half_does_not_meet_quorum() {
        let epoch = epoch_with(2, &[true, false], &[]);
        assert!(!dealing_quorum_met(&epoch));
    }

    #[test]
    fn valid_dealers_need_majority_verifier_approval() {
        let epoch = epoch_with(
            3,
            &[true, true, true],
            &[vec![true, true, false], vec![true, false, false], vec![true, true, true]],
        );
        let valid = compute_valid_dealers(&epoch);
        // dealer 0: 3/3 approvals -> valid
        assert!(valid[0]);
        // dealer 1: 2/3 approvals -> valid
        assert!(valid[1]);
        // dealer 2: 1/3 approvals -> invalid
        assert!(!valid[2]);
    }

    #[test]
    fn dealer_without_submission_is_never_valid_even_with_votes() {
        let epoch = epoch_with(2, &[false, true], &[vec![true, true]]);
        let valid = compute_valid_dealers(&epoch);
        assert!(!valid[0]);
        assert!(valid[1]);
    }

    #[test]
    fn no_verifiers_means_nothing_is_valid() {
        let epoch = epoch_with(2, &[true, true], &[]);
        let valid = compute_valid_dealers(&epoch);
        assert!(valid.iter().all(|&v| !v));
    }
}
