use anchor_lang::prelude::Pubkey;
use epoch_ledger::{
    hash_submission, Action, CallContext, EpochLedger, ErrorClass, LedgerConfig, LedgerError,
    RevealedFields, SubmissionInput, ValidationProfile,
};

const AGGREGATOR: [u8; 32] = [0xAA; 32];

fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

fn at(who: Pubkey, tick: u64) -> CallContext {
    CallContext::new(who, tick)
}

fn aggregator() -> Pubkey {
    Pubkey::new_from_array(AGGREGATOR)
}

fn input(category: u8, value: u64, proof: u8) -> SubmissionInput {
    SubmissionInput {
        category,
        value,
        location: None,
        age_range: None,
        proof_hash: vec![proof; 32],
    }
}

#[test]
fn three_epochs_of_collection() {
    let mut ledger = EpochLedger::new(aggregator(), 0, LedgerConfig::aggregation()).unwrap();

    // epoch 0: window [0, 100)
    ledger.submit(&at(key(1), 50), input(0, 25, 1)).unwrap();
    assert_eq!(
        ledger.submit(&at(key(1), 50), input(0, 25, 1)),
        Err(LedgerError::DuplicateSubmission)
    );
    ledger.submit(&at(key(2), 60), input(4, 30, 2)).unwrap();
    ledger.submit(&at(key(3), 70), input(4, 25, 3)).unwrap();
    assert_eq!(
        ledger.submit(&at(key(4), 100), input(1, 5, 4)),
        Err(LedgerError::EpochClosed)
    );

    assert_eq!(ledger.close_epoch(&at(aggregator(), 99)), Err(LedgerError::TooEarly));
    ledger.close_epoch(&at(aggregator(), 100)).unwrap();
    assert_eq!(
        ledger.close_epoch(&at(aggregator(), 101)),
        Err(LedgerError::AlreadyClosed)
    );

    let first = ledger.finalize_epoch(&at(aggregator(), 110)).unwrap();
    assert_eq!(first.total_submissions, 3);
    assert_eq!(first.averages, vec![25, 27]);

    // epoch 1: window [110, 210), nobody submits
    assert_eq!(ledger.current_epoch(), 1);
    ledger.close_epoch(&at(aggregator(), 210)).unwrap();
    assert_eq!(
        ledger.finalize_epoch(&at(aggregator(), 210)),
        Err(LedgerError::NoSubmissions)
    );
    // an empty epoch can only be skipped
    assert_eq!(ledger.force_new_epoch(&at(aggregator(), 211)), Ok(2));
    assert!(ledger.final_aggregate(1).is_none());

    // epoch 2 under a new authority
    let successor = key(0xBB);
    ledger.update_authority(&at(aggregator(), 212), successor).unwrap();
    ledger.submit(&at(key(1), 250), input(9, 7, 9)).unwrap();
    assert_eq!(
        ledger.close_epoch(&at(aggregator(), 400)),
        Err(LedgerError::NotAuthorized)
    );
    ledger.close_epoch(&at(successor, 400)).unwrap();
    let third = ledger.finalize_epoch(&at(successor, 400)).unwrap();
    assert_eq!(third.total_submissions, 1);
    assert_eq!(third.averages, vec![7]);

    // earlier aggregates are untouched
    assert_eq!(ledger.final_aggregate(0), Some(&first));
    assert_eq!(ledger.current_epoch(), 3);
}

#[test]
fn commit_then_submit_then_reveal() {
    let mut ledger = EpochLedger::new(aggregator(), 0, LedgerConfig::demographic()).unwrap();
    let alice = key(1);
    let fields = RevealedFields {
        category: 3,
        value: 500,
        location: "Downtown".to_string(),
        age_range: 2,
    };

    let commitment = ledger.register_commitment(&at(alice, 10), 0, alice, &fields).unwrap();
    assert_eq!(commitment, hash_submission(3, 500, "Downtown", 2));

    let stored = ledger
        .submit(
            &at(alice, 20),
            SubmissionInput {
                category: 3,
                value: 500,
                location: Some("Downtown".to_string()),
                age_range: Some(2),
                proof_hash: commitment.to_vec(),
            },
        )
        .unwrap();
    assert_eq!(stored.proof_hash, commitment);

    // reveal survives the epoch closing; verification ignores the open flag
    ledger.close_epoch(&at(aggregator(), 30)).unwrap();

    let tampered = RevealedFields { value: 501, ..fields.clone() };
    let err = ledger
        .verify_proof(&at(alice, 40), 0, alice, &tampered, &commitment)
        .unwrap_err();
    assert_eq!(err, LedgerError::HashMismatch);
    assert_eq!(err.class(), ErrorClass::IntegrityFailure);

    let record = ledger.verify_proof(&at(alice, 41), 0, alice, &fields, &commitment).unwrap();
    assert_eq!(record.verified_at, 41);
    assert_eq!(ledger.verified_proof(&commitment), Some(&record));

    let err = ledger
        .verify_proof(&at(alice, 42), 0, alice, &fields, &commitment)
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::ReplayViolation);
    assert_eq!(err.status_code(Action::VerifyProof, ValidationProfile::Demographic), 103);
}

#[test]
fn rejected_calls_leave_state_identical() {
    let mut ledger = EpochLedger::new(aggregator(), 0, LedgerConfig::demographic()).unwrap();
    ledger
        .submit(
            &at(key(1), 5),
            SubmissionInput {
                category: 1,
                value: 100,
                location: Some("City".to_string()),
                age_range: Some(1),
                proof_hash: vec![1; 32],
            },
        )
        .unwrap();
    let snapshot = ledger.clone();

    let failures = [
        ledger.submit(&at(key(1), 6), input(1, 100, 1)).unwrap_err(),
        ledger.close_epoch(&at(key(1), 6)).unwrap_err(),
        ledger.finalize_epoch(&at(aggregator(), 6)).unwrap_err(),
        ledger.force_new_epoch(&at(key(2), 6)).unwrap_err(),
        ledger.update_authority(&at(key(2), 6), key(2)).unwrap_err(),
    ];
    assert_eq!(ledger, snapshot);

    let codes: Vec<u32> = failures
        .iter()
        .zip([
            Action::Submit,
            Action::CloseEpoch,
            Action::FinalizeEpoch,
            Action::ForceNewEpoch,
            Action::UpdateAuthority,
        ])
        .map(|(err, action)| err.status_code(action, ValidationProfile::Demographic))
        .collect();
    // missing location is checked before the duplicate key
    assert_eq!(codes, vec![107, 100, 102, 100, 100]);
}
