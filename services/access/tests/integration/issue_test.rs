use std::collections::HashSet;
use std::sync::atomic::Ordering;

use securevisit_access::domain::types::{MAX_GENERATION_ATTEMPTS, MAX_INSERT_ATTEMPTS};
use securevisit_access::error::AccessServiceError;
use securevisit_access::usecase::access_code::{IssueAccessCodeInput, IssueAccessCodeUseCase};
use securevisit_access::usecase::generator::RandomDigits;
use securevisit_testing::clock::{ManualClock, datetime};

use crate::helpers::{
    MockAccessCodeRepo, ScriptedCodes, UnavailableRepo, hm, test_access_code,
};

fn jane_doe() -> IssueAccessCodeInput {
    IssueAccessCodeInput {
        visitor_name: "Jane Doe".to_owned(),
        visit_host: "Mr. Smith".to_owned(),
        location: "HQ".to_owned(),
        issued_by: "Receptionist".to_owned(),
        valid_from: hm(9, 0),
        valid_until: hm(17, 0),
    }
}

#[tokio::test]
async fn should_issue_and_persist_unused_code() {
    let repo = MockAccessCodeRepo::empty();
    let codes_handle = repo.codes_handle();

    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let issued = uc.execute(jane_doe()).await.unwrap();

    assert_eq!(issued.code.len(), 7, "access code should be 7 digits");
    assert!(issued.code.bytes().all(|b| b.is_ascii_digit()));
    assert!(!issued.used, "new code should not be used");
    assert_eq!(issued.issued_at, datetime(2024, 1, 10, 8, 30));
    assert_eq!(issued.issued_by, "Receptionist");

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "expected exactly one code to be stored");
    assert_eq!(codes[0], issued);
}

#[tokio::test]
async fn should_trim_text_fields() {
    let repo = MockAccessCodeRepo::empty();
    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let issued = uc
        .execute(IssueAccessCodeInput {
            visitor_name: "  Jane Doe ".to_owned(),
            ..jane_doe()
        })
        .await
        .unwrap();
    assert_eq!(issued.visitor_name, "Jane Doe");
}

#[tokio::test]
async fn should_reject_equal_bounds_without_persisting() {
    let repo = MockAccessCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let result = uc
        .execute(IssueAccessCodeInput {
            valid_from: hm(9, 0),
            valid_until: hm(9, 0),
            ..jane_doe()
        })
        .await;

    assert!(
        matches!(result, Err(AccessServiceError::InvalidWindow)),
        "expected InvalidWindow, got {result:?}"
    );
    assert!(codes_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_reversed_bounds_before_touching_store() {
    let repo = MockAccessCodeRepo::empty();
    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let result = uc
        .execute(IssueAccessCodeInput {
            valid_from: hm(17, 0),
            valid_until: hm(9, 0),
            ..jane_doe()
        })
        .await;

    assert!(matches!(result, Err(AccessServiceError::InvalidWindow)));
    assert_eq!(uc.access_codes.lookups.load(Ordering::SeqCst), 0);
    assert!(uc.access_codes.codes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_blank_fields() {
    let uc = IssueAccessCodeUseCase {
        access_codes: MockAccessCodeRepo::empty(),
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let cases = [
        (
            IssueAccessCodeInput {
                visitor_name: " ".to_owned(),
                ..jane_doe()
            },
            "visitor_name",
        ),
        (
            IssueAccessCodeInput {
                visit_host: String::new(),
                ..jane_doe()
            },
            "visit_host",
        ),
        (
            IssueAccessCodeInput {
                location: String::new(),
                ..jane_doe()
            },
            "location",
        ),
        (
            IssueAccessCodeInput {
                issued_by: "\t".to_owned(),
                ..jane_doe()
            },
            "issued_by",
        ),
    ];

    for (input, field) in cases {
        let result = uc.execute(input).await;
        assert!(
            matches!(result, Err(AccessServiceError::EmptyField(f)) if f == field),
            "expected EmptyField({field}), got {result:?}"
        );
    }
    assert!(uc.access_codes.codes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_redraw_on_collision_with_stored_code() {
    let taken = test_access_code("1111111", datetime(2024, 1, 9, 12, 0));
    let repo = MockAccessCodeRepo::new(vec![taken]);

    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: ScriptedCodes::new(&["1111111", "1111111", "2222222"]),
    };

    let issued = uc.execute(jane_doe()).await.unwrap();
    assert_eq!(issued.code, "2222222");
    assert_eq!(uc.access_codes.lookups.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn should_give_up_when_every_candidate_collides() {
    let taken = test_access_code("1111111", datetime(2024, 1, 9, 12, 0));
    let uc = IssueAccessCodeUseCase {
        access_codes: MockAccessCodeRepo::new(vec![taken]),
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: ScriptedCodes::repeating("1111111", MAX_GENERATION_ATTEMPTS as usize),
    };

    let result = uc.execute(jane_doe()).await;
    assert!(
        matches!(
            result,
            Err(AccessServiceError::GenerationExhausted { attempts }) if attempts == MAX_GENERATION_ATTEMPTS
        ),
        "expected GenerationExhausted, got {result:?}"
    );
    assert_eq!(uc.access_codes.codes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_regenerate_after_losing_insert_race() {
    let repo = MockAccessCodeRepo::empty().with_racing_inserts(2);
    let codes_handle = repo.codes_handle();

    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: ScriptedCodes::new(&["3333333", "4444444", "5555555"]),
    };

    let issued = uc.execute(jane_doe()).await.unwrap();
    assert_eq!(issued.code, "5555555");

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].code, "5555555");
}

#[tokio::test]
async fn should_not_surface_duplicate_key_when_races_persist() {
    let uc = IssueAccessCodeUseCase {
        access_codes: MockAccessCodeRepo::empty().with_racing_inserts(MAX_INSERT_ATTEMPTS),
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let result = uc.execute(jane_doe()).await;
    assert!(
        matches!(result, Err(AccessServiceError::GenerationExhausted { .. })),
        "expected GenerationExhausted, got {result:?}"
    );
}

#[tokio::test]
async fn should_propagate_store_failure() {
    let uc = IssueAccessCodeUseCase {
        access_codes: UnavailableRepo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    let result = uc.execute(jane_doe()).await;
    assert!(
        matches!(result, Err(AccessServiceError::StoreUnavailable(_))),
        "expected StoreUnavailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_never_store_two_records_with_same_code() {
    let repo = MockAccessCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let uc = IssueAccessCodeUseCase {
        access_codes: repo,
        clock: ManualClock::on(2024, 1, 10, 8, 30),
        source: RandomDigits,
    };

    for _ in 0..300 {
        uc.execute(jane_doe()).await.unwrap();
    }

    let codes = codes_handle.lock().unwrap();
    let distinct: HashSet<&str> = codes.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes.len(), 300);
    assert_eq!(distinct.len(), 300);
}
