//! Registration, verification, and points behaviour over the in-memory store.

use bloodbank::domain::ports::{DonorRegistrationCommand, RegistrationRepository};
use bloodbank::domain::{DonorId, DonorPoints, DonorVerification, ErrorCode, UserLookup};
use rstest::rstest;
use std::sync::Arc;

use bloodbank::outbound::memory::InMemoryStore;

mod support;

use support::{fixture_now, identification_of, new_donor, new_user, registration, store};

#[rstest]
#[tokio::test]
async fn registered_user_and_donor_are_retrievable(store: Arc<InMemoryStore>) {
    let service = registration(&store);
    let registered = service
        .register(new_user("71234567"), new_donor("ID123"))
        .await
        .expect("registration succeeds");

    let user = service
        .find_user(UserLookup::Id(registered.user_id))
        .await
        .expect("user stored");
    assert_eq!(user.contact.as_str(), "71234567");
    assert_eq!(user.created_at, fixture_now());

    let donor = store
        .find_donor(&identification_of("ID123"))
        .await
        .expect("lookup succeeds")
        .expect("donor stored");
    assert_eq!(donor.id, registered.donor_id);
    assert_eq!(donor.user_id, registered.user_id);
    assert!(!donor.validation_status);

    let points = store
        .find_points(registered.donor_id)
        .await
        .expect("lookup succeeds")
        .expect("ledger seeded");
    assert_eq!(points, DonorPoints::seed(registered.donor_id, fixture_now()));
}

#[rstest]
#[tokio::test]
async fn failed_donor_insert_leaves_no_user_behind(store: Arc<InMemoryStore>) {
    let service = registration(&store);
    service
        .register(new_user("71234567"), new_donor("ID123"))
        .await
        .expect("first registration succeeds");

    let error = service
        .register(new_user("71234568"), new_donor("ID123"))
        .await
        .expect_err("duplicate identification");
    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    assert_eq!(error.message(), "conflicting registration details");

    let missing = service
        .find_user(UserLookup::Contact(new_user("71234568").contact))
        .await
        .expect_err("second user rolled back");
    assert_eq!(missing.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn duplicate_contact_is_a_conflict(store: Arc<InMemoryStore>) {
    let service = registration(&store);
    service
        .register(new_user("71234567"), new_donor("ID123"))
        .await
        .expect("first registration succeeds");

    let error = service
        .register(new_user("71234567"), new_donor("ID456"))
        .await
        .expect_err("duplicate contact");
    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    assert!(
        store
            .find_donor(&identification_of("ID456"))
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn spaced_and_compact_contacts_are_one_user(store: Arc<InMemoryStore>) {
    let service = registration(&store);
    let registered = service
        .register(new_user("+267 71234567"), new_donor("ID123"))
        .await
        .expect("first registration succeeds");

    let error = service
        .register(new_user("+26771234567"), new_donor("ID456"))
        .await
        .expect_err("same number registered twice");
    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);

    let user = service
        .find_user(UserLookup::Contact(new_user("+267 71 23 45 67").contact))
        .await
        .expect("any spelling finds the user");
    assert_eq!(user.id, registered.user_id);
    assert_eq!(user.contact.as_str(), "+26771234567");
}

#[rstest]
#[tokio::test]
async fn seeding_an_unknown_donor_creates_no_ledger(store: Arc<InMemoryStore>) {
    let donor_id = DonorId::random();
    let error = registration(&store)
        .ensure_points_ledger(donor_id)
        .await
        .expect_err("no such donor");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(
        store
            .find_points(donor_id)
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn seeding_twice_keeps_a_credited_balance(store: Arc<InMemoryStore>) {
    let service = registration(&store);
    let registered = service
        .register(new_user("71234567"), new_donor("ID123"))
        .await
        .expect("registration succeeds");

    let credited = service
        .credit_points(registered.donor_id, 10)
        .await
        .expect("credit succeeds");
    assert_eq!(credited.total_points, 10);

    service
        .ensure_points_ledger(registered.donor_id)
        .await
        .expect("first reseed");
    service
        .ensure_points_ledger(registered.donor_id)
        .await
        .expect("second reseed");

    let points = store
        .find_points(registered.donor_id)
        .await
        .expect("lookup succeeds")
        .expect("ledger present");
    assert_eq!(points.total_points, 10);
}

#[rstest]
#[tokio::test]
async fn verification_flips_once(store: Arc<InMemoryStore>) {
    let service = registration(&store);
    service
        .register(new_user("71234567"), new_donor("ID123"))
        .await
        .expect("registration succeeds");
    let verify = DonorVerification {
        identification: identification_of("ID123"),
        verification: true,
    };

    assert!(service.verify_donor(verify.clone()).await.expect("first verify"));
    assert!(!service.verify_donor(verify).await.expect("second verify"));

    let donor = store
        .find_donor(&identification_of("ID123"))
        .await
        .expect("lookup succeeds")
        .expect("donor stored");
    assert!(donor.validation_status);
}

#[rstest]
#[case("ID123", false)]
#[case("ID999", true)]
#[tokio::test]
async fn verification_no_ops_return_false(
    store: Arc<InMemoryStore>,
    #[case] identification: &str,
    #[case] verification: bool,
) {
    let service = registration(&store);
    service
        .register(new_user("71234567"), new_donor("ID123"))
        .await
        .expect("registration succeeds");

    let flipped = service
        .verify_donor(DonorVerification {
            identification: identification_of(identification),
            verification,
        })
        .await
        .expect("no-op is not an error");
    assert!(!flipped);

    let donor = store
        .find_donor(&identification_of("ID123"))
        .await
        .expect("lookup succeeds")
        .expect("donor stored");
    assert!(!donor.validation_status);
}

#[rstest]
#[tokio::test]
async fn crediting_an_unknown_donor_is_not_found(store: Arc<InMemoryStore>) {
    let error = registration(&store)
        .credit_points(DonorId::random(), 5)
        .await
        .expect_err("no ledger");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
