//! Donation listing and transfusion over the in-memory store.

use std::sync::Arc;

use bloodbank::domain::ports::{DonationCommand, DonationQuery};
use bloodbank::domain::{
    BloodDonation, BloodGroup, CenterId, DonationFilter, DonationId, ErrorCode, LabResults,
    NewBloodDonation,
};
use bloodbank::outbound::memory::InMemoryStore;
use rstest::rstest;

mod support;

use support::{donations, fixture_now, identification_of, store};

async fn record(
    store: &Arc<InMemoryStore>,
    identification: &str,
    center_id: CenterId,
) -> BloodDonation {
    donations(store)
        .record_donation(NewBloodDonation {
            donor_identification: identification_of(identification),
            center_id,
        })
        .await
        .expect("donation recorded")
}

async fn type_as(
    store: &Arc<InMemoryStore>,
    id: DonationId,
    blood_group: BloodGroup,
    positive: bool,
) {
    donations(store)
        .update_results(
            id,
            LabResults {
                blood_group,
                syphilis: positive,
                hiv: false,
            },
        )
        .await
        .expect("results recorded");
}

#[rstest]
#[tokio::test]
async fn screened_units_are_transfused_once(store: Arc<InMemoryStore>) {
    let central = store.insert_center("Central", "Gaborone").expect("centre");
    let donation = record(&store, "ID123", central.id).await;
    type_as(&store, donation.id, BloodGroup::ONegative, false).await;
    let service = donations(&store);

    let transfused = service
        .transfuse(donation.id)
        .await
        .expect("eligible unit is transfused");
    assert_eq!(transfused.transfused_at, Some(fixture_now()));

    let error = service
        .transfuse(donation.id)
        .await
        .expect_err("unit already used");
    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    assert_eq!(error.message(), "donation was already transfused");
}

#[rstest]
#[tokio::test]
async fn unscreened_and_positive_units_stay_in_stock(store: Arc<InMemoryStore>) {
    let central = store.insert_center("Central", "Gaborone").expect("centre");
    let pending = record(&store, "ID123", central.id).await;
    let positive = record(&store, "ID456", central.id).await;
    type_as(&store, positive.id, BloodGroup::APositive, true).await;
    let service = donations(&store);

    for id in [pending.id, positive.id] {
        let error = service.transfuse(id).await.expect_err("ineligible unit");
        assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    }
    let stock = service
        .list_donations(DonationFilter::default())
        .await
        .expect("listing succeeds");
    assert!(stock.iter().all(|donation| donation.transfused_at.is_none()));
}

#[rstest]
#[tokio::test]
async fn transfusing_an_unknown_donation_is_not_found(store: Arc<InMemoryStore>) {
    let error = donations(&store)
        .transfuse(DonationId::random())
        .await
        .expect_err("unknown donation");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn listing_applies_every_criterion(store: Arc<InMemoryStore>) {
    let central = store.insert_center("Central", "Gaborone").expect("centre");
    let north = store.insert_center("North", "Francistown").expect("centre");
    let wanted = record(&store, "ID123", central.id).await;
    type_as(&store, wanted.id, BloodGroup::BPositive, false).await;
    let other_group = record(&store, "ID123", central.id).await;
    type_as(&store, other_group.id, BloodGroup::OPositive, false).await;
    record(&store, "ID123", north.id).await;
    record(&store, "ID456", central.id).await;
    let service = donations(&store);

    let everything = service
        .list_donations(DonationFilter::default())
        .await
        .expect("listing succeeds");
    assert_eq!(everything.len(), 4);

    let narrowed = service
        .list_donations(DonationFilter {
            donor_identification: Some(identification_of("ID123")),
            center_ids: Some(vec![central.id]),
            blood_group: Some(BloodGroup::BPositive),
        })
        .await
        .expect("listing succeeds");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].id, wanted.id);
}
