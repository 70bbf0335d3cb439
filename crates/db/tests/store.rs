//! Integration tests for [`PgStore`] against a real database.
//!
//! - Visibility filtering and newest-first ordering
//! - Compare-and-set status updates
//! - Resolved complaints refuse reassignment
//! - Role grants and revocation
//! - Unique fiscal years

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate};
use civiclink_core::access::Visibility;
use civiclink_core::budget::{CategoryShare, CreateBudgetFlow};
use civiclink_core::complaint::{Category, Complaint, Location};
use civiclink_core::error::CoreError;
use civiclink_core::lifecycle::ComplaintStatus;
use civiclink_core::project::{CreateProject, GeoPoint};
use civiclink_core::roles::Role;
use civiclink_core::store::{BudgetStore, ComplaintStore, Page, ProjectStore, RoleStore, StatusChange};
use civiclink_core::types::{self, new_id, DbId};
use civiclink_db::PgStore;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn complaint(citizen_id: Option<DbId>, age_minutes: i64) -> Complaint {
    let created = types::now() - Duration::minutes(age_minutes);
    Complaint {
        id: new_id(),
        category: Category::Pothole,
        description: "Deep pothole near the bus stop".into(),
        location: Location {
            lat: 12.9352,
            lng: 77.6245,
            address: "80 Feet Road, Koramangala".into(),
        },
        citizen_id,
        is_anonymous: citizen_id.is_none(),
        status: ComplaintStatus::Open,
        official_assigned: None,
        image_url: None,
        created_at: created,
        updated_at: created,
    }
}

fn ids(complaints: &[Complaint]) -> Vec<DbId> {
    complaints.iter().map(|c| c.id).collect()
}

// ---------------------------------------------------------------------------
// Complaints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_insert_round_trips(pool: PgPool) {
    let store = PgStore::new(pool);
    let c = complaint(Some(Uuid::new_v4()), 0);

    let stored = store.insert(&c).await.unwrap();
    assert_eq!(stored, c);
    assert_eq!(ComplaintStore::find_by_id(&store, c.id).await.unwrap(), Some(c));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_respects_visibility(pool: PgPool) {
    let store = PgStore::new(pool);
    let u1 = Uuid::new_v4();
    let u2 = Uuid::new_v4();
    let mine = store.insert(&complaint(Some(u1), 3)).await.unwrap();
    let anon = store.insert(&complaint(None, 2)).await.unwrap();
    let theirs = store.insert(&complaint(Some(u2), 1)).await.unwrap();

    let all = ComplaintStore::list(&store, Visibility::All, Page::unbounded()).await.unwrap();
    assert_eq!(ids(&all), vec![theirs.id, anon.id, mine.id]);

    let owned = ComplaintStore::list(&store, Visibility::OwnedBy(u1), Page::unbounded()).await.unwrap();
    assert_eq!(ids(&owned), vec![mine.id]);

    let with_anon = ComplaintStore::list(&store, Visibility::OwnedByOrAnonymous(u1), Page::unbounded())
        .await
        .unwrap();
    assert_eq!(ids(&with_anon), vec![anon.id, mine.id]);

    let anon_only = ComplaintStore::list(&store, Visibility::AnonymousOnly, Page::unbounded())
        .await
        .unwrap();
    assert_eq!(ids(&anon_only), vec![anon.id]);

    let paged = ComplaintStore::list(&store, Visibility::All, Page { limit: Some(1), offset: 1 })
        .await
        .unwrap();
    assert_eq!(ids(&paged), vec![anon.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_status_update_is_compare_and_set(pool: PgPool) {
    let store = PgStore::new(pool);
    let c = store.insert(&complaint(None, 0)).await.unwrap();
    let official = Uuid::new_v4();

    let change = StatusChange {
        expected: ComplaintStatus::Open,
        status: ComplaintStatus::UnderReview,
        official_assigned: Some(official),
        updated_at: c.updated_at + Duration::seconds(1),
    };
    let updated = store.update_status(c.id, change).await.unwrap().unwrap();
    assert_eq!(updated.status, ComplaintStatus::UnderReview);
    assert_eq!(updated.official_assigned, Some(official));

    // Replaying the same change finds the status already moved.
    assert_matches!(
        store.update_status(c.id, change).await,
        Err(CoreError::Conflict(_))
    );
    assert_eq!(store.update_status(Uuid::new_v4(), change).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_resolved_complaint_is_not_reassigned(pool: PgPool) {
    let store = PgStore::new(pool);
    let c = store.insert(&complaint(None, 0)).await.unwrap();
    let first = Uuid::new_v4();

    let resolve = StatusChange {
        expected: ComplaintStatus::Open,
        status: ComplaintStatus::Resolved,
        official_assigned: Some(first),
        updated_at: c.updated_at + Duration::seconds(1),
    };
    store.update_status(c.id, resolve).await.unwrap().unwrap();

    assert_matches!(
        store
            .assign_official(c.id, Uuid::new_v4(), c.updated_at + Duration::seconds(2))
            .await,
        Err(CoreError::Conflict(_))
    );
    let stored = ComplaintStore::find_by_id(&store, c.id).await.unwrap().unwrap();
    assert_eq!(stored.official_assigned, Some(first));
    assert_eq!(
        store
            .assign_official(Uuid::new_v4(), first, c.updated_at)
            .await
            .unwrap(),
        None
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_anonymous_with_citizen_is_rejected(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut c = complaint(Some(Uuid::new_v4()), 0);
    c.is_anonymous = true;
    assert_matches!(store.insert(&c).await, Err(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_role_grants(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = Uuid::new_v4();

    assert_eq!(store.role_of(user).await.unwrap(), None);
    store.grant(user, Role::Citizen).await.unwrap();
    store.grant(user, Role::Admin).await.unwrap();
    store.grant(user, Role::Admin).await.unwrap();
    assert_eq!(store.grants_for(user).await.unwrap().len(), 2);
    assert_eq!(store.role_of(user).await.unwrap(), Some(Role::Admin));

    assert!(store.revoke(user, Role::Admin).await.unwrap());
    assert!(!store.revoke(user, Role::Admin).await.unwrap());
    assert_eq!(store.role_of(user).await.unwrap(), Some(Role::Citizen));
}

// ---------------------------------------------------------------------------
// Projects and budget flows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_project_round_trips(pool: PgPool) {
    let store = PgStore::new(pool);
    let input = CreateProject {
        title: "Storm Water Drain Upgrade".into(),
        category: "Drainage".into(),
        short_description: "Widening of the primary drain".into(),
        detailed_description: None,
        cost: 120_000_000,
        ward: 151,
        contractor: None,
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        completion_date: None,
        duration_months: Some(18),
        progress_percent: Some(20),
        geo_location: Some(GeoPoint { lat: 12.93, lng: 77.62 }),
        images: vec!["drain-1.jpg".into()],
    };

    let created = ProjectStore::create(&store, new_id(), &input, types::now()).await.unwrap();
    assert_eq!(created.geo_location, input.geo_location);
    assert_eq!(created.images, input.images);

    let found = ProjectStore::find_by_id(&store, created.id).await.unwrap();
    assert_eq!(found, Some(created.clone()));
    assert_eq!(ProjectStore::list(&store).await.unwrap(), vec![created]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_fiscal_year_conflicts(pool: PgPool) {
    let store = PgStore::new(pool);
    let input = CreateBudgetFlow {
        fiscal_year: "2023-24".into(),
        bbmp_budget: 11_163_000_000,
        state_funds: 3_000_000_000,
        central_funds: 1_200_000_000,
        category_wise_breakdown: vec![CategoryShare {
            name: "Roads & Infrastructure".into(),
            percent: 35.0,
        }],
    };

    let flow = BudgetStore::create(&store, new_id(), &input, types::now()).await.unwrap();
    assert_eq!(flow.category_wise_breakdown, input.category_wise_breakdown);
    assert_matches!(
        BudgetStore::create(&store, new_id(), &input, types::now()).await,
        Err(CoreError::Conflict(_))
    );
    assert_eq!(
        store.find_by_fiscal_year("2023-24").await.unwrap().map(|f| f.id),
        Some(flow.id)
    );
}
