use chrono::{Duration, TimeZone, Utc};
use hotset_core::models::*;

#[test]
fn ids_serialize_as_plain_numbers() {
    let json = serde_json::to_value(Item::new(3, 9, "Docs", "https://docs.rs")).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["group_id"], 9);
    assert_eq!(json["pinned"], false);
}

#[test]
fn usage_record_bump_accumulates_and_stamps() {
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let mut record = UsageRecord::new(t0);
    assert_eq!(record.score, 0.0);

    let t1 = t0 + Duration::seconds(5);
    assert_eq!(record.bump(1.0, t1), 1.0);
    assert_eq!(record.bump(0.5, t1), 1.5);
    assert_eq!(record.last_used, t1);
    assert_eq!(record.idle_for(t1 + Duration::minutes(3)), Duration::minutes(3));
}

#[test]
fn usage_record_never_decreases() {
    let now = Utc::now();
    let mut record = UsageRecord::new(now);
    record.bump(2.0, now);
    record.bump(-5.0, now);
    record.bump(f64::NAN, now);
    assert_eq!(record.score, 2.0);
}

#[test]
fn snapshot_entry_copies_item_metadata() {
    let item = Item::new(5, 2, "Mail", "https://mail.example").suspended();
    let entry = SnapshotEntry::from(&item);
    assert_eq!(entry.id, ItemId(5));
    assert_eq!(entry.group_id, GroupId(2));
    assert_eq!(entry.title, "Mail");
    assert!(entry.suspended);
}

#[test]
fn snapshot_book_is_keyed_by_group_and_replaces_per_group() {
    let now = Utc::now();
    let mut book = SnapshotBook::default();
    book.put(GroupSnapshot {
        group_id: GroupId(1),
        updated_at: now,
        items: vec![],
    });
    book.put(GroupSnapshot {
        group_id: GroupId(2),
        updated_at: now,
        items: vec![SnapshotEntry::from(&Item::new(9, 2, "a", "b"))],
    });
    let replaced = book.put(GroupSnapshot {
        group_id: GroupId(1),
        updated_at: now + Duration::seconds(1),
        items: vec![],
    });

    assert!(replaced.is_some());
    assert_eq!(book.len(), 2);
    assert_eq!(book.get(GroupId(2)).unwrap().items.len(), 1);

    let json = serde_json::to_value(&book).unwrap();
    assert!(json.get("1").is_some());
    assert_eq!(json["2"]["groupId"], 2);
    assert_eq!(json["2"]["items"][0]["id"], 9);

    let back: SnapshotBook = serde_json::from_value(json).unwrap();
    assert_eq!(back, book);
}

#[test]
fn pass_outcome_exposes_report_only_when_completed() {
    assert!(PassOutcome::Empty.report().is_none());
    assert!(PassOutcome::Deferred.report().is_none());
}

proptest::proptest! {
    #[test]
    fn usage_record_bump_is_monotonic(
        weights in proptest::collection::vec(proptest::num::f64::ANY, 0..40)
    ) {
        let now = Utc::now();
        let mut record = UsageRecord::new(now);
        let mut previous = record.score;
        for weight in weights {
            let score = record.bump(weight, now);
            proptest::prop_assert!(score >= previous);
            proptest::prop_assert!(score.is_finite());
            previous = score;
        }
    }
}
