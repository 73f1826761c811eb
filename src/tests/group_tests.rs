use super::{create_test_service, member};
use crate::core::errors::RoomshareError;
use crate::core::models::expense::ExpenseDraft;
use crate::core::models::group::GroupDraft;
use chrono::NaiveDate;

fn group_draft(name: &str, size: u8) -> GroupDraft {
    GroupDraft {
        group_name: name.to_string(),
        group_size: size,
        preferred_location: "Koregaon Park".to_string(),
        budget_range: "8000-12000".to_string(),
        ..GroupDraft::default()
    }
}

fn expense(title: &str, amount: f64) -> ExpenseDraft {
    ExpenseDraft {
        title: title.to_string(),
        total_amount: amount,
        expense_month: NaiveDate::from_ymd_opt(2025, 6, 1),
    }
}

#[tokio::test]
async fn test_create_group_assigns_compatibility_score() {
    let service = create_test_service();
    let creator = member("m1");

    for size in 2..=6u8 {
        let group = service.create_group(group_draft("Flatmates", size), &creator).await.unwrap();
        assert_eq!(group.group_size, size);
        assert!((70..=99).contains(&group.compatibility_score));
    }
    assert_eq!(service.list_groups().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_group_rejects_bad_size_and_name() {
    let service = create_test_service();
    let creator = member("m1");

    for size in [0u8, 1, 7] {
        let result = service.create_group(group_draft("Flatmates", size), &creator).await;
        assert!(matches!(result, Err(RoomshareError::InvalidInput(ref field, _)) if field == "groupSize"));
    }
    let unnamed = service.create_group(group_draft("  ", 3), &creator).await;
    assert!(matches!(unnamed, Err(RoomshareError::InvalidInput(..))));
    assert!(service.list_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expense_views_carry_member_share() {
    let service = create_test_service();
    let creator = member("m1");
    let group = service.create_group(group_draft("Trio", 3), &creator).await.unwrap();
    let other = service.create_group(group_draft("Duo", 2), &creator).await.unwrap();

    service.add_expense(&group.id, expense("Rent", 300.0), &creator).await.unwrap();
    service.add_expense(&group.id, expense("Internet", 100.0), &creator).await.unwrap();
    service.add_expense(&other.id, expense("Electricity", 50.0), &creator).await.unwrap();

    let views = service.list_group_expenses(&group.id).await.unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].expense.title, "Rent");
    assert_eq!(views[0].per_member_share_display, "100.00");
    assert_eq!(views[1].per_member_share, 33.33);
    assert_eq!(views[1].per_member_share_display, "33.33");
    assert!(views.iter().all(|v| !v.expense.is_paid));

    let json = serde_json::to_value(&views[1]).unwrap();
    assert_eq!(json["perMemberShareDisplay"], "33.33");
    assert_eq!(json["groupId"], group.id.as_str());
}

#[tokio::test]
async fn test_expense_month_defaults_to_today() {
    let service = create_test_service();
    let creator = member("m1");
    let group = service.create_group(group_draft("Trio", 3), &creator).await.unwrap();
    let draft = ExpenseDraft {
        title: "Groceries".to_string(),
        total_amount: 1200.0,
        expense_month: None,
    };
    let added = service.add_expense(&group.id, draft, &creator).await.unwrap();
    assert_eq!(added.expense_month, added.created_at.date_naive());
}

#[tokio::test]
async fn test_add_expense_validates_input() {
    let service = create_test_service();
    let creator = member("m1");
    let group = service.create_group(group_draft("Trio", 3), &creator).await.unwrap();

    let untitled = service.add_expense(&group.id, expense("", 100.0), &creator).await;
    assert!(matches!(untitled, Err(RoomshareError::InvalidInput(..))));

    let negative = service.add_expense(&group.id, expense("Rent", -5.0), &creator).await;
    assert!(matches!(negative, Err(RoomshareError::InvalidInput(..))));

    let infinite = service.add_expense(&group.id, expense("Rent", f64::INFINITY), &creator).await;
    assert!(matches!(infinite, Err(RoomshareError::InvalidInput(..))));
}

#[tokio::test]
async fn test_update_and_toggle_paid() {
    let service = create_test_service();
    let creator = member("m1");
    let group = service.create_group(group_draft("Quad", 4), &creator).await.unwrap();
    let added = service.add_expense(&group.id, expense("Rent", 400.0), &creator).await.unwrap();

    let updated = service
        .update_expense(&added.id, expense("Rent June", 800.0), &creator)
        .await
        .unwrap();
    assert_eq!(updated.id, added.id);
    assert_eq!(updated.total_amount, 800.0);
    assert_eq!(updated.created_at, added.created_at);

    let paid = service.set_expense_paid(&added.id, true, &creator).await.unwrap();
    assert!(paid.is_paid);
    let views = service.list_group_expenses(&group.id).await.unwrap();
    assert!(views[0].expense.is_paid);
    assert_eq!(views[0].per_member_share_display, "200.00");

    let unpaid = service.set_expense_paid(&added.id, false, &creator).await.unwrap();
    assert!(!unpaid.is_paid);
}

#[tokio::test]
async fn test_delete_expense() {
    let service = create_test_service();
    let creator = member("m1");
    let group = service.create_group(group_draft("Duo", 2), &creator).await.unwrap();
    let added = service.add_expense(&group.id, expense("Gas", 90.0), &creator).await.unwrap();

    service.delete_expense(&added.id, &creator).await.unwrap();
    assert!(service.list_group_expenses(&group.id).await.unwrap().is_empty());
    assert!(matches!(
        service.set_expense_paid(&added.id, true, &creator).await,
        Err(RoomshareError::ExpenseNotFound(_))
    ));
}

#[tokio::test]
async fn test_deleting_group_leaves_expenses() {
    let service = create_test_service();
    let creator = member("m1");
    let group = service.create_group(group_draft("Duo", 2), &creator).await.unwrap();
    let added = service.add_expense(&group.id, expense("Water", 40.0), &creator).await.unwrap();

    service.delete_group(&group.id, &creator).await.unwrap();
    assert!(matches!(service.get_group(&group.id).await, Err(RoomshareError::GroupNotFound(_))));
    assert!(matches!(
        service.list_group_expenses(&group.id).await,
        Err(RoomshareError::GroupNotFound(_))
    ));

    // The expense record itself is still there.
    let still_there = service.set_expense_paid(&added.id, true, &creator).await.unwrap();
    assert_eq!(still_there.group_id, group.id);
}
