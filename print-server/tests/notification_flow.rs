//! Notification store and worker queue behavior.

mod common;

use common::{create_user, setup};
use print_server::db::store::job;
use print_server::services::worker::MAX_ATTEMPTS;
use shared::error::ErrorCode;
use shared::models::Role;
use shared::util::now_millis;

#[tokio::test]
async fn test_send_and_inbox_ordering() {
    let env = setup().await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let (recipient, user) = create_user(&env.state, "rakoto", Role::User).await;
    let notifications = env.state.notifications();

    notifications
        .send(&admin, recipient.id.unwrap(), "Votre commande est prête")
        .await
        .unwrap();
    notifications
        .send(&admin, recipient.id.unwrap(), "Promotion flyers A5")
        .await
        .unwrap();

    let inbox = notifications.list_inbox(&user, false).await.unwrap();
    assert_eq!(inbox.len(), 2);
    // Newest first
    assert_eq!(inbox[0].message, "Promotion flyers A5");
    assert!(inbox.iter().all(|n| !n.is_read));
}

#[tokio::test]
async fn test_send_validations() {
    let env = setup().await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let notifications = env.state.notifications();

    let empty = notifications.send(&admin, admin.user_id, "   ").await;
    assert_eq!(empty.unwrap_err().code(), ErrorCode::Validation);

    let unknown = notifications.send(&admin, 9_999, "hello").await;
    assert_eq!(unknown.unwrap_err().code(), ErrorCode::Validation);
}

#[tokio::test]
async fn test_sent_view_suppresses_self_echo() {
    let env = setup().await;
    let (recipient, _user) = create_user(&env.state, "rakoto", Role::User).await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let notifications = env.state.notifications();

    notifications
        .send(&admin, recipient.id.unwrap(), "to someone else")
        .await
        .unwrap();
    notifications
        .send(&admin, admin.user_id, "note to self")
        .await
        .unwrap();

    let sent = notifications.list_sent_by(&admin).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "to someone else");

    // The self-send still lands in the inbox
    let inbox = notifications.list_inbox(&admin, false).await.unwrap();
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn test_mark_all_read_zeroes_unread_count() {
    let env = setup().await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let (recipient, user) = create_user(&env.state, "rakoto", Role::User).await;
    let notifications = env.state.notifications();

    for i in 0..5 {
        notifications
            .send(&admin, recipient.id.unwrap(), &format!("message {i}"))
            .await
            .unwrap();
    }
    assert_eq!(notifications.unread_count(&user).await.unwrap(), 5);

    let flipped = notifications.mark_all_read(&user).await.unwrap();
    assert_eq!(flipped, 5);
    assert_eq!(notifications.unread_count(&user).await.unwrap(), 0);

    // Idempotent
    assert_eq!(notifications.mark_all_read(&user).await.unwrap(), 0);

    // Only the recipient's rows were touched
    assert_eq!(notifications.unread_count(&admin).await.unwrap(), 0);
}

#[tokio::test]
async fn test_soft_delete_restore_and_actor_rules() {
    let env = setup().await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let (recipient, user) = create_user(&env.state, "rakoto", Role::User).await;
    let (_, stranger) = create_user(&env.state, "voleur", Role::User).await;
    let notifications = env.state.notifications();

    let note = notifications
        .send(&admin, recipient.id.unwrap(), "coucou")
        .await
        .unwrap();
    let note_id = note.id.unwrap();

    // Only the recipient or an admin may act; others read not-found
    let masked = notifications.soft_delete(&stranger, note_id).await;
    assert_eq!(masked.unwrap_err().code(), ErrorCode::NotFound);

    notifications.soft_delete(&user, note_id).await.unwrap();
    assert!(notifications.list_inbox(&user, false).await.unwrap().is_empty());
    assert_eq!(notifications.list_inbox(&user, true).await.unwrap().len(), 1);

    notifications.restore(&user, note_id).await.unwrap();
    assert_eq!(notifications.list_inbox(&user, false).await.unwrap().len(), 1);

    // Admin may hard-delete someone else's notification
    notifications.hard_delete(&admin, note_id).await.unwrap();
    assert!(notifications.list_inbox(&user, true).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_sees_all_rows() {
    let env = setup().await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let (recipient, user) = create_user(&env.state, "rakoto", Role::User).await;
    let notifications = env.state.notifications();

    notifications
        .send(&admin, recipient.id.unwrap(), "first")
        .await
        .unwrap();
    notifications
        .send(&user, admin.user_id, "second")
        .await
        .unwrap();

    let denied = notifications.list_all(&user, false).await;
    assert_eq!(denied.unwrap_err().code(), ErrorCode::Forbidden);

    let all = notifications.list_all(&admin, false).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_malformed_job_is_retried_then_parked() {
    let env = setup().await;
    let worker = env.state.notify_worker();

    let job_id = job::insert(&env.state.pool, "order_confirmation", "not json", now_millis() - 1)
        .await
        .unwrap();

    // First pass fails and schedules a retry
    assert_eq!(worker.run_due_jobs().await, 0);
    let parked = job::list_parked(&env.state.pool, 1).await.unwrap();
    assert_eq!(parked.len(), 1);
    assert_eq!(parked[0].attempts, 1);
    assert!(parked[0].last_error.is_some());

    // Exhaust the attempt budget; the row is excluded from future scans
    for _ in 1..MAX_ATTEMPTS {
        job::mark_failed(&env.state.pool, job_id, "still broken", now_millis() - 1)
            .await
            .unwrap();
    }
    assert_eq!(worker.run_due_jobs().await, 0);
    let parked = job::list_parked(&env.state.pool, MAX_ATTEMPTS).await.unwrap();
    assert_eq!(parked.len(), 1);
}

#[tokio::test]
async fn test_job_for_removed_order_is_dropped_quietly() {
    let env = setup().await;
    let (recipient, _) = create_user(&env.state, "rakoto", Role::User).await;

    // Order 999 never existed; the job completes without a notification
    let payload = format!(
        r#"{{"order_id":999,"user_id":{}}}"#,
        recipient.id.unwrap()
    );
    job::insert(&env.state.pool, "order_confirmation", &payload, now_millis() - 1)
        .await
        .unwrap();

    assert_eq!(env.state.notify_worker().run_due_jobs().await, 1);
    assert_eq!(env.mailer.sent_count(), 0);
}
