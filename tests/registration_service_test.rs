//! Registration service unit tests.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use mockall::mock;
use uuid::Uuid;

use mystery_message::domain::{NewUser, Password, PendingUpdate, SignUp, User};
use mystery_message::errors::{AppError, AppResult};
use mystery_message::infra::{EmailSender, MailError, OutboundEmail, UserRepository};
use mystery_message::services::{Registrar, RegistrationService, VerificationMailer};

use common::{code_in, test_config, user_from_new, verified_user};

mock! {
    pub Users {}

    #[async_trait]
    impl UserRepository for Users {
        async fn find_verified_by_username(&self, username: &str) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn create(&self, user: NewUser) -> AppResult<User>;
        async fn update_pending(&self, id: Uuid, update: PendingUpdate) -> AppResult<User>;
    }
}

mock! {
    pub Sender {}

    #[async_trait]
    impl EmailSender for Sender {
        async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
    }
}

fn registrar(users: MockUsers, sender: MockSender) -> Registrar {
    let config = test_config();
    Registrar::new(
        Arc::new(users),
        VerificationMailer::new(Arc::new(sender), config.email_from.clone()),
        config.hashing,
    )
}

fn sign_up(username: &str, email: &str, password: &str) -> SignUp {
    SignUp {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn unverified_user(username: &str, email: &str) -> User {
    let mut user = verified_user(username, email);
    user.is_verified = false;
    user
}

// =============================================================================
// Conflicts
// =============================================================================

#[tokio::test]
async fn test_username_taken_by_verified_user() {
    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .withf(|username| username == "alice")
        .times(1)
        .returning(|_| Ok(Some(verified_user("alice", "other@x.com"))));
    users.expect_find_by_email().never();
    users.expect_create().never();
    users.expect_update_pending().never();

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "pw"))
        .await;

    match result {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "Username is already taken."),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_email_taken_by_verified_user_with_other_username() {
    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .returning(|_| Ok(None));
    users
        .expect_find_by_email()
        .withf(|email| email == "a@x.com")
        .times(1)
        .returning(|_| Ok(Some(verified_user("bob", "a@x.com"))));
    users.expect_create().never();
    users.expect_update_pending().never();

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "pw"))
        .await;

    match result {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "User already exists with this email."),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unique_violation_on_create_is_a_conflict() {
    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .returning(|_| Ok(None));
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .returning(|_| Err(AppError::conflict("User already exists with this email.")));

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "pw"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

// =============================================================================
// Create and overwrite
// =============================================================================

#[tokio::test]
async fn test_fresh_email_creates_pending_user() {
    let created: Arc<Mutex<Option<NewUser>>> = Arc::new(Mutex::new(None));
    let sent: Arc<Mutex<Option<OutboundEmail>>> = Arc::new(Mutex::new(None));

    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .returning(|_| Ok(None));
    users.expect_find_by_email().returning(|_| Ok(None));
    let slot = created.clone();
    users.expect_create().times(1).returning(move |new_user| {
        *slot.lock().unwrap() = Some(new_user.clone());
        Ok(user_from_new(new_user))
    });
    users.expect_update_pending().never();

    let mut sender = MockSender::new();
    let slot = sent.clone();
    sender.expect_send().times(1).returning(move |email| {
        *slot.lock().unwrap() = Some(email);
        Ok(())
    });

    let before = Utc::now();
    let outcome = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "pw"))
        .await
        .unwrap();
    let after = Utc::now();

    assert!(outcome.email_sent());
    assert!(!outcome.user.is_verified);
    assert!(outcome.user.is_accepting_messages);
    assert!(outcome.user.messages.is_empty());

    let new_user = created.lock().unwrap().clone().unwrap();
    assert_eq!(new_user.username, "alice");
    assert_eq!(new_user.email, "a@x.com");
    assert_ne!(new_user.password_hash, "pw");
    assert!(Password::from_hash(new_user.password_hash.clone()).verify("pw"));

    // Code is six digits and is the one that was emailed
    assert_eq!(new_user.verify_code.len(), 6);
    assert!(new_user.verify_code.chars().all(|c| c.is_ascii_digit()));
    let email = sent.lock().unwrap().clone().unwrap();
    assert_eq!(email.to, "a@x.com");
    assert_eq!(code_in(&email), new_user.verify_code);

    // Expiry is one hour after the write
    assert!(new_user.verify_code_expiry >= before + Duration::hours(1));
    assert!(new_user.verify_code_expiry <= after + Duration::hours(1));
}

#[tokio::test]
async fn test_unverified_email_is_overwritten_in_place() {
    let existing = unverified_user("old-name", "a@x.com");
    let existing_id = existing.id;
    let updated: Arc<Mutex<Option<PendingUpdate>>> = Arc::new(Mutex::new(None));

    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .returning(|_| Ok(None));
    let found = existing.clone();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(found.clone())));
    users.expect_create().never();
    let slot = updated.clone();
    let stored = existing.clone();
    users
        .expect_update_pending()
        .withf(move |id, _| *id == existing_id)
        .times(1)
        .returning(move |_, update| {
            *slot.lock().unwrap() = Some(update.clone());
            let mut user = stored.clone();
            user.password_hash = update.password_hash.unwrap_or_default();
            user.verify_code = update.verify_code;
            user.verify_code_expiry = update.verify_code_expiry;
            Ok(user)
        });

    let mut sender = MockSender::new();
    sender
        .expect_send()
        .withf(|email| email.text.contains("Hello alice,"))
        .times(1)
        .returning(|_| Ok(()));

    let outcome = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "new-password"))
        .await
        .unwrap();

    assert_eq!(outcome.user.id, existing_id);
    let update = updated.lock().unwrap().clone().unwrap();
    let hash = update.password_hash.expect("password must be replaced");
    assert!(Password::from_hash(hash).verify("new-password"));
    assert_eq!(update.verify_code.len(), 6);
}

// =============================================================================
// Email dispatch failure
// =============================================================================

#[tokio::test]
async fn test_dispatch_failure_keeps_record_and_reports_message() {
    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .returning(|_| Ok(None));
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .returning(|new_user| Ok(user_from_new(new_user)));

    let mut sender = MockSender::new();
    sender.expect_send().times(1).returning(|_| {
        Err(MailError::Rejected {
            status: 403,
            body: "domain not verified".to_string(),
        })
    });

    let outcome = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "pw"))
        .await
        .unwrap();

    assert!(!outcome.email_sent());
    match outcome.into_result() {
        Err(AppError::EmailDispatch(msg)) => {
            assert_eq!(msg, "Failed to send verification email.")
        }
        other => panic!("expected dispatch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let mut users = MockUsers::new();
    users
        .expect_find_verified_by_username()
        .returning(|_| Err(AppError::internal("connection refused")));

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender)
        .register(sign_up("alice", "a@x.com", "pw"))
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

// =============================================================================
// Resend verification
// =============================================================================

#[tokio::test]
async fn test_resend_keeps_password_and_reissues_code() {
    let existing = unverified_user("alice", "a@x.com");
    let existing_id = existing.id;

    let mut users = MockUsers::new();
    let found = existing.clone();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(found.clone())));
    let stored = existing.clone();
    users
        .expect_update_pending()
        .withf(move |id, update| *id == existing_id && update.password_hash.is_none())
        .times(1)
        .returning(move |_, update| {
            let mut user = stored.clone();
            user.verify_code = update.verify_code;
            user.verify_code_expiry = update.verify_code_expiry;
            Ok(user)
        });
    users.expect_create().never();

    let mut sender = MockSender::new();
    sender
        .expect_send()
        .withf(|email| email.to == "a@x.com" && email.text.contains("Hello alice,"))
        .times(1)
        .returning(|_| Ok(()));

    let outcome = registrar(users, sender)
        .resend_verification("a@x.com")
        .await
        .unwrap();

    assert!(outcome.email_sent());
    assert_eq!(outcome.user.id, existing_id);
}

#[tokio::test]
async fn test_resend_for_verified_user_is_rejected() {
    let mut users = MockUsers::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(verified_user("alice", "a@x.com"))));
    users.expect_update_pending().never();

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender).resend_verification("a@x.com").await;

    match result {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "User is already verified."),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resend_for_unknown_email_is_not_found() {
    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender).resend_verification("nobody@x.com").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_resend_losing_race_to_verification_reports_already_verified() {
    let existing = unverified_user("alice", "a@x.com");

    let mut users = MockUsers::new();
    let found = existing.clone();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(found.clone())));
    // Row was verified between the lookup and the conditional update
    users
        .expect_update_pending()
        .times(1)
        .returning(|_, _| Err(AppError::conflict("User already exists with this email.")));

    let mut sender = MockSender::new();
    sender.expect_send().never();

    let result = registrar(users, sender).resend_verification("a@x.com").await;

    match result {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "User is already verified."),
        other => panic!("expected validation error, got {:?}", other),
    }
}
