//! Use case tests against the in-memory repository

use std::sync::Arc;

use kernel::id::UserId;

use super::*;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::infra::memory::MemoryUserRepository;

struct Fixture {
    repo: Arc<MemoryUserRepository>,
    tokens: Arc<TokenService>,
}

impl Fixture {
    async fn seeded() -> Self {
        let repo = Arc::new(MemoryUserRepository::new());
        SeedAdminUseCase::new(repo.clone()).execute().await.unwrap();
        Self {
            repo,
            tokens: Arc::new(TokenService::new(&AuthConfig::with_random_secret())),
        }
    }

    async fn sign_in(&self, kind: LoginKind, identifier: &str, password: &str) -> Result<SignInOutput, AuthError> {
        SignInUseCase::new(self.repo.clone(), self.tokens.clone())
            .execute(SignInInput {
                kind,
                identifier: identifier.to_string(),
                password: password.to_string(),
            })
            .await
    }

    async fn create_student(&self, nis: &str, password: &str) -> UserId {
        CreateStudentUseCase::new(self.repo.clone())
            .execute(CreateStudentInput {
                nis: nis.to_string(),
                virtual_account: format!("VA-{nis}"),
                name: format!("Student {nis}"),
                password: password.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn change_password(&self, user_id: UserId, old: &str, new: &str) -> Result<(), AuthError> {
        ChangePasswordUseCase::new(self.repo.clone())
            .execute(ChangePasswordInput {
                user_id,
                old_password: old.to_string(),
                new_password: new.to_string(),
            })
            .await
    }
}

// ============================================================================
// Seeding
// ============================================================================

#[tokio::test]
async fn test_seed_runs_once() {
    let fx = Fixture::seeded().await;
    let created_again = SeedAdminUseCase::new(fx.repo.clone()).execute().await.unwrap();
    assert!(!created_again);

    let admin = fx.repo.find_by_username("admin").await.unwrap().unwrap();
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.name, "Administrator");
    assert!(!admin.must_change_password);
}

// ============================================================================
// Sign in
// ============================================================================

#[tokio::test]
async fn test_admin_login_token_carries_identity() {
    let fx = Fixture::seeded().await;
    let output = fx.sign_in(LoginKind::Admin, "admin", "admin123").await.unwrap();

    let identity = fx.tokens.validate(&output.token).unwrap();
    assert_eq!(identity.user_id, output.user.id);
    assert_eq!(identity.role, UserRole::Admin);
}

#[tokio::test]
async fn test_login_required_fields() {
    let fx = Fixture::seeded().await;

    let err = fx.sign_in(LoginKind::Admin, "", "admin123").await.err().unwrap();
    assert!(matches!(err, AuthError::Validation("Username and password are required")));

    let err = fx.sign_in(LoginKind::Student, "123", "").await.err().unwrap();
    assert!(matches!(err, AuthError::Validation("NIS and password are required")));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let fx = Fixture::seeded().await;
    fx.create_student("555", "initial").await;

    // wrong password
    let err = fx.sign_in(LoginKind::Admin, "admin", "nope").await.err().unwrap();
    assert!(matches!(err, AuthError::InvalidCredentials));
    // unknown user
    let err = fx.sign_in(LoginKind::Student, "999", "initial").await.err().unwrap();
    assert!(matches!(err, AuthError::InvalidCredentials));
    // right credentials, wrong route
    let err = fx.sign_in(LoginKind::Admin, "555", "initial").await.err().unwrap();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_student_login_reports_must_change() {
    let fx = Fixture::seeded().await;
    fx.create_student("777", "initial").await;

    let output = fx.sign_in(LoginKind::Student, "777", "initial").await.unwrap();
    assert!(output.user.must_change_password);
    assert_eq!(output.user.role, UserRole::Student);
}

// ============================================================================
// Change password
// ============================================================================

#[tokio::test]
async fn test_change_password_flow() {
    let fx = Fixture::seeded().await;
    let admin_id = fx.sign_in(LoginKind::Admin, "admin", "admin123").await.unwrap().user.id;

    let err = fx.change_password(admin_id, "admin123", "short").await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::Validation("New password must be at least 6 characters")
    ));

    fx.change_password(admin_id, "admin123", "longer1").await.unwrap();

    assert!(fx.sign_in(LoginKind::Admin, "admin", "longer1").await.is_ok());
    assert!(matches!(
        fx.sign_in(LoginKind::Admin, "admin", "admin123").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_change_password_errors() {
    let fx = Fixture::seeded().await;
    let student = fx.create_student("321", "initial").await;

    assert!(matches!(
        fx.change_password(student, "", "longer1").await,
        Err(AuthError::Validation("Old password and new password are required"))
    ));
    assert!(matches!(
        fx.change_password(student, "wrong!", "longer1").await,
        Err(AuthError::OldPasswordIncorrect)
    ));
    assert!(matches!(
        fx.change_password(UserId::new(999), "initial", "longer1").await,
        Err(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_change_password_length_and_blank_rules() {
    let fx = Fixture::seeded().await;
    let student = fx.create_student("765", "initial").await;

    // Blank passes the presence check but fails the password policy
    assert!(matches!(
        fx.change_password(student, "initial", "      ").await,
        Err(AuthError::Validation("New password is invalid"))
    ));

    // Five characters, seven bytes
    assert!(matches!(
        fx.change_password(student, "initial", "pässö").await,
        Err(AuthError::Validation("New password must be at least 6 characters"))
    ));

    fx.change_password(student, "initial", "pässwö").await.unwrap();
    assert!(fx.sign_in(LoginKind::Student, "765", "pässwö").await.is_ok());
}

#[tokio::test]
async fn test_change_password_clears_flag() {
    let fx = Fixture::seeded().await;
    let student = fx.create_student("432", "initial").await;

    fx.change_password(student, "initial", "mine-now").await.unwrap();

    let user = fx.repo.find_by_id(student).await.unwrap().unwrap();
    assert!(!user.must_change_password);
    assert!(user.updated_at >= user.created_at);
}

// ============================================================================
// Student management
// ============================================================================

#[tokio::test]
async fn test_create_student_validation_and_conflict() {
    let fx = Fixture::seeded().await;
    let use_case = CreateStudentUseCase::new(fx.repo.clone());

    let err = use_case
        .execute(CreateStudentInput {
            nis: "1".into(),
            virtual_account: " ".into(),
            name: "A".into(),
            password: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::Validation("NIS, virtual account, name, and password are required")
    ));

    fx.create_student("1", "initial").await;
    let err = use_case
        .execute(CreateStudentInput {
            nis: "1".into(),
            virtual_account: "VA-other".into(),
            name: "B".into(),
            password: "initial".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AlreadyExists));
}

#[tokio::test]
async fn test_list_students_excludes_admin() {
    let fx = Fixture::seeded().await;
    fx.create_student("2", "initial").await;
    fx.create_student("1", "initial").await;

    let students = ListStudentsUseCase::new(fx.repo.clone()).execute().await.unwrap();
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|u| u.role == UserRole::Student));
    assert_eq!(students[0].nis.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_reset_password_raises_flag() {
    let fx = Fixture::seeded().await;
    let student = fx.create_student("10", "initial").await;
    fx.change_password(student, "initial", "chosen1").await.unwrap();

    ResetPasswordUseCase::new(fx.repo.clone())
        .execute(ResetPasswordInput {
            user_id: student,
            new_password: "reset99".into(),
        })
        .await
        .unwrap();

    let output = fx.sign_in(LoginKind::Student, "10", "reset99").await.unwrap();
    assert!(output.user.must_change_password);
}

#[tokio::test]
async fn test_reset_password_rules() {
    let fx = Fixture::seeded().await;
    let admin = fx.repo.find_by_username("admin").await.unwrap().unwrap();
    let use_case = ResetPasswordUseCase::new(fx.repo.clone());

    let err = use_case
        .execute(ResetPasswordInput {
            user_id: UserId::default(),
            new_password: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation("User ID and new password are required")));

    let err = use_case
        .execute(ResetPasswordInput {
            user_id: admin.id,
            new_password: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation("Can only reset student passwords")));

    let err = use_case
        .execute(ResetPasswordInput {
            user_id: UserId::new(404),
            new_password: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn test_delete_student() {
    let fx = Fixture::seeded().await;
    let student = fx.create_student("20", "initial").await;
    let admin = fx.repo.find_by_username("admin").await.unwrap().unwrap();
    let use_case = DeleteStudentUseCase::new(fx.repo.clone());

    assert!(matches!(
        use_case.execute(admin.id).await,
        Err(AuthError::Validation("Can only delete student accounts"))
    ));

    use_case.execute(student).await.unwrap();
    assert!(fx.repo.find_by_id(student).await.unwrap().is_none());
    assert!(matches!(use_case.execute(student).await, Err(AuthError::UserNotFound)));
}
