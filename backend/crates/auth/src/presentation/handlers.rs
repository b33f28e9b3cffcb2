//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use kernel::i18n::translate;
use kernel::id::UserId;
use kernel::json::AppJson;

use crate::application::token::{AuthIdentity, TokenService};
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CreateStudentInput, CreateStudentUseCase,
    DeleteStudentUseCase, ListStudentsUseCase, LoginKind, ResetPasswordInput,
    ResetPasswordUseCase, SignInInput, SignInUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AdminLoginRequest, ChangePasswordRequest, CreateStudentRequest, LoginResponse,
    MessageResponse, ResetPasswordRequest, StudentLoginRequest, UserIdQuery, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

// Manual impl: `R` itself need not be Clone
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/admin/login
pub async fn admin_login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<AdminLoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    sign_in(&state, LoginKind::Admin, req.username, req.password).await
}

/// POST /api/auth/student/login
pub async fn student_login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<StudentLoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    sign_in(&state, LoginKind::Student, req.nis, req.password).await
}

async fn sign_in<R>(
    state: &AuthAppState<R>,
    kind: LoginKind,
    identifier: String,
    password: String,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignInInput {
            kind,
            identifier,
            password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        must_change_password: output.user.must_change_password,
        user: UserResponse::from(output.user),
    }))
}

// ============================================================================
// Change Password (requires authentication)
// ============================================================================

/// POST /api/auth/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    identity: AuthIdentity,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone());

    use_case
        .execute(ChangePasswordInput {
            user_id: identity.user_id,
            old_password: req.old_password,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse::new(translate(
        "Password changed successfully",
    ))))
}

// ============================================================================
// Student Management (requires admin)
// ============================================================================

/// GET /api/admin/students
pub async fn list_students<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = ListStudentsUseCase::new(state.repo.clone());
    let students = use_case.execute().await?;

    Ok(Json(students.iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/students
pub async fn create_student<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<CreateStudentRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = CreateStudentUseCase::new(state.repo.clone());

    let user = use_case
        .execute(CreateStudentInput {
            nis: req.nis,
            virtual_account: req.virtual_account,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/admin/students/reset-password
pub async fn reset_student_password<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone());

    use_case
        .execute(ResetPasswordInput {
            user_id: req.user_id,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}

/// DELETE /api/admin/students/delete?user_id=
pub async fn delete_student<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<UserIdQuery>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(query.user_id.as_deref())?;

    let use_case = DeleteStudentUseCase::new(state.repo.clone());
    use_case.execute(user_id).await?;

    Ok(Json(MessageResponse::new("Student deleted successfully")))
}

/// Parse a `user_id` query value
pub fn parse_user_id(raw: Option<&str>) -> AuthResult<UserId> {
    let raw = raw
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::Validation("user_id is required"))?;

    raw.parse()
        .map_err(|_| AuthError::Validation("Invalid user_id"))
}
