//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use kernel::id::UserId;
use platform::client::extract_client_context;

use crate::application::{
    AccountsConfig, CreateUserInput, CreateUserUseCase, DeleteUserUseCase, QueryUsersUseCase,
    SignInInput, SignInUseCase, UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::repository::{BanRepository, LoginAttemptRepository, UserRepository};
use crate::error::{AccountsError, AccountsResult};
use crate::presentation::dto::{
    CreateUserRequest, EmailParams, ListUsersParams, LoginRequest, LoginResponse,
    UpdateUserRequest, UserResponse, UsersPageResponse,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

// ============================================================================
// Create User
// ============================================================================

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> AccountsResult<impl IntoResponse>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateUserUseCase::new(state.repo.clone(), state.config.clone());

    let input = CreateUserInput {
        user_name: req.user_name,
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
        age: req.age,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// List / Query Users
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AccountsAppState<R>>,
    Query(params): Query<ListUsersParams>,
) -> AccountsResult<Json<UsersPageResponse>>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let use_case = QueryUsersUseCase::new(state.repo.clone(), state.config.clone());

    let page = use_case
        .list(params.page.unwrap_or(0), params.page_size.unwrap_or(0))
        .await?;

    Ok(Json(UsersPageResponse {
        users: page.users.iter().map(UserResponse::from).collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
    }))
}

/// GET /api/users/email?email=...
pub async fn get_user_by_email<R>(
    State(state): State<AccountsAppState<R>>,
    Query(params): Query<EmailParams>,
) -> AccountsResult<Json<UserResponse>>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let use_case = QueryUsersUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case.get_by_email(&params.email).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AccountsAppState<R>>,
    Path(id): Path<String>,
) -> AccountsResult<Json<UserResponse>>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let use_case = QueryUsersUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case.get_by_id(&user_id).await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Update User
// ============================================================================

/// PUT /api/users/{id}
pub async fn update_user<R>(
    State(state): State<AccountsAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AccountsResult<Json<UserResponse>>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let use_case = UpdateUserUseCase::new(state.repo.clone());

    let input = UpdateUserInput {
        user_name: req.user_name,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        age: req.age,
        is_active: req.is_active,
    };

    let user = use_case.execute(&user_id, input).await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Delete User
// ============================================================================

/// DELETE /api/users/{id}
pub async fn delete_user<R>(
    State(state): State<AccountsAppState<R>>,
    Path(id): Path<String>,
) -> AccountsResult<StatusCode>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let use_case = DeleteUserUseCase::new(state.repo.clone());

    use_case.execute(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AccountsAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AccountsResult<Json<LoginResponse>>
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let client = extract_client_context(&headers, Some(addr.ip()));

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        identity: req.identity,
        password: req.password,
    };

    let output = use_case.execute(input, &client).await?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_user_id(raw: &str) -> AccountsResult<UserId> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|_| AccountsError::Validation("Invalid user id".to_string()))?;

    Ok(UserId::from_uuid(uuid))
}
