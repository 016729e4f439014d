//! `OpenAPI` document for the service, generated from handler annotations.

use utoipa::OpenApi;

use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "hyrio",
        description = "Job board identity, verification and candidate alerts backend"
    ),
    paths(
        handlers::health::health,
        handlers::auth::register::register,
        handlers::auth::verification::verify,
        handlers::auth::verification::regenerate,
        handlers::auth::session::login,
        handlers::auth::session::refresh,
        handlers::auth::session::logout,
        handlers::jobs::create::create_job,
        handlers::jobs::dispatch::dispatch_alerts,
    ),
    components(schemas(
        handlers::health::Health,
        handlers::auth::types::Channel,
        handlers::auth::types::AccountProfile,
        handlers::auth::types::RegisterRequest,
        handlers::auth::types::VerifyRequest,
        handlers::auth::types::VerifyResponse,
        handlers::auth::types::RegenerateRequest,
        handlers::auth::types::RegenerateResponse,
        handlers::auth::types::LoginRequest,
        handlers::auth::types::LoginResponse,
        handlers::auth::types::RefreshRequest,
        handlers::auth::types::RefreshResponse,
        handlers::auth::types::LogoutRequest,
        handlers::jobs::types::ExperienceLevel,
        handlers::jobs::types::DispatchStatus,
        handlers::jobs::types::Candidate,
        handlers::jobs::types::CreateJobRequest,
        handlers::jobs::types::JobResponse,
        handlers::jobs::types::DispatchResponse,
    )),
    tags(
        (name = "auth", description = "Registration, verification and sessions"),
        (name = "jobs", description = "Job listings and candidate alerts"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
