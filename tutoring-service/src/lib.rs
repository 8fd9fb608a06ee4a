pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod query;
pub mod repository;
pub mod services;
pub mod utils;

use service_core::axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    rate_limit::{create_ip_rate_limiter, ip_rate_limit_middleware, IpRateLimit},
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::TutoringConfig;
use crate::middleware::{auth_middleware, require_admin, require_superadmin};
use crate::repository::{
    AdminRepository, AnalyticsRepository, BookingRepository, OtherServiceRepository,
    PartnerRepository, PgAdminRepository, TestimonialRepository, TutorRepository,
};
use crate::services::{AdminService, AuthService, JwtService};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::admin::session::login,
        handlers::admin::session::refresh,
        handlers::admin::session::logout,
        handlers::admin::accounts::create_admin,
        handlers::admin::accounts::list_admins,
        handlers::admin::accounts::get_me,
        handlers::admin::accounts::get_admin,
        handlers::admin::accounts::update_admin,
        handlers::admin::accounts::delete_admin,
        handlers::admin::accounts::reset_password,
        handlers::admin::accounts::change_password,
        handlers::tutor::create_tutor,
        handlers::tutor::list_tutors,
        handlers::tutor::get_tutor,
        handlers::tutor::update_tutor,
        handlers::tutor::verify_tutor,
        handlers::tutor::delete_tutor,
        handlers::booking::create_booking,
        handlers::booking::list_bookings,
        handlers::booking::get_booking,
        handlers::booking::update_booking,
        handlers::booking::assign_booking,
        handlers::booking::delete_booking,
        handlers::partner::create_partner,
        handlers::partner::list_partners,
        handlers::partner::get_partner,
        handlers::partner::update_partner,
        handlers::partner::delete_partner,
        handlers::testimonial::create_testimonial,
        handlers::testimonial::list_testimonials,
        handlers::testimonial::get_testimonial,
        handlers::testimonial::update_testimonial,
        handlers::testimonial::add_testimonial_translation,
        handlers::testimonial::delete_testimonial,
        handlers::other_service::create_other_service,
        handlers::other_service::list_other_services,
        handlers::other_service::get_other_service,
        handlers::other_service::update_other_service,
        handlers::other_service::add_other_service_translation,
        handlers::other_service::delete_other_service,
        handlers::analytics::get_totals,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::MessageResponse,
            dtos::admin::LoginRequest,
            dtos::admin::LoginResponse,
            dtos::admin::CreateAdminRequest,
            dtos::admin::UpdateAdminRequest,
            dtos::admin::ChangePasswordRequest,
            dtos::admin::ResetPasswordRequest,
            dtos::tutor::CreateTutorRequest,
            dtos::tutor::UpdateTutorRequest,
            dtos::booking::CreateBookingRequest,
            dtos::booking::UpdateBookingRequest,
            dtos::partner::CreatePartnerRequest,
            dtos::partner::UpdatePartnerRequest,
            dtos::testimonial::TestimonialTranslationInput,
            dtos::testimonial::CreateTestimonialRequest,
            dtos::testimonial::UpdateTestimonialRequest,
            dtos::other_service::OtherServiceTranslationInput,
            dtos::other_service::CreateOtherServiceRequest,
            dtos::other_service::UpdateOtherServiceRequest,
            models::AdminResponse,
            models::Role,
            models::Tutor,
            models::Booking,
            models::Partner,
            models::Testimonial,
            models::TestimonialTranslation,
            models::OtherService,
            models::OtherServiceTranslation,
            models::AnalyticsTotals,
            query::PaginationMeta,
            query::pagination::AdminPage,
            query::pagination::TutorPage,
            query::pagination::BookingPage,
            query::pagination::PartnerPage,
            query::pagination::TestimonialPage,
            query::pagination::OtherServicePage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Admin login and token refresh"),
        (name = "Admin", description = "Admin account management"),
        (name = "Tutors", description = "Tutor applications and records"),
        (name = "Bookings", description = "Tutor requests from families"),
        (name = "Partners", description = "Partner organisations"),
        (name = "Testimonials", description = "Translated testimonials"),
        (name = "Other Services", description = "Translated service listings"),
        (name = "Analytics", description = "Dashboard totals"),
        (name = "Observability", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: TutoringConfig,
    pub pool: PgPool,
    pub jwt: JwtService,
    pub admin_service: AdminService,
    pub auth_service: AuthService,
    pub tutors: TutorRepository,
    pub bookings: BookingRepository,
    pub partners: PartnerRepository,
    pub testimonials: TestimonialRepository,
    pub other_services: OtherServiceRepository,
    pub analytics: AnalyticsRepository,
    pub login_rate_limit: IpRateLimit,
}

impl AppState {
    pub fn new(config: TutoringConfig, pool: PgPool) -> Self {
        let admins = Arc::new(PgAdminRepository::new(pool.clone()));
        Self::with_admin_repository(config, pool, admins)
    }

    /// Build the state around a specific identity store.
    pub fn with_admin_repository(
        config: TutoringConfig,
        pool: PgPool,
        admins: Arc<dyn AdminRepository>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt);
        let login_rate_limit = IpRateLimit::new(
            create_ip_rate_limiter(
                config.rate_limit.login_attempts,
                config.rate_limit.login_window_seconds,
            ),
            config.rate_limit.trust_proxy_headers,
        );

        Self {
            admin_service: AdminService::new(admins.clone(), config.admin.username.clone()),
            auth_service: AuthService::new(admins, jwt.clone()),
            tutors: TutorRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            partners: PartnerRepository::new(pool.clone()),
            testimonials: TestimonialRepository::new(pool.clone()),
            other_services: OtherServiceRepository::new(pool.clone()),
            analytics: AnalyticsRepository::new(pool.clone()),
            jwt,
            login_rate_limit,
            config,
            pool,
        }
    }
}

fn cors_layer(config: &TutoringConfig) -> Result<CorsLayer, AppError> {
    let origins = config
        .security
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]))
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    use handlers::{admin, analytics, booking, other_service, partner, testimonial, tutor};

    // Login is throttled per client IP
    let login_route = Router::new()
        .route("/api/v1/admin/login", post(admin::login))
        .layer(from_fn_with_state(
            state.login_rate_limit.clone(),
            ip_rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/api/v1/admin/refresh", post(admin::refresh))
        .route("/api/v1/admin/logout", post(admin::logout))
        .route(
            "/api/v1/tutors",
            get(tutor::list_tutors).post(tutor::create_tutor),
        )
        .route("/api/v1/tutors/:id", get(tutor::get_tutor))
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/partners", get(partner::list_partners))
        .route("/api/v1/partners/:id", get(partner::get_partner))
        .route("/api/v1/testimonials", get(testimonial::list_testimonials))
        .route("/api/v1/testimonials/:id", get(testimonial::get_testimonial))
        .route(
            "/api/v1/other-services",
            get(other_service::list_other_services),
        )
        .route(
            "/api/v1/other-services/:id",
            get(other_service::get_other_service),
        );

    let admin_routes = Router::new()
        .route("/api/v1/admin", get(admin::list_admins))
        .route("/api/v1/admin/me", get(admin::get_me))
        .route("/api/v1/admin/change-password", put(admin::change_password))
        .route("/api/v1/admin/:id", get(admin::get_admin))
        .route(
            "/api/v1/tutors/:id",
            put(tutor::update_tutor).delete(tutor::delete_tutor),
        )
        .route("/api/v1/tutors/:id/verify", put(tutor::verify_tutor))
        .route("/api/v1/partners", post(partner::create_partner))
        .route(
            "/api/v1/partners/:id",
            put(partner::update_partner).delete(partner::delete_partner),
        )
        .route("/api/v1/testimonials", post(testimonial::create_testimonial))
        .route(
            "/api/v1/testimonials/:id",
            put(testimonial::update_testimonial).delete(testimonial::delete_testimonial),
        )
        .route(
            "/api/v1/testimonials/:id/translations",
            post(testimonial::add_testimonial_translation),
        )
        .route(
            "/api/v1/other-services",
            post(other_service::create_other_service),
        )
        .route(
            "/api/v1/other-services/:id",
            put(other_service::update_other_service)
                .delete(other_service::delete_other_service),
        )
        .route(
            "/api/v1/other-services/:id/translations",
            post(other_service::add_other_service_translation),
        )
        .route("/api/v1/analytics", get(analytics::get_totals))
        .layer(from_fn(require_admin))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let superadmin_routes = Router::new()
        .route("/api/v1/admin", post(admin::create_admin))
        .route(
            "/api/v1/admin/:id",
            put(admin::update_admin).delete(admin::delete_admin),
        )
        .route(
            "/api/v1/admin/:id/reset-password",
            put(admin::reset_password),
        )
        .route("/api/v1/bookings", get(booking::list_bookings))
        .route(
            "/api/v1/bookings/:id",
            get(booking::get_booking)
                .put(booking::update_booking)
                .delete(booking::delete_booking),
        )
        .route("/api/v1/bookings/:id/assign", put(booking::assign_booking))
        .layer(from_fn(require_superadmin))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let mut app = Router::new().route("/health", get(handlers::health::health_check));

    if state.config.is_swagger_enabled() {
        app = app.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let cors = cors_layer(&state.config)?;

    let app = app
        .merge(login_route)
        .merge(public_routes)
        .merge(admin_routes)
        .merge(superadmin_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &service_core::axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors);

    Ok(app)
}
