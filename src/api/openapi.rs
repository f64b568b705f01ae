//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::sign_up_handler;
use crate::domain::{MessageContent, ResendVerification, SignUp};
use crate::types::ApiResponse;

/// OpenAPI documentation for Mystery Message
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mystery Message",
        version = "0.1.0",
        description = "Account sign-up and email verification",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        sign_up_handler::sign_up,
        sign_up_handler::resend_verification,
    ),
    components(
        schemas(
            SignUp,
            ResendVerification,
            MessageContent,
            ApiResponse,
        )
    ),
    tags(
        (name = "Registration", description = "Account creation and verification codes")
    )
)]
pub struct ApiDoc;
