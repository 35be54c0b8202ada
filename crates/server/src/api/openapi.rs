//! OpenAPI/Utoipa configuration.

use crate::api::health::HEALTH_TAG;
use utoipa::OpenApi;

/// OpenAPI documentation configuration. The API version is taken from the
/// crate version, as is `SERVICE_VERSION`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nexios Starter",
        description = "A clean, modular starter template with scalable structure, API versioning, and Docker support."
    ),
    tags(
        (name = HEALTH_TAG, description = "Service health and monitoring endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::health::SERVICE_VERSION;

    #[test]
    fn api_version_matches_service_version() {
        assert_eq!(ApiDoc::openapi().info.version, SERVICE_VERSION);
    }

    #[test]
    fn declares_health_tag() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Nexios Starter");
        assert!(
            doc.tags
                .unwrap_or_default()
                .iter()
                .any(|tag| tag.name == HEALTH_TAG)
        );
    }
}
