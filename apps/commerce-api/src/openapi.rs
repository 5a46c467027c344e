//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Shared document metadata. Domain paths are merged in below because both
/// domains mount at the server root rather than under a common prefix.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Commerce API",
        version = "0.1.0",
        description = "Catalog queries, media-backed product ingestion, and order tracking",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    tags(
        (name = "Catalog", description = "Product ingestion and catalog query endpoints"),
        (name = "Orders", description = "Checkout and order tracking endpoints")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_catalog::ApiDoc::openapi());
        doc.merge(domain_orders::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_both_domains() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/upload-products"));
        assert!(doc.paths.paths.contains_key("/admin/products"));
        assert!(doc.paths.paths.contains_key("/save-payment"));
        assert!(doc.paths.paths.contains_key("/admin/orders"));
    }
}
