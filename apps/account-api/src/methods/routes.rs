// Public API routes
pub const USERS_PATH: &str = "/api/users";
pub const AUTHORITIES_PATH: &str = "/api/authorities";

// Root-level service routes
pub const SERVICE_HEALTH_PATH: &str = "/health";
pub const SERVICE_DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";
