use axum::http::StatusCode;

/// Map an error code to the HTTP status rendered at the boundary.
///
/// Covers every code the platform emits. Anything not listed is a 500.
pub fn status_for_code(code: &str) -> StatusCode {
    match code {
        "VALIDATION_ERROR" | "TOKEN_MALFORMED" | "NO_SEATS_AVAILABLE" => StatusCode::BAD_REQUEST,
        "INVALID_CREDENTIALS" | "UNAUTHORIZED" | "TOKEN_EXPIRED" | "TOKEN_INVALID" => {
            StatusCode::UNAUTHORIZED
        }
        "FORBIDDEN" => StatusCode::FORBIDDEN,
        "NOT_FOUND"
        | "USER_NOT_FOUND"
        | "BRAND_NOT_FOUND"
        | "CITY_NOT_FOUND"
        | "CAR_NOT_FOUND"
        | "DRIVER_NOT_FOUND"
        | "TRIP_NOT_FOUND"
        | "INSCRIPTION_NOT_FOUND"
        | "COLOR_NOT_FOUND" => StatusCode::NOT_FOUND,
        "USER_ALREADY_EXISTS"
        | "CAR_ALREADY_EXISTS"
        | "DRIVER_ALREADY_EXISTS"
        | "ALREADY_INSCRIBED"
        | "COLOR_ALREADY_EXISTS"
        | "RELATION_CONSTRAINT" => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
