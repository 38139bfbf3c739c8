use codeserver::http::status::StatusCode;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::OK.as_u16(), 200);
    assert_eq!(StatusCode::NO_CONTENT.as_u16(), 204);
    assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
    assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED.as_u16(), 405);
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    assert_eq!(StatusCode::NOT_FOUND.reason_phrase(), "Not Found");
    assert_eq!(StatusCode::FORBIDDEN.reason_phrase(), "Forbidden");
    assert_eq!(
        StatusCode::SERVICE_UNAVAILABLE.reason_phrase(),
        "Service Unavailable"
    );
    assert_eq!(
        StatusCode::INTERNAL_SERVER_ERROR.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_arbitrary_codes_are_accepted() {
    let teapot = StatusCode::from_u16(418).unwrap();
    assert_eq!(teapot.as_u16(), 418);
    assert_eq!(teapot.reason_phrase(), "");
    assert!(!teapot.is_success());
}

#[test]
fn test_out_of_range_codes_are_rejected() {
    assert_eq!(StatusCode::from_u16(0), None);
    assert_eq!(StatusCode::from_u16(99), None);
    assert_eq!(StatusCode::from_u16(1000), None);
}

#[test]
fn test_display_includes_reason() {
    assert_eq!(StatusCode::NOT_FOUND.to_string(), "404 Not Found");
    assert!(StatusCode::OK.is_success());
}
