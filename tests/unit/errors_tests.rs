/*!
 * Tests for the application error types
 */

use dualdoc::errors::{AppError, ComposeError, RenderError};

/// Test error display formatting
#[test]
fn test_error_display_withEachVariant_shouldFormatMessage() {
    let err = RenderError::Browser("connection lost".to_string());
    assert_eq!(err.to_string(), "Browser error: connection lost");

    let err = ComposeError::MalformedPage {
        page: 7,
        reason: "missing MediaBox".to_string(),
    };
    assert_eq!(err.to_string(), "Malformed page 7: missing MediaBox");

    let err = AppError::File("permission denied".to_string());
    assert_eq!(err.to_string(), "File error: permission denied");
}

/// Test wrapping conversions into the application error
#[test]
fn test_app_error_fromSourceErrors_shouldWrapVariant() {
    let app_err: AppError = ComposeError::Save("disk full".to_string()).into();
    assert!(matches!(app_err, AppError::Compose(_)));
    assert!(app_err.to_string().contains("disk full"));

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let app_err: AppError = io_err.into();
    assert!(matches!(app_err, AppError::File(_)));

    let render_err: RenderError = std::io::Error::other("tmpdir gone").into();
    assert!(matches!(render_err, RenderError::TempFile(_)));
}

/// Test anyhow errors collapse into the unknown variant
#[test]
fn test_app_error_fromAnyhow_shouldBecomeUnknown() {
    let app_err: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_err, AppError::Unknown(_)));
    assert!(app_err.to_string().contains("something odd"));
}
