//! Integration tests for error types

#[cfg(test)]
mod tests {
    use sitebuild_errors::*;

    #[test]
    fn test_error_conversion() {
        let build_err = BuildError::MissingBuildOutput {
            path: "/site/dist".into(),
        };
        let err: Error = build_err.into();
        assert!(matches!(err, Error::Build(_)));
        assert_eq!(err.user_code(), Some("build.missing_build_output"));
    }

    #[test]
    fn test_tool_not_found_message() {
        let err = PlatformError::ToolNotFound { tool: "npm".into() };
        assert_eq!(
            err.to_string(),
            "npm was not found in the environment; please install npm before running sitebuild"
        );
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_clone() {
        let err = StorageError::RenameFailed {
            message: "cross-device link".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let with_path = StorageError::from_io_with_path(&io_err, std::path::Path::new("/out"));
        assert!(matches!(with_path, StorageError::PermissionDenied { .. }));

        let io_err = std::io::Error::from(std::io::ErrorKind::StorageFull);
        let full = StorageError::from_io_with_path(&io_err, std::path::Path::new("/out.tmp"));
        assert_eq!(full.user_code(), Some("storage.disk_full"));
        assert!(full.user_hint().is_some());

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "odd");
        let other = StorageError::from_io_with_path(&io_err, std::path::Path::new("/out"));
        assert_eq!(other.to_string(), "IO error: /out: odd");
    }

    #[test]
    fn test_io_with_path_user_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(&io_err, "/out");
        assert_eq!(err.user_message(), "/out: missing");
        assert_eq!(err.user_code(), Some("error.io"));
    }
}
