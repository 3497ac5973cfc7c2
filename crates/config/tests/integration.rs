//! Integration tests for config

#[cfg(test)]
mod tests {
    use sitebuild_config::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tool.program, "npm");
        assert_eq!(config.steps.check, "npm run check");
        assert_eq!(config.steps.build, "npm run build");
        assert_eq!(config.steps.install, "npm install");
        assert_eq!(config.steps.dev, "npm run dev");
        assert_eq!(config.project.dist_dir, PathBuf::from("dist"));
        assert!(!config.general.verbose);
        assert_eq!(config.general.color, ColorChoice::Auto);
        assert_eq!(config.tool.fallback_subdir, PathBuf::from("nodejs"));
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
verbose = true
color = "never"

[project]
root = "site"
dist_dir = "build"

[tool]
program = "pnpm"

[steps]
check = "pnpm run lint"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.tool.program, "pnpm");
        assert_eq!(config.steps.check, "pnpm run lint");
        // Unspecified steps keep their defaults
        assert_eq!(config.steps.build, "npm run build");

        let base = temp_file.path().parent().unwrap();
        assert_eq!(config.project_root(), base.join("site"));
        assert_eq!(config.dist_path(), base.join("site").join("build"));
    }

    #[tokio::test]
    async fn test_load_from_dir_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_dir(dir.path()).await.unwrap();
        assert_eq!(config.tool.program, "npm");
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from_file(&dir.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            sitebuild_errors::Error::Config(sitebuild_errors::ConfigError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_io_error_not_missing() {
        let dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        let err = Config::load_from_file(dir.path()).await.unwrap_err();
        match err {
            sitebuild_errors::Error::Io { path, .. } => {
                assert_eq!(path.as_deref(), Some(dir.path()));
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[general\nverbose = ").unwrap();
        let err = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }

    #[tokio::test]
    async fn test_blank_step_command_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[steps]\nbuild = \"  \"").unwrap();
        let err = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(err.to_string().contains("build"));
    }

    #[test]
    fn test_merge_env() {
        let mut config = Config::default();
        config
            .merge_env_with(lookup(&[
                ("SITEBUILD_PROJECT_ROOT", "/srv/site"),
                ("SITEBUILD_DIST_DIR", "public"),
                ("SITEBUILD_TOOL", "yarn"),
                ("SITEBUILD_VERBOSE", "yes"),
                ("SITEBUILD_COLOR", "always"),
            ]))
            .unwrap();

        assert_eq!(config.project_root(), PathBuf::from("/srv/site"));
        assert_eq!(config.dist_path(), PathBuf::from("/srv/site/public"));
        assert_eq!(config.tool.program, "yarn");
        assert!(config.general.verbose);
        assert_eq!(config.general.color, ColorChoice::Always);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = Config::default();
        assert!(config
            .merge_env_with(lookup(&[("SITEBUILD_VERBOSE", "sometimes")]))
            .is_err());

        let mut config = Config::default();
        assert!(config
            .merge_env_with(lookup(&[("SITEBUILD_COLOR", "purple")]))
            .is_err());

        let mut config = Config::default();
        assert!(config
            .merge_env_with(lookup(&[("SITEBUILD_TOOL", "")]))
            .is_err());
    }
}
