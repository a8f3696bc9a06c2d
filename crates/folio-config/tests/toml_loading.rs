//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use folio_config::FolioConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_backend_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
base_url = "https://pdf.internal:9443/"
upload_timeout_secs = 300
chat_timeout_secs = 60
user_agent = "folio-test"
"#,
        )?;

        let config: FolioConfig = Figment::from(Serialized::defaults(FolioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.base_url, "https://pdf.internal:9443/");
        assert_eq!(config.backend.origin(), "https://pdf.internal:9443");
        assert_eq!(config.backend.upload_timeout_secs, 300);
        assert_eq!(config.backend.chat_timeout_secs, 60);
        assert_eq!(config.backend.user_agent, "folio-test");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
chat_timeout_secs = 10
"#,
        )?;

        let config: FolioConfig = Figment::from(Serialized::defaults(FolioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.upload_timeout_secs, 120);
        assert_eq!(config.backend.chat_timeout_secs, 10);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".folio")?;
        jail.create_file(
            ".folio/config.toml",
            r#"
[backend]
base_url = "http://10.0.0.5:8000"
"#,
        )?;

        let config = FolioConfig::load().expect("config loads");
        assert_eq!(config.backend.base_url, "http://10.0.0.5:8000");
        Ok(())
    });
}

#[test]
fn invalid_project_file_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".folio")?;
        jail.create_file(
            ".folio/config.toml",
            r#"
[backend]
upload_timeout_secs = 0
"#,
        )?;

        let err = FolioConfig::load().unwrap_err();
        assert!(err.to_string().contains("backend.upload_timeout_secs"));
        Ok(())
    });
}
