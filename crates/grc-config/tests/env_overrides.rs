use figment::Jail;
use grc_config::GrcConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("GRC_DATABASE__PATH", ":memory:");
        jail.set_env("GRC_IMPORT__DRY_RUN", "true");
        jail.set_env("GRC_GENERAL__LOG_LEVEL", "info");

        let config = GrcConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        assert!(config.import.dry_run);
        assert_eq!(config.general.log_level, "info");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".grc")?;
        jail.create_file(
            ".grc/config.toml",
            r#"
[import]
date_format = "%d.%m.%Y"
"#,
        )?;
        jail.set_env("GRC_IMPORT__DATE_FORMAT", "%Y-%m-%d");

        let config = GrcConfig::load().expect("config loads");
        assert_eq!(config.import.date_format, "%Y-%m-%d");
        Ok(())
    });
}

#[test]
fn invalid_log_level_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("GRC_GENERAL__LOG_LEVEL", "chatty");
        assert!(GrcConfig::load().is_err());
        Ok(())
    });
}
