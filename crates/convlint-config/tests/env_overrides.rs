use convlint_config::LintConfig;
use convlint_core::{FailOn, ReportFormat};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("CONVLINT_RUN__CONCURRENCY", "3");
        jail.set_env("CONVLINT_REPORT__FORMAT", "json");

        let config = LintConfig::load(jail.directory(), None).expect("config loads");
        assert_eq!(config.run.concurrency, 3);
        assert_eq!(config.report.format, ReportFormat::Json);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(".convlint.toml", "[report]\nfail_on = \"blocking\"\n")?;
        jail.set_env("CONVLINT_REPORT__FAIL_ON", "warning");

        let config = LintConfig::load(jail.directory(), None).expect("config loads");
        assert_eq!(config.report.fail_on, FailOn::Warning);
        Ok(())
    });
}
