use std::io::{self, Write};

use console::Style;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::error::IdentityError;
use crate::resolver::ResolverFactory;
use crate::types::{CallerIdentity, Check};

#[derive(Serialize)]
struct IdentityRecord<'a> {
    check: &'a str,
    #[serde(flatten)]
    identity: &'a CallerIdentity,
}

fn write_identity(
    out: &mut impl Write,
    check: Check,
    identity: &CallerIdentity,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out)?;
            writeln!(out, "{}", Style::new().bold().apply_to(check.heading()))?;
            writeln!(out, "Account ID: {}", identity.account)?;
            writeln!(out, "User ID: {}", identity.user_id)?;
            writeln!(out, "ARN: {}", identity.arn)?;
            writeln!(out)
        }
        OutputFormat::Json => {
            let record = IdentityRecord {
                check: check.name(),
                identity,
            };
            writeln!(out, "{}", serde_json::to_string(&record)?)
        }
    }
}

fn write_failure(out: &mut impl Write, check: Check, err: &IdentityError) -> io::Result<()> {
    if let Some(hint) = check.failure_hint() {
        writeln!(out, "{}", Style::new().yellow().apply_to(hint))?;
        writeln!(out)?;
    }
    writeln!(out, "{}", err)
}

/// Builds the resolver for `check` and asks it who we are.
pub async fn run_check(
    factory: &dyn ResolverFactory,
    check: Check,
) -> Result<CallerIdentity, IdentityError> {
    let resolver = factory.resolver(check).await?;
    resolver.caller_identity().await
}

#[derive(Debug, Default)]
pub struct CheckReport {
    outcomes: Vec<(Check, Result<CallerIdentity, IdentityError>)>,
}

impl CheckReport {
    pub fn outcomes(&self) -> &[(Check, Result<CallerIdentity, IdentityError>)] {
        &self.outcomes
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, res)| res.is_err()).count()
    }

    /// Failures only affect the exit status in strict mode.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.failed() > 0 {
            1
        } else {
            0
        }
    }
}

pub struct CheckCommand;

impl CheckCommand {
    /// Runs every check in order. A failing check is printed and the next one
    /// still runs; only a broken `out` stops the pass.
    pub async fn run(
        factory: &dyn ResolverFactory,
        checks: &[Check],
        format: OutputFormat,
        out: &mut impl Write,
    ) -> io::Result<CheckReport> {
        let mut report = CheckReport::default();

        for &check in checks {
            info!(check = check.name(), "running identity check");

            let res = run_check(factory, check).await;
            match &res {
                Ok(identity) => write_identity(out, check, identity, format)?,
                Err(err) => {
                    warn!(check = check.name(), error = %err, "identity check failed");
                    write_failure(out, check, err)?;
                }
            }
            out.flush()?;

            report.outcomes.push((check, res));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use mockall::predicate::eq;
    use rusoto_core::RusotoError;
    use rusoto_credential::CredentialsError;

    use crate::legacy_sts::test as legacy;
    use crate::legacy_sts::MockLegacyStsImpl;
    use crate::resolver::{IdentityResolver, MockResolverFactory};
    use crate::sts::test as modern;
    use crate::sts::{CallOptions, MockStsImpl, StsResolver};

    fn modern_resolver(mock: MockStsImpl) -> Box<dyn IdentityResolver> {
        Box::new(StsResolver::new(mock, CallOptions::default()))
    }

    fn legacy_resolver(mock: MockLegacyStsImpl) -> Box<dyn IdentityResolver> {
        Box::new(mock)
    }

    fn render(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_legacy_check_prints_identity() {
        console::set_colors_enabled(false);

        let mut factory = MockResolverFactory::default();
        factory
            .expect_resolver()
            .with(eq(Check::Legacy))
            .return_once(|_| {
                Ok(legacy_resolver(legacy::mock_identity(
                    "111122223333",
                    "AID1",
                    "arn:aws:iam::111122223333:user/test",
                )))
            });

        let mut out = Vec::new();
        let report = CheckCommand::run(&factory, &[Check::Legacy], OutputFormat::Text, &mut out)
            .await
            .unwrap();

        similar_asserts::assert_eq!(
            render(out),
            "\nVersion 1\nAccount ID: 111122223333\nUser ID: AID1\nARN: arn:aws:iam::111122223333:user/test\n\n"
        );
        assert_eq!(report.failed(), 0);
    }

    #[tokio::test]
    async fn test_modern_check_access_denied() {
        let mut factory = MockResolverFactory::default();
        factory
            .expect_resolver()
            .with(eq(Check::Modern))
            .returning(|_| {
                let mut mock = MockStsImpl::default();
                mock.expect_get_caller_identity()
                    .return_once(|| Err(modern::access_denied()));
                Ok(modern_resolver(mock))
            });

        let err = run_check(&factory, Check::Modern).await.unwrap_err();
        assert!(err.to_string().contains("access denied"));

        let mut out = Vec::new();
        let report = CheckCommand::run(&factory, &[Check::Modern], OutputFormat::Text, &mut out)
            .await
            .unwrap();

        let out = render(out);
        assert!(out.contains("access denied"));
        assert!(!out.contains("Account ID"));
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn test_no_shared_config_failure_prints_hint_first() {
        console::set_colors_enabled(false);

        let mut factory = MockResolverFactory::default();
        factory
            .expect_resolver()
            .with(eq(Check::LegacyNoSharedConfig))
            .return_once(|_| {
                Ok(legacy_resolver(legacy::mock_failure(RusotoError::Credentials(
                    CredentialsError::new("no credentials in environment"),
                ))))
            });

        let mut out = Vec::new();
        CheckCommand::run(
            &factory,
            &[Check::LegacyNoSharedConfig],
            OutputFormat::Text,
            &mut out,
        )
        .await
        .unwrap();

        similar_asserts::assert_eq!(
            render(out),
            "You appear to be picking up AWS SSO\n\nno credentials in environment\n"
        );
    }

    #[tokio::test]
    async fn test_legacy_failure_has_no_hint() {
        let mut factory = MockResolverFactory::default();
        factory
            .expect_resolver()
            .with(eq(Check::Legacy))
            .return_once(|_| Err(IdentityError::ConfigurationLoad("bad profile".to_string())));

        let mut out = Vec::new();
        CheckCommand::run(&factory, &[Check::Legacy], OutputFormat::Text, &mut out)
            .await
            .unwrap();

        assert_eq!(render(out), "bad profile\n");
    }

    #[tokio::test]
    async fn test_all_checks_run_after_first_failure() {
        console::set_colors_enabled(false);

        let mut factory = MockResolverFactory::default();
        factory
            .expect_resolver()
            .with(eq(Check::Legacy))
            .times(1)
            .return_once(|_| {
                Ok(legacy_resolver(legacy::mock_failure(RusotoError::Validation(
                    "request signature expired".to_string(),
                ))))
            });
        factory
            .expect_resolver()
            .with(eq(Check::Modern))
            .times(1)
            .return_once(|_| {
                Ok(modern_resolver(modern::mock_identity(
                    "123456789012",
                    "AIDAMODERN",
                    "arn:aws:iam::123456789012:user/modern",
                )))
            });
        factory
            .expect_resolver()
            .with(eq(Check::LegacyNoSharedConfig))
            .times(1)
            .return_once(|_| {
                Ok(legacy_resolver(legacy::mock_identity(
                    "123456789012",
                    "AIDALEGACY",
                    "arn:aws:iam::123456789012:user/legacy",
                )))
            });

        let mut out = Vec::new();
        let report = CheckCommand::run(&factory, &Check::ALL, OutputFormat::Text, &mut out)
            .await
            .unwrap();

        let out = render(out);
        let failure = out.find("request signature expired").unwrap();
        let modern = out.find("Version 2\nAccount ID: 123456789012\nUser ID: AIDAMODERN").unwrap();
        let no_shared = out
            .find("NO AWS SSO/Identity: Version 1 NoShared\nAccount ID: 123456789012\nUser ID: AIDALEGACY")
            .unwrap();
        assert!(failure < modern);
        assert!(modern < no_shared);

        let order: Vec<Check> = report.outcomes().iter().map(|(check, _)| *check).collect();
        assert_eq!(order, Check::ALL.to_vec());
        assert_eq!(report.failed(), 1);
        assert_eq!(report.exit_code(false), 0);
        assert_eq!(report.exit_code(true), 1);
    }

    #[tokio::test]
    async fn test_json_output() {
        let mut factory = MockResolverFactory::default();
        factory
            .expect_resolver()
            .with(eq(Check::Modern))
            .return_once(|_| {
                Ok(modern_resolver(modern::mock_identity(
                    "111122223333",
                    "AID1",
                    "arn:aws:iam::111122223333:user/test",
                )))
            });

        let mut out = Vec::new();
        CheckCommand::run(&factory, &[Check::Modern], OutputFormat::Json, &mut out)
            .await
            .unwrap();

        let out = render(out);
        assert_eq!(out.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "check": "modern",
                "account": "111122223333",
                "userId": "AID1",
                "arn": "arn:aws:iam::111122223333:user/test",
            })
        );
    }

    #[test]
    fn test_exit_code_without_failures() {
        let report = CheckReport::default();

        assert_eq!(report.exit_code(true), 0);
        assert_eq!(report.exit_code(false), 0);
    }
}
