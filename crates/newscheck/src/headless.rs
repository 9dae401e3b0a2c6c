use analysis_client::{AnalysisController, AnalysisService, ControllerConfig};
use std::io::Write;

use crate::ui::plain_lines;

/// One analysis without the TUI. Failures surface as the user-facing message.
pub(crate) async fn run_headless(
    service: &dyn AnalysisService,
    config: ControllerConfig,
    text: &str,
    url: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut controller = AnalysisController::new(config);
    match controller.submit(service, text, url).await {
        Ok(Some(view)) => {
            for line in plain_lines(view) {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Ok(None) => anyhow::bail!("analysis already in progress"),
        Err(err) => anyhow::bail!(err.user_message()),
    }
}

pub(crate) async fn run_health(
    service: &dyn AnalysisService,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let status = service
        .health()
        .await
        .map_err(|err| anyhow::anyhow!(err.user_message()))?;
    writeln!(
        out,
        "status: {}\nai_model_available: {}",
        status.status, status.ai_model_available
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_client::AnalysisError;
    use async_trait::async_trait;
    use protocol::config::ResponseSchema;
    use protocol::schema::parse_result;
    use protocol::{AnalysisRequest, AnalysisResult, HealthStatus};

    struct FixedService(Result<AnalysisResult, AnalysisError>);

    #[async_trait]
    impl AnalysisService for FixedService {
        async fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> Result<AnalysisResult, AnalysisError> {
            self.0.clone()
        }

        async fn health(&self) -> Result<HealthStatus, AnalysisError> {
            Err(AnalysisError::Network {
                detail: "refused".to_string(),
                timed_out: false,
            })
        }
    }

    #[tokio::test]
    async fn prints_rendered_result() {
        let result = parse_result(
            ResponseSchema::Predict,
            r#"{"prediction":"Real News","real_probability":88,"fake_probability":12}"#,
        )
        .expect("parse");
        let service = FixedService(Ok(result));
        let mut out = Vec::new();
        run_headless(
            &service,
            ControllerConfig::default(),
            "Reuters reports a new study",
            "",
            &mut out,
        )
        .await
        .expect("headless");
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.starts_with("Verdict: LOW RISK [LOW]\n"));
        assert!(printed.contains("Credibility score: 88%"));
    }

    #[tokio::test]
    async fn validation_failure_is_reported() {
        let service = FixedService(Err(AnalysisError::MalformedResponse("x".to_string())));
        let mut out = Vec::new();
        let err = run_headless(&service, ControllerConfig::default(), "", "", &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter some text to analyze.");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn health_failure_uses_user_message() {
        let service = FixedService(Err(AnalysisError::MalformedResponse("x".to_string())));
        let mut out = Vec::new();
        let err = run_health(&service, &mut out).await.unwrap_err();
        assert!(err.to_string().contains("check your connection"));
    }
}
