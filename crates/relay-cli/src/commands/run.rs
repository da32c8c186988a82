use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use relay::providers::openai::OpenAiProvider;
use relay::tools::HttpToolClient;
use relay::{Pipeline, RunStatus};

use crate::configuration::Settings;
use crate::render::{next_activity, Surface, TerminalSurface};
use crate::RunArgs;

pub async fn execute(args: RunArgs) -> Result<()> {
    let mut settings = Settings::new().context("Failed to load configuration")?;
    apply_overrides(&mut settings, &args);

    let provider = OpenAiProvider::new(settings.provider.into_config()?)?;
    let tools = HttpToolClient::new(settings.tools.into_config())?;
    tracing::info!(model = provider.model(), endpoint = tools.endpoint(), "starting pipeline");

    let pipeline = Pipeline::new(Arc::new(provider), Arc::new(tools));
    let mut surface = TerminalSurface::new(args.theme);

    match drive(pipeline, &mut surface).await? {
        RunStatus::Completed(_) => Ok(()),
        RunStatus::Failed(error) => Err(anyhow!(error)).context("Pipeline run failed"),
        status => Err(anyhow!("Pipeline stopped in unexpected state: {:?}", status)),
    }
}

fn apply_overrides(settings: &mut Settings, args: &RunArgs) {
    if let Some(model) = &args.model {
        settings.provider.model = model.clone();
    }
    if let Some(api_key) = &args.api_key {
        settings.provider.api_key = Some(api_key.clone());
    }
    if let Some(endpoint) = &args.tools_endpoint {
        settings.tools.endpoint = endpoint.clone();
    }
}

/// Run the pipeline on its own task and render every step as it lands
pub async fn drive(mut pipeline: Pipeline, surface: &mut dyn Surface) -> Result<RunStatus> {
    let mut steps = pipeline.subscribe();
    let mut handle = tokio::spawn(async move {
        pipeline.run().await;
        pipeline
    });

    surface.show_busy(next_activity(None));
    let pipeline = loop {
        tokio::select! {
            biased;
            Some(step) = steps.recv() => {
                surface.hide_busy();
                surface.render_step(&step);
                surface.show_busy(next_activity(Some(&step.action)));
            }
            joined = &mut handle => {
                break joined.context("Pipeline task panicked")?;
            }
        }
    };
    surface.hide_busy();

    // Anything appended between the last poll and the task finishing
    while let Ok(step) = steps.try_recv() {
        surface.render_step(&step);
    }

    let run = pipeline.current_run();
    match run.status() {
        RunStatus::Completed(output) => surface.render_output(output),
        RunStatus::Failed(error) => surface.render_error(error),
        _ => {}
    }

    Ok(run.status().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay::providers::base::Provider;
    use relay::steps::{AgentRole, StepRecord};
    use relay::tools::ToolClient;
    use relay::{RelayError, RelayResult};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct ScriptedProvider(Mutex<Vec<String>>);

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn complete(&self, _prompt: &str) -> RelayResult<String> {
            let mut replies = self.0.lock().unwrap();
            if replies.is_empty() {
                return Err(RelayError::upstream("no choices"));
            }
            Ok(replies.remove(0))
        }
    }

    struct ScriptedTools {
        upload: Option<Value>,
    }

    #[async_trait]
    impl ToolClient for ScriptedTools {
        async fn call_tool(&self, name: &str, _arguments: Value) -> RelayResult<Option<Value>> {
            match name {
                "upload" => Ok(self.upload.clone()),
                "retrieve" => Ok(Some(json!({"data": relay::codec::encode("PLAN-A")}))),
                other => Err(RelayError::transport(format!("unexpected tool {}", other))),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        steps: Vec<StepRecord>,
        output: Option<String>,
        error: Option<RelayError>,
        busy_messages: Vec<String>,
        busy: bool,
    }

    impl Surface for RecordingSurface {
        fn render_step(&mut self, step: &StepRecord) {
            self.steps.push(step.clone());
        }

        fn render_output(&mut self, output: &str) {
            self.output = Some(output.to_string());
        }

        fn render_error(&mut self, error: &RelayError) {
            self.error = Some(error.clone());
        }

        fn show_busy(&mut self, message: &str) {
            self.busy = true;
            self.busy_messages.push(message.to_string());
        }

        fn hide_busy(&mut self) {
            self.busy = false;
        }
    }

    fn pipeline(replies: &[&str], upload: Option<Value>) -> Pipeline {
        let provider = ScriptedProvider(Mutex::new(
            replies.iter().map(|reply| reply.to_string()).collect(),
        ));
        Pipeline::new(Arc::new(provider), Arc::new(ScriptedTools { upload }))
    }

    #[tokio::test]
    async fn test_drive_renders_every_step_and_output() {
        let mut surface = RecordingSurface::default();
        let status = drive(
            pipeline(
                &["PLAN-A", "OBJ-B", "TIMELINE-C"],
                Some(json!({"root": {"/": "cid123"}})),
            ),
            &mut surface,
        )
        .await
        .unwrap();

        assert_eq!(status, RunStatus::Completed("TIMELINE-C".to_string()));
        assert_eq!(surface.steps.len(), 5);
        assert_eq!(surface.output.as_deref(), Some("TIMELINE-C"));
        assert!(surface.error.is_none());
        assert!(!surface.busy);
        assert_eq!(surface.busy_messages[0], next_activity(None));
    }

    #[tokio::test]
    async fn test_drive_renders_failure() {
        let mut surface = RecordingSurface::default();
        let status = drive(pipeline(&["PLAN-A"], Some(json!({}))), &mut surface)
            .await
            .unwrap();

        assert_eq!(status, RunStatus::Failed(RelayError::pipeline("upload failed")));
        assert_eq!(surface.steps.len(), 2);
        assert_eq!(surface.steps[1].agent, AgentRole::System);
        assert_eq!(surface.error, Some(RelayError::pipeline("upload failed")));
        assert!(surface.output.is_none());
    }
}
