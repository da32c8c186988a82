use std::sync::Arc;

use tokio::sync::mpsc;

use crate::codec;
use crate::errors::{RelayError, RelayResult};
use crate::prompts;
use crate::providers::base::Provider;
use crate::steps::{AgentRole, StepLog, StepRecord};
use crate::tools::storage::{self, RetrievedFile, UploadReceipt};
use crate::tools::ToolClient;

/// Name the strategy is stored under on the tool endpoint
pub const STRATEGY_FILE: &str = "strategy.txt";

/// Where a run is in its lifecycle. Output and error are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed(String),
    Failed(RelayError),
}

/// Everything one invocation of the pipeline produced
#[derive(Debug, Default)]
pub struct PipelineRun {
    log: StepLog,
    status: RunStatus,
}

impl PipelineRun {
    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn steps(&self) -> &[StepRecord] {
        self.log.snapshot()
    }

    pub fn output(&self) -> Option<&str> {
        match &self.status {
            RunStatus::Completed(output) => Some(output),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RelayError> {
        match &self.status {
            RunStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    fn start(&mut self) {
        self.log.reset();
        self.status = RunStatus::Running;
    }

    fn record(&mut self, agent: AgentRole, action: &str, content: &str) {
        let record = self.log.append(agent, action, content);
        tracing::info!(agent = %record.agent, action = %record.action, "pipeline step");
    }
}

/// Runs the fixed strategy → upload → retrieve → objectives → timeline chain.
///
/// [`run`](Pipeline::run) borrows the pipeline mutably, so a single instance
/// can never have two runs in flight. A surface that wants to watch progress
/// calls [`subscribe`](Pipeline::subscribe) before starting and drives the
/// run on its own task.
pub struct Pipeline {
    provider: Arc<dyn Provider>,
    tools: Arc<dyn ToolClient>,
    run: PipelineRun,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<dyn ToolClient>) -> Self {
        Self {
            provider,
            tools,
            run: PipelineRun::default(),
        }
    }

    /// The current (or most recent) run
    pub fn current_run(&self) -> &PipelineRun {
        &self.run
    }

    /// Receive every step record appended from now on, across runs
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StepRecord> {
        self.run.log.subscribe()
    }

    /// Execute the whole chain once, replacing the previous run.
    ///
    /// Failures never escape: they end up as the run's error along with a
    /// trailing `System`/`error` step.
    pub async fn run(&mut self) -> &PipelineRun {
        self.run.start();
        tracing::info!("pipeline started");

        match self.execute().await {
            Ok(timeline) => {
                tracing::info!("pipeline completed");
                self.run.status = RunStatus::Completed(timeline);
            }
            Err(error) => {
                tracing::error!(%error, "pipeline failed");
                self.run
                    .record(AgentRole::System, "error", &error.to_string());
                self.run.status = RunStatus::Failed(error);
            }
        }

        &self.run
    }

    async fn execute(&mut self) -> RelayResult<String> {
        let strategy = self
            .ask(AgentRole::Alpha, &prompts::strategy_prompt())
            .await?;
        self.run
            .record(AgentRole::Alpha, "generated strategy", &strategy);

        let cid = self.upload(&strategy).await?;
        self.run
            .record(AgentRole::Alpha, "uploaded", &format!("CID: {}", cid));

        let retrieved = self.retrieve(&cid).await?;
        self.run
            .record(AgentRole::Beta, "retrieved strategy", &retrieved);

        let objectives = self
            .ask(AgentRole::Beta, &prompts::objectives_prompt(&retrieved))
            .await?;
        self.run
            .record(AgentRole::Beta, "expanded objectives", &objectives);

        let timeline = self
            .ask(AgentRole::Gamma, &prompts::timeline_prompt(&objectives))
            .await?;
        self.run
            .record(AgentRole::Gamma, "execution timeline", &timeline);

        Ok(timeline)
    }

    async fn ask(&self, agent: AgentRole, prompt: &str) -> RelayResult<String> {
        tracing::debug!(%agent, prompt, "thinking");
        self.provider.complete(prompt).await
    }

    async fn upload(&self, text: &str) -> RelayResult<String> {
        let arguments = storage::upload_arguments(&codec::encode(text), STRATEGY_FILE);
        let payload = self
            .tools
            .call_tool(storage::UPLOAD_TOOL, arguments)
            .await?;

        Ok(UploadReceipt::from_payload(payload)?.root.cid)
    }

    async fn retrieve(&self, cid: &str) -> RelayResult<String> {
        let arguments = storage::retrieve_arguments(cid, STRATEGY_FILE);
        let payload = self
            .tools
            .call_tool(storage::RETRIEVE_TOOL, arguments)
            .await?;

        let file = RetrievedFile::from_payload(payload)?;
        Ok(codec::decode(&file.data)?)
    }
}
