use bat::WrappingMode;
use cliclack::spinner;
use console::style;
use relay::steps::{AgentRole, StepRecord};
use relay::RelayError;

/// Where a pipeline run is shown to the user
pub trait Surface {
    fn render_step(&mut self, step: &StepRecord);
    fn render_output(&mut self, output: &str);
    fn render_error(&mut self, error: &RelayError);
    fn show_busy(&mut self, message: &str);
    fn hide_busy(&mut self);
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    fn bat_theme(self) -> &'static str {
        match self {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}

pub struct TerminalSurface {
    spinner: Option<cliclack::ProgressBar>,
    theme: Theme,
}

impl TerminalSurface {
    pub fn new(theme: Theme) -> Self {
        Self {
            spinner: None,
            theme,
        }
    }
}

fn print_markdown(content: &str, theme: &str, title: Option<&str>) {
    let mut input = bat::Input::from_bytes(content.as_bytes());
    if let Some(title) = title {
        input = input.name(title);
    }

    let printed = bat::PrettyPrinter::new()
        .input(input)
        .theme(theme)
        .language("Markdown")
        .grid(title.is_some())
        .header(title.is_some())
        .wrapping_mode(WrappingMode::Character)
        .print();

    if let Err(e) = printed {
        tracing::warn!("Falling back to plain output: {}", e);
        println!("{}", content);
    }
}

fn styled_header(step: &StepRecord) -> String {
    let agent = match step.agent {
        AgentRole::System => style(step.agent.to_string()).red().bold(),
        _ => style(step.agent.to_string()).green().bold(),
    };
    format!(
        "{} — {} [{}]",
        style(step.display_time()).dim(),
        agent,
        step.action
    )
}

impl Surface for TerminalSurface {
    fn render_step(&mut self, step: &StepRecord) {
        println!("{}", styled_header(step));
        print_markdown(&step.content, self.theme.bat_theme(), None);
        println!();
    }

    fn render_output(&mut self, output: &str) {
        print_markdown(output, self.theme.bat_theme(), Some("Final Execution Timeline"));
        println!();
    }

    fn render_error(&mut self, error: &RelayError) {
        eprintln!("{} {}", style("Pipeline failed:").red().bold(), error);
    }

    fn show_busy(&mut self, message: &str) {
        self.hide_busy();
        let spin = spinner();
        spin.start(message);
        self.spinner = Some(spin);
    }

    fn hide_busy(&mut self) {
        if let Some(spin) = self.spinner.take() {
            spin.stop("");
        }
    }
}

/// Spinner text for whatever the pipeline does after `action`
pub fn next_activity(last_action: Option<&str>) -> &'static str {
    match last_action {
        None => "Agent Alpha is drafting a strategy",
        Some("generated strategy") => "Agent Alpha is uploading the strategy",
        Some("uploaded") => "Agent Beta is retrieving the strategy",
        Some("retrieved strategy") => "Agent Beta is expanding objectives",
        Some("expanded objectives") => "Agent Gamma is building the timeline",
        Some(_) => "finishing up",
    }
}
