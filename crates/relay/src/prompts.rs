//! Prompt text for each completion the pipeline makes.
//!
//! These are plain functions of their inputs so they can be checked without a
//! model behind them.

use indoc::{formatdoc, indoc};

const STRATEGY_PROMPT: &str = indoc! {"
    You're a business strategist AI. Generate a product launch plan for a new AR glasses startup in 5 bullet points."};

/// Opening prompt; asks for the launch strategy
pub fn strategy_prompt() -> String {
    STRATEGY_PROMPT.to_string()
}

/// Asks for SMART objectives derived from `strategy`
pub fn objectives_prompt(strategy: &str) -> String {
    formatdoc! {"
        You're an execution planner AI. Expand this strategy into detailed SMART objectives:

        {strategy}"
    }
}

/// Asks for a seven day timeline built from `objectives`
pub fn timeline_prompt(objectives: &str) -> String {
    formatdoc! {"
        You're a project manager AI. Create a 7-day timeline based on these SMART objectives:

        {objectives}"
    }
}
