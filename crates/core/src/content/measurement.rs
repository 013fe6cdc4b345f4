//! Metrics, supervision and the feedback loop.

use crate::error::Result;
use crate::layout::{BulletStyle, SlideBuilder, TextStyle};
use crate::palette::{BLUE, DARK, GRAY};
use crate::types::{Alignment, Slide};
use crate::units::inches;

pub(super) fn ai_metrics(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 7: AI Metrics Framework");
    b.subtitle("AI quality is measured, not assumed -- every AI decision has a quality score");

    b.simple_table(
        inches(0.6),
        inches(1.6),
        inches(12.0),
        0.5,
        &["AI Metric", "What It Measures", "How We Measure", "Target"],
        &[
            &[
                "Requirement Accuracy",
                "How well the agent extracts acceptance criteria",
                "Compare output vs human-verified golden dataset",
                ">= 85%",
            ],
            &[
                "Test Coverage Score",
                "How thoroughly TCs cover all scenarios",
                "Weighted: positive (40%) + negative (35%) + edge (25%)",
                ">= 85%",
            ],
            &[
                "Hallucination Rate",
                "AI content with no basis in input data",
                "Trace every output item to source; no mapping = hallucination",
                "< 5%",
            ],
            &[
                "Decision Confidence",
                "Agent's self-reported certainty",
                "Score 0.0-1.0 emitted with every output",
                ">= 0.85 avg",
            ],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(3.9),
        inches(12.0),
        inches(0.4),
        "Confidence-Based Routing (How the system uses these metrics):",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.simple_table(
        inches(0.6),
        inches(4.35),
        inches(12.0),
        0.4,
        &["Confidence Score", "What Happens", "Human Involvement"],
        &[
            &[
                ">= 0.85",
                "Auto-proceed to next agent -- no delay",
                "None required",
            ],
            &[
                "0.70 - 0.84",
                "Proceed but flag for optional review",
                "Optional -- QA can review if available",
            ],
            &[
                "< 0.70",
                "BLOCK pipeline -- require human approval before continuing",
                "Mandatory -- must approve or reject",
            ],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(5.65),
        inches(12.0),
        inches(0.4),
        "Why this matters:",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.bullets(
        inches(0.6),
        inches(5.95),
        inches(11.0),
        &[
            "Without this framework, we're trusting AI blindly -- no way to know if quality is improving or degrading",
            "Golden datasets provide ground truth -- not opinions, but empirical data",
            "Trends over time prove the feedback loop is working (or expose when it isn't)",
            "Enables compliance: every AI decision has a measurable quality score in the audit trail",
        ],
        BulletStyle::new().size(14.0),
    );
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn execution_metrics(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Automation Execution Metrics");
    b.subtitle(
        "AI metrics tell us: are we generating the right tests?  Execution metrics tell us: are they running reliably?",
    );

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(5.7),
        inches(2.2),
        "Execution Metrics",
        &[
            "Pass / Fail Rate -- target >= 90% (with failure classification)",
            "Retry Recovery Rate -- target >= 60% (transient vs real failures)",
            "Avg Execution Time per Test -- target < 45 seconds",
            "Parallel Efficiency -- target >= 70% of theoretical speedup",
            "Suite Completion Rate -- target >= 98%",
        ],
    );
    b.section_box(
        inches(6.7),
        inches(1.6),
        inches(5.7),
        inches(2.2),
        "Stability Metrics",
        &[
            "Flaky Test Rate -- target < 5% (root: timing 45%, data 25%, env 20%)",
            "Auto-Heal Success -- target >= 70% of broken locators fixed",
            "Script Regen Success -- target >= 80% when app flow changes",
            "Reduce flakiness by 20% each month until < 2%",
            "Track per-test flakiness history over last 10 runs",
        ],
    );

    b.text(
        inches(0.6),
        inches(4.2),
        inches(12.0),
        inches(0.4),
        "Correlation Analysis (the real insight):",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.simple_table(
        inches(0.6),
        inches(4.6),
        inches(12.0),
        0.45,
        &["AI Quality", "Execution Quality", "What This Means", "Action to Take"],
        &[
            &[
                "High accuracy",
                "Low pass rate",
                "Environment / infrastructure problem",
                "Fix infra, not the tests",
            ],
            &[
                "Low accuracy",
                "High pass rate",
                "Coverage gap -- tests pass but miss real bugs",
                "Improve AI prompts and golden datasets",
            ],
            &[
                "High hallucination",
                "High pass rate",
                "False confidence -- invented tests happen to pass",
                "Audit test cases against actual requirements",
            ],
            &[
                "Low confidence",
                "Low pass rate",
                "Expected -- agent knew it was uncertain",
                "Route low-confidence items to human review",
            ],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn supervisor(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Supervisor / Orchestrator Agent");
    b.subtitle("This agent makes the system truly autonomous");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(3.7),
        inches(2.7),
        "Coordinates All Agents",
        &[
            "Agent A finishes --> trigger Agent B",
            "Pass outputs between agents correctly",
            "Manage dependencies and ordering",
            "Handle concurrent pipelines (20+ stories)",
            "Persist state for crash recovery",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(1.6),
        inches(3.7),
        inches(2.7),
        "Makes System-Level Decisions",
        &[
            "Confidence >= 0.85: auto-proceed",
            "Confidence 0.70-0.84: proceed + flag",
            "Confidence < 0.70: block, escalate",
            "Timeout: retry with backoff (max 3)",
            "Fatal error: skip + alert operator",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(1.6),
        inches(3.7),
        inches(2.7),
        "Human-in-Loop Escalation",
        &[
            "Low confidence on P0/critical story",
            "3+ consecutive agent failures",
            "Hallucination rate spikes above 10%",
            "Auto-created Blocker severity defect",
            "Channels: Slack, email, Jira, PagerDuty",
        ],
    );

    b.text(
        inches(0.6),
        inches(4.7),
        inches(12.0),
        inches(0.4),
        "Pipeline States:",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.text(
        inches(0.6),
        inches(5.1),
        inches(12.0),
        inches(0.5),
        "INGESTING  -->  INTERPRETING  -->  DESIGNING  -->  SCRIPTING  -->  EXECUTING  -->  ANALYZING  -->  REPORTING  -->  COMPLETE",
        TextStyle::sized(16.0, DARK).bold().align(Alignment::Center),
    );
    b.text(
        inches(0.6),
        inches(5.55),
        inches(12.0),
        inches(0.3),
        "Each state transition is logged with timestamp, input, confidence, and decision rationale. Full audit trail.",
        TextStyle::sized(13.0, GRAY).italic().align(Alignment::Center),
    );

    b.simple_table(
        inches(0.6),
        inches(6.0),
        inches(8.0),
        0.35,
        &["Metric", "Target"],
        &[
            &[
                "Decision Accuracy",
                ">= 95% (validated against decision golden dataset)",
            ],
            &[
                "Pipeline Completion Rate",
                ">= 95% of pipelines reach COMPLETE state",
            ],
            &[
                "Escalation Rate",
                "< 15% (too high = alert fatigue, too low = blind trust)",
            ],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn feedback_loop(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Feedback Loop & Continuous Learning");
    b.subtitle("The system gets measurably better over time");

    // The loop
    b.panel(inches(0.6), inches(1.5), inches(12.0), inches(0.8));
    b.text(
        inches(0.8),
        inches(1.55),
        inches(11.5),
        inches(0.6),
        "Execution Results   -->   Metrics Analysis   -->   Identify Weak Areas   -->   Tune Prompts   -->   Better Output   -->   Repeat",
        TextStyle::sized(17.0, BLUE).bold().align(Alignment::Center),
    );

    b.section_box(
        inches(0.6),
        inches(2.6),
        inches(3.7),
        inches(2.5),
        "What Gets Tuned",
        &[
            "LLM prompts (add rules, examples,",
            "  constraints, few-shot samples)",
            "Confidence thresholds (reduce false",
            "  escalations, increase autonomy)",
            "Retry strategies (extend waits vs",
            "  full retry based on failure type)",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(2.6),
        inches(3.7),
        inches(2.5),
        "Testing the Feedback Loop",
        &[
            "Prompt regression testing: every",
            "  prompt change vs golden dataset",
            "Model drift detection: daily canary",
            "  tests detect LLM behavior shifts",
            "Historical benchmark: monthly data",
            "  proves improvement or exposes drift",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(2.6),
        inches(3.7),
        inches(2.5),
        "Safeguards",
        &[
            "Prompt version control (Git-tracked)",
            "Rollback to previous version < 5 min",
            "No prompt deploy without regression",
            "  test passing first",
            "Monthly benchmarks: prove the loop",
            "  is actually improving, not degrading",
        ],
    );

    b.text(
        inches(0.6),
        inches(5.4),
        inches(12.0),
        inches(0.3),
        "Key Principle: Treat prompts like code -- version control, test, review, deploy, rollback.",
        TextStyle::sized(15.0, BLUE).bold(),
    );

    b.simple_table(
        inches(0.6),
        inches(5.85),
        inches(12.0),
        0.38,
        &["Metric", "Month 1", "Month 2", "Month 3", "Trend"],
        &[
            &["Requirement Accuracy", "78%", "83%", "87%", "Improving (+9%)"],
            &["Hallucination Rate", "9%", "5%", "3%", "Improving (-6%)"],
            &["Test Coverage Score", "72%", "78%", "84%", "Improving (+12%)"],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}
