//! End-to-end flow, the metrics dashboard and the closing slide.

use crate::error::Result;
use crate::layout::{BulletStyle, SlideBuilder, TextStyle};
use crate::palette::{BLUE, DARK, GRAY, WHITE};
use crate::types::{Alignment, Slide};
use crate::units::inches;

const STEPS: [(&str, &str); 8] = [
    ("1. Jira Story", "Input arrives"),
    ("2. Ingest & Validate", "Parse, check, normalize"),
    ("3. Understand Req.", "Extract AC, flag ambiguity"),
    ("4. Design Test Cases", "Positive/negative/edge"),
    ("5. Generate Scripts", "Playwright/Selenium code"),
    ("6. Execute Tests", "Parallel, cross-browser"),
    ("7. Analyze & RCA", "Root cause, evidence"),
    ("8. Metrics & Learn", "Feedback, improve"),
];

pub(super) fn end_to_end_flow(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("End-to-End Data Flow");
    b.subtitle("From Jira story to measured test results -- the complete pipeline");

    let y = inches(1.5);
    for (i, (name, description)) in STEPS.iter().enumerate() {
        let x = inches(0.4) + inches(i as f64 * 1.58);
        b.panel(x, y, inches(1.4), inches(1.3));
        b.text(
            x + inches(0.05),
            y + inches(0.1),
            inches(1.3),
            inches(0.5),
            name,
            TextStyle::sized(11.0, BLUE).bold().align(Alignment::Center),
        );
        b.text(
            x + inches(0.05),
            y + inches(0.65),
            inches(1.3),
            inches(0.5),
            description,
            TextStyle::sized(10.0, GRAY).align(Alignment::Center),
        );
        if i + 1 < STEPS.len() {
            b.text(
                x + inches(1.4),
                y + inches(0.35),
                inches(0.2),
                inches(0.3),
                ">",
                TextStyle::sized(16.0, BLUE).bold().align(Alignment::Center),
            );
        }
    }

    b.text(
        inches(0.6),
        inches(3.1),
        inches(12.0),
        inches(0.4),
        "At Every Step:",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.bullets(
        inches(0.6),
        inches(3.45),
        inches(5.5),
        &[
            "Input validated against schema before processing",
            "Output carries a confidence score (0.0 - 1.0)",
            "Supervisor monitors progress and decides next action",
            "Metrics captured and sent to dashboard in real time",
        ],
        BulletStyle::new().size(13.0),
    );

    b.text(
        inches(6.7),
        inches(3.1),
        inches(6.0),
        inches(0.4),
        "Quality Gates at Each Boundary:",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.bullets(
        inches(6.7),
        inches(3.45),
        inches(5.5),
        &[
            "Confidence < 0.70: pipeline pauses for human review",
            "Hallucination detected: alert + investigation triggered",
            "Compilation failure: auto-retry with different strategy",
            "RCA classifies infra issue: no false bug filed in Jira",
        ],
        BulletStyle::new().size(13.0),
    );

    // Summary row
    b.panel(inches(0.6), inches(5.3), inches(12.0), inches(0.6));
    b.text(
        inches(0.8),
        inches(5.35),
        inches(11.5),
        inches(0.5),
        "The feedback arrow: Step 8 results feed back into Steps 2-5, tuning prompts and thresholds so the next cycle is measurably better.",
        TextStyle::sized(14.0, DARK).italic().align(Alignment::Center),
    );
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn metrics_dashboard(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Complete Metrics Dashboard");
    b.subtitle("All metrics in one view -- AI quality, execution quality, and operations");

    let label = TextStyle::sized(15.0, BLUE).bold();

    b.text(
        inches(0.6),
        inches(1.5),
        inches(5.0),
        inches(0.35),
        "AI Quality Metrics",
        label.clone(),
    );
    b.simple_table(
        inches(0.6),
        inches(1.85),
        inches(5.7),
        0.35,
        &["Metric", "Target", "Current"],
        &[
            &["Requirement Accuracy", ">= 85%", "87.3%"],
            &["Test Coverage Score", ">= 85%", "83.6%"],
            &["Hallucination Rate", "< 5%", "3.2%"],
            &["Decision Confidence", ">= 0.85", "0.88"],
        ],
    )?;

    b.text(
        inches(6.7),
        inches(1.5),
        inches(5.0),
        inches(0.35),
        "Execution Metrics",
        label.clone(),
    );
    b.simple_table(
        inches(6.7),
        inches(1.85),
        inches(5.7),
        0.35,
        &["Metric", "Target", "Current"],
        &[
            &["Pass Rate", ">= 90%", "88.4%"],
            &["Flakiness", "< 5%", "4.6%"],
            &["Auto-Heal Success", ">= 70%", "73%"],
            &["Parallel Efficiency", ">= 70%", "83%"],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(3.7),
        inches(5.0),
        inches(0.35),
        "Operations Metrics",
        label.clone(),
    );
    b.simple_table(
        inches(0.6),
        inches(4.05),
        inches(5.7),
        0.35,
        &["Metric", "Target", "Current"],
        &[
            &["Pipeline Completion", ">= 95%", "96.2%"],
            &["Mean Time per Story", "< 15 min", "12 min"],
            &["Escalation Rate", "< 15%", "12%"],
        ],
    )?;

    b.text(
        inches(6.7),
        inches(3.7),
        inches(5.0),
        inches(0.35),
        "3-Month Learning Trend",
        label,
    );
    b.simple_table(
        inches(6.7),
        inches(4.05),
        inches(5.7),
        0.35,
        &["Metric", "Month 1", "Month 3", "Change"],
        &[
            &["Requirement Accuracy", "78%", "87%", "+9%"],
            &["Hallucination Rate", "9%", "3%", "-6%"],
            &["Pass Rate", "80%", "89%", "+9%"],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(5.5),
        inches(12.0),
        inches(0.3),
        "Every metric has: a target, an alert threshold, an associated corrective action, and a trend line. No vanity metrics.",
        TextStyle::sized(14.0, GRAY).italic(),
    );
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn value_and_closing(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Architecture Value & Closing");
    b.subtitle("Why this architecture is production-ready");

    b.simple_table(
        inches(0.6),
        inches(1.5),
        inches(12.0),
        0.5,
        &["Benefit", "What It Means", "Evidence"],
        &[
            &[
                "Scalable",
                "10 stories or 10,000 -- same platform, no extra headcount",
                "Queue-based, parallel execution, independent agent scaling",
            ],
            &[
                "Self-Healing",
                "Broken locators auto-fixed, transient failures auto-retried",
                "Auto-heal >= 70%, retry recovery >= 60%, script regen >= 80%",
            ],
            &[
                "Trustworthy AI",
                "Every AI decision is measured, audited, and explainable",
                "Golden datasets, hallucination tracking, confidence routing, audit logs",
            ],
            &[
                "Production-Ready",
                "CI/CD integrated, security hardened, monitoring live",
                "Quality gates, prompt regression in pipeline, Grafana dashboards",
            ],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(3.8),
        inches(12.0),
        inches(0.4),
        "Return on Investment:",
        TextStyle::sized(18.0, BLUE).bold(),
    );
    b.simple_table(
        inches(0.6),
        inches(4.2),
        inches(12.0),
        0.4,
        &[
            "Area",
            "Before (Manual + Traditional)",
            "After (Agentic AI Platform)",
            "Improvement",
        ],
        &[
            &[
                "Test design time per story",
                "3-5 days",
                "< 15 minutes",
                "95% reduction",
            ],
            &[
                "Script maintenance effort",
                "40% of QA time",
                "Minimal (self-healing)",
                "70% reduction",
            ],
            &[
                "Bug escape rate to production",
                "~15%",
                "< 5%",
                "67% reduction",
            ],
            &[
                "Test coverage visibility",
                "Gut feeling / unknown",
                "Measured: 84% with trend",
                "From 0% to full visibility",
            ],
        ],
    )?;

    // Closing statement
    b.bar(inches(0.6), inches(5.8), inches(12.0), inches(0.9), BLUE);
    b.text(
        inches(0.8),
        inches(5.9),
        inches(11.5),
        inches(0.7),
        "\"This architecture ensures confidence in both the application under test\nand the AI testing platform itself.\"",
        TextStyle::sized(20.0, WHITE).bold().align(Alignment::Center),
    );
    b.slide_number(number);

    Ok(b.finish())
}
