//! Title, problem statement, architecture overview and design philosophy.

use crate::error::Result;
use crate::layout::{BulletStyle, SlideBuilder, TextStyle};
use crate::palette::{BLUE, DARK, GRAY};
use crate::types::Slide;
use crate::units::{inches, Emu};

pub(super) fn title(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);

    b.bar(Emu::ZERO, Emu::ZERO, inches(13.333), inches(0.08), BLUE);
    b.text(
        inches(0.8),
        inches(1.8),
        inches(11.0),
        inches(1.0),
        "Agentic AI Testing Architecture",
        TextStyle::sized(40.0, BLUE).bold(),
    );
    b.text(
        inches(0.8),
        inches(2.8),
        inches(11.0),
        inches(0.6),
        "for Automated Tool Validation",
        TextStyle::sized(28.0, DARK),
    );

    // Divider
    b.bar(inches(0.8), inches(3.6), inches(2.5), inches(0.04), BLUE);

    b.text(
        inches(0.8),
        inches(3.9),
        inches(11.0),
        inches(0.5),
        "A Meta-Testing Platform -- It tests applications AND it tests itself.",
        TextStyle::sized(18.0, GRAY),
    );
    b.bullets(
        inches(0.8),
        inches(4.7),
        inches(10.0),
        &[
            "Accuracy -- AI quality is measured, not assumed",
            "Autonomy -- Minimal human intervention for routine testing",
            "Trust -- Every AI decision is auditable and traceable",
        ],
        BulletStyle::new().size(18.0).color(DARK).spacing(8.0),
    );
    b.text(
        inches(0.8),
        inches(6.3),
        inches(6.0),
        inches(0.3),
        "Testing Architect Presentation  |  February 2026",
        TextStyle::sized(12.0, GRAY),
    );
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn problem_statement(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Problem Statement");
    b.subtitle("Why we need an Agentic AI Testing Platform");

    b.simple_table(
        inches(0.6),
        inches(1.5),
        inches(12.0),
        0.45,
        &["Challenge", "Impact on Testing"],
        &[
            &[
                "Manual test design doesn't scale",
                "QA becomes the bottleneck as sprints accelerate; coverage gaps widen silently",
            ],
            &[
                "Jira stories are ambiguous",
                "35% have missing acceptance criteria; 60% miss negative/edge scenarios",
            ],
            &[
                "Automation scripts break frequently",
                "42% of failures are just broken locators; teams spend more time fixing than writing tests",
            ],
            &[
                "No confidence in AI-generated tests",
                "No framework to measure hallucination, coverage, or format consistency",
            ],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(4.2),
        inches(12.0),
        inches(0.4),
        "The Goal:",
        TextStyle::sized(18.0, BLUE).bold(),
    );
    b.bullets(
        inches(0.6),
        inches(4.6),
        inches(11.0),
        &[
            "Scale test design without scaling the team",
            "Detect and flag ambiguous requirements automatically",
            "Self-heal broken automation scripts when UI changes",
            "Measure AI quality with empirical metrics (golden datasets, hallucination rate, coverage scores)",
            "Build a feedback loop so the system improves with every cycle",
        ],
        BulletStyle::new(),
    );
    b.slide_number(number);

    Ok(b.finish())
}

const LAYERS: [(&str, &str); 5] = [
    (
        "Layer 5: Control Plane",
        "Supervisor Agent -- Coordinates all agents, makes decisions, triggers retries/escalations",
    ),
    (
        "Layer 4: Analysis & Metrics",
        "AI Metrics + Execution Metrics -- Measures accuracy, coverage, hallucination, pass rate, flakiness",
    ),
    (
        "Layer 3: Automation & Execution",
        "Script Agent + Execution Engine + RCA Agent -- Generates code, runs tests, analyzes failures",
    ),
    (
        "Layer 2: Agentic AI",
        "Requirement Agent + Test Case Agent + Feedback Loop -- Understands stories, generates test cases, learns",
    ),
    (
        "Layer 1: Input",
        "Jira Connector + Parser + Validator + Normalizer -- Fetches, validates, standardizes input data",
    ),
];

pub(super) fn high_level_architecture(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("High-Level Architecture");
    b.subtitle("5 independent, testable layers");

    let mut y = inches(1.6);
    for (name, description) in LAYERS {
        b.panel(inches(0.6), y, inches(12.0), inches(0.8));
        // Left accent
        b.bar(inches(0.6), y, inches(0.06), inches(0.8), BLUE);
        b.text(
            inches(0.85),
            y + inches(0.05),
            inches(3.5),
            inches(0.35),
            name,
            TextStyle::sized(15.0, BLUE).bold(),
        );
        b.text(
            inches(0.85),
            y + inches(0.38),
            inches(11.5),
            inches(0.35),
            description,
            TextStyle::sized(13.0, DARK),
        );
        y += inches(0.92);
    }

    b.text(
        inches(0.6),
        inches(6.3),
        inches(12.0),
        inches(0.4),
        "Each layer is independently testable. Data flows down, feedback flows up. Integration boundaries are explicit contract test points.",
        TextStyle::sized(13.0, GRAY).italic(),
    );
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn design_philosophy(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Agentic AI Design Philosophy");
    b.subtitle("Multiple specialized agents coordinated by a supervisor agent");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Autonomous Execution",
        &[
            "Agents act without step-by-step human instructions",
            "Goal-driven, not rule-driven",
            "Pipeline runs end-to-end on its own",
            "Each agent has authority to proceed, retry, or escalate",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Decision-Making Capability",
        &[
            "Each agent decides and logs its choices",
            "Confidence scores enable smart routing",
            "Decisions are explainable and reversible",
            "Bounded autonomy -- agents can't do catastrophic things",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Feedback-Driven Improvement",
        &[
            "Execution results feed back into prompts",
            "Thresholds adjust based on real outcomes",
            "System measurably improves each cycle",
            "Prompt regression tests prevent degradation",
        ],
    );

    b.text(
        inches(0.6),
        inches(4.5),
        inches(12.0),
        inches(0.4),
        "Why Multi-Agent (not Monolithic)?",
        TextStyle::sized(18.0, BLUE).bold(),
    );
    b.bullets(
        inches(0.6),
        inches(4.9),
        inches(11.0),
        &[
            "Each agent fails independently -- no single point of failure for the whole system",
            "Each agent is testable in isolation with its own golden dataset and metrics",
            "Agents can scale independently (e.g., 5 execution workers but only 1 RCA agent)",
            "Clear responsibility boundaries make debugging and auditing straightforward",
        ],
        BulletStyle::new().size(14.0),
    );
    b.slide_number(number);

    Ok(b.finish())
}
