//! One slide per pipeline module, from Jira ingestion to root-cause analysis.

use crate::error::Result;
use crate::layout::{BulletStyle, SlideBuilder, TextStyle};
use crate::palette::{BLUE, GRAY};
use crate::types::Slide;
use crate::units::inches;

pub(super) fn jira_ingestion(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 1: Jira Ingestion & Validation");
    b.subtitle(
        "The entry point -- if garbage enters here, every downstream agent produces garbage",
    );

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(5.7),
        inches(2.5),
        "Responsibilities",
        &[
            "Connect to Jira via OAuth / API Token",
            "Fetch stories, bugs, tasks by ID or batch by project",
            "Validate structure -- required fields, supported formats",
            "Normalize content -- strip HTML, resolve macros, fix encoding",
            "Output canonical JSON for all downstream agents",
        ],
    );
    b.section_box(
        inches(6.7),
        inches(1.6),
        inches(5.7),
        inches(2.5),
        "Testing Focus",
        &[
            "Empty / malformed stories -- flag as incomplete, don't pass downstream",
            "Expired tokens / wrong project -- return clear auth errors (401, 403)",
            "Rate limits (429) -- backoff and retry with Retry-After header",
            "XSS payloads in story text -- sanitize, never render raw",
            "Bulk fetch 100+ stories -- pagination, no timeout, no data mixing",
        ],
    );

    b.simple_table(
        inches(0.6),
        inches(4.5),
        inches(12.0),
        0.4,
        &["Metric", "Target", "Alert Threshold", "Why It Matters"],
        &[
            &[
                "Ingestion Success Rate",
                ">= 98%",
                "< 95%",
                "Failed fetches block the entire pipeline",
            ],
            &[
                "Parsing Error Rate",
                "< 2%",
                "> 5%",
                "Malformed data corrupts downstream AI output",
            ],
            &[
                "Validation Pass Rate",
                ">= 90%",
                "< 85%",
                "Low pass rate may indicate Jira content quality issues",
            ],
            &[
                "Avg Ingestion Latency",
                "< 2 seconds",
                "> 5 seconds",
                "Slow ingestion delays the full pipeline",
            ],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn requirement_understanding(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 2: Requirement Understanding Agent");
    b.subtitle("Turning Jira stories into structured, testable knowledge");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(3.7),
        inches(2.6),
        "What It Does",
        &[
            "Extract acceptance criteria from",
            "  story body (Gherkin, bullets, prose)",
            "Identify implicit business rules",
            "  (e.g., 'login' implies auth needed)",
            "Detect ambiguity and flag vague",
            "  requirements for human review",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(1.6),
        inches(3.7),
        inches(2.6),
        "Testing Strategy",
        &[
            "Golden Story Comparison -- 50-100",
            "  stories with human-verified output",
            "Hallucination Detection -- agent must",
            "  NOT invent criteria not in the story",
            "Ambiguity Flag Accuracy -- vague",
            "  phrases flagged, clear ones passed",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(1.6),
        inches(3.7),
        inches(2.6),
        "Ambiguity Examples",
        &[
            "BAD: \"should work correctly\"",
            "BAD: \"handle errors appropriately\"",
            "BAD: \"response time acceptable\"",
            "GOOD: \"login with email & password\"",
            "GOOD: \"display name on dashboard\"",
            "Agent flags BAD, passes GOOD",
        ],
    );

    b.simple_table(
        inches(0.6),
        inches(4.6),
        inches(12.0),
        0.4,
        &["Metric", "Target", "How We Measure"],
        &[
            &[
                "Requirement Interpretation Accuracy",
                ">= 85%",
                "Compare agent output vs golden dataset (human-verified extractions)",
            ],
            &[
                "Hallucination Rate",
                "< 5%",
                "Count AI-generated items with no source mapping in the original story",
            ],
            &[
                "Ambiguity Detection F1 Score",
                ">= 80%",
                "Precision and recall of flagging vague vs clear requirements",
            ],
            &[
                "Business Rule Detection Rate",
                ">= 75%",
                "Compare detected implicit rules vs expert-identified rules",
            ],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn test_case_design(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 3: Test Case Design Agent");
    b.subtitle("Generating comprehensive, traceable test cases from structured requirements");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(5.7),
        inches(2.3),
        "What It Generates",
        &[
            "Positive path tests -- happy flow for each acceptance criterion",
            "Negative path tests -- invalid inputs, unauthorized access, timeouts",
            "Edge cases -- boundary values, empty inputs, max lengths, special characters",
            "Risk-based priority assignment (P0-P3) per test case",
            "Full Jira traceability -- every TC links back to Story ID + AC ID",
        ],
    );
    b.section_box(
        inches(6.7),
        inches(1.6),
        inches(5.7),
        inches(2.3),
        "Testing Strategy",
        &[
            "Coverage completeness -- every AC has positive + negative + edge tests",
            "Duplicate detection -- semantic similarity check (cosine > 0.85 = duplicate)",
            "Golden dataset comparison -- generated TCs vs expert-written TCs (>= 85%)",
            "Consistency -- same input 5 times produces same TC count and coverage",
            "Hallucination check -- no TCs for features not mentioned in the story",
        ],
    );

    b.simple_table(
        inches(0.6),
        inches(4.3),
        inches(12.0),
        0.4,
        &["Coverage Dimension", "What We Check", "Target"],
        &[
            &[
                "AC Coverage",
                "Every acceptance criterion has at least 1 test case",
                "100%",
            ],
            &["Positive Path", "Each AC has a happy-path test case", "100%"],
            &[
                "Negative Path",
                "Each AC has at least 1 failure-mode test case",
                ">= 90%",
            ],
            &[
                "Edge Cases",
                "Boundary values, empty inputs, max lengths",
                ">= 80%",
            ],
            &[
                "Business Rules",
                "Each identified business rule has violation scenarios",
                ">= 85%",
            ],
        ],
    )?;

    b.text(
        inches(0.6),
        inches(6.5),
        inches(12.0),
        inches(0.3),
        "Output: Structured JSON test cases with ID, title, steps, expected result, priority, confidence score, and Jira traceability.",
        TextStyle::sized(13.0, GRAY).italic(),
    );
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn automation_script(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 4: Automation Script Agent");
    b.subtitle("Converting approved test cases into production-quality executable code");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(3.7),
        inches(2.8),
        "Code Generation",
        &[
            "UI tests: Playwright / Selenium",
            "API tests: REST Assured / Supertest",
            "DB tests: Parameterized SQL queries",
            "Follows Page Object Model (POM)",
            "Uses stable locators (data-testid)",
            "Explicit waits, no hard-coded sleeps",
            "Parameterized test data, not embedded",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(1.6),
        inches(3.7),
        inches(2.8),
        "Quality Validation",
        &[
            "Syntax check -- must compile clean",
            "Locators -- robustness score >= 7/10",
            "Assertions match every expected result",
            "POM structure compliance check",
            "No hard-coded waits (sleep/timeout)",
            "ESLint / static analysis passes",
            "Test data is externalized",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(1.6),
        inches(3.7),
        inches(2.8),
        "Self-Healing Capability",
        &[
            "Broken locator: find by text/role/label",
            "App flow changed: regenerate script",
            "Confidence > 0.8: auto-apply fix",
            "Confidence < 0.8: flag for human",
            "Traditional recovery: hours to days",
            "Self-healing recovery: seconds to min",
            "Reduces maintenance effort by 70%",
        ],
    );

    b.simple_table(
        inches(0.6),
        inches(4.8),
        inches(12.0),
        0.4,
        &["Metric", "Target", "What It Validates"],
        &[
            &[
                "Script Compilation Success Rate",
                ">= 95%",
                "Generated code must actually compile and run",
            ],
            &[
                "Locator Robustness Score (avg)",
                ">= 7/10",
                "data-testid=10, id=8, CSS=5, XPath=2 -- higher is more stable",
            ],
            &[
                "POM Compliance Rate",
                ">= 95%",
                "Page classes separate from tests, locators as properties, methods for actions",
            ],
            &[
                "Auto-Heal Success Rate",
                ">= 70%",
                "Broken locators/flows auto-repaired without human intervention",
            ],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn execution_engine(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 5: Execution Engine");
    b.subtitle("Running tests at scale, reliably, across environments");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "What It Does",
        &[
            "Execute across Chrome, Firefox, Edge",
            "Parallel execution (10 workers = 10x)",
            "Environment mgmt (QA, Staging, Prod)",
            "CI/CD integration (Jenkins, GH Actions)",
            "Capture screenshots, logs, videos",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Retry Policy",
        &[
            "Element not found: retry 2x, extend wait",
            "Network timeout: retry 3x, exp. backoff",
            "Browser crash: restart browser, retry 2x",
            "Auth expired: refresh token, retry 1x",
            "Assertion failure: NO retry (real bug!)",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Chaos Testing",
        &[
            "Kill browser mid-test: partial results saved",
            "Network disconnect: retry + clear error log",
            "Disk full: graceful error, no silent loss",
            "Memory pressure: clean shutdown + alert",
            "Grid node removed: redistribute to others",
        ],
    );

    b.simple_table(
        inches(0.6),
        inches(4.5),
        inches(12.0),
        0.4,
        &["Metric", "Target", "Alert", "What It Means"],
        &[
            &[
                "Execution Success Rate",
                ">= 90%",
                "< 85%",
                "Percentage of tests that pass",
            ],
            &[
                "Flakiness %",
                "< 5%",
                "> 10%",
                "Tests that flip pass/fail on same code",
            ],
            &[
                "Retry Recovery Rate",
                ">= 60%",
                "< 40%",
                "Tests that pass on retry (transient failures)",
            ],
            &[
                "Parallel Efficiency",
                ">= 70%",
                "< 50%",
                "Actual speedup vs theoretical max",
            ],
            &[
                "Avg Execution Time",
                "< 45 sec",
                "> 90 sec",
                "Mean duration per test script",
            ],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}

pub(super) fn results_and_rca(number: usize) -> Result<Slide> {
    let mut b = SlideBuilder::new(number);
    b.title("Module 6: Results & RCA Agent");
    b.subtitle("From test failures to root causes to Jira defects -- closing the loop");

    b.section_box(
        inches(0.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Evidence Capture",
        &[
            "Console logs (browser + server)",
            "Screenshot at exact failure point",
            "Video recording of full test run",
            "Network HAR trace",
            "DOM snapshot at failure moment",
        ],
    );
    b.section_box(
        inches(4.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Root Cause Classification",
        &[
            "Assertion mismatch --> App Bug",
            "Element not found --> Locator Issue",
            "HTTP 500 in logs --> Backend Bug",
            "Timeout, no response --> Infra Issue",
            "Script syntax error --> Script Bug",
        ],
    );
    b.section_box(
        inches(8.6),
        inches(1.6),
        inches(3.7),
        inches(2.5),
        "Auto Jira Defect Creation",
        &[
            "Title + steps to reproduce from TC",
            "Evidence attached (screenshot, video)",
            "Severity mapped from test priority",
            "Linked to original Jira story",
            "Duplicate detection (fingerprinting)",
        ],
    );

    b.text(
        inches(0.6),
        inches(4.4),
        inches(12.0),
        inches(0.4),
        "Critical: False Positive Filtering",
        TextStyle::sized(16.0, BLUE).bold(),
    );
    b.bullets(
        inches(0.6),
        inches(4.75),
        inches(11.0),
        &[
            "Infra failures are NOT filed as app bugs -- saves developer time",
            "Flaky tests (pass on retry) are NOT filed as bugs -- reduces noise",
            "Environment config issues are classified separately -- prevents false alarms",
            "Only confirmed application bugs create Jira defects -- keeps backlog clean",
        ],
        BulletStyle::new().size(14.0),
    );

    b.simple_table(
        inches(0.6),
        inches(6.05),
        inches(8.0),
        0.35,
        &["Metric", "Target"],
        &[
            &[
                "RCA Accuracy %",
                ">= 80% (validated against golden failure dataset)",
            ],
            &["False Positive Rate", "< 10% of auto-created defects"],
        ],
    )?;
    b.slide_number(number);

    Ok(b.finish())
}
