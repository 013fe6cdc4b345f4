//! The "Agentic AI Testing Architecture" deck.
//!
//! Each slide is a function from its 1-based number to a finished [`Slide`].
//! Slides are grouped by the part of the talk they belong to.

mod agents;
mod closing;
mod measurement;
mod opening;

use crate::error::Result;
use crate::types::{Deck, DocumentProperties, Slide};

/// Number of slides in the deck.
pub const SLIDE_COUNT: usize = 17;

/// File name the deck is saved under unless told otherwise.
pub const DEFAULT_FILE_NAME: &str = "Agentic-AI-Testing-Architecture-v2.pptx";

type SlideFn = fn(usize) -> Result<Slide>;

const SLIDES: [SlideFn; SLIDE_COUNT] = [
    opening::title,
    opening::problem_statement,
    opening::high_level_architecture,
    opening::design_philosophy,
    agents::jira_ingestion,
    agents::requirement_understanding,
    agents::test_case_design,
    agents::automation_script,
    agents::execution_engine,
    agents::results_and_rca,
    measurement::ai_metrics,
    measurement::execution_metrics,
    measurement::supervisor,
    measurement::feedback_loop,
    closing::end_to_end_flow,
    closing::metrics_dashboard,
    closing::value_and_closing,
];

/// Build the complete deck.
pub fn agentic_testing_deck(properties: DocumentProperties) -> Result<Deck> {
    let mut deck = Deck::new(properties);
    for (index, build) in SLIDES.iter().enumerate() {
        deck.add_slide(build(index + 1)?);
    }

    log::info!(
        "Built '{}' with {} slides",
        deck.properties.title,
        deck.slide_count()
    );
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape;
    use crate::units::{inches, Emu};

    fn deck() -> Deck {
        agentic_testing_deck(DocumentProperties::default()).unwrap()
    }

    #[test]
    fn test_builds_all_slides() {
        let deck = deck();
        assert_eq!(deck.slide_count(), SLIDE_COUNT);
        for (index, slide) in deck.slides.iter().enumerate() {
            assert_eq!(slide.number, index + 1);
        }
    }

    #[test]
    fn test_slide_headings() {
        let outline = deck().outline();
        let headings: Vec<_> = outline
            .slides
            .iter()
            .map(|s| s.heading().unwrap_or_default().to_string())
            .collect();

        assert_eq!(
            headings,
            vec![
                "Agentic AI Testing Architecture",
                "Problem Statement",
                "High-Level Architecture",
                "Agentic AI Design Philosophy",
                "Module 1: Jira Ingestion & Validation",
                "Module 2: Requirement Understanding Agent",
                "Module 3: Test Case Design Agent",
                "Module 4: Automation Script Agent",
                "Module 5: Execution Engine",
                "Module 6: Results & RCA Agent",
                "Module 7: AI Metrics Framework",
                "Automation Execution Metrics",
                "Supervisor / Orchestrator Agent",
                "Feedback Loop & Continuous Learning",
                "End-to-End Data Flow",
                "Complete Metrics Dashboard",
                "Architecture Value & Closing",
            ]
        );
    }

    #[test]
    fn test_every_slide_ends_with_its_number() {
        for slide in deck().slides {
            let Some(Shape::TextBox(last)) = slide.shapes.last() else {
                panic!("slide {} does not end with a text box", slide.number);
            };
            assert_eq!(last.paragraphs[0].text(), slide.number.to_string());
            assert_eq!(last.frame.y, inches(7.05));
        }
    }

    #[test]
    fn test_shapes_stay_on_the_slide() {
        let deck = deck();
        for slide in &deck.slides {
            for shape in &slide.shapes {
                let frame = shape.frame();
                assert!(frame.x >= Emu::ZERO && frame.y >= Emu::ZERO);
                assert!(
                    frame.x + frame.cx <= deck.width,
                    "slide {} shape overflows horizontally",
                    slide.number
                );
                assert!(frame.y <= deck.height, "slide {} shape below slide", slide.number);
            }
        }
    }

    #[test]
    fn test_flow_slide_has_seven_connectors() {
        let outline = deck().outline();
        let connectors = outline.slides[14]
            .non_empty_lines()
            .into_iter()
            .filter(|l| *l == ">")
            .count();
        assert_eq!(connectors, 7);
    }

    #[test]
    fn test_closing_quote_keeps_line_break() {
        let outline = deck().outline();
        let closing = &outline.slides[16];
        assert!(closing
            .non_empty_lines()
            .iter()
            .any(|l| l.contains("under test\nand the AI testing platform itself.")));
    }
}
