//! PPTX (Office Open XML) backend for the deck model.
//!
//! Writes a [`deck_core::Deck`] as a PresentationML package (a ZIP archive
//! of XML parts) and reads the text outline back out of one.

pub mod constants;
pub mod package;
pub mod reader;
pub mod template;
pub mod writer;
pub mod xml;

pub use reader::PptxReader;
pub use writer::PptxWriter;
