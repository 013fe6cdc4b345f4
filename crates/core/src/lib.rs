//! Core document model, layout helpers, and the slide content of the
//! "Agentic AI Testing Architecture" deck.

pub mod content;
pub mod error;
pub mod layout;
pub mod outline;
pub mod palette;
pub mod types;
pub mod units;

pub use content::{agentic_testing_deck, DEFAULT_FILE_NAME, SLIDE_COUNT};
pub use error::{Error, Result};
pub use layout::{BulletStyle, SlideBuilder, TextStyle};
pub use outline::{join_paragraphs, DeckOutline, ExtractedSlide, OutlineFormatter, SlideText};
pub use palette::Color;
pub use types::{
    Alignment, Anchor, Deck, DocumentProperties, Font, Frame, Line, Paragraph, Rectangle, Run,
    Shape, Slide, Table, TableCell, TableRow, TextBox,
};
pub use units::{inches, points, Emu};
