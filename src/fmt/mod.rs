//! Rendering helpers shared by the console channels and the built-in outputs:
//! colors, inline markup, level tags and line templates.

mod color;
mod format;
pub mod style;
mod tag;

pub use color::{Color, colorize};
pub use format::{FormatSegment, FormatTemplate, FormatValues, Placeholder};
pub use style::{Segment, has_markup, parse, plain_text, render, render_plain, strip_tags};
pub use tag::{Alignment, TagConfig, Transform, pad};
