// Presentation layer: text rendering and the interactive entry form.

pub mod display;
pub mod form;
