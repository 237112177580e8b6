/// State management module
///
/// This module holds the screen state machine (screen.rs), which tracks
/// the picked image and classification results independently of any
/// widget code so the transitions stay unit-testable.

pub mod screen;
