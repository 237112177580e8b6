/// Screen state machine
///
/// The classify screen moves between three states:
/// - NoImage: nothing picked yet
/// - ImagePicked: an image is shown, no results yet
/// - Classified: an image is shown along with ranked results
///
/// Picking an image from any state replaces the current image and clears
/// any prior results; there is no terminal state and nothing outlives the
/// session.

use image::DynamicImage;
use std::sync::Arc;

/// Current state of the classify screen
#[derive(Debug, Clone)]
pub enum Screen {
    /// No image has been picked yet
    NoImage,
    /// An image is picked and displayed, awaiting a classify action
    ImagePicked { image: Arc<DynamicImage> },
    /// The picked image has been classified
    Classified {
        image: Arc<DynamicImage>,
        results: Vec<String>,
    },
}

impl Screen {
    pub fn new() -> Self {
        Screen::NoImage
    }

    /// A new image was picked and decoded
    ///
    /// Valid from every state. Replaces any previous image and drops any
    /// previous results, so stale output never survives a re-pick.
    pub fn pick(&mut self, image: Arc<DynamicImage>) {
        *self = Screen::ImagePicked { image };
    }

    /// A classification finished with formatted result lines
    ///
    /// Valid whenever an image is present; re-classifying without a
    /// re-pick simply replaces the results. Ignored in NoImage, where
    /// there is nothing the results could refer to.
    pub fn classified(&mut self, results: Vec<String>) {
        if let Some(image) = self.image().cloned() {
            *self = Screen::Classified { image, results };
        }
    }

    /// The currently picked image, if any
    pub fn image(&self) -> Option<&Arc<DynamicImage>> {
        match self {
            Screen::NoImage => None,
            Screen::ImagePicked { image } | Screen::Classified { image, .. } => Some(image),
        }
    }

    /// The displayed result lines (empty unless classified)
    pub fn results(&self) -> &[String] {
        match self {
            Screen::Classified { results, .. } => results,
            _ => &[],
        }
    }

    /// Whether a classify action is currently meaningful
    pub fn can_classify(&self) -> bool {
        self.image().is_some()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn test_image() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgb8(RgbImage::new(8, 8)))
    }

    #[test]
    fn test_starts_without_image() {
        let screen = Screen::new();
        assert!(screen.image().is_none());
        assert!(screen.results().is_empty());
        assert!(!screen.can_classify());
    }

    #[test]
    fn test_pick_enables_classify() {
        let mut screen = Screen::new();
        screen.pick(test_image());

        assert!(screen.image().is_some());
        assert!(screen.can_classify());
        assert!(screen.results().is_empty());
    }

    #[test]
    fn test_classify_stores_results() {
        let mut screen = Screen::new();
        screen.pick(test_image());
        screen.classified(vec!["cat: 90%".to_string()]);

        assert_eq!(screen.results(), ["cat: 90%".to_string()]);
        assert!(screen.image().is_some());
    }

    #[test]
    fn test_repick_clears_results() {
        let mut screen = Screen::new();
        screen.pick(test_image());
        screen.classified(vec!["cat: 90%".to_string()]);

        screen.pick(test_image());

        assert!(screen.results().is_empty());
        assert!(matches!(screen, Screen::ImagePicked { .. }));
    }

    #[test]
    fn test_reclassify_replaces_results() {
        let mut screen = Screen::new();
        screen.pick(test_image());
        screen.classified(vec!["cat: 90%".to_string()]);
        screen.classified(vec!["dog: 80%".to_string()]);

        assert_eq!(screen.results(), ["dog: 80%".to_string()]);
    }

    #[test]
    fn test_classify_without_image_is_ignored() {
        let mut screen = Screen::new();
        screen.classified(vec!["ghost: 99%".to_string()]);

        assert!(matches!(screen, Screen::NoImage));
        assert!(screen.results().is_empty());
    }
}
