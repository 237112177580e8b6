use iced::widget::image as picture;
use iced::widget::{button, column, container, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

// Declare the application modules
mod classifier;
mod state;

use classifier::model::{Model, ModelSpec};
use classifier::{classify, labels};
use state::screen::Screen;

/// Bundled model artifact, loaded once per session
const MODEL_PATH: &str = "assets/model.onnx";
/// Descriptor with the model's numeric contract
const MODEL_SPEC_PATH: &str = "assets/model.json";
/// Label file, one label per output index
const LABELS_PATH: &str = "assets/labels.txt";

/// Image formats offered in the file picker
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff"];

/// A decoded image ready for both display and classification
#[derive(Clone)]
struct DecodedImage {
    /// Full decoded pixels, shared with the classify task
    image: Arc<image::DynamicImage>,
    /// Render handle for the iced image widget
    handle: picture::Handle,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

/// Main application state
struct ImageClassifierApp {
    /// Ready-to-run inference handle, None if the model asset failed to load
    model: Option<Arc<Model>>,
    /// Label list, index-aligned with the model output (empty on load failure)
    labels: Arc<Vec<String>>,
    /// Screen state machine: picked image + results
    screen: Screen,
    /// Render handle for the currently picked image
    handle: Option<picture::Handle>,
    /// True while a decode or classify task is in flight
    busy: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Pick Image" button
    PickImage,
    /// Background decode completed
    ImageDecoded(Result<DecodedImage, String>),
    /// User clicked the "Classify" button
    Classify,
    /// Background classification completed
    ClassifyComplete(Result<Vec<String>, String>),
}

impl ImageClassifierApp {
    /// Create a new instance of the application
    ///
    /// The model, its descriptor and the label list are all loaded here,
    /// once per session. A missing label file degrades to a diagnostic at
    /// ranking time; a missing model disables the classify feature with a
    /// visible status message.
    fn new() -> (Self, Task<Message>) {
        let spec = ModelSpec::load(Path::new(MODEL_SPEC_PATH));
        let labels = Arc::new(labels::load_labels(Path::new(LABELS_PATH)));

        let (model, status) = match Model::load(Path::new(MODEL_PATH), spec) {
            Ok(model) => (
                Some(Arc::new(model)),
                "Ready. Pick an image to classify.".to_string(),
            ),
            Err(e) => {
                eprintln!("❌ {}", e);
                (None, format!("Classification unavailable: {}", e))
            }
        };

        (
            ImageClassifierApp {
                model,
                labels,
                screen: Screen::new(),
                handle: None,
                busy: false,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                if self.busy {
                    return Task::none();
                }

                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.busy = true;
                    self.status = format!("Loading {}...", path.display());

                    return Task::perform(decode_image_async(path), Message::ImageDecoded);
                }

                Task::none()
            }
            Message::ImageDecoded(Ok(decoded)) => {
                self.busy = false;
                // Re-picking replaces the image and clears prior results
                self.screen.pick(decoded.image.clone());
                self.handle = Some(decoded.handle);
                self.status = format!(
                    "Picked {}x{} image. Press Classify.",
                    decoded.image.width(),
                    decoded.image.height()
                );

                Task::none()
            }
            Message::ImageDecoded(Err(e)) => {
                self.busy = false;
                eprintln!("⚠️  {}", e);
                self.status = e;

                Task::none()
            }
            Message::Classify => {
                // Only one classification may be in flight at a time; the
                // button is disabled while busy and this guard backs it up.
                if self.busy {
                    return Task::none();
                }

                let Some(model) = self.model.clone() else {
                    return Task::none();
                };
                let Some(image) = self.screen.image().cloned() else {
                    return Task::none();
                };

                self.busy = true;
                self.status = "Classifying...".to_string();

                Task::perform(
                    classify_async(model, self.labels.clone(), image),
                    Message::ClassifyComplete,
                )
            }
            Message::ClassifyComplete(Ok(results)) => {
                self.busy = false;
                self.screen.classified(results);
                self.status = "Done.".to_string();

                Task::none()
            }
            Message::ClassifyComplete(Err(e)) => {
                self.busy = false;
                eprintln!("⚠️  Classification failed: {}", e);
                self.status = format!("Classification failed: {}", e);

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text("Image Classifier").size(32),
            button("Pick Image")
                .on_press_maybe((!self.busy).then_some(Message::PickImage))
                .padding(10),
        ]
        .spacing(15)
        .padding(40)
        .align_x(Alignment::Center);

        if let Some(handle) = &self.handle {
            content = content.push(
                picture(handle.clone())
                    .width(Length::Fixed(320.0))
                    .height(Length::Fixed(320.0)),
            );

            let classify_enabled =
                !self.busy && self.model.is_some() && self.screen.can_classify();
            content = content.push(
                button("Classify")
                    .on_press_maybe(classify_enabled.then_some(Message::Classify))
                    .padding(10),
            );
        }

        for line in self.screen.results() {
            content = content.push(text(line.clone()).size(20));
        }

        content = content.push(text(&self.status).size(14));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Image Classifier",
        ImageClassifierApp::update,
        ImageClassifierApp::view,
    )
    .theme(ImageClassifierApp::theme)
    .centered()
    .run_with(ImageClassifierApp::new)
}

/// Decode a picked image file in a background thread
async fn decode_image_async(path: PathBuf) -> Result<DecodedImage, String> {
    // Spawn blocking because decoding large images is CPU-intensive
    task::spawn_blocking(move || decode_image_blocking(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking implementation of image decoding
fn decode_image_blocking(path: &Path) -> Result<DecodedImage, String> {
    let image = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;

    println!(
        "🖼️  Decoded {}: {}x{}",
        path.display(),
        image.width(),
        image.height()
    );

    // The widget needs its own RGBA copy; the decoded original is kept
    // untouched for classification.
    let rgba = image.to_rgba8();
    let handle = picture::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw());

    Ok(DecodedImage {
        image: Arc::new(image),
        handle,
    })
}

/// Run one classification in a background thread
///
/// The model handle is shared read-only; a fresh output is produced per
/// call, so repeated classifications of the same image give identical
/// results.
async fn classify_async(
    model: Arc<Model>,
    labels: Arc<Vec<String>>,
    image: Arc<image::DynamicImage>,
) -> Result<Vec<String>, String> {
    task::spawn_blocking(move || classify(&model, &labels, &image).map_err(|e| e.to_string()))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}
