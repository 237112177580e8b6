/// Image classification module
///
/// This module handles:
/// - Loading the bundled model and its descriptor (model.rs)
/// - Loading the label list (labels.rs)
/// - Converting a decoded image into the model's input tensor (preprocess.rs)
/// - Ranking and formatting the output scores (rank.rs)

pub mod labels;
pub mod model;
pub mod preprocess;
pub mod rank;

pub use model::{ClassifierError, Model, ModelSpec};

use image::DynamicImage;

/// Run the full classification pipeline on a decoded image
///
/// Preprocesses the image into the model's input tensor, runs one forward
/// pass, and formats the top-ranked labels. The caller's image is never
/// mutated; preprocessing works on a canonical copy.
pub fn classify(
    model: &Model,
    labels: &[String],
    image: &DynamicImage,
) -> Result<Vec<String>, ClassifierError> {
    let canonical = preprocess::canonical(image, model.spec());
    let tensor = preprocess::to_tensor(&canonical, model.spec());
    let scores = model.run(tensor)?;
    Ok(rank::top_k(&scores, labels, rank::TOP_K))
}
