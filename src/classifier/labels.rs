/// Label list loading
///
/// The label file is a plain UTF-8 text file, one label per line, whose
/// line order matches the model's output index order. It is read once at
/// startup and never reloaded.

use std::path::Path;

/// Load the label list from disk
///
/// Fails soft: on any read error this returns an empty vector and logs a
/// warning. The ranking step detects the empty/mismatched list and shows a
/// diagnostic line instead of results, so a missing label file degrades
/// the output without crashing the app.
pub fn load_labels(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let labels: Vec<String> = text.lines().map(|line| line.to_string()).collect();
            println!("🏷️  Loaded {} labels from {}", labels.len(), path.display());
            labels
        }
        Err(e) => {
            eprintln!("⚠️  Failed to read labels {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Write a throwaway label file under the system temp directory
    fn write_temp_labels(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_yields_empty_list() {
        let labels = load_labels(Path::new("/nonexistent/labels.txt"));
        assert!(labels.is_empty());
    }

    #[test]
    fn test_lines_load_in_order() {
        let path = write_temp_labels("labels-order.txt", "background\ntench\ngoldfish\n");

        let labels = load_labels(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(labels, vec!["background", "tench", "goldfish"]);
    }

    #[test]
    fn test_no_phantom_trailing_entry() {
        // A trailing newline must not produce an empty 4th label, since
        // label index must stay aligned with the output vector index.
        let path = write_temp_labels("labels-trailing.txt", "a\nb\nc\n");

        let labels = load_labels(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(labels.len(), 3);
    }
}
