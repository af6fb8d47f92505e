use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use metricsink::SinkError;

/// Stdout unless a file is given, in which case flushed batches are appended
/// to it.
pub fn open_output(output_file: Option<&Path>) -> Result<Box<dyn Write + Send>, SinkError> {
    match output_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            log::info!("writing metrics to {}", path.display());
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_output_appends() {
        let path = std::env::temp_dir().join(format!("metricsinkd-output-{}", std::process::id()));
        let _ = std::fs::remove_file(&path);

        for batch in ["a=1\n", "b=2\n"] {
            let mut output = open_output(Some(&path)).expect("output opens");
            output.write_all(batch.as_bytes()).expect("batch is written");
        }

        let written = std::fs::read_to_string(&path).expect("output is readable");
        std::fs::remove_file(&path).expect("output is removable");
        assert_eq!(written, "a=1\nb=2\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let path = std::env::temp_dir()
            .join("metricsinkd-no-such-directory")
            .join("metrics.out");
        assert!(matches!(open_output(Some(&path)), Err(SinkError::Io(_))));
    }
}
