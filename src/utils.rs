use crate::Result;
use anyhow::Context;
use chrono::Local;
use std::path::Path;

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Returns the current local time formatted for output filenames, e.g.
/// `20240131_093015`. Every run stamps its own filenames so prior output is
/// never overwritten.
pub(crate) fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.chars().nth(8), Some('_'));
        assert!(ts
            .chars()
            .filter(|c| *c != '_')
            .all(|c| c.is_ascii_digit()));
    }
}
