use crate::config::UploadConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Persists uploaded file parts under a single flat directory with
/// collision-resistant generated names.
pub struct UploadService {
    config: UploadConfig,
}

impl UploadService {
    #[must_use]
    pub const fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Writes an uploaded file part and returns its public relative URL
    /// path (`/uploads/<name>`, forward slashes on every platform).
    ///
    /// The name is `<field>-<millis>-<random>.<ext>`; the random suffix
    /// makes collisions negligible, so there is no retry logic.
    pub async fn save_upload(
        &self,
        field_name: &str,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String> {
        let filename = generate_name(field_name, original_filename);

        let uploads_dir = PathBuf::from(&self.config.uploads_path);
        if !uploads_dir.exists() {
            fs::create_dir_all(&uploads_dir).await?;
        }

        let file_path = uploads_dir.join(&filename);

        fs::write(&file_path, data)
            .await
            .with_context(|| format!("Failed to write upload to {}", file_path.display()))?;

        info!(path = %file_path.display(), "Stored uploaded file");

        Ok(format!("/uploads/{filename}"))
    }
}

fn generate_name(field_name: &str, original_filename: &str) -> String {
    use rand::Rng;

    let extension = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");

    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);

    format!("{field_name}-{millis}-{suffix}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_name_keeps_field_and_extension() {
        let name = generate_name("image", "pack.png");
        assert!(name.starts_with("image-"));
        assert!(name.ends_with(".png"));

        let middle = name
            .strip_prefix("image-")
            .and_then(|s| s.strip_suffix(".png"))
            .unwrap();
        let (millis, suffix) = middle.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(suffix.parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn generated_name_falls_back_without_extension() {
        let name = generate_name("image", "no_extension");
        assert!(name.ends_with(".bin"));
    }

    #[tokio::test]
    async fn save_upload_writes_file_and_returns_url_path() {
        let dir = std::env::temp_dir().join(format!(
            "kiosk-upload-test-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));

        let service = UploadService::new(UploadConfig {
            uploads_path: dir.to_string_lossy().to_string(),
        });

        let url = service
            .save_upload("image", "pack.png", b"fake png bytes")
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/image-"));

        let filename = url.strip_prefix("/uploads/").unwrap();
        let written = tokio::fs::read(dir.join(filename)).await.unwrap();
        assert_eq!(written, b"fake png bytes");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
