use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("plans");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        let written = storage.write_file("itinerary.json", b"{}").await.unwrap();

        assert_eq!(written, base.join("itinerary.json").display().to_string());
        assert_eq!(std::fs::read(base.join("itinerary.json")).unwrap(), b"{}");
    }
}
