//! Storage configuration types.

use fileshare_shared::StorageSettings;

pub use fileshare_shared::StorageProvider;

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Presigned download URL TTL in seconds (default: 3600 = 1 hour).
    pub presign_download_ttl_secs: u64,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
        }
    }

    /// Build from the settings loaded by `AppConfig`.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(settings.provider.clone())
            .with_max_file_size(settings.max_file_size)
            .with_download_ttl(settings.download_url_ttl_secs)
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set presigned download URL TTL.
    #[must_use]
    pub fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            StorageProvider::S3 { .. } => "s3",
            StorageProvider::AzureBlob { .. } => "azure_blob",
            StorageProvider::LocalFs { .. } => "local",
        }
    }

    /// Get the bucket/container name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match &self.provider {
            StorageProvider::S3 { bucket, .. } => bucket,
            StorageProvider::AzureBlob { container, .. } => container,
            StorageProvider::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_provider() -> StorageProvider {
        StorageProvider::S3 {
            endpoint: "https://account.r2.cloudflarestorage.com".to_string(),
            bucket: "shared-files".to_string(),
            access_key_id: "access_key".to_string(),
            secret_access_key: "secret_key".to_string(),
            region: "auto".to_string(),
        }
    }

    #[test]
    fn test_storage_provider_s3() {
        let config = StorageConfig::new(s3_provider());
        assert_eq!(config.provider_name(), "s3");
        assert_eq!(config.bucket(), "shared-files");
    }

    #[test]
    fn test_storage_provider_azure() {
        let config = StorageConfig::new(StorageProvider::AzureBlob {
            account: "filesharedev".to_string(),
            access_key: "access_key".to_string(),
            container: "shared-files".to_string(),
        });
        assert_eq!(config.provider_name(), "azure_blob");
        assert_eq!(config.bucket(), "shared-files");
    }

    #[test]
    fn test_storage_provider_local() {
        let config = StorageConfig::new(StorageProvider::LocalFs {
            root: "./storage".into(),
        });
        assert_eq!(config.provider_name(), "local");
        assert_eq!(config.bucket(), "./storage");
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(s3_provider());
        assert_eq!(config.max_file_size, StorageConfig::DEFAULT_MAX_FILE_SIZE);
        assert_eq!(
            config.presign_download_ttl_secs,
            StorageConfig::DEFAULT_DOWNLOAD_TTL
        );
    }

    #[test]
    fn test_storage_config_from_settings() {
        let settings = StorageSettings {
            provider: s3_provider(),
            max_file_size: 2048,
            download_url_ttl_secs: 600,
        };
        let config = StorageConfig::from_settings(&settings);
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.presign_download_ttl_secs, 600);
        assert_eq!(config.bucket(), "shared-files");
    }
}
