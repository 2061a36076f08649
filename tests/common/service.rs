//! Mock document-generation service and client setup

use office_export_client::{Config, ExportClient, FileCollisionAction};
use tempfile::TempDir;
use wiremock::MockServer;

/// Client configuration pointing at a mock service and a fresh output directory
///
/// The returned TempDir must be kept alive for the duration of the test.
pub fn test_config(server: &MockServer) -> (Config, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut config = Config::default();
    config.service.base_url = server.uri();
    config.output.output_dir = temp_dir.path().join("exports");
    config.output.file_collision = FileCollisionAction::Rename;

    (config, temp_dir)
}

/// Build a client against the mock service, fetching its catalog
pub async fn create_client(server: &MockServer) -> (ExportClient, TempDir) {
    let (config, temp_dir) = test_config(server);
    let client = ExportClient::new(config)
        .await
        .expect("Failed to create export client");
    (client, temp_dir)
}
