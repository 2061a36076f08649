//! Export demo
//!
//! This example walks through one session with office-export-client:
//! - Loading configuration (file defaults, `OFFICE_EXPORT_*` overrides)
//! - Creating a client, which fetches the template catalog
//! - Subscribing to events
//! - Exporting the same template as Excel, Word and PDF

use office_export_client::{Config, DocumentType, Event, ExportClient, ExportForm};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Reads OFFICE_EXPORT_BASE_URL, OFFICE_EXPORT_OUTPUT_DIR and
    // OFFICE_EXPORT_REQUEST_TIMEOUT on top of the defaults
    let config = Config::from_env()?;
    println!("Service: {}", config.service.base_url);
    println!("Output:  {}", config.output.output_dir.display());

    let client = ExportClient::new(config).await?;

    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::StageChanged { stage } => {
                    println!("  … {:?}", stage);
                }
                Event::ExportSaved {
                    document_type,
                    path,
                } => {
                    println!("✓ Saved {}: {:?}", document_type, path);
                }
                Event::ExportFailed {
                    document_type,
                    message,
                } => {
                    println!("✗ {} export failed: {}", document_type, message);
                }
                _ => {}
            }
        }
    });

    if client.templates().is_empty() {
        println!("No excel templates listed (catalog empty or unavailable)");
    }
    for template in client.templates() {
        println!("Template {}: {} ({})", template.id, template.name, template.description);
    }

    let template_id = client
        .templates()
        .first()
        .map(|t| t.id.clone())
        .unwrap_or_else(|| "quote".to_string());
    let form = ExportForm::new("季度报价", template_id, "quote-demo");

    for document_type in DocumentType::ALL {
        match client.export(&form, document_type).await {
            Ok(outcome) => println!(
                "{} -> {} ({} bytes)",
                document_type,
                outcome.path.display(),
                outcome.bytes_written
            ),
            Err(e) => println!("{} -> {}", document_type, e.user_message()),
        }
    }

    // Give the event task a moment to print the last events
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    Ok(())
}
