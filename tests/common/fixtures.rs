//! Catalog and file fixtures

/// Start of a zip container, which is what an .xlsx body looks like
pub const XLSX_BYTES: &[u8] = b"PK\x03\x04\x14\x00\x06\x00\x08\x00\x00\x00!\x00\xff\xfe";

/// Start of a PDF body
pub const PDF_BYTES: &[u8] = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n";

/// One catalog entry as the service lists it
pub fn template_json(id: &str, template_type: &str) -> serde_json::Value {
    let extension = match template_type {
        "excel" => "xlsx",
        "word" => "docx",
        other => other,
    };
    serde_json::json!({
        "id": id,
        "name": format!("{id}.{extension}"),
        "description": format!("{template_type} template"),
        "type": template_type,
        "path": format!("templates/{template_type}/{id}.{extension}"),
    })
}

/// Catalog body with three excel and two non-excel templates
pub fn mixed_catalog() -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "message": "success",
        "data": [
            template_json("budget", "excel"),
            template_json("contract", "word"),
            template_json("quote", "excel"),
            template_json("invoice", "pdf"),
            template_json("simple", "excel"),
        ]
    })
}
