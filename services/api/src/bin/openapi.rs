//! services/api/src/bin/openapi.rs
//!
//! Dumps the MindMate HTTP contract to `openapi.json` without starting the
//! server.

use api_lib::web::rest::ApiDoc;
use std::path::Path;
use utoipa::OpenApi;

const OUTPUT_FILE: &str = "openapi.json";

fn write_document(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(path, json)?;
    println!("Wrote MindMate OpenAPI document to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    write_document(Path::new(OUTPUT_FILE))
}
