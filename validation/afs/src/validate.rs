//! Runs the reference cases through the AFS pipeline.
//!
//! Every `*.json` case in `../output/reference` is normalized with the
//! case's parameters and written, result included, to `../output/afs` for
//! comparison against the reference implementation. Set `RUST_LOG=debug`
//! to follow the pipeline stages.

use afs::prelude::*;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
struct ValidationData {
    name: String,
    #[serde(default)]
    notes: String,
    input: InputData,
    params: Params,
    #[serde(skip_deserializing)]
    result: ResultData,
}

#[derive(Debug, Deserialize, Serialize)]
struct InputData {
    wavelength: Vec<f64>,
    intensity: Vec<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Params {
    q: f64,
    d: f64,
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ResultData {
    normalized: Vec<f64>,
    diagnostics: Option<AfsDiagnostics<f64>>,
    error: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let input_dir = Path::new("../output/reference");
    let output_dir = Path::new("../output/afs");

    if !input_dir.exists() {
        eprintln!(
            "Input directory {:?} does not exist. Export the reference cases first.",
            input_dir
        );
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            info!("processing {:?}", path.file_name().unwrap_or_default());
            process_file(&path, output_dir)?;
        }
    }

    Ok(())
}

fn process_file(input_path: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::open(input_path)?;
    let mut data: ValidationData = serde_json::from_reader(file)?;

    let model = Afs::<f64>::new()
        .quantile(data.params.q)
        .span(data.params.d)
        .return_diagnostics()
        // The reference selects constant windows whole
        .allow_constant_windows()
        .build()?;

    // A failing case is recorded, not fatal
    match model.normalize(&data.input.wavelength, &data.input.intensity) {
        Ok(result) => {
            data.result.normalized = result.normalized;
            data.result.diagnostics = result.diagnostics;
        }
        Err(err) => {
            warn!("{}: {}", data.name, err);
            data.result.error = Some(err.to_string());
        }
    }

    let file_name = input_path.file_name().ok_or("input path has no file name")?;
    let output_json = serde_json::to_string_pretty(&data)?;
    fs::write(output_dir.join(file_name), output_json)?;

    Ok(())
}
