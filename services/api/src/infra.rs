use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tender_eval::error::AppError;
use tender_eval::workflows::tender::{Proposal, Tender};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_tender(path: &Path) -> Result<Tender, AppError> {
    read_json(path)
}

pub(crate) fn load_proposals(path: &Path) -> Result<Vec<Proposal>, AppError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = std::fs::File::open(path)?;
    let value = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_surface_as_io_errors() {
        let error = load_tender(Path::new("does/not/exist.json")).expect_err("missing file");
        assert!(matches!(error, AppError::Io(_)));
    }

    #[test]
    fn malformed_json_surfaces_as_payload_error() {
        let path = std::env::temp_dir().join(format!(
            "tender-eval-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, b"{ not json").expect("temp file writable");

        let error = load_proposals(&path).expect_err("malformed payload");
        std::fs::remove_file(&path).ok();

        assert!(matches!(error, AppError::Payload(_)));
    }
}
