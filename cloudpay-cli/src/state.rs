use std::fs;
use std::path::{Path, PathBuf};

use cloudpay_lib::core::simulator::{PaymentFormData, STORAGE_KEY};
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_STATE_FILE: &str = ".cloudpay-simulator.json";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode simulator state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// `SIMULATOR_STATE_FILE`, or `.cloudpay-simulator.json` in the working directory.
pub fn default_state_path() -> PathBuf {
    std::env::var("SIMULATOR_STATE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE))
}

/// Last saved form, or the defaults when nothing usable is stored.
pub fn load(path: &Path) -> PaymentFormData {
    let Ok(contents) = fs::read_to_string(path) else {
        return PaymentFormData::default();
    };
    let saved = serde_json::from_str::<Value>(&contents)
        .ok()
        .and_then(|mut blob| blob.get_mut(STORAGE_KEY).map(Value::take))
        .map(serde_json::from_value::<PaymentFormData>);

    match saved {
        Some(Ok(form)) => form,
        Some(Err(e)) => {
            log::error!("Failed to parse saved data: {}", e);
            PaymentFormData::default()
        }
        None => PaymentFormData::default(),
    }
}

pub fn save(path: &Path, form: &PaymentFormData) -> Result<(), StateError> {
    let mut blob = Map::new();
    blob.insert(STORAGE_KEY.to_string(), serde_json::to_value(form)?);
    let contents = serde_json::to_string_pretty(&Value::Object(blob))?;
    fs::write(path, contents).map_err(|source| StateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudpay_lib::core::simulator::{PaymentStatus, UsdtCurrencyCode};

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let form = load(&dir.path().join("absent.json"));
        assert_eq!(form, PaymentFormData::default());
    }

    #[test]
    fn saved_form_is_rehydrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let form = PaymentFormData {
            callback_url: "https://shop.example/hook".to_string(),
            currency: UsdtCurrencyCode::Arb,
            amount: "3".to_string(),
            order_id: "o-1".to_string(),
            invoice_id: "INV".to_string(),
            status: PaymentStatus::Failed,
        };

        save(&path, &form).unwrap();
        assert_eq!(load(&path), form);

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[STORAGE_KEY]["callbackUrl"], "https://shop.example/hook");
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{\"crypto_cloud_payment_simulator\": {\"currency\": 7}}").unwrap();
        assert_eq!(load(&path), PaymentFormData::default());

        fs::write(&path, "not json").unwrap();
        assert_eq!(load(&path), PaymentFormData::default());
    }
}
