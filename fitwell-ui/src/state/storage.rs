//! `window.localStorage` as session storage

use fitwell::session::{SessionError, Storage};

/// The browser's local storage
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .ok_or_else(|| SessionError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| SessionError::Storage("localStorage unavailable".to_string()))
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> SessionError {
    SessionError::Storage(format!("{:?}", err))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
