//! Backend access from the browser

mod client;

pub use client::{
    default_client_config, fetch_client_config, get_api_base, set_api_base, BrowserApi,
    DEFAULT_API_BASE,
};
