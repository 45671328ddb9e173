//! Service layer: helpers built on top of the repository payloads

pub mod adapter_tools;

pub use adapter_tools::{
    adapter_entries, extract_adapter_name, get_adapter_urls, get_latest_adapters,
    get_stable_adapters,
};
