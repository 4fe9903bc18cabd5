//! Backend endpoint configuration. A localStorage override wins over the
//! compile-time default so deployed builds can be repointed without a rebuild.

const DEFAULT_BACKEND_URL: &str = "http://localhost:8900";
const STORAGE_KEY: &str = "mathscribe_backend_url";

/// Base URL of the recognition backend.
pub fn backend_base_url() -> String {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(url)) = store.get_item(STORAGE_KEY) {
                if !url.is_empty() {
                    return url;
                }
            }
        }
    }
    option_env!("MATHSCRIBE_BACKEND_URL")
        .unwrap_or(DEFAULT_BACKEND_URL)
        .to_string()
}

pub fn calculate_url() -> String {
    join_calculate(&backend_base_url())
}

fn join_calculate(base: &str) -> String {
    format!("{}/calculate", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_endpoint_path() {
        assert_eq!(join_calculate("http://localhost:8900"), "http://localhost:8900/calculate");
    }

    #[test]
    fn tolerates_trailing_slash() {
        assert_eq!(join_calculate("https://api.example.com/"), "https://api.example.com/calculate");
    }
}
