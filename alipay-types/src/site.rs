//! Public-URL and file-path resolution for the deployment.
//!
//! Stands in for the host framework's `url()` and `base_path()` helpers:
//! gateway return/notify URLs hang off the public base URL, and certificate
//! settings hold paths relative to the base directory.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SiteContext {
    base_url: String,
    base_path: PathBuf,
}

impl SiteContext {
    pub fn new(base_url: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            base_path: base_path.into(),
        }
    }

    /// Absolute public URL for a route path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolves a relative file path against the base directory.
    pub fn path(&self, relative: &str) -> PathBuf {
        let relative = Path::new(relative);
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.base_path.join(relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_cleanly() {
        let site = SiteContext::new("https://billing.example.com/", "/srv/billing");
        assert_eq!(
            site.url("/alipay/webhook"),
            "https://billing.example.com/alipay/webhook"
        );
        assert_eq!(
            site.url("alipay/redirect"),
            "https://billing.example.com/alipay/redirect"
        );
    }

    #[test]
    fn test_path_resolution() {
        let site = SiteContext::new("https://billing.example.com", "/srv/billing");
        assert_eq!(
            site.path("certs/alipay.crt"),
            PathBuf::from("/srv/billing/certs/alipay.crt")
        );
        assert_eq!(site.path("/etc/alipay.crt"), PathBuf::from("/etc/alipay.crt"));
    }
}
