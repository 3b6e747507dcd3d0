use tempo_core::wire;
use time::PrimitiveDateTime;

/// Backend URL under construction.
#[derive(Debug, Clone)]
pub struct ApiUrl(String);

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ApiUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Restrict a listing to an inclusive datetime window.
    pub fn with_window(&self, from: PrimitiveDateTime, to: PrimitiveDateTime) -> Self {
        self.with_query("startDateTime", &wire::encode(from))
            .with_query("endDateTime", &wire::encode(to))
    }

    /// Restrict reference data to visible or hidden entries.
    pub fn with_visibility(&self, visible: bool) -> Self {
        self.with_query("IsVisible", if visible { "true" } else { "false" })
    }

    fn with_query(&self, key: &str, value: &str) -> Self {
        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!(
            "{}{}{}={}",
            self.0,
            separator,
            key,
            urlencoding::encode(value)
        ))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn append_path_normalizes_slashes() {
        let url = ApiUrl::new("https://localhost:7201/");
        assert_eq!(
            url.append_path("/api/me/timeentries").as_ref(),
            "https://localhost:7201/api/me/timeentries"
        );
    }

    #[test]
    fn window_filter_encodes_timestamps() {
        let url = ApiUrl::new("https://localhost:7201")
            .append_path("/api/me/timeentries")
            .with_window(datetime!(2025-08-04 0:00), datetime!(2025-08-10 23:59:59));
        assert_eq!(
            url.as_ref(),
            "https://localhost:7201/api/me/timeentries\
             ?startDateTime=2025-08-04T00%3A00%3A00&endDateTime=2025-08-10T23%3A59%3A59"
        );
    }

    #[test]
    fn later_queries_append_with_ampersand() {
        let url = ApiUrl::new("https://localhost:7201")
            .append_path("api/me/projects")
            .with_visibility(true)
            .with_query("foo", "bar");
        assert_eq!(
            url.as_ref(),
            "https://localhost:7201/api/me/projects?IsVisible=true&foo=bar"
        );
    }

    #[test]
    fn hidden_filter_uses_false() {
        let url = ApiUrl::new("https://localhost:7201")
            .append_path("api/me/segmenttypes")
            .with_visibility(false);
        assert!(url.as_ref().ends_with("?IsVisible=false"));
    }
}
