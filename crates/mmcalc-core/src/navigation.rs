//! Calculator mode URLs

use url::Url;

use crate::error::Result;

pub const MODE_QUERY_PARAM: &str = "mode";

/// Build the URL that switches the calculator to `mode`.
///
/// With an origin the result is absolute, otherwise it is a path relative to
/// the current host.
pub fn mode_url(origin: Option<&str>, path: &str, mode: char) -> Result<String> {
    let mut mode_buf = [0u8; 4];
    let mode = mode.encode_utf8(&mut mode_buf);

    match origin {
        Some(origin) => {
            let mut url = Url::parse(origin)?.join(path)?;
            url.query_pairs_mut().append_pair(MODE_QUERY_PARAM, mode);
            Ok(url.into())
        }
        None => Ok(format!("{path}?{MODE_QUERY_PARAM}={mode}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_mode_url() {
        let url = mode_url(Some("https://mmcalc.example"), "/calculate", '2').unwrap();
        assert_eq!(url, "https://mmcalc.example/calculate?mode=2");
    }

    #[test]
    fn test_origin_path_is_replaced() {
        let url = mode_url(Some("http://localhost:5000/results"), "/calculate", '1').unwrap();
        assert_eq!(url, "http://localhost:5000/calculate?mode=1");
    }

    #[test]
    fn test_relative_mode_url_without_origin() {
        let url = mode_url(None, "/calculate", '3').unwrap();
        assert_eq!(url, "/calculate?mode=3");
    }

    #[test]
    fn test_invalid_origin() {
        assert!(mode_url(Some("not a url"), "/calculate", '1').is_err());
    }
}
