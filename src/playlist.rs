//! Stream path extraction from proxy playlists
//!
//! The proxy answers `/playlist` with a line-oriented body. Lines starting with
//! the stream marker are relative paths of playable streams; everything else
//! (`#EXTM3U`, `#EXTINF` metadata, blank lines) is ignored. Matching is a
//! literal prefix test on the raw line, with no quoting or escaping rules.

use crate::defaults::STREAM_PATH_PREFIX;

/// Return the first stream path in `body`, trimmed of surrounding whitespace
pub fn extract_stream_path(body: &str) -> Option<String> {
    extract_stream_path_with_prefix(body, STREAM_PATH_PREFIX)
}

/// Same as [`extract_stream_path`] with an explicit marker
pub fn extract_stream_path_with_prefix(body: &str, prefix: &str) -> Option<String> {
    body.split('\n')
        .find(|line| line.starts_with(prefix))
        .map(|line| line.trim().to_string())
}

/// Number of stream path lines in `body`
pub fn count_stream_paths(body: &str) -> usize {
    body.split('\n')
        .filter(|line| line.starts_with(STREAM_PATH_PREFIX))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_playlist() {
        assert_eq!(
            extract_stream_path("/stream/0/live.m3u8"),
            Some("/stream/0/live.m3u8".to_string())
        );
    }

    #[test]
    fn test_first_match_wins() {
        let body = "#EXTM3U\n#EXTINF:-1,Channel A\n/stream/1/a.m3u8\n#EXTINF:-1,Channel B\n/stream/1/b.m3u8\n";
        assert_eq!(extract_stream_path(body), Some("/stream/1/a.m3u8".to_string()));
        assert_eq!(count_stream_paths(body), 2);
    }

    #[test]
    fn test_crlf_line_endings_are_trimmed() {
        let body = "#EXTM3U\r\n/stream/2/live.m3u8\r\n";
        assert_eq!(extract_stream_path(body), Some("/stream/2/live.m3u8".to_string()));
    }

    #[test]
    fn test_no_channels() {
        assert_eq!(extract_stream_path(""), None);
        assert_eq!(extract_stream_path("#EXTM3U\n#EXTINF:-1,Nothing\nhttp://elsewhere/x.ts\n"), None);
    }

    #[test]
    fn test_prefix_is_literal_and_anchored() {
        // Indented or embedded markers are not stream paths
        assert_eq!(extract_stream_path("  /stream/3/live.m3u8"), None);
        assert_eq!(extract_stream_path("#EXTINF:-1 url=/stream/3/live.m3u8"), None);
        // The marker itself is a prefix test, not a path segment test
        assert_eq!(extract_stream_path("/streamer/x"), Some("/streamer/x".to_string()));
    }

    #[test]
    fn test_custom_prefix() {
        let body = "/live/9/index.m3u8\n/stream/9/index.m3u8";
        assert_eq!(
            extract_stream_path_with_prefix(body, "/live"),
            Some("/live/9/index.m3u8".to_string())
        );
    }
}
