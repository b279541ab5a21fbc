//! Managed streaming platforms.
//!
//! A platform is *managed* when we know its RTMP ingest endpoint and can
//! build the full publish URL from a stream key alone. Everything else is
//! reached through an explicit caller-supplied RTMP URL.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A streaming platform with a known RTMP ingest endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamPlatform {
    Youtube,
    Twitch,
    Instagram,
}

impl StreamPlatform {
    /// All managed platforms.
    pub fn all() -> &'static [StreamPlatform] {
        &[
            StreamPlatform::Youtube,
            StreamPlatform::Twitch,
            StreamPlatform::Instagram,
        ]
    }

    /// RTMP ingest base for this platform. The stream key is appended as
    /// the final path segment.
    pub fn ingest_base(&self) -> &'static str {
        match self {
            StreamPlatform::Youtube => "rtmp://a.rtmp.youtube.com/live2",
            StreamPlatform::Twitch => "rtmp://live.twitch.tv/app",
            StreamPlatform::Instagram => "rtmps://live-upload.instagram.com:443/rtmp",
        }
    }

    /// Full RTMP publish URL for a stream key.
    pub fn ingest_url(&self, stream_key: &str) -> String {
        format!("{}/{}", self.ingest_base(), stream_key)
    }
}

impl std::fmt::Display for StreamPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamPlatform::Youtube => write!(f, "youtube"),
            StreamPlatform::Twitch => write!(f, "twitch"),
            StreamPlatform::Instagram => write!(f, "instagram"),
        }
    }
}

impl std::str::FromStr for StreamPlatform {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youtube" => Ok(StreamPlatform::Youtube),
            "twitch" => Ok(StreamPlatform::Twitch),
            "instagram" => Ok(StreamPlatform::Instagram),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_url_youtube() {
        let url = StreamPlatform::Youtube.ingest_url("abcd-1234");
        assert_eq!(url, "rtmp://a.rtmp.youtube.com/live2/abcd-1234");
    }

    #[test]
    fn test_ingest_url_twitch() {
        let url = StreamPlatform::Twitch.ingest_url("live_key");
        assert_eq!(url, "rtmp://live.twitch.tv/app/live_key");
    }

    #[test]
    fn test_ingest_url_instagram() {
        let url = StreamPlatform::Instagram.ingest_url("ig-key");
        assert_eq!(url, "rtmps://live-upload.instagram.com:443/rtmp/ig-key");
    }

    #[test]
    fn test_platform_roundtrip() {
        for platform in StreamPlatform::all() {
            let parsed: StreamPlatform = platform.to_string().parse().unwrap();
            assert_eq!(parsed, *platform);
        }
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let err = "facebook".parse::<StreamPlatform>().unwrap_err();
        assert!(matches!(err, Error::UnknownPlatform(p) if p == "facebook"));
    }

    #[test]
    fn test_platform_serde_lowercase() {
        let json = serde_json::to_string(&StreamPlatform::Youtube).unwrap();
        assert_eq!(json, "\"youtube\"");
        let parsed: StreamPlatform = serde_json::from_str("\"twitch\"").unwrap();
        assert_eq!(parsed, StreamPlatform::Twitch);
    }
}
