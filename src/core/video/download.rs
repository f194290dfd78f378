//! 视频获取：把远端视频下载到本地文件

use std::fs::File;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;

use crate::core::error::VideoError;

static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^http[s]?://\S+$").expect("valid url pattern"));

pub struct VideoDownloader {
    client: Client,
}

impl VideoDownloader {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36")
            .build()
            .unwrap();
        Self { client }
    }

    /// 下载到指定路径，目标文件已存在时覆盖
    pub fn download(&self, url: &str, dest: &Path) -> Result<(), VideoError> {
        validate_source_url(url)?;

        let mut resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(VideoError::Download(format!(
                "HTTP {} for {}",
                resp.status(),
                url
            )));
        }

        let mut file = File::create(dest)?;
        io::copy(&mut resp, &mut file)?;
        Ok(())
    }
}

impl Default for VideoDownloader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_source_url(url: &str) -> Result<(), VideoError> {
    if HTTP_URL.is_match(url) {
        Ok(())
    } else {
        Err(VideoError::InvalidSource(url.to_string()))
    }
}
