use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;

use crate::error::{HarvestError, Result};

/// WebDriver endpoints tried when the configured URL is unreachable.
const FALLBACK_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://127.0.0.1:4444", // IP instead of localhost
];

/// One browser page session, driven over WebDriver.
pub struct Session {
    client: Client,
}

impl Session {
    /// Connect to a WebDriver server, trying common fallback ports when the
    /// configured URL does not answer.
    pub async fn connect(webdriver_url: &str) -> Result<Self> {
        let mut last_err = match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                e
            }
        };

        for url in FALLBACK_URLS {
            if url == webdriver_url {
                continue;
            }
            ::log::info!("Trying fallback WebDriver URL: {}", url);
            match ClientBuilder::native().connect(url).await {
                Ok(client) => {
                    ::log::debug!("Connected to fallback WebDriver at {}", url);
                    return Ok(Self { client });
                }
                Err(e) => last_err = e,
            }
        }

        ::log::error!(
            "Failed to connect to any WebDriver server; is chromedriver or geckodriver running?"
        );
        Err(HarvestError::Connect(last_err))
    }

    /// Navigate to `url` and return the rendered page source. The whole
    /// operation, including the navigation itself, runs under
    /// `page_timeout`.
    pub async fn fetch(&mut self, url: &str, page_timeout: Duration) -> Result<String> {
        ::log::debug!("FETCH: {}", url);

        let fetched = timeout(page_timeout, async {
            self.client.goto(url).await?;
            self.client.source().await
        })
        .await;

        match fetched {
            Ok(Ok(html)) => Ok(html),
            Ok(Err(source)) => Err(HarvestError::Navigation {
                url: url.to_string(),
                source,
            }),
            Err(_) => {
                ::log::error!("Timeout loading: {}", url);
                Err(HarvestError::PageTimeout {
                    url: url.to_string(),
                })
            }
        }
    }

    /// End the WebDriver session and close the browser window.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
