use std::time::Duration;

use url::Url;

use crate::{decode_html, EventSink, Fetcher, ScrapeEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per URL; 0 is treated as 1.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Fetches `url` with retries and decodes the body.
///
/// Returns `None` once attempts are exhausted or a failure is not transient;
/// callers treat that as a page without data.
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &Url,
    policy: RetryPolicy,
    sink: &dyn EventSink,
) -> Option<String> {
    let max_attempts = policy.max_attempts.max(1);
    let url_text = url.to_string();

    for attempt in 1..=max_attempts {
        sink.emit(ScrapeEvent::FetchAttempt {
            url: url_text.clone(),
            attempt,
            max_attempts,
        });

        match fetcher.fetch(url).await {
            Ok(output) => {
                sink.emit(ScrapeEvent::FetchSucceeded {
                    url: url_text.clone(),
                    byte_len: output.metadata.byte_len,
                });
                let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
                if decoded.had_errors {
                    sink.emit(ScrapeEvent::DecodedWithErrors {
                        url: url_text,
                        encoding: decoded.encoding_label,
                    });
                }
                return Some(decoded.html);
            }
            Err(error) => {
                let transient = error.kind.is_transient();
                sink.emit(ScrapeEvent::FetchFailed {
                    url: url_text.clone(),
                    attempt,
                    error,
                });
                if !transient {
                    sink.emit(ScrapeEvent::FetchGaveUp {
                        url: url_text,
                        attempts: attempt,
                    });
                    return None;
                }
            }
        }

        if attempt < max_attempts {
            sink.emit(ScrapeEvent::RetryScheduled {
                url: url_text.clone(),
                delay: policy.delay,
            });
            tokio::time::sleep(policy.delay).await;
        }
    }

    sink.emit(ScrapeEvent::FetchGaveUp {
        url: url_text,
        attempts: max_attempts,
    });
    None
}
