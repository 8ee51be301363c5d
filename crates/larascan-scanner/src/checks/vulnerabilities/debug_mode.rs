use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::{failure, join_url};

const NAME: &str = "Debug Mode";

/// Path that should not exist on any application
const ERROR_PATH: &str = "/nonexistentpage";

const DEBUG_MARKERS: [&str; 2] = ["Whoops, looks like something went wrong.", "exception"];

/// Requests a missing page and inspects the error page for debug output.
///
/// Always produces exactly one finding.
pub struct DebugMode<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> DebugMode<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for DebugMode<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Vulnerabilities
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let error_url = join_url(target, ERROR_PATH);

        let resp = match self.transport.get(&error_url, &[]).await {
            Ok(resp) => resp,
            Err(e) => {
                return vec![failure(
                    Category::Vulnerabilities,
                    NAME,
                    "Request to trigger error page failed",
                    error_url,
                    &e,
                )];
            }
        };
        let status = resp.status;

        let (description, detail) = if status != 500 {
            (
                "Could not determine debug mode status.",
                "The server did not return a 500 Internal Server Error as expected, \
                 making it difficult to assess debug mode status.",
            )
        } else {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    return vec![failure(
                        Category::Vulnerabilities,
                        NAME,
                        "Failed to read response body from error page",
                        error_url,
                        &e,
                    )];
                }
            };

            if DEBUG_MARKERS.iter().any(|m| body.contains(m)) {
                (
                    "Debug mode is enabled!",
                    "The application displayed a detailed error page, indicating that debug \
                     mode is active.",
                )
            } else {
                (
                    "Debug mode is disabled.",
                    "The application did not display a detailed error page, indicating that \
                     debug mode is likely disabled.",
                )
            }
        };

        vec![
            Finding::new(Category::Vulnerabilities, NAME, description, error_url)
                .status(status)
                .detail(detail),
        ]
    }
}
