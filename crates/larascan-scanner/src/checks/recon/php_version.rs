use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::failure;

const NAME: &str = "PHP Version Scan";

/// Reports a PHP `X-Powered-By` header on the landing page
pub struct PhpVersion<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> PhpVersion<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for PhpVersion<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let resp = match self.transport.get(target, &[]).await {
            Ok(resp) => resp,
            Err(e) => {
                return vec![failure(
                    Category::Recon,
                    NAME,
                    "Failed to make request",
                    target,
                    &e,
                )]
            }
        };

        let finding = match resp.header("x-powered-by").filter(|v| v.contains("PHP")) {
            Some(powered_by) => {
                Finding::new(Category::Recon, NAME, "X-Powered-By header found", target)
                    .detail(powered_by)
            }
            None => Finding::new(Category::Recon, NAME, "X-Powered-By header not found", target),
        };

        vec![finding.status(resp.status)]
    }
}
