use super::{Context, Result, category_client};

category_client! {
    /// Key management helpers.
    Misc
}

impl Misc {
    /// GET Misc/Validate
    ///
    /// Succeeds when the service accepts the configured API key. The response
    /// body is ignored.
    pub async fn validate(&self, ctx: &Context) -> Result<()> {
        self.requester
            .execute(ctx, "Misc::validate", "Misc/Validate", &[])
            .await
            .map(|_| ())
    }
}
