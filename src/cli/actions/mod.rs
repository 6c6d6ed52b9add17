pub mod server;

/// What the binary was asked to do, resolved from the command line.
#[derive(Debug)]
pub enum Action {
    /// Serve the gateway until a shutdown signal arrives.
    Server(server::Args),
}

impl Action {
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Server(args) => server::execute(args).await,
        }
    }
}
