pub mod find;
pub mod server;

// Internal "interpreter" for `Action`.
mod run;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Find(find::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
