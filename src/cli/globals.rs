use secrecy::SecretString;

/// Arguments shared by every subcommand.
#[derive(Clone)]
pub struct GlobalArgs {
    pub access_token: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(access_token: SecretString) -> Self {
        Self { access_token }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("access_token", &"***")
            .finish()
    }
}
