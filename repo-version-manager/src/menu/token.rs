//! Token action.

use super::prompt::ask;
use super::{Connect, Console, MenuError, Session};
use tracing::info;

impl<C: Connect> Session<C> {
    pub(super) fn configure_token<K: Console>(&mut self, console: &mut K) -> Result<(), MenuError> {
        console.heading("Configure GitHub token");
        if self.client_config.has_token() {
            console.info("A token is configured for this session.");
        } else {
            console.warn("No token is configured.");
        }

        let token = ask(console, "New token (blank to keep current)")?;
        if token.is_empty() {
            console.info("Token unchanged.");
            return Ok(());
        }

        self.client_config = self.client_config.with_token(token);
        info!("Session token replaced");
        console.success("Token set for this session. It is not saved to disk.");
        Ok(())
    }
}
