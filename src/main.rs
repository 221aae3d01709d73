// Entrypoint for the CLI application.
// - Keeps `main` small: load settings, create an API client and hand both
//   to the interactive loop.
// - Returns `anyhow::Result`, so a missing credential or a fatal flow error
//   prints one diagnostic line and exits non-zero.

use trello_card_cli::{api::ApiClient, console::TermConsole, ui};

fn main() -> anyhow::Result<()> {
    // Credentials come from TRELLO_API_KEY / TRELLO_API_TOKEN; refusing to
    // start without them happens here, before any remote call.
    let api = ApiClient::from_env()?;

    let mut console = TermConsole::new();
    // Blocks until the user exits the loop.
    ui::main_loop(&api, &mut console)
}
