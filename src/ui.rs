// UI layer: the interactive add-a-card flow. The outer loop gates each pass
// with a ready prompt, then walks board selection, column selection, a
// display-only card listing, and card composition, finishing with one create
// call. Every step reports its outcome as a `Step` value so the loop can
// match on it exhaustively instead of juggling numeric return codes.

use anyhow::{bail, Result};

use crate::api::ApiClient;
use crate::console::Console;
use crate::model::{self, Board, CardDraft, Column, LabelRef};
use crate::render;

const WELCOME: &str =
    "===============================^^==============================\nWelcome to the Trello CLI program!";
const SEPARATOR: &str =
    "===============================================================";
const GOODBYE: &str =
    "======================= Exited program ========================";

pub const READY_PROMPT: &str = "Are you ready to add a card to your board? (y/n)";
pub const BOARD_PROMPT: &str = "Select from the above boards by its index, input 'x' to stop";
pub const COLUMN_PROMPT: &str = "Select from the above columns by its index, input 'x' to stop";
pub const NAME_PROMPT: &str = "== Input your card name ('x' to exit)";
pub const DESC_PROMPT: &str = "== Input your card description ('x' to exit)";
pub const LABEL_PROMPT: &str =
    "=====Select from the above labels by index (input 'c' to cancel selection, 'x' to exit)";

/// One message for every invalid selection, whatever the violation.
pub const INVALID_SELECTION: &str =
    "Invalid selection, please pick an open entry from the list above by its index";
pub const EMPTY_NAME: &str = "Card name must not be empty";
pub const NO_BOARDS: &str =
    "There is no board in your workspace, please add a board before you can add a card.";
pub const NO_COLUMNS: &str =
    "There is no column in your board, please add a column before you can add a card.";

/// Outcome of one flow step.
///
/// `Restart` returns to the ready prompt, `Abort` ends the session normally
/// (cancel at the board step), `Fatal` terminates the program with an error.
#[derive(Debug)]
pub enum Step<T> {
    Proceed(T),
    Restart,
    Abort,
    Fatal(String),
}

/// Tokens recognized in selection prompts.
enum Token {
    Cancel,
    Done,
    Index(usize),
    Other,
}

fn parse_token(raw: &str) -> Token {
    match raw.trim() {
        "x" => Token::Cancel,
        "c" => Token::Done,
        value => value.parse::<usize>().map_or(Token::Other, Token::Index),
    }
}

/// Run the interactive loop until the user declines the ready prompt,
/// cancels at the board step, or a fatal condition stops the program.
pub fn main_loop<C: Console>(api: &ApiClient, console: &mut C) -> Result<()> {
    console.line(WELCOME);
    loop {
        let ready = console.prompt(READY_PROMPT)?;
        if ready.trim() == "n" {
            console.line(GOODBYE);
            break;
        }

        let mut board = match select_board(api, console)? {
            Step::Proceed(board) => board,
            Step::Restart => continue,
            Step::Abort => {
                console.line(GOODBYE);
                break;
            }
            Step::Fatal(msg) => bail!(msg),
        };

        console.line(SEPARATOR);
        let mut column = match select_column(&mut board, console)? {
            Step::Proceed(column) => column,
            Step::Restart => continue,
            Step::Abort => {
                console.line(GOODBYE);
                break;
            }
            Step::Fatal(msg) => bail!(msg),
        };

        console.line(SEPARATOR);
        show_cards(&mut column, console);

        console.line(SEPARATOR);
        console.line(&format!(
            "Start Create a new card for column: {}",
            column.name()
        ));
        let draft = match compose_card(&mut board, console)? {
            Step::Proceed(draft) => draft,
            Step::Restart => continue,
            Step::Abort => {
                console.line(GOODBYE);
                break;
            }
            Step::Fatal(msg) => bail!(msg),
        };

        console.working("Creating card...");
        let created = column.create_card(&draft);
        console.done_working();
        match created {
            Ok(()) => console.line(&format!(
                "Successfully inserted a card to column {}",
                column.name()
            )),
            Err(e) => console.line(&format!("Failed! {e}")),
        }
    }
    Ok(())
}

/// Fetch and render the account's boards, then loop until the user picks an
/// open board or cancels. No boards at all (or a failed fetch) stops the
/// whole program: there is nothing to target.
fn select_board<C: Console>(api: &ApiClient, console: &mut C) -> Result<Step<Board>> {
    console.line("Loading Boards From Your Work Spaces...");
    console.working("Fetching boards...");
    let fetched = model::fetch_boards(api);
    console.done_working();

    let mut boards = match fetched {
        Ok(boards) => boards,
        Err(e) => {
            return Ok(Step::Fatal(format!(
                "Failed to connect to your Trello space because: {e}"
            )))
        }
    };
    if boards.is_empty() {
        return Ok(Step::Fatal(NO_BOARDS.to_string()));
    }

    for line in render::indexed_lines(&boards) {
        console.line(&line);
    }
    loop {
        let raw = console.prompt(BOARD_PROMPT)?;
        match parse_token(&raw) {
            Token::Cancel => return Ok(Step::Abort),
            Token::Index(i) if (1..=boards.len()).contains(&i) && !boards[i - 1].is_closed() => {
                return Ok(Step::Proceed(boards.remove(i - 1)));
            }
            _ => console.line(INVALID_SELECTION),
        }
    }
}

/// Refresh and render the board's columns, then loop until the user picks an
/// open column or cancels back to the ready prompt. An empty column list is
/// recoverable: the pass restarts instead of stopping the program.
fn select_column<C: Console>(board: &mut Board, console: &mut C) -> Result<Step<Column>> {
    console.line(&format!("You are now in board: {}", board.name()));
    console.line("Loading Columns From Your Board...");
    console.working("Fetching columns...");
    let refreshed = board.list_columns().map(<[Column]>::to_vec);
    console.done_working();

    let mut columns = match refreshed {
        Ok(columns) => columns,
        Err(e) => {
            console.line(&format!("====== Oops, there seems to have something wrong: {e}"));
            board.columns().to_vec()
        }
    };
    if columns.is_empty() {
        console.line(NO_COLUMNS);
        return Ok(Step::Restart);
    }

    for line in render::indexed_lines(&columns) {
        console.line(&line);
    }
    loop {
        let raw = console.prompt(COLUMN_PROMPT)?;
        match parse_token(&raw) {
            Token::Cancel => return Ok(Step::Restart),
            Token::Index(i) if (1..=columns.len()).contains(&i) && !columns[i - 1].is_closed() => {
                return Ok(Step::Proceed(columns.remove(i - 1)));
            }
            _ => console.line(INVALID_SELECTION),
        }
    }
}

/// Display-only listing of the column's current cards. A failed refresh is
/// surfaced as a warning and falls back to the cached (possibly empty) list;
/// it never blocks composition.
fn show_cards<C: Console>(column: &mut Column, console: &mut C) {
    console.line(&format!("You are in column: {}, with cards:", column.name()));
    console.working("Fetching cards...");
    let refreshed = column.list_cards().map(<[model::Card]>::to_vec);
    console.done_working();

    let cards = match refreshed {
        Ok(cards) => cards,
        Err(e) => {
            console.line(&format!("====== Oops, there seems to have something wrong: {e}"));
            column.cards().to_vec()
        }
    };
    for line in render::indexed_lines(&cards) {
        console.line(&line);
    }
}

/// Collect name, description and labels for the new card. Cancelling at any
/// prompt discards everything collected so far and restarts the pass.
fn compose_card<C: Console>(board: &mut Board, console: &mut C) -> Result<Step<CardDraft>> {
    let name = loop {
        let raw = console.prompt(NAME_PROMPT)?;
        if raw.trim() == "x" {
            return Ok(Step::Restart);
        }
        if raw.trim().is_empty() {
            console.line(EMPTY_NAME);
            continue;
        }
        break raw;
    };

    let desc = console.prompt(DESC_PROMPT)?;
    if desc.trim() == "x" {
        return Ok(Step::Restart);
    }

    let mut draft = CardDraft::new(name, desc);
    console.line("== Available Labels are as follows, you may select one or multiple labels:");
    console.working("Fetching labels...");
    let refreshed = board.list_labels().map(<[model::Label]>::to_vec);
    console.done_working();

    let labels = match refreshed {
        Ok(labels) => labels,
        Err(e) => {
            console.line(&format!("====== Oops, there seems to have something wrong: {e}"));
            board.labels().to_vec()
        }
    };
    for line in render::indexed_lines(&labels) {
        console.line(&line);
    }
    loop {
        let raw = console.prompt(LABEL_PROMPT)?;
        match parse_token(&raw) {
            Token::Cancel => return Ok(Step::Restart),
            Token::Done => break,
            Token::Index(i) if (1..=labels.len()).contains(&i) => {
                draft.attach(LabelRef::Resolved(labels[i - 1].clone()));
                console.line(&format!("=====Attached label {i}"));
            }
            _ => console.line(INVALID_SELECTION),
        }
    }
    Ok(Step::Proceed(draft))
}
