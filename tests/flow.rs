// End-to-end flow tests: a scripted console drives the interactive loop
// against a mock board service, asserting the navigation rules and the
// single create call.

mod common;

use common::ScriptedConsole;
use mockito::{Matcher, ServerGuard};
use serde_json::json;
use trello_card_cli::render::EMPTY_NOTICE;
use trello_card_cli::ui;

fn mock_one_board(server: &mut ServerGuard) {
    server
        .mock("GET", "/1/members/me/boards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([{"id": "B1", "name": "Product", "desc": "main", "closed": false}]).to_string(),
        )
        .create();
}

fn mock_todo_column(server: &mut ServerGuard) {
    server
        .mock("GET", "/1/boards/B1/lists")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{"id": "C9", "name": "Todo", "closed": false}]).to_string())
        .create();
}

fn mock_no_cards(server: &mut ServerGuard) {
    server
        .mock("GET", "/1/lists/C9/cards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
}

fn mock_urgent_label(server: &mut ServerGuard) {
    server
        .mock("GET", "/1/boards/B1/labels")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{"id": "L1", "name": "urgent", "color": "red"}]).to_string())
        .create();
}

#[test]
fn transport_failure_on_boards_terminates_with_the_diagnostic() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/1/members/me/boards")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .create();

    let client = common::test_client(&server.url());
    let mut console = ScriptedConsole::new(&["y"]);
    let err = ui::main_loop(&client, &mut console).unwrap_err();
    assert!(err.to_string().contains("upstream exploded"));
}

#[test]
fn empty_board_list_terminates_the_program() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/1/members/me/boards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    let client = common::test_client(&server.url());
    let mut console = ScriptedConsole::new(&["y"]);
    let err = ui::main_loop(&client, &mut console).unwrap_err();
    assert!(err.to_string().contains("no board"));
}

#[test]
fn invalid_board_selections_reprompt_with_one_uniform_message() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/1/members/me/boards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([
                {"id": "B1", "name": "Alpha", "desc": "", "closed": false},
                {"id": "B2", "name": "Beta", "desc": "", "closed": true}
            ])
            .to_string(),
        )
        .create();
    // the selected board has no columns, so the pass restarts
    server
        .mock("GET", "/1/boards/B1/lists")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    let client = common::test_client(&server.url());
    // 0 and 5 are out of range, "abc" is not numeric, 2 points at a closed
    // board; 1 finally selects Alpha
    let mut console = ScriptedConsole::new(&["y", "0", "5", "abc", "2", "1", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    assert_eq!(console.count(ui::INVALID_SELECTION), 4);
    assert_eq!(console.count(ui::NO_COLUMNS), 1);
    // the empty column list restarted the pass instead of exiting
    assert_eq!(console.count(ui::READY_PROMPT), 2);
}

#[test]
fn all_closed_boards_reject_every_index_until_cancel() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/1/members/me/boards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([
                {"id": "B1", "name": "Old", "desc": "", "closed": true},
                {"id": "B2", "name": "Older", "desc": "", "closed": true}
            ])
            .to_string(),
        )
        .create();

    let client = common::test_client(&server.url());
    let mut console = ScriptedConsole::new(&["y", "1", "2", "x"]);
    ui::main_loop(&client, &mut console).unwrap();

    assert_eq!(console.count(ui::INVALID_SELECTION), 2);
    assert_eq!(console.count("Exited program"), 1);
}

#[test]
fn cancel_at_the_column_step_returns_to_the_ready_prompt() {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);

    let client = common::test_client(&server.url());
    let mut console = ScriptedConsole::new(&["y", "1", "x", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    assert_eq!(console.count(ui::READY_PROMPT), 2);
    assert_eq!(console.count("Exited program"), 1);
}

fn assert_no_create_call(inputs: &[&str]) {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);
    mock_no_cards(&mut server);
    mock_urgent_label(&mut server);
    let create = server
        .mock("POST", "/1/cards")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let client = common::test_client(&server.url());
    let mut console = ScriptedConsole::new(inputs);
    ui::main_loop(&client, &mut console).unwrap();
    create.assert();
}

#[test]
fn cancel_at_the_name_prompt_creates_nothing() {
    assert_no_create_call(&["y", "1", "1", "x", "n"]);
}

#[test]
fn cancel_at_the_description_prompt_creates_nothing() {
    assert_no_create_call(&["y", "1", "1", "Fix bug", "x", "n"]);
}

#[test]
fn cancel_at_the_label_prompt_creates_nothing() {
    assert_no_create_call(&["y", "1", "1", "Fix bug", "see logs", "x", "n"]);
}

#[test]
fn happy_path_issues_exactly_one_create_call() {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);
    mock_no_cards(&mut server);
    mock_urgent_label(&mut server);
    let create = server
        .mock("POST", "/1/cards")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "Fix bug".into()),
            Matcher::UrlEncoded("desc".into(), "see logs".into()),
            Matcher::UrlEncoded("idList".into(), "C9".into()),
            Matcher::UrlEncoded("idLabels".into(), "L1".into()),
        ]))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let client = common::test_client(&server.url());
    let mut console =
        ScriptedConsole::new(&["y", "1", "1", "Fix bug", "see logs", "1", "c", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    create.assert();
    let output = console.output();
    assert!(output.contains(EMPTY_NOTICE));
    assert!(output.contains("=====Attached label 1"));
    assert!(output.contains("Successfully inserted a card to column Todo"));
}

#[test]
fn duplicate_label_selection_sends_a_single_id() {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);
    mock_no_cards(&mut server);
    server
        .mock("GET", "/1/boards/B1/labels")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([
                {"id": "L1", "name": "urgent", "color": "red"},
                {"id": "L2", "name": "minor", "color": "green"}
            ])
            .to_string(),
        )
        .create();
    let create = server
        .mock("POST", "/1/cards")
        .match_query(Matcher::UrlEncoded("idLabels".into(), "L2".into()))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let client = common::test_client(&server.url());
    let mut console =
        ScriptedConsole::new(&["y", "1", "1", "Card", "d", "2", "2", "c", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    create.assert();
    assert_eq!(console.count("=====Attached label 2"), 2);
}

#[test]
fn blank_names_reprompt_until_something_is_entered() {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);
    mock_no_cards(&mut server);
    mock_urgent_label(&mut server);
    let create = server
        .mock("POST", "/1/cards")
        .match_query(Matcher::UrlEncoded("name".into(), "Real name".into()))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let client = common::test_client(&server.url());
    let mut console =
        ScriptedConsole::new(&["y", "1", "1", "", "   ", "Real name", "", "c", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    create.assert();
    assert_eq!(console.count(ui::EMPTY_NAME), 2);
}

#[test]
fn card_listing_failure_does_not_block_composition() {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);
    server
        .mock("GET", "/1/lists/C9/cards")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("cards backend down")
        .create();
    mock_urgent_label(&mut server);
    let create = server
        .mock("POST", "/1/cards")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let client = common::test_client(&server.url());
    // the name prompt is still reached after the failed listing
    let mut console = ScriptedConsole::new(&["y", "1", "1", "x", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    create.assert();
    let output = console.output();
    assert!(output.contains("cards backend down"));
    assert!(output.contains(ui::NAME_PROMPT));
}

#[test]
fn create_failure_is_reported_and_returns_to_the_ready_prompt() {
    let mut server = mockito::Server::new();
    mock_one_board(&mut server);
    mock_todo_column(&mut server);
    mock_no_cards(&mut server);
    mock_urgent_label(&mut server);
    server
        .mock("POST", "/1/cards")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("label does not exist")
        .create();

    let client = common::test_client(&server.url());
    let mut console =
        ScriptedConsole::new(&["y", "1", "1", "Fix bug", "", "c", "n"]);
    ui::main_loop(&client, &mut console).unwrap();

    let output = console.output();
    assert!(output.contains("Failed!"));
    assert!(output.contains("label does not exist"));
    assert_eq!(console.count(ui::READY_PROMPT), 2);
}
