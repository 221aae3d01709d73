// Library root
// -----------
// This crate exposes the pieces of the add-a-card CLI as a small library
// surface. The binary (`main.rs`) wires them together.
//
// Module responsibilities:
// - `config`: settings for the remote client, read from the environment.
// - `api`: blocking HTTP client for the board service with a uniform
//   success/failure result shape.
// - `model`: Board/Column/Label/Card entities with their lazy-refresh
//   child caches and the card-creation call.
// - `render`: indexed-list rendering for human selection.
// - `console`: prompt/output abstraction; terminal implementation.
// - `ui`: the interactive selection flow and its outer repeat loop.
//
// Keeping this separation makes the flow testable against a scripted
// console and a mock HTTP server.
pub mod api;
pub mod config;
pub mod console;
pub mod model;
pub mod render;
pub mod ui;
