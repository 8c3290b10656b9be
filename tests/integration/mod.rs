//! End-to-end tests of the command handlers against mocked queues and responders

mod nowplaying;
mod skip;
