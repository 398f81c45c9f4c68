//! Load lifecycle and draw contract tests

mod load_lifecycle;
mod draw_contract;
