// The behavior modules only run in the browser; native builds exist for tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod charts;
mod config;
mod modal;
mod navbar;
mod orbit;
mod reveal;
mod scroll;
mod telemetry;
mod typing;
mod visibility;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate drives the portfolio page in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
