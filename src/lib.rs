#[macro_use]
mod browser;
pub mod engine;
pub mod entity;
pub mod game;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

use engine::GameLoop;
use game::Froggo;

/// Main entry for the Webassembly module
/// - sets up panic reporting
/// - hands the game to the loop on the local executor
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        GameLoop::start(Froggo::new())
            .await
            .expect("Could not start game loop");
    });

    Ok(())
}
