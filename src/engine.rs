use crate::browser;
use anyhow::{anyhow, Error, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - because we control the closure creation and specify the expected type,
    // in principle this should be generally safe (unsafe) code
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlImageElement};

use self::input::Input;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn handle_input(&mut self, input: Input);
    fn update(&mut self, dt: f32);
    fn draw(&self, renderer: &Renderer);
}

// length of a frame in milliseconds
const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut keyevent_receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer::new()?;
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            // key events apply once per visual frame, between update steps
            for input in input::process_input(&mut keyevent_receiver) {
                game.handle_input(input);
            }
            game_loop.accumulated_delta += (perf - game_loop.last_frame) as f32;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(FRAME_SIZE / 1000.0);
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);
            let _ = browser::request_animation_frame(f.borrow().as_ref().unwrap());
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let context = browser::context()?;
        // HUD text styling; screens override via save/set_*/restore
        context.set_font("24pt impact");
        context.set_text_align("left");
        context.set_fill_style_str("yellow");
        context.set_stroke_style_str("black");
        context.set_line_width(2.0);
        Ok(Renderer { context })
    }

    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.x.into(),
            rect.y.into(),
            rect.width.into(),
            rect.height.into(),
        );
    }

    pub fn draw_image(&self, image: &HtmlImageElement, position: &Point) {
        self.context
            .draw_image_with_html_image_element(image, position.x.into(), position.y.into())
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    /// Yellow fill over a black outline, matching the arcade look.
    pub fn text(&self, text: &str, position: &Point) {
        self.context
            .fill_text(text, position.x.into(), position.y.into())
            .expect("Drawing is throwing exceptions! Unrecoverable error");
        self.context
            .stroke_text(text, position.x.into(), position.y.into())
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    pub fn save(&self) {
        self.context.save();
    }

    pub fn restore(&self) {
        self.context.restore();
    }

    pub fn set_font(&self, font: &str) {
        self.context.set_font(font);
    }

    pub fn set_text_align(&self, align: &str) {
        self.context.set_text_align(align);
    }

    pub fn set_line_width(&self, width: f64) {
        self.context.set_line_width(width);
    }
}

// ==================== Assets ====================

/// Startup manifest fetched from `assets.json`: every image the game draws
/// and one audio file per cue. Loading completes before the first frame.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssetManifest {
    pub images: Vec<String>,
    pub audio: AudioManifest,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AudioManifest {
    pub pickup: String,
    pub achievement: String,
    pub hit: String,
    pub menu_navigate: String,
    pub hero_death: String,
    pub music: String,
}

/// Image cache keyed by the manifest path, so game code refers to sprites
/// by logical name and never touches HtmlImageElement construction.
pub struct Assets {
    images: HashMap<String, HtmlImageElement>,
}

impl Assets {
    pub async fn load(paths: &[String]) -> Result<Self> {
        // Independent resources load simultaneously; total time is the
        // slowest resource, not the sum
        let loaded = try_join_all(paths.iter().map(|path| load_image(path))).await?;
        let images = paths.iter().cloned().zip(loaded).collect();
        Ok(Assets { images })
    }

    pub fn get(&self, name: &str) -> Option<&HtmlImageElement> {
        let image = self.images.get(name);
        if image.is_none() {
            log!("Warning: no image loaded for '{}'", name);
        }
        image
    }
}

// ==================== Audio ====================

/// Sound effects the game fires; playback is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Pickup,
    Achievement,
    Hit,
    MenuNavigate,
    HeroDeath,
}

pub struct Audio {
    pickup: HtmlAudioElement,
    achievement: HtmlAudioElement,
    hit: HtmlAudioElement,
    menu_navigate: HtmlAudioElement,
    hero_death: HtmlAudioElement,
    music: HtmlAudioElement,
}

impl Audio {
    const MUSIC_VOLUME: f64 = 0.3;

    pub fn new(manifest: &AudioManifest) -> Result<Self> {
        Ok(Audio {
            pickup: browser::new_audio(&manifest.pickup)?,
            achievement: browser::new_audio(&manifest.achievement)?,
            hit: browser::new_audio(&manifest.hit)?,
            menu_navigate: browser::new_audio(&manifest.menu_navigate)?,
            hero_death: browser::new_audio(&manifest.hero_death)?,
            music: browser::new_audio(&manifest.music)?,
        })
    }

    /// Rewind and play. The returned promise is dropped on purpose: a
    /// rejected playback (e.g. before the first user gesture) is ignored.
    pub fn play(&self, cue: Cue) {
        let element = match cue {
            Cue::Pickup => &self.pickup,
            Cue::Achievement => &self.achievement,
            Cue::Hit => &self.hit,
            Cue::MenuNavigate => &self.menu_navigate,
            Cue::HeroDeath => &self.hero_death,
        };
        element.set_current_time(0.0);
        let _ = element.play();
    }

    pub fn start_music(&self) {
        self.music.set_loop(true);
        self.music.set_volume(Self::MUSIC_VOLUME);
        let _ = self.music.play();
    }

    pub fn stop_music(&self) {
        let _ = self.music.pause();
        self.music.set_current_time(0.0);
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image: {:#?}",
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // ?? - double unwrap because Result<Result<(), Error>, oneshot::Canceled>
    // - first unwrap yields channel result : Result<(), Error>
    // - second unwrap yields image load result : () or propagating Error
    rx.await??;

    Ok(image)
}

// ==================== Input ====================

pub mod input {
    use crate::browser;
    use anyhow::Result;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    /// The symbolic key vocabulary the game consumes. Anything else the
    /// keyboard produces is dropped before it reaches game code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Input {
        Left,
        Right,
        Up,
        Down,
        Enter,
        Space,
    }

    impl Input {
        pub fn from_code(code: &str) -> Option<Self> {
            match code {
                "ArrowLeft" => Some(Input::Left),
                "ArrowRight" => Some(Input::Right),
                "ArrowUp" => Some(Input::Up),
                "ArrowDown" => Some(Input::Down),
                "Enter" => Some(Input::Enter),
                "Space" => Some(Input::Space),
                _ => None,
            }
        }
    }

    pub type KeyEventQueue = UnboundedReceiver<KeyboardEvent>;

    /// Wire the window's keyup events into a queue the game loop drains
    /// once per frame. Key-up (not key-down) so one press moves exactly
    /// one tile no matter how long the key is held.
    pub fn prepare_input() -> Result<KeyEventQueue> {
        let (keyevent_sender, keyevent_receiver) = unbounded();
        let onkeyup = browser::closure_wrap(Box::new(move |keyevent: KeyboardEvent| {
            let _ = keyevent_sender.unbounded_send(keyevent);
        }) as Box<dyn FnMut(KeyboardEvent)>);
        browser::window()?.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        onkeyup.forget();
        Ok(keyevent_receiver)
    }

    pub fn process_input(queue: &mut KeyEventQueue) -> Vec<Input> {
        let mut inputs = Vec::new();
        loop {
            match queue.try_next() {
                Ok(Some(event)) => {
                    if let Some(input) = Input::from_code(&event.code()) {
                        inputs.push(input);
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }
        inputs
    }

}
