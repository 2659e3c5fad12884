use std::cell::RefCell;
use std::rc::{Rc, Weak};

use cakesweeper_core::{CellDisplayState, Coord, Coord2, GameController, Renderer, Ticker};
use gloo::timers::callback::Interval;
use wasm_bindgen::prelude::*;

use crate::forced_seed;
use crate::utils::{deliver_ticks, js_random_seed, try_with};

const TICK_MILLIS: u32 = 1_000;

type Controller = GameController<ViewRenderer, IntervalTicker>;

#[wasm_bindgen]
extern "C" {
    /// Page-side object that draws the board, the counters and the end dialog.
    pub type CakeView;

    #[wasm_bindgen(method, js_name = renderCell)]
    fn render_cell(this: &CakeView, row: Coord, col: Coord, state: &str, count: u8);

    #[wasm_bindgen(method, js_name = renderScore)]
    fn render_score(this: &CakeView, score: u32);

    #[wasm_bindgen(method, js_name = renderTimer)]
    fn render_timer(this: &CakeView, elapsed_secs: u32);

    #[wasm_bindgen(method, js_name = renderMinesRemaining)]
    fn render_mines_remaining(this: &CakeView, mines_remaining: i32);

    #[wasm_bindgen(method, js_name = renderAssistCount)]
    fn render_assist_count(this: &CakeView, uses_remaining: u8);

    #[wasm_bindgen(method, js_name = showEndDialog)]
    fn show_end_dialog(this: &CakeView, is_win: bool, final_score: u32, final_time: u32);
}

/// State name and neighbor count the view uses to style a cell.
fn cell_class(state: CellDisplayState) -> (&'static str, u8) {
    use CellDisplayState::*;
    match state {
        Hidden => ("hidden", 0),
        Flagged => ("flag", 0),
        RevealedNumber(count) => ("open", count),
        RevealedMine => ("cake", 0),
        WronglyFlagged => ("wrong", 0),
    }
}

pub(crate) struct ViewRenderer(CakeView);

impl Renderer for ViewRenderer {
    fn render_cell(&mut self, (row, col): Coord2, state: CellDisplayState) {
        let (class, count) = cell_class(state);
        self.0.render_cell(row, col, class, count);
    }

    fn render_score(&mut self, score: u32) {
        self.0.render_score(score);
    }

    fn render_timer(&mut self, elapsed_secs: u32) {
        self.0.render_timer(elapsed_secs);
    }

    fn render_mines_remaining(&mut self, mines_remaining: i32) {
        self.0.render_mines_remaining(mines_remaining);
    }

    fn render_assist_count(&mut self, uses_remaining: u8) {
        self.0.render_assist_count(uses_remaining);
    }

    fn show_end_dialog(&mut self, is_win: bool, final_score: u32, final_time: u32) {
        self.0.show_end_dialog(is_win, final_score, final_time);
    }
}

/// Browser interval that feeds `tick` back into the controller once per second.
pub(crate) struct IntervalTicker {
    controller: Weak<RefCell<Controller>>,
    interval: Option<Interval>,
}

impl IntervalTicker {
    fn new(controller: Weak<RefCell<Controller>>) -> Self {
        Self {
            controller,
            interval: None,
        }
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self) {
        let controller = self.controller.clone();
        let mut missed = 0;
        let interval = Interval::new(TICK_MILLIS, move || {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            if deliver_ticks(&controller, &mut missed, Controller::tick) == 0 {
                log::warn!("Game busy, {} ticks pending", missed);
            }
        });
        if let Some(previous) = self.interval.replace(interval) {
            previous.cancel();
        }
    }

    fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }
}

/// The game handle exported to the page.
#[wasm_bindgen]
pub struct CakeGame {
    controller: Rc<RefCell<Controller>>,
}

#[wasm_bindgen]
impl CakeGame {
    #[wasm_bindgen(constructor)]
    pub fn new(view: CakeView) -> CakeGame {
        let seed = forced_seed().unwrap_or_else(js_random_seed);
        log::debug!("Game seed: {}", seed);

        let controller = Rc::new_cyclic(|weak| {
            RefCell::new(GameController::new(
                ViewRenderer(view),
                IntervalTicker::new(weak.clone()),
                seed,
            ))
        });
        CakeGame { controller }
    }

    #[wasm_bindgen(js_name = cellPrimary)]
    pub fn cell_primary(&self, row: Coord, col: Coord) {
        self.with_controller(|controller| controller.on_cell_primary_interact(row, col));
    }

    #[wasm_bindgen(js_name = cellSecondary)]
    pub fn cell_secondary(&self, row: Coord, col: Coord) {
        self.with_controller(|controller| controller.on_cell_secondary_interact(row, col));
    }

    pub fn assist(&self) {
        self.with_controller(|controller| controller.on_assist_invoke());
    }

    /// Starts a fresh game, `difficulty` is one of `easy`, `medium` or `hard`.
    pub fn start(&self, difficulty: &str) -> Result<(), JsError> {
        match self.with_controller(|controller| controller.on_start_requested(difficulty)) {
            Some(result) => result.map_err(JsError::from),
            None => Ok(()),
        }
    }

    pub fn stop(&self) {
        self.with_controller(|controller| controller.stop_game());
    }

    /// Lets the page confirm before throwing away a game in progress.
    #[wasm_bindgen(js_name = isInProgress)]
    pub fn is_in_progress(&self) -> bool {
        self.controller
            .try_borrow()
            .map(|controller| controller.is_in_progress())
            .unwrap_or(false)
    }

    fn with_controller<U>(&self, f: impl FnOnce(&mut Controller) -> U) -> Option<U> {
        let result = try_with(&self.controller, f);
        if result.is_none() {
            log::warn!("Game busy, dropping re-entrant call");
        }
        result
    }
}
