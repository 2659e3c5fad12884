use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bonus awarded per elapsed second when the game is won.
pub const BONUS_PER_SECOND: u32 = 10;

/// Bonus awarded per correctly flagged mine when the game is won.
pub const BONUS_PER_CORRECT_FLAG: u32 = 20;

/// Valid transitions:
/// - NotStarted -> Active
/// - Active -> Won
/// - Active -> Lost
/// - Active -> NotStarted (stopped)
/// - any -> Active (restart)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Everything about one game, from start to finish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    config: GameConfig,
    difficulty: Option<Difficulty>,
    score: u32,
    elapsed_secs: u32,
    mines_remaining: i32,
    state: SessionState,
    is_first_move: bool,
    first_reveal: Option<Coord2>,
    assist: AssistTool,
}

impl Session {
    pub fn new(config: GameConfig, difficulty: Option<Difficulty>) -> Self {
        Self {
            board: Board::new(config.size),
            config,
            difficulty,
            score: 0,
            elapsed_secs: 0,
            mines_remaining: i32::from(config.mines),
            state: SessionState::NotStarted,
            is_first_move: true,
            first_reveal: None,
            assist: AssistTool::new(config.assist_uses),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// `None` for sessions started from a custom config.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Mines minus flags, can go below zero when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_first_move(&self) -> bool {
        self.is_first_move
    }

    /// The cell the mines were placed around.
    pub fn first_reveal(&self) -> Option<Coord2> {
        self.first_reveal
    }

    pub fn assist(&self) -> AssistTool {
        self.assist
    }

    pub fn assist_uses_remaining(&self) -> u8 {
        self.assist.uses_remaining()
    }

    fn display_state(&self, coords: Coord2) -> CellDisplayState {
        self.board[coords].display_state(self.state.is_finished())
    }
}

/// Owns the current [`Session`] and turns player intents into engine calls and render requests.
#[derive(Debug)]
pub struct GameController<R, T> {
    session: Session,
    renderer: R,
    ticker: T,
    rng: SmallRng,
    timer_running: bool,
}

impl<R: Renderer, T: Ticker> GameController<R, T> {
    pub fn new(renderer: R, ticker: T, seed: u64) -> Self {
        let difficulty = Difficulty::default();
        Self {
            session: Session::new(difficulty.game_config(), Some(difficulty)),
            renderer,
            ticker,
            rng: SmallRng::seed_from_u64(seed),
            timer_running: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    /// A game that has seen at least one move, switching difficulty would throw it away.
    pub fn is_in_progress(&self) -> bool {
        self.session.state.is_active() && !self.session.is_first_move
    }

    pub fn on_cell_primary_interact(&mut self, row: Coord, col: Coord) {
        self.reveal_intent((row, col));
    }

    pub fn on_cell_secondary_interact(&mut self, row: Coord, col: Coord) {
        self.flag_intent((row, col));
    }

    pub fn on_assist_invoke(&mut self) {
        self.assist_intent();
    }

    /// Starts a new game from a difficulty key, unknown keys leave the current session untouched.
    pub fn on_start_requested(&mut self, difficulty_key: &str) -> Result<()> {
        let difficulty = difficulty_key.parse()?;
        self.start_game(difficulty)
    }

    pub fn start_game(&mut self, difficulty: Difficulty) -> Result<()> {
        self.start_with_config(difficulty.game_config(), Some(difficulty))
    }

    pub fn start_custom(&mut self, config: GameConfig) -> Result<()> {
        self.start_with_config(config, None)
    }

    fn start_with_config(&mut self, config: GameConfig, difficulty: Option<Difficulty>) -> Result<()> {
        self.reset(config, difficulty)?;

        let start = pick_start_cell(config.size, &mut self.rng);
        log::debug!("Automatic first move at {:?}", start);
        self.reveal_intent(start);
        Ok(())
    }

    /// Throws the current session away and waits in `Active` for the first reveal.
    fn reset(&mut self, config: GameConfig, difficulty: Option<Difficulty>) -> Result<()> {
        config.validate()?;
        self.stop_timer();

        self.session = Session::new(config, difficulty);
        self.session.state = SessionState::Active;
        log::debug!(
            "New game: {:?} {}x{} with {} mines",
            difficulty,
            config.size.0,
            config.size.1,
            config.mines
        );

        self.render_all();
        Ok(())
    }

    /// Leaves the game without a verdict, used when the player switches difficulty mid-game.
    pub fn stop_game(&mut self) {
        if !self.session.state.is_active() {
            return;
        }

        self.session.state = SessionState::NotStarted;
        self.stop_timer();
        self.session.assist.disable();
        log::debug!("Game stopped");
    }

    /// Advances the clock by one second while a game is running.
    pub fn tick(&mut self) {
        if !self.timer_running || !self.session.state.is_active() {
            return;
        }

        self.session.elapsed_secs = self.session.elapsed_secs.saturating_add(1);
        self.renderer.render_timer(self.session.elapsed_secs);
    }

    pub fn reveal_intent(&mut self, coords: Coord2) {
        if !self.session.state.is_active() {
            log::trace!("Ignoring reveal at {:?}, game is not active", coords);
            return;
        }

        match self.session.board.cell(coords) {
            Ok(cell) if cell.is_revealable() => {}
            Ok(_) => return,
            Err(_) => {
                log::debug!("Ignoring reveal outside the board at {:?}", coords);
                return;
            }
        }

        if self.session.is_first_move {
            if let Err(err) = self.begin_play(coords) {
                log::error!("Could not place mines: {}", err);
                return;
            }
        }

        let report = match reveal_cell(&mut self.session.board, coords) {
            Ok(report) => report,
            Err(err) => {
                log::debug!("Ignoring reveal at {:?}: {}", coords, err);
                return;
            }
        };

        for &changed in &report.changed {
            self.render_cell(changed);
        }
        if report.score_delta > 0 {
            self.session.score = self.session.score.saturating_add(report.score_delta);
            self.renderer.render_score(self.session.score);
        }

        match report.outcome {
            RevealOutcome::HitMine => self.end_game(false),
            RevealOutcome::Revealed | RevealOutcome::NoChange => self.check_win(),
        }
    }

    /// Places the mines around the first revealed cell and sets the clock and assist tool going.
    fn begin_play(&mut self, anchor: Coord2) -> Result<()> {
        let config = self.session.config;
        place_mines(&mut self.session.board, config.mines, anchor, &mut self.rng)?;

        self.session.is_first_move = false;
        self.session.first_reveal = Some(anchor);
        self.session.mines_remaining = i32::from(config.mines);
        self.renderer
            .render_mines_remaining(self.session.mines_remaining);

        self.start_timer();
        self.session.assist.enable();
        self.renderer
            .render_assist_count(self.session.assist.uses_remaining());
        Ok(())
    }

    pub fn flag_intent(&mut self, coords: Coord2) {
        if !self.session.state.is_active() || self.session.is_first_move {
            log::trace!("Ignoring flag at {:?}, no move made yet or game over", coords);
            return;
        }

        match toggle_flag(&mut self.session.board, coords) {
            Ok(outcome) if outcome.has_update() => self.apply_flag(coords, outcome),
            Ok(_) => {}
            Err(_) => log::debug!("Ignoring flag outside the board at {:?}", coords),
        }
    }

    pub fn assist_intent(&mut self) {
        if !self.session.state.is_active() {
            return;
        }

        let outcome = self
            .session
            .assist
            .invoke(&mut self.session.board, &mut self.rng);
        match outcome {
            Ok(AssistOutcome::Flagged(coords)) => {
                self.renderer
                    .render_assist_count(self.session.assist.uses_remaining());
                self.apply_flag(coords, FlagOutcome::Flagged);
            }
            Ok(AssistOutcome::NoCandidates | AssistOutcome::Unavailable) => {}
            Err(err) => log::warn!("Assist failed: {}", err),
        }
    }

    fn apply_flag(&mut self, coords: Coord2, outcome: FlagOutcome) {
        self.session.mines_remaining += outcome.budget_delta();
        self.render_cell(coords);
        self.renderer
            .render_mines_remaining(self.session.mines_remaining);
        self.check_win();
    }

    fn check_win(&mut self) {
        if is_win(&self.session.board, self.session.config.safe_cell_count()) {
            self.end_game(true);
        }
    }

    fn end_game(&mut self, won: bool) {
        if !self.session.state.is_active() {
            return;
        }

        self.session.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        self.stop_timer();
        self.session.assist.disable();

        let mut changed = Vec::new();
        for cell in self.session.board.cells_mut() {
            if cell.is_mine && !cell.is_flagged {
                if !cell.is_revealed {
                    cell.is_revealed = true;
                    changed.push(cell.coords);
                }
            } else if !cell.is_mine && cell.is_flagged {
                changed.push(cell.coords);
            }
        }
        for coords in changed {
            self.render_cell(coords);
        }

        if won {
            let correct_flags = u32::from(self.session.board.correct_flag_count());
            let bonus = self
                .session
                .elapsed_secs
                .saturating_mul(BONUS_PER_SECOND)
                .saturating_add(correct_flags * BONUS_PER_CORRECT_FLAG);
            self.session.score = self.session.score.saturating_add(bonus);
            log::debug!("Won with bonus {}", bonus);
        } else {
            log::debug!("Lost after {} seconds", self.session.elapsed_secs);
        }

        self.renderer.render_score(self.session.score);
        self.renderer
            .show_end_dialog(won, self.session.score, self.session.elapsed_secs);
    }

    fn start_timer(&mut self) {
        if !self.timer_running {
            self.timer_running = true;
            self.ticker.start();
        }
    }

    fn stop_timer(&mut self) {
        if self.timer_running {
            self.timer_running = false;
            self.ticker.stop();
        }
    }

    fn render_cell(&mut self, coords: Coord2) {
        let state = self.session.display_state(coords);
        self.renderer.render_cell(coords, state);
    }

    fn render_all(&mut self) {
        let ended = self.session.state.is_finished();
        for (coords, cell) in self.session.board.indexed_cells() {
            self.renderer.render_cell(coords, cell.display_state(ended));
        }
        self.renderer.render_score(self.session.score);
        self.renderer.render_timer(self.session.elapsed_secs);
        self.renderer
            .render_mines_remaining(self.session.mines_remaining);
        self.renderer
            .render_assist_count(self.session.assist.uses_remaining());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        cells: HashMap<Coord2, CellDisplayState>,
        score: u32,
        timer: u32,
        mines_remaining: i32,
        assist_count: u8,
        end_dialog: Option<(bool, u32, u32)>,
    }

    impl Renderer for RecordingRenderer {
        fn render_cell(&mut self, coords: Coord2, state: CellDisplayState) {
            self.cells.insert(coords, state);
        }

        fn render_score(&mut self, score: u32) {
            self.score = score;
        }

        fn render_timer(&mut self, elapsed_secs: u32) {
            self.timer = elapsed_secs;
        }

        fn render_mines_remaining(&mut self, mines_remaining: i32) {
            self.mines_remaining = mines_remaining;
        }

        fn render_assist_count(&mut self, uses_remaining: u8) {
            self.assist_count = uses_remaining;
        }

        fn show_end_dialog(&mut self, is_win: bool, final_score: u32, final_time: u32) {
            assert!(self.end_dialog.is_none(), "end dialog shown twice");
            self.end_dialog = Some((is_win, final_score, final_time));
        }
    }

    #[derive(Debug, Default)]
    struct CountingTicker {
        starts: u32,
        stops: u32,
    }

    impl Ticker for CountingTicker {
        fn start(&mut self) {
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    type TestController = GameController<RecordingRenderer, CountingTicker>;

    fn controller(seed: u64) -> TestController {
        GameController::new(RecordingRenderer::default(), CountingTicker::default(), seed)
    }

    /// Active easy game whose first reveal happened at `first`.
    fn easy_game_from(seed: u64, first: Coord2) -> TestController {
        let mut game = controller(seed);
        game.reset(Difficulty::Easy.game_config(), Some(Difficulty::Easy))
            .unwrap();
        game.reveal_intent(first);
        game
    }

    fn all_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
        (0..size.0).flat_map(move |row| (0..size.1).map(move |col| (row, col)))
    }

    fn find(game: &TestController, predicate: impl Fn(&Cell) -> bool) -> Option<Coord2> {
        game.session()
            .board()
            .cells()
            .find(|&cell| predicate(cell))
            .map(|cell| cell.coords)
    }

    #[test]
    fn new_controller_is_not_started() {
        let mut game = controller(1);

        assert_eq!(game.session().state(), SessionState::NotStarted);
        game.reveal_intent((3, 3));
        game.assist_intent();
        game.tick();

        assert_eq!(game.session().board().revealed_safe_count(), 0);
        assert_eq!(game.ticker().starts, 0);
    }

    #[test]
    fn start_game_makes_a_safe_first_move() {
        let mut game = controller(11);

        game.start_game(Difficulty::Medium).unwrap();

        let session = game.session();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.difficulty(), Some(Difficulty::Medium));
        assert!(!session.is_first_move());
        assert!(game.is_in_progress());

        let first = session.first_reveal().unwrap();
        assert!((10..=20).contains(&first.0) && (10..=20).contains(&first.1));
        assert!(session.board()[first].is_revealed);
        assert_eq!(session.board()[first].neighbor_mines, 0);
        assert_eq!(session.board().mine_count(), 254);
        for coords in safe_zone(session.board().size(), first) {
            assert!(!session.board()[coords].is_mine);
            assert!(session.board()[coords].is_revealed);
        }

        assert!(game.is_timer_running());
        assert_eq!(game.ticker().starts, 1);
        assert!(session.assist().is_available());
        assert_eq!(game.renderer().assist_count, 3);
        assert_eq!(game.renderer().mines_remaining, 254);
        assert_eq!(game.renderer().cells.len(), 961);
        assert_eq!(game.renderer().cells[&first], CellDisplayState::RevealedNumber(0));
    }

    #[test]
    fn first_reveal_in_center_flood_fills_and_scores() {
        let mut game = controller(2024);
        game.reset(Difficulty::Easy.game_config(), Some(Difficulty::Easy))
            .unwrap();
        assert_eq!(game.ticker().starts, 0);

        game.reveal_intent((15, 15));

        let session = game.session();
        let board = session.board();
        let revealed = board.revealed_safe_count();
        assert_eq!(board[(15, 15)].neighbor_mines, 0);
        assert!(revealed >= 9, "the whole safe zone opens");
        assert_eq!(session.score(), 10 * u32::from(revealed));
        assert_eq!(game.renderer().score, session.score());

        // every revealed cell is reachable from the start through revealed zero cells
        let mut reached = vec![(15, 15)];
        let mut seen = std::collections::HashSet::from([(15, 15)]);
        while let Some(coords) = reached.pop() {
            if board[coords].neighbor_mines != 0 {
                continue;
            }
            for next in board.iter_neighbors(coords) {
                if board[next].is_revealed && seen.insert(next) {
                    reached.push(next);
                }
            }
        }
        assert_eq!(seen.len(), usize::from(revealed));
        for cell in board.cells().filter(|cell| cell.is_revealed) {
            assert_eq!(
                game.renderer().cells[&cell.coords],
                CellDisplayState::RevealedNumber(cell.neighbor_mines)
            );
        }
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut game = easy_game_from(5, (15, 15));
        let mine = find(&game, |cell| cell.is_mine).unwrap();
        let flagged_mine = find(&game, |cell| cell.is_mine && cell.coords != mine).unwrap();
        let wrong_flag = find(&game, |cell| !cell.is_mine && !cell.is_revealed).unwrap();
        game.flag_intent(flagged_mine);
        game.flag_intent(wrong_flag);
        game.tick();
        game.tick();
        let score_before = game.session().score();

        game.reveal_intent(mine);

        let session = game.session();
        assert_eq!(session.state(), SessionState::Lost);
        assert!(!game.is_timer_running());
        assert_eq!(game.ticker().stops, 1);
        assert_eq!(session.score(), score_before, "no bonus on a loss");
        assert_eq!(game.renderer().end_dialog, Some((false, score_before, 2)));
        assert!(!session.assist().is_available());

        for cell in session.board().cells().filter(|cell| cell.is_mine) {
            if cell.coords == flagged_mine {
                assert!(!cell.is_revealed);
                assert_eq!(game.renderer().cells[&cell.coords], CellDisplayState::Flagged);
            } else {
                assert!(cell.is_revealed);
                assert_eq!(game.renderer().cells[&cell.coords], CellDisplayState::RevealedMine);
            }
        }
        assert_eq!(
            game.renderer().cells[&wrong_flag],
            CellDisplayState::WronglyFlagged
        );
    }

    #[test]
    fn intents_after_the_end_are_ignored() {
        let mut game = easy_game_from(5, (15, 15));
        let mine = find(&game, |cell| cell.is_mine).unwrap();
        game.reveal_intent(mine);
        let snapshot = game.session().clone();

        let hidden = find(&game, |cell| !cell.is_revealed).unwrap();
        game.reveal_intent(hidden);
        game.flag_intent(hidden);
        game.assist_intent();
        game.tick();
        game.stop_game();

        assert_eq!(game.session(), &snapshot);
        assert_eq!(game.ticker().stops, 1);
    }

    #[test]
    fn flag_everything_then_reveal_the_rest_wins() {
        let mut game = easy_game_from(77, (15, 15));
        for _ in 0..7 {
            game.tick();
        }
        assert_eq!(game.renderer().timer, 7);

        let mines: Vec<_> = game
            .session()
            .board()
            .cells()
            .filter(|cell| cell.is_mine)
            .map(|cell| cell.coords)
            .collect();
        assert_eq!(mines.len(), 181);
        for &coords in &mines {
            game.flag_intent(coords);
        }
        assert_eq!(game.session().mines_remaining(), 0);
        assert_eq!(game.session().state(), SessionState::Active);

        for coords in all_coords((31, 31)) {
            game.reveal_intent(coords);
        }

        let session = game.session();
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.board().revealed_safe_count(), 780);
        let expected = 780 * 10 + 7 * 10 + 181 * 20;
        assert_eq!(session.score(), expected);
        assert_eq!(game.renderer().end_dialog, Some((true, expected, 7)));
        assert_eq!(game.ticker().stops, 1);
        assert!(mines.iter().all(|&coords| !session.board()[coords].is_revealed));
    }

    #[test]
    fn flagging_waits_for_the_first_move() {
        let mut game = controller(3);
        game.reset(Difficulty::Easy.game_config(), Some(Difficulty::Easy))
            .unwrap();

        game.flag_intent((0, 0));

        assert!(!game.session().board()[(0, 0)].is_flagged);
        assert_eq!(game.session().mines_remaining(), 181);
        assert!(!game.is_in_progress());
    }

    #[test]
    fn flag_toggle_updates_mines_remaining() {
        let mut game = easy_game_from(8, (15, 15));
        let hidden = find(&game, |cell| !cell.is_revealed).unwrap();
        let revealed = (15, 15);

        game.flag_intent(hidden);
        assert_eq!(game.session().mines_remaining(), 180);
        assert_eq!(game.renderer().mines_remaining, 180);
        assert_eq!(game.renderer().cells[&hidden], CellDisplayState::Flagged);

        game.flag_intent(revealed);
        assert_eq!(game.session().mines_remaining(), 180);

        game.flag_intent(hidden);
        assert_eq!(game.session().mines_remaining(), 181);
        assert_eq!(game.renderer().cells[&hidden], CellDisplayState::Hidden);

        // flagged cells cannot be revealed
        game.flag_intent(hidden);
        game.reveal_intent(hidden);
        assert!(!game.session().board()[hidden].is_revealed);
    }

    #[test]
    fn over_flagging_goes_negative() {
        let mut game = controller(13);
        game.reset(Difficulty::Hard.game_config(), Some(Difficulty::Hard))
            .unwrap();
        game.reveal_intent((15, 15));
        assert_eq!(game.session().state(), SessionState::Active);

        let hidden: Vec<_> = game
            .session()
            .board()
            .cells()
            .filter(|cell| !cell.is_revealed)
            .map(|cell| cell.coords)
            .collect();
        for &coords in &hidden {
            game.flag_intent(coords);
        }

        let expected = 331 - hidden.len() as i32;
        assert!(expected < 0);
        assert_eq!(game.session().mines_remaining(), expected);
        assert_eq!(game.renderer().mines_remaining, expected);
    }

    #[test]
    fn out_of_bounds_intents_are_ignored() {
        let mut game = easy_game_from(4, (15, 15));
        let snapshot = game.session().clone();

        game.on_cell_primary_interact(31, 0);
        game.on_cell_secondary_interact(0, 200);

        assert_eq!(game.session(), &snapshot);
    }

    #[test]
    fn out_of_bounds_first_move_places_nothing() {
        let mut game = controller(4);
        game.reset(Difficulty::Easy.game_config(), Some(Difficulty::Easy))
            .unwrap();

        game.reveal_intent((40, 40));

        assert!(game.session().is_first_move());
        assert_eq!(game.session().board().mine_count(), 0);
        assert_eq!(game.ticker().starts, 0);
    }

    #[test]
    fn assist_flags_a_mine_and_spends_a_use() {
        let mut game = easy_game_from(21, (15, 15));

        game.on_assist_invoke();

        let session = game.session();
        assert_eq!(session.assist_uses_remaining(), 1);
        assert_eq!(game.renderer().assist_count, 1);
        assert_eq!(session.mines_remaining(), 180);
        assert_eq!(session.board().correct_flag_count(), 1);
        assert_eq!(session.board().flagged_count(), 1);

        game.on_assist_invoke();
        game.on_assist_invoke();

        assert_eq!(game.session().assist_uses_remaining(), 0);
        assert_eq!(game.session().board().correct_flag_count(), 2);
        assert_eq!(game.session().mines_remaining(), 179);
    }

    #[test]
    fn assist_without_candidates_keeps_its_uses() {
        let mut game = easy_game_from(34, (15, 15));
        let mines: Vec<_> = game
            .session()
            .board()
            .cells()
            .filter(|cell| cell.is_mine)
            .map(|cell| cell.coords)
            .collect();
        for coords in mines {
            game.flag_intent(coords);
        }
        let snapshot = game.session().clone();

        game.assist_intent();

        assert_eq!(game.session(), &snapshot);
        assert_eq!(game.session().assist_uses_remaining(), 2);
    }

    #[test]
    fn restart_stops_the_old_timer_and_rearms() {
        let mut game = controller(99);
        game.start_game(Difficulty::Easy).unwrap();
        game.tick();
        game.tick();

        game.on_start_requested("hard").unwrap();

        assert_eq!(game.ticker().stops, 1);
        assert_eq!(game.ticker().starts, 2);
        let session = game.session();
        assert_eq!(session.difficulty(), Some(Difficulty::Hard));
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.board().mine_count(), 331);
        assert_eq!(session.assist_uses_remaining(), 4);
        assert_eq!(game.renderer().timer, 0);
    }

    #[test]
    fn unknown_difficulty_leaves_session_alone() {
        let mut game = controller(99);
        game.start_game(Difficulty::Easy).unwrap();
        let snapshot = game.session().clone();

        let result = game.on_start_requested("impossible");

        assert_eq!(
            result,
            Err(GameError::UnknownDifficulty("impossible".into()))
        );
        assert_eq!(game.session(), &snapshot);
        assert_eq!(game.ticker().stops, 0);
    }

    #[test]
    fn start_custom_validates_config() {
        let mut game = controller(99);

        let result = game.start_custom(GameConfig::new_unchecked((3, 3), 1, 1));

        assert_eq!(
            result,
            Err(GameError::Configuration {
                mines: 1,
                available: 0
            })
        );
        assert_eq!(game.session().state(), SessionState::NotStarted);
    }

    #[test]
    fn stop_game_halts_the_clock() {
        let mut game = controller(17);
        game.start_game(Difficulty::Easy).unwrap();
        game.tick();

        game.stop_game();
        game.tick();
        game.stop_game();

        assert_eq!(game.session().state(), SessionState::NotStarted);
        assert_eq!(game.session().elapsed_secs(), 1);
        assert_eq!(game.ticker().stops, 1);
        assert!(!game.is_in_progress());
        assert!(game.renderer().end_dialog.is_none());
    }

    #[test]
    fn win_matches_revealed_safe_count_through_random_play() {
        use rand::Rng;

        for seed in 0..20 {
            let mut game = controller(seed);
            game.start_custom(GameConfig::new((9, 9), 10, 1).unwrap())
                .unwrap();
            let mut picker = SmallRng::seed_from_u64(seed + 1000);

            while game.session().state().is_active() {
                let coords = (picker.random_range(0..9), picker.random_range(0..9));
                if picker.random_bool(0.2) {
                    game.flag_intent(coords);
                } else {
                    game.reveal_intent(coords);
                }

                let session = game.session();
                let all_safe_revealed =
                    session.board().revealed_safe_count() == session.config().safe_cell_count();
                assert_eq!(session.state() == SessionState::Won, all_safe_revealed);
                assert_eq!(
                    session.mines_remaining(),
                    10 - i32::from(session.board().flagged_count())
                );
            }

            assert!(game.session().state().is_finished());
            assert_eq!(game.ticker().stops, 1);
            assert!(game.renderer().end_dialog.is_some());
        }
    }
}
