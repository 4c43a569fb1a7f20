use crate::*;

/// Player input, as reported by whatever drives the interactive loop.
pub trait InputHandler {
    /// Primary button on a cell: reveal it.
    fn primary_interaction(&mut self, coords: Coord2) -> Result<()>;
    /// Secondary button on a cell: toggle its flag.
    fn secondary_interaction(&mut self, coords: Coord2) -> Result<()>;
    /// The end-of-game dialog was answered with "play again".
    fn end_dialog_confirmed(&mut self) -> Result<()>;
    /// The end-of-game dialog was answered with "quit".
    fn end_dialog_dismissed(&mut self);
}

/// Presentation collaborator of a [`GameSession`].
///
/// It never holds game state of its own: on `redraw` it reads whatever it needs from the board.
pub trait Frontend {
    fn redraw(&mut self, board: &Board);
    fn show_end_dialog(&mut self, outcome: Outcome);
    fn quit(&mut self);
}

/// Drives one board at a time for a frontend, swapping in a fresh board on restart.
#[derive(Debug)]
pub struct GameSession<F, G> {
    config: BoardConfig,
    generator: G,
    board: Board,
    frontend: F,
    dialog_open: bool,
}

impl<F: Frontend, G: MineGenerator> GameSession<F, G> {
    pub fn new(config: BoardConfig, mut generator: G, frontend: F) -> Result<Self> {
        let board = Board::generate(config, &mut generator)?;
        let mut session = Self {
            config,
            generator,
            board,
            frontend,
            dialog_open: false,
        };
        session.frontend.redraw(&session.board);
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Whether the game ended and the frontend still owes an answer to the end dialog.
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Throws away the current board, finished or not, and starts over on a fresh one.
    pub fn restart(&mut self) -> Result<()> {
        self.board = Board::generate(self.config, &mut self.generator)?;
        self.dialog_open = false;
        log::debug!("Started a new game");
        self.frontend.redraw(&self.board);
        Ok(())
    }

    /// Ends the session at any point and tells the frontend to close.
    pub fn quit(&mut self) {
        self.dialog_open = false;
        log::debug!("Session ended");
        self.frontend.quit();
    }
}

impl<F: Frontend, G: MineGenerator> InputHandler for GameSession<F, G> {
    fn primary_interaction(&mut self, coords: Coord2) -> Result<()> {
        if self.dialog_open {
            log::debug!("Ignoring reveal at {:?} while the end dialog is open", coords);
            return Ok(());
        }

        let outcome = self.board.reveal(coords)?;
        self.frontend.redraw(&self.board);
        if outcome.is_terminal() {
            log::debug!("Game over: {:?}", outcome);
            self.dialog_open = true;
            self.frontend.show_end_dialog(outcome);
        }
        Ok(())
    }

    fn secondary_interaction(&mut self, coords: Coord2) -> Result<()> {
        if self.dialog_open {
            log::debug!("Ignoring flag at {:?} while the end dialog is open", coords);
            return Ok(());
        }

        self.board.toggle_flag(coords)?;
        self.frontend.redraw(&self.board);
        Ok(())
    }

    fn end_dialog_confirmed(&mut self) -> Result<()> {
        self.restart()
    }

    fn end_dialog_dismissed(&mut self) {
        self.quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    struct Recorder {
        redraws: usize,
        revealed: Vec<CellCount>,
        dialogs: Vec<Outcome>,
        quit: bool,
    }

    impl Frontend for Recorder {
        fn redraw(&mut self, board: &Board) {
            self.redraws += 1;
            self.revealed.push(board.revealed_count());
        }

        fn show_end_dialog(&mut self, outcome: Outcome) {
            self.dialogs.push(outcome);
        }

        fn quit(&mut self) {
            self.quit = true;
        }
    }

    fn session(mines: &[Coord2]) -> GameSession<Recorder, FixedMineGenerator> {
        let config = BoardConfig::with_mines((3, 3), mines.len() as CellCount).unwrap();
        GameSession::new(config, FixedMineGenerator::new(mines), Recorder::default()).unwrap()
    }

    #[test]
    fn construction_draws_once() {
        let session = session(&[(1, 1)]);

        assert_eq!(session.frontend().redraws, 1);
        assert_eq!(session.frontend().revealed, [0]);
        assert!(!session.is_dialog_open());
    }

    #[test]
    fn every_interaction_redraws() {
        let mut session = session(&[(1, 1)]);

        session.secondary_interaction((2, 2)).unwrap();
        session.primary_interaction((0, 0)).unwrap();
        session.primary_interaction((0, 0)).unwrap();

        assert_eq!(session.frontend().redraws, 4);
        assert_eq!(session.frontend().revealed, [0, 0, 1, 1]);
        assert!(session.frontend().dialogs.is_empty());
    }

    #[test]
    fn loss_opens_dialog_and_blocks_input() {
        let mut session = session(&[(1, 1)]);

        session.primary_interaction((1, 1)).unwrap();

        assert!(session.is_dialog_open());
        assert_eq!(session.frontend().dialogs, [Outcome::Lost]);
        assert_eq!(session.board().outcome(), Outcome::Lost);

        let redraws = session.frontend().redraws;
        session.primary_interaction((0, 0)).unwrap();
        session.secondary_interaction((0, 0)).unwrap();
        assert_eq!(session.frontend().redraws, redraws);
        assert_eq!(session.frontend().dialogs.len(), 1);
    }

    #[test]
    fn win_then_restart_builds_a_fresh_board() {
        let mut session = session(&[]);

        session.primary_interaction((0, 0)).unwrap();
        assert_eq!(session.frontend().dialogs, [Outcome::Won]);

        session.end_dialog_confirmed().unwrap();

        assert!(!session.is_dialog_open());
        assert_eq!(session.board().outcome(), Outcome::InProgress);
        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.frontend().revealed.last(), Some(&0));
        assert!(!session.frontend().quit);
    }

    #[test]
    fn dismissing_the_dialog_asks_the_frontend_to_quit() {
        let mut session = session(&[(0, 0)]);

        session.primary_interaction((0, 0)).unwrap();
        session.end_dialog_dismissed();

        assert!(session.frontend().quit);
    }

    #[test]
    fn restart_mid_game_discards_progress() {
        let mut session = session(&[(1, 1)]);
        session.secondary_interaction((1, 1)).unwrap();
        session.primary_interaction((0, 2)).unwrap();
        assert_eq!(session.board().revealed_count(), 1);

        session.restart().unwrap();

        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.board().flag_count(), 0);
        assert!(!session.is_dialog_open());
        assert!(session.frontend().dialogs.is_empty());
        assert_eq!(session.frontend().revealed.last(), Some(&0));
    }

    #[test]
    fn quit_mid_game_reaches_the_frontend() {
        let mut session = session(&[(1, 1)]);
        session.primary_interaction((0, 0)).unwrap();

        session.quit();

        assert!(session.frontend().quit);
        assert!(!session.is_dialog_open());
        assert_eq!(session.board().outcome(), Outcome::InProgress);
    }

    #[test]
    fn mismatched_generator_fails_construction() {
        let config = BoardConfig::with_mines((3, 3), 2).unwrap();
        let generator = FixedMineGenerator::new([(0, 0)]);

        assert!(matches!(
            GameSession::new(config, generator, Recorder::default()),
            Err(GameError::MineCountOutOfRange)
        ));
    }

    #[test]
    fn bounds_errors_reach_the_caller() {
        let mut session = session(&[(0, 0)]);

        assert_eq!(session.primary_interaction((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(session.secondary_interaction((0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(session.frontend().redraws, 1);
    }

    #[test]
    fn random_sessions_get_new_layouts_on_restart() {
        let config = BoardConfig::with_mines((16, 16), 40).unwrap();
        let mut session =
            GameSession::new(config, RandomMineGenerator::new(5), Recorder::default()).unwrap();
        let first = session.board().clone();

        session.end_dialog_confirmed().unwrap();

        assert_ne!(session.board(), &first);
        assert_eq!(session.board().mine_count(), 40);
    }
}
