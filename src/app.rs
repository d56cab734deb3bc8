use crate::command::Command;
use crate::game::{Direction, Session, TickResult};
use crate::grid::Grid;
use crate::leaderboard::Leaderboard;
use crate::menu::{MainMenu, MenuOption};
use crate::scores::ScoreStore;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// The whole program's state: which screen is showing, the game session, and
/// the score store
#[derive(Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    screen: Screen,
    menu: MainMenu,
    session: Session<R>,
    store: ScoreStore,
    warning: Option<Warning>,
    tick_period: Duration,
    next_tick: Option<Instant>,
    outcome: Option<Outcome>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(grid: Grid, store: ScoreStore, tick_period: Duration, rng: R) -> App<R> {
        App {
            screen: Screen::Menu,
            menu: MainMenu::new(),
            session: Session::new(grid, rng),
            store,
            warning: None,
            tick_period,
            next_tick: None,
            outcome: None,
        }
    }

    /// Draw & process input until the user quits or picks "Exit"
    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<Outcome> {
        loop {
            if let Some(outcome) = self.outcome {
                tracing::info!(?outcome, "Shutting down");
                return Ok(outcome);
            }
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
        }
    }

    /// While a game is in play, wait for input only until the next tick is
    /// due; otherwise, block until input arrives.
    fn process_input(&mut self) -> io::Result<()> {
        if self.screen == Screen::Playing && self.warning.is_none() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.tick_period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.next_tick = None;
                self.tick();
                return Ok(());
            }
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        if let Some(ref warning) = self.warning {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => self.warning = None,
                Some(WarningOutcome::Quit) => self.outcome = Some(Outcome::Quit),
                None => (),
            }
            return;
        }
        if cmd == Command::Quit {
            self.outcome = Some(Outcome::Quit);
            return;
        }
        match self.screen {
            Screen::Menu => match self.menu.handle_command(cmd) {
                Some(MenuOption::Start) => self.start(),
                Some(MenuOption::Scores) => self.show_scores(),
                Some(MenuOption::Exit) => self.outcome = Some(Outcome::Exit),
                None => (),
            },
            Screen::Playing => match cmd {
                Command::Up => self.steer(Direction::Up),
                Command::Down => self.steer(Direction::Down),
                Command::Left => self.steer(Direction::Left),
                Command::Right => self.steer(Direction::Right),
                Command::Esc => {
                    tracing::info!(score = self.session.score(), "Game cancelled");
                    self.screen = Screen::Menu;
                }
                _ => (),
            },
            Screen::Leaderboard(_) => {
                if cmd == Command::Esc {
                    self.screen = Screen::Menu;
                }
            }
        }
    }

    fn start(&mut self) {
        self.session.reset();
        self.next_tick = None;
        self.screen = Screen::Playing;
        tracing::info!("Game started");
    }

    fn steer(&mut self, direction: Direction) {
        if !self.session.steer(direction) {
            tracing::trace!(?direction, "Ignored attempt to reverse the snake");
        }
    }

    fn show_scores(&mut self) {
        match self.store.ranked_descending() {
            Ok(scores) => {
                tracing::info!(count = scores.len(), "Loaded leaderboard");
                self.screen = Screen::Leaderboard(Leaderboard::new(scores));
            }
            #[allow(trivial_casts)]
            Err(e) => {
                tracing::warn!(
                    error = &e as &dyn std::error::Error,
                    "Could not load leaderboard"
                );
                self.warning = Some(Warning::from_error(&e));
            }
        }
    }

    fn tick(&mut self) {
        if self.screen == Screen::Playing && self.session.tick() == Some(TickResult::Collided) {
            self.game_over();
        }
    }

    /// Record the final score, then get a fresh session ready and go back to
    /// the menu.  A failure to record the score does not stop the reset.
    #[allow(trivial_casts)]
    fn game_over(&mut self) {
        let score = self.session.score();
        tracing::info!(
            score,
            length = self.session.snake().len(),
            head = ?self.session.snake().head(),
            direction = ?self.session.snake().direction(),
            "Game over"
        );
        if let Err(e) = self.store.append(score) {
            tracing::warn!(
                score,
                path = %self.store.path().display(),
                error = &e as &dyn std::error::Error,
                "Could not save score"
            );
            self.warning = Some(Warning::from_error(&e));
        }
        self.session.reset();
        self.screen = Screen::Menu;
    }
}

impl<R> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Menu => self.menu.render(area, buf),
            Screen::Playing => self.session.render(area, buf),
            Screen::Leaderboard(ref board) => board.render(area, buf),
        }
        if let Some(ref warning) = self.warning {
            warning.render(area, buf);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Screen {
    Menu,
    Playing,
    Leaderboard(Leaderboard),
}

/// How the user chose to leave the program
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// Ctrl-C, from anywhere
    Quit,
    /// The "Exit" menu item
    Exit,
}
