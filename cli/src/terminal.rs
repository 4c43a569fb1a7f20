use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, bail};
use sweeper_core::{
    Board, Coord2, Frontend, GameSession, InputHandler, MineGenerator, Outcome, in_bounds,
};

/// Shown for cells that are neither revealed nor flagged.
pub(crate) const HIDDEN_SYMBOL: char = '.';

const HELP: &str = "\
commands:
  r <x> <y>   reveal a cell
  f <x> <y>   flag or unflag a cell
  n           start a new game
  q           quit
  ?           show this help";

/// Line-oriented frontend. It only buffers what the session asks it to show; [`run`] writes it out.
#[derive(Debug, Default)]
pub(crate) struct TerminalView {
    frame: Option<String>,
    end_dialog: Option<Outcome>,
    quit: bool,
}

impl TerminalView {
    pub fn take_frame(&mut self) -> Option<String> {
        self.frame.take()
    }

    pub fn take_end_dialog(&mut self) -> Option<Outcome> {
        self.end_dialog.take()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Frontend for TerminalView {
    fn redraw(&mut self, board: &Board) {
        self.frame = Some(render(board));
    }

    fn show_end_dialog(&mut self, outcome: Outcome) {
        self.end_dialog = Some(outcome);
    }

    fn quit(&mut self) {
        self.quit = true;
    }
}

/// Board as a table with column numbers on top and row numbers on the left, followed by a status line.
pub(crate) fn render(board: &Board) -> String {
    let mut frame = String::from("   ");
    for x in 0..board.width() {
        frame.push_str(&format!("{x:>3}"));
    }
    frame.push('\n');

    for y in 0..board.height() {
        frame.push_str(&format!("{y:>3}"));
        for x in 0..board.width() {
            let symbol = board
                .cell_view((x, y))
                .map_or('?', |view| view.symbol(HIDDEN_SYMBOL));
            frame.push_str(&format!("{symbol:>3}"));
        }
        frame.push('\n');
    }

    frame.push_str(&format!(
        "Mines: {}  Flags: {}\n",
        board.mine_count(),
        board.flag_count()
    ));
    frame
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Restart,
    Quit,
    Help,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command, type ? for help");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut parts)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut parts)?),
            "n" | "new" => Command::Restart,
            "q" | "quit" => Command::Quit,
            "?" | "h" | "help" => Command::Help,
            other => bail!("unknown command {other:?}, type ? for help"),
        };

        if parts.next().is_some() {
            bail!("too many arguments for {verb:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let x = parts.next().context("missing x coordinate")?;
    let y = parts.next().context("missing y coordinate")?;
    Ok((
        x.parse().with_context(|| format!("bad x coordinate {x:?}"))?,
        y.parse().with_context(|| format!("bad y coordinate {y:?}"))?,
    ))
}

/// Answer to "play again?": `Some(true)` restarts, `Some(false)` quits.
pub(crate) fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" | "q" | "quit" => Some(false),
        _ => None,
    }
}

fn end_message(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Won => Some("You cleared the board!"),
        Outcome::Lost => Some("Boom! You hit a mine."),
        Outcome::InProgress => None,
    }
}

/// Reads commands from `input` until the player quits or the input ends.
pub(crate) fn run<G: MineGenerator>(
    session: &mut GameSession<TerminalView, G>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    flush_frame(session, out)?;
    prompt(session, out)?;

    for line in input.lines() {
        let line = line.context("could not read input")?;

        if session.is_dialog_open() {
            match parse_answer(&line) {
                Some(true) => session.end_dialog_confirmed()?,
                Some(false) => session.end_dialog_dismissed(),
                None => writeln!(out, "Please answer y or n.")?,
            }
        } else if !line.trim().is_empty() {
            match line.parse::<Command>() {
                Ok(command) => execute(session, command, out)?,
                Err(err) => writeln!(out, "{err:#}")?,
            }
        }

        flush_frame(session, out)?;
        if let Some(message) = session.frontend_mut().take_end_dialog().and_then(end_message) {
            writeln!(out, "{message}")?;
        }
        if session.frontend().quit_requested() {
            log::debug!("Player quit");
            break;
        }
        prompt(session, out)?;
    }

    Ok(())
}

fn execute<G: MineGenerator>(
    session: &mut GameSession<TerminalView, G>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let size = session.board().size();
    let result = match command {
        Command::Reveal(coords) | Command::Flag(coords) if !in_bounds(coords, size) => {
            writeln!(
                out,
                "({}, {}) is outside the {}x{} board",
                coords.0, coords.1, size.0, size.1
            )?;
            return Ok(());
        }
        Command::Reveal(coords) => session.primary_interaction(coords),
        Command::Flag(coords) => session.secondary_interaction(coords),
        Command::Restart => session.restart(),
        Command::Quit => {
            session.quit();
            Ok(())
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            Ok(())
        }
    };

    if let Err(err) = result {
        log::warn!("{:?} failed: {}", command, err);
        writeln!(out, "error: {err}")?;
    }
    Ok(())
}

fn flush_frame<G: MineGenerator>(
    session: &mut GameSession<TerminalView, G>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(frame) = session.frontend_mut().take_frame() {
        write!(out, "{frame}")?;
    }
    Ok(())
}

fn prompt<G: MineGenerator>(
    session: &GameSession<TerminalView, G>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if session.is_dialog_open() {
        write!(out, "Play again? [y/n] ")?;
    } else {
        write!(out, "> ")?;
    }
    out.flush()?;
    Ok(())
}
