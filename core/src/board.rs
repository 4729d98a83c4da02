use std::collections::VecDeque;

use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// Dragons not placed yet, waiting for the first reveal.
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Serializable snapshot of the board's aggregate numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub width: Coord,
    pub height: Coord,
    pub dragons: CellCount,
    pub cell_size: f32,
    pub state: BoardState,
    pub flagged: CellCount,
    pub revealed: CellCount,
    pub dragons_remaining: isize,
    pub elapsed_secs: u64,
}

/// A single game, from first click to win or loss.
#[derive(Clone, Debug)]
pub struct Board<P = RandomPlacer> {
    config: BoardConfig,
    placer: P,
    layout: DragonLayout,
    status: Array2<CellStatus>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
    triggered_dragon: Option<Coord2>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Board<RandomPlacer> {
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::new(config, RandomPlacer::new(seed))
    }
}

impl<P: DragonPlacer> Board<P> {
    pub fn new(config: BoardConfig, placer: P) -> Self {
        Self {
            config,
            placer,
            layout: DragonLayout::empty(config.size()),
            status: Array2::default(config.size().ix()),
            revealed_count: 0,
            flagged_count: 0,
            state: BoardState::Ready,
            triggered_dragon: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Switches to a preset and starts over, discarding the current game.
    ///
    /// An invalid preset leaves the current game untouched.
    pub fn configure(&mut self, size_class: SizeClass, level: u16) -> Result<()> {
        let config = BoardConfig::preset(size_class, level)?;
        self.reconfigure(config);
        Ok(())
    }

    pub fn reconfigure(&mut self, config: BoardConfig) {
        self.config = config;
        self.reset();
    }

    /// Starts a fresh game with the current configuration.
    pub fn reset(&mut self) {
        let size = self.config.size();
        self.layout = DragonLayout::empty(size);
        self.status = Array2::default(size.ix());
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.state = BoardState::Ready;
        self.triggered_dragon = None;
        self.started_at = None;
        self.ended_at = None;
        log::debug!(
            "Board reset to {}x{} with {} dragons",
            size.1,
            size.0,
            self.config.dragons()
        );
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn dragons_placed(&self) -> bool {
        !self.state.is_ready()
    }

    pub fn layout(&self) -> &DragonLayout {
        &self.layout
    }

    pub fn triggered_dragon(&self) -> Option<Coord2> {
        self.triggered_dragon
    }

    pub fn total_dragons(&self) -> CellCount {
        self.config.dragons()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Dragons left to flag, negative when the player over-flags.
    pub fn dragons_remaining(&self) -> isize {
        (self.config.dragons() as isize) - (self.flagged_count as isize)
    }

    /// Seconds since the dragons were placed, frozen once the game ends.
    pub fn elapsed_secs(&self) -> u64 {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or_else(Instant::now)
                .duration_since(started_at)
                .as_secs(),
            None => 0,
        }
    }

    pub fn elapsed_hms(&self) -> String {
        format_elapsed(self.elapsed_secs())
    }

    /// Status of a cell, `None` off the board.
    pub fn status(&self, coords: Coord2) -> Option<CellStatus> {
        self.status.get(coords.ix()).copied()
    }

    /// What to draw for a cell, `None` off the board.
    pub fn display_at(&self, coords: Coord2) -> Option<DisplayCell> {
        let status = self.status(coords)?;
        Some(DisplayCell::from_parts(
            status,
            self.layout.is_dragon(coords),
            self.layout.adjacent_dragons(coords),
        ))
    }

    pub fn display_grid(&self) -> Array2<DisplayCell> {
        Array2::from_shape_fn(self.config.size().ix(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            DisplayCell::from_parts(
                self.status[coords.ix()],
                self.layout.is_dragon(coords),
                self.layout.adjacent_dragons(coords),
            )
        })
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            width: self.config.width(),
            height: self.config.height(),
            dragons: self.config.dragons(),
            cell_size: self.config.cell_size(),
            state: self.state,
            flagged: self.flagged_count,
            revealed: self.revealed_count,
            dragons_remaining: self.dragons_remaining(),
            elapsed_secs: self.elapsed_secs(),
        }
    }

    /// Places the dragons, keeping `safe` free. Does nothing once placed.
    pub fn spawn_dragons(&mut self, safe: Coord2) -> Result<()> {
        self.layout.validate_coords(safe)?;
        if self.dragons_placed() {
            log::debug!("Dragons already placed, ignoring spawn at {:?}", safe);
            return Ok(());
        }

        let layout = self.placer.place(&self.config, safe)?;
        if layout.size() != self.config.size()
            || layout.dragon_count() != self.config.dragons()
            || layout.is_dragon(safe)
        {
            log::warn!("Placer returned a layout that does not fit the board");
            return Err(GameError::InvalidLayout);
        }

        self.layout = layout;
        self.state = BoardState::Active;
        self.started_at = Some(Instant::now());
        log::debug!(
            "Spawned {} dragons, first cell {:?}",
            self.layout.dragon_count(),
            safe
        );
        Ok(())
    }

    /// Reveals a covered cell, flooding through zero-count neighbours.
    ///
    /// Off-board, revealed and flagged cells are left alone. On a fresh board
    /// the dragons are placed first, keeping this cell safe.
    pub fn uncover(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;
        if !self.status.in_bounds(coords) || !self.status[coords.ix()].is_covered() {
            return Ok(RevealOutcome::NoChange);
        }
        if !self.dragons_placed() {
            self.spawn_dragons(coords)?;
        }
        Ok(self.reveal_from(coords))
    }

    /// Uncovers the ring around an already revealed cell.
    ///
    /// Every covered neighbour is revealed whatever its count, zero ones
    /// flood as usual. The hub itself and flagged neighbours are unchanged.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.status[coords.ix()].is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }

        let ring: SmallVec<[Coord2; 8]> = self.layout.iter_neighbors(coords).collect();
        let mut outcome = RevealOutcome::NoChange;
        for neighbor in ring {
            outcome = outcome.merge(self.reveal_from(neighbor));
            if self.is_finished() {
                break;
            }
        }
        Ok(outcome)
    }

    /// Toggles a flag on a covered cell, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellStatus::*;

        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.status[coords.ix()];
        match *cell {
            Covered => {
                *cell = Flagged;
                self.flagged_count += 1;
            }
            Flagged => {
                *cell = Covered;
                self.flagged_count -= 1;
            }
            Revealed => return Ok(MarkOutcome::NoChange),
        }

        if self.all_dragons_flagged() {
            self.end_game(true);
            Ok(MarkOutcome::Won)
        } else {
            Ok(MarkOutcome::Changed)
        }
    }

    /// Applies one tick of input.
    pub fn update(&mut self, click: Click) -> Result<UpdateOutcome> {
        let Some(coords) = click.target else {
            return Ok(UpdateOutcome::NoChange);
        };
        let Some(status) = self.status(coords) else {
            return Ok(UpdateOutcome::NoChange);
        };
        if self.is_finished() {
            log::trace!("Ignoring {:?}, game is over", click);
            return Ok(UpdateOutcome::NoChange);
        }

        let both = MouseButtons::LEFT | MouseButtons::RIGHT;
        let outcome = if click.buttons == both {
            if status.is_revealed() {
                log::debug!("Chord at {:?}", coords);
                UpdateOutcome::Reveal(self.chord(coords)?)
            } else {
                UpdateOutcome::NoChange
            }
        } else if click.buttons == MouseButtons::RIGHT {
            if status.is_revealed() {
                UpdateOutcome::NoChange
            } else {
                log::debug!("Toggle flag at {:?}", coords);
                UpdateOutcome::Mark(self.toggle_flag(coords)?)
            }
        } else if click.buttons == MouseButtons::LEFT {
            log::debug!("Uncover at {:?}", coords);
            UpdateOutcome::Reveal(self.uncover(coords)?)
        } else {
            UpdateOutcome::NoChange
        };
        Ok(outcome)
    }

    /// Maps raw pointer input onto the grid and applies it.
    pub fn update_pointer(
        &mut self,
        pointer: PointerInput,
        geometry: &BoardGeometry,
    ) -> Result<UpdateOutcome> {
        let click = geometry.click(pointer, self.size());
        self.update(click)
    }

    /// Breadth-first reveal starting at a covered cell.
    fn reveal_from(&mut self, start: Coord2) -> RevealOutcome {
        if !self.status[start.ix()].is_covered() {
            return RevealOutcome::NoChange;
        }

        if self.layout.is_dragon(start) {
            self.status[start.ix()] = CellStatus::Revealed;
            self.triggered_dragon = Some(start);
            log::debug!("Dragon revealed at {:?}", start);
            self.end_game(false);
            return RevealOutcome::HitDragon;
        }

        let mut visited = HashSet::new();
        visited.insert(start);
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            self.status[coords.ix()] = CellStatus::Revealed;
            self.revealed_count += 1;

            let count = self.layout.adjacent_dragons(coords);
            log::trace!("Revealed {:?}, adjacent dragons: {}", coords, count);
            if count != 0 {
                continue;
            }
            for neighbor in self.layout.iter_neighbors(coords) {
                if self.status[neighbor.ix()].is_covered() && visited.insert(neighbor) {
                    to_visit.push_back(neighbor);
                }
            }
        }

        if self.revealed_count == self.layout.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn all_dragons_flagged(&self) -> bool {
        self.dragons_placed()
            && self.flagged_count == self.layout.dragon_count()
            && self
                .layout
                .iter_dragons()
                .all(|coords| self.status[coords.ix()].is_flagged())
    }

    /// Settles the final board: flags every dragon on a win, uncovers the
    /// unflagged ones on a loss.
    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }
        self.state = if won { BoardState::Won } else { BoardState::Lost };
        self.ended_at = Some(Instant::now());
        log::debug!("Game ended, state: {:?}", self.state);

        let dragons: Vec<Coord2> = self.layout.iter_dragons().collect();
        for coords in dragons {
            let cell = &mut self.status[coords.ix()];
            if !cell.is_covered() {
                continue;
            }
            if won {
                *cell = CellStatus::Flagged;
                self.flagged_count += 1;
            } else {
                *cell = CellStatus::Revealed;
            }
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl<P: DragonPlacer> core::fmt::Display for Board<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in self.display_grid().rows() {
            let line: String = row.iter().map(|cell| cell.as_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// `HH:MM:SS`, as shown on the timer label.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
