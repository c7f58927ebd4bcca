//! Episode state and its transition function.
use super::motion::move_people;
use crate::{Coord, GridAct, GridObs, BOT_PLANE, ITEM_PLANE, PEOPLE_PLANE};
use rand::Rng;
use std::collections::BTreeSet;

/// Cost of every step.
pub(super) const LIVING_COST: f32 = -0.01;

/// Reward per collected item.
pub(super) const PICK_REWARD: f32 = 1.0;

/// Reward for reaching the drop zone with every item.
pub(super) const DELIVERY_REWARD: f32 = 5.0;

/// Penalty when a person ends up on the bot's cell.
pub(super) const COLLISION_PENALTY: f32 = -2.0;

/// Outcome of [`EpisodeState::transition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Transition {
    pub reward: f32,
    pub is_terminated: bool,
    pub is_truncated: bool,
}

/// The whole state of an episode.
///
/// The environment replaces it wholesale on reset and layout override and
/// advances it only through [`EpisodeState::transition`]. Callers get shared
/// references for rendering and recording.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeState {
    rows: usize,
    cols: usize,
    items: Vec<Coord>,
    picked: BTreeSet<usize>,
    people: Vec<Coord>,
    bot: Coord,
    drop: Coord,
    steps: usize,
    done: bool,
}

impl EpisodeState {
    pub(super) fn new(
        rows: usize,
        cols: usize,
        items: Vec<Coord>,
        people: Vec<Coord>,
        bot: Coord,
        drop: Coord,
    ) -> Self {
        Self {
            rows,
            cols,
            items,
            picked: BTreeSet::new(),
            people,
            bot,
            drop,
            steps: 0,
            done: false,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Item coordinates; the position in the slice is the item index.
    pub fn items(&self) -> &[Coord] {
        &self.items
    }

    /// Indices of collected items, in ascending order.
    pub fn picked(&self) -> &BTreeSet<usize> {
        &self.picked
    }

    /// Current positions of people.
    pub fn people(&self) -> &[Coord] {
        &self.people
    }

    /// Position of the bot.
    pub fn bot(&self) -> Coord {
        self.bot
    }

    /// Drop zone.
    pub fn drop_zone(&self) -> Coord {
        self.drop
    }

    /// Steps taken in the episode.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// `true` once the episode succeeded or failed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances the episode by one step.
    ///
    /// A finished episode is left untouched and yields zero reward.
    pub(super) fn transition<R: Rng + ?Sized>(
        &mut self,
        act: GridAct,
        rng: &mut R,
        max_steps: usize,
    ) -> Transition {
        if self.done {
            return Transition {
                reward: 0.0,
                is_terminated: true,
                is_truncated: false,
            };
        }

        self.steps += 1;
        let mut reward = LIVING_COST;

        // The bot never steps onto a person.
        let next = self.bot.offset(act.delta(), self.rows, self.cols);
        if !self.people.contains(&next) {
            self.bot = next;
        }

        for (ix, item) in self.items.iter().enumerate() {
            if *item == self.bot && self.picked.insert(ix) {
                reward += PICK_REWARD;
            }
        }

        if self.bot == self.drop && !self.items.is_empty() && self.picked.len() == self.items.len()
        {
            reward += DELIVERY_REWARD;
            self.done = true;
        }

        self.people = move_people(rng, &self.people, &self.items, self.rows, self.cols);

        if self.people.contains(&self.bot) {
            reward += COLLISION_PENALTY;
            self.done = true;
        }

        Transition {
            reward,
            is_terminated: self.done,
            is_truncated: self.steps >= max_steps,
        }
    }

    /// Encodes the state as a `(rows, cols, 3)` observation.
    pub fn observe(&self) -> GridObs {
        let mut obs = GridObs::zeros(self.rows, self.cols);
        for &cell in self.items.iter() {
            obs.mark(cell, ITEM_PLANE);
        }
        for &cell in self.people.iter() {
            obs.mark(cell, PEOPLE_PLANE);
        }
        obs.mark(self.bot, BOT_PLANE);
        obs
    }

    /// Draws the grid with `.` (empty), `I` (item), `P` (person), `D` (drop
    /// zone) and `B` (bot), later ones drawn over earlier ones.
    pub fn render(&self) -> String {
        let mut grid = vec![vec!['.'; self.cols]; self.rows];
        let mut put = |cell: Coord, ch: char| grid[cell.0][cell.1] = ch;
        self.items.iter().for_each(|&c| put(c, 'I'));
        self.people.iter().for_each(|&c| put(c, 'P'));
        put(self.drop, 'D');
        put(self.bot, 'B');

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
