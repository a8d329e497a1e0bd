//! Counting the ways to fill in unknown cells so that the blocked runs match a target signature.

use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{Error, ParseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {Blocked, Free, Unknown}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '#' => Some(Cell::Blocked),
            '.' => Some(Cell::Free),
            '?' => Some(Cell::Unknown),
            _ => None
        }
    }

    pub fn as_char(self) -> char {
        match self {Cell::Blocked => '#', Cell::Free => '.', Cell::Unknown => '?'}
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A row of cells and the lengths of the maximal blocked runs it must contain, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub cells: Vec<Cell>,
    pub runs: Vec<usize>,
}

impl Record {
    /// Parses `???.### 1,1,3`.
    /// A line with no run list describes a row that must hold no blocked run at all.
    pub fn parse(line: &str) -> Result<Record, ParseError> {
        let mut cur = Cursor::new(line.trim_end());
        let cells = cur.take_while(|c| !c.is_ascii_whitespace()).char_indices().map(|(offset, c)|
            Cell::from_char(c).ok_or(ParseError::BadCell {found: c, offset})
        ).collect::<Result<Vec<_>, _>>()?;
        cur.skip_spaces();

        let mut runs = vec![];
        while !cur.is_empty() {
            let offset = cur.offset();
            let value = cur.parse_int()?;
            match usize::try_from(value) {
                Ok(run) if run > 0 => runs.push(run),
                _ => return Err(ParseError::BadRun {value, offset}),
            }
            if !cur.is_empty() {cur.eat_char(',')?}
        }
        Ok(Record {cells, runs})
    }

    /// `copies` copies of the cells joined by single unknown cells, with the runs repeated to match.
    pub fn unfold(&self, copies: usize) -> Record {
        Record {
            cells: vec![self.cells.as_slice(); copies].join(&Cell::Unknown),
            runs: self.runs.repeat(copies),
        }
    }

    pub fn arrangements(&self, cache: &mut ArrangementCache) -> Result<u128> {
        count_arrangements(&self.cells, &self.runs, cache)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.cells.iter().join(""), self.runs.iter().join(","))
    }
}

/// Positions of the unconsumed suffixes of the cells and of the runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchState {
    pub cell: usize,
    pub run: usize,
}

/// Counts per [`MatchState`]. The keys only make sense for the record they were computed on, so
/// [`count_arrangements`] empties the cache before every top-level call.
#[derive(Debug, Default)]
pub struct ArrangementCache {
    counts: FxHashMap<MatchState, u128>,
}

impl ArrangementCache {
    pub fn new() -> ArrangementCache {ArrangementCache::default()}

    pub fn len(&self) -> usize {self.counts.len()}

    pub fn is_empty(&self) -> bool {self.counts.is_empty()}
}

struct Matcher<'a> {
    cells: &'a [Cell],
    runs: &'a [usize],
    counts: &'a mut FxHashMap<MatchState, u128>,
}

impl Matcher<'_> {
    /// `None` once a count no longer fits in a `u128`.
    fn count(&mut self, state: MatchState) -> Option<u128> {
        if let Some(&n) = self.counts.get(&state) {return Some(n)}
        let (cells, runs) = (self.cells, self.runs);
        let (cells, runs) = (&cells[state.cell ..], &runs[state.run ..]);
        trace!(
            "count {} - {}",
            cells.iter().join(""), runs.iter().join(",")
        );

        let n = match (cells.first(), runs.first()) {
            (None, _) => runs.is_empty() as u128,
            (_, None) => !cells.contains(&Cell::Blocked) as u128,
            (Some(Cell::Free), _) => {
                let free = cells.iter().take_while(|&&c| c == Cell::Free).count();
                self.count(MatchState {cell: state.cell + free, ..state})?
            },
            (Some(Cell::Blocked), Some(&run)) => self.place_run(state, run)?,
            (Some(Cell::Unknown), Some(&run)) => {
                let free = self.count(MatchState {cell: state.cell + 1, ..state})?;
                free.checked_add(self.place_run(state, run)?)?
            },
        };
        self.counts.insert(state, n);
        Some(n)
    }

    /// Arrangements in which a run of `run` blocked cells starts right at `state.cell`.
    fn place_run(&mut self, state: MatchState, run: usize) -> Option<u128> {
        debug_assert!(run > 0);
        let cells = self.cells;
        let cells = &cells[state.cell ..];
        if cells.len() < run || cells[.. run].contains(&Cell::Free) {return Some(0)}
        let next = MatchState {cell: state.cell + run, run: state.run + 1};
        match cells.get(run) {
            None => self.count(next),
            Some(Cell::Blocked) => Some(0),
            // the cell after a run has to be free, so skip it
            Some(_) => self.count(MatchState {cell: next.cell + 1, ..next}),
        }
    }
}

/// Number of ways to assign the unknown cells so that the blocked runs are exactly `runs`.
/// `runs` must be all positive. Fails with [`Error::CountOverflow`] past `u128::MAX`.
pub fn count_arrangements(cells: &[Cell], runs: &[usize], cache: &mut ArrangementCache) -> Result<u128> {
    cache.counts.clear();
    Matcher {cells, runs, counts: &mut cache.counts}
        .count(MatchState {cell: 0, run: 0})
        .ok_or(Error::CountOverflow {cells: cells.len(), runs: runs.len()})
}

pub fn day12(part: u8, input: &str) -> Result<String> {
    let copies = match part {
        1 => 1,
        2 => 5,
        _ => return Err(Error::UnknownPart(part)),
    };
    let mut cache = ArrangementCache::new();
    let mut total = 0u128;
    for (ix, line) in input.lines().enumerate().filter(|(_, line)| !line.trim().is_empty()) {
        let record = Record::parse(line).map_err(Error::at_line(ix + 1))?.unfold(copies);
        let n = record.arrangements(&mut cache)?;
        debug!("{} -> {} ({} states)", line, n, cache.len());
        total = total.checked_add(n).ok_or(Error::SumOverflow {line: ix + 1})?;
    }
    Ok(total.to_string())
}
