//! Staged range rewriting: a seed line followed by blocks of rules, each block remapping the
//! output of the one before it.

use std::mem;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::cursor::Cursor;
use crate::error::{Error, ParseError, Result};
use crate::interval::{split_interval, Interval, RewriteRule};

static CATEGORY_LABEL: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"^(\w+)-to-(\w+) map:$").expect("category label pattern")
);

/// One block of rules. Rules are tried in order; values matched by no rule pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub label: String,
    pub rules: Vec<RewriteRule>,
}

impl Stage {
    pub fn new(label: impl Into<String>, rules: Vec<RewriteRule>) -> Stage {
        Stage {label: label.into(), rules}
    }

    /// `(from, to)` for labels shaped like `seed-to-soil map:`.
    pub fn categories(&self) -> Option<(&str, &str)> {
        let caps = CATEGORY_LABEL.captures(&self.label)?;
        let (_, [from, to]) = caps.extract();
        Some((from, to))
    }
}

fn total_length(intervals: &[Interval]) -> i128 {
    intervals.iter().map(|n| n.length as i128).sum()
}

/// Pushes every interval through one stage. Each piece is consumed by the first rule it overlaps;
/// the remainders go on to the later rules, and whatever is left at the end passes through as is.
pub fn run_stage(inputs: Vec<Interval>, stage: &Stage) -> Result<Vec<Interval>> {
    let before = total_length(&inputs);
    let mut pending = inputs.into_iter().filter(|n| !n.is_empty()).collect::<Vec<_>>();
    let mut unmatched = Vec::with_capacity(pending.len());
    let mut output = Vec::with_capacity(pending.len());

    for rule in &stage.rules {
        for piece in pending.drain(..) {
            let split = split_interval(piece, rule);
            if split.mapped.is_empty() {
                unmatched.push(piece);
                continue;
            }
            debug!(
                stage = %stage.label,
                "mapped {} -> {} (pre={} suf={})", piece, split.mapped, split.prefix, split.suffix
            );
            output.push(split.mapped);
            unmatched.extend(split.remainders());
        }
        mem::swap(&mut pending, &mut unmatched);
    }

    if !pending.is_empty() {
        debug!(stage = %stage.label, "left {} unchanged", pending.iter().join(", "));
    }
    output.append(&mut pending);

    let after = total_length(&output);
    if before != after {
        return Err(Error::InvariantViolation(format!(
            "stage {:?} turned total length {} into {}", stage.label, before, after
        )));
    }
    Ok(output)
}

pub fn run_pipeline(initial: Vec<Interval>, stages: &[Stage]) -> Result<Vec<Interval>> {
    stages.iter().try_fold(initial, |working, stage| run_stage(working, stage))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Every seed value is its own length-1 interval.
    Points,
    /// Seed values pair up as `start length`.
    Ranges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    pub seeds: Vec<i64>,
    pub stages: Vec<Stage>,
}

fn parse_seeds(line: &str) -> Result<Vec<i64>, ParseError> {
    let mut cur = Cursor::new(line.trim_end());
    if !cur.eat_literal("seeds:") {return Err(ParseError::MissingSeeds)}
    let mut seeds = vec![];
    loop {
        cur.skip_spaces();
        if cur.is_empty() {break}
        seeds.push(cur.parse_int()?);
    }
    if seeds.is_empty() {return Err(ParseError::NoSeedValues)}
    Ok(seeds)
}

fn parse_label(line: &str, previous: Option<&Stage>) -> Result<Stage, ParseError> {
    if line.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseError::BadLabel(line.to_string()));
    }
    let stage = Stage::new(line, vec![]);
    let chain = previous.and_then(Stage::categories).zip(stage.categories());
    if let Some(((_, produced), (from, _))) = chain {
        if produced != from {
            return Err(ParseError::BrokenChain {label: line.to_string(), previous: produced.to_string()});
        }
    }
    Ok(stage)
}

impl Almanac {
    /// The first line holds the seeds. After it, a label line opens a stage, rule lines fill it and a
    /// blank line (or the end of input) closes it.
    pub fn parse(input: &str) -> Result<Almanac> {
        let mut lines = input.lines().enumerate().map(|(ix, line)| (ix + 1, line.trim_end()));
        let seeds = match lines.next() {
            Some((line_no, line)) => parse_seeds(line).map_err(Error::at_line(line_no))?,
            None => return Err(Error::Parse {line: 1, source: ParseError::MissingSeeds}),
        };

        let mut stages: Vec<Stage> = vec![];
        let mut current: Option<Stage> = None;
        for (line_no, line) in lines {
            if line.is_empty() {
                stages.extend(current.take());
            } else if let Some(stage) = current.as_mut() {
                stage.rules.push(RewriteRule::parse(line).map_err(Error::at_line(line_no))?);
            } else {
                current = Some(parse_label(line, stages.last()).map_err(Error::at_line(line_no))?);
            }
        }
        stages.extend(current);
        Ok(Almanac {seeds, stages})
    }

    pub fn seed_intervals(&self, mode: SeedMode) -> Result<Vec<Interval>, ParseError> {
        match mode {
            SeedMode::Points => self.seeds.iter().map(|&x| match x.checked_add(1) {
                Some(_) => Ok(Interval::point(x)),
                None => Err(ParseError::BadSeedRange {start: x, length: 1}),
            }).collect(),
            SeedMode::Ranges => {
                if self.seeds.len() % 2 != 0 {
                    return Err(ParseError::OddSeedCount {count: self.seeds.len()});
                }
                self.seeds.iter().tuples().map(|(&start, &length)| {
                    if length <= 0 || start.checked_add(length).is_none() {
                        Err(ParseError::BadSeedRange {start, length})
                    } else {
                        Ok(Interval::new(start, length))
                    }
                }).collect()
            },
        }
    }

    pub fn final_intervals(&self, mode: SeedMode) -> Result<Vec<Interval>> {
        let seeds = self.seed_intervals(mode).map_err(Error::at_line(1))?;
        debug!("seeds: {}", seeds.iter().join(", "));
        run_pipeline(seeds, &self.stages)
    }

    pub fn lowest_location(&self, mode: SeedMode) -> Result<i64> {
        self.final_intervals(mode)?.iter().map(|n| n.start).min().ok_or_else(||
            Error::InvariantViolation("every seed interval vanished".to_string())
        )
    }
}

pub fn day5(part: u8, input: &str) -> Result<String> {
    let mode = match part {
        1 => SeedMode::Points,
        2 => SeedMode::Ranges,
        _ => return Err(Error::UnknownPart(part)),
    };
    Ok(Almanac::parse(input)?.lowest_location(mode)?.to_string())
}
