use thiserror::Error;

/// A malformed token in puzzle input. Offsets are byte offsets into the line being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} at offset {offset} but no input remained")]
    Exhausted { expected: String, offset: usize },

    #[error("expected {expected} at offset {offset}, got {found:?}")]
    Unexpected { expected: String, found: char, offset: usize },

    #[error("integer could not be parsed at offset {offset}")]
    BadInt { offset: usize },

    #[error("integer at offset {offset} does not fit in 64 bits")]
    IntOverflow { offset: usize },

    #[error("unexpected cell character {found:?} at offset {offset}")]
    BadCell { found: char, offset: usize },

    #[error("run lengths must be positive, got {value} at offset {offset}")]
    BadRun { value: i64, offset: usize },

    #[error("seed ranges come in (start length) pairs, got {count} values")]
    OddSeedCount { count: usize },

    #[error("expected a \"seeds:\" line")]
    MissingSeeds,

    #[error("seed range {start} {length} is out of range")]
    BadSeedRange { start: i64, length: i64 },

    #[error("no seed values given")]
    NoSeedValues,

    #[error("stage label must not start with a digit: {0:?}")]
    BadLabel(String),

    #[error("stage {label:?} follows a stage producing {previous:?}")]
    BrokenChain { label: String, previous: String },

    #[error("rule {dest_start} {source_start} {length} is out of range")]
    BadRule { dest_start: i64, source_start: i64, length: i64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: ParseError },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("arrangement count for {cells} cells and {runs} runs does not fit in 128 bits")]
    CountOverflow { cells: usize, runs: usize },

    #[error("line {line}: running total does not fit in 128 bits")]
    SumOverflow { line: usize },

    #[error("no solver for day {0}")]
    UnknownDay(u8),

    #[error("part must be 1 or 2, got {0}")]
    UnknownPart(u8),
}

impl Error {
    pub fn at_line(line: usize) -> impl FnOnce(ParseError) -> Error {
        move |source| Error::Parse { line, source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
