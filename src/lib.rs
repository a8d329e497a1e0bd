pub mod almanac;
pub mod cursor;
pub mod error;
pub mod interval;
pub mod springs;

pub use error::{Error, ParseError, Result};

pub const DAYS: [u8; 2] = [5, 12];

pub fn solve(day: u8, part: u8, input: &str) -> Result<String> {
    if part != 1 && part != 2 {return Err(Error::UnknownPart(part))}
    match day {
        5 => almanac::day5(part, input),
        12 => springs::day12(part, input),
        _ => Err(Error::UnknownDay(day)),
    }
}
