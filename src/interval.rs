use std::fmt;

use arrayvec::ArrayVec;

use crate::cursor::Cursor;
use crate::error::ParseError;

/// Half-open integer range `[start, start + length)`. A zero length means the range is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    pub start: i64,
    pub length: i64,
}

impl Interval {
    pub const EMPTY: Interval = Interval {start: 0, length: 0};

    pub fn new(start: i64, length: i64) -> Interval {
        debug_assert!(length >= 0, "negative interval length {}", length);
        Interval {start, length}
    }

    pub fn point(x: i64) -> Interval {Interval::new(x, 1)}

    pub fn end(&self) -> i64 {self.start + self.length}

    pub fn is_empty(&self) -> bool {self.length == 0}

    pub fn contains(&self, x: i64) -> bool {(self.start .. self.end()).contains(&x)}

    /// `[lo, hi)`, or empty when `hi <= lo`.
    fn between(lo: i64, hi: i64) -> Interval {
        if hi > lo {Interval::new(lo, hi - lo)} else {Interval::EMPTY}
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Sends `[source_start, source_start + source_length)` onto `[dest_start, ...)`; identity elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub dest_start: i64,
    pub source_start: i64,
    pub source_length: i64,
}

impl RewriteRule {
    /// Fails when the length is negative or either end would not fit in an `i64`, which keeps every
    /// later split and shift overflow-free.
    pub fn new(dest_start: i64, source_start: i64, source_length: i64) -> Result<RewriteRule, ParseError> {
        let bad = || ParseError::BadRule {dest_start, source_start, length: source_length};
        if source_length < 0 {return Err(bad())}
        source_start.checked_add(source_length).ok_or_else(bad)?;
        dest_start.checked_add(source_length).ok_or_else(bad)?;
        dest_start.checked_sub(source_start).ok_or_else(bad)?;
        Ok(RewriteRule {dest_start, source_start, source_length})
    }

    /// Parses `dest_start source_start source_length`.
    pub fn parse(line: &str) -> Result<RewriteRule, ParseError> {
        let mut cur = Cursor::new(line.trim_end());
        let mut field = || -> Result<i64, ParseError> {
            cur.skip_spaces();
            cur.parse_int()
        };
        let (dest_start, source_start, source_length) = (field()?, field()?, field()?);
        cur.expect_end()?;
        RewriteRule::new(dest_start, source_start, source_length)
    }

    pub fn source(&self) -> Interval {Interval::new(self.source_start, self.source_length)}

    pub fn offset(&self) -> i64 {self.dest_start - self.source_start}

    pub fn map_point(&self, x: i64) -> Option<i64> {
        self.source().contains(x).then(|| x + self.offset())
    }
}

/// The pieces of one interval cut by one rule. Absent pieces have length zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Strictly before the rule's source range.
    pub prefix: Interval,
    /// Overlap with the source range, already shifted to the destination.
    pub mapped: Interval,
    /// At or after the end of the source range.
    pub suffix: Interval,
}

impl Split {
    /// The non-empty unmapped pieces.
    pub fn remainders(&self) -> ArrayVec<Interval, 2> {
        [self.prefix, self.suffix].into_iter().filter(|piece| !piece.is_empty()).collect()
    }
}

pub fn split_interval(n: Interval, rule: &RewriteRule) -> Split {
    let source = rule.source();
    let prefix = Interval::between(n.start, n.end().min(source.start));
    let overlap = Interval::between(n.start.max(source.start), n.end().min(source.end()));
    let suffix = Interval::between(n.start.max(source.end()), n.end());
    let mapped = if overlap.is_empty() {
        Interval::EMPTY
    } else {
        Interval::new(overlap.start + rule.offset(), overlap.length)
    };
    debug_assert_eq!(prefix.length + mapped.length + suffix.length, n.length);
    Split {prefix, mapped, suffix}
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rule() -> RewriteRule {RewriteRule::new(52, 50, 48).unwrap()}

    #[test]
    fn map_point_inside_and_outside() {
        assert_eq!(rule().map_point(79), Some(81));
        assert_eq!(rule().map_point(2), None);
        assert_eq!(rule().map_point(50), Some(52));
        assert_eq!(rule().map_point(97), Some(99));
        assert_eq!(rule().map_point(98), None);
    }

    #[test]
    fn split_entirely_left() {
        let s = split_interval(Interval::new(10, 5), &rule());
        assert_eq!(s.prefix, Interval::new(10, 5));
        assert!(s.mapped.is_empty() && s.suffix.is_empty());
    }

    #[test]
    fn split_entirely_right() {
        let s = split_interval(Interval::new(98, 3), &rule());
        assert!(s.prefix.is_empty() && s.mapped.is_empty());
        assert_eq!(s.suffix, Interval::new(98, 3));
    }

    #[test]
    fn split_entirely_inside() {
        let s = split_interval(Interval::new(79, 14), &rule());
        assert_eq!(s.mapped, Interval::new(81, 14));
        assert!(s.remainders().is_empty());
    }

    #[test]
    fn split_straddling_both_ends() {
        let s = split_interval(Interval::new(40, 70), &rule());
        assert_eq!(s.prefix, Interval::new(40, 10));
        assert_eq!(s.mapped, Interval::new(52, 48));
        assert_eq!(s.suffix, Interval::new(98, 12));
        assert_eq!(&s.remainders()[..], &[Interval::new(40, 10), Interval::new(98, 12)]);
    }

    #[test]
    fn split_straddling_one_end() {
        let s = split_interval(Interval::new(90, 20), &rule());
        assert_eq!(s.mapped, Interval::new(92, 8));
        assert_eq!(s.suffix, Interval::new(98, 12));
        let s = split_interval(Interval::new(45, 10), &rule());
        assert_eq!(s.prefix, Interval::new(45, 5));
        assert_eq!(s.mapped, Interval::new(52, 5));
    }

    #[test]
    fn split_touching_the_end_is_unmapped() {
        let s = split_interval(Interval::new(98, 1), &rule());
        assert!(s.mapped.is_empty());
        assert_eq!(s.suffix, Interval::new(98, 1));
    }

    #[test]
    fn parse_rule_lines() {
        assert_eq!(RewriteRule::parse("52 50 48"), Ok(rule()));
        assert_eq!(RewriteRule::parse("52  50 48 "), Ok(rule()));
        assert!(matches!(RewriteRule::parse("52 x 48"), Err(ParseError::BadInt {..})));
        assert!(matches!(RewriteRule::parse("52 50"), Err(ParseError::Exhausted {..})));
        assert!(matches!(RewriteRule::parse("52 50 48 1"), Err(ParseError::Unexpected {..})));
        assert!(matches!(
            RewriteRule::parse("0 9223372036854775800 100"),
            Err(ParseError::BadRule {..})
        ));
    }

    fn arb_interval() -> impl Strategy<Value = Interval> {
        (-1000i64 .. 1000, 0i64 .. 200).prop_map(|(start, length)| Interval::new(start, length))
    }

    fn arb_rule() -> impl Strategy<Value = RewriteRule> {
        (-1000i64 .. 1000, -1000i64 .. 1000, 0i64 .. 200)
            .prop_map(|(d, s, l)| RewriteRule::new(d, s, l).unwrap())
    }

    proptest! {
        #[test]
        fn split_conserves_length(n in arb_interval(), r in arb_rule()) {
            let s = split_interval(n, &r);
            prop_assert_eq!(s.prefix.length + s.mapped.length + s.suffix.length, n.length);
            prop_assert!(s.prefix.length >= 0 && s.mapped.length >= 0 && s.suffix.length >= 0);
        }

        #[test]
        fn split_maps_every_point(n in arb_interval(), r in arb_rule()) {
            let s = split_interval(n, &r);
            for x in n.start .. n.end() {
                match r.map_point(x) {
                    Some(y) => {prop_assert!(s.mapped.contains(y));},
                    None => {prop_assert!(s.prefix.contains(x) || s.suffix.contains(x));},
                }
            }
        }
    }
}
