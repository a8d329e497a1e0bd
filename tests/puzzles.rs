use aoc2023::{solve, Error};

const DAY5: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

const DAY12: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

#[test]
fn day5_example() {
    assert_eq!(solve(5, 1, DAY5).unwrap(), "35");
    assert_eq!(solve(5, 2, DAY5).unwrap(), "46");
}

#[test]
fn day5_tolerates_crlf_and_missing_final_newline() {
    let input = DAY5.trim_end().replace('\n', "\r\n");
    assert_eq!(solve(5, 1, &input).unwrap(), "35");
    assert_eq!(solve(5, 2, &input).unwrap(), "46");
}

#[test]
fn day12_example() {
    assert_eq!(solve(12, 1, DAY12).unwrap(), "21");
    assert_eq!(solve(12, 2, DAY12).unwrap(), "525152");
}

#[test]
fn day12_long_unfolded_record() {
    let line = "?????????????????????? 1,1,1,1,1";
    assert_eq!(solve(12, 2, line).unwrap(), "11613412635260273974818");
    assert_eq!(solve(12, 1, line).unwrap(), "8568");
}

#[test]
fn day12_too_many_arrangements() {
    let line = format!("{} {}", "?".repeat(300), vec!["1"; 100].join(","));
    assert!(matches!(solve(12, 1, &line), Err(Error::CountOverflow {cells: 300, runs: 100})));
}

#[test]
fn day12_tab_separated_and_run_free_lines() {
    assert_eq!(solve(12, 1, "???.###\t1,1,3\n??..??\n").unwrap(), "2");
}

#[test]
fn dispatch_errors() {
    assert!(matches!(solve(6, 1, ""), Err(Error::UnknownDay(6))));
    assert!(matches!(solve(5, 3, DAY5), Err(Error::UnknownPart(3))));
}

#[test]
fn malformed_input_fails_fast() {
    let broken = DAY5.replace("37 52 2", "37 fifty-two 2");
    let err = solve(5, 1, &broken).unwrap_err();
    assert!(matches!(err, Error::Parse {line: 9, ..}), "{}", err);
    assert!(err.to_string().starts_with("line 9: "));

    let err = solve(12, 1, "???.### 1,1,3\n???.%## 1,1,3\n").unwrap_err();
    assert!(matches!(err, Error::Parse {line: 2, ..}), "{}", err);
}
