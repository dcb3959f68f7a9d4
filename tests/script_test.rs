//! Tests for driving a swarm from script files

use std::io::Write;
use std::path::Path;

use rstest::rstest;
use swarm::application::{load_script, parse_script, ApplicationError, Command, ScriptRunner};
use swarm::domain::{KeyRange, RobotState, Swarm};
use tempfile::NamedTempFile;

fn script_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create script");
    file.write_all(content.as_bytes()).expect("write script");
    file
}

fn run(range: (i32, i32), source: &str) -> (Swarm, Vec<String>) {
    let commands = parse_script(source).expect("valid script");
    let mut runner = ScriptRunner::new(Swarm::with_range(KeyRange::new(range.0, range.1).unwrap()));
    let output = runner.run(&commands);
    (runner.into_swarm(), output)
}

#[rstest]
fn given_script_file_when_loading_then_parses_commands() {
    let file = script_file("# fleet\ninsert 10005 drone\nstate 10005 dead\nremove-dead\n");

    let commands = load_script(file.path()).expect("load script");

    assert_eq!(commands.len(), 3);
    assert_eq!(
        commands[1],
        Command::SetState {
            id: 10005,
            state: RobotState::Dead
        }
    );
}

#[rstest]
fn given_missing_file_when_loading_then_error_names_path() {
    let err = load_script(Path::new("./tests/resources/does-not-exist.swarm")).unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("does-not-exist.swarm"));
}

#[rstest]
fn given_bad_line_in_file_when_loading_then_reports_line() {
    let file = script_file("insert 1\ninsert 2 submarine\n");
    let err = load_script(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("line 2:"), "{}", err);
}

#[rstest]
#[case::ascending("insert 10\ninsert 20\ninsert 30\ninsert 40\ninsert 50\ndump", "((10:0)20:2((30:0)40:1(50:0)))")]
#[case::descending("insert 50\ninsert 40\ninsert 30\ninsert 20\ninsert 10\ndump", "(((10:0)20:1(30:0))40:2(50:0))")]
#[case::zigzag("insert 30\ninsert 10\ninsert 20\ndump", "((10:0)20:1(30:0))")]
#[case::removal("insert 20\ninsert 10\ninsert 30\ninsert 40\nremove 10\ndump", "((20:0)30:1(40:0))")]
fn given_script_when_running_then_final_dump_matches(#[case] source: &str, #[case] expected: &str) {
    let (swarm, output) = run((0, 100), source);
    assert_eq!(output.last().map(String::as_str), Some(expected));
    swarm.verify().expect("invariants hold");
}

#[rstest]
fn given_fleet_script_when_running_then_dead_robots_are_swept() {
    let source = "\
insert 50 bird
insert 30 drone
insert 70 reptile
insert 20 sub
insert 40 quadruped
insert 60
insert 80
insert 10
state 40 dead
state 70 dead
remove-dead
list
check
";
    let (swarm, output) = run((0, 100), source);

    let tail: Vec<&str> = output.iter().skip(10).map(String::as_str).collect();
    assert_eq!(
        tail,
        vec![
            "removed 2 dead",
            "10:ALIVE:BIRD",
            "20:ALIVE:SUB",
            "30:ALIVE:DRONE",
            "50:ALIVE:BIRD",
            "60:ALIVE:BIRD",
            "80:ALIVE:BIRD",
            "ok",
        ]
    );
    assert_eq!(swarm.len(), 6);
}

#[rstest]
fn given_ids_outside_range_when_running_then_reported_and_skipped() {
    let (swarm, output) = run((10_000, 99_999), "insert 9999\ninsert 100000\ninsert 10000\n");
    assert_eq!(
        output,
        vec!["out of range 9999", "out of range 100000", "inserted 10000"]
    );
    assert_eq!(swarm.len(), 1);
}
