//! Line-oriented scripts that drive a swarm.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! insert 50 drone
//! insert 30 bird dead
//! state 50 dead
//! remove-dead
//! dump
//! ```

use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{InsertOutcome, Robot, RobotId, RobotState, RobotType, Swarm};
use crate::tree_traits::TreeRender;

const COMMANDS: [&str; 10] = [
    "insert",
    "remove",
    "state",
    "remove-dead",
    "clear",
    "lookup",
    "list",
    "dump",
    "tree",
    "check",
];

/// A single script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert {
        id: RobotId,
        robot_type: RobotType,
        state: RobotState,
    },
    Remove(RobotId),
    SetState {
        id: RobotId,
        state: RobotState,
    },
    RemoveDead,
    Clear,
    Lookup(RobotId),
    List,
    Dump,
    Tree,
    Check,
}

impl Command {
    /// Parse one line. Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let mut words = trimmed.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "insert" => {
                expect_args(name, &args, 1, 3)?;
                Command::Insert {
                    id: parse_arg(name, args[0])?,
                    robot_type: args
                        .get(1)
                        .map(|s| parse_arg::<RobotType>(name, s))
                        .transpose()?
                        .unwrap_or_default(),
                    state: args
                        .get(2)
                        .map(|s| parse_arg::<RobotState>(name, s))
                        .transpose()?
                        .unwrap_or_default(),
                }
            }
            "remove" => {
                expect_args(name, &args, 1, 1)?;
                Command::Remove(parse_arg(name, args[0])?)
            }
            "state" => {
                expect_args(name, &args, 2, 2)?;
                Command::SetState {
                    id: parse_arg(name, args[0])?,
                    state: parse_arg(name, args[1])?,
                }
            }
            "lookup" => {
                expect_args(name, &args, 1, 1)?;
                Command::Lookup(parse_arg(name, args[0])?)
            }
            "remove-dead" => nullary(name, &args, Command::RemoveDead)?,
            "clear" => nullary(name, &args, Command::Clear)?,
            "list" => nullary(name, &args, Command::List)?,
            "dump" => nullary(name, &args, Command::Dump)?,
            "tree" => nullary(name, &args, Command::Tree)?,
            "check" => nullary(name, &args, Command::Check)?,
            _ => {
                return Err(format!(
                    "unknown command '{}', expected one of: {}",
                    name,
                    COMMANDS.iter().join(", ")
                ))
            }
        };
        Ok(Some(command))
    }
}

fn nullary(name: &str, args: &[&str], command: Command) -> Result<Command, String> {
    expect_args(name, args, 0, 0)?;
    Ok(command)
}

fn expect_args(name: &str, args: &[&str], min: usize, max: usize) -> Result<(), String> {
    if args.len() >= min && args.len() <= max {
        return Ok(());
    }
    if min == max {
        Err(format!("{} takes {} argument(s), got {}", name, min, args.len()))
    } else {
        Err(format!(
            "{} takes {} to {} arguments, got {}",
            name,
            min,
            max,
            args.len()
        ))
    }
}

fn parse_arg<T>(name: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| format!("{}: invalid argument '{}': {}", name, raw, e))
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(source: &str) -> ApplicationResult<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        match Command::parse(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(message) => {
                return Err(ApplicationError::Parse {
                    line: idx + 1,
                    message,
                })
            }
        }
    }
    Ok(commands)
}

#[instrument(level = "debug")]
pub fn load_script(path: &Path) -> ApplicationResult<Vec<Command>> {
    let source = std::fs::read_to_string(path).with_path_context("read script", path)?;
    parse_script(&source)
}

/// Executes commands against an owned swarm and collects their output lines.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    swarm: Swarm,
}

impl ScriptRunner {
    pub fn new(swarm: Swarm) -> Self {
        Self { swarm }
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn into_swarm(self) -> Swarm {
        self.swarm
    }

    pub fn run(&mut self, commands: &[Command]) -> Vec<String> {
        commands.iter().flat_map(|c| self.execute(c)).collect()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn execute(&mut self, command: &Command) -> Vec<String> {
        debug!(?command, "executing");
        match *command {
            Command::Insert {
                id,
                robot_type,
                state,
            } => {
                let line = match self.swarm.insert(Robot::with_state(id, robot_type, state)) {
                    InsertOutcome::Inserted => format!("inserted {}", id),
                    InsertOutcome::Duplicate => format!("duplicate {}", id),
                    InsertOutcome::OutOfRange => format!("out of range {}", id),
                };
                vec![line]
            }
            Command::Remove(id) => match self.swarm.remove(id) {
                Some(_) => vec![format!("removed {}", id)],
                None => vec![format!("not found {}", id)],
            },
            Command::SetState { id, state } => {
                if self.swarm.set_state(id, state) {
                    vec![format!("updated {}", id)]
                } else {
                    vec![format!("not found {}", id)]
                }
            }
            Command::RemoveDead => vec![format!("removed {} dead", self.swarm.remove_dead())],
            Command::Clear => {
                self.swarm.clear();
                vec!["cleared".to_string()]
            }
            Command::Lookup(id) => match self.swarm.lookup(id) {
                Some(robot) => vec![robot.to_string()],
                None => vec![format!("not found {}", id)],
            },
            Command::List => self.swarm.list(),
            Command::Dump => vec![self.swarm.dump()],
            Command::Tree => self
                .swarm
                .to_tree_string()
                .to_string()
                .lines()
                .map(str::to_string)
                .collect(),
            Command::Check => match self.swarm.verify() {
                Ok(()) => vec!["ok".to_string()],
                Err(e) => vec![e.to_string()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KeyRange;

    fn runner() -> ScriptRunner {
        ScriptRunner::new(Swarm::with_range(KeyRange::new(0, 100).unwrap()))
    }

    #[test]
    fn given_insert_with_defaults_when_parsing_then_uses_bird_and_alive() {
        let command = Command::parse("insert 42").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Insert {
                id: 42,
                robot_type: RobotType::Bird,
                state: RobotState::Alive
            }
        );
    }

    #[test]
    fn given_comment_and_blank_when_parsing_then_skipped() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# insert 1").unwrap(), None);
    }

    #[test]
    fn given_bad_lines_when_parsing_then_reports_reason() {
        assert!(Command::parse("insert").unwrap_err().contains("takes 1 to 3"));
        assert!(Command::parse("insert x").unwrap_err().contains("invalid argument 'x'"));
        assert!(Command::parse("state 1 zombie").unwrap_err().contains("zombie"));
        assert!(Command::parse("dump now").unwrap_err().contains("takes 0"));
        assert!(Command::parse("fly 1").unwrap_err().contains("unknown command 'fly'"));
    }

    #[test]
    fn given_script_with_error_when_parsing_then_reports_line_number() {
        let err = parse_script("insert 1\n\ninsert one\n").unwrap_err();
        assert!(matches!(err, ApplicationError::Parse { line: 3, .. }));
    }

    #[test]
    fn given_script_when_running_then_collects_output() {
        let commands = parse_script(
            "insert 50 drone\ninsert 30\ninsert 50\ninsert 150\n\
             state 30 dead\nstate 31 dead\nlookup 30\nremove-dead\nremove 30\nlist\ndump\ncheck\n",
        )
        .unwrap();
        let mut runner = runner();

        let output = runner.run(&commands);

        assert_eq!(
            output,
            vec![
                "inserted 50",
                "inserted 30",
                "duplicate 50",
                "out of range 150",
                "updated 30",
                "not found 31",
                "30:DEAD:BIRD",
                "removed 1 dead",
                "not found 30",
                "50:ALIVE:DRONE",
                "(50:0)",
                "ok",
            ]
        );
        assert_eq!(runner.swarm().len(), 1);
    }

    #[test]
    fn given_tree_and_clear_commands_when_running_then_renders_and_empties() {
        let mut runner = runner();
        let commands = parse_script("insert 2\ninsert 1\ninsert 3\ntree\nclear\ndump").unwrap();
        let output = runner.run(&commands);
        assert_eq!(output[3], "2:1");
        assert!(output[4].ends_with("L 1:0"));
        assert!(output[5].ends_with("R 3:0"));
        assert_eq!(output[6], "cleared");
        assert_eq!(output[7], "");
        assert!(runner.into_swarm().is_empty());
    }
}
