//! Scripted scenarios: player commands scheduled at fixed timestamps.
//!
//! Used by the headless runner and integration tests to drive a game
//! without a presentation layer.

use serde::{Deserialize, Serialize};

use subnet_core::commands::PlayerCommand;
use subnet_core::enums::NodeType;

use crate::config::ConfigError;

/// One command and the time at which it is queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    pub at_ms: f64,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Sorted by `at_ms` on construction.
    pub commands: Vec<ScriptedCommand>,
    #[serde(skip)]
    cursor: usize,
}

impl Scenario {
    pub fn new(name: impl Into<String>, mut commands: Vec<ScriptedCommand>) -> Self {
        commands.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Self {
            name: name.into(),
            commands,
            cursor: 0,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let parsed: Scenario = serde_json::from_str(json)?;
        Ok(Self::new(parsed.name, parsed.commands))
    }

    /// "Starter Network"
    /// Two routers side by side, a honeypot guarding the second, and a
    /// probing attack across the link once hosts have earned some income.
    pub fn starter() -> Self {
        let place = |at_ms, node_type, x, y| ScriptedCommand {
            at_ms,
            command: PlayerCommand::PlaceNode { node_type, x, y },
        };
        Self::new(
            "starter",
            vec![
                place(0.0, NodeType::Router, 0.0, 0.0),
                place(0.0, NodeType::Router, 150.0, 0.0),
                ScriptedCommand {
                    at_ms: 0.0,
                    command: PlayerCommand::ConnectNodes {
                        from: "router_0".into(),
                        to: "router_5".into(),
                    },
                },
                place(2000.0, NodeType::Honeypot, 150.0, 120.0),
                ScriptedCommand {
                    at_ms: 5000.0,
                    command: PlayerCommand::LaunchAttack {
                        from: "router_0".into(),
                        target: "host_6".into(),
                        damage: 40.0,
                        duration_ms: 3000.0,
                    },
                },
                ScriptedCommand {
                    at_ms: 10_000.0,
                    command: PlayerCommand::UpgradeNode {
                        node_id: "router_0".into(),
                    },
                },
            ],
        )
    }

    /// Commands due at or before `now_ms` that have not been handed out yet.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<PlayerCommand> {
        let start = self.cursor;
        while self
            .commands
            .get(self.cursor)
            .is_some_and(|c| c.at_ms <= now_ms)
        {
            self.cursor += 1;
        }
        self.commands[start..self.cursor]
            .iter()
            .map(|c| c.command.clone())
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.commands.len()
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_sorted_and_drained_once() {
        let mut scenario = Scenario::new(
            "t",
            vec![
                ScriptedCommand {
                    at_ms: 500.0,
                    command: PlayerCommand::Prestige,
                },
                ScriptedCommand {
                    at_ms: 100.0,
                    command: PlayerCommand::CancelAttack {
                        attack_id: "attack_0".into(),
                    },
                },
            ],
        );
        assert!(scenario.drain_due(50.0).is_empty());
        assert_eq!(scenario.drain_due(100.0).len(), 1);
        assert!(scenario.drain_due(400.0).is_empty());
        assert_eq!(scenario.drain_due(1000.0), [PlayerCommand::Prestige]);
        assert!(scenario.is_finished());

        scenario.rewind();
        assert_eq!(scenario.drain_due(1000.0).len(), 2);
    }

    #[test]
    fn parses_from_json() {
        let json = r#"{
            "name": "mini",
            "commands": [
                {"at_ms": 0, "command": {"type": "PlaceNode", "node_type": "router", "x": 0, "y": 0}},
                {"at_ms": 10, "command": {"type": "Prestige"}}
            ]
        }"#;
        let mut scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.name, "mini");
        assert_eq!(scenario.drain_due(0.0).len(), 1);
        assert!(Scenario::from_json_str("[]").is_err());
    }

    #[test]
    fn starter_is_time_ordered() {
        let scenario = Scenario::starter();
        assert!(scenario
            .commands
            .windows(2)
            .all(|w| w[0].at_ms <= w[1].at_ms));
    }
}
