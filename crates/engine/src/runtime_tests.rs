// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cue_adapters::{Factory, HostMessage, HostServices, Outbox};
use cue_runbook::parse_runbook;

const DELAYED: &str = r#"
[sequence.delayed]
condition = { type = "flag", flag = "go" }

[[sequence.delayed.node]]
actions = [{ type = "wait", duration = "10ms" }]

[[sequence.delayed.node]]
sequential = true
final = true
actions = [{ type = "emit", message = "done" }]
"#;

fn director(outbox: Outbox) -> Director {
    let mut director = Director::new(HostServices::system(outbox), Factory::default());
    director.load(&parse_runbook(DELAYED).unwrap()).unwrap();
    director
}

async fn status(tx: &mpsc::UnboundedSender<Request>) -> Vec<SequenceStatus> {
    let (reply, rx) = oneshot::channel();
    tx.send(Request::Status(reply)).unwrap();
    rx.await.unwrap()
}

#[test]
fn default_tick_is_fifty_millis() {
    assert_eq!(RuntimeConfig::default().tick_interval, Duration::from_millis(50));
}

#[test]
fn config_reads_humantime_durations() {
    let config: RuntimeConfig = toml::from_str("tick_interval = \"20ms\"").unwrap();
    assert_eq!(config.tick_interval, Duration::from_millis(20));

    let config: RuntimeConfig = toml::from_str("").unwrap();
    assert_eq!(config, RuntimeConfig::default());
}

#[tokio::test]
async fn loop_applies_events_and_stops_when_senders_drop() {
    let (outbox, _messages) = Outbox::new();
    let mut director = director(outbox);
    let (tx, rx) = mpsc::unbounded_channel();
    let config = RuntimeConfig::default();

    let driver = async move {
        tx.send(
            HostEvent::Activate {
                sequence: "delayed".to_string(),
            }
            .into(),
        )
        .unwrap();
        let statuses = status(&tx).await;
        assert!(statuses[0].active);
        assert!(!statuses[0].snapshot.eligible);
    };

    tokio::join!(director.run(rx, &config), driver);
    assert!(director.status()[0].active);
}

#[tokio::test]
async fn ticks_fire_timers() {
    let (outbox, mut messages) = Outbox::new();
    let mut director = director(outbox);
    let (tx, rx) = mpsc::unbounded_channel();
    let config = RuntimeConfig {
        tick_interval: Duration::from_millis(2),
    };

    let driver = async move {
        tx.send(HostEvent::Activate { sequence: "delayed".to_string() }.into())
            .unwrap();
        tx.send(
            HostEvent::SetFlag {
                flag: "go".to_string(),
                value: true,
            }
            .into(),
        )
        .unwrap();
        let message = messages.recv().await;
        assert_eq!(
            message,
            Some(HostMessage::Emit {
                sequence: "delayed".to_string(),
                node: Some(1),
                message: "done".to_string(),
            })
        );
        status(&tx).await
    };

    let ((), statuses) = tokio::join!(director.run(rx, &config), driver);
    assert!(statuses[0].run.finished);
}

#[tokio::test]
async fn rejected_events_do_not_stop_the_loop() {
    let (outbox, _messages) = Outbox::new();
    let mut director = director(outbox);
    let (tx, rx) = mpsc::unbounded_channel();
    let config = RuntimeConfig::default();

    let driver = async move {
        tx.send(HostEvent::Activate { sequence: "missing".to_string() }.into())
            .unwrap();
        status(&tx).await.len()
    };

    let ((), count) = tokio::join!(director.run(rx, &config), driver);
    assert_eq!(count, 1);
}
