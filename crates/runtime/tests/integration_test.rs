use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use game_core::{
    CardinalDirection::*, GameConfig, GridConflictPolicy, LevelError, LevelSpec, Outcome, Phase,
    Progression, RoomSpec, SessionError,
};
use runtime::{
    ContentLevelSource, Event, InMemoryLevelSource, LevelEvent, LevelId, LevelSource, Runtime,
    RuntimeConfig, RuntimeError, SessionEvent, SessionHandle, Topic,
};

fn tower() -> LevelSpec {
    LevelSpec::new("Tower", "Gate")
        .room(RoomSpec::new("Gate").exit(North, "Hall"))
        .room(
            RoomSpec::new("Hall")
                .exit(South, "Gate")
                .exit(East, "Throne")
                .item("Key"),
        )
        .room(RoomSpec::new("Throne").exit(West, "Hall").boss("Ogre"))
}

fn cellar() -> LevelSpec {
    LevelSpec::new("Cellar", "Stair")
        .room(RoomSpec::new("Stair").exit(East, "Cask"))
        .room(
            RoomSpec::new("Cask")
                .exit(West, "Stair")
                .exit(North, "Den")
                .item("Torch"),
        )
        .room(RoomSpec::new("Den").exit(South, "Cask").boss("Rat King"))
}

fn source() -> InMemoryLevelSource {
    InMemoryLevelSource::new()
        .level("tower", tower())
        .level("cellar", cellar())
}

/// Exit leads to a room that does not exist.
fn broken() -> LevelSpec {
    LevelSpec::new("Broken", "Ledge")
        .room(RoomSpec::new("Ledge").exit(North, "Void"))
}

/// Fails to load anything but the tower until `failures` runs out.
struct FlakySource {
    inner: InMemoryLevelSource,
    failures: AtomicU32,
}

#[async_trait]
impl LevelSource for FlakySource {
    async fn load_level_graph(&self, level: &LevelId) -> runtime::Result<LevelSpec> {
        let failing = level.as_str() != "tower"
            && self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
        if failing {
            return Err(RuntimeError::Source {
                context: format!("level '{level}'"),
                source: "disk unavailable".into(),
            });
        }
        self.inner.load_level_graph(level).await
    }

    async fn load_next_level_identifier(
        &self,
        current_ordinal: u32,
    ) -> runtime::Result<Option<LevelId>> {
        self.inner.load_next_level_identifier(current_ordinal).await
    }

    async fn first_level_identifier(&self) -> runtime::Result<LevelId> {
        self.inner.first_level_identifier().await
    }

    async fn level_ordinal(&self, level: &LevelId) -> runtime::Result<Option<u32>> {
        self.inner.level_ordinal(level).await
    }
}

async fn runtime() -> Runtime {
    Runtime::builder()
        .source(source())
        .build()
        .await
        .expect("runtime should build")
}

async fn play(handle: &SessionHandle, lines: &[&str]) -> Phase {
    let mut phase = Phase::Intro;
    for line in lines {
        phase = handle.submit(*line).await.unwrap().status.phase;
    }
    phase
}

#[tokio::test]
async fn campaign_moves_through_every_level() {
    let runtime = runtime().await;
    let handle = runtime.open_session().await.unwrap();

    let intro = handle.render().await.unwrap();
    assert_eq!(intro.phase, Phase::Intro);
    assert!(intro.body.contains("Tower"));

    // ================================================================
    // Level one: beat the Ogre with the key
    // ================================================================
    let phase = play(&handle, &["", "", "go n", "get key"]).await;
    assert_eq!(phase, Phase::Playing);

    let step = handle.submit("go e").await.unwrap();
    assert_eq!(step.status.phase, Phase::LevelComplete);
    assert!(step.request.is_some());

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.level, LevelId::from("tower"));
    assert_eq!(snapshot.current_room, "Throne");

    // ================================================================
    // Level two: entered on the next empty line, inventory reset
    // ================================================================
    let step = handle.submit("").await.unwrap();
    assert_eq!(step.status.phase, Phase::Playing);
    assert!(step.status.body.contains("Stair"));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.level, LevelId::from("cellar"));
    assert_eq!(snapshot.title, "Cellar");
    assert_eq!(snapshot.progression, Progression::Campaign { ordinal: 1 });
    assert!(snapshot.inventory.is_empty());

    let phase = play(&handle, &["go e", "get torch"]).await;
    assert_eq!(phase, Phase::Playing);

    let step = handle.submit("go n").await.unwrap();
    assert_eq!(step.status.phase, Phase::GameOver);
    assert!(step.request.is_none());
    assert!(step.status.body.contains("You cleared every level!"));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Won));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn campaign_started_on_the_last_level_ends_with_a_win() {
    let runtime = Runtime::builder()
        .source(source())
        .start_level("cellar")
        .build()
        .await
        .unwrap();
    let handle = runtime.open_session().await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.level, LevelId::from("cellar"));
    assert_eq!(snapshot.progression, Progression::Campaign { ordinal: 1 });

    let phase = play(&handle, &["", "", "go e", "get torch"]).await;
    assert_eq!(phase, Phase::Playing);

    let step = handle.submit("go n").await.unwrap();
    assert_eq!(step.status.phase, Phase::GameOver);
    assert!(step.status.body.contains("You cleared every level!"));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.level, LevelId::from("cellar"));
    assert_eq!(snapshot.outcome, Some(Outcome::Won));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_next_level_keeps_the_victory_screen() {
    let source = InMemoryLevelSource::new()
        .level("tower", tower())
        .level("broken", broken());
    let runtime = Runtime::builder().source(source).build().await.unwrap();
    let mut events = runtime.subscribe(Topic::Session);
    let handle = runtime.open_session().await.unwrap();

    play(&handle, &["", "", "go n", "get key"]).await;
    let step = handle.submit("go e").await.unwrap();
    assert_eq!(step.status.phase, Phase::LevelComplete);
    assert!(step.status.body.contains("You beat Ogre"));
    assert!(step.status.body.contains("The next level could not be loaded"));
    assert!(step.request.is_none());

    // Each empty line retries; the level stays broken.
    let step = handle.submit("").await.unwrap();
    assert_eq!(step.status.phase, Phase::LevelComplete);
    assert!(step.status.body.contains("The next level could not be loaded"));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, Phase::LevelComplete);
    assert_eq!(snapshot.level, LevelId::from("tower"));
    assert!(!snapshot.terminated);

    let mut failures = 0;
    while let Ok(event) = events.try_recv() {
        if let Event::Session(SessionEvent::Failed { fatal, .. }) = event {
            assert!(!fatal);
            failures += 1;
        }
    }
    assert_eq!(failures, 2);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn next_level_recovers_after_a_source_failure() {
    let source = FlakySource {
        inner: source(),
        failures: AtomicU32::new(1),
    };
    let runtime = Runtime::builder().source(source).build().await.unwrap();
    let handle = runtime.open_session().await.unwrap();

    play(&handle, &["", "", "go n", "get key"]).await;
    let step = handle.submit("go e").await.unwrap();
    assert_eq!(step.status.phase, Phase::LevelComplete);
    assert!(step.status.body.contains("level source failed"));

    let step = handle.submit("").await.unwrap();
    assert_eq!(step.status.phase, Phase::Playing);
    assert!(step.status.body.contains("Stair"));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.level, LevelId::from("cellar"));
    assert_eq!(snapshot.progression, Progression::Campaign { ordinal: 1 });

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn single_level_mode_ends_on_the_first_boss() {
    let config = RuntimeConfig {
        campaign: false,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config)
        .source(source())
        .build()
        .await
        .unwrap();
    let handle = runtime.open_session().await.unwrap();

    let phase = play(&handle, &["", "", "go n", "get key", "go e"]).await;
    assert_eq!(phase, Phase::GameOver);
    assert_eq!(
        handle.snapshot().await.unwrap().outcome,
        Some(Outcome::Won)
    );
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let runtime = runtime().await;
    let alice = runtime.open_session().await.unwrap();
    let bob = runtime.open_session().await.unwrap();
    assert_ne!(alice.id(), bob.id());

    let (alice_phase, bob_phase) = tokio::join!(
        play(&alice, &["", "", "go n", "get key"]),
        play(&bob, &["", "", "go n"]),
    );
    assert_eq!(alice_phase, Phase::Playing);
    assert_eq!(bob_phase, Phase::Playing);

    let alice_state = alice.snapshot().await.unwrap();
    let bob_state = bob.snapshot().await.unwrap();
    assert!(alice_state.inventory.contains("Key"));
    assert!(bob_state.inventory.is_empty());

    // Bob still finds the key Alice took from her own copy.
    let step = bob.submit("get key").await.unwrap();
    assert!(!step.status.body.contains("isn't in"));
    assert!(bob.snapshot().await.unwrap().inventory.contains("Key"));

    assert_eq!(runtime.active_sessions().await, 2);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn losing_then_submitting_is_fatal() {
    let runtime = runtime().await;
    let mut events = runtime.subscribe(Topic::Session);
    let handle = runtime.open_session().await.unwrap();

    let phase = play(&handle, &["", "", "go n", "go e"]).await;
    assert_eq!(phase, Phase::GameOver);
    assert_eq!(
        handle.snapshot().await.unwrap().outcome,
        Some(Outcome::Lost)
    );

    let err = handle.submit("go w").await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Session(SessionError::Terminated)
    ));

    let mut saw_end = false;
    let mut saw_fatal = false;
    while let Ok(event) = events.try_recv() {
        match event {
            Event::Session(SessionEvent::Ended { outcome, .. }) => {
                assert_eq!(outcome, Some(Outcome::Lost));
                saw_end = true;
            }
            Event::Session(SessionEvent::Failed { fatal, .. }) => saw_fatal = fatal,
            _ => {}
        }
    }
    assert!(saw_end);
    assert!(saw_fatal);
}

#[tokio::test]
async fn session_events_follow_the_lifecycle() {
    let runtime = runtime().await;
    let mut events = runtime.subscribe(Topic::Session);
    let handle = runtime.open_session().await.unwrap();

    handle.submit("").await.unwrap();
    handle.close().await.unwrap();

    let opened = events.recv().await.unwrap();
    assert_eq!(
        opened,
        Event::Session(SessionEvent::Opened {
            session: handle.id(),
            level: LevelId::from("tower"),
        })
    );
    assert!(matches!(
        events.recv().await.unwrap(),
        Event::Session(SessionEvent::Stepped {
            phase: Phase::Instructions,
            ..
        })
    ));
    assert_eq!(
        events.recv().await.unwrap(),
        Event::Session(SessionEvent::Closed {
            session: handle.id()
        })
    );
}

#[tokio::test]
async fn closed_sessions_reject_commands() {
    let runtime = runtime().await;
    let handle = runtime.open_session().await.unwrap();
    let clone = handle.clone();

    handle.close().await.unwrap();
    let err = clone.submit("").await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::CommandChannelClosed | RuntimeError::ReplyChannelClosed(_)
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_open_sessions() {
    let runtime = runtime().await;
    let handle = runtime.open_session().await.unwrap();
    handle.submit("").await.unwrap();

    runtime.shutdown().await.unwrap();
    assert!(handle.is_closed());
    assert!(handle.snapshot().await.is_err());
}

#[tokio::test]
async fn build_validates_the_start_level() {
    let err = Runtime::builder()
        .source(source())
        .start_level("attic")
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::UnknownLevel(id) if id.as_str() == "attic"));

    let err = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::MissingSource));

    let err = Runtime::builder()
        .source(InMemoryLevelSource::new())
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::NoLevels));
}

#[tokio::test]
async fn reject_policy_refuses_non_planar_levels() {
    // Loop whose last edge lands one row off.
    let warped = LevelSpec::new("Warped", "A")
        .room(RoomSpec::new("A").exit(East, "B"))
        .room(RoomSpec::new("B").exit(North, "C"))
        .room(RoomSpec::new("C").exit(West, "D"))
        .room(RoomSpec::new("D").exit(North, "A"));

    let source = InMemoryLevelSource::new().level("warped", warped);
    let tolerant = Runtime::builder()
        .source(source.clone())
        .build()
        .await
        .unwrap();
    assert!(tolerant.open_session().await.is_ok());
    tolerant.shutdown().await.unwrap();

    let err = Runtime::builder()
        .game_config(GameConfig::default().with_grid_conflicts(GridConflictPolicy::Reject))
        .source(source)
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        RuntimeError::InvalidLevel {
            source: LevelError::GridConflict { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn bundled_campaign_plays_through() {
    let source = ContentLevelSource::open(game_content::BUNDLED_DATA_DIR)
        .await
        .unwrap();
    let game_config = source.factory().load_config().unwrap();
    let runtime = Runtime::builder()
        .game_config(game_config)
        .source(source)
        .build()
        .await
        .unwrap();
    let mut level_events = runtime.subscribe(Topic::Level);
    let handle = runtime.open_session().await.unwrap();

    let castle = [
        "",
        "",
        "go east",
        "get right leg of the forbidden one",
        "go west",
        "go south",
        "get left arm of the forbidden one",
        "go east",
        "get millennium puzzle necklace",
        "go west",
        "go north",
        "go west",
        "get right arm of the forbidden one",
        "go west",
        "get left leg of the forbidden one",
        "go east",
        "go south",
        "get head of exodia",
        "go south",
    ];
    assert_eq!(play(&handle, &castle).await, Phase::LevelComplete);

    // The next level is loaded on demand by the session that needs it.
    assert!(matches!(
        level_events.recv().await.unwrap(),
        Event::Level(LevelEvent::Loaded { level, .. }) if level.as_str() == "sunken_crypt"
    ));

    let crypt = [
        "",
        "go up",
        "get silver bell clapper",
        "go south",
        "go right",
        "get tidebound psalter",
        "go north",
        "go east",
    ];
    assert_eq!(play(&handle, &crypt).await, Phase::GameOver);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.level.as_str(), "sunken_crypt");
    assert_eq!(snapshot.current_room, "Reliquary");
    assert_eq!(snapshot.outcome, Some(Outcome::Won));
    let json = snapshot.to_json().unwrap();
    assert!(json.contains("\"phase\":\"game_over\""));

    runtime.shutdown().await.unwrap();
}
