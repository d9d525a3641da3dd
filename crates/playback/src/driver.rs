//! Playback driver: enters, advances, and leaves cinematic playback.
//!
//! The host invokes [`Driver::tick`] once per actor per scheduler turn with
//! the wall-clock delta; all state transitions are synchronous within that
//! call. Virtual time strictly advances across ticks unless a new `play`
//! resets it.

use std::collections::HashMap;

use camline_common::TimeCode;
use camline_timeline::{Cinematic, PlayMode};
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, warn};

use crate::actor::{Actor, PlaySession};

/// Drives cinematic playback for any number of actors.
#[derive(Default)]
pub struct Driver {
    /// Per-actor time of the last fired command keyframe, so re-entrant
    /// crossings of the same keyframe don't refire.
    last_commands: HashMap<String, TimeCode>,
    /// Per-actor one-shot completion senders, signaled on stop.
    completions: HashMap<String, Sender<()>>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `actor` under the cinematic's control from `start` at `speed`.
    ///
    /// Locks the actor's own input, applies the initial transform, and
    /// returns a one-shot receiver signaled exactly once when playback
    /// stops (end of timeline, explicit stop, or another system taking
    /// over and this driver observing it).
    pub fn play(
        &mut self,
        cin: &Cinematic,
        actor: &mut dyn Actor,
        start: TimeCode,
        speed: f64,
    ) -> Receiver<()> {
        actor.set_session(PlaySession {
            cinematic_id: cin.id().to_string(),
            time: start.as_secs(),
            speed,
            mode: cin.play_mode(),
        });

        best_effort(actor, "inputpermission set @s camera disabled");
        best_effort(actor, "inputpermission set @s movement disabled");
        best_effort(actor, "gamemode spectator");

        if let Some(transform) = cin.transform_at(start) {
            actor.apply(transform.pos, transform.rot, cin.play_mode());
        }

        debug!(
            cinematic = %cin.id(),
            actor = %actor.id(),
            start = %start,
            speed,
            "Playback started"
        );

        let (tx, rx) = bounded(1);
        self.completions.insert(actor.id().to_string(), tx);
        rx
    }

    /// Advance playback of `cin` on `actor` by `delta` seconds of wall
    /// clock. A session tracking a different cinematic (or none) means
    /// another system took control: the tick is a no-op, not an error.
    pub fn tick(&mut self, cin: &Cinematic, actor: &mut dyn Actor, delta: f64) {
        let Some(mut session) = actor.session() else {
            return;
        };
        if session.cinematic_id != cin.id() {
            return;
        }

        session.time += session.speed * delta;
        let time = TimeCode::from_secs(session.time);
        let mode = session.mode;
        actor.set_session(session);

        if time > cin.length() {
            self.stop(cin, actor);
            return;
        }

        let Some(transform) = cin.transform_at(time) else {
            return;
        };

        if let Some(cmd_kf) = &transform.cmd_keyframe {
            let fired = self.last_commands.get(actor.id()) == Some(&cmd_kf.time());
            if !fired {
                self.last_commands
                    .insert(actor.id().to_string(), cmd_kf.time());
                if cmd_kf.has_command() {
                    best_effort(actor, cmd_kf.command());
                }
            }
        }

        actor.apply(transform.pos, transform.rot, mode);
    }

    /// Release `actor` from the cinematic's control: restore input, clear
    /// the session and camera, and signal completion exactly once. A no-op
    /// when the actor is not playing this cinematic.
    pub fn stop(&mut self, cin: &Cinematic, actor: &mut dyn Actor) {
        let Some(session) = actor.session() else {
            return;
        };
        if session.cinematic_id != cin.id() {
            return;
        }

        best_effort(actor, "inputpermission set @s camera enabled");
        best_effort(actor, "inputpermission set @s movement enabled");
        actor.clear_session();
        best_effort(actor, "ride @s stop_riding");
        if session.mode == PlayMode::Camera {
            best_effort(actor, "camera @s clear");
        }

        self.last_commands.remove(actor.id());
        if let Some(tx) = self.completions.remove(actor.id()) {
            let _ = tx.try_send(());
        }

        debug!(cinematic = %cin.id(), actor = %actor.id(), "Playback stopped");
    }

    /// Whether `actor` is currently tracked as playing `cin`.
    pub fn is_playing(actor: &dyn Actor, cin: &Cinematic) -> bool {
        actor
            .session()
            .is_some_and(|s| s.cinematic_id == cin.id())
    }
}

/// Command side effects never abort playback; log and continue.
fn best_effort(actor: &mut dyn Actor, command: &str) {
    if let Err(err) = actor.run_command(command) {
        warn!(command, error = %err, "Command failed; continuing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::CommandError;
    use camline_common::{TimeCode, Vec3};
    use camline_timeline::{Keyframe, Sample};

    /// Test double recording everything the driver does to it.
    struct RecordingActor {
        id: String,
        session: Option<PlaySession>,
        applied: Vec<(Vec3, Vec3, PlayMode)>,
        commands: Vec<String>,
        fail_commands: bool,
    }

    impl RecordingActor {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                session: None,
                applied: Vec::new(),
                commands: Vec::new(),
                fail_commands: false,
            }
        }
    }

    impl Actor for RecordingActor {
        fn id(&self) -> &str {
            &self.id
        }

        fn apply(&mut self, pos: Vec3, rot: Vec3, mode: PlayMode) {
            self.applied.push((pos, rot, mode));
        }

        fn run_command(&mut self, command: &str) -> Result<(), CommandError> {
            self.commands.push(command.to_string());
            if self.fail_commands {
                Err(CommandError::new("refused"))
            } else {
                Ok(())
            }
        }

        fn session(&self) -> Option<PlaySession> {
            self.session.clone()
        }

        fn set_session(&mut self, session: PlaySession) {
            self.session = Some(session);
        }

        fn clear_session(&mut self) {
            self.session = None;
        }
    }

    fn sample_cinematic() -> Cinematic {
        let cin = Cinematic::new("test");
        let mut line = cin.timeline().write();
        line.add(Keyframe::at(TimeCode::ZERO).with_pos(Sample::new(Vec3::ZERO)));
        line.add(
            Keyframe::at(TimeCode::from_secs(1.0))
                .with_pos(Sample::new(Vec3::new(5.0, 0.0, 0.0)))
                .with_command("say halfway"),
        );
        line.add(
            Keyframe::at(TimeCode::from_secs(2.0))
                .with_pos(Sample::new(Vec3::new(10.0, 0.0, 0.0))),
        );
        drop(line);
        cin
    }

    #[test]
    fn play_sets_session_and_applies_initial_transform() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);

        let session = actor.session.clone().expect("session");
        assert_eq!(session.cinematic_id, "test");
        assert!((session.time - 0.0).abs() < 1e-9);
        assert!((session.speed - 1.0).abs() < 1e-9);
        assert_eq!(actor.applied.len(), 1);
        assert!(actor
            .commands
            .iter()
            .any(|c| c.contains("camera disabled")));
        assert!(Driver::is_playing(&actor, &cin));
    }

    #[test]
    fn tick_advances_virtual_time_by_speed() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 2.0);
        driver.tick(&cin, &mut actor, 0.25);

        let session = actor.session.clone().expect("session");
        assert!((session.time - 0.5).abs() < 1e-9);

        // 0.5s into a linear 0→5 segment over 1s.
        let (pos, _, _) = actor.applied.last().expect("applied");
        assert!((pos.x - 2.5).abs() < 1e-9);
    }

    #[test]
    fn command_keyframe_fires_exactly_once() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        actor.commands.clear();

        driver.tick(&cin, &mut actor, 1.1);
        driver.tick(&cin, &mut actor, 0.1);
        driver.tick(&cin, &mut actor, 0.1);

        let fired: Vec<&String> = actor
            .commands
            .iter()
            .filter(|c| c.as_str() == "say halfway")
            .collect();
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn reaching_the_end_stops_and_signals_completion() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        let done = driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        driver.tick(&cin, &mut actor, 2.5);

        assert!(actor.session.is_none());
        assert!(!Driver::is_playing(&actor, &cin));
        assert_eq!(done.try_recv().ok(), Some(()));
        // One-shot: no second signal.
        assert!(done.try_recv().is_err());
        assert!(actor.commands.iter().any(|c| c.contains("camera enabled")));
    }

    #[test]
    fn external_takeover_cancels_silently() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        let before = actor.applied.len();

        // Another system claims the actor.
        actor.session = Some(PlaySession {
            cinematic_id: "other".to_string(),
            time: 0.0,
            speed: 1.0,
            mode: PlayMode::Teleport,
        });

        driver.tick(&cin, &mut actor, 0.5);
        assert_eq!(actor.applied.len(), before);

        // Session cleared entirely also terminates quietly.
        actor.session = None;
        driver.tick(&cin, &mut actor, 0.5);
        assert_eq!(actor.applied.len(), before);
    }

    #[test]
    fn stop_is_noop_for_other_cinematics() {
        let cin = sample_cinematic();
        let other = Cinematic::new("other");
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        driver.stop(&other, &mut actor);
        assert!(Driver::is_playing(&actor, &cin));

        driver.stop(&cin, &mut actor);
        assert!(!Driver::is_playing(&actor, &cin));
    }

    #[test]
    fn stop_clears_camera_in_camera_mode() {
        let cin = sample_cinematic().with_play_mode(PlayMode::Camera);
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        driver.stop(&cin, &mut actor);
        assert!(actor.commands.iter().any(|c| c == "camera @s clear"));
    }

    #[test]
    fn failing_commands_never_abort_playback() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");
        actor.fail_commands = true;

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        driver.tick(&cin, &mut actor, 1.1);

        // Transforms kept flowing despite every command failing.
        assert!(actor.applied.len() >= 2);
        assert!(Driver::is_playing(&actor, &cin));
    }

    #[test]
    fn restart_resets_command_tracking() {
        let cin = sample_cinematic();
        let mut driver = Driver::new();
        let mut actor = RecordingActor::new("a1");

        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        driver.tick(&cin, &mut actor, 1.1);
        driver.stop(&cin, &mut actor);

        actor.commands.clear();
        driver.play(&cin, &mut actor, TimeCode::ZERO, 1.0);
        driver.tick(&cin, &mut actor, 1.1);

        let fired: Vec<&String> = actor
            .commands
            .iter()
            .filter(|c| c.as_str() == "say halfway")
            .collect();
        assert_eq!(fired.len(), 1);
    }
}
