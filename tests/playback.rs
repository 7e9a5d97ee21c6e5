//! Playback scheduling integration tests
//!
//! Drives the tick scheduler through sequences of audio callbacks and checks
//! the tick stream and emitted note events against the transport clock.

use pianoroll_engine::{
    Clip, MidiEvent, Note, Notification, TickScheduler, TimedMidiEvent, TransportSnapshot, PPQN,
};

const SECONDS_PER_TICK: f64 = 0.5 / PPQN as f64; // 120 BPM

fn transport(playing: bool) -> TransportSnapshot {
    TransportSnapshot {
        playing,
        tempo_bpm: 120.0,
        current_bar: 0,
        current_bar_started: 0.0,
        time_sig_numerator: 4,
    }
}

fn run(scheduler: &mut TickScheduler, now: f64) -> (Vec<TimedMidiEvent>, Vec<Notification>) {
    let mut events = Vec::new();
    let mut notifications = Vec::new();
    scheduler.process(now, &mut events, &mut notifications);
    (events, notifications)
}

fn note_ons(events: &[TimedMidiEvent]) -> Vec<(u8, f64)> {
    events
        .iter()
        .filter_map(|e| match e.event {
            MidiEvent::NoteOn { note, .. } => Some((note, e.time)),
            _ => None,
        })
        .collect()
}

/// Every tick is visited exactly once, in order, across many callbacks.
#[test]
fn test_every_tick_visited_exactly_once() {
    // a 4-tick clip with one note per tick makes the tick stream observable
    let notes = [
        Note::new(0, 60, 1, 100),
        Note::new(1, 61, 1, 100),
        Note::new(2, 62, 1, 100),
        Note::new(3, 63, 1, 100),
    ];
    let mut scheduler = TickScheduler::new();
    scheduler.define_clip(Clip::new("grid", 4, &notes).unwrap());
    scheduler.play_clip("grid".to_string());
    scheduler.set_transport(transport(true));

    let mut ons = Vec::new();
    for i in 0..100 {
        let (events, _) = run(&mut scheduler, i as f64 * 0.01);
        ons.extend(note_ons(&events));
    }

    // ticks 0..=N each produced exactly one note-on, cycling 60..=63
    assert_eq!(ons.len() as i64, scheduler.ticks() + 1);
    for (i, &(number, _)) in ons.iter().enumerate() {
        assert_eq!(number as usize, 60 + (i % 4), "tick {i} out of order");
    }

    // timestamps are strictly increasing across the whole run
    for pair in ons.windows(2) {
        assert!(pair[0].1 < pair[1].1);
    }
}

/// A looping clip re-triggers its notes every cycle at the right times.
#[test]
fn test_clip_loops_on_the_beat() {
    // one-beat clip (24 ticks) with a note on its first tick
    let mut scheduler = TickScheduler::new();
    scheduler.define_clip(Clip::new("beat", PPQN, &[Note::new(0, 60, 2, 100)]).unwrap());
    scheduler.play_clip("beat".to_string());
    scheduler.set_transport(transport(true));

    let mut ons = Vec::new();
    for i in 0..200 {
        let (events, _) = run(&mut scheduler, i as f64 * 0.01);
        ons.extend(note_ons(&events));
    }

    // beats at 120 BPM fall every 0.5s
    assert!(ons.len() >= 4);
    for (k, &(_, time)) in ons.iter().enumerate() {
        assert!((time - k as f64 * 0.5).abs() < 1e-9);
    }
}

/// Back-to-back due queue entries all activate in one callback, in order,
/// and the last one wins the active slot.
#[test]
fn test_queue_drains_in_order_within_one_callback() {
    let mut scheduler = TickScheduler::new();
    for id in ["a", "b", "c"] {
        scheduler.define_clip(Clip::new(id, 96, &[]).unwrap());
    }
    scheduler.play_clip("a".to_string());
    scheduler.set_transport(transport(true));
    run(&mut scheduler, 0.0);

    scheduler.queue_clip("b".to_string(), 0.5);
    scheduler.queue_clip("c".to_string(), 0.5);

    let (_, notifications) = run(&mut scheduler, 0.6);
    let activated: Vec<&str> = notifications
        .iter()
        .filter_map(|n| match n {
            Notification::NowPlayingClip { id } => Some(id.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(activated, vec!["b", "c"]);
    assert_eq!(scheduler.current_clip_id(), "c");
}

/// Switching mid-bar keeps the absolute tick phase: the new clip picks up at
/// `ticks % length`, not at zero.
#[test]
fn test_switch_does_not_reset_phase() {
    let mut scheduler = TickScheduler::new();
    scheduler.define_clip(Clip::new("silent", 96, &[]).unwrap());
    // short clip with a note at position 18 = 50 % 32
    scheduler.define_clip(Clip::new("short", 32, &[Note::new(18, 71, 2, 100)]).unwrap());
    scheduler.play_clip("silent".to_string());
    scheduler.set_transport(transport(true));

    run(&mut scheduler, 0.95);
    assert!(scheduler.ticks() < 50);

    scheduler.play_clip("short".to_string());
    let (events, _) = run(&mut scheduler, 1.05);

    let ons = note_ons(&events);
    assert_eq!(ons.len(), 1);
    assert_eq!(ons[0].0, 71);
    assert!((ons[0].1 - 50.0 * SECONDS_PER_TICK).abs() < 1e-9);
}

/// No tick beyond the lookahead window is emitted in the same callback.
#[test]
fn test_lookahead_bounds_emission() {
    // note on every tick so any overshoot is visible
    let notes: Vec<Note> = (0..96).map(|t| Note::new(t, 60, 1, 100)).collect();
    let mut scheduler = TickScheduler::new();
    scheduler.define_clip(Clip::new("dense", 96, &notes).unwrap());
    scheduler.play_clip("dense".to_string());
    scheduler.set_transport(transport(true));

    let (events, _) = run(&mut scheduler, 0.0);
    for (_, time) in note_ons(&events) {
        assert!(time <= 0.05 + 1e-9, "note-on at {time} beyond the window");
    }
}

/// Stopping the transport freezes the tick counter; nothing is emitted while
/// stopped.
#[test]
fn test_stop_halts_emission() {
    let notes: Vec<Note> = (0..96).map(|t| Note::new(t, 60, 1, 100)).collect();
    let mut scheduler = TickScheduler::new();
    scheduler.define_clip(Clip::new("dense", 96, &notes).unwrap());
    scheduler.play_clip("dense".to_string());
    scheduler.set_transport(transport(true));
    run(&mut scheduler, 0.2);
    let frozen = scheduler.ticks();

    scheduler.set_transport(transport(false));
    let (events, _) = run(&mut scheduler, 0.3);
    assert!(events.is_empty());
    assert_eq!(scheduler.ticks(), frozen);
}

/// A transport update mid-play re-locks the phase to the reported bar and
/// keeps timestamps consistent with the new snapshot.
#[test]
fn test_transport_update_relocks_phase() {
    let mut scheduler = TickScheduler::new();
    scheduler.define_clip(Clip::new("beat", PPQN, &[Note::new(0, 60, 2, 100)]).unwrap());
    scheduler.play_clip("beat".to_string());
    scheduler.set_transport(transport(true));
    run(&mut scheduler, 0.0);

    // host reports bar 1 (2.0s at 120 BPM 4/4)
    scheduler.set_transport(TransportSnapshot {
        playing: true,
        tempo_bpm: 120.0,
        current_bar: 1,
        current_bar_started: 2.0,
        time_sig_numerator: 4,
    });

    let (events, _) = run(&mut scheduler, 2.0);
    let ons = note_ons(&events);

    // bar 1 starts at absolute tick 96 = position 0 of the 24-tick clip
    assert!(!ons.is_empty());
    assert!((ons[0].1 - 2.0).abs() < 1e-9);
    assert!(scheduler.ticks() >= 96);
}
