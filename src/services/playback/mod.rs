//! Background music state shared by the celebration page widgets.
//!
//! All mutation goes through [`MusicStore`] so the invariants hold at the
//! boundary: volume stays in range, a muted store never sends a non-zero
//! volume to the sink, and the current index always points into the playlist.

mod mood;

use std::time::Duration;

use crate::models::playback::{Mood, Track, Volume};

pub use mood::mood_for_section;

/// Whatever actually makes sound. Implementations wrap an audio backend.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink: Send {
    fn load(&mut self, track: &Track);
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    fn is_playing(&self) -> bool;
}

pub struct MusicStore<S: AudioSink> {
    sink: S,
    tracks: Vec<Track>,
    current_index: Option<usize>,
    current_track: Option<Track>,
    is_playing: bool,
    volume: Volume,
    muted: bool,
}

impl<S: AudioSink> MusicStore<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            tracks: Vec::new(),
            current_index: None,
            current_track: None,
            is_playing: false,
            volume: Volume::default(),
            muted: false,
        }
    }

    pub fn with_tracks(sink: S, tracks: Vec<Track>) -> Self {
        let mut store = Self::new(sink);
        store.set_tracks(tracks);
        store
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume actually sent to the sink.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume.get()
        }
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        if self.current_index.is_some_and(|index| index >= self.tracks.len()) {
            self.current_index = None;
        }
    }

    /// Swaps the loaded track. The previous one is unloaded first.
    pub fn set_current_track(&mut self, track: Option<Track>) {
        if self.current_track.is_some() {
            self.sink.unload();
        }
        self.is_playing = false;

        match track {
            Some(track) => {
                log::debug!("Loading track {} ({})", track.id, track.url);
                self.sink.load(&track);
                self.sink.set_volume(self.effective_volume());
                self.current_track = Some(track);
            }
            None => {
                self.current_track = None;
                self.current_index = None;
            }
        }
    }

    pub fn play(&mut self) {
        if self.current_track.is_none() || self.sink.is_playing() {
            return;
        }
        self.sink.set_volume(self.effective_volume());
        self.sink.play();
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        if self.current_track.is_some() && self.sink.is_playing() {
            self.sink.pause();
            self.is_playing = false;
        }
    }

    pub fn stop(&mut self) {
        if self.current_track.is_some() {
            self.sink.stop();
            self.is_playing = false;
        }
    }

    pub fn seek(&mut self, position: Duration) {
        if self.current_track.is_some() {
            self.sink.seek(position);
        }
    }

    /// Stores the clamped volume; the sink only hears it while unmuted.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = Volume::new(volume);
        if self.current_track.is_some() && !self.muted {
            self.sink.set_volume(self.volume.get());
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if self.current_track.is_some() {
            self.sink.set_volume(self.effective_volume());
        }
    }

    /// Loads and starts the track at `index`. Out-of-range indices are ignored.
    pub fn play_track(&mut self, index: usize) -> bool {
        let Some(track) = self.tracks.get(index).cloned() else {
            log::warn!("Ignoring play request for missing track index {}", index);
            return false;
        };
        self.set_current_track(Some(track));
        self.current_index = Some(index);
        self.play();
        true
    }

    pub fn next_track(&mut self) -> bool {
        if self.tracks.is_empty() {
            return false;
        }
        let next = self
            .current_index
            .map_or(0, |index| (index + 1) % self.tracks.len());
        self.play_track(next)
    }

    pub fn previous_track(&mut self) -> bool {
        if self.tracks.is_empty() {
            return false;
        }
        let previous = match self.current_index {
            None | Some(0) => self.tracks.len() - 1,
            Some(index) => index - 1,
        };
        self.play_track(previous)
    }

    /// Called by the sink owner when a track finishes.
    pub fn on_track_end(&mut self) {
        self.is_playing = false;
        self.next_track();
    }

    /// Switches to the first track of `mood`, resuming playback if music was
    /// already on. Returns `false` when nothing changed.
    pub fn set_mood(&mut self, mood: Mood) -> bool {
        if self.current_track.as_ref().is_some_and(|track| track.mood == mood) {
            return false;
        }
        let Some(index) = self.tracks.iter().position(|track| track.mood == mood) else {
            log::warn!("No track available for mood {:?}", mood);
            return false;
        };

        let was_playing = self.is_playing;
        self.pause();
        self.set_current_track(Some(self.tracks[index].clone()));
        self.current_index = Some(index);
        if was_playing {
            self.play();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::playback::default_tracks;

    /// Sink that tracks play state and accepts anything else.
    fn permissive_sink() -> MockAudioSink {
        let playing = Arc::new(AtomicBool::new(false));
        let mut sink = MockAudioSink::new();
        sink.expect_load().return_const(());
        sink.expect_set_volume().return_const(());
        sink.expect_seek().return_const(());
        let p = Arc::clone(&playing);
        sink.expect_unload().returning(move || p.store(false, Ordering::SeqCst));
        let p = Arc::clone(&playing);
        sink.expect_play().returning(move || p.store(true, Ordering::SeqCst));
        let p = Arc::clone(&playing);
        sink.expect_pause().returning(move || p.store(false, Ordering::SeqCst));
        let p = Arc::clone(&playing);
        sink.expect_stop().returning(move || p.store(false, Ordering::SeqCst));
        sink.expect_is_playing()
            .returning(move || playing.load(Ordering::SeqCst));
        sink
    }

    #[test]
    fn test_play_without_track_is_noop() {
        let mut sink = MockAudioSink::new();
        sink.expect_play().never();
        let mut store = MusicStore::new(sink);
        store.play();
        assert!(!store.is_playing());
    }

    #[test]
    fn test_play_track_loads_and_starts() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        assert!(store.play_track(1));
        assert_eq!(store.current_index(), Some(1));
        assert_eq!(store.current_track().unwrap().id, "lo-fi-cute");
        assert!(store.is_playing());

        store.pause();
        assert!(!store.is_playing());
    }

    #[test]
    fn test_play_track_out_of_range_is_ignored() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        assert!(!store.play_track(9));
        assert_eq!(store.current_index(), None);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        assert!(store.next_track());
        assert_eq!(store.current_index(), Some(0));
        store.previous_track();
        assert_eq!(store.current_index(), Some(2));
        store.next_track();
        assert_eq!(store.current_index(), Some(0));
    }

    #[test]
    fn test_track_end_advances() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        store.play_track(2);
        store.on_track_end();
        assert_eq!(store.current_index(), Some(0));
        assert!(store.is_playing());
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut store = MusicStore::new(permissive_sink());
        store.set_volume(3.0);
        assert_eq!(store.volume(), Volume::MAX);
        store.set_volume(-1.0);
        assert_eq!(store.volume(), Volume::SILENT);
    }

    #[test]
    fn test_muted_store_sends_zero_volume() {
        let mut sink = MockAudioSink::new();
        sink.expect_load().return_const(());
        sink.expect_is_playing().return_const(false);
        sink.expect_play().return_const(());
        sink.expect_set_volume().with(eq(0.5)).times(1).return_const(());
        sink.expect_set_volume().with(eq(0.0)).times(2).return_const(());

        let mut store = MusicStore::with_tracks(sink, default_tracks());
        store.set_current_track(Some(default_tracks()[0].clone()));
        store.toggle_mute();
        // Stored while muted, not forwarded.
        store.set_volume(0.8);
        store.play();

        assert!(store.is_muted());
        assert_eq!(store.volume().get(), 0.8);
        assert_eq!(store.effective_volume(), 0.0);
    }

    #[test]
    fn test_clearing_track_unloads() {
        let mut sink = MockAudioSink::new();
        sink.expect_load().times(1).return_const(());
        sink.expect_set_volume().return_const(());
        sink.expect_unload().times(1).return_const(());

        let mut store = MusicStore::new(sink);
        store.set_current_track(Some(default_tracks()[0].clone()));
        store.set_current_track(None);
        assert!(store.current_track().is_none());
        assert!(!store.is_playing());
    }

    #[test]
    fn test_set_mood_resumes_playback() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        store.play_track(0);

        assert!(store.set_mood(Mood::Bollywood));
        assert_eq!(store.current_track().unwrap().mood, Mood::Bollywood);
        assert!(store.is_playing());

        assert!(!store.set_mood(Mood::Bollywood));
    }

    #[test]
    fn test_set_mood_keeps_paused_store_paused() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        assert!(store.set_mood(Mood::LoFi));
        assert_eq!(store.current_index(), Some(1));
        assert!(!store.is_playing());
    }

    #[test]
    fn test_shrinking_playlist_drops_stale_index() {
        let mut store = MusicStore::with_tracks(permissive_sink(), default_tracks());
        store.play_track(2);
        store.set_tracks(default_tracks().into_iter().take(1).collect());
        assert_eq!(store.current_index(), None);
    }
}
