//! Animated loading spinner.
//!
//! The data browser shows a spinner in place of rows while its `loading`
//! flag is set; the spinner can also be embedded directly. Tick messages
//! carry the owning spinner's id and a sequence tag so frames from an
//! abandoned animation cycle are dropped.
//!
//! # Examples
//!
//! ```rust
//! use backoffice_widgets::spinner::{self, DOT};
//!
//! let mut s = spinner::new().with_frames(DOT.clone());
//! let _first_tick = s.tick();
//! assert!(!s.view().is_empty());
//! ```

use bubbletea_rs::{tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A spinner animation: its frames and the delay between them.
#[derive(Debug, Clone)]
pub struct Spinner {
    /// Animation frames, cycled in order.
    pub frames: Vec<String>,
    /// Delay between frames.
    pub fps: Duration,
}

impl Spinner {
    /// Creates a spinner animation from frames and a frame delay.
    pub fn new(frames: Vec<String>, fps: Duration) -> Self {
        Self { frames, fps }
    }
}

fn frames_of(frames: &[&str], millis: u64) -> Spinner {
    Spinner::new(
        frames.iter().map(|s| s.to_string()).collect(),
        Duration::from_millis(millis),
    )
}

/// Classic line spinner: `| / - \`.
pub static LINE: Lazy<Spinner> = Lazy::new(|| frames_of(&["|", "/", "-", "\\"], 100));

/// Braille dot spinner.
pub static DOT: Lazy<Spinner> = Lazy::new(|| {
    frames_of(
        &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
        80,
    )
});

/// Growing points spinner: `∙∙∙ ●∙∙ ∙●∙ ∙∙●`.
pub static POINTS: Lazy<Spinner> = Lazy::new(|| frames_of(&["∙∙∙", "●∙∙", "∙●∙", "∙∙●"], 140));

/// Trailing ellipsis spinner.
pub static ELLIPSIS: Lazy<Spinner> = Lazy::new(|| frames_of(&["", ".", "..", "..."], 250));

/// Message advancing a spinner by one frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Id of the spinner instance this tick targets.
    pub id: usize,
    /// Sequence tag; ticks with a stale tag are dropped.
    pub tag: usize,
}

/// Spinner model.
#[derive(Debug, Clone)]
pub struct Model {
    /// The animation to play.
    pub spinner: Spinner,
    /// Style applied to the rendered frame.
    pub style: Style,

    frame: usize,
    id: usize,
    tag: usize,
}

/// Creates a spinner with the default line animation.
pub fn new() -> Model {
    Model::default()
}

impl Default for Model {
    fn default() -> Self {
        Self {
            spinner: LINE.clone(),
            style: Style::new(),
            frame: 0,
            id: next_id(),
            tag: 0,
        }
    }
}

impl Model {
    /// Sets the animation (builder pattern).
    pub fn with_frames(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self.frame = 0;
        self
    }

    /// Sets the frame style (builder pattern).
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Returns this spinner's unique id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Produces the next tick command for this spinner.
    ///
    /// Call once to start the animation (typically from `init`); `update`
    /// keeps it running by returning the follow-up tick.
    pub fn tick(&mut self) -> Cmd {
        self.tag += 1;
        let id = self.id;
        let tag = self.tag;
        tick(self.spinner.fps, move |_| {
            Box::new(TickMsg { id, tag }) as Msg
        })
    }

    /// Advances the animation on matching tick messages.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick_msg = msg.downcast_ref::<TickMsg>()?;
        if tick_msg.id != self.id || tick_msg.tag != self.tag {
            return None;
        }
        if !self.spinner.frames.is_empty() {
            self.frame = (self.frame + 1) % self.spinner.frames.len();
        }
        Some(self.tick())
    }

    /// Renders the current frame.
    pub fn view(&self) -> String {
        match self.spinner.frames.get(self.frame) {
            Some(frame) => self.style.render(frame),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_catalog() {
        assert_eq!(LINE.frames.len(), 4);
        assert_eq!(DOT.frames.len(), 10);
        assert_eq!(POINTS.frames.len(), 4);
        assert_eq!(ELLIPSIS.frames.len(), 4);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = new();
        let b = new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_matching_tick_advances_frame() {
        let mut s = new();
        let _cmd = s.tick();
        let msg: Msg = Box::new(TickMsg { id: s.id, tag: s.tag });
        assert!(s.update(&msg).is_some());
        assert_eq!(s.frame, 1);
    }

    #[test]
    fn test_stale_or_foreign_tick_is_dropped() {
        let mut s = new();
        let _cmd = s.tick();
        let stale: Msg = Box::new(TickMsg {
            id: s.id,
            tag: s.tag + 1,
        });
        assert!(s.update(&stale).is_none());
        assert_eq!(s.frame, 0);

        let foreign: Msg = Box::new(TickMsg {
            id: s.id + 1000,
            tag: s.tag,
        });
        assert!(s.update(&foreign).is_none());
    }

    #[test]
    fn test_frames_wrap_around() {
        let mut s = new().with_frames(frames_of(&["a", "b"], 10));
        for _ in 0..3 {
            let _cmd = s.tick();
            let msg: Msg = Box::new(TickMsg { id: s.id, tag: s.tag });
            s.update(&msg);
        }
        assert_eq!(s.view(), "b");
    }
}
