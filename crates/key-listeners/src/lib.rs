//! Timeout-disambiguated key listeners.
//!
//! Two listeners sit on a global key event feed and decide, per event, whether
//! it reaches the focused application:
//!
//! - [`HoldKeyListener`] tells a tap of a trigger key from a hold. Taps are
//!   replayed untouched; holds publish [`HoldKeyEvent::HeldKey`].
//! - [`KeySequenceListener`] withholds typed characters while they could still
//!   spell a registered sequence, publishing [`SequenceEvent::MatchedSequence`]
//!   on completion and replaying everything otherwise.
//!
//! Listeners are synchronous state machines (see [`Listener`]). The
//! [`ListenerHost`] drives one with tokio timers and a [`ReplaySink`].

pub mod activation;
mod error;
pub mod event;
pub mod hold;
pub mod host;
pub mod listener;
pub mod sequence;
pub mod sink;

pub use activation::{Activation, ActivationRouter};
pub use error::{Error, Result};
pub use event::{EventKind, Key, KeyEvent, Modifier};
pub use hold::{DEFAULT_HOLD_DELAY, HoldKeyEvent, HoldKeyListener};
pub use host::ListenerHost;
pub use listener::{Disposition, Input, Listener, Reaction, TimerCommand, TimerId};
pub use sequence::{DEFAULT_RESET_DELAY, KeySequenceListener, SequenceEvent, SequenceTiming};
pub use sink::{RecordingSink, ReplaySink};
