//! Strategies for picking one dimension when a world has several.
//!
//! The resolver only talks to [`DimensionChooser`], so it works the same for a
//! GUI prompt, a CLI flag, a fixed default or a remote caller.

use tokio::sync::{mpsc, oneshot};

use super::dimension::Dimension;

/// Picks one of the available dimensions.
///
/// Returning `None` means the caller declined to choose.
pub trait DimensionChooser {
    fn choose(&mut self, candidates: &[Dimension]) -> Option<Dimension>;
}

impl<F> DimensionChooser for F
where
    F: FnMut(&[Dimension]) -> Option<Dimension>,
{
    fn choose(&mut self, candidates: &[Dimension]) -> Option<Dimension> {
        self(candidates)
    }
}

/// Always takes the first candidate in probe order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailable;

impl DimensionChooser for FirstAvailable {
    fn choose(&mut self, candidates: &[Dimension]) -> Option<Dimension> {
        candidates.first().copied()
    }
}

/// Takes a fixed dimension, and declines if the world does not have it.
#[derive(Clone, Copy, Debug)]
pub struct Preferred(pub Dimension);

impl DimensionChooser for Preferred {
    fn choose(&mut self, candidates: &[Dimension]) -> Option<Dimension> {
        let found = candidates.contains(&self.0).then_some(self.0);
        if found.is_none() {
            log::warn!("Requested dimension {} is not available in this world", self.0);
        }
        found
    }
}

/// A pending choice forwarded to whoever owns the receiving end of a
/// [`ChannelChooser`]. Dropping the request without answering cancels it.
#[derive(Debug)]
pub struct ChoiceRequest {
    candidates: Vec<Dimension>,
    reply: oneshot::Sender<Dimension>,
}

impl ChoiceRequest {
    pub fn candidates(&self) -> &[Dimension] {
        &self.candidates
    }

    pub fn answer(self, dimension: Dimension) {
        // The resolver may already be gone; nothing left to do then.
        let _ = self.reply.send(dimension);
    }

    pub fn cancel(self) {}
}

/// Forwards the choice over a channel and blocks until it is answered.
///
/// Must be driven from a blocking context (a plain thread or
/// `tokio::task::spawn_blocking`), never from inside an async task.
#[derive(Clone, Debug)]
pub struct ChannelChooser {
    requests: mpsc::UnboundedSender<ChoiceRequest>,
}

impl ChannelChooser {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChoiceRequest>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        (Self { requests }, receiver)
    }
}

impl DimensionChooser for ChannelChooser {
    fn choose(&mut self, candidates: &[Dimension]) -> Option<Dimension> {
        let (reply, answer) = oneshot::channel();
        let request = ChoiceRequest {
            candidates: candidates.to_vec(),
            reply,
        };
        if self.requests.send(request).is_err() {
            log::debug!("Nobody is listening for dimension choices");
            return None;
        }
        answer.blocking_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Dimension; 3] = Dimension::PROBE_ORDER;

    #[test]
    fn test_first_available() {
        assert_eq!(FirstAvailable.choose(&ALL), Some(Dimension::Overworld));
        assert_eq!(FirstAvailable.choose(&[Dimension::End]), Some(Dimension::End));
        assert_eq!(FirstAvailable.choose(&[]), None);
    }

    #[test]
    fn test_preferred() {
        assert_eq!(Preferred(Dimension::Nether).choose(&ALL), Some(Dimension::Nether));
        assert_eq!(Preferred(Dimension::Nether).choose(&[Dimension::Overworld, Dimension::End]), None);
    }

    #[test]
    fn test_closure_chooser() {
        let mut last = |c: &[Dimension]| c.last().copied();
        assert_eq!(last.choose(&ALL), Some(Dimension::End));
    }

    #[test]
    fn test_channel_answer() {
        let (mut chooser, mut requests) = ChannelChooser::new();
        let decider = std::thread::spawn(move || {
            let request = requests.blocking_recv().unwrap();
            assert_eq!(request.candidates(), &ALL);
            request.answer(Dimension::End);
        });

        assert_eq!(chooser.choose(&ALL), Some(Dimension::End));
        decider.join().unwrap();
    }

    #[test]
    fn test_channel_cancel() {
        let (mut chooser, mut requests) = ChannelChooser::new();
        let decider = std::thread::spawn(move || {
            requests.blocking_recv().unwrap().cancel();
        });

        assert_eq!(chooser.choose(&ALL), None);
        decider.join().unwrap();
    }

    #[test]
    fn test_channel_without_listener() {
        let (mut chooser, requests) = ChannelChooser::new();
        drop(requests);
        assert_eq!(chooser.choose(&ALL), None);
    }
}
