use crossbeam_channel::{Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A normalized input event. Pointer positions are in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The container was resized to the given logical size.
    Resize { width: f64, height: f64 },
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton },
    /// Wheel movement in lines; positive zooms in.
    Wheel { delta: f32 },
}

/// Source of input events consumed by the viewer.
pub trait InputSource {
    /// Next pending event, if any.
    fn poll(&mut self) -> Option<InputEvent>;
    /// Stop delivering events. Later `poll` calls return `None`.
    fn dispose(&mut self);
}

/// Channel-backed input source. The host pushes events through the paired
/// [`InputSender`]; the viewer drains them.
#[derive(Debug)]
pub struct InputObserver {
    receiver: Option<Receiver<InputEvent>>,
}

/// Host-side handle feeding an [`InputObserver`].
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputObserver {
    pub fn channel() -> (Self, InputSender) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (
            Self {
                receiver: Some(receiver),
            },
            InputSender { sender },
        )
    }

    pub fn is_disposed(&self) -> bool {
        self.receiver.is_none()
    }
}

impl InputSource for InputObserver {
    fn poll(&mut self) -> Option<InputEvent> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    fn dispose(&mut self) {
        if self.receiver.take().is_some() {
            log::debug!("Input observer unsubscribed");
        }
    }
}

impl InputSender {
    pub fn send(&self, event: InputEvent) -> Result<(), ViewerError> {
        self.sender.send(event).map_err(|_| ViewerError::InputClosed)
    }

    pub fn resize(&self, width: f64, height: f64) -> Result<(), ViewerError> {
        self.send(InputEvent::Resize { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (mut observer, sender) = InputObserver::channel();
        sender.resize(640.0, 480.0).unwrap();
        sender.send(InputEvent::Wheel { delta: 1.0 }).unwrap();

        assert_eq!(
            observer.poll(),
            Some(InputEvent::Resize {
                width: 640.0,
                height: 480.0
            })
        );
        assert_eq!(observer.poll(), Some(InputEvent::Wheel { delta: 1.0 }));
        assert_eq!(observer.poll(), None);
    }

    #[test]
    fn test_dispose_unsubscribes() {
        let (mut observer, sender) = InputObserver::channel();
        sender.send(InputEvent::Wheel { delta: 1.0 }).unwrap();
        observer.dispose();

        assert!(observer.is_disposed());
        assert_eq!(observer.poll(), None);
        assert_eq!(
            sender.send(InputEvent::Wheel { delta: 1.0 }),
            Err(ViewerError::InputClosed)
        );
    }
}
