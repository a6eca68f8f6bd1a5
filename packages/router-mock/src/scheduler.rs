//! When a navigation settles relative to the call that started it.
//!
//! The ordering contract lives here and nowhere else:
//! - [`Completion::Immediate`]: commit, start, complete, all before the call returns.
//! - [`Completion::Deferred`]: start before the call returns; commit and complete once the returned
//!   future is polled past a single yield.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// The steps of a navigation, in the order an immediate completion runs them.
pub(crate) trait Transition {
    /// Make the new location current.
    fn commit(&self);
    /// Announce that the navigation started.
    fn start(&self);
    /// Announce that the navigation completed.
    fn complete(&self);
}

/// How far a navigation suspends before it completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completion {
    /// Everything happens inside the navigation call.
    #[default]
    Immediate,
    /// Completion waits for the caller to poll the navigation past one yield.
    Deferred,
}

impl Completion {
    /// Pick the completion mode for a router.
    pub fn from_asynchronous(asynchronous: bool) -> Self {
        if asynchronous {
            Self::Deferred
        } else {
            Self::Immediate
        }
    }

    pub(crate) fn run<T: Transition>(self, transition: T) -> Scheduled<T> {
        match self {
            Self::Immediate => {
                transition.commit();
                transition.start();
                transition.complete();
                Scheduled {
                    yielded: true,
                    pending: None,
                }
            }
            Self::Deferred => {
                transition.start();
                Scheduled {
                    yielded: false,
                    pending: Some(transition),
                }
            }
        }
    }
}

/// A [`Transition`] waiting for its completion point.
pub(crate) struct Scheduled<T> {
    yielded: bool,
    pending: Option<T>,
}

impl<T> Scheduled<T> {
    /// Whether the transition has run to completion.
    pub(crate) fn is_settled(&self) -> bool {
        self.pending.is_none()
    }
}

impl<T: Transition + Unpin> Future for Scheduled<T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        if !this.yielded {
            this.yielded = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        if let Some(transition) = this.pending.take() {
            transition.commit();
            transition.complete();
        }

        Poll::Ready(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::{executor::block_on, poll};

    use super::*;

    #[derive(Clone, Default)]
    struct Steps(Rc<RefCell<Vec<&'static str>>>);

    impl Steps {
        fn taken(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }

    impl Transition for Steps {
        fn commit(&self) {
            self.0.borrow_mut().push("commit");
        }
        fn start(&self) {
            self.0.borrow_mut().push("start");
        }
        fn complete(&self) {
            self.0.borrow_mut().push("complete");
        }
    }

    #[test]
    fn immediate_runs_everything_up_front() {
        let steps = Steps::default();
        let scheduled = Completion::Immediate.run(steps.clone());

        assert!(scheduled.is_settled());
        assert_eq!(steps.taken(), ["commit", "start", "complete"]);

        block_on(scheduled);
        assert_eq!(steps.taken(), ["commit", "start", "complete"]);
    }

    #[test]
    fn deferred_starts_then_waits_one_yield() {
        let steps = Steps::default();
        let mut scheduled = Completion::Deferred.run(steps.clone());
        assert_eq!(steps.taken(), ["start"]);
        assert!(!scheduled.is_settled());

        block_on(async {
            assert!(poll!(&mut scheduled).is_pending());
            assert_eq!(steps.taken(), ["start"]);

            assert!(poll!(&mut scheduled).is_ready());
        });

        assert!(scheduled.is_settled());
        assert_eq!(steps.taken(), ["start", "commit", "complete"]);
    }

    #[test]
    fn deferred_settles_when_awaited() {
        let steps = Steps::default();
        block_on(Completion::Deferred.run(steps.clone()));
        assert_eq!(steps.taken(), ["start", "commit", "complete"]);
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(Completion::from_asynchronous(false), Completion::Immediate);
        assert_eq!(Completion::from_asynchronous(true), Completion::Deferred);
        assert_eq!(Completion::default(), Completion::Immediate);
    }
}
