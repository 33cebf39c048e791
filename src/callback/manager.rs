//! Observer set that fans one epoch event out to several observers.

use super::traits::{EpochContext, EpochObserver};
use crate::error::Result;

/// Owns a list of observers and dispatches epoch events to all of them.
///
/// Every observer runs on every event even when an earlier one fails, so a
/// rejected snapshot in one observer cannot starve the others; the first
/// error is reported afterwards.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn EpochObserver>>,
}

impl ObserverSet {
    /// Create an empty observer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer.
    pub fn add<O: EpochObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Dispatch an epoch-end event to every observer.
    pub fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
        let mut first_error = None;
        for observer in &mut self.observers {
            if let Err(e) = observer.on_epoch_end(ctx) {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use crate::model::stubs::LineModel;
    use std::collections::BTreeMap;

    struct Tally(std::rc::Rc<std::cell::Cell<usize>>);

    impl EpochObserver for Tally {
        fn on_epoch_end(&mut self, _ctx: &EpochContext<'_>) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct AlwaysFails;

    impl EpochObserver for AlwaysFails {
        fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
            Err(MonitorError::EpochOutOfOrder { got: ctx.epoch, last: ctx.epoch })
        }
    }

    fn dispatch(set: &mut ObserverSet, epoch: usize) -> Result<()> {
        let model = LineModel { a: 1.0, b: 0.0, spread: None };
        let metrics = BTreeMap::from([("loss".to_string(), 1.0)]);
        set.on_epoch_end(&EpochContext { epoch, metrics: &metrics, model: &model })
    }

    #[test]
    fn test_empty_set_is_a_no_op() {
        let mut set = ObserverSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(dispatch(&mut set, 0).is_ok());
    }

    #[test]
    fn test_all_observers_run() {
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut set = ObserverSet::new();
        set.add(Tally(count.clone()));
        set.add(Tally(count.clone()));
        assert_eq!(set.len(), 2);

        dispatch(&mut set, 0).unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_failure_does_not_starve_later_observers() {
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut set = ObserverSet::new();
        set.add(AlwaysFails);
        set.add(Tally(count.clone()));

        let err = dispatch(&mut set, 7).unwrap_err();
        assert!(matches!(err, MonitorError::EpochOutOfOrder { got: 7, .. }));
        assert_eq!(count.get(), 1, "later observer still ran");
    }
}
