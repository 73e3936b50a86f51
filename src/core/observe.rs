//! Change notification for the range cells.

use std::fmt;

/// One of the four independently observable cells of a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Lt,
    Duration,
    IsNow,
    RoundUp,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Duration => "duration",
            Self::IsNow => "is_now",
            Self::RoundUp => "round_up",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Callback = Box<dyn FnMut(Field)>;

/// Observer list plus a revision counter.
///
/// Every effective change bumps the revision, so a frame loop can poll
/// [`Observers::revision`] instead of registering callbacks.
#[derive(Default)]
pub struct Observers {
    callbacks: Vec<Callback>,
    revision: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(Field) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub fn notify(&mut self, field: Field) {
        self.revision += 1;
        for callback in &mut self.callbacks {
            callback(field);
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .field("revision", &self.revision)
            .finish()
    }
}
