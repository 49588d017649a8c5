//! Ordered behavior chains.
//!
//! A [`BehaviorChain`] is an immutable, append-only linked list of behaviors.
//! Every [`BehaviorChain::decorate`] call returns a new chain whose tail is the
//! chain it was called on; the original stays usable. Invoking a chain runs
//! its behaviors in the order they were supplied: the initial behavior first,
//! the most recently added one last.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// Payload handed to every behavior of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    body: String,
}

impl Message {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl From<&str> for Message {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

/// Unit of action with an external side effect.
///
/// Behaviors take `&self`: invoking a chain never mutates its structure, so a
/// chain may be shared across threads.
pub trait Behavior: Send + Sync {
    /// Short name used in logs and listings.
    fn name(&self) -> &str {
        "anonymous"
    }

    fn invoke(&self, message: &Message);
}

impl<F> Behavior for F
where
    F: Fn(&Message) + Send + Sync,
{
    fn invoke(&self, message: &Message) {
        self(message)
    }
}

struct Link {
    behavior: Arc<dyn Behavior>,
    /// Chain state before this link was added
    forward: Option<Arc<Link>>,
}

/// Non-empty chain of behaviors, executed in construction order.
///
/// Invocation walks the links iteratively. Dropping the last handle to a
/// chain releases its links recursively, so chains tens of thousands of links
/// long can exhaust the call stack on drop.
#[derive(Clone)]
pub struct BehaviorChain {
    head: Arc<Link>,
    len: usize,
}

#[allow(clippy::len_without_is_empty)]
impl BehaviorChain {
    /// Chain with a single behavior and no forward target.
    pub fn new(initial: impl Behavior + 'static) -> Self {
        Self::from_shared(Arc::new(initial))
    }

    pub fn from_shared(initial: Arc<dyn Behavior>) -> Self {
        Self {
            head: Arc::new(Link {
                behavior: initial,
                forward: None,
            }),
            len: 1,
        }
    }

    /// New chain whose own behavior is `next` and whose forward target is `self`.
    ///
    /// `self` is left untouched; both chains share the immutable tail.
    pub fn decorate(&self, next: impl Behavior + 'static) -> Self {
        self.decorate_shared(Arc::new(next))
    }

    pub fn decorate_shared(&self, next: Arc<dyn Behavior>) -> Self {
        Self {
            head: Arc::new(Link {
                behavior: next,
                forward: Some(Arc::clone(&self.head)),
            }),
            len: self.len + 1,
        }
    }

    /// Runs every behavior once with `message`, first supplied first.
    pub fn invoke(&self, message: &Message) {
        for behavior in self.behaviors() {
            trace!(behavior = behavior.name(), "invoke");
            behavior.invoke(message);
        }
    }

    /// Number of behaviors; never zero.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Behaviors in execution order.
    pub fn behaviors(&self) -> Vec<&dyn Behavior> {
        let mut behaviors = Vec::with_capacity(self.len);
        let mut link = Some(&self.head);
        while let Some(current) = link {
            behaviors.push(current.behavior.as_ref());
            link = current.forward.as_ref();
        }
        // Links run newest to oldest; execution is oldest first
        behaviors.reverse();
        behaviors
    }

    pub fn names(&self) -> Vec<String> {
        self.behaviors()
            .iter()
            .map(|behavior| behavior.name().to_string())
            .collect()
    }
}

impl fmt::Debug for BehaviorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorChain")
            .field("len", &self.len)
            .field("behaviors", &self.names())
            .finish()
    }
}
