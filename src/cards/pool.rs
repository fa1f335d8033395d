//! Card instance pool.
//!
//! The pool owns every `CardInstance` a match ever uses and recycles
//! released ones, so long matches do not churn allocations. Instances are
//! addressed by `InstanceId`, an index into the pool's arena.
//!
//! - `acquire` never fails: it reuses a free instance or grows the arena
//!   (a pool miss, logged at `warn`).
//! - `release` resets the instance and puts it back on the free list.
//!   Callers must remove the instance from every hand, graveyard and slot
//!   first.

use std::collections::VecDeque;

use super::definition::CardDefinition;
use super::instance::CardInstance;
use crate::core::{InstanceId, PoolError, Side};

/// Recycling arena of card instances.
///
/// ## Example
///
/// ```
/// use card_duel::cards::CardPool;
///
/// let mut pool = CardPool::prewarmed(2);
/// let a = pool.acquire();
/// let b = pool.acquire();
/// let c = pool.acquire(); // pool miss, grows the arena
///
/// assert_ne!(a, b);
/// assert_eq!(pool.misses(), 1);
/// assert_eq!(pool.allocated(), 3);
///
/// pool.release(c).unwrap();
/// assert_eq!(pool.available(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    instances: Vec<CardInstance>,
    free: VecDeque<InstanceId>,
    is_free: Vec<bool>,
    capacity: usize,
    misses: usize,
}

impl CardPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with `capacity` reset instances ready.
    #[must_use]
    pub fn prewarmed(capacity: usize) -> Self {
        let mut pool = Self::new();
        pool.prewarm(capacity);
        pool
    }

    /// Allocate free instances until at least `capacity` are available.
    pub fn prewarm(&mut self, capacity: usize) {
        while self.free.len() < capacity {
            let id = self.allocate();
            self.free.push_back(id);
            self.is_free[id.index()] = true;
        }
        self.capacity = self.capacity.max(capacity);
        log::debug!("card pool pre-warmed: {}", self);
    }

    fn allocate(&mut self) -> InstanceId {
        let id = InstanceId::new(self.instances.len() as u32);
        self.instances.push(CardInstance::unbound(id));
        self.is_free.push(false);
        id
    }

    /// Take a reset instance, allocating a new one on a miss.
    pub fn acquire(&mut self) -> InstanceId {
        match self.free.pop_front() {
            Some(id) => {
                self.is_free[id.index()] = false;
                id
            }
            None => {
                self.misses += 1;
                let id = self.allocate();
                log::warn!("card pool empty, allocated {} (miss #{})", id, self.misses);
                id
            }
        }
    }

    /// Acquire an instance and bind a definition copy to it.
    ///
    /// The new card starts in its owner's deck.
    pub fn spawn(&mut self, definition: CardDefinition, side: Side) -> InstanceId {
        let id = self.acquire();
        log::debug!("spawned {} as {} for {}", definition.name, id, side);
        self.instances[id.index()].initialize(definition, side);
        id
    }

    /// Reset an instance and return it to the free list.
    pub fn release(&mut self, id: InstanceId) -> Result<(), PoolError> {
        let index = id.index();
        if index >= self.instances.len() {
            return Err(PoolError::UnknownHandle(id));
        }
        if self.is_free[index] {
            return Err(PoolError::AlreadyFree(id));
        }
        self.instances[index].reset();
        self.is_free[index] = true;
        self.free.push_back(id);
        Ok(())
    }

    /// Live (acquired) instance by handle.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.is_in_use(id).then(|| &self.instances[id.index()])
    }

    /// Mutable live instance by handle.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        if self.is_in_use(id) {
            Some(&mut self.instances[id.index()])
        } else {
            None
        }
    }

    /// Mutable access to two distinct live instances at once.
    pub fn pair_mut(
        &mut self,
        a: InstanceId,
        b: InstanceId,
    ) -> Option<(&mut CardInstance, &mut CardInstance)> {
        if a == b || !self.is_in_use(a) || !self.is_in_use(b) {
            return None;
        }
        let (ia, ib) = (a.index(), b.index());
        if ia < ib {
            let (low, high) = self.instances.split_at_mut(ib);
            Some((&mut low[ia], &mut high[0]))
        } else {
            let (low, high) = self.instances.split_at_mut(ia);
            Some((&mut high[0], &mut low[ib]))
        }
    }

    /// Is this handle currently acquired?
    #[must_use]
    pub fn is_in_use(&self, id: InstanceId) -> bool {
        self.is_free.get(id.index()).is_some_and(|free| !free)
    }

    /// Iterate over acquired instances.
    pub fn in_use(&self) -> impl Iterator<Item = &CardInstance> {
        self.instances
            .iter()
            .zip(&self.is_free)
            .filter(|(_, free)| !**free)
            .map(|(card, _)| card)
    }

    /// Free instances ready for reuse.
    #[must_use]
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total instances ever allocated.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.instances.len()
    }

    /// Instances currently acquired.
    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.allocated() - self.available()
    }

    /// Pre-warm target.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of acquires that had to allocate.
    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl std::fmt::Display for CardPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pool {}/{} available ({} allocated, {} misses)",
            self.available(),
            self.capacity,
            self.allocated(),
            self.misses
        )
    }
}
