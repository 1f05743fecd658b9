//! BodyArena - generation-counted storage for bodies
//!
//! Slots are recycled after a body is freed, but every reuse bumps the
//! slot's generation, so a handle captured before the free can never
//! resolve to the newcomer.

use std::fmt;

use crate::domain::body::Body;

/// Stable reference to a body in a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Pack into a u64 (generation in the high half) for the JS boundary.
    #[inline]
    pub fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

#[derive(Debug, Default)]
pub struct BodyArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: Body) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyHandle { index, generation: slot.generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, body: Some(body) });
        BodyHandle { index, generation: 0 }
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    #[inline]
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Two distinct live bodies at once. `None` if either is gone or if both
    /// handles name the same body.
    pub fn get_pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut Body, &mut Body)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }

        let (ia, ib) = (a.index as usize, b.index as usize);
        let (first, second) = if ia < ib {
            let (lo, hi) = self.slots.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        };
        Some((first.body.as_mut()?, second.body.as_mut()?))
    }

    /// Any number of distinct live bodies, returned in `handles` order.
    pub fn get_disjoint_mut(&mut self, handles: &[BodyHandle]) -> Option<Vec<&mut Body>> {
        for (i, h) in handles.iter().enumerate() {
            if !self.contains(*h) || handles[..i].iter().any(|o| o.index == h.index) {
                return None;
            }
        }

        let mut out: Vec<Option<&mut Body>> = handles.iter().map(|_| None).collect();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(pos) = handles.iter().position(|h| h.index as usize == index) {
                out[pos] = slot.body.as_mut();
            }
        }
        out.into_iter().collect()
    }

    /// Drop the body and retire the handle.
    pub fn free(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(body)
    }

    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.body.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{shapes, Vec2};

    fn body(tag: &str) -> Body {
        Body::new(shapes::rectangle(1.0, 1.0, Vec2::zero()).unwrap(), 1.0, tag).unwrap()
    }

    #[test]
    fn freed_handle_does_not_alias_reused_slot() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body("a"));
        assert!(arena.free(a).is_some());
        let b = arena.insert(body("b"));

        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).unwrap().tag(), "b");
        assert!(arena.free(a).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn pair_mut_returns_bodies_in_argument_order() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body("a"));
        let b = arena.insert(body("b"));

        let (x, y) = arena.get_pair_mut(b, a).unwrap();
        assert_eq!((x.tag(), y.tag()), ("b", "a"));
        assert!(arena.get_pair_mut(a, a).is_none());
    }

    #[test]
    fn disjoint_mut_rejects_duplicates_and_dead_handles() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body("a"));
        let b = arena.insert(body("b"));
        let c = arena.insert(body("c"));

        let got = arena.get_disjoint_mut(&[c, a]).unwrap();
        assert_eq!(got.iter().map(|b| b.tag()).collect::<Vec<_>>(), vec!["c", "a"]);

        assert!(arena.get_disjoint_mut(&[a, a]).is_none());
        arena.free(b);
        assert!(arena.get_disjoint_mut(&[a, b]).is_none());
    }

    #[test]
    fn bits_round_trip() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body("a"));
        arena.free(a);
        let b = arena.insert(body("b"));
        assert_eq!(BodyHandle::from_bits(b.to_bits()), b);
        assert_eq!(b.generation(), 1);
    }

    #[test]
    fn clear_retires_every_handle() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body("a"));
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(a).is_none());
    }
}
