//! Fixed-capacity circular pools
//!
//! Slots are allocated once. Spawning overwrites whichever slot the cursor
//! points at and advances the cursor, so the oldest-written slot is always
//! reused next, visible or not.

/// One pooled item with its per-frame cull flag
#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub item: T,
    pub out_of_view: bool,
}

/// Circular buffer of slots with a single write cursor
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Box<[Slot<T>]>,
    cursor: usize,
}

impl<T> Pool<T> {
    /// Fill every slot up front. Capacity never changes afterwards.
    ///
    /// A capacity of zero is raised to one so the cursor always has a slot
    /// to wrap onto.
    pub fn from_fn<E>(
        capacity: usize,
        mut make: impl FnMut(usize) -> Result<T, E>,
    ) -> Result<Self, E> {
        let slots = (0..capacity.max(1))
            .map(|i| {
                make(i).map(|item| Slot {
                    item,
                    out_of_view: false,
                })
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self {
            slots: slots.into_boxed_slice(),
            cursor: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index the next spawn will overwrite
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Claim the slot under the cursor and advance. Returns its index.
    pub fn advance(&mut self) -> usize {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.slots.len();
        index
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).map(|s| &s.item)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).map(|s| &mut s.item)
    }

    #[inline]
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut [Slot<T>] {
        &mut self.slots
    }

    pub fn is_out_of_view(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.out_of_view)
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.out_of_view).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().map(|s| &s.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn pool(n: usize) -> Pool<u32> {
        Pool::from_fn(n, |i| Ok::<_, Infallible>(i as u32)).unwrap()
    }

    #[test]
    fn test_zero_capacity_holds_one_slot() {
        let mut p = pool(0);
        assert_eq!(p.len(), 1);
        assert!(!p.is_empty());
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance(), 0);
        assert_eq!(p.get(0), Some(&0));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut p = pool(4);
        let claimed: Vec<usize> = (0..6).map(|_| p.advance()).collect();
        assert_eq!(claimed, vec![0, 1, 2, 3, 0, 1]);
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_n_plus_one_overwrites_slot_zero() {
        let n = 5;
        let mut p = pool(n);
        for spawn in 0..=n {
            let i = p.advance();
            *p.get_mut(i).unwrap() = 100 + spawn as u32;
        }
        assert_eq!(p.get(0), Some(&(100 + n as u32)));
        assert_eq!(p.get(1), Some(&101));
    }

    #[test]
    fn test_construction_error_propagates() {
        let r = Pool::from_fn(3, |i| if i == 2 { Err("bad") } else { Ok(i) });
        assert_eq!(r.unwrap_err(), "bad");
    }

    #[test]
    fn test_visibility() {
        let mut p = pool(3);
        p.slots_mut()[1].out_of_view = true;
        assert!(p.is_out_of_view(1));
        assert!(!p.is_out_of_view(7));
        assert_eq!(p.visible_count(), 2);
        assert_eq!(p.len(), 3);
        assert_eq!(p.iter().count(), 3);
    }
}
